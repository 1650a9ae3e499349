//! Per-tag option resolution.
//!
//! Global `[swagger_ui]` options are merged with the attributes of a single
//! `<swagger-ui>` tag. OAuth2 properties come from tag attributes only.

use super::tag::TagOccurrence;
use crate::config::{OptionKey, OptionKind, SwaggerUiConfig};
use crate::log;
use serde_json::{Map, Value};

/// Swagger UI options of one viewer, in schema order.
pub type ResolvedOptions = Map<String, Value>;

/// Arguments of `ui.initOAuth(...)` for one viewer.
pub type OAuth2Properties = Map<String, Value>;

/// Options whose Swagger UI name differs from the configuration key.
const RENAMED_OPTIONS: &[(&str, &str)] = &[("syntaxHighlightTheme", "syntaxHighlight.theme")];

/// How an OAuth2 attribute is read.
#[derive(Debug, Clone, Copy)]
enum OAuth2Kind {
    Text,
    Flag,
    Object,
}

const OAUTH2_PROPERTIES: &[(&str, OAuth2Kind)] = &[
    ("clientId", OAuth2Kind::Text),
    ("clientSecret", OAuth2Kind::Text),
    ("realm", OAuth2Kind::Text),
    ("appName", OAuth2Kind::Text),
    ("scopes", OAuth2Kind::Text),
    ("additionalQueryStringParams", OAuth2Kind::Object),
    ("useBasicAuthenticationWithAccessCodeGrant", OAuth2Kind::Flag),
    ("usePkceWithAuthorizationCodeGrant", OAuth2Kind::Flag),
];

/// Parse JSON written with single quotes, e.g. `['get', 'post']`.
pub fn parse_relaxed_json(raw: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&raw.replace('\'', "\""))
}

#[inline]
fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Merge the global options with the overrides carried by `tag`.
///
/// Options without a value (`null`) are left out.
pub fn resolve_options(config: &SwaggerUiConfig, tag: &TagOccurrence) -> ResolvedOptions {
    let mut options = ResolvedOptions::new();

    for key in OptionKey::ALL {
        let value = match tag.attr(key.name()) {
            Some(raw) => coerce_override(key, raw),
            None => config.option_value(key),
        };
        if !value.is_null() {
            options.insert(key.name().to_owned(), value);
        }
    }

    for (from, to) in RENAMED_OPTIONS {
        if let Some(value) = options.shift_remove(*from) {
            options.insert((*to).to_owned(), value);
        }
    }

    options
}

/// Convert an attribute string to the type of its option, `null` if it is malformed.
fn coerce_override(key: OptionKey, raw: &str) -> Value {
    match key.kind() {
        OptionKind::Text => Value::String(raw.to_owned()),
        OptionKind::Bool => Value::Bool(parse_flag(raw)),
        OptionKind::Integer => match raw.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(e) => {
                log!("warn"; "Attribute {}: {raw:?} is not an integer ({e}).", key.name());
                log!("warn"; "Ignore {} attribute setting.", key.name());
                Value::Null
            }
        },
        OptionKind::List => match parse_relaxed_json(raw) {
            Ok(list @ Value::Array(_)) => list,
            Ok(other) => {
                log!("warn"; "Attribute {}: {other} is not a list.", key.name());
                log!("warn"; "Ignore {} attribute setting.", key.name());
                Value::Null
            }
            Err(e) => {
                log!("warn"; "Attribute {}: {e}", key.name());
                log!("warn"; "Ignore {} attribute setting.", key.name());
                Value::Null
            }
        },
    }
}

/// Collect the OAuth2 properties set on `tag`.
pub fn resolve_oauth2(tag: &TagOccurrence) -> OAuth2Properties {
    let mut props = OAuth2Properties::new();

    for &(key, kind) in OAUTH2_PROPERTIES {
        let Some(raw) = tag.attr(key) else {
            continue;
        };
        let value = match kind {
            OAuth2Kind::Text => Value::String(raw.to_owned()),
            OAuth2Kind::Flag => Value::Bool(parse_flag(raw)),
            OAuth2Kind::Object => match parse_relaxed_json(raw) {
                Ok(map @ Value::Object(_)) => map,
                Ok(other) => {
                    log!("warn"; "Attribute {key}: {other} is not a dict.");
                    log!("warn"; "Ignore {key} attribute setting.");
                    continue;
                }
                Err(e) => {
                    log!("warn"; "Attribute {key}: {e}");
                    log!("warn"; "Ignore {key} attribute setting.");
                    continue;
                }
            },
        };
        props.insert(key.to_owned(), value);
    }

    props
}
