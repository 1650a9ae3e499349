//! `[swagger_ui]` section configuration.
//!
//! The global plugin options. Every key except `background` and `extra_css`
//! doubles as a Swagger UI option and can be overridden per tag through a
//! same-named (case-insensitive) attribute, see [`OptionKey`].

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Enums
// ============================================================================

/// Initial expansion of operations and tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Expand only the tags (default).
    #[default]
    List,
    /// Expand tags and operations.
    Full,
    /// Expand nothing.
    None,
}

impl DocExpansion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Full => "full",
            Self::None => "none",
        }
    }
}

/// Highlight.js theme used for code samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxTheme {
    #[default]
    Agate,
    Arta,
    Monokai,
    Nord,
    Obsidian,
    TomorrowNight,
}

impl SyntaxTheme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agate => "agate",
            Self::Arta => "arta",
            Self::Monokai => "monokai",
            Self::Nord => "nord",
            Self::Obsidian => "obsidian",
            Self::TomorrowNight => "tomorrow-night",
        }
    }
}

// ============================================================================
// Option schema
// ============================================================================

/// How a per-tag attribute override is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Kept as the attribute string.
    Text,
    /// `"true"` (any case) is `true`, everything else `false`.
    Bool,
    /// Must parse as an integer.
    Integer,
    /// Relaxed JSON array (single quotes allowed).
    List,
}

/// Options that are forwarded to Swagger UI, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    DocExpansion,
    Filter,
    SyntaxHighlightTheme,
    TryItOutEnabled,
    Oauth2RedirectUrl,
    SupportedSubmitMethods,
    ValidatorUrl,
    DarkSchemeName,
    FilterFiles,
    DefaultModelsExpandDepth,
}

impl OptionKey {
    pub const ALL: [Self; 10] = [
        Self::DocExpansion,
        Self::Filter,
        Self::SyntaxHighlightTheme,
        Self::TryItOutEnabled,
        Self::Oauth2RedirectUrl,
        Self::SupportedSubmitMethods,
        Self::ValidatorUrl,
        Self::DarkSchemeName,
        Self::FilterFiles,
        Self::DefaultModelsExpandDepth,
    ];

    /// Configuration key, also the Swagger UI option name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DocExpansion => "docExpansion",
            Self::Filter => "filter",
            Self::SyntaxHighlightTheme => "syntaxHighlightTheme",
            Self::TryItOutEnabled => "tryItOutEnabled",
            Self::Oauth2RedirectUrl => "oauth2RedirectUrl",
            Self::SupportedSubmitMethods => "supportedSubmitMethods",
            Self::ValidatorUrl => "validatorUrl",
            Self::DarkSchemeName => "dark_scheme_name",
            Self::FilterFiles => "filter_files",
            Self::DefaultModelsExpandDepth => "defaultModelsExpandDepth",
        }
    }

    pub const fn kind(self) -> OptionKind {
        match self {
            Self::TryItOutEnabled => OptionKind::Bool,
            Self::DefaultModelsExpandDepth => OptionKind::Integer,
            Self::SupportedSubmitMethods => OptionKind::List,
            _ => OptionKind::Text,
        }
    }
}

// ============================================================================
// SwaggerUiConfig
// ============================================================================

/// `[swagger_ui]` section in swagger-tag.toml.
///
/// # Example
/// ```toml
/// [swagger_ui]
/// docExpansion = "none"
/// tryItOutEnabled = true
/// supportedSubmitMethods = ["get", "post"]
/// filter_files = ["api/index.md"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SwaggerUiConfig {
    /// Background color of the embedded document.
    #[serde(default)]
    pub background: String,

    #[serde(rename = "docExpansion", default = "defaults::swagger_ui::doc_expansion")]
    #[educe(Default = defaults::swagger_ui::doc_expansion())]
    pub doc_expansion: DocExpansion,

    /// `false`, `true`, or a filter expression.
    #[serde(default = "defaults::swagger_ui::filter")]
    #[educe(Default = defaults::swagger_ui::filter())]
    pub filter: Value,

    #[serde(
        rename = "syntaxHighlightTheme",
        default = "defaults::swagger_ui::syntax_highlight_theme"
    )]
    #[educe(Default = defaults::swagger_ui::syntax_highlight_theme())]
    pub syntax_highlight_theme: SyntaxTheme,

    #[serde(rename = "tryItOutEnabled", default = "defaults::r#false")]
    #[educe(Default = false)]
    pub try_it_out_enabled: bool,

    /// Overrides the bundled `oauth2-redirect.html`.
    #[serde(
        rename = "oauth2RedirectUrl",
        default = "defaults::swagger_ui::oauth2_redirect_url"
    )]
    #[educe(Default = defaults::swagger_ui::oauth2_redirect_url())]
    pub oauth2_redirect_url: Option<String>,

    #[serde(
        rename = "supportedSubmitMethods",
        default = "defaults::swagger_ui::supported_submit_methods"
    )]
    #[educe(Default = defaults::swagger_ui::supported_submit_methods())]
    pub supported_submit_methods: Vec<String>,

    /// Schema validator URL, `"none"` disables validation.
    #[serde(rename = "validatorUrl", default = "defaults::swagger_ui::validator_url")]
    #[educe(Default = defaults::swagger_ui::validator_url())]
    pub validator_url: String,

    /// Extra stylesheets linked from every embedded document.
    #[serde(default)]
    pub extra_css: Vec<String>,

    /// Theme palette that switches the viewer to dark mode.
    #[serde(default = "defaults::swagger_ui::dark_scheme_name")]
    #[educe(Default = defaults::swagger_ui::dark_scheme_name())]
    pub dark_scheme_name: String,

    /// Only pages listed here are processed. Empty means all pages.
    #[serde(default)]
    pub filter_files: Vec<String>,

    #[serde(
        rename = "defaultModelsExpandDepth",
        default = "defaults::swagger_ui::default_models_expand_depth"
    )]
    #[educe(Default = defaults::swagger_ui::default_models_expand_depth())]
    pub default_models_expand_depth: i64,
}

impl SwaggerUiConfig {
    /// Global value of an option, `Value::Null` when unset.
    pub fn option_value(&self, key: OptionKey) -> Value {
        match key {
            OptionKey::DocExpansion => self.doc_expansion.as_str().into(),
            OptionKey::Filter => self.filter.clone(),
            OptionKey::SyntaxHighlightTheme => self.syntax_highlight_theme.as_str().into(),
            OptionKey::TryItOutEnabled => self.try_it_out_enabled.into(),
            OptionKey::Oauth2RedirectUrl => self
                .oauth2_redirect_url
                .clone()
                .map_or(Value::Null, Value::String),
            OptionKey::SupportedSubmitMethods => self.supported_submit_methods.clone().into(),
            OptionKey::ValidatorUrl => self.validator_url.clone().into(),
            OptionKey::DarkSchemeName => self.dark_scheme_name.clone().into(),
            OptionKey::FilterFiles => self.filter_files.clone().into(),
            OptionKey::DefaultModelsExpandDepth => self.default_models_expand_depth.into(),
        }
    }
}
