//! Errors raised while loading `swagger-tag.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid swagger-tag.toml")]
    Toml(#[from] toml::de::Error),

    /// `[swagger_ui.supportedSubmitMethods]` names something Swagger UI cannot send.
    #[error("[swagger_ui.supportedSubmitMethods] contains unknown method `{0}`")]
    UnknownSubmitMethod(String),

    #[error("[swagger_ui.defaultModelsExpandDepth] is {0}, must be -1 or greater")]
    ExpandDepth(i64),

    #[error("[swagger_ui.dark_scheme_name] must not be empty")]
    EmptyDarkSchemeName,

    /// Entry `{0}` of `[swagger_ui.filter_files]` is blank.
    #[error("[swagger_ui.filter_files] entry {0} is empty")]
    EmptyFilterPath(usize),
}
