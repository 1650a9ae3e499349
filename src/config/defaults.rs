//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn docs_dir() -> PathBuf {
        "docs".into()
    }

    pub fn site_dir() -> PathBuf {
        "site".into()
    }

    pub fn bundle_dir() -> PathBuf {
        "swagger-ui".into()
    }

    pub fn theme() -> String {
        "material".into()
    }
}

// ============================================================================
// [swagger_ui] Section Defaults
// ============================================================================

pub mod swagger_ui {
    use super::super::{DocExpansion, SyntaxTheme};
    use serde_json::Value;

    pub fn doc_expansion() -> DocExpansion {
        DocExpansion::default()
    }

    pub fn filter() -> Value {
        Value::Bool(false)
    }

    pub fn syntax_highlight_theme() -> SyntaxTheme {
        SyntaxTheme::default()
    }

    pub fn oauth2_redirect_url() -> Option<String> {
        None
    }

    pub fn supported_submit_methods() -> Vec<String> {
        ["get", "put", "post", "delete", "options", "head", "patch", "trace"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn validator_url() -> String {
        "none".into()
    }

    pub fn dark_scheme_name() -> String {
        "slate".into()
    }

    pub fn default_models_expand_depth() -> i64 {
        1
    }
}
