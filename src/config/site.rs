//! `[site]` section configuration.
//!
//! Describes the documentation site the plugin runs against: where the
//! sources live, where the rendered pages are, and which theme rendered them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in swagger-tag.toml.
///
/// # Example
/// ```toml
/// [site]
/// docs_dir = "docs"
/// site_dir = "site"
/// theme = "material"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::site::root")]
    #[educe(Default = defaults::site::root())]
    pub root: Option<PathBuf>,

    /// Documentation source directory, used to build the site file index.
    #[serde(default = "defaults::site::docs_dir")]
    #[educe(Default = defaults::site::docs_dir())]
    pub docs_dir: PathBuf,

    /// Rendered site directory. Pages are rewritten in place.
    #[serde(default = "defaults::site::site_dir")]
    #[educe(Default = defaults::site::site_dir())]
    pub site_dir: PathBuf,

    /// Swagger UI asset bundle (`stylesheets/`, `javascripts/`, `oauth2-redirect.html`).
    #[serde(default = "defaults::site::bundle_dir")]
    #[educe(Default = defaults::site::bundle_dir())]
    pub bundle_dir: PathBuf,

    /// Name of the theme that rendered the site.
    #[serde(default = "defaults::site::theme")]
    #[educe(Default = defaults::site::theme())]
    pub theme: String,

    /// Pages are served as `page/` rather than `page.html`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub use_directory_urls: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_site_section_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.site.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.site.site_dir, PathBuf::from("site"));
        assert_eq!(config.site.bundle_dir, PathBuf::from("swagger-ui"));
        assert_eq!(config.site.theme, "material");
        assert!(config.site.use_directory_urls);
        assert!(config.site.root.is_none());
    }

    #[test]
    fn test_site_section_custom() {
        let config = r#"
            [site]
            docs_dir = "content"
            site_dir = "public"
            theme = "readthedocs"
            use_directory_urls = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.docs_dir, PathBuf::from("content"));
        assert_eq!(config.site.site_dir, PathBuf::from("public"));
        assert_eq!(config.site.theme, "readthedocs");
        assert!(!config.site.use_directory_urls);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            output = "public"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
