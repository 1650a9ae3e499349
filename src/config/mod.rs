//! Configuration management for `swagger-tag.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[site]`       | Documentation site layout (docs, site, theme)    |
//! | `[swagger_ui]` | Global Swagger UI options, overridable per tag   |
//!
//! # Example
//!
//! ```toml
//! [site]
//! docs_dir = "docs"
//! site_dir = "site"
//!
//! [swagger_ui]
//! docExpansion = "none"
//! tryItOutEnabled = true
//! ```

pub mod defaults;
mod error;
mod site;
mod swagger;

pub use error::ConfigError;
pub use site::SiteSection;
pub use swagger::{DocExpansion, OptionKey, OptionKind, SwaggerUiConfig, SyntaxTheme};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// HTTP methods Swagger UI can submit from "Try it out".
const SUBMIT_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Root configuration structure representing swagger-tag.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Documentation site layout
    #[serde(default)]
    pub site: SiteSection,

    /// Global Swagger UI options
    #[serde(default)]
    pub swagger_ui: SwaggerUiConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.site.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.site.root = Some(path.to_path_buf())
    }

    /// Whether the theme that rendered the site supports dark mode sync.
    pub fn has_dark_mode_theme(&self) -> bool {
        self.site.theme == "material"
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        match &cli.command {
            Commands::Build { build_args } => {
                Self::update_option(&mut self.site.docs_dir, build_args.docs_dir.as_ref());
                Self::update_option(&mut self.site.site_dir, build_args.site_dir.as_ref());
                Self::update_option(&mut self.site.theme, build_args.theme.as_ref());
            }
            Commands::Assets { site_dir } => {
                Self::update_option(&mut self.site.site_dir, site_dir.as_ref());
            }
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.site.docs_dir = Self::normalize_path(&root.join(&self.site.docs_dir));
        self.site.site_dir = Self::normalize_path(&root.join(&self.site.site_dir));
        self.site.bundle_dir = Self::normalize_path(&root.join(&self.site.bundle_dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let ui = &self.swagger_ui;

        if let Some(method) = ui
            .supported_submit_methods
            .iter()
            .find(|m| !SUBMIT_METHODS.contains(&m.as_str()))
        {
            bail!(ConfigError::UnknownSubmitMethod(method.clone()));
        }

        if ui.default_models_expand_depth < -1 {
            bail!(ConfigError::ExpandDepth(ui.default_models_expand_depth));
        }

        if ui.dark_scheme_name.trim().is_empty() {
            bail!(ConfigError::EmptyDarkSchemeName);
        }

        if let Some(index) = ui.filter_files.iter().position(|f| f.trim().is_empty()) {
            bail!(ConfigError::EmptyFilterPath(index));
        }

        Ok(())
    }
}
