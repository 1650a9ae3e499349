//! The documentation-host integration.
//!
//! A host drives one build through three hooks:
//!
//! ```text
//! on_pre_page(files)   once, before pages      remember the source file index
//! on_post_page(html)   once per rendered page  replace <swagger-ui> tags
//! on_post_build(site)  once, after all pages   publish the asset bundle
//! ```

use crate::config::SiteConfig;
use crate::site::{PageContext, SiteFiles};
use crate::swagger::{FragmentRenderer, PageTransformer, publish_assets};
use anyhow::Result;
use std::path::Path;

/// Plugin state for a single build.
///
/// Pages may be handed to [`on_post_page`](Self::on_post_page) from several
/// threads at once; the plugin is only read after `on_pre_page`.
pub struct SwaggerUiPlugin<'a> {
    config: &'a SiteConfig,
    renderer: FragmentRenderer,
    files: SiteFiles,
}

impl<'a> SwaggerUiPlugin<'a> {
    pub fn new(config: &'a SiteConfig) -> Result<Self> {
        Ok(Self {
            config,
            renderer: FragmentRenderer::new()?,
            files: SiteFiles::new(),
        })
    }

    /// Take the file index of the current build.
    pub fn on_pre_page(&mut self, files: SiteFiles) {
        self.files = files;
    }

    pub fn files(&self) -> &SiteFiles {
        &self.files
    }

    /// Transform one rendered page.
    pub fn on_post_page(&self, html: &str, page: &PageContext) -> Result<String> {
        PageTransformer {
            config: self.config,
            files: &self.files,
            renderer: &self.renderer,
        }
        .transform(html, page)
    }

    /// Copy the asset bundle into `site_dir`.
    pub fn on_post_build(&self, site_dir: &Path) -> Result<()> {
        publish_assets(&self.config.site.bundle_dir, site_dir)
    }
}
