//! Post-processing of an already rendered documentation site.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── SiteFiles::from_docs_dir() ──► on_pre_page()
//!     │
//!     ├── collect_pages()
//!     │       │
//!     │       └── Rendered `.html` files that map back to a source page
//!     │
//!     ├── par_iter ──► on_post_page() ──► rewrite changed pages
//!     │
//!     └── on_post_build() ──► Copy the asset bundle
//! ```

use crate::{
    config::SiteConfig,
    log,
    plugin::SwaggerUiPlugin,
    site::{PageContext, SiteFiles, to_slash_path},
    swagger::fragment::FRAGMENT_PREFIX,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use walkdir::WalkDir;

/// A rendered page and where it came from.
struct RenderedPage {
    path: PathBuf,
    context: PageContext,
}

/// Run the plugin over every rendered page of the site, then publish assets.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let site_dir = &config.site.site_dir;
    if !site_dir.is_dir() {
        bail!(
            "Site directory `{}` not found, build the documentation first",
            site_dir.display()
        );
    }

    let files = SiteFiles::from_docs_dir(&config.site.docs_dir, config.site.use_directory_urls)?;
    log!("build"; "Indexed {} documentation files", files.len());

    let mut plugin = SwaggerUiPlugin::new(config)?;
    plugin.on_pre_page(files);

    let pages = collect_pages(site_dir, plugin.files())?;
    let changed = AtomicUsize::new(0);

    pages.par_iter().try_for_each(|page| -> Result<()> {
        let html = fs::read_to_string(&page.path)
            .with_context(|| format!("failed to read `{}`", page.path.display()))?;
        let output = plugin
            .on_post_page(&html, &page.context)
            .with_context(|| format!("failed to process `{}`", page.context.src_path))?;

        if output != html {
            fs::write(&page.path, output)
                .with_context(|| format!("failed to write `{}`", page.path.display()))?;
            changed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    })?;

    log!(
        "build";
        "{} of {} pages embed Swagger UI",
        changed.load(Ordering::Relaxed),
        pages.len()
    );

    plugin.on_post_build(site_dir)
}

/// Find the rendered pages under `site_dir` that belong to a source page.
///
/// Generated fragments and pages without a source (e.g. `404.html`) are skipped.
fn collect_pages(site_dir: &Path, files: &SiteFiles) -> Result<Vec<RenderedPage>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(site_dir) {
        let entry = entry.with_context(|| format!("failed to scan `{}`", site_dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(FRAGMENT_PREFIX))
        {
            continue;
        }

        let dest = to_slash_path(path.strip_prefix(site_dir)?);
        if let Some(file) = files.page_by_dest(&dest) {
            pages.push(RenderedPage {
                path: path.to_path_buf(),
                context: PageContext::for_file(file, site_dir),
            });
        }
    }

    Ok(pages)
}
