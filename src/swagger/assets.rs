//! Publishing of the viewer asset bundle into the built site.
//!
//! ```text
//! <bundle>/stylesheets/*        ──► <site>/assets/stylesheets/
//! <bundle>/javascripts/*        ──► <site>/assets/javascripts/
//! <bundle>/oauth2-redirect.html ──► <site>/assets/swagger-ui/oauth2-redirect.html
//! ```

use super::fragment::{CSS_DIR, JS_DIR, OAUTH2_REDIRECT};
use crate::log;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Copy the asset bundle into `site_dir`, overwriting earlier copies.
pub fn publish_assets(bundle_dir: &Path, site_dir: &Path) -> Result<()> {
    if !bundle_dir.is_dir() {
        bail!("Swagger UI asset bundle `{}` not found", bundle_dir.display());
    }

    log!("assets"; "Copying swagger ui assets.");

    copy_flat(&bundle_dir.join("stylesheets"), &site_dir.join(CSS_DIR))?;
    copy_flat(&bundle_dir.join("javascripts"), &site_dir.join(JS_DIR))?;
    copy_file(
        &bundle_dir.join("oauth2-redirect.html"),
        &site_dir.join(OAUTH2_REDIRECT),
    )
}

/// Copy the files directly inside `src` into `dest`.
fn copy_flat(src: &Path, dest: &Path) -> Result<()> {
    let entries =
        fs::read_dir(src).with_context(|| format!("failed to read `{}`", src.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read `{}`", src.display()))?;
        if entry.file_type()?.is_file() {
            copy_file(&entry.path(), &dest.join(entry.file_name()))?;
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    fs::copy(src, dest).with_context(|| {
        format!("failed to copy `{}` to `{}`", src.display(), dest.display())
    })?;
    Ok(())
}
