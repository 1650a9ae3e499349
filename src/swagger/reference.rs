//! Resolution of the `src` of a tag into a page-relative URL.

use crate::log;
use crate::site::{PageContext, SiteFiles};
use crate::utils::url::{UrlParts, dirname, get_relative_url, normalize_path};
use std::borrow::Cow;

/// Marker Python-Markdown leaves in obfuscated email links.
const AMP_SUBSTITUTE: &str = "\u{2}amp\u{3}";

/// Resolve `raw` against the current page.
///
/// | Input | Output |
/// |-------|--------|
/// | `https://x.io/a.json` | unchanged (external) |
/// | `/api/a.json` | unchanged (absolute) |
/// | `../api` | unchanged (no file extension) |
/// | `../api/openapi.json` on `guide/index.md` | `../api/openapi.json` relative to `guide/` |
/// | `missing.json` | unchanged, with a warning |
///
/// Never fails: anything that is not a known source file is returned as written.
pub fn resolve_reference(page: &PageContext, files: &SiteFiles, raw: &str) -> String {
    let parts = UrlParts::split(raw);
    let file_name = parts.path.rsplit('/').next().unwrap_or_default();

    if !parts.scheme.is_empty()
        || !parts.netloc.is_empty()
        || parts.path.is_empty()
        || raw.starts_with('/')
        || raw.starts_with('\\')
        || raw.contains(AMP_SUBSTITUTE)
        || !file_name.contains('.')
    {
        return raw.to_owned();
    }

    let decoded = urlencoding::decode(parts.path).unwrap_or(Cow::Borrowed(parts.path));
    let page_dir = dirname(&page.src_path);
    let joined = if page_dir.is_empty() {
        decoded.into_owned()
    } else {
        format!("{page_dir}/{decoded}")
    };
    let normalized = normalize_path(&joined);
    let target = normalized.trim_start_matches('/');

    let Some(file) = files.get(target) else {
        log!(
            "warn";
            "Documentation file '{}' contains Swagger UI src to '{}' which is not found in the documentation files.",
            page.src_path,
            target
        );
        return raw.to_owned();
    };

    parts.with_path(&get_relative_url(&file.url, &page.url))
}
