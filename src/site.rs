//! Documentation site model: the source file index and per-page context.
//!
//! # Path Mapping
//!
//! | Source | use_directory_urls | dest | url |
//! |--------|--------------------|------|-----|
//! | `index.md` | true | `index.html` | `` |
//! | `guide/index.md` | true | `guide/index.html` | `guide/` |
//! | `guide/setup.md` | true | `guide/setup/index.html` | `guide/setup/` |
//! | `guide/setup.md` | false | `guide/setup.html` | `guide/setup.html` |
//! | `api/openapi.json` | any | `api/openapi.json` | `api/openapi.json` |

use crate::utils::url::dirname;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Source file names that render to their directory's `index.html`.
const INDEX_NAMES: &[&str] = &["index.md", "README.md"];

// ============================================================================
// SiteFile
// ============================================================================

/// One source file of the documentation site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    /// Path relative to the docs directory, `/`-separated.
    pub src_path: String,
    /// Path of the rendered file relative to the site directory.
    pub dest_path: String,
    /// URL relative to the site root.
    pub url: String,
}

impl SiteFile {
    pub fn new(src_path: impl Into<String>, use_directory_urls: bool) -> Self {
        let src_path = src_path.into();
        let dest_path = dest_path_for(&src_path, use_directory_urls);
        let url = url_for(&dest_path, use_directory_urls);
        Self {
            src_path,
            dest_path,
            url,
        }
    }

    /// Markdown sources become pages.
    pub fn is_page(&self) -> bool {
        self.src_path.ends_with(".md")
    }
}

fn dest_path_for(src_path: &str, use_directory_urls: bool) -> String {
    let Some(stem) = src_path.strip_suffix(".md") else {
        return src_path.to_owned();
    };

    let dir = dirname(src_path);
    let file_name = src_path.rsplit('/').next().unwrap_or(src_path);
    let join = |name: &str| {
        if dir.is_empty() {
            name.to_owned()
        } else {
            format!("{dir}/{name}")
        }
    };

    if INDEX_NAMES.contains(&file_name) {
        join("index.html")
    } else if use_directory_urls {
        format!("{stem}/index.html")
    } else {
        format!("{stem}.html")
    }
}

/// Percent-encoded URL of `dest_path`, relative to the site root.
fn url_for(dest_path: &str, use_directory_urls: bool) -> String {
    let url = if !use_directory_urls {
        dest_path
    } else {
        match dest_path.rsplit_once('/') {
            Some((dir, "index.html")) => &dest_path[..=dir.len()],
            None if dest_path == "index.html" => "",
            _ => dest_path,
        }
    };
    url.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// SiteFiles
// ============================================================================

/// Every known source file of the current build, keyed by source path.
///
/// A read-only snapshot: built once, shared by all pages.
#[derive(Debug, Clone, Default)]
pub struct SiteFiles {
    files: HashMap<String, SiteFile>,
    /// `dest_path` → `src_path` for pages
    pages: HashMap<String, String>,
}

impl SiteFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: SiteFile) {
        if file.is_page() {
            self.pages
                .insert(file.dest_path.clone(), file.src_path.clone());
        }
        self.files.insert(file.src_path.clone(), file);
    }

    /// Index every file under `docs_dir`.
    pub fn from_docs_dir(docs_dir: &Path, use_directory_urls: bool) -> Result<Self> {
        let mut files = Self::new();

        for entry in WalkDir::new(docs_dir) {
            let entry = entry
                .with_context(|| format!("failed to scan `{}`", docs_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_str().unwrap_or_default();
            if IGNORED_FILES.contains(&name) {
                continue;
            }

            let rel = entry.path().strip_prefix(docs_dir)?;
            files.insert(SiteFile::new(to_slash_path(rel), use_directory_urls));
        }

        Ok(files)
    }

    pub fn get(&self, src_path: &str) -> Option<&SiteFile> {
        self.files.get(src_path)
    }

    /// Source page rendered to `dest_path`.
    pub fn page_by_dest(&self, dest_path: &str) -> Option<&SiteFile> {
        self.pages.get(dest_path).and_then(|src| self.files.get(src))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Convert a relative filesystem path to a `/`-separated string.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// PageContext
// ============================================================================

/// The page currently being transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Source path relative to the docs directory.
    pub src_path: String,
    /// Final URL relative to the site root.
    pub url: String,
    /// Directory the rendered page (and its fragments) are written to.
    pub output_dir: PathBuf,
}

impl PageContext {
    pub fn new(src_path: impl Into<String>, url: impl Into<String>, site_dir: &Path) -> Self {
        let url = url.into();
        let decoded = urlencoding::decode(&url).map_or_else(|_| url.clone(), |d| d.into_owned());
        let dir = dirname(&decoded);
        let output_dir = if dir.is_empty() {
            site_dir.to_path_buf()
        } else {
            site_dir.join(dir)
        };

        Self {
            src_path: src_path.into(),
            url,
            output_dir,
        }
    }

    /// Build the context of a source page.
    pub fn for_file(file: &SiteFile, site_dir: &Path) -> Self {
        Self::new(file.src_path.clone(), file.url.clone(), site_dir)
    }
}
