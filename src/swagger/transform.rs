//! Page transformation: `<swagger-ui>` tags become viewer iframes.
//!
//! # Flow
//!
//! ```text
//! html ──► filter_files? ──► scan_tags() ──► standalone tags ─┐
//!                                      └──► grouped tags ─────┤
//!                                                             ▼
//!                       splice iframes + page script ◄── render fragments
//! ```
//!
//! Only the byte ranges of handled tags change; the rest of the page is
//! copied through untouched.

use super::fragment::{FragmentRenderer, RenderedFragment, SpecSource, SpecUrl};
use super::options::{resolve_oauth2, resolve_options};
use super::reference::resolve_reference;
use super::script::{FRAME_CLASS, page_script};
use super::tag::{TagOccurrence, scan_tags};
use crate::config::SiteConfig;
use crate::log;
use crate::site::{PageContext, SiteFiles};
use crate::utils::url::normalize_path;
use crate::utils::xml::{create_xml_writer, into_string, write_elem_with_end, write_inline_script};
use anyhow::Result;
use std::ops::Range;

/// Inline handler revealing a frame once its document loaded.
const FRAME_ONLOAD: &str =
    "this.style.display = 'block'; this.style.overflow = 'hidden'; this.style.width = '100%';";

/// Everything one page needs to be transformed.
pub struct PageTransformer<'a> {
    pub config: &'a SiteConfig,
    pub files: &'a SiteFiles,
    pub renderer: &'a FragmentRenderer,
}

impl PageTransformer<'_> {
    /// Transform one rendered page.
    ///
    /// Returns `html` unchanged when the page is filtered out, has no tags, or
    /// cannot be scanned. Only fragment write failures are errors.
    pub fn transform(&self, html: &str, page: &PageContext) -> Result<String> {
        if !self.is_selected(page) {
            return Ok(html.to_owned());
        }

        let scanned = match scan_tags(html) {
            Ok(scanned) => scanned,
            Err(e) => {
                log!("warn"; "Skip '{}': {e}", page.src_path);
                return Ok(html.to_owned());
            }
        };
        if scanned.tags.is_empty() {
            return Ok(html.to_owned());
        }

        log!("swagger"; "Processing file '{}'", page.src_path);

        let (grouped, standalone): (Vec<&TagOccurrence>, Vec<&TagOccurrence>) =
            scanned.tags.iter().partition(|tag| tag.is_grouped());

        let mut edits: Vec<(Range<usize>, String)> = Vec::with_capacity(scanned.tags.len() + 1);

        for tag in standalone {
            let url = resolve_reference(page, self.files, tag.src());
            let fragment = self.render(&SpecSource::Single(url), tag, page)?;
            edits.push((tag.span.clone(), iframe_html(&fragment)?));
        }

        if let Some((first, rest)) = grouped.split_first() {
            let urls = grouped
                .iter()
                .map(|tag| SpecUrl {
                    url: resolve_reference(page, self.files, tag.src()),
                    name: tag.display_name().to_owned(),
                })
                .collect();
            // options and OAuth2 settings come from the first grouped tag only
            let fragment = self.render(&SpecSource::Grouped(urls), first, page)?;
            edits.push((first.span.clone(), iframe_html(&fragment)?));
            edits.extend(rest.iter().map(|tag| (tag.span.clone(), String::new())));
        }

        let script_at = scanned.body_end.unwrap_or(html.len());
        edits.push((script_at..script_at, script_html(self.config)?));

        Ok(splice(html, edits))
    }

    /// Whether `filter_files` lets this page through.
    fn is_selected(&self, page: &PageContext) -> bool {
        let filter = &self.config.swagger_ui.filter_files;
        if filter.is_empty() {
            return true;
        }
        let current = normalize_path(&page.src_path);
        filter.iter().any(|f| normalize_path(f) == current)
    }

    fn render(
        &self,
        spec: &SpecSource,
        tag: &TagOccurrence,
        page: &PageContext,
    ) -> Result<RenderedFragment> {
        let ui = &self.config.swagger_ui;
        self.renderer
            .render(spec, resolve_options(ui, tag), &resolve_oauth2(tag), page, ui)
    }
}

/// The iframe standing in for a tag.
fn iframe_html(fragment: &RenderedFragment) -> Result<String> {
    let mut writer = create_xml_writer();
    write_elem_with_end(
        &mut writer,
        "iframe",
        &[
            ("id", fragment.id.as_str()),
            ("src", fragment.file_name.as_str()),
            ("frameborder", "0"),
            ("style", "display:none;"),
            ("width", "100%"),
            ("class", FRAME_CLASS),
            ("onload", FRAME_ONLOAD),
        ],
    )?;
    into_string(writer)
}

fn script_html(config: &SiteConfig) -> Result<String> {
    let mut writer = create_xml_writer();
    write_inline_script(&mut writer, &page_script(config))?;
    into_string(writer)
}

/// Apply non-overlapping edits to `html`. Insertions have an empty range.
fn splice(html: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);

    let added: usize = edits.iter().map(|(_, s)| s.len()).sum();
    let mut out = String::with_capacity(html.len() + added);
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&html[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&html[cursor..]);
    out
}
