//! Discovery of `<swagger-ui>` tags in a rendered page.

use crate::utils::xml::{collect_attrs, create_xml_reader, is_named};
use anyhow::{Result, anyhow};
use quick_xml::events::Event;
use std::ops::Range;

/// Name of the embed tag.
pub const TAG_NAME: &str = "swagger-ui";

/// Elements whose content is text, not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// One `<swagger-ui>` element found in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// Byte range of the whole element, start tag through end tag.
    pub span: Range<usize>,
    /// Attributes with lower-cased keys, in document order.
    attrs: Vec<(String, String)>,
}

impl TagOccurrence {
    pub fn new(span: Range<usize>, attrs: Vec<(String, String)>) -> Self {
        Self { span, attrs }
    }

    /// Case-insensitive attribute lookup.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The `src` attribute, empty when missing.
    pub fn src(&self) -> &str {
        self.attr("src").unwrap_or_default()
    }

    /// Display name in a group, falling back to `src`.
    pub fn display_name(&self) -> &str {
        self.attr("name").unwrap_or_else(|| self.src())
    }

    pub fn is_grouped(&self) -> bool {
        self.attr("grouped").is_some()
    }
}

/// What a scan of a page found.
#[derive(Debug, Default)]
pub struct ScannedPage {
    /// Tags in document order.
    pub tags: Vec<TagOccurrence>,
    /// Byte offset of the `</body>` end tag.
    pub body_end: Option<usize>,
}

/// A tag whose end has not been reached yet.
struct OpenTag {
    start: usize,
    attrs: Vec<(String, String)>,
    depth: usize,
}

/// Find every `<swagger-ui>` element in `html`.
///
/// An element left open is closed by `</body>`, or by the end of the document.
/// Tags nested inside another tag belong to the outer one. The content of
/// `<script>` and `<style>` is skipped unparsed.
pub fn scan_tags(html: &str) -> Result<ScannedPage> {
    let bytes = html.as_bytes();
    // offset of `reader`'s input within `html`
    let mut base = 0;
    let mut reader = create_xml_reader(bytes);
    let mut page = ScannedPage::default();
    let mut open: Option<OpenTag> = None;

    loop {
        let start = base + reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            anyhow!(
                "HTML parse error at position {}: {e}",
                base + reader.error_position() as usize
            )
        })?;
        let end = base + reader.buffer_position() as usize;

        let raw_text = match &event {
            Event::Start(elem) => raw_text_element(elem.name().as_ref()),
            _ => None,
        };
        if let Some(name) = raw_text {
            // unterminated: the rest of the document is text
            let Some(close) = find_end_tag(bytes, end, name) else {
                break;
            };
            base = close;
            reader = create_xml_reader(&bytes[close..]);
            continue;
        }

        match event {
            Event::Start(elem) if is_named(elem.name().as_ref(), TAG_NAME) => match open.as_mut() {
                Some(tag) => tag.depth += 1,
                None => {
                    open = Some(OpenTag {
                        start,
                        attrs: collect_attrs(&elem),
                        depth: 1,
                    })
                }
            },
            Event::Empty(elem) if open.is_none() && is_named(elem.name().as_ref(), TAG_NAME) => {
                page.tags
                    .push(TagOccurrence::new(start..end, collect_attrs(&elem)));
            }
            Event::End(elem) if is_named(elem.name().as_ref(), TAG_NAME) => {
                if let Some(tag) = open.as_mut() {
                    tag.depth -= 1;
                }
                if let Some(tag) = open.take_if(|tag| tag.depth == 0) {
                    page.tags.push(TagOccurrence::new(tag.start..end, tag.attrs));
                }
            }
            Event::End(elem) if is_named(elem.name().as_ref(), "body") => {
                if let Some(tag) = open.take() {
                    page.tags.push(TagOccurrence::new(tag.start..start, tag.attrs));
                }
                page.body_end = Some(start);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(tag) = open {
        page.tags
            .push(TagOccurrence::new(tag.start..html.len(), tag.attrs));
    }

    Ok(page)
}

fn raw_text_element(name: &[u8]) -> Option<&'static str> {
    RAW_TEXT_ELEMENTS
        .iter()
        .copied()
        .find(|raw| is_named(name, raw))
}

/// Offset of the `</name` end tag at or after `from`, matched case-insensitively.
fn find_end_tag(bytes: &[u8], from: usize, name: &str) -> Option<usize> {
    let name = name.as_bytes();
    let mut pos = from;

    while let Some(found) = bytes[pos..].windows(2).position(|w| w == b"</") {
        let at = pos + found;
        let rest = &bytes[at + 2..];
        let name_matches = rest
            .get(..name.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
        let terminated = rest
            .get(name.len())
            .is_none_or(|&c| c == b'>' || c == b'/' || c.is_ascii_whitespace());
        if name_matches && terminated {
            return Some(at);
        }
        pos = at + 2;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_text<'a>(html: &'a str, tag: &TagOccurrence) -> &'a str {
        &html[tag.span.clone()]
    }

    #[test]
    fn test_no_tags() {
        let html = "<html><body><p>Hello</p></body></html>";
        let page = scan_tags(html).unwrap();
        assert!(page.tags.is_empty());
        assert_eq!(page.body_end, Some(html.find("</body>").unwrap()));
    }

    #[test]
    fn test_start_end_and_empty_tags() {
        let html = r#"<body><p>a</p><swagger-ui src="a.json"></swagger-ui><swagger-ui src="b.json"/></body>"#;
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 2);
        assert_eq!(
            span_text(html, &page.tags[0]),
            r#"<swagger-ui src="a.json"></swagger-ui>"#
        );
        assert_eq!(span_text(html, &page.tags[1]), r#"<swagger-ui src="b.json"/>"#);
        assert_eq!(page.tags[1].src(), "b.json");
    }

    #[test]
    fn test_tag_name_case_insensitive() {
        let html = r#"<body><Swagger-UI src="a.json"></SWAGGER-UI></body>"#;
        let page = scan_tags(html).unwrap();
        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].span, 6..html.find("</body>").unwrap());
    }

    #[test]
    fn test_unclosed_tag_is_closed_by_body() {
        let html = r#"<body><swagger-ui src="a.json"><p>x</p></body></html>"#;
        let page = scan_tags(html).unwrap();
        let body_end = html.find("</body>").unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].span, 6..body_end);
        assert_eq!(page.body_end, Some(body_end));
    }

    #[test]
    fn test_unclosed_tag_without_body() {
        let html = r#"<p>a</p><swagger-ui src="a.json">rest"#;
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].span, 8..html.len());
        assert!(page.body_end.is_none());
    }

    #[test]
    fn test_nested_tags_belong_to_outer() {
        let html = r#"<swagger-ui src="a.json"><swagger-ui src="b.json"></swagger-ui></swagger-ui>"#;
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].span, 0..html.len());
        assert_eq!(page.tags[0].src(), "a.json");
    }

    #[test]
    fn test_attribute_accessors() {
        let tag = TagOccurrence::new(
            0..0,
            vec![
                ("src".into(), "a.json".into()),
                ("grouped".into(), String::new()),
                ("docexpansion".into(), "none".into()),
            ],
        );

        assert!(tag.is_grouped());
        assert_eq!(tag.attr("docExpansion"), Some("none"));
        assert_eq!(tag.display_name(), "a.json");
        assert_eq!(tag.attr("name"), None);
    }

    #[test]
    fn test_missing_src_is_empty() {
        let tag = TagOccurrence::new(0..0, vec![("name".into(), "Pets".into())]);
        assert_eq!(tag.src(), "");
        assert_eq!(tag.display_name(), "Pets");
        assert!(!tag.is_grouped());
    }

    #[test]
    fn test_script_quote_does_not_break_scan() {
        let html = concat!(
            "<body><script>if (a<b && /'/.test(s)) {}</script>\n",
            r#"<swagger-ui src="x.json"></swagger-ui></body>"#
        );
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(
            span_text(html, &page.tags[0]),
            r#"<swagger-ui src="x.json"></swagger-ui>"#
        );
        assert_eq!(page.body_end, Some(html.find("</body>").unwrap()));
    }

    #[test]
    fn test_script_markup_declaration_is_text() {
        let html = r#"<body><script>for(;i<!done;){}</script><swagger-ui src="b.json"></swagger-ui></body>"#;
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].src(), "b.json");
    }

    #[test]
    fn test_tag_inside_script_or_style_is_ignored() {
        let html = concat!(
            "<body>",
            r#"<SCRIPT type="module">var tpl = "<swagger-ui src='a.json'></swagger-ui>";</Script >"#,
            r#"<style>p::after { content: "<swagger-ui src='c.json'/>" }</style>"#,
            r#"<swagger-ui src="b.json"/>"#,
            "</body>"
        );
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].src(), "b.json");
    }

    #[test]
    fn test_unterminated_script_ends_scan() {
        let html = r#"<body><swagger-ui src="a.json"/><script>x = "<swagger-ui src='b.json'/>""#;
        let page = scan_tags(html).unwrap();

        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].src(), "a.json");
        assert!(page.body_end.is_none());
    }

    #[test]
    fn test_find_end_tag() {
        let html = b"<script>a</scripts></SCRIPT\n>";
        assert_eq!(find_end_tag(html, 8, "script"), Some(19));
        assert_eq!(find_end_tag(html, 20, "script"), None);
        assert_eq!(find_end_tag(b"</style", 0, "style"), Some(0));
    }
}
