//! HTML reading and writing helpers on top of `quick-xml`.
//!
//! Rendered pages are HTML, not XML, so the reader runs with every
//! well-formedness check disabled and attributes are read in HTML mode
//! (unquoted values, valueless flags like `grouped`).

use anyhow::Result;
use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

#[inline]
pub fn create_xml_writer() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

/// Consume a writer and return what was written.
pub fn into_string(writer: XmlWriter) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Case-insensitive element name check.
#[inline]
pub fn is_named(name: &[u8], expected: &str) -> bool {
    name.eq_ignore_ascii_case(expected.as_bytes())
}

/// Collect the attributes of an element with lower-cased keys and unescaped values.
///
/// Valueless attributes map to an empty string. Values with unknown entities are
/// kept as written.
pub fn collect_attrs(elem: &BytesStart<'_>) -> Vec<(String, String)> {
    elem.html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let raw = String::from_utf8_lossy(attr.value.as_ref());
            let value = unescape(&raw).map_or_else(|_| raw.to_string(), |v| v.into_owned());
            (key, value)
        })
        .collect()
}

/// Write `<tag attr1="val1" ...></tag>`.
pub fn write_elem_with_end(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write an inline `<script>` element. The code is written verbatim.
pub fn write_inline_script(writer: &mut XmlWriter, code: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("script")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(code)))?;
    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}
