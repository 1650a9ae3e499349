//! Shared helpers for paths, URLs and HTML.

pub mod url;
pub mod xml;
