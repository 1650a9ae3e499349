//! URL and `/`-separated path helpers.
//!
//! Site paths are always handled as slash-separated strings, independent of
//! the host platform, so that source paths and URLs compare consistently.

/// The components of a URL: `scheme://netloc/path?query#fragment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Split a URL into its components.
    ///
    /// # Examples
    ///
    /// | Input | scheme | netloc | path | query | fragment |
    /// |-------|--------|--------|------|-------|----------|
    /// | `https://x.io/a.json` | `https` | `x.io` | `/a.json` | | |
    /// | `../api.yaml?v=1#top` | | | `../api.yaml` | `v=1` | `top` |
    /// | `//cdn.io/a.json` | | `cdn.io` | `/a.json` | | |
    pub fn split(url: &'a str) -> Self {
        let (rest, fragment) = url.split_once('#').unwrap_or((url, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let (scheme, rest) = match rest.find(':') {
            Some(pos) if is_scheme(&rest[..pos]) => (&rest[..pos], &rest[pos + 1..]),
            _ => ("", rest),
        };

        let (netloc, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (&after[..end], &after[end..])
            }
            None => ("", rest),
        };

        Self {
            scheme,
            netloc,
            path,
            query,
            fragment,
        }
    }

    /// Join the components back into a URL, replacing the path.
    pub fn with_path(&self, path: &str) -> String {
        let mut url = String::new();
        if !self.scheme.is_empty() {
            url.push_str(self.scheme);
            url.push(':');
        }
        if !self.netloc.is_empty() {
            url.push_str("//");
            url.push_str(self.netloc);
        }
        url.push_str(path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(self.query);
        }
        if !self.fragment.is_empty() {
            url.push('#');
            url.push_str(self.fragment);
        }
        url
    }
}

/// A scheme starts with a letter and continues with letters, digits, `+`, `-` or `.`.
#[inline]
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Directory part of a slash-separated path (`""` when there is none).
pub fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Normalize a slash-separated path, collapsing `.`, `..` and repeated slashes.
///
/// Leading `..` of a relative path are kept, `..` above an absolute root are dropped.
///
/// | Input | Output |
/// |-------|--------|
/// | `docs/guide/../api/./a.json` | `docs/api/a.json` |
/// | `docs/../../a.json` | `../a.json` |
/// | `/../a.json` | `/a.json` |
/// | `` | `.` |
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".into(),
        (false, false) => joined,
    }
}

/// Split a URL path into normalized components, ignoring any leading slash.
fn norm_parts(path: &str) -> Vec<String> {
    let normalized = normalize_path(&format!("/{path}"));
    normalized
        .trim_start_matches('/')
        .split('/')
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Return `url` relative to the page at `other`.
///
/// The last component of `other` is dropped when it contains a dot (it is a
/// file rather than a directory). A trailing slash on `url` is preserved.
///
/// | url | other | result |
/// |-----|-------|--------|
/// | `assets/stylesheets/` | `guide/` | `../assets/stylesheets/` |
/// | `api/openapi.json` | `docs/guide/` | `../../api/openapi.json` |
/// | `assets/x.css` | `` | `assets/x.css` |
/// | `foo/` | `foo/` | `./` |
pub fn get_relative_url(url: &str, other: &str) -> String {
    let other = match other.rsplit_once('/') {
        Some((dir, base)) if base.contains('.') => dir,
        None if other.contains('.') => "",
        _ => other,
    };

    let other_parts = norm_parts(other);
    let dest_parts = norm_parts(url);

    let common = other_parts
        .iter()
        .zip(&dest_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel_parts: Vec<&str> = vec![".."; other_parts.len() - common];
    rel_parts.extend(dest_parts[common..].iter().map(String::as_str));

    let rel = if rel_parts.is_empty() {
        ".".to_string()
    } else {
        rel_parts.join("/")
    };

    if url.ends_with('/') {
        format!("{rel}/")
    } else {
        rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_relative_with_query_and_fragment() {
        let parts = UrlParts::split("../api/openapi.json?v=2#/pets");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "../api/openapi.json");
        assert_eq!(parts.query, "v=2");
        assert_eq!(parts.fragment, "/pets");
    }

    #[test]
    fn test_split_absolute_url() {
        let parts = UrlParts::split("https://petstore.swagger.io/v2/swagger.json");
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.netloc, "petstore.swagger.io");
        assert_eq!(parts.path, "/v2/swagger.json");
    }

    #[test]
    fn test_split_protocol_relative_and_mailto() {
        let parts = UrlParts::split("//cdn.example.com/a.yaml");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "cdn.example.com");
        assert_eq!(parts.path, "/a.yaml");

        let parts = UrlParts::split("mailto:someone@example.com");
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.path, "someone@example.com");
    }

    #[test]
    fn test_split_colon_in_path_is_not_a_scheme() {
        let parts = UrlParts::split("./v1:beta.json");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.path, "./v1:beta.json");
    }

    #[test]
    fn test_with_path_keeps_query_and_fragment() {
        let parts = UrlParts::split("openapi.json?v=2#/pets");
        assert_eq!(parts.with_path("../openapi.json"), "../openapi.json?v=2#/pets");

        let parts = UrlParts::split("https://x.io/a.json");
        assert_eq!(parts.with_path("/b.json"), "https://x.io/b.json");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("guide/index.md"), "guide");
        assert_eq!(dirname("a/b/c.md"), "a/b");
        assert_eq!(dirname("index.md"), "");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("docs/guide/../api/./a.json"), "docs/api/a.json");
        assert_eq!(normalize_path("guide/../../api/openapi.json"), "../api/openapi.json");
        assert_eq!(normalize_path("/../a.json"), "/a.json");
        assert_eq!(normalize_path("a//b/"), "a/b");
        assert_eq!(normalize_path(""), ".");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn test_get_relative_url() {
        assert_eq!(get_relative_url("assets/stylesheets/", "guide/"), "../assets/stylesheets/");
        assert_eq!(get_relative_url("assets/stylesheets/", ""), "assets/stylesheets/");
        assert_eq!(get_relative_url("api/openapi.json", "docs/guide/"), "../../api/openapi.json");
        assert_eq!(get_relative_url("api/openapi.json", "api/"), "openapi.json");
        assert_eq!(get_relative_url("foo/", "foo/"), "./");
    }

    #[test]
    fn test_get_relative_url_from_file_page() {
        // `guide.html` is a file, so its directory is the site root
        assert_eq!(get_relative_url("api/openapi.json", "guide.html"), "api/openapi.json");
        assert_eq!(
            get_relative_url("assets/swagger-ui/oauth2-redirect.html", "guide/intro.html"),
            "../assets/swagger-ui/oauth2-redirect.html"
        );
    }
}
