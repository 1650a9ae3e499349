//! Rendering of the embedded Swagger UI document served in an iframe.
//!
//! # Content-addressed names
//!
//! ```text
//! render(id = "{{ID_PLACEHOLDER}}") ──► blake3 ──► id = first 8 hex chars
//!                                                      │
//!             swagger-<id>.html  ◄── replace placeholder with id
//! ```
//!
//! Identical inputs give an identical document, id and file name, so a
//! re-render overwrites the same file with the same bytes.

use super::options::{OAuth2Properties, ResolvedOptions};
use crate::config::SwaggerUiConfig;
use crate::site::PageContext;
use crate::utils::url::{UrlParts, get_relative_url};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};
use std::fs;
use std::path::PathBuf;
use tera::Tera;

const TEMPLATE_NAME: &str = "swagger.html";
const TEMPLATE: &str = include_str!("../../templates/swagger.html");

/// Stands in for the fragment id until the document is hashed.
pub const ID_PLACEHOLDER: &str = "{{ID_PLACEHOLDER}}";

/// File name prefix of every fragment.
pub const FRAGMENT_PREFIX: &str = "swagger-";

/// Hex characters of the digest used as id.
const ID_LEN: usize = 8;

/// Site paths of the copied asset bundle.
pub const CSS_DIR: &str = "assets/stylesheets/";
pub const JS_DIR: &str = "assets/javascripts/";
pub const OAUTH2_REDIRECT: &str = "assets/swagger-ui/oauth2-redirect.html";

// ============================================================================
// Spec sources
// ============================================================================

/// One entry of a grouped viewer's spec selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecUrl {
    pub url: String,
    pub name: String,
}

/// What a viewer displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SpecSource {
    /// A standalone tag.
    Single(String),
    /// All grouped tags of a page, in document order.
    Grouped(Vec<SpecUrl>),
}

impl SpecSource {
    pub const fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }
}

// ============================================================================
// RenderedFragment
// ============================================================================

/// A rendered viewer document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    pub id: String,
    pub file_name: String,
    pub content: String,
}

impl RenderedFragment {
    /// Derive the id from a document rendered with [`ID_PLACEHOLDER`].
    pub fn from_template_output(output: &str) -> Self {
        let id = blake3::hash(output.as_bytes()).to_hex()[..ID_LEN].to_string();
        Self {
            file_name: format!("{FRAGMENT_PREFIX}{id}.html"),
            content: output.replace(ID_PLACEHOLDER, &id),
            id,
        }
    }

    /// Write the document into `page.output_dir`, creating it when missing.
    pub fn write(&self, page: &PageContext) -> Result<PathBuf> {
        fs::create_dir_all(&page.output_dir).with_context(|| {
            format!("failed to create `{}`", page.output_dir.display())
        })?;
        let path = page.output_dir.join(&self.file_name);
        fs::write(&path, &self.content)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        Ok(path)
    }
}

// ============================================================================
// FragmentRenderer
// ============================================================================

/// Renders viewer documents from the built-in template.
pub struct FragmentRenderer {
    tera: Tera,
}

impl FragmentRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .context("failed to parse the Swagger UI template")?;
        Ok(Self { tera })
    }

    /// Render a viewer for `spec` and write it next to the page.
    pub fn render(
        &self,
        spec: &SpecSource,
        options: ResolvedOptions,
        oauth2: &OAuth2Properties,
        page: &PageContext,
        config: &SwaggerUiConfig,
    ) -> Result<RenderedFragment> {
        let output = self.render_template(spec, options, oauth2, page, config)?;
        let fragment = RenderedFragment::from_template_output(&output);
        fragment.write(page)?;
        Ok(fragment)
    }

    /// Render the template with [`ID_PLACEHOLDER`] as id.
    fn render_template(
        &self,
        spec: &SpecSource,
        mut options: ResolvedOptions,
        oauth2: &OAuth2Properties,
        page: &PageContext,
        config: &SwaggerUiConfig,
    ) -> Result<String> {
        let oauth2_redirect_url = match options.shift_remove("oauth2RedirectUrl") {
            Some(Value::String(url)) if !url.is_empty() => url,
            _ => get_relative_url(OAUTH2_REDIRECT, &page.url),
        };

        let extra_css_files: Vec<String> = config
            .extra_css
            .iter()
            .map(|css| relative_to_page(css, &page.url))
            .collect();

        let mut context = tera::Context::new();
        context.insert("css_dir", &get_relative_url(CSS_DIR, &page.url));
        context.insert("js_dir", &get_relative_url(JS_DIR, &page.url));
        context.insert("extra_css_files", &extra_css_files);
        context.insert("background", &config.background);
        context.insert("id", ID_PLACEHOLDER);
        context.insert("grouped", &spec.is_grouped());
        context.insert("openapi_spec_url", spec);
        context.insert("oauth2_redirect_url", &oauth2_redirect_url);
        context.insert("options_str", &options_body(&options)?);
        context.insert("oauth2_prop_str", &serde_json::to_string(oauth2)?);

        self.tera
            .render(TEMPLATE_NAME, &context)
            .context("failed to render the Swagger UI template")
    }
}

/// Pretty JSON of `options` without the enclosing braces, for inlining into an object literal.
fn options_body(options: &ResolvedOptions) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    options.serialize(&mut ser)?;
    let json = String::from_utf8(buf)?;
    Ok(json[1..json.len() - 1].to_owned())
}

/// Site-relative paths become page-relative, URLs and absolute paths stay as written.
fn relative_to_page(path: &str, page_url: &str) -> String {
    let parts = UrlParts::split(path);
    if !parts.scheme.is_empty() || !parts.netloc.is_empty() || path.starts_with('/') {
        path.to_owned()
    } else {
        get_relative_url(path, page_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn page(site: &Path) -> PageContext {
        PageContext::new("guide/index.md", "guide/", site)
    }

    fn options(value: Value) -> ResolvedOptions {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_options_body() {
        let body = options_body(&options(json!({"docExpansion": "list", "filter": false}))).unwrap();
        assert_eq!(body, "\n    \"docExpansion\": \"list\",\n    \"filter\": false\n");

        assert_eq!(options_body(&ResolvedOptions::new()).unwrap(), "");
    }

    #[test]
    fn test_relative_to_page() {
        assert_eq!(relative_to_page("css/extra.css", "guide/"), "../css/extra.css");
        assert_eq!(relative_to_page("https://cdn.io/a.css", "guide/"), "https://cdn.io/a.css");
        assert_eq!(relative_to_page("/static/a.css", "guide/"), "/static/a.css");
    }

    #[test]
    fn test_fragment_id_from_content() {
        let fragment = RenderedFragment::from_template_output("<p>{{ID_PLACEHOLDER}}</p>");

        assert_eq!(fragment.id.len(), 8);
        assert!(fragment.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fragment.file_name, format!("swagger-{}.html", fragment.id));
        assert_eq!(fragment.content, format!("<p>{}</p>", fragment.id));

        let other = RenderedFragment::from_template_output("<p>other {{ID_PLACEHOLDER}}</p>");
        assert_ne!(fragment.id, other.id);
    }

    #[test]
    fn test_render_single() {
        let dir = TempDir::new().unwrap();
        let page = page(&dir.path().join("site"));
        let renderer = FragmentRenderer::new().unwrap();
        let config = SwaggerUiConfig::default();

        let fragment = renderer
            .render(
                &SpecSource::Single("../api/openapi.json".into()),
                options(json!({"docExpansion": "none"})),
                &OAuth2Properties::new(),
                &page,
                &config,
            )
            .unwrap();

        let path = page.output_dir.join(&fragment.file_name);
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, fragment.content);
        assert!(written.contains(r#"url: "../api/openapi.json","#));
        assert!(written.contains(r#""docExpansion": "none""#));
        assert!(written.contains(&format!(r#"const frame_id = "{}";"#, fragment.id)));
        assert!(written.contains("oauth2-redirect.html"));
        assert!(written.contains("ui.initOAuth({});"));
        assert!(!written.contains(ID_PLACEHOLDER));
    }

    #[test]
    fn test_render_grouped() {
        let dir = TempDir::new().unwrap();
        let page = page(dir.path());
        let renderer = FragmentRenderer::new().unwrap();

        let spec = SpecSource::Grouped(vec![
            SpecUrl {
                url: "a.json".into(),
                name: "A".into(),
            },
            SpecUrl {
                url: "b.json".into(),
                name: "b.json".into(),
            },
        ]);
        let fragment = renderer
            .render(
                &spec,
                ResolvedOptions::new(),
                &OAuth2Properties::new(),
                &page,
                &SwaggerUiConfig::default(),
            )
            .unwrap();

        assert!(fragment.content.contains(
            r#"urls: [{"url":"a.json","name":"A"},{"url":"b.json","name":"b.json"}],"#
        ));
        assert!(fragment.content.contains(r#""StandaloneLayout""#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let page = page(dir.path());
        let renderer = FragmentRenderer::new().unwrap();
        let config = SwaggerUiConfig::default();
        let spec = SpecSource::Single("openapi.json".into());
        let opts = options(json!({"tryItOutEnabled": true}));

        let first = renderer
            .render(&spec, opts.clone(), &OAuth2Properties::new(), &page, &config)
            .unwrap();
        let second = renderer
            .render(&spec, opts, &OAuth2Properties::new(), &page, &config)
            .unwrap();

        assert_eq!(first, second);
        let entries = fs::read_dir(&page.output_dir).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_render_oauth2_redirect_and_props() {
        let dir = TempDir::new().unwrap();
        let page = page(dir.path());
        let renderer = FragmentRenderer::new().unwrap();

        let mut oauth2 = OAuth2Properties::new();
        oauth2.insert("clientId".into(), json!("abc"));
        let fragment = renderer
            .render(
                &SpecSource::Single("openapi.json".into()),
                options(json!({"oauth2RedirectUrl": "https://example.com/cb.html"})),
                &oauth2,
                &page,
                &SwaggerUiConfig::default(),
            )
            .unwrap();

        assert!(fragment
            .content
            .contains(r#"oauth2RedirectUrl: "https://example.com/cb.html","#));
        assert!(fragment.content.contains(r#"ui.initOAuth({"clientId":"abc"});"#));
        // popped from the inlined options
        assert_eq!(fragment.content.matches("oauth2RedirectUrl").count(), 1);
    }

    #[test]
    fn test_render_background_is_raw_css() {
        let dir = TempDir::new().unwrap();
        let page = page(dir.path());
        let config = SwaggerUiConfig {
            background: "url(/img/bg.png) #fafafa".into(),
            ..SwaggerUiConfig::default()
        };

        let fragment = FragmentRenderer::new()
            .unwrap()
            .render(
                &SpecSource::Single("openapi.json".into()),
                ResolvedOptions::new(),
                &OAuth2Properties::new(),
                &page,
                &config,
            )
            .unwrap();

        assert!(fragment.content.contains("background: url(/img/bg.png) #fafafa;"));
    }

    #[test]
    fn test_render_write_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("guide");
        fs::write(&blocker, "not a directory").unwrap();
        let page = PageContext::new("guide/index.md", "guide/", dir.path());

        let result = FragmentRenderer::new().unwrap().render(
            &SpecSource::Single("openapi.json".into()),
            ResolvedOptions::new(),
            &OAuth2Properties::new(),
            &page,
            &SwaggerUiConfig::default(),
        );
        assert!(result.is_err());
    }
}
