//! Swagger UI embedding for rendered documentation pages.
//!
//! - **tag**: Find `<swagger-ui>` elements and their attributes
//! - **reference**: Resolve a tag's `src` into a page-relative URL
//! - **options**: Merge global options with per-tag overrides
//! - **fragment**: Render the standalone viewer document
//! - **script**: Page-level resize, scroll and dark mode script
//! - **transform**: Replace tags with iframes
//! - **assets**: Copy the viewer bundle into the site
//!
//! # Page Flow
//!
//! ```text
//! scan_tags() ──► resolve_reference() ──► FragmentRenderer::render()
//!      │          resolve_options()               │
//!      ▼                                          ▼
//!  tag spans ───────────► splice ◄──────── swagger-<id>.html
//! ```

pub mod assets;
pub mod fragment;
pub mod options;
pub mod reference;
pub mod script;
pub mod tag;
pub mod transform;

pub use assets::publish_assets;
pub use fragment::FragmentRenderer;
pub use transform::PageTransformer;
