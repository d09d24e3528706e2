//! # Prose Render
//!
//! Pure projection from the document tree to a presentational tree, and
//! HTML emission for that tree. Nothing here mutates the document.

pub mod html;
pub mod projection;
pub mod vdom;

pub use html::{node_to_html, to_html, HtmlOptions};
pub use projection::{Next, RenderHooks, RenderProps, Renderer, StandardHooks};
pub use vdom::{RenderedDocument, VNode};

use prose_model::Document;

/// Render a document with the standard hooks and emit HTML
pub fn render_html(doc: &Document, options: &HtmlOptions) -> String {
    to_html(&Renderer::new().render_document(doc), options)
}
