//! # Prose Model
//!
//! The in-memory rich-text document: an arena of block, inline and text
//! nodes with a parent table for ancestor queries, plus the selection and
//! value snapshot types the editor operates on.
//!
//! ```text
//! Value ─┬─ Document ── Block* ──┬─ Block*        (list containers)
//!        │                       ├─ Inline* ── Text*
//!        │                       └─ Text*
//!        └─ Selection (anchor, focus, pending marks)
//! ```

mod document;
mod error;
mod json;
mod key_generator;
mod node;
mod selection;
mod value;

pub use document::Document;
pub use error::ModelError;
pub use json::{DocumentJson, MarkJson, NodeJson, PointJson, SelectionJson, ValueJson};
pub use key_generator::KeyGenerator;
pub use node::{byte_index, BlockType, InlineType, MarkSet, MarkType, Node, NodeKey, NodeKind};
pub use selection::{Point, Range, Selection};
pub use value::Value;
