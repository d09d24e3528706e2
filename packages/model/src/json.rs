//! # JSON Tree Shape
//!
//! Nested form of the document used at the boundary with the host:
//!
//! ```json
//! { "object": "block", "type": "paragraph", "nodes": [
//!     { "object": "text", "text": "hello ", "marks": [] },
//!     { "object": "inline", "type": "link", "data": { "href": "https://x.io" },
//!       "nodes": [{ "object": "text", "text": "world", "marks": [{ "type": "bold" }] }] }
//! ] }
//! ```
//!
//! Selections are stored as text paths rather than keys because keys are
//! reissued every time a document is loaded.

use crate::document::Document;
use crate::error::ModelError;
use crate::node::{BlockType, InlineType, MarkSet, MarkType, NodeKey, NodeKind};
use crate::selection::{Point, Selection};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
pub enum NodeJson {
    Block {
        #[serde(rename = "type")]
        block_type: BlockType,
        #[serde(default)]
        nodes: Vec<NodeJson>,
    },
    Inline {
        #[serde(rename = "type")]
        inline_type: InlineType,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        data: BTreeMap<String, String>,
        #[serde(default)]
        nodes: Vec<NodeJson>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<MarkJson>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkJson {
    #[serde(rename = "type")]
    pub mark_type: MarkType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentJson {
    #[serde(default = "document_tag")]
    pub object: String,
    pub nodes: Vec<NodeJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointJson {
    pub path: Vec<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionJson {
    pub anchor: PointJson,
    pub focus: PointJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<MarkJson>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueJson {
    #[serde(default = "value_tag")]
    pub object: String,
    pub document: DocumentJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionJson>,
}

fn document_tag() -> String {
    "document".to_string()
}

fn value_tag() -> String {
    "value".to_string()
}

fn marks_from_json(marks: &[MarkJson]) -> MarkSet {
    marks.iter().map(|m| m.mark_type).collect()
}

fn marks_to_json(marks: &MarkSet) -> Vec<MarkJson> {
    marks.iter().map(|m| MarkJson { mark_type: *m }).collect()
}

impl Document {
    /// Build a document from top-level JSON nodes
    pub fn from_json_nodes(nodes: &[NodeJson]) -> Result<Self, ModelError> {
        let mut doc = Document::new();
        for node in nodes {
            let key = doc.build(node);
            doc.push_root(key)?;
        }
        Ok(doc)
    }

    fn build(&mut self, node: &NodeJson) -> NodeKey {
        match node {
            NodeJson::Block { block_type, nodes } => {
                let children = nodes.iter().map(|n| self.build(n)).collect();
                self.create_block(*block_type, children)
            }
            NodeJson::Inline {
                inline_type,
                data,
                nodes,
            } => {
                let children = nodes.iter().map(|n| self.build(n)).collect();
                self.create_inline(*inline_type, data.clone(), children)
            }
            NodeJson::Text { text, marks } => self.create_text(text.clone(), marks_from_json(marks)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let parsed: DocumentJson = serde_json::from_str(json)?;
        Self::from_json_nodes(&parsed.nodes)
    }

    pub fn to_json_nodes(&self) -> Vec<NodeJson> {
        self.roots().iter().filter_map(|k| self.node_to_json(*k)).collect()
    }

    pub fn node_to_json(&self, key: NodeKey) -> Option<NodeJson> {
        let node = self.get(key)?;
        let nodes = || {
            node.children()
                .iter()
                .filter_map(|c| self.node_to_json(*c))
                .collect()
        };
        Some(match &node.kind {
            NodeKind::Block { block_type, .. } => NodeJson::Block {
                block_type: *block_type,
                nodes: nodes(),
            },
            NodeKind::Inline {
                inline_type, data, ..
            } => NodeJson::Inline {
                inline_type: *inline_type,
                data: data.clone(),
                nodes: nodes(),
            },
            NodeKind::Text { text, marks } => NodeJson::Text {
                text: text.clone(),
                marks: marks_to_json(marks),
            },
        })
    }

    pub fn to_document_json(&self) -> DocumentJson {
        DocumentJson {
            object: document_tag(),
            nodes: self.to_json_nodes(),
        }
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&self.to_document_json())?)
    }
}

impl Value {
    pub fn from_value_json(json: &ValueJson) -> Result<Self, ModelError> {
        let document = Document::from_json_nodes(&json.document.nodes)?;
        match &json.selection {
            Some(sel) => {
                let anchor = document.resolve_point(&sel.anchor)?;
                let focus = document.resolve_point(&sel.focus)?;
                let selection = Selection::new(anchor, focus)
                    .with_marks(sel.marks.as_deref().map(marks_from_json));
                Ok(Value::new(document, selection))
            }
            None => Value::from_document(document),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let parsed: ValueJson = serde_json::from_str(json)?;
        Self::from_value_json(&parsed)
    }

    pub fn to_value_json(&self) -> Result<ValueJson, ModelError> {
        let doc = &self.document;
        let selection = SelectionJson {
            anchor: doc.point_to_json(&self.selection.anchor)?,
            focus: doc.point_to_json(&self.selection.focus)?,
            marks: self.selection.marks.as_ref().map(marks_to_json),
        };
        Ok(ValueJson {
            object: value_tag(),
            document: doc.to_document_json(),
            selection: Some(selection),
        })
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&self.to_value_json()?)?)
    }
}

impl Document {
    /// Resolve a path-addressed point to a text key, checking the offset
    pub fn resolve_point(&self, point: &PointJson) -> Result<Point, ModelError> {
        let key = self.key_at_path(&point.path)?;
        let len = self.text_len(key)?;
        if point.offset > len {
            return Err(ModelError::OffsetOutOfBounds {
                key,
                offset: point.offset,
                len,
            });
        }
        Ok(Point::new(key, point.offset))
    }

    pub fn point_to_json(&self, point: &Point) -> Result<PointJson, ModelError> {
        let path = self.path_of(point.key).ok_or(ModelError::NodeNotFound(point.key))?;
        Ok(PointJson {
            path,
            offset: point.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "object": "document",
        "nodes": [
            {
                "object": "block",
                "type": "paragraph",
                "nodes": [
                    { "object": "text", "text": "In addition to block nodes, you can create inline nodes, like " },
                    {
                        "object": "inline",
                        "type": "link",
                        "data": { "href": "https://en.wikipedia.org/wiki/Hypertext" },
                        "nodes": [{ "object": "text", "text": "hyperlinks" }]
                    },
                    { "object": "text", "text": "!", "marks": [{ "type": "bold" }] }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_document_json() {
        let doc = Document::from_json(SAMPLE).unwrap();

        assert_eq!(doc.roots().len(), 1);
        let texts = doc.texts();
        assert_eq!(texts.len(), 3);

        let link = doc.parent_node(texts[1]).unwrap();
        assert_eq!(link.inline_type(), Some(InlineType::Link));
        assert_eq!(link.data("href"), Some("https://en.wikipedia.org/wiki/Hypertext"));

        let bang = doc.node(texts[2]).unwrap();
        assert!(bang.marks().unwrap().contains(&MarkType::Bold));
    }

    #[test]
    fn test_document_json_round_trip() {
        let doc = Document::from_json(SAMPLE).unwrap();
        let json = doc.to_json().unwrap();
        let reloaded = Document::from_json(&json).unwrap();

        assert_eq!(doc.to_json_nodes(), reloaded.to_json_nodes());
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let json = r#"{ "nodes": [{ "object": "block", "type": "image", "nodes": [] }] }"#;
        assert!(matches!(Document::from_json(json), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_value_selection_uses_paths() {
        let json = r#"{
            "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "hello world" }] }
            ] },
            "selection": { "anchor": { "path": [0, 0], "offset": 6 }, "focus": { "path": [0, 0], "offset": 11 } }
        }"#;

        let value = Value::from_json(json).unwrap();
        assert_eq!(value.selection.anchor.offset, 6);
        assert_eq!(value.selection.focus.offset, 11);

        let out = value.to_value_json().unwrap();
        let sel = out.selection.unwrap();
        assert_eq!(sel.anchor.path, vec![0, 0]);
        assert_eq!(sel.focus.offset, 11);
    }

    #[test]
    fn test_selection_offset_out_of_bounds() {
        let json = r#"{
            "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "hi" }] }
            ] },
            "selection": { "anchor": { "path": [0, 0], "offset": 9 }, "focus": { "path": [0, 0], "offset": 9 } }
        }"#;

        assert!(matches!(
            Value::from_json(json),
            Err(ModelError::OffsetOutOfBounds { .. })
        ));
    }
}
