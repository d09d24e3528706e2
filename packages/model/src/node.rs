use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a node within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(pub u32);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Block type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Paragraph,
        BlockType::HeadingOne,
        BlockType::HeadingTwo,
        BlockType::BlockQuote,
        BlockType::BulletedList,
        BlockType::NumberedList,
        BlockType::ListItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::HeadingOne => "heading-one",
            BlockType::HeadingTwo => "heading-two",
            BlockType::BlockQuote => "block-quote",
            BlockType::BulletedList => "bulleted-list",
            BlockType::NumberedList => "numbered-list",
            BlockType::ListItem => "list-item",
        }
    }

    /// List containers hold list items rather than inline content
    pub fn is_list(&self) -> bool {
        matches!(self, BlockType::BulletedList | BlockType::NumberedList)
    }

    /// Leaf blocks hold text and inlines
    pub fn is_leaf(&self) -> bool {
        !self.is_list()
    }

    /// The opposite list container, for list targets only
    pub fn other_list(&self) -> Option<BlockType> {
        match self {
            BlockType::BulletedList => Some(BlockType::NumberedList),
            BlockType::NumberedList => Some(BlockType::BulletedList),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownType(s.to_string()))
    }
}

/// Inline type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineType {
    Link,
}

impl InlineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineType::Link => "link",
        }
    }
}

impl fmt::Display for InlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character-level formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkType {
    Bold,
    Italic,
    Code,
}

impl MarkType {
    pub const ALL: [MarkType; 3] = [MarkType::Bold, MarkType::Italic, MarkType::Code];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkType::Bold => "bold",
            MarkType::Italic => "italic",
            MarkType::Code => "code",
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ModelError::UnknownType(s.to_string()))
    }
}

pub type MarkSet = BTreeSet<MarkType>;

/// Payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Block {
        block_type: BlockType,
        children: Vec<NodeKey>,
    },
    Inline {
        inline_type: InlineType,
        data: BTreeMap<String, String>,
        children: Vec<NodeKey>,
    },
    Text {
        text: String,
        marks: MarkSet,
    },
}

/// A node stored in the document arena
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub key: NodeKey,
    pub kind: NodeKind,
}

impl Node {
    pub fn children(&self) -> &[NodeKey] {
        match &self.kind {
            NodeKind::Block { children, .. } | NodeKind::Inline { children, .. } => children,
            NodeKind::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<NodeKey>> {
        match &mut self.kind {
            NodeKind::Block { children, .. } | NodeKind::Inline { children, .. } => {
                Some(children)
            }
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block { .. })
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.kind, NodeKind::Inline { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    pub fn block_type(&self) -> Option<BlockType> {
        match &self.kind {
            NodeKind::Block { block_type, .. } => Some(*block_type),
            _ => None,
        }
    }

    pub fn inline_type(&self) -> Option<InlineType> {
        match &self.kind {
            NodeKind::Inline { inline_type, .. } => Some(*inline_type),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn marks(&self) -> Option<&MarkSet> {
        match &self.kind {
            NodeKind::Text { marks, .. } => Some(marks),
            _ => None,
        }
    }

    /// Auxiliary inline data (e.g. `href`)
    pub fn data(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Inline { data, .. } => data.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Length of a text node in chars, zero for containers
    pub fn text_len(&self) -> usize {
        self.text().map(|t| t.chars().count()).unwrap_or(0)
    }

    /// Same kind with no children, used when splitting or wrapping
    pub(crate) fn empty_shell(&self) -> NodeKind {
        match &self.kind {
            NodeKind::Block { block_type, .. } => NodeKind::Block {
                block_type: *block_type,
                children: Vec::new(),
            },
            NodeKind::Inline {
                inline_type, data, ..
            } => NodeKind::Inline {
                inline_type: *inline_type,
                data: data.clone(),
                children: Vec::new(),
            },
            NodeKind::Text { marks, .. } => NodeKind::Text {
                text: String::new(),
                marks: marks.clone(),
            },
        }
    }
}

/// Convert a char offset into a byte index, clamped to the string end
pub fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
