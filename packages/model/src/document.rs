//! # Document Arena
//!
//! The document tree is stored as an arena of nodes keyed by [`NodeKey`].
//! Each container lists its children by key, and a parent table is kept
//! alongside so ancestor queries never need back-pointers inside nodes.
//!
//! ```text
//! roots ──► Block(bulleted-list) ──► Block(list-item) ──► Text("one")
//!                                └─► Block(list-item) ──► Text("two")
//! parents: { list-item#2 → list#1, text#3 → list-item#2, ... }
//! ```
//!
//! Every edit keeps `parents` and the children vectors in sync. Offsets
//! into text are measured in chars.

use crate::error::ModelError;
use crate::key_generator::KeyGenerator;
use crate::node::{byte_index, BlockType, InlineType, MarkSet, MarkType, Node, NodeKey, NodeKind};
use crate::selection::Point;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Rich-text document tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: HashMap<NodeKey, Node>,
    parents: HashMap<NodeKey, NodeKey>,
    roots: Vec<NodeKey>,
    keys: KeyGenerator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node. Children listed in `kind` must be
    /// detached nodes already in the arena.
    pub fn create(&mut self, kind: NodeKind) -> NodeKey {
        let key = self.keys.new_key();
        let node = Node { key, kind };
        for child in node.children() {
            self.parents.insert(*child, key);
        }
        self.nodes.insert(key, node);
        key
    }

    pub fn create_text(&mut self, text: impl Into<String>, marks: MarkSet) -> NodeKey {
        self.create(NodeKind::Text {
            text: text.into(),
            marks,
        })
    }

    pub fn create_block(&mut self, block_type: BlockType, children: Vec<NodeKey>) -> NodeKey {
        self.create(NodeKind::Block {
            block_type,
            children,
        })
    }

    pub fn create_inline(
        &mut self,
        inline_type: InlineType,
        data: BTreeMap<String, String>,
        children: Vec<NodeKey>,
    ) -> NodeKey {
        self.create(NodeKind::Inline {
            inline_type,
            data,
            children,
        })
    }

    /// Append a detached node to the top level
    pub fn push_root(&mut self, key: NodeKey) -> Result<(), ModelError> {
        let index = self.roots.len();
        self.insert_node(None, index, key)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node, ModelError> {
        self.nodes.get(&key).ok_or(ModelError::NodeNotFound(key))
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node, ModelError> {
        self.nodes.get_mut(&key).ok_or(ModelError::NodeNotFound(key))
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Children of `key`, empty for text or missing nodes
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(&key).map(Node::children).unwrap_or(&[])
    }

    /// Children of `parent`, or the top level when `parent` is `None`
    pub fn siblings(&self, parent: Option<NodeKey>) -> &[NodeKey] {
        match parent {
            Some(key) => self.children(key),
            None => &self.roots,
        }
    }

    fn siblings_mut(&mut self, parent: Option<NodeKey>) -> Result<&mut Vec<NodeKey>, ModelError> {
        match parent {
            None => Ok(&mut self.roots),
            Some(key) => self.node_mut(key)?.children_mut().ok_or_else(|| {
                ModelError::InvalidStructure(format!("text node {} cannot have children", key))
            }),
        }
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.parents.get(&key).copied()
    }

    pub fn parent_node(&self, key: NodeKey) -> Option<&Node> {
        self.parent(key).and_then(|p| self.get(p))
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut current = key;
        while let Some(parent) = self.parent(current) {
            out.push(parent);
            current = parent;
        }
        out
    }

    /// Walk strictly upward from `key` and return the first ancestor
    /// satisfying `predicate`
    pub fn nearest_ancestor_matching<F>(&self, key: NodeKey, predicate: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        let mut current = key;
        while let Some(parent) = self.parent(current) {
            let node = self.get(parent)?;
            if predicate(node) {
                return Some(node);
            }
            current = parent;
        }
        None
    }

    /// Nearest block that is `key` itself or one of its ancestors
    pub fn closest_block(&self, key: NodeKey) -> Option<NodeKey> {
        match self.get(key) {
            Some(node) if node.is_block() => Some(key),
            Some(_) => self.nearest_ancestor_matching(key, Node::is_block).map(|n| n.key),
            None => None,
        }
    }

    pub fn index_in_parent(&self, key: NodeKey) -> Option<usize> {
        self.siblings(self.parent(key)).iter().position(|k| *k == key)
    }

    /// All text nodes in document order
    pub fn texts(&self) -> Vec<NodeKey> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_texts(*root, &mut out);
        }
        out
    }

    /// Text nodes under `key` (inclusive) in document order
    pub fn texts_within(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        self.collect_texts(key, &mut out);
        out
    }

    fn collect_texts(&self, key: NodeKey, out: &mut Vec<NodeKey>) {
        if let Some(node) = self.get(key) {
            if node.is_text() {
                out.push(key);
            } else {
                for child in node.children() {
                    self.collect_texts(*child, out);
                }
            }
        }
    }

    pub fn first_text(&self) -> Option<NodeKey> {
        self.texts().first().copied()
    }

    /// Length in chars of a text node
    pub fn text_len(&self, key: NodeKey) -> Result<usize, ModelError> {
        let node = self.node(key)?;
        if !node.is_text() {
            return Err(ModelError::NotText(key));
        }
        Ok(node.text_len())
    }

    /// Order two points by the document position of their text nodes,
    /// then by offset
    pub fn compare_points(&self, a: &Point, b: &Point) -> Result<Ordering, ModelError> {
        if a.key == b.key {
            return Ok(a.offset.cmp(&b.offset));
        }
        let texts = self.texts();
        let position = |key: NodeKey| {
            texts
                .iter()
                .position(|k| *k == key)
                .ok_or(ModelError::NotText(key))
        };
        Ok(position(a.key)?.cmp(&position(b.key)?))
    }

    /// Deepest shared strict ancestor; `None` means the document root
    pub fn common_ancestor(&self, a: NodeKey, b: NodeKey) -> Option<NodeKey> {
        let above_a: HashSet<NodeKey> = self.ancestors(a).into_iter().collect();
        self.ancestors(b).into_iter().find(|k| above_a.contains(k))
    }

    /// The child of `ancestor` (or top-level node when `None`) on the path
    /// down to `descendant`
    pub fn child_toward(&self, ancestor: Option<NodeKey>, descendant: NodeKey) -> Option<NodeKey> {
        if !self.contains(descendant) {
            return None;
        }
        let mut current = descendant;
        loop {
            let parent = self.parent(current);
            if parent == ancestor {
                return Some(current);
            }
            current = parent?;
        }
    }

    /// Child indices from the top level down to `key`
    pub fn path_of(&self, key: NodeKey) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = key;
        loop {
            path.push(self.index_in_parent(current)?);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    pub fn key_at_path(&self, path: &[usize]) -> Result<NodeKey, ModelError> {
        let invalid = || ModelError::InvalidPath(path.to_vec());
        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut current = *self.roots.get(*first).ok_or_else(invalid)?;
        for index in rest {
            current = *self.children(current).get(*index).ok_or_else(invalid)?;
        }
        Ok(current)
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    pub fn set_block_type(&mut self, key: NodeKey, new_type: BlockType) -> Result<(), ModelError> {
        match &mut self.node_mut(key)?.kind {
            NodeKind::Block { block_type, .. } => {
                *block_type = new_type;
                Ok(())
            }
            _ => Err(ModelError::NotBlock(key)),
        }
    }

    pub fn set_marks(&mut self, key: NodeKey, new_marks: MarkSet) -> Result<(), ModelError> {
        match &mut self.node_mut(key)?.kind {
            NodeKind::Text { marks, .. } => {
                *marks = new_marks;
                Ok(())
            }
            _ => Err(ModelError::NotText(key)),
        }
    }

    /// Returns whether the mark was newly added
    pub fn add_mark(&mut self, key: NodeKey, mark: MarkType) -> Result<bool, ModelError> {
        match &mut self.node_mut(key)?.kind {
            NodeKind::Text { marks, .. } => Ok(marks.insert(mark)),
            _ => Err(ModelError::NotText(key)),
        }
    }

    /// Returns whether the mark was present
    pub fn remove_mark(&mut self, key: NodeKey, mark: MarkType) -> Result<bool, ModelError> {
        match &mut self.node_mut(key)?.kind {
            NodeKind::Text { marks, .. } => Ok(marks.remove(&mark)),
            _ => Err(ModelError::NotText(key)),
        }
    }

    pub fn insert_text(&mut self, key: NodeKey, offset: usize, insert: &str) -> Result<(), ModelError> {
        match &mut self.node_mut(key)?.kind {
            NodeKind::Text { text, .. } => {
                let len = text.chars().count();
                if offset > len {
                    return Err(ModelError::OffsetOutOfBounds { key, offset, len });
                }
                let index = byte_index(text, offset);
                text.insert_str(index, insert);
                Ok(())
            }
            _ => Err(ModelError::NotText(key)),
        }
    }

    /// Split a text node at an interior char offset. The left half keeps
    /// `key`; the right half gets a fresh key, is inserted immediately
    /// after, and is returned.
    pub fn split_text(&mut self, key: NodeKey, at: usize) -> Result<NodeKey, ModelError> {
        let (right_text, marks) = match &mut self.node_mut(key)?.kind {
            NodeKind::Text { text, marks } => {
                let len = text.chars().count();
                if at == 0 || at >= len {
                    return Err(ModelError::OffsetOutOfBounds {
                        key,
                        offset: at,
                        len,
                    });
                }
                let index = byte_index(text, at);
                (text.split_off(index), marks.clone())
            }
            _ => return Err(ModelError::NotText(key)),
        };

        let parent = self.parent(key);
        let index = self.index_in_parent(key).ok_or(ModelError::NodeNotFound(key))?;
        let right = self.create_text(right_text, marks);
        self.insert_node(parent, index + 1, right)?;
        Ok(right)
    }

    /// Attach a detached node under `parent` (top level when `None`)
    pub fn insert_node(
        &mut self,
        parent: Option<NodeKey>,
        index: usize,
        key: NodeKey,
    ) -> Result<(), ModelError> {
        if !self.contains(key) {
            return Err(ModelError::NodeNotFound(key));
        }
        if self.parents.contains_key(&key) || self.roots.contains(&key) {
            return Err(ModelError::InvalidStructure(format!(
                "node {} is already attached",
                key
            )));
        }
        let siblings = self.siblings_mut(parent)?;
        let index = index.min(siblings.len());
        siblings.insert(index, key);
        if let Some(parent) = parent {
            self.parents.insert(key, parent);
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it in the arena.
    /// Returns its former index.
    pub fn detach(&mut self, key: NodeKey) -> Result<usize, ModelError> {
        let parent = self.parent(key);
        let siblings = self.siblings_mut(parent)?;
        let index = siblings
            .iter()
            .position(|k| *k == key)
            .ok_or(ModelError::NodeNotFound(key))?;
        siblings.remove(index);
        self.parents.remove(&key);
        Ok(index)
    }

    /// Remove a node and all of its descendants
    pub fn remove(&mut self, key: NodeKey) -> Result<(), ModelError> {
        self.detach(key)?;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend_from_slice(node.children());
            }
            self.parents.remove(&current);
        }
        Ok(())
    }

    /// Move children `[at..]` of `key` into a new node of the same kind,
    /// inserted right after it. Returns the new node.
    pub fn split_node(&mut self, key: NodeKey, at: usize) -> Result<NodeKey, ModelError> {
        let shell = {
            let node = self.node_mut(key)?;
            let shell = node.empty_shell();
            let children = node.children_mut().ok_or(ModelError::NotBlock(key))?;
            if at == 0 || at >= children.len() {
                return Err(ModelError::InvalidStructure(format!(
                    "cannot split node {} at child {}",
                    key, at
                )));
            }
            let moved = children.split_off(at);
            with_children(shell, moved)
        };

        let parent = self.parent(key);
        let index = self.index_in_parent(key).ok_or(ModelError::NodeNotFound(key))?;
        let new_key = self.create(shell);
        self.insert_node(parent, index + 1, new_key)?;
        Ok(new_key)
    }

    /// Move siblings `[start..=end]` under `parent` into a new container
    /// built from `shell` (whose children are ignored)
    pub fn wrap_siblings(
        &mut self,
        parent: Option<NodeKey>,
        start: usize,
        end: usize,
        shell: NodeKind,
    ) -> Result<NodeKey, ModelError> {
        let len = self.siblings(parent).len();
        if start > end || end >= len {
            return Err(ModelError::InvalidStructure(format!(
                "cannot wrap children {}..={} of {} siblings",
                start, end, len
            )));
        }
        if matches!(shell, NodeKind::Text { .. }) {
            return Err(ModelError::InvalidStructure(
                "a text node cannot wrap other nodes".to_string(),
            ));
        }

        let moved: Vec<NodeKey> = self.siblings_mut(parent)?.drain(start..=end).collect();
        for child in &moved {
            self.parents.remove(child);
        }
        let wrapper = self.create(with_children(shell, moved));
        self.insert_node(parent, start, wrapper)?;
        Ok(wrapper)
    }

    /// Replace a container with its children, in place
    pub fn unwrap_node(&mut self, key: NodeKey) -> Result<(), ModelError> {
        let node = self.node(key)?;
        if node.is_text() {
            return Err(ModelError::InvalidStructure(format!(
                "text node {} cannot be unwrapped",
                key
            )));
        }
        let children = node.children().to_vec();
        let parent = self.parent(key);
        let index = self.detach(key)?;
        self.nodes.remove(&key);

        let siblings = self.siblings_mut(parent)?;
        siblings.splice(index..index, children.iter().copied());
        for child in children {
            match parent {
                Some(parent) => self.parents.insert(child, parent),
                None => self.parents.remove(&child),
            };
        }
        Ok(())
    }

    /// Wrap the given leaf blocks (in document order) in one new container
    /// placed under their deepest common ancestor
    pub fn wrap_blocks(&mut self, blocks: &[NodeKey], block_type: BlockType) -> Result<NodeKey, ModelError> {
        let (first, last) = match (blocks.first(), blocks.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(ModelError::InvalidStructure(
                    "no blocks to wrap".to_string(),
                ))
            }
        };

        let (parent, start_child, end_child) = if first == last {
            (self.parent(first), first, first)
        } else {
            let parent = self.common_ancestor(first, last);
            let start = self.child_toward(parent, first).ok_or(ModelError::NodeNotFound(first))?;
            let end = self.child_toward(parent, last).ok_or(ModelError::NodeNotFound(last))?;
            (parent, start, end)
        };

        let start = self
            .index_in_parent(start_child)
            .ok_or(ModelError::NodeNotFound(start_child))?;
        let end = self
            .index_in_parent(end_child)
            .ok_or(ModelError::NodeNotFound(end_child))?;

        self.wrap_siblings(
            parent,
            start,
            end,
            NodeKind::Block {
                block_type,
                children: Vec::new(),
            },
        )
    }

    /// Remove the nearest `block_type` ancestor of each given block. When
    /// only some of a container's children are affected, the container is
    /// split and the untouched leading/trailing children stay wrapped.
    /// Returns the number of containers unwrapped.
    pub fn unwrap_blocks(&mut self, blocks: &[NodeKey], block_type: BlockType) -> Result<usize, ModelError> {
        let mut groups: Vec<(NodeKey, Vec<NodeKey>)> = Vec::new();
        for block in blocks {
            let container = match self
                .nearest_ancestor_matching(*block, |n| n.block_type() == Some(block_type))
            {
                Some(node) => node.key,
                None => continue,
            };
            match groups.iter_mut().find(|(c, _)| *c == container) {
                Some((_, members)) => members.push(*block),
                None => groups.push((container, vec![*block])),
            }
        }

        for (container, members) in &groups {
            let indices: Vec<usize> = members
                .iter()
                .filter_map(|m| self.child_toward(Some(*container), *m))
                .filter_map(|child| self.index_in_parent(child))
                .collect();
            let (first, last) = match (indices.iter().min(), indices.iter().max()) {
                (Some(first), Some(last)) => (*first, *last),
                _ => continue,
            };

            let len = self.children(*container).len();
            if last + 1 < len {
                self.split_node(*container, last + 1)?;
            }
            let target = if first > 0 {
                self.split_node(*container, first)?
            } else {
                *container
            };
            self.unwrap_node(target)?;
        }

        Ok(groups.len())
    }
}

fn with_children(shell: NodeKind, new_children: Vec<NodeKey>) -> NodeKind {
    match shell {
        NodeKind::Block { block_type, .. } => NodeKind::Block {
            block_type,
            children: new_children,
        },
        NodeKind::Inline {
            inline_type, data, ..
        } => NodeKind::Inline {
            inline_type,
            data,
            children: new_children,
        },
        text @ NodeKind::Text { .. } => text,
    }
}
