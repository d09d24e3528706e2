//! # Selection Tracker
//!
//! Read-only view of a selection over a document. Every query works on the
//! normalized range, so anchor/focus direction never matters here.
//!
//! Two notions of "under the selection" are used:
//!
//! - `covered_texts()`: texts that contribute at least one selected
//!   character (marks and links act on these)
//! - `texts_in_span()`: every text from the start text to the end text,
//!   inclusive (block queries act on these)

use crate::errors::{CommandError, CommandResult};
use prose_model::{Document, MarkSet, Node, NodeKey, Point, Range, Selection, Value};

/// Check that both points address existing text nodes within bounds
pub fn validate_selection(doc: &Document, selection: &Selection) -> CommandResult<()> {
    validate_point(doc, &selection.anchor)?;
    validate_point(doc, &selection.focus)
}

fn validate_point(doc: &Document, point: &Point) -> CommandResult<()> {
    let node = doc.get(point.key).ok_or_else(|| {
        CommandError::InvalidSelection(format!("node {} is not in the document", point.key))
    })?;
    if !node.is_text() {
        return Err(CommandError::InvalidSelection(format!(
            "node {} is not a text node",
            point.key
        )));
    }
    if doc.index_in_parent(point.key).is_none() {
        return Err(CommandError::InvalidSelection(format!(
            "node {} is detached",
            point.key
        )));
    }
    let len = node.text_len();
    if point.offset > len {
        return Err(CommandError::InvalidSelection(format!(
            "offset {} past the end of node {} (length {})",
            point.offset, point.key, len
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a> {
    doc: &'a Document,
    range: Range,
    collapsed: bool,
}

impl<'a> SelectionView<'a> {
    pub fn new(value: &'a Value) -> CommandResult<Self> {
        Self::of(&value.document, &value.selection)
    }

    pub fn of(doc: &'a Document, selection: &Selection) -> CommandResult<Self> {
        validate_selection(doc, selection)?;
        Ok(Self {
            doc,
            range: selection.range(doc)?,
            collapsed: selection.is_collapsed(),
        })
    }

    /// View over an already-normalized range
    pub fn from_range(doc: &'a Document, range: Range) -> CommandResult<Self> {
        validate_point(doc, &range.start)?;
        validate_point(doc, &range.end)?;
        Ok(Self {
            doc,
            range,
            collapsed: range.is_collapsed(),
        })
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_expanded(&self) -> bool {
        !self.collapsed
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn texts_in_span(&self) -> Vec<NodeKey> {
        let texts = self.doc.texts();
        let start = texts.iter().position(|k| *k == self.range.start.key);
        let end = texts.iter().position(|k| *k == self.range.end.key);
        match (start, end) {
            (Some(start), Some(end)) if start <= end => texts[start..=end].to_vec(),
            _ => vec![self.range.start.key],
        }
    }

    /// Texts holding at least one selected character; empty when the range
    /// covers nothing, even if it is expanded across a text boundary
    pub fn covered_texts(&self) -> Vec<NodeKey> {
        let Range { start, end } = self.range;
        self.texts_in_span()
            .into_iter()
            .filter(|key| {
                let len = self.doc.get(*key).map(Node::text_len).unwrap_or(0);
                let from = if *key == start.key { start.offset } else { 0 };
                let to = if *key == end.key { end.offset } else { len };
                to > from
            })
            .collect()
    }

    /// No character is selected
    pub fn is_empty(&self) -> bool {
        self.covered_texts().is_empty()
    }

    /// `covered_texts()`, or the text at the start point when nothing is
    /// covered
    pub fn texts(&self) -> Vec<NodeKey> {
        let touched = self.covered_texts();
        if touched.is_empty() {
            vec![self.range.start.key]
        } else {
            touched
        }
    }

    /// Distinct leaf blocks of the span, in document order
    pub fn blocks(&self) -> Vec<NodeKey> {
        let mut out: Vec<NodeKey> = Vec::new();
        for text in self.texts_in_span() {
            if let Some(block) = self.doc.closest_block(text) {
                if !out.contains(&block) {
                    out.push(block);
                }
            }
        }
        out
    }

    /// Distinct inline ancestors of the span, in document order
    pub fn inlines(&self) -> Vec<NodeKey> {
        let mut out: Vec<NodeKey> = Vec::new();
        for text in self.texts_in_span() {
            for ancestor in self.doc.ancestors(text).into_iter().rev() {
                let is_inline = self.doc.get(ancestor).map(Node::is_inline).unwrap_or(false);
                if is_inline && !out.contains(&ancestor) {
                    out.push(ancestor);
                }
            }
        }
        out
    }

    /// Union of the marks of `texts()`
    pub fn marks(&self) -> MarkSet {
        self.texts()
            .iter()
            .filter_map(|k| self.doc.get(*k).and_then(Node::marks))
            .flat_map(|marks| marks.iter().copied())
            .collect()
    }

    /// Marks shared by every text in `texts()`
    pub fn active_marks(&self) -> MarkSet {
        let mut sets = self
            .texts()
            .into_iter()
            .filter_map(|k| self.doc.get(k).and_then(Node::marks).cloned());
        let first = sets.next().unwrap_or_default();
        sets.fold(first, |acc, marks| acc.intersection(&marks).copied().collect())
    }
}
