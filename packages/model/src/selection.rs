use crate::document::Document;
use crate::error::ModelError;
use crate::node::{MarkSet, NodeKey};
use std::cmp::Ordering;

/// A position inside a text node, offset measured in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub key: NodeKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: NodeKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Anchor/focus selection over a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,

    /// Marks applied to the next inserted text (collapsed toggles only)
    pub marks: Option<MarkSet>,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self {
            anchor,
            focus,
            marks: None,
        }
    }

    pub fn collapsed(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Rebuild a selection from a normalized range
    pub fn from_range(range: Range, backward: bool) -> Self {
        if backward {
            Self::new(range.end, range.start)
        } else {
            Self::new(range.start, range.end)
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_expanded(&self) -> bool {
        !self.is_collapsed()
    }

    /// Focus before anchor in document order
    pub fn is_backward(&self, doc: &Document) -> Result<bool, ModelError> {
        Ok(doc.compare_points(&self.anchor, &self.focus)? == Ordering::Greater)
    }

    /// Normalized `start <= end` range
    pub fn range(&self, doc: &Document) -> Result<Range, ModelError> {
        if self.is_backward(doc)? {
            Ok(Range::new(self.focus, self.anchor))
        } else {
            Ok(Range::new(self.anchor, self.focus))
        }
    }

    pub fn with_marks(mut self, marks: Option<MarkSet>) -> Self {
        self.marks = marks;
        self
    }
}

/// Selection normalized to document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Re-point after text `key` was split at `at`, with the tail now
    /// living in `right`. A start sitting exactly on the split moves to
    /// the tail; an end sitting on it stays with the head, so the range
    /// still covers the same characters.
    pub fn remap_split(&mut self, key: NodeKey, at: usize, right: NodeKey) {
        if self.start.key == key && self.start.offset >= at {
            self.start = Point::new(right, self.start.offset - at);
        }
        if self.end.key == key && self.end.offset > at {
            self.end = Point::new(right, self.end.offset - at);
        }
    }
}
