use crate::document::Document;
use crate::error::ModelError;
use crate::selection::{Point, Selection};

/// Snapshot of a document together with its selection
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub document: Document,
    pub selection: Selection,
}

impl Value {
    pub fn new(document: Document, selection: Selection) -> Self {
        Self {
            document,
            selection,
        }
    }

    /// Value with the cursor collapsed at the start of the first text
    pub fn from_document(document: Document) -> Result<Self, ModelError> {
        let first = document.first_text().ok_or_else(|| {
            ModelError::InvalidStructure("document has no text to place a cursor in".to_string())
        })?;
        Ok(Self::new(document, Selection::collapsed(Point::new(first, 0))))
    }

    /// Same document, different selection
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            document: self.document.clone(),
            selection,
        }
    }
}
