//! # Mark Command Processor
//!
//! Toggles bold/italic/code over the selection. Expanded selections split
//! the boundary texts so only the selected characters change; a collapsed
//! selection only flips the pending marks carried by the selection.

use crate::edit::{commit, isolate_range, touched_texts};
use crate::errors::CommandResult;
use crate::queries::has_mark;
use crate::selection::SelectionView;
use prose_model::{MarkType, Selection, Value};
use tracing::{debug, instrument};

#[instrument(skip(value))]
pub fn toggle_mark(value: &Value, mark: MarkType) -> CommandResult<Value> {
    let view = SelectionView::new(value)?;

    if view.is_collapsed() {
        let mut pending = value
            .selection
            .marks
            .clone()
            .unwrap_or_else(|| view.active_marks());
        if !pending.remove(&mark) {
            pending.insert(mark);
        }
        debug!(pending = ?pending, "Toggled pending marks");
        let selection = value.selection.clone().with_marks(Some(pending));
        return Ok(value.with_selection(selection));
    }

    if view.is_empty() {
        debug!("Selection covers no characters");
        return Ok(value.clone());
    }

    let active = has_mark(value, mark);
    let backward = value.selection.is_backward(&value.document)?;
    let mut doc = value.document.clone();
    let range = isolate_range(&mut doc, view.range())?;

    let texts = touched_texts(&doc, range)?;
    for key in &texts {
        if active {
            doc.remove_mark(*key, mark)?;
        } else {
            doc.add_mark(*key, mark)?;
        }
    }
    debug!(texts = texts.len(), removed = active, "Toggled mark");

    commit(doc, Selection::from_range(range, backward))
}
