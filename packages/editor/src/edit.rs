//! Helpers shared by the command processors

use crate::errors::CommandResult;
use crate::selection::{validate_selection, SelectionView};
use prose_common::validate_schema;
use prose_model::{Document, NodeKey, Range, Selection, Value};
use tracing::debug;

/// Split the texts under the range boundaries so that every text the range
/// touches is covered completely. Returns the range remapped onto the
/// pieces; it still denotes the same characters.
pub(crate) fn isolate_range(doc: &mut Document, range: Range) -> CommandResult<Range> {
    let mut range = range;
    if range.is_collapsed() {
        return Ok(range);
    }

    let start = range.start;
    if start.offset > 0 && start.offset < doc.text_len(start.key)? {
        let right = doc.split_text(start.key, start.offset)?;
        range.remap_split(start.key, start.offset, right);
    }

    let end = range.end;
    if end.offset > 0 && end.offset < doc.text_len(end.key)? {
        let right = doc.split_text(end.key, end.offset)?;
        range.remap_split(end.key, end.offset, right);
    }

    debug!(start = %range.start.key, end = %range.end.key, "Isolated range");
    Ok(range)
}

/// Validate the edited tree and selection and pair them into the next value
pub(crate) fn commit(doc: Document, selection: Selection) -> CommandResult<Value> {
    validate_schema(&doc)?;
    validate_selection(&doc, &selection)?;
    Ok(Value::new(doc, selection))
}

/// Texts with at least one character inside `range`
pub(crate) fn touched_texts(doc: &Document, range: Range) -> CommandResult<Vec<NodeKey>> {
    Ok(SelectionView::from_range(doc, range)?.covered_texts())
}
