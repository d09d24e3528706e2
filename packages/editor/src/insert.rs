//! Text insertion at a collapsed cursor

use crate::edit::commit;
use crate::errors::{CommandError, CommandResult};
use crate::selection::SelectionView;
use prose_model::{Document, MarkSet, Point, Range, Selection, Value};
use tracing::{debug, instrument};

/// Insert `text` at the cursor, honouring pending marks. The cursor ends up
/// after the inserted text and the pending marks are cleared.
#[instrument(skip(value))]
pub fn insert_text(value: &Value, text: &str) -> CommandResult<Value> {
    let view = SelectionView::new(value)?;
    if view.is_expanded() {
        return Err(CommandError::InvalidSelection(
            "cannot insert over an expanded selection".to_string(),
        ));
    }
    if text.is_empty() {
        return Ok(value.clone());
    }

    let mut doc = value.document.clone();
    let inserted = insert_at(&mut doc, view.range().start, text, value.selection.marks.as_ref())?;
    commit(doc, Selection::collapsed(inserted.end))
}

/// Insert into `doc` and return the range covering the new characters
pub(crate) fn insert_at(
    doc: &mut Document,
    at: Point,
    text: &str,
    pending: Option<&MarkSet>,
) -> CommandResult<Range> {
    let len = text.chars().count();
    let current = doc.node(at.key)?.marks().cloned().unwrap_or_default();

    let marks = match pending {
        Some(marks) if *marks != current => marks.clone(),
        _ => {
            doc.insert_text(at.key, at.offset, text)?;
            return Ok(Range::new(
                Point::new(at.key, at.offset),
                Point::new(at.key, at.offset + len),
            ));
        }
    };

    // differently-marked text needs its own node
    let parent = doc.parent(at.key);
    let mut index = doc.index_in_parent(at.key).ok_or_else(|| {
        CommandError::InvalidSelection(format!("node {} is detached", at.key))
    })?;
    let text_len = doc.text_len(at.key)?;
    if at.offset == text_len {
        index += 1;
    } else if at.offset > 0 {
        doc.split_text(at.key, at.offset)?;
        index += 1;
    }

    let key = doc.create_text(text, marks);
    doc.insert_node(parent, index, key)?;
    debug!(key = %key, "Inserted marked text node");
    Ok(Range::new(Point::new(key, 0), Point::new(key, len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_common::{mark_runs, plain_text};
    use prose_model::MarkType;

    fn value() -> Value {
        Value::from_json(
            r#"{ "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "hello" }] }
            ] } }"#,
        )
        .unwrap()
    }

    fn cursor(value: &Value, offset: usize) -> Selection {
        Selection::collapsed(Point::new(value.document.texts()[0], offset))
    }

    #[test]
    fn test_insert_plain_text_in_place() {
        let value = value();
        let value = value.with_selection(cursor(&value, 5));

        let next = insert_text(&value, " world").unwrap();

        assert_eq!(plain_text(&next.document), "hello world");
        assert_eq!(next.document.texts().len(), 1);
        assert_eq!(next.selection.focus.offset, 11);
    }

    #[test]
    fn test_pending_marks_create_marked_node() {
        let value = value();
        let bold: MarkSet = [MarkType::Bold].into_iter().collect();
        let value = value.with_selection(cursor(&value, 2).with_marks(Some(bold.clone())));

        let next = insert_text(&value, "XY").unwrap();

        assert_eq!(plain_text(&next.document), "heXYllo");
        assert_eq!(next.document.texts().len(), 3);
        let runs = mark_runs(&next.document);
        assert_eq!(runs[2], ('X', bold.clone()));
        assert_eq!(runs[4], ('l', MarkSet::new()));
        assert_eq!(next.selection.marks, None);
        assert_eq!(next.selection.focus.offset, 2);
    }

    #[test]
    fn test_rejects_expanded_selection() {
        let value = value();
        let text = value.document.texts()[0];
        let value = value.with_selection(Selection::new(Point::new(text, 0), Point::new(text, 3)));

        assert!(matches!(
            insert_text(&value, "x"),
            Err(CommandError::InvalidSelection(_))
        ));
    }
}
