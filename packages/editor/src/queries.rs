//! Pure reads over a value. An invalid selection answers `false`.

use crate::selection::SelectionView;
use prose_model::{BlockType, InlineType, MarkType, Value};

/// True when at least one touched text carries `mark`. A collapsed
/// selection with pending marks answers from those instead.
pub fn has_mark(value: &Value, mark: MarkType) -> bool {
    let Ok(view) = SelectionView::new(value) else {
        return false;
    };
    if view.is_collapsed() {
        if let Some(pending) = &value.selection.marks {
            return pending.contains(&mark);
        }
    }
    view.marks().contains(&mark)
}

/// True when at least one leaf block under the selection has `block_type`
pub fn has_block(value: &Value, block_type: BlockType) -> bool {
    let Ok(view) = SelectionView::new(value) else {
        return false;
    };
    view.blocks()
        .iter()
        .any(|k| value.document.get(*k).and_then(|n| n.block_type()) == Some(block_type))
}

/// True when any inline under or around the selection has `inline_type`
pub fn has_inline_of_type(value: &Value, inline_type: InlineType) -> bool {
    let Ok(view) = SelectionView::new(value) else {
        return false;
    };
    view.inlines()
        .iter()
        .any(|k| value.document.get(*k).and_then(|n| n.inline_type()) == Some(inline_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_model::{Point, Selection};

    fn value() -> Value {
        Value::from_json(
            r#"{ "document": { "nodes": [
                { "object": "block", "type": "heading-one", "nodes": [
                    { "object": "text", "text": "plain " },
                    { "object": "text", "text": "bold", "marks": [{ "type": "bold" }] }
                ] },
                { "object": "block", "type": "paragraph", "nodes": [
                    { "object": "inline", "type": "link", "data": { "href": "https://a.io" },
                      "nodes": [{ "object": "text", "text": "link" }] }
                ] }
            ] } }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_has_mark_any_touched_text() {
        let value = value();
        let texts = value.document.texts();
        let both = value.with_selection(Selection::new(Point::new(texts[0], 2), Point::new(texts[1], 2)));
        let plain = value.with_selection(Selection::new(Point::new(texts[0], 0), Point::new(texts[0], 6)));

        assert!(has_mark(&both, MarkType::Bold));
        assert!(!has_mark(&plain, MarkType::Bold));
        assert!(!has_mark(&both, MarkType::Code));
    }

    #[test]
    fn test_pending_marks_take_precedence() {
        let value = value();
        let texts = value.document.texts();
        let cursor = Selection::collapsed(Point::new(texts[1], 2));

        assert!(has_mark(&value.with_selection(cursor.clone()), MarkType::Bold));

        let cleared = cursor.with_marks(Some(Default::default()));
        assert!(!has_mark(&value.with_selection(cleared), MarkType::Bold));
    }

    #[test]
    fn test_block_and_inline_queries() {
        let value = value();
        let texts = value.document.texts();
        let spanning = value.with_selection(Selection::new(Point::new(texts[0], 0), Point::new(texts[2], 1)));

        assert!(has_block(&spanning, BlockType::HeadingOne));
        assert!(has_block(&spanning, BlockType::Paragraph));
        assert!(!has_block(&spanning, BlockType::ListItem));
        assert!(has_inline_of_type(&spanning, InlineType::Link));
        assert!(!has_inline_of_type(&value, InlineType::Link));
    }

    #[test]
    fn test_invalid_selection_answers_false() {
        let value = value();
        let texts = value.document.texts();
        let broken = value.with_selection(Selection::collapsed(Point::new(texts[0], 40)));

        assert!(!has_mark(&broken, MarkType::Bold));
        assert!(!has_block(&broken, BlockType::HeadingOne));
    }
}
