//! # Block Command Processor
//!
//! Retypes the leaf blocks under the selection, and wraps/unwraps them in
//! list containers when the target is a list type.
//!
//! ```text
//! non-list target:  retype (or back to default) ─► lift out of any list
//! list target:
//!   in list, same type   ─► default type, lift out of both list kinds
//!   in list, other type  ─► lift out of both kinds ─► retype to list-item ─► wrap in target
//!   not in list          ─► retype to list-item ─► wrap in target
//! ```
//!
//! Unwrapping only removes the nearest list of the given kind, and splits it
//! when the selection covers a sub-range of its items.

use crate::edit::commit;
use crate::errors::{CommandError, CommandResult};
use crate::queries::has_block;
use crate::selection::SelectionView;
use prose_model::{BlockType, Document, NodeKey, Value};
use tracing::{debug, instrument, warn};

#[instrument(skip(value))]
pub fn toggle_block(value: &Value, target: BlockType, default_block: BlockType) -> CommandResult<Value> {
    if default_block.is_list() || default_block == BlockType::ListItem {
        return Err(CommandError::SchemaViolation(format!(
            "{} cannot be the default block type",
            default_block
        )));
    }

    let view = SelectionView::new(value)?;
    let blocks = view.blocks();
    let mut doc = value.document.clone();

    if target.is_list() {
        toggle_list(value, &mut doc, &blocks, target, default_block)?;
    } else {
        let is_active = has_block(value, target);
        let is_list = has_block(value, BlockType::ListItem);
        let new_type = if is_active { default_block } else { target };

        retype(&mut doc, &blocks, new_type)?;
        if is_list {
            doc.unwrap_blocks(&blocks, BlockType::BulletedList)?;
            doc.unwrap_blocks(&blocks, BlockType::NumberedList)?;
        }
        debug!(blocks = blocks.len(), new_type = %new_type, lifted = is_list, "Retyped blocks");
    }

    commit(doc, value.selection.clone())
}

fn toggle_list(
    value: &Value,
    doc: &mut Document,
    blocks: &[NodeKey],
    target: BlockType,
    default_block: BlockType,
) -> CommandResult<()> {
    let is_list = has_block(value, BlockType::ListItem);
    let is_type = !blocks.is_empty()
        && blocks.iter().all(|b| {
            value
                .document
                .nearest_ancestor_matching(*b, |n| n.block_type() == Some(target))
                .is_some()
        });

    if is_list && is_type {
        retype(doc, blocks, default_block)?;
        doc.unwrap_blocks(blocks, BlockType::BulletedList)?;
        doc.unwrap_blocks(blocks, BlockType::NumberedList)?;
        debug!(list = %target, "Removed list");
        return Ok(());
    }

    if is_list {
        if let Some(other) = target.other_list() {
            doc.unwrap_blocks(blocks, other)?;
        }
        // items already in a target list would otherwise nest inside the new one
        doc.unwrap_blocks(blocks, target)?;
    }
    // non-items picked up alongside list items join the new list
    retype(doc, blocks, BlockType::ListItem)?;

    wrap_list(doc, blocks, target)
}

/// Wrap the blocks in one new list, skipping the wrap when the result would
/// hold anything but list items
fn wrap_list(doc: &mut Document, blocks: &[NodeKey], target: BlockType) -> CommandResult<()> {
    let all_items = blocks
        .iter()
        .all(|b| doc.get(*b).and_then(|n| n.block_type()) == Some(BlockType::ListItem));
    let parent = blocks.first().and_then(|b| doc.parent(*b));
    let siblings = blocks.iter().all(|b| doc.parent(*b) == parent);

    if !all_items || !siblings {
        warn!(list = %target, "Skipped list wrap that would break the schema");
        return Ok(());
    }

    let list = doc.wrap_blocks(blocks, target)?;
    debug!(list = %list, items = blocks.len(), "Wrapped list");
    Ok(())
}

fn retype(doc: &mut Document, blocks: &[NodeKey], block_type: BlockType) -> CommandResult<()> {
    for block in blocks {
        doc.set_block_type(*block, block_type)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_common::schema_issues;
    use prose_model::{Point, Selection};

    fn three_paragraphs() -> Value {
        Value::from_json(
            r#"{ "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "a" }] },
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "b" }] },
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "c" }] }
            ] } }"#,
        )
        .unwrap()
    }

    fn select_texts(value: &Value, from: usize, to: usize) -> Value {
        let texts = value.document.texts();
        value.with_selection(Selection::new(Point::new(texts[from], 0), Point::new(texts[to], 1)))
    }

    fn root_types(value: &Value) -> Vec<BlockType> {
        value
            .document
            .roots()
            .iter()
            .filter_map(|k| value.document.get(*k).and_then(|n| n.block_type()))
            .collect()
    }

    #[test]
    fn test_heading_toggles_back_to_default() {
        let value = select_texts(&three_paragraphs(), 0, 0);

        let heading = toggle_block(&value, BlockType::HeadingOne, BlockType::Paragraph).unwrap();
        assert_eq!(
            root_types(&heading),
            vec![BlockType::HeadingOne, BlockType::Paragraph, BlockType::Paragraph]
        );

        let back = toggle_block(&heading, BlockType::HeadingOne, BlockType::Paragraph).unwrap();
        assert_eq!(root_types(&back), root_types(&value));
    }

    #[test]
    fn test_list_wraps_selected_paragraphs_once() {
        let value = select_texts(&three_paragraphs(), 0, 1);

        let list = toggle_block(&value, BlockType::BulletedList, BlockType::Paragraph).unwrap();

        assert_eq!(root_types(&list), vec![BlockType::BulletedList, BlockType::Paragraph]);
        let ul = list.document.roots()[0];
        assert_eq!(list.document.children(ul).len(), 2);
        assert!(schema_issues(&list.document).is_empty());
        assert_eq!(list.selection, value.selection);
    }

    #[test]
    fn test_list_toggle_off_restores_paragraphs() {
        let value = select_texts(&three_paragraphs(), 0, 2);

        let list = toggle_block(&value, BlockType::NumberedList, BlockType::Paragraph).unwrap();
        let off = toggle_block(&list, BlockType::NumberedList, BlockType::Paragraph).unwrap();

        assert_eq!(root_types(&off), root_types(&value));
    }

    #[test]
    fn test_partial_unwrap_splits_list() {
        let value = select_texts(&three_paragraphs(), 0, 2);
        let list = toggle_block(&value, BlockType::BulletedList, BlockType::Paragraph).unwrap();
        let middle = select_texts(&list, 1, 1);

        let lifted = toggle_block(&middle, BlockType::BulletedList, BlockType::Paragraph).unwrap();

        assert_eq!(
            root_types(&lifted),
            vec![BlockType::BulletedList, BlockType::Paragraph, BlockType::BulletedList]
        );
        assert!(schema_issues(&lifted.document).is_empty());
    }

    #[test]
    fn test_switching_list_kind_leaves_one_container() {
        let value = select_texts(&three_paragraphs(), 0, 2);
        let bulleted = toggle_block(&value, BlockType::BulletedList, BlockType::Paragraph).unwrap();

        let numbered = toggle_block(&bulleted, BlockType::NumberedList, BlockType::Paragraph).unwrap();

        assert_eq!(root_types(&numbered), vec![BlockType::NumberedList]);
        let ol = numbered.document.roots()[0];
        assert_eq!(numbered.document.children(ol).len(), 3);
    }

    #[test]
    fn test_non_list_target_lifts_items_out() {
        let value = select_texts(&three_paragraphs(), 0, 2);
        let list = toggle_block(&value, BlockType::BulletedList, BlockType::Paragraph).unwrap();

        let quoted = toggle_block(&list, BlockType::BlockQuote, BlockType::Paragraph).unwrap();

        assert_eq!(root_types(&quoted), vec![BlockType::BlockQuote; 3]);
    }

    #[test]
    fn test_list_default_block_rejected() {
        let value = three_paragraphs();

        let result = toggle_block(&value, BlockType::HeadingOne, BlockType::BulletedList);

        assert!(matches!(result, Err(CommandError::SchemaViolation(_))));
    }

    #[test]
    fn test_mixed_paragraph_and_item_join_one_list() {
        let value = Value::from_json(
            r#"{ "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "para" }] },
                { "object": "block", "type": "bulleted-list", "nodes": [
                    { "object": "block", "type": "list-item", "nodes": [{ "object": "text", "text": "item" }] }
                ] }
            ] } }"#,
        )
        .unwrap();
        let value = select_texts(&value, 0, 1);

        for target in [BlockType::BulletedList, BlockType::NumberedList] {
            let next = toggle_block(&value, target, BlockType::Paragraph).unwrap();

            assert_eq!(root_types(&next), vec![target]);
            let list = next.document.roots()[0];
            let items: Vec<_> = next
                .document
                .children(list)
                .iter()
                .filter_map(|k| next.document.get(*k).and_then(|n| n.block_type()))
                .collect();
            assert_eq!(items, vec![BlockType::ListItem; 2]);
            assert!(schema_issues(&next.document).is_empty());
        }
    }
}
