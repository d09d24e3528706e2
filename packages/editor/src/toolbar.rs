//! Toolbar button state derived from a value

use crate::queries::{has_block, has_inline_of_type, has_mark};
use crate::selection::SelectionView;
use prose_model::{BlockType, InlineType, MarkType, Value};
use serde::Serialize;

/// Mark buttons, in toolbar order
pub const MARK_BUTTONS: [MarkType; 3] = [MarkType::Bold, MarkType::Italic, MarkType::Code];

/// Block buttons, in toolbar order
pub const BLOCK_BUTTONS: [BlockType; 5] = [
    BlockType::HeadingOne,
    BlockType::HeadingTwo,
    BlockType::BlockQuote,
    BlockType::NumberedList,
    BlockType::BulletedList,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub name: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarState {
    pub marks: Vec<ButtonState>,
    pub link: bool,
    pub blocks: Vec<ButtonState>,
}

impl ToolbarState {
    pub fn compute(value: &Value) -> Self {
        Self {
            marks: MARK_BUTTONS
                .iter()
                .map(|m| ButtonState {
                    name: m.as_str(),
                    active: has_mark(value, *m),
                })
                .collect(),
            link: has_inline_of_type(value, InlineType::Link),
            blocks: BLOCK_BUTTONS
                .iter()
                .map(|b| ButtonState {
                    name: b.as_str(),
                    active: is_block_active(value, *b),
                })
                .collect(),
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        if name == InlineType::Link.as_str() {
            return self.link;
        }
        self.marks
            .iter()
            .chain(self.blocks.iter())
            .any(|b| b.name == name && b.active)
    }
}

/// List buttons light up only when the first selected block sits directly
/// in a list of that kind
pub fn is_block_active(value: &Value, block_type: BlockType) -> bool {
    if !block_type.is_list() {
        return has_block(value, block_type);
    }
    let Ok(view) = SelectionView::new(value) else {
        return false;
    };
    let parent_type = view
        .blocks()
        .first()
        .and_then(|b| value.document.parent_node(*b))
        .and_then(|p| p.block_type());
    has_block(value, BlockType::ListItem) && parent_type == Some(block_type)
}
