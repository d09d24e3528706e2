//! # Editor Commands
//!
//! Named, serializable operations submitted to the editor. Each command
//! reads the current value and produces the next one; nothing is changed
//! in place.
//!
//! ```json
//! {"command": "toggle_mark", "mark": "bold"}
//! {"command": "toggle_block", "block": "numbered-list"}
//! {"command": "select", "anchor": {"path": [0, 0], "offset": 0}, "focus": {"path": [0, 0], "offset": 5}}
//! ```

use crate::blocks::toggle_block;
use crate::config::EditorConfig;
use crate::errors::{CommandError, CommandResult};
use crate::insert::insert_text;
use crate::links::{unwrap_link, wrap_link};
use crate::marks::toggle_mark;
use crate::selection::validate_selection;
use prose_model::{BlockType, MarkType, PointJson, Selection, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Toggle a mark over the selection
    ToggleMark { mark: MarkType },

    /// Toggle the block type (or list) of the selected blocks
    ToggleBlock { block: BlockType },

    /// Wrap the selection in a link
    WrapLink { href: String },

    /// Remove links under the selection
    UnwrapLink,

    /// Insert text at a collapsed cursor
    InsertText { text: String },

    /// Move the selection; clears pending marks
    Select { anchor: PointJson, focus: PointJson },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleMark { .. } => "toggle_mark",
            Command::ToggleBlock { .. } => "toggle_block",
            Command::WrapLink { .. } => "wrap_link",
            Command::UnwrapLink => "unwrap_link",
            Command::InsertText { .. } => "insert_text",
            Command::Select { .. } => "select",
        }
    }

    /// Compute the value this command produces from `value`
    pub fn apply(&self, value: &Value, config: &EditorConfig) -> CommandResult<Value> {
        match self {
            Command::ToggleMark { mark } => toggle_mark(value, *mark),
            Command::ToggleBlock { block } => toggle_block(value, *block, config.default_block),
            Command::WrapLink { href } => wrap_link(value, href),
            Command::UnwrapLink => unwrap_link(value),
            Command::InsertText { text } => insert_text(value, text),
            Command::Select { anchor, focus } => Self::apply_select(value, anchor, focus),
        }
    }

    fn apply_select(value: &Value, anchor: &PointJson, focus: &PointJson) -> CommandResult<Value> {
        let doc = &value.document;
        let resolve = |point: &PointJson| {
            doc.resolve_point(point)
                .map_err(|e| CommandError::InvalidSelection(e.to_string()))
        };
        let selection = Selection::new(resolve(anchor)?, resolve(focus)?);
        validate_selection(doc, &selection)?;
        Ok(value.with_selection(selection))
    }

    /// Parse a JSON array of commands
    pub fn script_from_json(json: &str) -> Result<Vec<Command>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let command: Command = serde_json::from_str(r#"{"command":"toggle_mark","mark":"bold"}"#).unwrap();
        assert_eq!(command, Command::ToggleMark { mark: MarkType::Bold });
        assert_eq!(command.name(), "toggle_mark");

        let json = serde_json::to_value(Command::ToggleBlock {
            block: BlockType::BulletedList,
        })
        .unwrap();
        assert_eq!(json["command"], "toggle_block");
        assert_eq!(json["block"], "bulleted-list");

        let unit: Command = serde_json::from_str(r#"{"command":"unwrap_link"}"#).unwrap();
        assert_eq!(unit, Command::UnwrapLink);
    }

    #[test]
    fn test_select_resolves_paths() {
        let value = Value::from_json(
            r#"{ "document": { "nodes": [
                { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "hello" }] }
            ] } }"#,
        )
        .unwrap();
        let select: Command = serde_json::from_str(
            r#"{"command":"select","anchor":{"path":[0,0],"offset":1},"focus":{"path":[0,0],"offset":4}}"#,
        )
        .unwrap();

        let next = select.apply(&value, &EditorConfig::default()).unwrap();
        assert_eq!(next.selection.anchor.offset, 1);
        assert_eq!(next.selection.focus.offset, 4);

        let bad = Command::Select {
            anchor: PointJson { path: vec![0, 3], offset: 0 },
            focus: PointJson { path: vec![0, 0], offset: 0 },
        };
        assert!(matches!(
            bad.apply(&value, &EditorConfig::default()),
            Err(CommandError::InvalidSelection(_))
        ));
    }
}
