//! # Prose Editor
//!
//! Selection-aware editing commands over the prose document model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: document tree, selection, JSON       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: commands over a Value               │
//! │  - Selection tracking                       │
//! │  - Mark / block / link processors           │
//! │  - Hotkeys, paste, toolbar state            │
//! │  - Editor instance + subscriptions          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: Value → VNode tree → HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Values are snapshots**: every command reads one `Value` and returns
//!    the next; a failed command leaves the old one in place
//! 2. **Toggles, not sets**: applying a command twice undoes it
//! 3. **Schema first**: a result that breaks the document schema is never
//!    committed
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prose_editor::{Command, Editor, EditorConfig};
//! use prose_model::MarkType;
//!
//! let mut editor = Editor::from_json(&json, EditorConfig::default())?;
//! editor.subscribe(|value, version| println!("v{}", version));
//!
//! editor.submit(Command::ToggleMark { mark: MarkType::Bold });
//! let toolbar = editor.toolbar();
//! ```

mod blocks;
mod commands;
mod config;
mod edit;
mod editor;
mod errors;
mod hotkeys;
mod insert;
mod links;
mod marks;
mod queries;
mod selection;
mod toolbar;
mod url;

pub use blocks::toggle_block;
pub use commands::Command;
pub use config::EditorConfig;
pub use editor::{CommandOutcome, Editor, EventOutcome, SubscriptionId};
pub use errors::{CommandError, CommandResult, EditorError};
pub use hotkeys::{is_hotkey, mark_for_event, KeyEvent, Modifiers, Platform, MARK_HOTKEYS};
pub use insert::insert_text;
pub use links::{
    on_click_link, on_paste_auto_link, unwrap_link, wrap_link, PasteOutcome, Prompt, Transfer,
    TransferKind, TEXT_PROMPT, URL_PROMPT,
};
pub use marks::toggle_mark;
pub use queries::{has_block, has_inline_of_type, has_mark};
pub use selection::{validate_selection, SelectionView};
pub use toolbar::{is_block_active, ButtonState, ToolbarState, BLOCK_BUTTONS, MARK_BUTTONS};
pub use url::is_url;

// Re-export common types for convenience
pub use prose_model::{BlockType, Document, InlineType, MarkType, Point, Selection, Value};
