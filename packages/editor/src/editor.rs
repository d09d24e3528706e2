//! # Editor Instance
//!
//! Owns the current value and translates input events into commands.
//!
//! ```text
//! key / click / paste ─► Command ─► next Value ─► subscribers
//!                                      │
//!                                      └─► toolbar(), render()
//! ```
//!
//! Event entry points never propagate command failures: a rejected command
//! is logged and the current value stays as it was.

use crate::commands::Command;
use crate::config::EditorConfig;
use crate::errors::{CommandError, CommandResult, EditorError};
use crate::hotkeys::{mark_for_event, KeyEvent};
use crate::links::{on_click_link, on_paste_auto_link, PasteOutcome, Prompt, Transfer};
use crate::selection::validate_selection;
use crate::toolbar::ToolbarState;
use prose_common::validate_schema;
use prose_model::{BlockType, MarkType, Value};
use prose_render::{to_html, HtmlOptions, RenderedDocument, Renderer};
use tracing::{debug, info, warn};

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&Value, u64)>;

/// Result of submitting a command
#[derive(Debug)]
pub enum CommandOutcome {
    /// A new value was committed
    Changed,
    /// The command succeeded without changing anything
    Unchanged,
    /// The user dismissed a prompt
    Cancelled,
    /// The command failed; the value is untouched
    Rejected(CommandError),
}

impl CommandOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, CommandOutcome::Changed)
    }
}

/// Whether an input event was consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    PassThrough,
}

pub struct Editor {
    value: Value,
    version: u64,
    config: EditorConfig,
    renderer: Renderer,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl Editor {
    /// Start editing `value`; fails when the config, the document or the
    /// selection is not valid to begin with
    pub fn new(value: Value, config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        validate_schema(&value.document).map_err(CommandError::from)?;
        validate_selection(&value.document, &value.selection)?;

        Ok(Self {
            value,
            version: 0,
            config,
            renderer: Renderer::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Load a value from its JSON form
    pub fn from_json(json: &str, config: EditorConfig) -> Result<Self, EditorError> {
        Self::new(Value::from_json(json)?, config)
    }

    /// Replace the renderer used by `render()`
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Bumped on every committed change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Call `callback` with every newly committed value and its version
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Value, u64) + 'static,
    {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn submit(&mut self, command: Command) -> CommandOutcome {
        let result = command.apply(&self.value, &self.config);
        self.settle(command.name(), result)
    }

    /// Like `submit`, but surfaces the failure
    pub fn try_submit(&mut self, command: Command) -> CommandResult<bool> {
        let next = command.apply(&self.value, &self.config)?;
        Ok(self.commit(command.name(), next))
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) -> EventOutcome {
        let Some(mark) = mark_for_event(event, self.config.platform) else {
            return EventOutcome::PassThrough;
        };
        debug!(key = %event.key, mark = %mark, "Hotkey");
        self.submit(Command::ToggleMark { mark });
        EventOutcome::Handled
    }

    pub fn on_paste(&mut self, transfer: &Transfer) -> EventOutcome {
        if !self.config.auto_link_on_paste {
            return EventOutcome::PassThrough;
        }
        match on_paste_auto_link(&self.value, transfer) {
            Ok(PasteOutcome::Handled(next)) => {
                self.commit("paste_link", next);
                EventOutcome::Handled
            }
            Ok(PasteOutcome::PassThrough) => EventOutcome::PassThrough,
            Err(e) => {
                warn!(error = %e, "Paste failed");
                EventOutcome::PassThrough
            }
        }
    }

    pub fn on_click_mark(&mut self, mark: MarkType) -> CommandOutcome {
        self.submit(Command::ToggleMark { mark })
    }

    pub fn on_click_block(&mut self, block: BlockType) -> CommandOutcome {
        self.submit(Command::ToggleBlock { block })
    }

    pub fn on_click_link(&mut self, prompt: &mut dyn Prompt) -> CommandOutcome {
        let result = on_click_link(
            &self.value,
            prompt,
            &self.config.link_url_prompt,
            &self.config.link_text_prompt,
        );
        self.settle("click_link", result)
    }

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::compute(&self.value)
    }

    pub fn render(&self) -> RenderedDocument {
        self.renderer.render_document(&self.value.document)
    }

    pub fn render_html(&self, options: &HtmlOptions) -> String {
        to_html(&self.render(), options)
    }

    fn settle(&mut self, name: &str, result: CommandResult<Value>) -> CommandOutcome {
        match result {
            Ok(next) => {
                if self.commit(name, next) {
                    CommandOutcome::Changed
                } else {
                    CommandOutcome::Unchanged
                }
            }
            Err(CommandError::UserCancelled) => {
                debug!(command = name, "Cancelled");
                CommandOutcome::Cancelled
            }
            Err(e) => {
                warn!(command = name, error = %e, "Command rejected");
                CommandOutcome::Rejected(e)
            }
        }
    }

    /// Store `next` and notify subscribers; false when nothing changed
    fn commit(&mut self, name: &str, next: Value) -> bool {
        if next == self.value {
            debug!(command = name, "No change");
            return false;
        }
        self.value = next;
        self.version += 1;
        info!(command = name, version = self.version, "Committed");

        let value = &self.value;
        let version = self.version;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(value, version);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const VALUE: &str = r#"{ "document": { "nodes": [
        { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "hello world" }] }
    ] }, "selection": { "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 5 } } }"#;

    #[test]
    fn test_subscribers_see_changes() {
        let mut editor = Editor::from_json(VALUE, EditorConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = editor.subscribe(move |_, version| sink.borrow_mut().push(version));

        assert!(editor.on_click_mark(MarkType::Bold).is_changed());
        assert!(editor.unsubscribe(id));
        assert!(!editor.unsubscribe(id));
        editor.on_click_mark(MarkType::Bold);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(editor.version(), 2);
    }

    #[test]
    fn test_rejected_command_keeps_value() {
        let mut editor = Editor::from_json(VALUE, EditorConfig::default()).unwrap();
        let before = editor.value().clone();

        let outcome = editor.submit(Command::InsertText { text: "x".to_string() });

        assert!(matches!(outcome, CommandOutcome::Rejected(CommandError::InvalidSelection(_))));
        assert_eq!(editor.value(), &before);
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_hotkeys_and_toolbar() {
        let mut editor = Editor::from_json(VALUE, EditorConfig::default()).unwrap();

        assert_eq!(editor.on_key_down(&KeyEvent::new("b").with_ctrl()), EventOutcome::Handled);
        assert_eq!(editor.on_key_down(&KeyEvent::new("b")), EventOutcome::PassThrough);

        assert!(editor.toolbar().is_active("bold"));
        assert_eq!(
            editor.render_html(&HtmlOptions::default()),
            "<p><strong>hello</strong> world</p>\n"
        );
    }

    #[test]
    fn test_paste_respects_config() {
        let config = EditorConfig {
            auto_link_on_paste: false,
            ..EditorConfig::default()
        };
        let mut editor = Editor::from_json(VALUE, config).unwrap();

        assert_eq!(editor.on_paste(&Transfer::text("example.com")), EventOutcome::PassThrough);
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_invalid_snapshot_rejected_at_load() {
        let loose_item = r#"{ "document": { "nodes": [
            { "object": "block", "type": "list-item", "nodes": [{ "object": "text", "text": "loose" }] }
        ] } }"#;
        let empty_block = r#"{ "document": { "nodes": [
            { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "x" }] },
            { "object": "block", "type": "heading-one", "nodes": [] }
        ] } }"#;

        for json in [loose_item, empty_block] {
            let result = Editor::from_json(json, EditorConfig::default());
            assert!(matches!(
                result,
                Err(EditorError::Command(CommandError::SchemaViolation(_)))
            ));
        }
    }

    #[test]
    fn test_cancelled_prompt() {
        let mut editor = Editor::from_json(VALUE, EditorConfig::default()).unwrap();
        let mut cancel = |_: &str| -> Option<String> { None };

        assert!(matches!(editor.on_click_link(&mut cancel), CommandOutcome::Cancelled));
        assert_eq!(editor.version(), 0);
    }
}
