//! # Link Command Processor
//!
//! Wraps selected text in `link` inlines, unwraps links, and turns a pasted
//! URL into a link over the selection. Links never nest: a wrap over text
//! that already sits in a link is skipped.

use crate::edit::{commit, isolate_range, touched_texts};
use crate::errors::{CommandError, CommandResult};
use crate::insert::insert_at;
use crate::queries::has_inline_of_type;
use crate::selection::SelectionView;
use crate::url::is_url;
use prose_model::{Document, InlineType, ModelError, Node, NodeKey, NodeKind, Point, Range, Selection, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Labels shown when asking the user for link details
pub const URL_PROMPT: &str = "Enter the URL of the link:";
pub const TEXT_PROMPT: &str = "Enter the text for the link:";

/// Asks the user for a line of text; `None` means they cancelled
pub trait Prompt {
    fn prompt_for_text(&mut self, label: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt_for_text(&mut self, label: &str) -> Option<String> {
        self(label)
    }
}

/// What the clipboard carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Text,
    Html,
    Files,
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub kind: TransferKind,
    #[serde(default)]
    pub text: Option<String>,
}

impl Transfer {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: TransferKind::Text,
            text: Some(text.into()),
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            kind: TransferKind::Html,
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PasteOutcome {
    /// The paste became a link; commit this value
    Handled(Value),
    /// Let the default paste behaviour run
    PassThrough,
}

fn is_link(node: &Node) -> bool {
    node.inline_type() == Some(InlineType::Link)
}

fn link_shell(href: &str) -> NodeKind {
    let mut data = BTreeMap::new();
    data.insert("href".to_string(), href.to_string());
    NodeKind::Inline {
        inline_type: InlineType::Link,
        data,
        children: Vec::new(),
    }
}

/// Wrap the expanded selection in one link per leaf block and collapse the
/// cursor to just after the last link
#[instrument(skip(value))]
pub fn wrap_link(value: &Value, href: &str) -> CommandResult<Value> {
    let view = SelectionView::new(value)?;
    if view.is_empty() {
        return Ok(value.clone());
    }

    let mut doc = value.document.clone();
    let range = isolate_range(&mut doc, view.range())?;
    let texts = touched_texts(&doc, range)?;

    if texts
        .iter()
        .any(|t| doc.nearest_ancestor_matching(*t, is_link).is_some())
    {
        warn!(href, "Skipped link wrap over text already inside a link");
        return Ok(value.clone());
    }

    let mut groups: Vec<(NodeKey, Vec<usize>)> = Vec::new();
    for text in &texts {
        let (Some(parent), Some(index)) = (doc.parent(*text), doc.index_in_parent(*text)) else {
            continue;
        };
        match groups.iter_mut().find(|(p, _)| *p == parent) {
            Some((_, indices)) => indices.push(index),
            None => groups.push((parent, vec![index])),
        }
    }

    let mut last_link = None;
    for (parent, indices) in &groups {
        let (Some(first), Some(last)) = (indices.iter().min(), indices.iter().max()) else {
            continue;
        };
        last_link = Some(doc.wrap_siblings(Some(*parent), *first, *last, link_shell(href))?);
    }

    let Some(link) = last_link else {
        return Ok(value.clone());
    };
    let cursor = point_after(&doc, link)?;
    debug!(links = groups.len(), link = %link, "Wrapped link");

    commit(doc, Selection::collapsed(cursor))
}

/// Start of the next sibling text, or the end of the link's last text
fn point_after(doc: &Document, link: NodeKey) -> CommandResult<Point> {
    let siblings = doc.siblings(doc.parent(link));
    let next = doc
        .index_in_parent(link)
        .and_then(|i| siblings.get(i + 1))
        .copied()
        .filter(|k| doc.get(*k).map(Node::is_text).unwrap_or(false));
    if let Some(next) = next {
        return Ok(Point::new(next, 0));
    }

    let last = doc
        .texts_within(link)
        .last()
        .copied()
        .ok_or_else(|| ModelError::InvalidStructure(format!("link {} holds no text", link)))?;
    Ok(Point::new(last, doc.text_len(last)?))
}

/// Remove the nearest enclosing link of every text under the selection
#[instrument(skip(value))]
pub fn unwrap_link(value: &Value) -> CommandResult<Value> {
    let view = SelectionView::new(value)?;
    let mut doc = value.document.clone();

    let mut links: Vec<NodeKey> = Vec::new();
    for text in view.texts_in_span() {
        if let Some(link) = doc.nearest_ancestor_matching(text, is_link) {
            if !links.contains(&link.key) {
                links.push(link.key);
            }
        }
    }
    for link in &links {
        doc.unwrap_node(*link)?;
    }
    debug!(links = links.len(), "Unwrapped links");

    commit(doc, value.selection.clone())
}

fn pasted_url(transfer: &Transfer) -> CommandResult<&str> {
    if !matches!(transfer.kind, TransferKind::Text | TransferKind::Html) {
        return Err(CommandError::InvalidPasteContent(format!(
            "{:?} transfer",
            transfer.kind
        )));
    }
    let text = transfer.text.as_deref().map(str::trim).unwrap_or_default();
    if is_url(text) {
        Ok(text)
    } else {
        Err(CommandError::InvalidPasteContent(format!("not a url: {:?}", text)))
    }
}

/// Turn a pasted URL into a link over the expanded selection, replacing any
/// link the selection touches
#[instrument(skip(value, transfer), fields(kind = ?transfer.kind))]
pub fn on_paste_auto_link(value: &Value, transfer: &Transfer) -> CommandResult<PasteOutcome> {
    let view = SelectionView::new(value)?;
    if view.is_empty() {
        return Ok(PasteOutcome::PassThrough);
    }

    let href = match pasted_url(transfer) {
        Ok(href) => href,
        Err(CommandError::InvalidPasteContent(reason)) => {
            debug!(%reason, "Paste is not a link");
            return Ok(PasteOutcome::PassThrough);
        }
        Err(e) => return Err(e),
    };

    let base = if has_inline_of_type(value, InlineType::Link) {
        unwrap_link(value)?
    } else {
        value.clone()
    };
    let linked = wrap_link(&base, href)?;
    info!(href, "Auto-linked paste");
    Ok(PasteOutcome::Handled(linked))
}

/// Link button: unwrap when a link is selected, otherwise ask for the
/// details and create one
#[instrument(skip(value, prompt))]
pub fn on_click_link(
    value: &Value,
    prompt: &mut dyn Prompt,
    url_label: &str,
    text_label: &str,
) -> CommandResult<Value> {
    if has_inline_of_type(value, InlineType::Link) {
        return unwrap_link(value);
    }

    let view = SelectionView::new(value)?;
    if !view.is_empty() {
        let href = prompt
            .prompt_for_text(url_label)
            .ok_or(CommandError::UserCancelled)?;
        return wrap_link(value, &href);
    }

    let href = prompt
        .prompt_for_text(url_label)
        .ok_or(CommandError::UserCancelled)?;
    let text = prompt
        .prompt_for_text(text_label)
        .filter(|t| !t.is_empty())
        .ok_or(CommandError::UserCancelled)?;

    let mut doc = value.document.clone();
    let inserted: Range = insert_at(
        &mut doc,
        view.range().start,
        &text,
        value.selection.marks.as_ref(),
    )?;
    // backward, focus at the start of the new text
    let selected = commit(doc, Selection::from_range(inserted, true))?;
    wrap_link(&selected, &href)
}
