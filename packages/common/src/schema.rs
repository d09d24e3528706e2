//! # Document Schema
//!
//! Structural rules every committed document must satisfy:
//!
//! - top-level nodes are blocks, never `list-item`
//! - list containers hold only (and at least one) `list-item`
//! - `list-item` lives directly inside a list container
//! - leaf blocks and inlines hold only text/inline children
//! - a link never contains another link

use crate::error::CommonError;
use crate::result::CommonResult;
use crate::visitor::{walk_children, Visitor};
use prose_model::{BlockType, Document, InlineType, MarkSet, Node, NodeKey};
use serde::Serialize;

/// One schema rule broken at one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    pub key: NodeKey,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    List,
    Leaf,
    Inline(InlineType),
}

/// Collects schema issues in document order
#[derive(Debug, Default)]
pub struct SchemaValidator {
    scopes: Vec<Scope>,
    issues: Vec<SchemaIssue>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_issues(self) -> Vec<SchemaIssue> {
        self.issues
    }

    fn report(&mut self, key: NodeKey, message: impl Into<String>) {
        self.issues.push(SchemaIssue {
            key,
            message: message.into(),
        });
    }

    fn inside_link(&self) -> bool {
        self.scopes.contains(&Scope::Inline(InlineType::Link))
    }
}

impl Visitor for SchemaValidator {
    fn visit_block(&mut self, doc: &Document, node: &Node, block_type: BlockType) {
        let parent = self.scopes.last().copied();
        match (parent, block_type) {
            (None, BlockType::ListItem) => {
                self.report(node.key, "list-item at document root")
            }
            (None, _) => {}
            (Some(Scope::List), BlockType::ListItem) => {}
            (Some(Scope::List), other) => {
                self.report(node.key, format!("{} inside a list container", other))
            }
            (Some(Scope::Leaf), other) => {
                self.report(node.key, format!("{} nested in a leaf block", other))
            }
            (Some(Scope::Inline(_)), other) => {
                self.report(node.key, format!("{} inside an inline", other))
            }
        }

        if node.children().is_empty() {
            self.report(node.key, format!("empty {}", block_type));
        }

        self.scopes.push(if block_type.is_list() {
            Scope::List
        } else {
            Scope::Leaf
        });
        walk_children(self, doc, node);
        self.scopes.pop();
    }

    fn visit_inline(&mut self, doc: &Document, node: &Node, inline_type: InlineType) {
        let parent = self.scopes.last().copied();
        match parent {
            None => self.report(node.key, format!("{} at document root", inline_type)),
            Some(Scope::List) => {
                self.report(node.key, format!("{} inside a list container", inline_type))
            }
            Some(_) => {}
        }
        if inline_type == InlineType::Link && self.inside_link() {
            self.report(node.key, "link nested inside another link");
        }
        if node.children().is_empty() {
            self.report(node.key, format!("empty {}", inline_type));
        }

        self.scopes.push(Scope::Inline(inline_type));
        walk_children(self, doc, node);
        self.scopes.pop();
    }

    fn visit_text(&mut self, node: &Node, _text: &str, _marks: &MarkSet) {
        let parent = self.scopes.last().copied();
        match parent {
            None => self.report(node.key, "text at document root"),
            Some(Scope::List) => self.report(node.key, "text inside a list container"),
            Some(_) => {}
        }
    }
}

/// All schema issues in `doc`
pub fn schema_issues(doc: &Document) -> Vec<SchemaIssue> {
    let mut validator = SchemaValidator::new();
    validator.visit_document(doc);
    validator.into_issues()
}

/// Fail with every issue found, or succeed on a well-formed document
pub fn validate_schema(doc: &Document) -> CommonResult<()> {
    let issues = schema_issues(doc);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CommonError::Schema(issues))
    }
}

/// One-line summary of `issues`, e.g. for error messages
pub fn describe_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} (node {})", i.message, i.key))
        .collect::<Vec<_>>()
        .join("; ")
}
