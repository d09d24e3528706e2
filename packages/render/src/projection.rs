//! # Render Projection
//!
//! Maps document nodes to [`VNode`]s. Rendering runs through a stack of
//! [`RenderHooks`]; each hook either produces a node or hands the props to
//! `next`, and the bottom of the stack is the substrate default (`div` for
//! blocks, `span` for inlines and marks).
//!
//! ```text
//! custom hooks ──next──► StandardHooks ──next──► default
//! ```

use crate::vdom::{RenderedDocument, VNode};
use prose_model::{BlockType, Document, InlineType, MarkType, Node, NodeKey, NodeKind};
use tracing::debug;

/// What a hook receives: the node being rendered and its rendered content
pub struct RenderProps<'a> {
    pub node: &'a Node,
    pub children: Vec<VNode>,
}

/// Continuation to the next hook in the stack
pub type Next<'n> = &'n dyn for<'p> Fn(RenderProps<'p>) -> VNode;

pub trait RenderHooks {
    fn render_block(&self, _block_type: BlockType, props: RenderProps<'_>, next: Next<'_>) -> VNode {
        next(props)
    }

    fn render_inline(&self, _inline_type: InlineType, props: RenderProps<'_>, next: Next<'_>) -> VNode {
        next(props)
    }

    /// `props.node` is the text node carrying the mark
    fn render_mark(&self, _mark: MarkType, props: RenderProps<'_>, next: Next<'_>) -> VNode {
        next(props)
    }
}

/// Semantic HTML for every built-in node type
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardHooks;

impl RenderHooks for StandardHooks {
    fn render_block(&self, block_type: BlockType, props: RenderProps<'_>, _next: Next<'_>) -> VNode {
        let tag = match block_type {
            BlockType::Paragraph => "p",
            BlockType::HeadingOne => "h1",
            BlockType::HeadingTwo => "h2",
            BlockType::BlockQuote => "blockquote",
            BlockType::BulletedList => "ul",
            BlockType::NumberedList => "ol",
            BlockType::ListItem => "li",
        };
        VNode::element(tag)
            .with_key(props.node.key.to_string())
            .with_children(props.children)
    }

    fn render_inline(&self, inline_type: InlineType, props: RenderProps<'_>, _next: Next<'_>) -> VNode {
        match inline_type {
            InlineType::Link => {
                let href = props.node.data("href").unwrap_or_default().to_string();
                VNode::element("a")
                    .with_key(props.node.key.to_string())
                    .with_attr("href", href)
                    .with_children(props.children)
            }
        }
    }

    fn render_mark(&self, mark: MarkType, props: RenderProps<'_>, _next: Next<'_>) -> VNode {
        let tag = match mark {
            MarkType::Bold => "strong",
            MarkType::Italic => "em",
            MarkType::Code => "code",
        };
        VNode::element(tag).with_children(props.children)
    }
}

fn default_block(props: RenderProps<'_>) -> VNode {
    VNode::element("div")
        .with_key(props.node.key.to_string())
        .with_children(props.children)
}

fn default_inline(props: RenderProps<'_>) -> VNode {
    VNode::element("span")
        .with_key(props.node.key.to_string())
        .with_children(props.children)
}

fn default_mark(props: RenderProps<'_>) -> VNode {
    VNode::element("span").with_children(props.children)
}

/// Renders documents through a stack of hooks
pub struct Renderer {
    hooks: Vec<Box<dyn RenderHooks>>,
}

impl Renderer {
    /// Standard semantic rendering
    pub fn new() -> Self {
        Self {
            hooks: vec![Box::new(StandardHooks)],
        }
    }

    /// Substrate defaults only
    pub fn bare() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Push hooks that run before the ones already registered
    pub fn with_hooks(mut self, hooks: impl RenderHooks + 'static) -> Self {
        self.hooks.insert(0, Box::new(hooks));
        self
    }

    pub fn render_document(&self, doc: &Document) -> RenderedDocument {
        let nodes: Vec<VNode> = doc
            .roots()
            .iter()
            .filter_map(|k| self.render_node(doc, *k))
            .collect();
        debug!(blocks = nodes.len(), hooks = self.hooks.len(), "Rendered document");
        RenderedDocument { nodes }
    }

    pub fn render_node(&self, doc: &Document, key: NodeKey) -> Option<VNode> {
        let node = doc.get(key)?;
        let rendered = match &node.kind {
            NodeKind::Block { block_type, .. } => {
                let children = self.render_children(doc, node);
                self.block_at(0, *block_type, RenderProps { node, children })
            }
            NodeKind::Inline { inline_type, .. } => {
                let children = self.render_children(doc, node);
                self.inline_at(0, *inline_type, RenderProps { node, children })
            }
            NodeKind::Text { text, marks } => {
                marks.iter().fold(VNode::text(text.clone()), |inner, mark| {
                    self.mark_at(
                        0,
                        *mark,
                        RenderProps {
                            node,
                            children: vec![inner],
                        },
                    )
                })
            }
        };
        Some(rendered)
    }

    fn render_children(&self, doc: &Document, node: &Node) -> Vec<VNode> {
        node.children()
            .iter()
            .filter_map(|c| self.render_node(doc, *c))
            .collect()
    }

    fn block_at(&self, index: usize, block_type: BlockType, props: RenderProps<'_>) -> VNode {
        match self.hooks.get(index) {
            Some(hooks) => hooks.render_block(block_type, props, &|p: RenderProps<'_>| {
                self.block_at(index + 1, block_type, p)
            }),
            None => default_block(props),
        }
    }

    fn inline_at(&self, index: usize, inline_type: InlineType, props: RenderProps<'_>) -> VNode {
        match self.hooks.get(index) {
            Some(hooks) => hooks.render_inline(inline_type, props, &|p: RenderProps<'_>| {
                self.inline_at(index + 1, inline_type, p)
            }),
            None => default_inline(props),
        }
    }

    fn mark_at(&self, index: usize, mark: MarkType, props: RenderProps<'_>) -> VNode {
        match self.hooks.get(index) {
            Some(hooks) => hooks.render_mark(mark, props, &|p: RenderProps<'_>| {
                self.mark_at(index + 1, mark, p)
            }),
            None => default_mark(props),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
