use prose_model::{BlockType, Document, InlineType, MarkSet, Node, NodeKey, NodeKind};

/// Visitor pattern for traversing the document tree immutably
///
/// This trait provides default implementations that walk the entire tree
/// in document order. Override specific visit_* methods to act on nodes;
/// call the matching `walk_*` function to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_block(&mut self, doc: &Document, node: &Node, _block_type: BlockType) {
        walk_children(self, doc, node);
    }

    fn visit_inline(&mut self, doc: &Document, node: &Node, _inline_type: InlineType) {
        walk_children(self, doc, node);
    }

    fn visit_text(&mut self, _node: &Node, _text: &str, _marks: &MarkSet) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for root in doc.roots() {
        walk_node(visitor, doc, *root);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, doc: &Document, key: NodeKey) {
    let Some(node) = doc.get(key) else {
        return;
    };

    match &node.kind {
        NodeKind::Block { block_type, .. } => visitor.visit_block(doc, node, *block_type),
        NodeKind::Inline { inline_type, .. } => visitor.visit_inline(doc, node, *inline_type),
        NodeKind::Text { text, marks } => visitor.visit_text(node, text, marks),
    }
}

pub fn walk_children<V: Visitor>(visitor: &mut V, doc: &Document, node: &Node) {
    for child in node.children() {
        walk_node(visitor, doc, *child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        blocks: usize,
        inlines: usize,
        texts: usize,
    }

    impl Visitor for Counter {
        fn visit_block(&mut self, doc: &Document, node: &Node, _block_type: BlockType) {
            self.blocks += 1;
            walk_children(self, doc, node);
        }

        fn visit_inline(&mut self, doc: &Document, node: &Node, _inline_type: InlineType) {
            self.inlines += 1;
            walk_children(self, doc, node);
        }

        fn visit_text(&mut self, _node: &Node, _text: &str, _marks: &MarkSet) {
            self.texts += 1;
        }
    }

    #[test]
    fn test_counts_every_node() {
        let doc = Document::from_json(
            r#"{ "nodes": [
                { "object": "block", "type": "bulleted-list", "nodes": [
                    { "object": "block", "type": "list-item", "nodes": [
                        { "object": "text", "text": "see " },
                        { "object": "inline", "type": "link", "data": { "href": "https://a.io" },
                          "nodes": [{ "object": "text", "text": "here" }] }
                    ] }
                ] }
            ] }"#,
        )
        .unwrap();

        let mut counter = Counter::default();
        counter.visit_document(&doc);

        assert_eq!(counter.blocks, 2);
        assert_eq!(counter.inlines, 1);
        assert_eq!(counter.texts, 2);
    }
}
