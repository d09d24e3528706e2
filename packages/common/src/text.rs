use crate::visitor::{walk_children, walk_node, Visitor};
use prose_model::{BlockType, Document, MarkSet, Node, NodeKey};

/// Concatenates text content; leaf blocks are separated by newlines
#[derive(Debug, Default)]
pub struct PlainText {
    out: String,
    blocks_seen: usize,
}

impl PlainText {
    pub fn finish(self) -> String {
        self.out
    }
}

impl Visitor for PlainText {
    fn visit_block(&mut self, doc: &Document, node: &Node, block_type: BlockType) {
        if block_type.is_leaf() {
            if self.blocks_seen > 0 {
                self.out.push('\n');
            }
            self.blocks_seen += 1;
        }
        walk_children(self, doc, node);
    }

    fn visit_text(&mut self, _node: &Node, text: &str, _marks: &MarkSet) {
        self.out.push_str(text);
    }
}

/// Text of the whole document
pub fn plain_text(doc: &Document) -> String {
    let mut collector = PlainText::default();
    collector.visit_document(doc);
    collector.finish()
}

/// Text under one node
pub fn node_text(doc: &Document, key: NodeKey) -> String {
    let mut collector = PlainText::default();
    walk_node(&mut collector, doc, key);
    collector.finish()
}

/// Flatten text into `(char, marks)` pairs; two documents with equal
/// runs render identically regardless of how their text nodes are split
pub fn mark_runs(doc: &Document) -> Vec<(char, MarkSet)> {
    doc.texts()
        .into_iter()
        .filter_map(|k| doc.get(k))
        .flat_map(|node| {
            let marks = node.marks().cloned().unwrap_or_default();
            node.text()
                .unwrap_or_default()
                .chars()
                .map(move |c| (c, marks.clone()))
                .collect::<Vec<_>>()
        })
        .collect()
}
