use crate::node::NodeKey;

/// Sequential key generator for nodes within a document
///
/// Keys are never reused, so a key removed from the tree can't
/// silently alias a node created later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyGenerator {
    count: u32,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Generate next sequential key
    pub fn new_key(&mut self) -> NodeKey {
        self.count += 1;
        NodeKey(self.count)
    }
}
