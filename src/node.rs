use std::collections::HashMap;
use std::hash::Hash;

/// Index of a [`Node`] within a [`crate::Trie`]'s arena.
pub type NodeId = usize;

/// A single node in the trie arena.
///
/// `failure` and `dictionary` are non-owning back references: they are
/// plain arena indices, never participate in drop order, and are only
/// meaningful while the owning trie is `Linked`.
#[derive(Debug, Clone)]
pub struct Node<T, V> {
    pub children: HashMap<T, NodeId>,
    pub value: Option<V>,
    /// Length of the path from the root to this node. The root is `-1`
    /// by convention so that `i - depth` is a 0-based match start index.
    pub depth: isize,
    pub failure: Option<NodeId>,
    pub dictionary: Option<NodeId>,
}

impl<T, V> Node<T, V>
where
    T: Eq + Hash,
{
    pub fn new(depth: isize) -> Self {
        Node {
            children: HashMap::new(),
            value: None,
            depth,
            failure: None,
            dictionary: None,
        }
    }

    pub fn root() -> Self {
        Node::new(-1)
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    pub fn child(&self, token: &T) -> Option<NodeId> {
        self.children.get(token).copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
