use thiserror::Error;

/// Errors produced by [`crate::Trie`] and [`crate::Radix`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The requested key (or prefix) has no corresponding node or value.
    #[error("key not found")]
    NotFound,

    /// An empty key was supplied where a non-empty sequence is required.
    #[error("empty keys are not allowed")]
    InvalidKey,

    /// A mutating operation was attempted while the trie is linked.
    ///
    /// Call [`crate::Trie::unlink_nodes`] to allow mutation again.
    #[error("trie is linked; call unlink_nodes() before mutating")]
    FrozenMutation,
}

/// Convenience alias for fallible trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;
