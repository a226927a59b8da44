/// Whether a trie's Aho-Corasick links are installed.
///
/// A trie starts `Unlinked`: it may be freely mutated and searches fall
/// back to a naive, re-walk-from-every-start-position algorithm. Calling
/// `link_nodes` computes failure and dictionary links for every node and
/// transitions the trie to `Linked`, after which mutation is rejected
/// until `unlink_nodes` is called again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Unlinked,
    Linked,
}

impl Default for LinkState {
    fn default() -> Self {
        LinkState::Unlinked
    }
}
