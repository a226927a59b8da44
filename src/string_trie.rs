use crate::error::Result;
use crate::search::{PrefixMatch, SearchHit};
use crate::trie::{Items, Trie};

/// A [`Trie`] keyed by `char` sequences, with `&str`-based convenience
/// methods layered over the generic token API.
///
/// `StringTrie<V>` is a thin wrapper, not a separate data structure:
/// `StringTrie::new().as_trie()` is a plain `Trie<char, V>`, so
/// `to_regex`, `link_nodes`, and `search` all behave exactly as
/// documented on `Trie`.
#[derive(Debug, Clone, Default)]
pub struct StringTrie<V> {
    inner: Trie<char, V>,
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

impl<V> StringTrie<V> {
    pub fn new() -> Self {
        StringTrie { inner: Trie::new() }
    }

    pub fn as_trie(&self) -> &Trie<char, V> {
        &self.inner
    }

    pub fn as_trie_mut(&mut self) -> &mut Trie<char, V> {
        &mut self.inner
    }

    pub fn insert(&mut self, key: &str, value: V) -> Result<()> {
        self.inner.insert(&chars(key), value)
    }

    pub fn get(&self, key: &str) -> Result<&V> {
        self.inner.get(&chars(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        self.inner.get_mut(&chars(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(&chars(key))
    }

    pub fn delete(&mut self, key: &str) -> Result<V> {
        self.inner.delete(&chars(key))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn link_nodes(&mut self) -> Result<()> {
        self.inner.link_nodes()
    }

    pub fn unlink_nodes(&mut self) {
        self.inner.unlink_nodes()
    }

    pub fn to_regex(&self) -> String {
        self.inner.to_regex()
    }

    pub fn items(&self, prefix: &str) -> Result<Items<'_, char, V>> {
        self.inner.items(&chars(prefix))
    }

    /// Find every occurrence of a stored key in `text`.
    ///
    /// Collects eagerly (the `char` buffer built from `text` is a
    /// function-local temporary); callers who want a lazy iterator over
    /// a long-lived host should build the `Vec<char>` themselves and
    /// call `as_trie().search(..)` directly.
    pub fn search(&self, text: &str) -> Vec<SearchHit<'_, V>> {
        let owned = chars(text);
        self.inner.search(&owned).collect()
    }

    /// Every stored key that is a prefix of `sequence`, in increasing
    /// length order.
    pub fn match_prefixes(&self, sequence: &str) -> Vec<PrefixMatch<'_, V>> {
        let owned = chars(sequence);
        self.inner.match_prefixes(&owned).collect()
    }
}
