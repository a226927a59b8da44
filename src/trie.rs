use std::hash::Hash;

use crate::error::{Result, TrieError};
use crate::node::{Node, NodeId};
use crate::state::LinkState;

/// A sequence-indexed associative container.
///
/// `Trie<T, V>` maps finite sequences of tokens `T` to values `V`. While
/// `Unlinked` it behaves like an ordinary dictionary keyed by sequences:
/// insert, lookup, delete, and prefix enumeration are all supported and
/// unanchored `search` falls back to a naive scan. Calling
/// [`Trie::link_nodes`] computes Aho-Corasick failure and dictionary
/// links (see `src/link.rs`) and freezes the trie against further
/// mutation; [`Trie::search`] then runs in time linear in the host text.
///
/// Nodes live in a flat arena (`Vec<Node<T, V>>`); `failure` and
/// `dictionary` links are plain indices into that arena rather than
/// owning references, so the whole structure can be freed uniformly
/// with the arena and no reference cycle ever needs to be broken by
/// hand.
#[derive(Debug, Clone)]
pub struct Trie<T, V> {
    pub(crate) arena: Vec<Node<T, V>>,
    pub(crate) length: usize,
    pub(crate) state: LinkState,
}

pub(crate) const ROOT: NodeId = 0;

impl<T, V> Default for Trie<T, V>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Trie<T, V>
where
    T: Clone + Eq + Hash,
{
    /// Create an empty, `Unlinked` trie.
    pub fn new() -> Self {
        Trie {
            arena: vec![Node::root()],
            length: 0,
            state: LinkState::Unlinked,
        }
    }

    /// Current link state. See [`LinkState`].
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Number of stored keys. O(1); maintained incrementally by
    /// `insert`/`delete`.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Recompute the terminal count by scanning the arena, refresh the
    /// cached counter, and return it.
    pub fn count(&mut self) -> usize {
        let n = self.arena.iter().filter(|node| node.is_terminal()).count();
        self.length = n;
        n
    }

    fn ensure_mutable(&self) -> Result<()> {
        match self.state {
            LinkState::Linked => Err(TrieError::FrozenMutation),
            LinkState::Unlinked => Ok(()),
        }
    }

    /// Walk from the root along `key`, returning the node id for that
    /// exact path if every edge exists.
    pub(crate) fn lookup_node(&self, key: &[T]) -> Option<NodeId> {
        let mut current = ROOT;
        for token in key {
            current = self.arena[current].child(token)?;
        }
        Some(current)
    }

    /// Insert `value` at `key`, creating any missing intermediate nodes.
    /// Overwrites an existing value without changing `len()`.
    pub fn insert(&mut self, key: &[T], value: V) -> Result<()> {
        self.ensure_mutable()?;
        if key.is_empty() {
            return Err(TrieError::InvalidKey);
        }
        let mut current = ROOT;
        for token in key {
            current = match self.arena[current].child(token) {
                Some(id) => id,
                None => {
                    let depth = self.arena[current].depth + 1;
                    let new_id = self.arena.len();
                    self.arena.push(Node::new(depth));
                    self.arena[current].children.insert(token.clone(), new_id);
                    new_id
                }
            };
        }
        if self.arena[current].value.is_none() {
            self.length += 1;
        }
        self.arena[current].value = Some(value);
        Ok(())
    }

    /// Look up the value stored at `key`.
    pub fn get(&self, key: &[T]) -> Result<&V> {
        let id = self.lookup_node(key).ok_or(TrieError::NotFound)?;
        self.arena[id].value.as_ref().ok_or(TrieError::NotFound)
    }

    /// Mutable variant of [`Trie::get`].
    pub fn get_mut(&mut self, key: &[T]) -> Result<&mut V> {
        let id = self.lookup_node(key).ok_or(TrieError::NotFound)?;
        self.arena[id].value.as_mut().ok_or(TrieError::NotFound)
    }

    pub fn contains(&self, key: &[T]) -> bool {
        self.get(key).is_ok()
    }

    /// Remove and return the value at `key`, pruning any branch of
    /// childless, non-terminal nodes this leaves behind (invariant I3).
    pub fn delete(&mut self, key: &[T]) -> Result<V> {
        self.ensure_mutable()?;
        if key.is_empty() {
            return Err(TrieError::InvalidKey);
        }

        let mut ancestors = vec![ROOT];
        let mut current = ROOT;
        for token in key {
            current = self.arena[current]
                .child(token)
                .ok_or(TrieError::NotFound)?;
            ancestors.push(current);
        }

        let value = self.arena[current].value.take().ok_or(TrieError::NotFound)?;
        self.length -= 1;

        for i in (0..key.len()).rev() {
            let node_id = ancestors[i + 1];
            let node = &self.arena[node_id];
            if node.is_leaf() && !node.is_terminal() {
                let parent_id = ancestors[i];
                self.arena[parent_id].children.remove(&key[i]);
            } else {
                break;
            }
        }

        Ok(value)
    }

    /// Get the value at `key`, or insert and return `default()` if
    /// absent.
    pub fn setdefault<F>(&mut self, key: &[T], default: F) -> Result<&V>
    where
        F: FnOnce() -> V,
    {
        if !self.contains(key) {
            self.insert(key, default())?;
        }
        self.get(key)
    }

    /// Remove `key`, returning `default` instead of an error if absent.
    pub fn pop_or(&mut self, key: &[T], default: V) -> V {
        self.delete(key).unwrap_or(default)
    }

    /// Insert every `(key, value)` pair.
    pub fn update<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (Vec<T>, V)>,
    {
        for (key, value) in pairs {
            self.insert(&key, value)?;
        }
        Ok(())
    }

    /// Reset the trie to empty. Requires `Unlinked` state, like any
    /// other mutation.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.arena.clear();
        self.arena.push(Node::root());
        self.length = 0;
        Ok(())
    }

    /// Enumerate every stored `(key, value)` pair whose key starts with
    /// `prefix` (the whole trie if `prefix` is empty). A `prefix` that
    /// names no node at all is `NotFound`; an existing prefix node with
    /// no terminals beneath it yields an empty iterator.
    pub fn items(&self, prefix: &[T]) -> Result<Items<'_, T, V>> {
        let root = self.lookup_node(prefix).ok_or(TrieError::NotFound)?;
        Ok(Items {
            arena: &self.arena,
            stack: vec![(root, prefix.to_vec())],
        })
    }

    pub fn keys(&self) -> Items<'_, T, V> {
        self.items(&[]).expect("root always exists")
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.keys().map(|(_, v)| v)
    }
}

impl<T, V> Trie<T, V>
where
    T: Clone + Eq + Hash,
    V: Clone,
{
    /// Remove and return the value at `key`.
    pub fn pop(&mut self, key: &[T]) -> Result<V> {
        self.delete(key)
    }

    /// Build a fresh, `Unlinked` copy by replaying this trie's
    /// `(key, value)` pairs through `insert` on a new container.
    /// Values are cloned; whether mutating a cloned value is visible in
    /// the source follows from `V`'s own `Clone` semantics.
    pub fn copy(&self) -> Self {
        let mut out = Trie::new();
        for (key, value) in self.keys() {
            out.insert(&key, value.clone()).expect("fresh trie is unlinked");
        }
        out
    }
}

/// Lazy depth-first enumeration of `(key, value)` pairs, produced by
/// [`Trie::items`]/[`Trie::keys`].
pub struct Items<'a, T, V> {
    arena: &'a [Node<T, V>],
    stack: Vec<(NodeId, Vec<T>)>,
}

impl<'a, T, V> Iterator for Items<'a, T, V>
where
    T: Clone + Eq + Hash,
{
    type Item = (Vec<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, path)) = self.stack.pop() {
            let node = &self.arena[id];
            for (token, &child_id) in node.children.iter() {
                let mut child_path = path.clone();
                child_path.push(token.clone());
                self.stack.push((child_id, child_path));
            }
            if let Some(value) = node.value.as_ref() {
                return Some((path, value));
            }
        }
        None
    }
}
