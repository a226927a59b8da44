use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Result, TrieError};
use crate::state::LinkState;

type NodeId = usize;
const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Edge<T> {
    label: Vec<T>,
    target: NodeId,
}

#[derive(Debug, Clone)]
struct RadixNode<T, V> {
    children: HashMap<T, Edge<T>>,
    value: Option<V>,
}

impl<T, V> RadixNode<T, V>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        RadixNode {
            children: HashMap::new(),
            value: None,
        }
    }

    fn is_terminal(&self) -> bool {
        self.value.is_some()
    }
}

/// A compressed (radix) sequence-indexed container.
///
/// Stores the same associative surface as [`crate::Trie`] (insert, get,
/// contains, delete, items, len, count, copy), but collapses any maximal
/// run of non-branching, non-terminal single-token edges into one edge
/// labelled by the concatenated token run.
///
/// `Radix` does not compute Aho-Corasick links and has no `search`: the
/// automaton is defined only over the uncompressed trie. A caller that
/// needs both compact storage and multi-pattern search builds a
/// [`crate::Trie`] for linking and a `Radix` for storage separately.
#[derive(Debug, Clone)]
pub struct Radix<T, V> {
    arena: Vec<RadixNode<T, V>>,
    length: usize,
    state: LinkState,
}

impl<T, V> Default for Radix<T, V>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

fn common_prefix_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

impl<T, V> Radix<T, V>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Radix {
            arena: vec![RadixNode::new()],
            length: 0,
            state: LinkState::Unlinked,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn count(&mut self) -> usize {
        let n = self.arena.iter().filter(|n| n.is_terminal()).count();
        self.length = n;
        n
    }

    fn ensure_mutable(&self) -> Result<()> {
        match self.state {
            LinkState::Linked => Err(TrieError::FrozenMutation),
            LinkState::Unlinked => Ok(()),
        }
    }

    /// Walk edges exactly matching `key`; `None` if `key` is not a path
    /// landing exactly on a node (mid-edge positions don't count).
    fn lookup_path(&self, key: &[T]) -> Option<(Vec<NodeId>, Vec<T>)> {
        let mut ancestors = vec![ROOT];
        let mut first_tokens = Vec::new();
        let mut idx = 0;
        let mut current = ROOT;
        while idx < key.len() {
            let token = key[idx].clone();
            let edge = self.arena[current].children.get(&token)?;
            let remaining = &key[idx..];
            if remaining.len() < edge.label.len() || remaining[..edge.label.len()] != edge.label[..] {
                return None;
            }
            idx += edge.label.len();
            current = edge.target;
            first_tokens.push(token);
            ancestors.push(current);
        }
        Some((ancestors, first_tokens))
    }

    pub fn insert(&mut self, key: &[T], value: V) -> Result<()> {
        self.ensure_mutable()?;
        if key.is_empty() {
            return Err(TrieError::InvalidKey);
        }

        let mut current = ROOT;
        let mut idx = 0;

        loop {
            if idx == key.len() {
                break;
            }
            let token = key[idx].clone();
            let existing = self.arena[current].children.get(&token).cloned();
            match existing {
                None => {
                    let new_id = self.arena.len();
                    self.arena.push(RadixNode::new());
                    self.arena[current].children.insert(
                        token,
                        Edge {
                            label: key[idx..].to_vec(),
                            target: new_id,
                        },
                    );
                    current = new_id;
                    idx = key.len();
                }
                Some(edge) => {
                    let remaining = &key[idx..];
                    let common = common_prefix_len(&edge.label, remaining);
                    if common == edge.label.len() {
                        current = edge.target;
                        idx += common;
                    } else {
                        let mid_id = self.arena.len();
                        self.arena.push(RadixNode::new());
                        self.arena[mid_id].children.insert(
                            edge.label[common].clone(),
                            Edge {
                                label: edge.label[common..].to_vec(),
                                target: edge.target,
                            },
                        );
                        self.arena[current].children.insert(
                            token,
                            Edge {
                                label: edge.label[..common].to_vec(),
                                target: mid_id,
                            },
                        );
                        if common == remaining.len() {
                            current = mid_id;
                            idx += common;
                        } else {
                            let new_id = self.arena.len();
                            self.arena.push(RadixNode::new());
                            self.arena[mid_id].children.insert(
                                remaining[common].clone(),
                                Edge {
                                    label: remaining[common..].to_vec(),
                                    target: new_id,
                                },
                            );
                            current = new_id;
                            idx = key.len();
                        }
                    }
                }
            }
        }

        if self.arena[current].value.is_none() {
            self.length += 1;
        }
        self.arena[current].value = Some(value);
        Ok(())
    }

    pub fn get(&self, key: &[T]) -> Result<&V> {
        let (ancestors, _) = self.lookup_path(key).ok_or(TrieError::NotFound)?;
        let id = *ancestors.last().expect("root always present");
        self.arena[id].value.as_ref().ok_or(TrieError::NotFound)
    }

    pub fn contains(&self, key: &[T]) -> bool {
        self.get(key).is_ok()
    }

    pub fn delete(&mut self, key: &[T]) -> Result<V> {
        self.ensure_mutable()?;
        if key.is_empty() {
            return Err(TrieError::InvalidKey);
        }
        let (ancestors, first_tokens) = self.lookup_path(key).ok_or(TrieError::NotFound)?;
        let node_id = *ancestors.last().expect("root always present");
        let value = self.arena[node_id].value.take().ok_or(TrieError::NotFound)?;
        self.length -= 1;
        self.prune_or_merge(&ancestors, &first_tokens);
        Ok(value)
    }

    /// After clearing a node's value, either drop its now-dangling edge,
    /// merge it with its sole remaining child, or leave it alone if it
    /// still branches.
    fn prune_or_merge(&mut self, ancestors: &[NodeId], first_tokens: &[T]) {
        let mut i = ancestors.len() - 1;
        while i > 0 {
            let node_id = ancestors[i];
            let parent_id = ancestors[i - 1];
            let key_token = first_tokens[i - 1].clone();

            if self.arena[node_id].is_terminal() {
                break;
            }

            match self.arena[node_id].children.len() {
                0 => {
                    self.arena[parent_id].children.remove(&key_token);
                    i -= 1;
                }
                1 => {
                    let (child_token, child_edge) = self.arena[node_id]
                        .children
                        .iter()
                        .next()
                        .map(|(k, e)| (k.clone(), e.clone()))
                        .expect("exactly one child");
                    let _ = child_token;
                    let mut new_label = self.arena[parent_id].children[&key_token].label.clone();
                    new_label.extend(child_edge.label);
                    self.arena[parent_id].children.insert(
                        key_token,
                        Edge {
                            label: new_label,
                            target: child_edge.target,
                        },
                    );
                    break;
                }
                _ => break,
            }
        }
    }

    /// Reset to empty. Requires `Unlinked` state.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.arena.clear();
        self.arena.push(RadixNode::new());
        self.length = 0;
        Ok(())
    }

    /// Enumerate every stored `(key, value)` pair under `prefix`.
    pub fn items(&self, prefix: &[T]) -> Result<Vec<(Vec<T>, &V)>> {
        let (start, tail) = self.resolve_prefix(prefix).ok_or(TrieError::NotFound)?;
        let mut base = prefix.to_vec();
        base.extend(tail);

        let mut out = Vec::new();
        let mut stack = vec![(start, base)];
        while let Some((id, path)) = stack.pop() {
            let node = &self.arena[id];
            for edge in node.children.values() {
                let mut child_path = path.clone();
                child_path.extend(edge.label.iter().cloned());
                stack.push((edge.target, child_path));
            }
            if let Some(value) = node.value.as_ref() {
                out.push((path, value));
            }
        }
        Ok(out)
    }

    /// Like `lookup_path`, but also accepts a `prefix` that lands
    /// mid-edge. Returns the node whose subtree should be enumerated,
    /// together with the tail of the partially-matched edge that
    /// `prefix` itself did not cover: every key under that node's
    /// subtree starts with `prefix` followed by that tail, not with
    /// `prefix` alone.
    fn resolve_prefix(&self, prefix: &[T]) -> Option<(NodeId, Vec<T>)> {
        let mut idx = 0;
        let mut current = ROOT;
        while idx < prefix.len() {
            let token = prefix[idx].clone();
            let edge = self.arena[current].children.get(&token)?;
            let remaining = &prefix[idx..];
            if remaining.len() >= edge.label.len() {
                if remaining[..edge.label.len()] != edge.label[..] {
                    return None;
                }
                idx += edge.label.len();
                current = edge.target;
            } else {
                if edge.label[..remaining.len()] != remaining[..] {
                    return None;
                }
                return Some((edge.target, edge.label[remaining.len()..].to_vec()));
            }
        }
        Some((current, Vec::new()))
    }

    pub fn keys(&self) -> Result<Vec<Vec<T>>> {
        Ok(self.items(&[])?.into_iter().map(|(k, _)| k).collect())
    }
}

impl<T, V> Radix<T, V>
where
    T: Clone + Eq + Hash,
    V: Clone,
{
    pub fn copy(&self) -> Self {
        let mut out = Radix::new();
        if let Ok(items) = self.items(&[]) {
            for (key, value) in items {
                out.insert(&key, value.clone()).expect("fresh radix is unlinked");
            }
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn shared_prefix_splits_an_edge() {
        let mut t: Radix<char, u32> = Radix::new();
        t.insert(&c("test"), 1).unwrap();
        t.insert(&c("team"), 2).unwrap();
        t.insert(&c("toast"), 3).unwrap();

        assert_eq!(*t.get(&c("test")).unwrap(), 1);
        assert_eq!(*t.get(&c("team")).unwrap(), 2);
        assert_eq!(*t.get(&c("toast")).unwrap(), 3);
        assert!(t.get(&c("te")).is_err());
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn insert_existing_key_overwrites_without_growing_len() {
        let mut t: Radix<char, u32> = Radix::new();
        t.insert(&c("test"), 1).unwrap();
        t.insert(&c("test"), 2).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(*t.get(&c("test")).unwrap(), 2);
    }

    #[test]
    fn insert_key_that_is_a_prefix_of_an_existing_one() {
        let mut t: Radix<char, u32> = Radix::new();
        t.insert(&c("testing"), 1).unwrap();
        t.insert(&c("test"), 2).unwrap();
        assert_eq!(*t.get(&c("test")).unwrap(), 2);
        assert_eq!(*t.get(&c("testing")).unwrap(), 1);
    }

    #[test]
    fn delete_merges_edge_with_sole_remaining_child() {
        let mut t: Radix<char, u32> = Radix::new();
        t.insert(&c("test"), 1).unwrap();
        t.insert(&c("team"), 2).unwrap();

        t.delete(&c("team")).unwrap();
        assert!(!t.contains(&c("team")));
        assert!(t.contains(&c("test")));
        assert_eq!(t.len(), 1);

        // after the merge, inserting something back along the freed branch
        // must still behave like an ordinary trie.
        t.insert(&c("team"), 3).unwrap();
        assert_eq!(*t.get(&c("team")).unwrap(), 3);
    }

    #[test]
    fn items_enumerates_full_keys_regardless_of_compression() {
        let mut t: Radix<char, u32> = Radix::new();
        for (k, v) in [("test", 1), ("team", 2), ("toast", 3)] {
            t.insert(&c(k), v).unwrap();
        }
        let mut keys: Vec<String> = t
            .keys()
            .unwrap()
            .into_iter()
            .map(|k| k.into_iter().collect())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["team", "test", "toast"]);
    }

    #[test]
    fn frozen_mutation_is_rejected() {
        let mut t: Radix<char, u32> = Radix::new();
        t.insert(&c("a"), 1).unwrap();
        t.state = LinkState::Linked;
        assert_eq!(t.insert(&c("b"), 2), Err(TrieError::FrozenMutation));
        assert_eq!(t.delete(&c("a")), Err(TrieError::FrozenMutation));
    }

    #[test]
    fn items_on_a_prefix_landing_mid_segment() {
        // "abc", "abcd", "abcef" all share one compressed edge spanning
        // "abc" from the root, so the prefix "ab" lands in the middle of
        // that edge rather than exactly on a node.
        let mut t: Radix<char, u32> = Radix::new();
        for (k, v) in [("abc", 1), ("abcd", 2), ("abcef", 3)] {
            t.insert(&c(k), v).unwrap();
        }
        assert!(t.get(&c("ab")).is_err());

        let mut keys: Vec<String> = t
            .items(&c("ab"))
            .unwrap()
            .into_iter()
            .map(|(k, _)| k.into_iter().collect())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["abc", "abcd", "abcef"]);
    }
}
