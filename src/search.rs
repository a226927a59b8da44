use std::hash::Hash;

use crate::node::NodeId;
use crate::state::LinkState;
use crate::trie::{Trie, ROOT};

/// One occurrence of a stored key in a host sequence.
///
/// `value` is `None` only for the empty-text sentinel `(0, 0, None)`
/// produced by a `Linked` search over an empty host (see
/// [`Trie::search`]); every other hit carries a real value since
/// `start < end` implies a non-empty stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'s, V> {
    pub start: usize,
    pub end: usize,
    pub value: Option<&'s V>,
}

/// One prefix of a probed sequence that is itself a stored key,
/// produced by [`Trie::match_prefixes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'s, V> {
    pub length: usize,
    pub value: &'s V,
}

impl<T, V> Trie<T, V>
where
    T: Clone + Eq + Hash,
{
    /// Every stored key that is a prefix of `sequence`, in increasing
    /// length order. Yields nothing for an empty `sequence`.
    ///
    /// `sequence` is borrowed independently of `self`, so it may come
    /// from a buffer that does not live as long as the trie (e.g. a
    /// temporary built from a `&str`).
    pub fn match_prefixes<'s, 't>(&'s self, sequence: &'t [T]) -> PrefixMatches<'s, 't, T, V> {
        PrefixMatches {
            trie: self,
            seq: sequence,
            pos: 0,
            current: ROOT,
            done: sequence.is_empty(),
        }
    }

    /// Find every occurrence of a stored key in `text`.
    ///
    /// Uses the Aho-Corasick automaton when `Linked` (linear in
    /// `text.len()` plus the number of matches); falls back to a naive
    /// re-walk-per-start-position scan when `Unlinked`. `text` is
    /// borrowed independently of `self`, so it may come from a buffer
    /// that does not live as long as the trie.
    pub fn search<'s, 't>(&'s self, text: &'t [T]) -> Search<'s, 't, T, V> {
        match self.state {
            LinkState::Linked => Search::Linked(LinkedSearch {
                trie: self,
                text,
                i: 0,
                current: ROOT,
                dict_cursor: None,
                emitted_empty_sentinel: false,
            }),
            LinkState::Unlinked => Search::Naive(NaiveSearch {
                trie: self,
                text,
                start: 0,
                pos: 0,
                current: ROOT,
            }),
        }
    }
}

/// Iterator returned by [`Trie::match_prefixes`].
pub struct PrefixMatches<'s, 't, T, V> {
    trie: &'s Trie<T, V>,
    seq: &'t [T],
    pos: usize,
    current: NodeId,
    done: bool,
}

impl<'s, 't, T, V> Iterator for PrefixMatches<'s, 't, T, V>
where
    T: Clone + Eq + Hash,
{
    type Item = PrefixMatch<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.pos >= self.seq.len() {
                return None;
            }
            let token = &self.seq[self.pos];
            match self.trie.arena[self.current].child(token) {
                Some(child) => {
                    self.current = child;
                    self.pos += 1;
                    if let Some(value) = self.trie.arena[self.current].value.as_ref() {
                        return Some(PrefixMatch {
                            length: self.pos,
                            value,
                        });
                    }
                }
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

/// Dispatches to [`NaiveSearch`] or [`LinkedSearch`] depending on the
/// trie's link state at the moment `search` was called.
pub enum Search<'s, 't, T, V> {
    Naive(NaiveSearch<'s, 't, T, V>),
    Linked(LinkedSearch<'s, 't, T, V>),
}

impl<'s, 't, T, V> Iterator for Search<'s, 't, T, V>
where
    T: Clone + Eq + Hash,
{
    type Item = SearchHit<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Search::Naive(it) => it.next(),
            Search::Linked(it) => it.next(),
        }
    }
}

/// Re-walks the trie from every start position. O(`text.len()` times
/// the longest stored key) but requires no automaton links, so it works
/// on an `Unlinked` trie.
pub struct NaiveSearch<'s, 't, T, V> {
    trie: &'s Trie<T, V>,
    text: &'t [T],
    start: usize,
    pos: usize,
    current: NodeId,
}

impl<'s, 't, T, V> Iterator for NaiveSearch<'s, 't, T, V>
where
    T: Clone + Eq + Hash,
{
    type Item = SearchHit<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.start >= self.text.len() {
                return None;
            }
            if self.pos < self.text.len() {
                if let Some(child) = self.trie.arena[self.current].child(&self.text[self.pos]) {
                    self.current = child;
                    self.pos += 1;
                    if let Some(value) = self.trie.arena[self.current].value.as_ref() {
                        return Some(SearchHit {
                            start: self.start,
                            end: self.pos,
                            value: Some(value),
                        });
                    }
                    continue;
                }
            }
            self.start += 1;
            self.pos = self.start;
            self.current = ROOT;
        }
    }
}

/// Walks the host text once using precomputed failure and dictionary
/// links. See `SPEC_FULL.md` §4.3 for the emission-order contract: the
/// current node's own terminal is emitted before its dictionary chain.
pub struct LinkedSearch<'s, 't, T, V> {
    trie: &'s Trie<T, V>,
    text: &'t [T],
    i: usize,
    current: NodeId,
    dict_cursor: Option<NodeId>,
    emitted_empty_sentinel: bool,
}

impl<'s, 't, T, V> Iterator for LinkedSearch<'s, 't, T, V>
where
    T: Clone + Eq + Hash,
{
    type Item = SearchHit<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.text.is_empty() {
            if self.emitted_empty_sentinel {
                return None;
            }
            self.emitted_empty_sentinel = true;
            return Some(SearchHit {
                start: 0,
                end: 0,
                value: None,
            });
        }

        loop {
            if let Some(d) = self.dict_cursor {
                let node = &self.trie.arena[d];
                self.dict_cursor = node.dictionary;
                let start = (self.i as isize - node.depth - 1) as usize;
                return Some(SearchHit {
                    start,
                    end: self.i,
                    value: node.value.as_ref(),
                });
            }

            if self.i >= self.text.len() {
                return None;
            }

            let token = &self.text[self.i];
            while self.current != ROOT && self.trie.arena[self.current].child(token).is_none() {
                self.current = self.trie.arena[self.current]
                    .failure
                    .expect("linked trie has failure links on every node");
            }
            self.current = self.trie.arena[self.current].child(token).unwrap_or(ROOT);
            self.i += 1;
            self.dict_cursor = self.trie.arena[self.current].dictionary;

            if let Some(value) = self.trie.arena[self.current].value.as_ref() {
                let start = (self.i as isize - self.trie.arena[self.current].depth - 1) as usize;
                return Some(SearchHit {
                    start,
                    end: self.i,
                    value: Some(value),
                });
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::trie::Trie;
    use std::collections::HashSet;

    fn build(keys: &[&str]) -> Trie<char, usize> {
        let mut t = Trie::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(&k.chars().collect::<Vec<_>>(), i).unwrap();
        }
        t
    }

    #[test]
    fn linked_search_scenario() {
        let mut t = build(&["a", "abc", "abd", "abcd", "bcd", "c"]);
        t.link_nodes().unwrap();
        let text: Vec<char> = "ababcdecfgh".chars().collect();
        let hits: Vec<(usize, usize, usize)> = t
            .search(&text)
            .map(|h| (h.start, h.end, *h.value.unwrap()))
            .collect();

        let expected = vec![
            (0, 1, 0), // a
            (2, 3, 0), // a
            (2, 5, 1), // abc
            (4, 5, 5), // c
            (2, 6, 3), // abcd
            (3, 6, 4), // bcd
            (7, 8, 5), // c
        ];
        assert_eq!(hits, expected);
    }

    #[test]
    fn empty_text_yields_sentinel() {
        let mut t: Trie<char, usize> = build(&["a"]);
        t.link_nodes().unwrap();
        let hits: Vec<_> = t.search(&[]).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start, 0);
        assert_eq!(hits[0].end, 0);
        assert!(hits[0].value.is_none());
    }

    #[test]
    fn naive_and_linked_search_agree_as_sets() {
        let t_unlinked = build(&["a", "abc", "abd", "abcd", "bcd", "c", "bbbbac", "efgh"]);
        let mut t_linked = t_unlinked.clone();
        t_linked.link_nodes().unwrap();

        let text: Vec<char> = "bbbbacabcdefgh".chars().collect();

        let naive: HashSet<(usize, usize, usize)> = t_unlinked
            .search(&text)
            .map(|h| (h.start, h.end, *h.value.unwrap()))
            .collect();
        let linked: HashSet<(usize, usize, usize)> = t_linked
            .search(&text)
            .map(|h| (h.start, h.end, *h.value.unwrap()))
            .collect();

        assert_eq!(naive, linked);
    }

    #[test]
    fn match_prefixes_increasing_length() {
        let t = build(&["a", "ab", "abc", "abd"]);
        let seq: Vec<char> = "abcde".chars().collect();
        let lengths: Vec<usize> = t.match_prefixes(&seq).map(|m| m.length).collect();
        assert_eq!(lengths, vec![1, 2, 3]);
    }

    #[test]
    fn match_prefixes_empty_sequence_yields_nothing() {
        let t = build(&["a"]);
        let seq: Vec<char> = Vec::new();
        assert_eq!(t.match_prefixes(&seq).count(), 0);
    }
}
