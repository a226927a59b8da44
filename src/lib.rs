//! A sequence-indexed associative container with an Aho-Corasick
//! automaton layered on top.
//!
//! [`Trie`] maps finite sequences of hashable tokens to values and
//! supports the usual dictionary operations (insert/get/delete/prefix
//! enumeration) plus two kinds of search:
//!
//! - [`Trie::match_prefixes`]: every stored key that is a prefix of a
//!   probed sequence.
//! - [`Trie::search`]: every occurrence of any stored key in a host
//!   sequence, unanchored. While the trie is `Unlinked` this falls back
//!   to a naive re-walk; calling [`Trie::link_nodes`] computes
//!   Aho-Corasick failure and dictionary links and freezes the trie
//!   against mutation, after which `search` runs in time linear in the
//!   host plus the number of matches.
//!
//! [`StringTrie`] is a thin `&str`/`char` convenience wrapper over
//! `Trie<char, V>` that additionally exposes [`StringTrie::to_regex`].
//! [`Radix`] is a separate, compressed (multi-token-edge) associative
//! container sharing the same insert/get/delete surface; it has no
//! automaton of its own (see `src/radix.rs`).

mod error;
mod link;
mod node;
mod radix;
mod regex;
mod search;
mod state;
mod string_trie;
mod trie;

pub use error::{Result, TrieError};
pub use node::NodeId;
pub use radix::Radix;
pub use search::{PrefixMatch, PrefixMatches, Search, SearchHit};
pub use state::LinkState;
pub use string_trie::StringTrie;
pub use trie::{Items, Trie};
