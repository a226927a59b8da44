use crate::node::NodeId;
use crate::trie::{Trie, ROOT};

impl<V> Trie<char, V> {
    /// Emit a regular expression alternation matching exactly the
    /// stored keys, as whole substrings.
    ///
    /// A terminal node is treated as a leaf for this purpose regardless
    /// of whether it has children: matching the shorter key already
    /// implies a match at this position, so any longer keys continuing
    /// past a terminal are redundant and are dropped from the
    /// projection entirely.
    pub fn to_regex(&self) -> String {
        self.regex_parts(ROOT).join("|")
    }

    fn regex_parts(&self, node_id: NodeId) -> Vec<String> {
        let node = &self.arena[node_id];
        let mut children: Vec<(char, NodeId)> = node.children.iter().map(|(&c, &id)| (c, id)).collect();
        children.sort_by_key(|(c, _)| *c);

        let mut leaf_chars = Vec::new();
        let mut parts = Vec::new();

        for (ch, child_id) in children {
            let child = &self.arena[child_id];
            if child.is_terminal() {
                leaf_chars.push(ch);
                continue;
            }
            let sub_parts = self.regex_parts(child_id);
            if sub_parts.is_empty() {
                leaf_chars.push(ch);
            } else {
                parts.push(format!("{}{}", ch, Self::wrap(&sub_parts)));
            }
        }

        if leaf_chars.len() > 1 {
            let class: String = leaf_chars.into_iter().collect();
            parts.push(format!("[{}]", class));
        } else if let Some(ch) = leaf_chars.into_iter().next() {
            parts.push(ch.to_string());
        }

        // Every level joins its alternatives in sorted order (the
        // original's `"|".join(sorted(inner_patterns))`), not just
        // insertion order, so a leaf that sorts before a branch (e.g.
        // `[ab]` before `cd`) still lands first.
        parts.sort();
        parts
    }

    fn wrap(parts: &[String]) -> String {
        if parts.len() == 1 {
            parts[0].clone()
        } else {
            format!("(?:{})", parts.join("|"))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::trie::Trie;

    fn regex_for(keys: &[&str]) -> String {
        let mut t: Trie<char, ()> = Trie::new();
        for k in keys {
            t.insert(&k.chars().collect::<Vec<_>>(), ()).unwrap();
        }
        t.to_regex()
    }

    #[test]
    fn two_char_alternation_becomes_a_class() {
        assert_eq!(regex_for(&["ab", "ac"]), "a[bc]");
    }

    #[test]
    fn mixed_leaf_and_branch_groups() {
        assert_eq!(regex_for(&["abc", "ac"]), "a(?:bc|c)");
    }

    #[test]
    fn nested_branches() {
        assert_eq!(regex_for(&["aabc", "aab", "acd"]), "a(?:ab|cd)");
    }

    #[test]
    fn root_level_alternation_with_singletons() {
        assert_eq!(regex_for(&["ab", "ac", "de", "f"]), "a[bc]|de|f");
    }

    #[test]
    fn prefix_key_absorbs_longer_key() {
        assert_eq!(regex_for(&["ab", "abc", "abcdef", "f"]), "ab|f");
    }

    #[test]
    fn alternatives_are_sorted_lexicographically_not_by_insertion_order() {
        // A single-token leaf ('a') sorts before a branching alternative
        // ('bc') even though the branch is emitted into `parts` first.
        assert_eq!(regex_for(&["bc", "a"]), "a|bc");
        assert_eq!(regex_for(&["a", "bc"]), "a|bc");
        // '[' (0x5B) sorts before 'c' (0x63), so the character class must
        // come before the branch alternative despite being pushed last.
        assert_eq!(regex_for(&["cd", "a", "b"]), "[ab]|cd");
        assert_eq!(regex_for(&["a", "b", "cd"]), "[ab]|cd");
    }

    #[test]
    fn emitted_patterns_actually_match_the_stored_keys() {
        let keys = ["ab", "abc", "abcdef", "f", "de"];
        let pattern = regex_for(&keys);
        let re = regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        for k in &["ab", "f", "de"] {
            assert!(re.is_match(k), "{:?} should match {:?}", pattern, k);
        }
        // "abc"/"abcdef" are absorbed by the shorter stored key "ab" and so
        // are intentionally not full matches of the *whole-string* anchored
        // pattern, but the unanchored pattern still matches their "ab" head.
        let re_unanchored = regex::Regex::new(&pattern).unwrap();
        assert!(re_unanchored.is_match("abcdef"));
    }
}
