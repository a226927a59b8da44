use std::hash::Hash;

use crate::error::Result;
use crate::node::NodeId;
use crate::state::LinkState;
use crate::trie::{Trie, ROOT};

impl<T, V> Trie<T, V>
where
    T: Clone + Eq + Hash,
{
    /// Compute Aho-Corasick failure and dictionary links for every node
    /// and freeze the trie against mutation. A no-op if already `Linked`.
    pub fn link_nodes(&mut self) -> Result<()> {
        if self.state == LinkState::Linked {
            return Ok(());
        }
        self.build_failure_links();
        self.build_dictionary_links();
        self.state = LinkState::Linked;
        Ok(())
    }

    /// Allow mutation again. Existing failure/dictionary links are left
    /// in place but disregarded until `link_nodes` is called again.
    pub fn unlink_nodes(&mut self) {
        self.state = LinkState::Unlinked;
    }

    fn build_failure_links(&mut self) {
        use std::collections::VecDeque;

        self.arena[ROOT].failure = Some(ROOT);

        let mut queue: VecDeque<NodeId> = VecDeque::new();
        let root_children: Vec<(T, NodeId)> = self.arena[ROOT]
            .children
            .iter()
            .map(|(t, &id)| (t.clone(), id))
            .collect();
        for (_, child_id) in root_children {
            self.arena[child_id].failure = Some(ROOT);
            queue.push_back(child_id);
        }

        while let Some(n_id) = queue.pop_front() {
            let children: Vec<(T, NodeId)> = self.arena[n_id]
                .children
                .iter()
                .map(|(t, &id)| (t.clone(), id))
                .collect();

            for (token, child_id) in children {
                queue.push_back(child_id);

                let mut f = self.arena[n_id].failure.expect("BFS order sets failure before dequeue");
                while f != ROOT && self.arena[f].child(&token).is_none() {
                    f = self.arena[f].failure.expect("every non-root node has a failure link");
                }

                let failure = match self.arena[f].child(&token) {
                    Some(candidate) if candidate != child_id => candidate,
                    _ => ROOT,
                };
                self.arena[child_id].failure = Some(failure);
            }
        }
    }

    fn build_dictionary_links(&mut self) {
        for node_id in 0..self.arena.len() {
            if node_id == ROOT {
                continue;
            }
            let mut f = self.arena[node_id]
                .failure
                .expect("failure links computed before dictionary links");
            let mut dictionary = None;
            while f != ROOT {
                if self.arena[f].is_terminal() {
                    dictionary = Some(f);
                    break;
                }
                f = self.arena[f].failure.expect("every non-root node has a failure link");
            }
            self.arena[node_id].dictionary = dictionary;
        }
    }
}

#[cfg(test)]
mod test {
    use crate::trie::Trie;

    fn build(keys: &[&str]) -> Trie<char, usize> {
        let mut t = Trie::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(&k.chars().collect::<Vec<_>>(), i).unwrap();
        }
        t.link_nodes().unwrap();
        t
    }

    fn failure_path(t: &Trie<char, usize>, key: &str) -> Vec<char> {
        let id = t
            .lookup_node(&key.chars().collect::<Vec<_>>())
            .expect("key exists");
        let failure_id = t.arena[id].failure.expect("linked");
        path_of(t, failure_id)
    }

    fn path_of(t: &Trie<char, usize>, mut id: usize) -> Vec<char> {
        // Reconstruct the path to `id` by BFS from the root over children,
        // since nodes don't store a back-pointer to their parent token.
        use std::collections::VecDeque;
        let mut queue: VecDeque<(usize, Vec<char>)> = VecDeque::new();
        queue.push_back((0, Vec::new()));
        let mut found = None;
        while let Some((node_id, path)) = queue.pop_front() {
            if node_id == id {
                found = Some(path.clone());
                break;
            }
            for (&ch, &child_id) in t.arena[node_id].children.iter() {
                let mut p = path.clone();
                p.push(ch);
                queue.push_back((child_id, p));
            }
        }
        let _ = &mut id;
        found.expect("node reachable from root")
    }

    #[test]
    fn failure_links_scenario() {
        let t = build(&["a", "ab", "abc", "abd", "abcd", "bbbbac", "bcd", "c", "efgh"]);
        assert_eq!(failure_path(&t, "ab"), vec!['b']);
        assert_eq!(failure_path(&t, "abcd"), "bcd".chars().collect::<Vec<_>>());
        assert_eq!(
            failure_path(&t, "bbbbac"),
            "c".chars().collect::<Vec<_>>()
        );
        assert_eq!(failure_path(&t, "efgh"), Vec::<char>::new());
    }

    #[test]
    fn dictionary_links_scenario() {
        let t = build(&["a", "ab", "abcd", "ac", "bbac", "bc"]);

        let dict_value = |key: &str| -> Option<usize> {
            let id = t
                .lookup_node(&key.chars().collect::<Vec<_>>())
                .expect("node exists");
            t.arena[id].dictionary.and_then(|d| t.arena[d].value)
        };

        assert_eq!(dict_value("ab"), None);
        assert_eq!(dict_value("abc"), Some(5)); // "bc" -> index 5
        assert_eq!(dict_value("abcd"), None);
        assert_eq!(dict_value("bbac"), Some(3)); // "ac" -> index 3
    }

    #[test]
    fn unlink_then_relink_restores_state() {
        let mut t = build(&["a", "b"]);
        assert_eq!(t.state(), crate::state::LinkState::Linked);
        t.unlink_nodes();
        assert_eq!(t.state(), crate::state::LinkState::Unlinked);
        t.insert(&['c'], 99).unwrap();
        t.link_nodes().unwrap();
        assert_eq!(t.state(), crate::state::LinkState::Linked);
        assert!(t.contains(&['c']));
    }
}
