
const FANOUT: usize = 26;

#[derive(Debug, Clone)]
struct Node {
    /// Index into the node arena per letter, 0 meaning no child (0 is the root,
    /// which can never be a child)
    children: [u32; FANOUT],
    terminal: bool,
}

impl Node {
    fn empty() -> Node {
        Node {
            children: [0; FANOUT],
            terminal: false,
        }
    }
}

/// A prefix tree over lowercase `a-z` words, nodes held in a flat arena.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    len: usize,
}

impl Trie {
    pub fn new() -> Trie {
        Trie {
            nodes: vec![Node::empty()],
            len: 0,
        }
    }

    fn slot(byte: u8) -> Option<usize> {
        if byte.is_ascii_lowercase() {
            Some((byte - b'a') as usize)
        } else {
            None
        }
    }

    /// Adds `word`. O(len), idempotent. Words with bytes outside `a-z`
    /// are not stored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if word.bytes().any(|b| Self::slot(b).is_none()) {
            log::warn!("ignoring word with characters outside a-z: {:?}", word);
            return;
        }

        let mut node = 0usize;
        for byte in word.bytes() {
            let slot = match Self::slot(byte) {
                Some(s) => s,
                None => return,
            };
            let child = self.nodes[node].children[slot];
            node = if child == 0 {
                self.nodes.push(Node::empty());
                let fresh = (self.nodes.len() - 1) as u32;
                self.nodes[node].children[slot] = fresh;
                fresh as usize
            } else {
                child as usize
            };
        }
        if !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.len += 1;
        }
    }

    /// True iff exactly `word` was inserted (a stored word's strict prefix is
    /// not a member).
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = 0usize;
        for byte in word.bytes() {
            let slot = match Self::slot(byte) {
                Some(s) => s,
                None => return false,
            };
            let child = self.nodes[node].children[slot];
            if child == 0 {
                return false;
            }
            node = child as usize;
        }
        self.nodes[node].terminal
    }

    /// Number of distinct words stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn insert_then_contains() {
    let mut trie = Trie::new();
    assert!(!trie.contains("cat"));

    trie.insert("cat");
    assert!(trie.contains("cat"));
    assert!(!trie.contains("ca")); // prefix, not a member
    assert!(!trie.contains("cats"));
    assert!(!trie.contains(""));

    // earlier words survive later inserts
    trie.insert("cats");
    trie.insert("dog");
    trie.insert("category");
    assert!(trie.contains("cat"));
    assert!(trie.contains("cats"));
    assert!(trie.contains("dog"));
    assert_eq!(trie.len(), 4);
}

#[test]
fn insert_is_idempotent() {
    let mut trie = Trie::new();
    trie.insert("word");
    trie.insert("word");
    assert_eq!(trie.len(), 1);
    assert!(trie.contains("word"));
}

#[test]
fn rejects_non_lowercase() {
    let mut trie = Trie::new();
    trie.insert("Cat");
    trie.insert("a-b");
    assert_eq!(trie.len(), 0);
    assert!(!trie.contains("Cat"));
    assert!(!trie.contains("a-b"));
}
