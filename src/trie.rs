use std::collections::HashMap;

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, Node>,
    end_of_word: bool
}

/// Prefix index over a set of words.
///
/// Each node owns its children, so the structure is a plain tree. Words are
/// compared char by char; any case folding has to happen before `insert`
/// and `with_prefix` are called.
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    words: usize
}

impl Trie {
    pub fn new () -> Self {
        Self {
            root: Node::default(),
            words: 0
        }
    }

    pub fn insert (&mut self, word: &str) {
        let mut curr = &mut self.root;

        for ch in word.chars() {
            curr = curr.children.entry(ch).or_default();
        }

        if !curr.end_of_word {
            curr.end_of_word = true;
            self.words += 1;
        }
    }

    /// Returns every stored word starting with `prefix`.
    ///
    /// An empty prefix matches every word. Words come out in depth-first
    /// order, so a word always precedes its own extensions, but the order
    /// between siblings follows the child map and is unspecified. Sort the
    /// result if a stable order matters.
    pub fn with_prefix (&self, prefix: &str) -> Vec<String> {
        let mut res = Vec::new();

        let Some(node) = self.find(prefix) else {
            return res;
        };

        let mut buf = String::from(prefix);
        Self::collect_words(node, &mut buf, &mut res);
        res
    }

    pub fn contains (&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.end_of_word)
    }

    pub fn len (&self) -> usize {
        self.words
    }

    pub fn is_empty (&self) -> bool {
        self.words == 0
    }

    fn find (&self, prefix: &str) -> Option<&Node> {
        prefix.chars().try_fold(&self.root, |node, ch| node.children.get(&ch))
    }

    // `buf` holds the path to `node`; it is restored before returning.
    fn collect_words (node: &Node, buf: &mut String, res: &mut Vec<String>) {
        if node.end_of_word {
            res.push(buf.clone());
        }

        for (ch, child) in &node.children {
            buf.push(*ch);
            Self::collect_words(child, buf, res);
            buf.pop();
        }
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>> (&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>> (iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
