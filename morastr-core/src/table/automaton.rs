//! Multi-pattern matcher over reversed keys
//!
//! Keys are inserted back to front into a trie with failure links. Feeding
//! the text right to left, the longest terminal suffix of the current state
//! is the longest key starting at the current position, so one pass yields
//! every leftmost-longest candidate.

use smallvec::SmallVec;
use std::collections::VecDeque;

const ROOT: u32 = 0;

/// A key match starting at some position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    /// Index of the matched entry
    pub entry: u32,
    /// Key length in code points
    pub len: u32,
}

#[derive(Debug, Clone, Default)]
struct Node {
    /// Sorted by char
    children: SmallVec<[(char, u32); 4]>,
    fail: u32,
    depth: u32,
    terminal: Option<u32>,
    /// Longest terminal among this node and its failure chain
    output: Option<Hit>,
}

impl Node {
    #[inline]
    fn child(&self, ch: char) -> Option<u32> {
        self.children
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|idx| self.children[idx].1)
    }
}

/// Compiled matcher, nodes stored contiguously and addressed by index
#[derive(Debug, Clone)]
pub(crate) struct Matcher {
    nodes: Vec<Node>,
}

impl Matcher {
    /// Compile the matcher; entry `i` is `keys[i]`
    pub fn new<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut matcher = Self {
            nodes: vec![Node::default()],
        };
        for (entry, key) in keys.into_iter().enumerate() {
            matcher.insert(key, entry as u32);
        }
        matcher.link();
        matcher
    }

    /// Whether no key was compiled
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn insert(&mut self, key: &str, entry: u32) {
        let mut current = ROOT;
        for ch in key.chars().rev() {
            let node = &self.nodes[current as usize];
            current = match node.children.binary_search_by_key(&ch, |&(c, _)| c) {
                Ok(idx) => node.children[idx].1,
                Err(idx) => {
                    let next = self.nodes.len() as u32;
                    let depth = node.depth + 1;
                    self.nodes.push(Node {
                        depth,
                        ..Node::default()
                    });
                    self.nodes[current as usize].children.insert(idx, (ch, next));
                    next
                }
            };
        }
        if current != ROOT {
            self.nodes[current as usize].terminal = Some(entry);
        }
    }

    /// Breadth-first pass setting failure links and inherited outputs
    fn link(&mut self) {
        let mut queue = VecDeque::new();
        for &(_, child) in &self.nodes[ROOT as usize].children {
            queue.push_back(child);
        }
        while let Some(current) = queue.pop_front() {
            let node = &self.nodes[current as usize];
            let inherited = self.nodes[node.fail as usize].output;
            let output = match node.terminal {
                Some(entry) => Some(Hit {
                    entry,
                    len: node.depth,
                }),
                None => inherited,
            };
            self.nodes[current as usize].output = output;

            let children = self.nodes[current as usize].children.clone();
            let fail = self.nodes[current as usize].fail;
            for (ch, child) in children {
                self.nodes[child as usize].fail = self.follow(fail, ch);
                queue.push_back(child);
            }
        }
    }

    /// Transition from `state` on `ch`, falling back along failure links
    #[inline]
    fn follow(&self, mut state: u32, ch: char) -> u32 {
        loop {
            if let Some(next) = self.nodes[state as usize].child(ch) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state as usize].fail;
        }
    }

    /// Longest key starting at each position of `chars`
    pub fn longest_at(&self, chars: &[char]) -> Vec<Option<Hit>> {
        let mut hits = vec![None; chars.len()];
        if self.is_empty() {
            return hits;
        }
        let mut state = ROOT;
        for (pos, &ch) in chars.iter().enumerate().rev() {
            state = self.follow(state, ch);
            hits[pos] = self.nodes[state as usize].output;
        }
        hits
    }

    /// Whether any key occurs in `text`
    pub fn occurs_in(&self, text: &str) -> bool {
        let mut state = ROOT;
        for ch in text.chars().rev() {
            state = self.follow(state, ch);
            if self.nodes[state as usize].output.is_some() {
                return true;
            }
        }
        false
    }
}
