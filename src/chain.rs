use crate::types::*;

struct Node {
    key: Key,
    value: Value,
    next: Option<Box<Node>>,
}

/// Singly linked list of key/value entries with unique keys.
/// New keys are prepended, existing keys are overwritten in place.
pub struct Chain {
    first: Option<Box<Node>>,
    length: usize,
}

impl Chain {
    pub fn new() -> Self {
        Chain {
            first: None,
            length: 0,
        }
    }

    /// Returns true if a new entry was created.
    pub fn add(&mut self, key: Key, value: Value) -> bool {
        let mut iternode = self.first.as_deref_mut();
        while let Some(node) = iternode {
            if node.key == key {
                node.value = value;
                return false;
            }
            iternode = node.next.as_deref_mut();
        }
        let next = self.first.take();
        self.first = Some(Box::new(Node { key, value, next }));
        self.length += 1;
        true
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            next: self.first.as_deref(),
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        // unlink one node at a time so long chains don't recurse
        let mut iternode = self.first.take();
        while let Some(mut node) = iternode {
            iternode = node.next.take();
        }
    }
}

pub struct ChainIter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (node.key, node.value)
        })
    }
}
