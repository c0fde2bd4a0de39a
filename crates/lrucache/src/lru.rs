//! Recency list for the LRU cache
//!
//! Nodes live in a vector-backed arena and link to each other by slot index,
//! so the list never owns anything beyond the arena itself. Head is the most
//! recently used node, tail the least.

use std::iter::FusedIterator;

/// Node in the recency list
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Arena-backed doubly-linked list ordered by recency
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    /// Place a new, unlinked node in the arena and return its slot
    pub(crate) fn alloc(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Take a node out of the arena. It must already be detached.
    pub(crate) fn free(&mut self, idx: usize) -> Option<Node<K, V>> {
        let node = self.nodes.get_mut(idx)?.take()?;
        self.free_list.push(idx);
        Some(node)
    }

    /// Unlink a linked node from wherever it sits in the list
    pub(crate) fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.node_mut(prev_idx) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.node_mut(next_idx) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Link an unlinked node in as the new head
    pub(crate) fn push_front(&mut self, idx: usize) {
        let old_head = self.head;

        match self.node_mut(idx) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            }
            None => return,
        }

        if let Some(head_idx) = old_head {
            if let Some(head) = self.node_mut(head_idx) {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head() == Some(idx) {
            return; // Already at front
        }

        self.detach(idx);
        self.push_front(idx);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Walk the list in both directions and check every link.
    /// Returns the number of linked nodes.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) -> usize {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = self.node(idx).expect("linked slot must be occupied");
            assert_eq!(node.prev, prev, "broken back-link at slot {}", idx);
            prev = Some(idx);
            cursor = node.next;
            count += 1;
            assert!(count <= self.nodes.len(), "cycle in recency list");
        }
        assert_eq!(self.tail, prev, "tail does not match last node");

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(count, occupied, "unlinked node left in arena");
        assert_eq!(occupied + self.free_list.len(), self.nodes.len());

        count
    }
}

/// Iterator over cache entries from most to least recently used
///
/// Created by [`LruCache::iter`](crate::LruCache::iter).
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
