//! Bucket holding the head of a collision chain.
//!
//! - Singly linked chain of boxed nodes, newest first
//! - Every node exclusively owns its successor
//! - Traversal only through `Iter`/`IterMut`, unlinking only through a cursor
//!   over `Link` slots, so the chain's terminal slot is always checked

use std::fmt;

use crate::Key;

/// Slot that either owns the next node or terminates the chain
type Link<V> = Option<Box<Node<V>>>;

struct Node<V> {
    key: Key,
    value: V,
    next: Link<V>,
}

/// One slot of the table's bucket array
pub struct Bucket<V> {
    head: Link<V>,

    /// Number of nodes reachable from `head`
    len: usize,
}

impl<V> Bucket<V> {
    /// Create new empty bucket
    #[inline]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of entries in the chain
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the chain has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Make a new entry the head of the chain
    ///
    /// O(1): the caller has already searched the chain for `key`.
    pub fn push_front(&mut self, key: Key, value: V) -> &mut V {
        let next = self.head.take();
        let node = self.head.insert(Box::new(Node { key, value, next }));
        self.len += 1;
        &mut node.value
    }

    /// Detach the head of the chain
    pub fn pop_front(&mut self) -> Option<(Key, V)> {
        let node = self.head.take()?;
        let Node { key, value, next } = *node;
        self.head = next;
        self.len -= 1;
        Some((key, value))
    }

    /// Find the value stored under `key`
    #[inline]
    pub fn find(&self, key: Key) -> Option<&V> {
        self.iter()
            .find_map(|(k, value)| (k == key).then_some(value))
    }

    /// Find the value stored under `key` for mutation
    #[inline]
    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        self.iter_mut()
            .find_map(|(k, value)| (k == key).then_some(value))
    }

    /// Unlink the entry stored under `key` and hand back its key and value
    ///
    /// The cursor always points at a `Link` slot: either the bucket head or the
    /// `next` of the previous node. Reaching the terminal slot ends the walk
    /// with `None` from `take`, never with a dereference.
    pub fn unlink(&mut self, key: Key) -> Option<(Key, V)> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let node = cursor.take()?;
        let Node { key, value, next } = *node;
        // successor moves into the slot before the node's storage is released
        *cursor = next;
        self.len -= 1;
        Some((key, value))
    }

    /// Release every entry, returning how many were released
    pub fn clear(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let released = self.len;
        let mut link = self.head.take();
        // advance before the current node drops, without recursing per node
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
        released
    }

    /// Iterate over the chain, newest entry first
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Iterate over the chain with mutable values
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for Bucket<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for Bucket<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over one chain
pub struct Iter<'a, V> {
    next: Option<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            (node.key, &node.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Iterator over one chain with mutable values
pub struct IterMut<'a, V> {
    next: Option<&'a mut Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (Key, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            (node.key, &mut node.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// Owning iterator that drains one chain from the head
pub struct IntoIter<V> {
    bucket: Bucket<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.bucket.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bucket.len(), Some(self.bucket.len()))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for Bucket<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { bucket: self }
    }
}

impl<'a, V> IntoIterator for &'a Bucket<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut Bucket<V> {
    type Item = (Key, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
