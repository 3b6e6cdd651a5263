//! Iterators for `ChainTable`
//!
//! Every iterator walks the bucket array in index order and each chain from
//! its head. That order is an implementation detail, not a guarantee.

use std::{iter::Flatten, slice, vec};

use crate::{bucket::Bucket, Key};

/// An iterator over the entries of a `ChainTable`
pub struct Iter<'a, V> {
    inner: Flatten<slice::Iter<'a, Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(buckets: slice::Iter<'a, Bucket<V>>, len: usize) -> Self {
        Self {
            inner: buckets.flatten(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A mutable iterator over the entries of a `ChainTable`
pub struct IterMut<'a, V> {
    inner: Flatten<slice::IterMut<'a, Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(buckets: slice::IterMut<'a, Bucket<V>>, len: usize) -> Self {
        Self {
            inner: buckets.flatten(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (Key, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// An owning iterator over the entries of a `ChainTable`
///
/// Entries not yet yielded are dropped along with the iterator.
pub struct IntoIter<V> {
    inner: Flatten<vec::IntoIter<Bucket<V>>>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(buckets: Box<[Bucket<V>]>, len: usize) -> Self {
        Self {
            inner: buckets.into_vec().into_iter().flatten(),
            remaining: len,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

/// An iterator over the keys of a `ChainTable`
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// An iterator over the values of a `ChainTable`
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// A mutable iterator over the values of a `ChainTable`
pub struct ValuesMut<'a, V> {
    inner: IterMut<'a, V>,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(iter: IterMut<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}
