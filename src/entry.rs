//! Entry API for `ChainTable`

use std::mem;

use crate::{bucket::Bucket, Key};

/// A view into a single entry in a `ChainTable`, which may either be vacant or occupied
pub enum Entry<'a, V> {
    Occupied(OccupiedEntry<'a, V>),
    Vacant(VacantEntry<'a, V>),
}

/// A view into an occupied entry in a `ChainTable`
pub struct OccupiedEntry<'a, V> {
    bucket: &'a mut Bucket<V>,
    len: &'a mut usize,
    key: Key,
}

/// A view into a vacant entry in a `ChainTable`
pub struct VacantEntry<'a, V> {
    bucket: &'a mut Bucket<V>,
    len: &'a mut usize,
    key: Key,
}

impl<'a, V> Entry<'a, V> {
    /// Returns this entry's key
    pub fn key(&self) -> Key {
        match self {
            Entry::Occupied(entry) => entry.key,
            Entry::Vacant(entry) => entry.key,
        }
    }

    /// Value stored under the key, inserting `default` first if vacant
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    /// Like `or_insert`, but `default` only runs for a vacant entry
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        self.or_insert_with_key(|_| default())
    }

    /// Like `or_insert_with`, but the key is passed to the function
    ///
    /// A vacant key becomes the head of its bucket's chain.
    pub fn or_insert_with_key<F: FnOnce(Key) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let key = entry.key;
                entry.insert(default(key))
            }
        }
    }

    /// Runs `f` on the stored value if the key is present
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            vacant => vacant,
        }
    }
}

impl<'a, V: Default> Entry<'a, V> {
    /// `or_insert_with(V::default)`
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Only built by `ChainTable::entry` after `key` was found in `bucket`
    pub(crate) fn new(bucket: &'a mut Bucket<V>, len: &'a mut usize, key: Key) -> Self {
        Self { bucket, len, key }
    }

    /// Gets the key in the entry
    pub fn key(&self) -> Key {
        self.key
    }

    /// Gets a reference to the value in the entry
    pub fn get(&self) -> &V {
        self.bucket
            .find(self.key)
            .expect("OccupiedEntry: key not found")
    }

    /// Gets a mutable reference to the value in the entry
    pub fn get_mut(&mut self) -> &mut V {
        self.bucket
            .find_mut(self.key)
            .expect("OccupiedEntry: key not found")
    }

    /// Converts the entry into a mutable reference to its value
    pub fn into_mut(self) -> &'a mut V {
        let Self { bucket, key, .. } = self;
        bucket.find_mut(key).expect("OccupiedEntry: key not found")
    }

    /// Sets the value of the entry, and returns the entry's old value
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value out of the entry, and returns it
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Takes the key and value out of the entry
    pub fn remove_entry(self) -> (Key, V) {
        let removed = self
            .bucket
            .unlink(self.key)
            .expect("OccupiedEntry: key not found");
        *self.len -= 1;
        removed
    }
}

impl<'a, V> VacantEntry<'a, V> {
    pub(crate) fn new(bucket: &'a mut Bucket<V>, len: &'a mut usize, key: Key) -> Self {
        Self { bucket, len, key }
    }

    /// Gets the key that would be used when inserting
    pub fn key(&self) -> Key {
        self.key
    }

    /// Takes ownership of the key
    pub fn into_key(self) -> Key {
        self.key
    }

    /// Sets the value of the entry at the head of its chain, and returns a
    /// mutable reference to it
    pub fn insert(self, value: V) -> &'a mut V {
        let Self { bucket, len, key } = self;
        *len += 1;
        bucket.push_front(key, value)
    }
}
