use std::{fmt, iter, mem};

use log::{debug, trace};

use crate::{
    bucket::Bucket,
    entry::{Entry, OccupiedEntry, VacantEntry},
    error::TableError,
    hash::{BucketHash, ModuloHash, Xxh3Hash},
    iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
    Key,
};

/// A separate-chaining hash table with a fixed number of buckets
///
/// `ChainTable` routes every key through a caller-supplied [`BucketHash`] and
/// keeps colliding keys in a per-bucket chain. The bucket array never grows.
///
/// Values are owned by the table from insertion until they are handed back
/// ([`insert`] overwrite, [`remove`]) or dropped ([`delete`], [`clear`], drop
/// of the table).
///
/// [`insert`]: ChainTable::insert
/// [`remove`]: ChainTable::remove
/// [`delete`]: ChainTable::delete
/// [`clear`]: ChainTable::clear
pub struct ChainTable<V, H = ModuloHash> {
    buckets: Box<[Bucket<V>]>,
    hash: H,
    len: usize,
}

impl<V> ChainTable<V, ModuloHash> {
    /// Create an empty `ChainTable` hashing keys by `key mod bucket_count`
    pub fn with_modulo(bucket_count: usize) -> Result<Self, TableError> {
        Self::new(ModuloHash::new(bucket_count)?, bucket_count)
    }
}

impl<V> ChainTable<V, Xxh3Hash> {
    /// Create an empty `ChainTable` hashing keys with xxh3
    pub fn with_xxh3(bucket_count: usize) -> Result<Self, TableError> {
        Self::new(Xxh3Hash::new(bucket_count)?, bucket_count)
    }
}

impl<V, H> ChainTable<V, H> {
    /// Create an empty `ChainTable` with `bucket_count` buckets
    ///
    /// `hash` must map every key it is given to an index below
    /// `bucket_count`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroBuckets`] if `bucket_count` is zero.
    pub fn new(hash: H, bucket_count: usize) -> Result<Self, TableError>
    where
        H: BucketHash,
    {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }

        let buckets = iter::repeat_with(Bucket::new).take(bucket_count).collect();
        debug!("Created chain table with {} buckets", bucket_count);

        Ok(Self {
            buckets,
            hash,
            len: 0,
        })
    }

    /// Returns the number of entries in the table
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets, fixed at construction
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the chain length of bucket `index`, or `None` past the last bucket
    #[inline]
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Bucket::len)
    }

    /// Returns a reference to the hash function
    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hash
    }

    /// Drops every entry and its value, keeping the bucket array
    pub fn clear(&mut self) {
        let released: usize = self.buckets.iter_mut().map(Bucket::clear).sum();
        debug_assert_eq!(released, self.len);
        self.len = 0;
        debug!("Cleared {} entries from chain table", released);
    }

    /// An iterator over `(key, &value)` pairs, in no particular order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.buckets.iter(), self.len)
    }

    /// An iterator over `(key, &mut value)` pairs, in no particular order
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(self.buckets.iter_mut(), self.len)
    }

    /// An iterator over the keys
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// An iterator over the values
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// An iterator over the values, mutably
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.iter_mut())
    }
}

impl<V, H> ChainTable<V, H>
where
    H: BucketHash,
{
    /// Bucket that `key` hashes to
    ///
    /// # Panics
    ///
    /// Panics if the hash function returns an index past the last bucket.
    #[inline]
    fn bucket_index(&self, key: Key) -> usize {
        let index = self.hash.bucket(key);
        assert!(
            index < self.buckets.len(),
            "hash of key {} is bucket {}, but the table has {} buckets",
            key,
            index,
            self.buckets.len()
        );
        index
    }

    /// Inserts a key-value pair into the table
    ///
    /// If the table did not have this key present, the entry becomes the head
    /// of its bucket's chain and `None` is returned.
    /// If the table did have this key present, the value is replaced in place,
    /// and the old value is returned.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];

        if let Some(slot) = bucket.find_mut(key) {
            trace!("Replaced value of key {} in bucket {}", key, index);
            return Some(mem::replace(slot, value));
        }

        bucket.push_front(key, value);
        self.len += 1;
        trace!("Inserted key {} into bucket {}", key, index);
        None
    }

    /// Returns a reference to the value stored under `key`
    ///
    /// The table keeps ownership of the value.
    #[inline]
    pub fn get(&self, key: Key) -> Option<&V> {
        self.buckets[self.bucket_index(key)].find(key)
    }

    /// Returns a mutable reference to the value stored under `key`
    #[inline]
    pub fn get_mut(&mut self, key: Key) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index].find_mut(key)
    }

    /// Returns the key and a reference to the value stored under `key`
    #[inline]
    pub fn get_key_value(&self, key: Key) -> Option<(Key, &V)> {
        self.get(key).map(|value| (key, value))
    }

    /// Return `true` if the table contains a value for `key`
    #[inline]
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` from the table, handing its value back to the caller
    pub fn remove(&mut self, key: Key) -> Option<V> {
        let index = self.bucket_index(key);
        let (_, value) = self.buckets[index].unlink(key)?;
        self.len -= 1;
        trace!("Removed key {} from bucket {}", key, index);
        Some(value)
    }

    /// Removes `key` from the table and drops its value
    ///
    /// Does nothing if `key` is absent.
    pub fn delete(&mut self, key: Key) {
        let index = self.bucket_index(key);
        if let Some((_, value)) = self.buckets[index].unlink(key) {
            self.len -= 1;
            drop(value);
            trace!("Deleted key {} from bucket {}", key, index);
        }
    }

    /// Gets the entry for `key` for in-place manipulation
    pub fn entry(&mut self, key: Key) -> Entry<'_, V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let len = &mut self.len;

        if bucket.find(key).is_some() {
            Entry::Occupied(OccupiedEntry::new(bucket, len, key))
        } else {
            Entry::Vacant(VacantEntry::new(bucket, len, key))
        }
    }
}

impl<V, H> Drop for ChainTable<V, H> {
    fn drop(&mut self) {
        if self.len > 0 {
            debug!(
                "Releasing {} entries across {} buckets",
                self.len,
                self.buckets.len()
            );
        }
    }
}

impl<V, H> Extend<(Key, V)> for ChainTable<V, H>
where
    H: BucketHash,
{
    fn extend<T: IntoIterator<Item = (Key, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, H> IntoIterator for ChainTable<V, H> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let buckets = mem::take(&mut self.buckets);
        let len = mem::take(&mut self.len);
        IntoIter::new(buckets, len)
    }
}

impl<'a, V, H> IntoIterator for &'a ChainTable<V, H> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, H> IntoIterator for &'a mut ChainTable<V, H> {
    type Item = (Key, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
