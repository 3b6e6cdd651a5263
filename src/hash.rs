//! Bucket hash functions
//!
//! A `ChainTable` never hashes keys itself. It asks an injected [`BucketHash`]
//! for the bucket index of every key it routes. Any `Fn(Key) -> usize` works,
//! and two ready-made functions are provided here.
//!
//! The returned index must be smaller than the table's bucket count. The table
//! does not correct out-of-range indices.

use xxhash_rust::xxh3;

use crate::{error::TableError, Key};

/// Maps a key to the index of the bucket holding it
pub trait BucketHash {
    fn bucket(&self, key: Key) -> usize;
}

impl<F> BucketHash for F
where
    F: Fn(Key) -> usize,
{
    #[inline]
    fn bucket(&self, key: Key) -> usize {
        self(key)
    }
}

/// `key mod bucket_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuloHash {
    bucket_count: usize,
}

impl ModuloHash {
    pub fn new(bucket_count: usize) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        Ok(Self { bucket_count })
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }
}

impl BucketHash for ModuloHash {
    #[inline]
    fn bucket(&self, key: Key) -> usize {
        key as usize % self.bucket_count
    }
}

/// xxh3 digest of the key reduced modulo the bucket count
///
/// Spreads clustered or strided keys (multiples of the bucket count, for
/// instance) that would all land in one bucket under [`ModuloHash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xxh3Hash {
    bucket_count: usize,
    seed: u64,
}

impl Xxh3Hash {
    pub fn new(bucket_count: usize) -> Result<Self, TableError> {
        Self::with_seed(bucket_count, 0)
    }

    pub fn with_seed(bucket_count: usize, seed: u64) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        Ok(Self { bucket_count, seed })
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BucketHash for Xxh3Hash {
    #[inline]
    fn bucket(&self, key: Key) -> usize {
        let digest = xxh3::xxh3_64_with_seed(&key.to_le_bytes(), self.seed);
        (digest % self.bucket_count as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_hash() {
        let hash = |key: Key| (key % 4) as usize;
        assert_eq!(hash.bucket(5), 1);
        assert_eq!(hash.bucket(8), 0);
    }

    #[test]
    fn test_fn_pointer_hash() {
        fn always_zero(_: Key) -> usize {
            0
        }
        let hash: fn(Key) -> usize = always_zero;
        assert_eq!(hash.bucket(u32::MAX), 0);
    }

    #[test]
    fn test_modulo_hash() {
        let hash = ModuloHash::new(4).unwrap();
        assert_eq!(hash.bucket(1), 1);
        assert_eq!(hash.bucket(5), 1);
        assert_eq!(hash.bucket(7), 3);
        assert_eq!(hash.bucket_count(), 4);
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(ModuloHash::new(0), Err(TableError::ZeroBuckets));
        assert_eq!(Xxh3Hash::new(0), Err(TableError::ZeroBuckets));
    }

    #[test]
    fn test_xxh3_in_range() {
        let hash = Xxh3Hash::new(7).unwrap();
        for key in 0..10_000 {
            assert!(hash.bucket(key) < 7);
        }
    }

    #[test]
    fn test_xxh3_deterministic() {
        let a = Xxh3Hash::with_seed(64, 42).unwrap();
        let b = Xxh3Hash::with_seed(64, 42).unwrap();
        for key in [0, 1, 64, 128, u32::MAX] {
            assert_eq!(a.bucket(key), b.bucket(key));
        }
    }

    #[test]
    fn test_xxh3_spreads_strided_keys() {
        // every key is a multiple of 16, so ModuloHash would use a single bucket
        let hash = Xxh3Hash::new(16).unwrap();
        let mut used = [false; 16];
        for key in (0..1024).map(|i| i * 16) {
            used[hash.bucket(key)] = true;
        }
        assert!(used.iter().filter(|&&u| u).count() > 8);
    }
}
