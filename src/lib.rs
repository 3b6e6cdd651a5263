//! Fixed-bucket separate-chaining hash table keyed by unsigned integers.
//!
//! A [`ChainTable`] owns an array of buckets whose length is chosen once, at
//! construction, together with the function that maps keys to buckets.
//! Colliding keys share a bucket's chain; new keys are prepended.
//!
//! ```
//! use chaintable::{ChainTable, Key};
//!
//! let mut table = ChainTable::new(|key: Key| (key % 4) as usize, 4)?;
//!
//! table.insert(1, String::from("a"));
//! table.insert(5, String::from("b"));
//! assert_eq!(table.get(1).map(String::as_str), Some("a"));
//!
//! // remove hands the value back
//! assert_eq!(table.remove(5).as_deref(), Some("b"));
//!
//! // delete drops it in place
//! table.delete(1);
//! assert!(table.is_empty());
//! # Ok::<(), chaintable::TableError>(())
//! ```
//!
//! The table is not synchronized. Wrap it in a lock to share it across threads.

mod bucket;
pub mod entry;
pub mod error;
pub mod hash;
pub mod iter;
pub mod table;

/// Key type stored by every table
pub type Key = u32;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::TableError;
pub use hash::{BucketHash, ModuloHash, Xxh3Hash};
pub use table::ChainTable;
