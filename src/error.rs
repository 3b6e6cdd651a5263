//! Errors reported by `ChainTable` constructors

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table needs at least one bucket to route keys to
    #[error("hash table has to contain at least 1 bucket")]
    ZeroBuckets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TableError::ZeroBuckets.to_string(),
            "hash table has to contain at least 1 bucket"
        );
    }
}
