// =====================================================================
// File: error.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 1, 2025
//
// Description:
//   Error type shared by both index structures and the configuration
//   layer. Lookups never fail (a missing key is `None`); everything in
//   here is either a rejected mutation or a broken invariant.
// =====================================================================
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors reported by [`OrderedIndex`](crate::OrderedIndex),
/// [`HashIndex`](crate::HashIndex) and [`IndexConfig`](crate::IndexConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The key is already present. The index is unchanged.
    #[error("duplicate key")]
    DuplicateKey,

    /// `first_key` / `last_key` on an index with no entries.
    #[error("index is empty")]
    EmptyIndex,

    /// The hash directory would have to grow past its depth cap.
    #[error("hash directory cannot grow past global depth {depth}")]
    DirectoryFull { depth: u32 },

    #[error("invalid index configuration: {0}")]
    InvalidConfig(String),

    /// A structural invariant does not hold. Always a bug.
    #[error("index structure corrupted: {0}")]
    Corrupted(String),
}
