// =====================================================================
// File: session.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 3, 2025
//
// Description:
// Defines the `Session` struct, the running context the shell drives.
// It stands in for a table with one key column indexed twice:
//
// - `tree`: the ordered B+Tree index (point, range, first/last).
// - `hash`: the extendable hash index (point lookups only).
//
// Every write is pushed into both indexes, the same way a table pushes
// a new row into each of its live indexes.
// =====================================================================

use crate::{HashIndex, IndexConfig, IndexError, OrderedIndex, Result};

/// Which index a read is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Tree,
    Hash,
}


impl IndexKind {
    /// Parses `TREE` / `HASH` (any case).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "TREE" => Some(IndexKind::Tree),
            "HASH" => Some(IndexKind::Hash),
            _ => None,
        }
    }
}


/// Represents a single in-memory indexing session.
pub struct Session {
    pub config: IndexConfig,
    pub tree: OrderedIndex<String, String>,
    pub hash: HashIndex<String, String>,
}


impl Session {
    /// Creates a new, empty session with default sizes.
    ///
    /// # Example
    /// ```
    /// use tableindex::Session;
    /// let session = Session::new();
    /// assert!(session.tree.is_empty());
    /// assert!(session.hash.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            config: IndexConfig::default(),
            tree: OrderedIndex::new(),
            hash: HashIndex::new(IndexConfig::default().initial_directory),
        }
    }

    /// Creates a session whose indexes are sized from `config`.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tree: OrderedIndex::with_fanout(config.fanout)?,
            hash: HashIndex::with_slots(config.initial_directory, config.slots)?,
        })
    }

    /// Pushes one entry into both indexes.
    ///
    /// The tree is checked first so a duplicate leaves both untouched.
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        if self.tree.contains_key(&key) {
            return Err(IndexError::DuplicateKey);
        }
        self.hash.put(key.clone(), value.clone())?;
        self.tree.put(key, value)
    }

    /// Point lookup routed to one index.
    pub fn get(&self, key: &str, kind: IndexKind) -> Option<&str> {
        let key = key.to_string();
        let value = match kind {
            IndexKind::Tree => self.tree.get(&key),
            IndexKind::Hash => self.hash.get(&key),
        };
        value.map(String::as_str)
    }
}


impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}


// =====================================================================
// Unit Tests for Session
// =====================================================================
