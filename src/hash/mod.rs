// =====================================================================
// File: hash/mod.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 30, 2025
//
//! The `hash` module contains the Extendable Hashing map used as the
//! table's unordered point-lookup index.
//!
//! Structure:
//! - `bucket.rs` : Defines the fixed-capacity [`Bucket`].
//! - `table.rs`  : Defines the [`HashIndex`], its directory and the
//!                 bucket split / directory doubling logic.
//! - `tests.rs`  : Unit tests (compiled only in test mode).
// =====================================================================

pub mod bucket;
pub mod table;

pub use self::bucket::Bucket;
pub use self::table::{DEFAULT_SLOTS, HashIndex, MAX_GLOBAL_DEPTH};
