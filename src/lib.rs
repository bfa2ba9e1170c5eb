//! ibf_oxide: an Invertible Bloom Filter for set reconciliation
//!
//! An Invertible Bloom Filter (IBF) encodes a multiset of 64-bit element
//! identifiers into a fixed-size table of XOR cells. Two filters built with
//! the same `(n, k)` can be subtracted to obtain a filter encoding their
//! symmetric difference, which a peeling decoder then unwinds back into the
//! actual differing elements — all in space proportional to the expected
//! difference size rather than the full set size.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod common;
pub mod ibf;

pub use common::{hash, IbfError, Result};
pub use ibf::{Cell, DecodedDifference, InvertibleBloomFilter};

/// Error types and result aliases for IBF operations
pub mod error {
    pub use crate::common::{IbfError, Result};
}

#[cfg(test)]
mod tests {
    #[test]
    fn library_compiles() {}
}
