//! Error types for IBF operations

use std::fmt;

/// Errors that can occur while constructing or operating on an
/// [`InvertibleBloomFilter`](crate::ibf::InvertibleBloomFilter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbfError {
    /// Invalid parameter provided to the constructor.
    InvalidParameter {
        /// Parameter name.
        param: String,
        /// Invalid value provided.
        value: String,
        /// Constraint that was violated.
        constraint: String,
    },

    /// `subtract` was called with an `other` or `result` whose `(n, k)`
    /// dimensions differ from `self`.
    ParameterMismatch {
        /// Reason for the mismatch.
        reason: String,
    },

    /// Peeling got stuck: no pure cell remains but the table is not all
    /// zero. The symmetric difference exceeded the filter's capacity.
    DecodeIncomplete {
        /// Number of cells that remained non-empty when peeling stalled.
        non_empty_cells: usize,
    },

    /// The rehash-until-distinct loop in `indices_for` exceeded its
    /// iteration cap without finding `k` distinct cell indices.
    HashSaturation {
        /// The element that triggered saturation.
        element: u64,
        /// Number of distinct indices requested.
        k: usize,
        /// Number of cells in the table.
        n: usize,
    },
}

impl fmt::Display for IbfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IbfError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid parameter '{}': value '{}' {}",
                    param, value, constraint
                )
            }
            IbfError::ParameterMismatch { reason } => {
                write!(f, "parameter mismatch: {}", reason)
            }
            IbfError::DecodeIncomplete { non_empty_cells } => {
                write!(
                    f,
                    "decode incomplete: {} cell(s) remain non-empty with no pure cell to peel",
                    non_empty_cells
                )
            }
            IbfError::HashSaturation { element, k, n } => {
                write!(
                    f,
                    "hash saturation: could not find {} distinct indices in {} cells for element {}",
                    k, n, element
                )
            }
        }
    }
}

impl std::error::Error for IbfError {}

/// Result type alias for IBF operations.
pub type Result<T> = std::result::Result<T, IbfError>;
