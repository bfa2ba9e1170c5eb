//! Invertible Bloom Filter for set reconciliation
//!
//! An `InvertibleBloomFilter` hashes each 64-bit element into `k` cells of a
//! fixed-size table. Cells are reversible XOR aggregates, so subtracting two
//! filters with identical `(n, k)` yields a filter encoding their symmetric
//! difference, which an iterative peeling decoder can then unwind back into
//! the individual differing elements.
//!
//! # Example
//!
//! ```
//! use ibf_oxide::ibf::InvertibleBloomFilter;
//!
//! let mut alice = InvertibleBloomFilter::new(10, 3, None, None).unwrap();
//! let mut bob = InvertibleBloomFilter::new(10, 3, None, None).unwrap();
//!
//! alice.encode([1, 2, 3]).unwrap();
//! bob.encode([2, 3, 4]).unwrap();
//!
//! let mut diff = InvertibleBloomFilter::new(10, 3, None, None).unwrap();
//! alice.subtract(&bob, &mut diff).unwrap();
//!
//! let result = diff.decode().unwrap();
//! assert_eq!(result.missing_in_b, vec![1]);
//! assert_eq!(result.missing_in_a, vec![4]);
//! ```
//!
//! # References
//!
//! - Goodrich, M. T., & Mitzenmacher, M. (2011). "Invertible bloom lookup tables"
//! - Eppstein, D., et al. (2011). "What's the difference? Efficient set reconciliation"

use std::fmt;

use crate::common::hash::{hash_u64, hash_u64_salted};
use crate::common::validation::{validate_construction_params, DEFAULT_ALPHA, DEFAULT_QUERY_THRESHOLD};
use crate::common::{IbfError, Result};

/// A single reversible cell in the IBF table.
///
/// `(0, 0, 0)` is the identity element: inserting and then removing the same
/// element restores a cell to this state exactly, because every field is
/// updated with XOR (or, for `count`, with an operation that is its own
/// inverse when replayed with the same delta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Net number of elements hashed into this cell. Negative only after
    /// subtraction.
    pub count: i32,
    /// XOR of every element hashed into this cell.
    pub id_sum: u64,
    /// XOR of `checksum_hash(e)` for every element `e` hashed into this cell.
    pub hash_sum: u32,
}

impl Cell {
    /// The zero cell, identity under insertion/subtraction.
    pub const ZERO: Cell = Cell {
        count: 0,
        id_sum: 0,
        hash_sum: 0,
    };

    fn insert(&mut self, element: u64) {
        self.count += 1;
        self.id_sum ^= element;
        self.hash_sum ^= checksum_hash(element);
    }

    /// Remove `element` from this cell, given the signed count `c` carried
    /// by the pure cell at the moment of extraction. Subtracts `c` rather
    /// than a fixed `1`/`-1`, so peeling a `-1` pure cell *adds* back to the
    /// count (net neutralisation) rather than driving it further negative.
    fn peel(&mut self, element: u64, c: i32) {
        self.count -= c;
        self.id_sum ^= element;
        self.hash_sum ^= checksum_hash(element);
    }

    fn subtract(&self, other: &Cell) -> Cell {
        Cell {
            count: self.count - other.count,
            id_sum: self.id_sum ^ other.id_sum,
            hash_sum: self.hash_sum ^ other.hash_sum,
        }
    }

    /// A cell is pure iff its count is exactly `+1` or `-1` and its
    /// `hash_sum` matches the checksum hash of its `id_sum`. The checksum
    /// check is what keeps hash-collision garbage from masquerading as a
    /// genuine singleton.
    fn is_pure(&self) -> bool {
        (self.count == 1 || self.count == -1) && checksum_hash(self.id_sum) == self.hash_sum
    }

    fn is_zero(&self) -> bool {
        self.count == 0 && self.id_sum == 0 && self.hash_sum == 0
    }
}

/// Result of successfully peeling an IBF to completion.
///
/// On a filter that was only `encode`d (never subtracted), every element
/// recovered carries a positive count and ends up in `missing_in_b`, while
/// `missing_in_a` is empty — this is how decoding a plain encoded filter
/// recovers the original inserted set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedDifference {
    /// Elements present in the filter this IBF was encoded from ("A") but
    /// absent from the one it was subtracted against ("B").
    pub missing_in_b: Vec<u64>,
    /// Elements present in "B" but absent from "A".
    pub missing_in_a: Vec<u64>,
}

/// Cap on rehash attempts in [`InvertibleBloomFilter::indices_for`], as a
/// multiple of `k`. Reasonable `k << n` configurations converge in a handful
/// of rehashes; this bound exists only to turn a pathological configuration
/// into a reported error instead of an unbounded loop.
const REHASH_ATTEMPTS_PER_INDEX: usize = 256;

/// An Invertible Bloom Filter over 64-bit unsigned element identifiers.
///
/// See the [module documentation](self) for the algorithm overview.
#[derive(Debug, Clone)]
pub struct InvertibleBloomFilter {
    n: usize,
    k: usize,
    query_threshold: i32,
    cells: Vec<Cell>,
}

impl InvertibleBloomFilter {
    /// Create a filter sized for a symmetric difference of up to `d`
    /// elements, using `k` hash functions.
    ///
    /// `alpha` (default `1.5`) is the space overhead factor: the table holds
    /// `n = ceil(d * alpha)` cells. `query_threshold` (default `1`) is the
    /// minimum per-cell count `contains` requires at every hashed position.
    ///
    /// # Errors
    /// Returns [`IbfError::InvalidParameter`] if `d == 0`, `k == 0`, `alpha`
    /// is not a positive finite number, or `k` exceeds the resulting `n`.
    ///
    /// # Examples
    /// ```
    /// use ibf_oxide::ibf::InvertibleBloomFilter;
    ///
    /// let ibf = InvertibleBloomFilter::new(10, 3, None, None).unwrap();
    /// assert_eq!(ibf.n(), 15);
    /// assert_eq!(ibf.k(), 3);
    /// ```
    pub fn new(d: u64, k: usize, alpha: Option<f64>, query_threshold: Option<i32>) -> Result<Self> {
        let alpha = alpha.unwrap_or(DEFAULT_ALPHA);
        let query_threshold = query_threshold.unwrap_or(DEFAULT_QUERY_THRESHOLD);
        let n = validate_construction_params(d, k, alpha, query_threshold)?;

        Ok(Self {
            n,
            k,
            query_threshold,
            cells: vec![Cell::ZERO; n],
        })
    }

    /// Number of cells in the table.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of hash functions (distinct cell indices per element).
    pub fn k(&self) -> usize {
        self.k
    }

    /// Cell-count threshold used by [`Self::contains`].
    pub fn query_threshold(&self) -> i32 {
        self.query_threshold
    }

    /// Reset every cell to `(0, 0, 0)` in place, without reallocating the
    /// table. Unlike constructing a fresh filter, this preserves `(n, k,
    /// query_threshold)`.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::ZERO;
        }
    }

    /// Compute the `k` distinct cell indices `element` hashes to.
    ///
    /// Derives an initial digest of `element`, then repeatedly rehashes the
    /// previous digest until `k` distinct indices in `[0, n)` have been
    /// collected. Deterministic: the same `element` against filters with the
    /// same `n` always yields the same index set.
    ///
    /// # Errors
    /// Returns [`IbfError::HashSaturation`] if `k` distinct indices could not
    /// be found within the rehash cap — vanishingly unlikely for `k << n`.
    pub fn indices_for(&self, element: u64) -> Result<Vec<usize>> {
        let mut indices = Vec::with_capacity(self.k);
        let mut digest = hash_u64(element, 0);
        let max_attempts = self.k.saturating_mul(REHASH_ATTEMPTS_PER_INDEX).max(1);

        for _ in 0..max_attempts {
            if indices.len() == self.k {
                break;
            }
            let idx = (digest % self.n as u64) as usize;
            if !indices.contains(&idx) {
                indices.push(idx);
            }
            digest = hash_u64(digest, 0);
        }

        if indices.len() != self.k {
            return Err(IbfError::HashSaturation {
                element,
                k: self.k,
                n: self.n,
            });
        }

        Ok(indices)
    }

    /// Insert every element of `items` into the filter.
    ///
    /// Additive: calling `encode` again adds to the existing state rather
    /// than replacing it. Duplicates are not deduplicated — each occurrence
    /// contributes independently, preserving multiset semantics.
    ///
    /// # Errors
    /// Propagates [`IbfError::HashSaturation`] from [`Self::indices_for`] if
    /// placement fails for some element.
    pub fn encode<I: IntoIterator<Item = u64>>(&mut self, items: I) -> Result<()> {
        for element in items {
            let indices = self.indices_for(element)?;
            for idx in indices {
                debug_assert!(idx < self.n, "indices_for produced an out-of-range index");
                self.cells[idx].insert(element);
            }
        }
        Ok(())
    }

    /// Subtract `other` from `self`, writing the result into `result`.
    ///
    /// Requires `self`, `other`, and `result` to share identical `(n, k)`.
    /// `result` is semantically `self - other`: cells unique to `self`
    /// contribute positive counts, cells unique to `other` contribute
    /// negative counts.
    ///
    /// # Errors
    /// Returns [`IbfError::ParameterMismatch`] if any of `other`/`result`
    /// differ in `n` or `k` from `self`. No cells in `result` are mutated
    /// before this check is performed.
    pub fn subtract(&self, other: &Self, result: &mut Self) -> Result<()> {
        if self.n != other.n || self.n != result.n {
            return Err(IbfError::ParameterMismatch {
                reason: format!(
                    "cell count mismatch: self.n={}, other.n={}, result.n={}",
                    self.n, other.n, result.n
                ),
            });
        }
        if self.k != other.k || self.k != result.k {
            return Err(IbfError::ParameterMismatch {
                reason: format!(
                    "hash function count mismatch: self.k={}, other.k={}, result.k={}",
                    self.k, other.k, result.k
                ),
            });
        }

        for i in 0..self.n {
            result.cells[i] = self.cells[i].subtract(&other.cells[i]);
        }

        Ok(())
    }

    /// Check whether `element` is (probably) a member of the multiset this
    /// filter encodes.
    ///
    /// Only meaningful on a freshly encoded filter: on one that has been
    /// subtracted, cell counts can be negative or zero even for elements
    /// that were originally inserted, so this method's result is undefined
    /// there. On an encode-only filter there are no false negatives; false
    /// positives occur with probability decreasing in `k` and `alpha`.
    ///
    /// Hash saturation (see [`Self::indices_for`]) is treated as
    /// non-membership, since a placement that cannot be computed cannot be
    /// truthfully claimed present.
    pub fn contains(&self, element: u64) -> bool {
        let Ok(indices) = self.indices_for(element) else {
            return false;
        };
        indices
            .into_iter()
            .all(|idx| self.cells[idx].count >= self.query_threshold)
    }

    /// Destructively peel this filter down to the zero table, recovering the
    /// symmetric difference it encodes.
    ///
    /// Repeatedly finds a pure cell, extracts its element, and removes that
    /// element's contribution from every cell it was hashed into (including
    /// the one it was extracted from, which becomes zero). The worklist is
    /// LIFO; since XOR and integer subtraction are commutative, peeling
    /// order never affects the outcome.
    ///
    /// Calling `decode` on a filter that was only `encode`d (never
    /// subtracted) recovers the original inserted multiset into
    /// `missing_in_b`, with `missing_in_a` left empty.
    ///
    /// # Errors
    /// Returns [`IbfError::DecodeIncomplete`] if peeling stalls with
    /// non-empty cells remaining and no pure cell to continue from — the
    /// symmetric difference exceeded this filter's capacity (roughly
    /// `n / (k + 1)`). The filter is left in a partially-peeled state and
    /// must not be reused.
    pub fn decode(&mut self) -> Result<DecodedDifference> {
        let mut worklist: Vec<usize> = (0..self.n).filter(|&i| self.cells[i].is_pure()).collect();

        let mut result = DecodedDifference::default();

        while let Some(i) = worklist.pop() {
            if !self.cells[i].is_pure() {
                continue;
            }

            let element = self.cells[i].id_sum;
            let c = self.cells[i].count;

            if c > 0 {
                result.missing_in_b.push(element);
            } else {
                result.missing_in_a.push(element);
            }

            // Saturation here would mean this element was encoded under a
            // different (n, k) than this filter's current configuration,
            // which cannot happen for a well-formed pure cell.
            let touched = self
                .indices_for(element)
                .expect("pure cell's element must hash under this filter's own (n, k)");

            for j in touched {
                self.cells[j].peel(element, c);
                if self.cells[j].is_pure() {
                    worklist.push(j);
                }
            }
        }

        let non_empty_cells = self.cells.iter().filter(|c| !c.is_zero()).count();
        if non_empty_cells > 0 {
            return Err(IbfError::DecodeIncomplete { non_empty_cells });
        }

        Ok(result)
    }

    /// Diagnostic rendering of the cell table, one line per cell:
    /// `idx | count: C id_sum: I hash_sum: H`.
    pub fn to_cell_string(&self) -> String {
        let mut out = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            out.push_str(&format!(
                "{} | count: {} id_sum: {} hash_sum: {}\n",
                i, cell.count, cell.id_sum, cell.hash_sum
            ));
        }
        out
    }
}

impl fmt::Display for InvertibleBloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell_string())
    }
}

/// Checksum hash used to validate cell purity. Deliberately distinct from
/// the placement hash in [`InvertibleBloomFilter::indices_for`] via a fixed
/// salt, so purity is not trivially satisfied by coincidence.
fn checksum_hash(element: u64) -> u32 {
    hash_u64_salted(element, "checksum", 0) as u32
}
