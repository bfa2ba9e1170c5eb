//! Validation utilities for IBF constructor parameter bounds checking

use crate::common::{IbfError, Result};

/// Default space overhead factor (cells per expected difference element).
pub const DEFAULT_ALPHA: f64 = 1.5;

/// Default cell-count threshold used by `contains`.
pub const DEFAULT_QUERY_THRESHOLD: i32 = 1;

/// Validate `(d, k, alpha, query_threshold)` and compute the resulting
/// table size `n = ceil(d * alpha)`.
///
/// # Errors
/// Returns [`IbfError::InvalidParameter`] if:
/// - `d` is zero
/// - `k` is zero
/// - `alpha` is not a positive, finite number
/// - the resulting `n = ceil(d * alpha)` is smaller than `k`
pub fn validate_construction_params(d: u64, k: usize, alpha: f64, query_threshold: i32) -> Result<usize> {
    if d == 0 {
        return Err(IbfError::InvalidParameter {
            param: "d".to_string(),
            value: d.to_string(),
            constraint: "must be >= 1".to_string(),
        });
    }

    if k == 0 {
        return Err(IbfError::InvalidParameter {
            param: "k".to_string(),
            value: k.to_string(),
            constraint: "must be >= 1".to_string(),
        });
    }

    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(IbfError::InvalidParameter {
            param: "alpha".to_string(),
            value: alpha.to_string(),
            constraint: "must be a positive, finite number".to_string(),
        });
    }

    let n = (d as f64 * alpha).ceil() as usize;

    if n < k {
        return Err(IbfError::InvalidParameter {
            param: "k".to_string(),
            value: k.to_string(),
            constraint: format!("must be <= ceil(d * alpha) = {}", n),
        });
    }

    let _ = query_threshold; // no constraint beyond being representable as i32

    Ok(n)
}
