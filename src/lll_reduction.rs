/// Lenstra–Lenstra–Lovász lattice basis reduction
///
/// The reduction keeps a working index k (starting at 1) and repeats:
///
/// 1. Size reduction: for j = k−1 down to 0, if |μ_kj| > ½ then
///    b_k ← b_k − round(μ_kj)·b_j, recomputing Gram-Schmidt after each update
/// 2. Lovász test: if δ·||b*_{k−1}||² > ||b*_k||² + μ²_{k,k−1}·||b*_{k−1}||²
///    swap b_k and b_{k−1} and set k ← max(k−1, 1); otherwise k ← k+1
///
/// until k reaches the number of vectors. Gram-Schmidt data is recomputed in
/// full after every change to the basis rather than updated incrementally.
///
/// Input bases are validated up front: they must be non-empty, rectangular
/// and linearly independent (exact rank check). A safety bound on loop
/// iterations turns a runaway reduction into `DidNotConverge`.

use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};
use crate::lattice::{gram_schmidt, sub_scaled, LatticeBasis};

/// Lovász parameter used when none is given
pub const DEFAULT_DELTA: f64 = 0.75;

/// Default safety bound on outer-loop iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Tolerance used when checking a basis against the LLL conditions
const CHECK_TOLERANCE: f64 = 1e-9;

/// Slack on the |μ| > ½ size-reduction trigger, so that an exact ½ carrying
/// rounding noise is left alone and a reduced basis is a fixed point
const SIZE_REDUCTION_TOLERANCE: f64 = 1e-9;

/// LLL reduction parameters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LllParams {
    /// Lovász parameter δ ∈ (0.5, 1)
    pub delta: f64,
    /// Outer-loop iterations before giving up
    pub max_iterations: usize,
}

impl Default for LllParams {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl LllParams {
    /// Parameters with the given δ and the default iteration bound
    pub fn new(delta: f64) -> Result<Self> {
        let params = Self {
            delta,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        // The negated comparison also rejects NaN
        if !(self.delta > 0.5 && self.delta < 1.0) {
            return Err(LatticeError::InvalidParameters(format!(
                "delta must be in (0.5, 1), got {}",
                self.delta
            )));
        }
        if self.max_iterations == 0 {
            return Err(LatticeError::InvalidParameters(
                "max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Work counters for one reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LllStats {
    /// Outer-loop iterations
    pub iterations: usize,
    /// Lovász swaps
    pub swaps: usize,
    /// Size-reduction updates b_k ← b_k − r·b_j
    pub size_reductions: usize,
    /// Full Gram-Schmidt recomputations
    pub gso_updates: usize,
}

/// Returns an LLL-reduced copy of `basis`
///
/// # Errors
/// * `EmptyBasis`, `InvalidDimension` - malformed basis
/// * `InvalidParameters` - δ outside (0.5, 1)
/// * `LinearlyDependent` - the vectors do not form a basis
/// * `DidNotConverge` - `params.max_iterations` was exceeded
pub fn lll_reduce(basis: &[Vec<i64>], params: &LllParams) -> Result<Vec<Vec<i64>>> {
    lll_reduce_with_stats(basis, params).map(|(reduced, _)| reduced)
}

/// [`lll_reduce`], also reporting how much work the reduction did
pub fn lll_reduce_with_stats(
    basis: &[Vec<i64>],
    params: &LllParams,
) -> Result<(Vec<Vec<i64>>, LllStats)> {
    params.validate()?;
    let validated = LatticeBasis::new(basis.to_vec())?;
    validated.ensure_independent()?;

    let mut b = validated.into_vectors();
    let n = b.len();
    let mut stats = LllStats::default();
    let mut k = 1;

    while k < n {
        if stats.iterations == params.max_iterations {
            return Err(LatticeError::DidNotConverge {
                iterations: params.max_iterations,
            });
        }
        stats.iterations += 1;

        let mut gs = gram_schmidt(&b);
        stats.gso_updates += 1;

        for j in (0..k).rev() {
            let mu = gs.mu[k][j];
            if mu.abs() > 0.5 + SIZE_REDUCTION_TOLERANCE {
                let r = mu.round_ties_even() as i64;
                log::trace!("size reduction: b_{} -= {}·b_{}", k, r, j);
                b[k] = sub_scaled(&b[k], &b[j], r)?;
                stats.size_reductions += 1;

                gs = gram_schmidt(&b);
                stats.gso_updates += 1;
            }
        }

        let mu = gs.mu[k][k - 1];
        let prev = gs.norms_sq[k - 1];
        if params.delta * prev > gs.norms_sq[k] + mu * mu * prev {
            log::trace!("lovász swap: b_{} <-> b_{}", k - 1, k);
            b.swap(k, k - 1);
            stats.swaps += 1;
            k = (k - 1).max(1);
        } else {
            k += 1;
        }
    }

    log::debug!(
        "lll reduction of {} vectors finished: {} iterations, {} swaps, {} size reductions",
        n,
        stats.iterations,
        stats.swaps,
        stats.size_reductions
    );

    Ok((b, stats))
}

/// Checks size reduction (|μ_ij| ≤ ½) and the Lovász condition for every
/// consecutive pair, up to a small floating tolerance
///
/// Returns false for an empty or ragged basis.
pub fn is_lll_reduced(basis: &[Vec<i64>], delta: f64) -> bool {
    let Ok(validated) = LatticeBasis::new(basis.to_vec()) else {
        return false;
    };
    let gs = validated.gram_schmidt();

    for i in 1..basis.len() {
        if gs.mu[i][..i].iter().any(|m| m.abs() > 0.5 + CHECK_TOLERANCE) {
            return false;
        }

        let mu = gs.mu[i][i - 1];
        let prev = gs.norms_sq[i - 1];
        let lhs = delta * prev;
        let rhs = gs.norms_sq[i] + mu * mu * prev;
        if lhs > rhs + CHECK_TOLERANCE * (1.0 + lhs.abs()) {
            return false;
        }
    }
    true
}

/// Reduces independent bases on the rayon thread pool
///
/// Results are returned in input order; one failing basis does not affect
/// the others.
pub fn lll_reduce_batch(bases: &[Vec<Vec<i64>>], params: &LllParams) -> Vec<Result<Vec<Vec<i64>>>> {
    bases
        .par_iter()
        .map(|basis| lll_reduce(basis, params))
        .collect()
}

impl LatticeBasis {
    /// LLL-reduced copy of this basis
    pub fn lll_reduce(&self, params: &LllParams) -> Result<LatticeBasis> {
        lll_reduce(self.vectors(), params).and_then(LatticeBasis::new)
    }

    pub fn is_lll_reduced(&self, delta: f64) -> bool {
        is_lll_reduced(self.vectors(), delta)
    }
}
