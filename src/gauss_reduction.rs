/// Two-dimensional Gauss (Lagrange) basis reduction
///
/// Given linearly independent b1, b2 the loop alternates two moves until the
/// rounded projection coefficient vanishes:
///
/// ```text
/// if ||b2|| < ||b1||:  swap(b1, b2)
/// else:                t = round(<b1, b2> / <b1, b1>);  b2 ← b2 − t·b1
/// ```
///
/// On exit ||b1|| ≤ ||b2|| and |<b1, b2>| ≤ ½<b1, b1>, so b1 is a shortest
/// nonzero vector of the lattice. Rounding is half-to-even; rounding ties away
/// from zero lets t alternate between +1 and −1 forever.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};
use crate::lattice::{dot, sub_scaled, LatticeBasis};

/// Default safety bound on loop iterations
pub const DEFAULT_GAUSS_ITERATIONS: usize = 10_000;

/// Parameters for Gauss reduction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussParams {
    /// Loop iterations (swaps and reductions) before giving up
    pub max_iterations: usize,
}

impl Default for GaussParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_GAUSS_ITERATIONS,
        }
    }
}

/// One recorded state of the reduction loop
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussStep {
    pub step: usize,
    pub b1: Vec<i64>,
    pub b2: Vec<i64>,
}

/// Full record of a traced reduction
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussTrace {
    /// The (b1, b2) pair seen at each iteration, after any swap and before
    /// the size reduction. The last entry is the reduced basis.
    pub steps: Vec<GaussStep>,
    /// Final shortest vector
    pub shortest: Vec<i64>,
    pub b1: Vec<i64>,
    pub b2: Vec<i64>,
}

/// Reduces the basis (b1, b2) with default parameters
///
/// # Errors
/// * `InvalidDimension` - the vectors have different lengths
/// * `LinearlyDependent` - b1 and b2 are dependent (including a zero vector)
/// * `DidNotConverge` - the iteration bound was hit
pub fn reduce_2d_basis(b1: &[i64], b2: &[i64]) -> Result<(Vec<i64>, Vec<i64>)> {
    reduce_2d_basis_with_params(b1, b2, &GaussParams::default())
}

pub fn reduce_2d_basis_with_params(
    b1: &[i64],
    b2: &[i64],
    params: &GaussParams,
) -> Result<(Vec<i64>, Vec<i64>)> {
    reduce(b1, b2, params, None)
}

/// Reduces (b1, b2) and records every intermediate pair
pub fn reduce_2d_basis_traced(b1: &[i64], b2: &[i64], params: &GaussParams) -> Result<GaussTrace> {
    let mut steps = Vec::new();
    let (b1, b2) = reduce(b1, b2, params, Some(&mut steps))?;
    Ok(GaussTrace {
        steps,
        shortest: b1.clone(),
        b1,
        b2,
    })
}

fn reduce(
    b1: &[i64],
    b2: &[i64],
    params: &GaussParams,
    mut trace: Option<&mut Vec<GaussStep>>,
) -> Result<(Vec<i64>, Vec<i64>)> {
    let basis = LatticeBasis::new(vec![b1.to_vec(), b2.to_vec()])?;
    basis.ensure_independent()?;

    let mut b1 = b1.to_vec();
    let mut b2 = b2.to_vec();
    let mut step = 0;

    for _ in 0..params.max_iterations {
        let norm1 = dot(&b1, &b1);
        if dot(&b2, &b2) < norm1 {
            log::trace!("gauss step {}: swap", step);
            std::mem::swap(&mut b1, &mut b2);
            continue;
        }

        let t = (dot(&b1, &b2) as f64 / norm1 as f64).round_ties_even() as i64;

        if let Some(steps) = trace.as_deref_mut() {
            steps.push(GaussStep {
                step,
                b1: b1.clone(),
                b2: b2.clone(),
            });
        }
        step += 1;

        if t == 0 {
            log::debug!("gauss reduction finished after {} steps", step);
            return Ok((b1, b2));
        }

        log::trace!("gauss step {}: b2 -= {}·b1", step, t);
        b2 = sub_scaled(&b2, &b1, t)?;
    }

    Err(LatticeError::DidNotConverge {
        iterations: params.max_iterations,
    })
}
