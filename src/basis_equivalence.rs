/// Lattice basis equivalence
///
/// Two square bases B₁, B₂ (basis vectors as matrix columns) generate the
/// same lattice iff B₂ = B₁·T for an integer matrix T with det(T) = ±1.
///
/// [`are_bases_equivalent`] decides this exactly over arbitrary-precision
/// integers. By Cramer's rule T_ic = det(B₁ with column i replaced by column c
/// of B₂) / det(B₁), so T is integral iff det(B₁) divides every such minor,
/// and det(T) = ±1 iff |det B₂| = |det B₁|.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{LatticeError, Result};
use crate::lattice::{integer_determinant, LatticeBasis};

/// Whether two square bases generate the same lattice
///
/// A singular first basis, a non-integral transform or a transform whose
/// determinant is not ±1 all give `Ok(false)`. The answer does not depend on
/// argument order.
///
/// # Errors
/// * `EmptyBasis`, `InvalidDimension` - a ragged or empty basis
/// * `ShapeMismatch` - the bases differ in shape or are not square
pub fn are_bases_equivalent(basis1: &[Vec<i64>], basis2: &[Vec<i64>]) -> Result<bool> {
    let left = LatticeBasis::new(basis1.to_vec())?;
    let right = LatticeBasis::new(basis2.to_vec())?;
    check_shapes(&left, &right)?;

    // Columns of the system are basis vectors: entry (r, c) is basis[c][r]
    let m1 = transpose(basis1);
    let m2 = transpose(basis2);

    let det1 = integer_determinant(&m1);
    if det1.is_zero() {
        log::debug!("equivalence check: first basis is singular");
        return Ok(false);
    }
    if det1.magnitude() != integer_determinant(&m2).magnitude() {
        return Ok(false);
    }

    Ok(transform_is_integral(&m1, &m2, &det1))
}

/// Whether two 2D bases agree up to vector order and the sign of each vector
///
/// # Errors
/// * `ShapeMismatch` - either basis is not two vectors of two coordinates
pub fn are_bases_equal_2d(basis1: &[Vec<i64>], basis2: &[Vec<i64>]) -> Result<bool> {
    let is_pair = |basis: &[Vec<i64>]| basis.len() == 2 && basis.iter().all(|v| v.len() == 2);
    if !is_pair(basis1) || !is_pair(basis2) {
        return Err(LatticeError::ShapeMismatch {
            left_rows: basis1.len(),
            left_cols: basis1.first().map_or(0, |v| v.len()),
            right_rows: basis2.len(),
            right_cols: basis2.first().map_or(0, |v| v.len()),
        });
    }

    Ok(canonical_2d(basis1) == canonical_2d(basis2))
}

impl LatticeBasis {
    /// Whether `other` generates the same lattice
    pub fn is_equivalent_to(&self, other: &LatticeBasis) -> Result<bool> {
        are_bases_equivalent(self.vectors(), other.vectors())
    }
}

fn canonical_2d(basis: &[Vec<i64>]) -> [[i128; 2]; 2] {
    let mut pair = [normalize_sign(&basis[0]), normalize_sign(&basis[1])];
    pair.sort();
    pair
}

/// Widened to i128 so that negating i64::MIN cannot overflow
fn normalize_sign(v: &[i64]) -> [i128; 2] {
    let (x, y) = (v[0] as i128, v[1] as i128);
    if x < 0 || (x == 0 && y < 0) {
        [-x, -y]
    } else {
        [x, y]
    }
}

fn check_shapes(left: &LatticeBasis, right: &LatticeBasis) -> Result<()> {
    let mismatch = || LatticeError::ShapeMismatch {
        left_rows: left.len(),
        left_cols: left.dimension(),
        right_rows: right.len(),
        right_cols: right.dimension(),
    };
    if left.len() != right.len() || left.dimension() != right.dimension() {
        return Err(mismatch());
    }
    if left.len() != left.dimension() {
        return Err(mismatch());
    }
    Ok(())
}

fn transpose(rows: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let cols = rows.first().map_or(0, |r| r.len());
    (0..cols)
        .map(|c| rows.iter().map(|row| row[c]).collect())
        .collect()
}

/// Whether every entry of A⁻¹·B is an integer, given det(A) ≠ 0
fn transform_is_integral(a: &[Vec<i64>], b: &[Vec<i64>], det_a: &BigInt) -> bool {
    let n = a.len();
    let mut replaced = a.to_vec();
    for c in 0..n {
        for i in 0..n {
            for (row, b_row) in replaced.iter_mut().zip(b.iter()) {
                row[i] = b_row[c];
            }
            let numerator = integer_determinant(&replaced);
            for (row, a_row) in replaced.iter_mut().zip(a.iter()) {
                row[i] = a_row[i];
            }
            if !(numerator % det_a).is_zero() {
                return false;
            }
        }
    }
    true
}
