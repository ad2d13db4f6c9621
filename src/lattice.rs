/// Integer lattice bases, vector arithmetic and Gram-Schmidt orthogonalization
///
/// A lattice basis here is an ordered list of n integer vectors of a common
/// dimension m. Reductions work on a copy of the caller's basis; the basis
/// type itself is an immutable value.
///
/// Mathematical Foundation:
/// - Dot products are exact (accumulated in i128)
/// - Gram-Schmidt data is floating point: ortho[i] = b_i − Σ_{j<i} μ_ij·ortho[j]
///   with μ_ij = ⟨b_i, ortho[j]⟩ / ⟨ortho[j], ortho[j]⟩
/// - Rank and determinants are exact, computed by fraction-free (Bareiss)
///   elimination over arbitrary-precision integers so that linear
///   independence is never decided by a floating tolerance

use num_bigint::BigInt;
use num_traits::{One, Zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};

/// An ordered lattice basis of integer vectors with a common dimension
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeBasis {
    vectors: Vec<Vec<i64>>,
}

impl LatticeBasis {
    /// Creates a basis, checking that it is non-empty and rectangular
    ///
    /// Linear independence is not checked here; see
    /// [`LatticeBasis::ensure_independent`].
    pub fn new(vectors: Vec<Vec<i64>>) -> Result<Self> {
        if vectors.is_empty() {
            return Err(LatticeError::EmptyBasis);
        }
        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(LatticeError::InvalidParameters(
                "basis vectors must have at least one coordinate".to_string(),
            ));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(LatticeError::InvalidDimension {
                expected: dimension,
                got: bad.len(),
            });
        }
        Ok(Self { vectors })
    }

    pub fn vectors(&self) -> &[Vec<i64>] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<Vec<i64>> {
        self.vectors
    }

    /// Number of basis vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of the ambient space
    pub fn dimension(&self) -> usize {
        self.vectors[0].len()
    }

    /// Exact rank of the basis vectors
    pub fn rank(&self) -> usize {
        integer_rank(&self.vectors)
    }

    /// Fails with `LinearlyDependent` unless the vectors are independent
    pub fn ensure_independent(&self) -> Result<()> {
        let rank = self.rank();
        if rank < self.len() {
            return Err(LatticeError::LinearlyDependent {
                rank,
                vectors: self.len(),
            });
        }
        Ok(())
    }

    /// Euclidean length of the shortest basis vector
    pub fn shortest_norm(&self) -> f64 {
        self.vectors
            .iter()
            .map(|v| norm(v))
            .fold(f64::INFINITY, f64::min)
    }

    /// Gram-Schmidt orthogonalization of the basis in its current order
    pub fn gram_schmidt(&self) -> GramSchmidt {
        gram_schmidt(&self.vectors)
    }
}

impl TryFrom<Vec<Vec<i64>>> for LatticeBasis {
    type Error = LatticeError;

    fn try_from(vectors: Vec<Vec<i64>>) -> Result<Self> {
        Self::new(vectors)
    }
}

/// Gram-Schmidt data for one basis ordering
///
/// `mu[i][j]` is meaningful only for j < i; every other entry is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct GramSchmidt {
    /// Orthogonalized vectors b*_i
    pub ortho: Vec<Vec<f64>>,
    /// Projection coefficients μ_ij = ⟨b_i, b*_j⟩ / ||b*_j||²
    pub mu: Vec<Vec<f64>>,
    /// Squared norms ||b*_i||²
    pub norms_sq: Vec<f64>,
}

/// Classical Gram-Schmidt orthogonalization
pub fn gram_schmidt(basis: &[Vec<i64>]) -> GramSchmidt {
    let n = basis.len();
    let mut ortho: Vec<Vec<f64>> = Vec::with_capacity(n);
    let mut mu = vec![vec![0.0; n]; n];
    let mut norms_sq = Vec::with_capacity(n);

    for i in 0..n {
        let b_i: Vec<f64> = basis[i].iter().map(|&x| x as f64).collect();
        let mut v = b_i.clone();

        for j in 0..i {
            if norms_sq[j] != 0.0 {
                mu[i][j] = dot_f64(&b_i, &ortho[j]) / norms_sq[j];
            }
            for (vk, ok) in v.iter_mut().zip(ortho[j].iter()) {
                *vk -= mu[i][j] * ok;
            }
        }

        norms_sq.push(dot_f64(&v, &v));
        ortho.push(v);
    }

    GramSchmidt { ortho, mu, norms_sq }
}

/// Exact dot product
pub fn dot(a: &[i64], b: &[i64]) -> i128 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x as i128 * y as i128).sum()
}

/// Exact squared Euclidean norm
pub fn norm_squared(v: &[i64]) -> i128 {
    dot(v, v)
}

/// Euclidean norm
pub fn norm(v: &[i64]) -> f64 {
    (norm_squared(v) as f64).sqrt()
}

fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// v − t·w, coordinate-wise
///
/// Fails with `ArithmeticOverflow` when a coordinate leaves the i64 range.
pub(crate) fn sub_scaled(v: &[i64], w: &[i64], t: i64) -> Result<Vec<i64>> {
    v.iter()
        .zip(w.iter())
        .map(|(&x, &y)| {
            t.checked_mul(y)
                .and_then(|ty| x.checked_sub(ty))
                .ok_or_else(|| {
                    LatticeError::ArithmeticOverflow(format!(
                        "{} - {}·{} does not fit in i64",
                        x, t, y
                    ))
                })
        })
        .collect()
}

/// Exact rank of an integer matrix given by rows
///
/// Fraction-free Gaussian elimination: after k pivots every remaining entry is
/// a (k+1)×(k+1) minor, so the division by the previous pivot is exact.
pub fn integer_rank(rows: &[Vec<i64>]) -> usize {
    let mut a = to_bigint_matrix(rows);
    let n_rows = a.len();
    let n_cols = a.first().map_or(0, |r| r.len());
    let mut prev_pivot = BigInt::one();
    let mut rank = 0;

    for col in 0..n_cols {
        if rank == n_rows {
            break;
        }
        let Some(pivot_row) = (rank..n_rows).find(|&r| !a[r][col].is_zero()) else {
            continue;
        };
        a.swap(rank, pivot_row);

        for i in rank + 1..n_rows {
            for j in col + 1..n_cols {
                let value = (&a[rank][col] * &a[i][j] - &a[i][col] * &a[rank][j]) / &prev_pivot;
                a[i][j] = value;
            }
            a[i][col] = BigInt::zero();
        }
        prev_pivot = a[rank][col].clone();
        rank += 1;
    }
    rank
}

/// Exact determinant of a square integer matrix (Bareiss algorithm)
///
/// Returns zero for an empty or non-square input.
pub fn integer_determinant(matrix: &[Vec<i64>]) -> BigInt {
    let n = matrix.len();
    if n == 0 || matrix.iter().any(|row| row.len() != n) {
        return BigInt::zero();
    }

    let mut a = to_bigint_matrix(matrix);
    let mut prev_pivot = BigInt::one();
    let mut negate = false;

    for k in 0..n {
        let Some(pivot_row) = (k..n).find(|&r| !a[r][k].is_zero()) else {
            return BigInt::zero();
        };
        if pivot_row != k {
            a.swap(k, pivot_row);
            negate = !negate;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let value = (&a[k][k] * &a[i][j] - &a[i][k] * &a[k][j]) / &prev_pivot;
                a[i][j] = value;
            }
        }
        prev_pivot = a[k][k].clone();
    }

    let det = a[n - 1][n - 1].clone();
    if negate {
        -det
    } else {
        det
    }
}

fn to_bigint_matrix(rows: &[Vec<i64>]) -> Vec<Vec<BigInt>> {
    rows.iter()
        .map(|row| row.iter().map(|&x| BigInt::from(x)).collect())
        .collect()
}
