//! Coefficient-vector polynomials for the truncated ring Z[x]/(x^N - 1)

use std::fmt;
use zeroize::Zeroize;

use crate::error::{LatticeError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polynomial with integer coefficients, most-significant degree first
///
/// `coeffs[0]` multiplies x^(len-1) and `coeffs[len-1]` is the constant term,
/// so `[1, 0, -1]` is x² − 1. A polynomial always holds at least one
/// coefficient; leading zeros are allowed and carry no meaning beyond length.
///
/// Mathematical Properties:
/// - Once reduced by a [`TruncatedRing`](crate::truncated_ring::TruncatedRing)
///   the length is at most N and coefficients lie in [0, q)
/// - Equality is structural: `[0, 1]` and `[1]` are different values even
///   though they denote the same ring element; compare with
///   [`Polynomial::ring_eq`] when leading zeros should be ignored
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polynomial {
    coeffs: Vec<i64>,
}

impl Polynomial {
    /// Creates a polynomial from most-significant-first coefficients
    ///
    /// An empty vector becomes the zero polynomial `[0]`.
    pub fn new(coeffs: Vec<i64>) -> Self {
        if coeffs.is_empty() {
            return Self::zero();
        }
        Self { coeffs }
    }

    /// The zero polynomial, a single zero coefficient
    pub fn zero() -> Self {
        Self { coeffs: vec![0] }
    }

    /// The multiplicative identity
    pub fn one() -> Self {
        Self { coeffs: vec![1] }
    }

    /// The monomial c·x^degree
    pub fn monomial(c: i64, degree: usize) -> Self {
        let mut coeffs = vec![0; degree + 1];
        coeffs[0] = c;
        Self { coeffs }
    }

    /// Builds a polynomial from lowest-degree-first coefficients
    pub fn from_low_first(mut coeffs: Vec<i64>) -> Self {
        coeffs.reverse();
        Self::new(coeffs)
    }

    /// Coefficients, most-significant degree first
    pub fn coeffs(&self) -> &[i64] {
        &self.coeffs
    }

    /// Consumes the polynomial and returns its coefficients
    pub fn into_coeffs(self) -> Vec<i64> {
        self.coeffs
    }

    /// Coefficients in lowest-degree-first order
    pub fn to_low_first(&self) -> Vec<i64> {
        self.coeffs.iter().rev().copied().collect()
    }

    /// Number of stored coefficients, including leading zeros
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always false; a polynomial holds at least one coefficient
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient of x^i, zero past the stored length
    pub fn coeff(&self, i: usize) -> i64 {
        if i >= self.coeffs.len() {
            0
        } else {
            self.coeffs[self.coeffs.len() - 1 - i]
        }
    }

    /// Degree of the polynomial (None for the zero polynomial)
    pub fn degree(&self) -> Option<usize> {
        self.coeffs
            .iter()
            .position(|&c| c != 0)
            .map(|i| self.coeffs.len() - 1 - i)
    }

    /// Check if polynomial is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Pads with zeros on the high-degree side up to `len` coefficients
    ///
    /// Polynomials already at least `len` long are returned unchanged.
    pub fn pad_left(&self, len: usize) -> Self {
        if self.coeffs.len() >= len {
            return self.clone();
        }
        let mut coeffs = vec![0; len - self.coeffs.len()];
        coeffs.extend_from_slice(&self.coeffs);
        Self { coeffs }
    }

    /// Removes leading zero coefficients, keeping at least one term
    pub fn trim(&self) -> Self {
        let start = self
            .coeffs
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(self.coeffs.len() - 1);
        Self {
            coeffs: self.coeffs[start..].to_vec(),
        }
    }

    /// Multiplies every coefficient by `k` over the integers
    ///
    /// Fails with `ArithmeticOverflow` if a product leaves the i64 range; use
    /// [`crate::truncated_ring::TruncatedRing::scale`] to scale modulo q.
    pub fn scale(&self, k: i64) -> Result<Self> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| {
                c.checked_mul(k).ok_or_else(|| {
                    LatticeError::ArithmeticOverflow(format!("{}·{} does not fit in i64", c, k))
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        Ok(Self { coeffs })
    }

    /// Equality of the denoted polynomials, ignoring leading zeros
    pub fn ring_eq(&self, other: &Self) -> bool {
        self.trim() == other.trim()
    }

    /// Largest absolute coefficient
    pub fn max_norm(&self) -> i64 {
        self.coeffs.iter().map(|c| c.abs()).max().unwrap_or(0)
    }
}

impl From<Vec<i64>> for Polynomial {
    fn from(coeffs: Vec<i64>) -> Self {
        Self::new(coeffs)
    }
}

impl From<&[i64]> for Polynomial {
    fn from(coeffs: &[i64]) -> Self {
        Self::new(coeffs.to_vec())
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({:?})", self.coeffs)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (idx, &coeff) in self.coeffs.iter().enumerate() {
            if coeff == 0 {
                continue;
            }
            let power = self.coeffs.len() - 1 - idx;

            if !first {
                if coeff > 0 {
                    write!(f, " + ")?;
                } else {
                    write!(f, " - ")?;
                }
            } else if coeff < 0 {
                write!(f, "-")?;
            }

            let abs_coeff = coeff.abs();
            match power {
                0 => write!(f, "{}", abs_coeff)?,
                1 if abs_coeff == 1 => write!(f, "x")?,
                1 => write!(f, "{}x", abs_coeff)?,
                _ if abs_coeff == 1 => write!(f, "x^{}", power)?,
                _ => write!(f, "{}x^{}", abs_coeff, power)?,
            }
            first = false;
        }

        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
