/// Arithmetic in the truncated polynomial ring R_q = Z_q[x]/(x^N - 1)
///
/// This module provides the exact ring operations the NTRU cryptosystem is
/// built from: coefficient-wise addition, cyclic convolution, coefficient
/// centering and range checks. Inversion lives in
/// [`ring_inversion`](crate::ring_inversion) and extends [`TruncatedRing`].
///
/// Mathematical Foundation:
/// In R_q the monomial x^N is identified with 1, so a product term landing on
/// degree i ≥ N folds back onto degree i mod N (cyclic convolution). All
/// coefficients are then reduced into the canonical range [0, q).
///
/// Representation:
/// Polynomials are stored most-significant degree first (see
/// [`Polynomial`]). Results of `multiply` are at most N long; results of `add`
/// are as long as the longer operand.

use crate::error::{LatticeError, Result};
use crate::modular_arithmetic::{mul_mod, reduce_mod};
use crate::polynomial::Polynomial;

/// The ring Z_q[x]/(x^N - 1) for a fixed degree N and modulus q
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TruncatedRing {
    degree: usize,
    modulus: i64,
}

impl TruncatedRing {
    /// Creates new ring parameters with validation
    ///
    /// # Arguments
    /// * `degree` - Ring degree N (x^N is identified with 1), must be positive
    /// * `modulus` - Coefficient modulus q, must be at least 2
    ///
    /// # Returns
    /// * `Result<Self>` - Validated ring or error
    pub fn new(degree: usize, modulus: i64) -> Result<Self> {
        if degree == 0 {
            return Err(LatticeError::InvalidParameters(
                "ring degree N must be positive".to_string(),
            ));
        }
        if modulus < 2 {
            return Err(LatticeError::InvalidModulus { modulus });
        }
        Ok(Self { degree, modulus })
    }

    /// Ring degree N
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficient modulus q
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Adds two polynomials coefficient-wise modulo q
    ///
    /// Both operands are left-padded (high-degree side) with zeros to equal
    /// length; no reduction modulo x^N - 1 is applied.
    pub fn add(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        add_unchecked(a, b, self.modulus)
    }

    /// Multiplies two polynomials in Z_q[x]/(x^N - 1)
    ///
    /// Computes the full schoolbook product, folds every coefficient at degree
    /// i ≥ N onto degree i mod N, and reduces each coefficient into [0, q).
    ///
    /// # Returns
    /// * `Polynomial` - Product with length min(len(a) + len(b) - 1, N)
    ///
    /// # Performance Characteristics
    /// - Time Complexity: O(len(a) · len(b))
    /// - Space Complexity: O(len(a) + len(b))
    pub fn multiply(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        let q = self.modulus as i128;
        let a_low: Vec<i128> = a
            .coeffs()
            .iter()
            .rev()
            .map(|&c| reduce_mod(c as i128, self.modulus) as i128)
            .collect();
        let b_low: Vec<i128> = b
            .coeffs()
            .iter()
            .rev()
            .map(|&c| reduce_mod(c as i128, self.modulus) as i128)
            .collect();

        // Operands are already reduced, so acc + x*y stays well inside i128
        let mut product = vec![0i128; a_low.len() + b_low.len() - 1];
        for (i, &x) in a_low.iter().enumerate() {
            if x == 0 {
                continue;
            }
            for (j, &y) in b_low.iter().enumerate() {
                product[i + j] = (product[i + j] + x * y) % q;
            }
        }

        self.fold(product)
    }

    /// Multiplies every coefficient by the integer `k` modulo q
    pub fn scale(&self, a: &Polynomial, k: i64) -> Polynomial {
        let coeffs = a
            .coeffs()
            .iter()
            .map(|&c| mul_mod(c, k, self.modulus))
            .collect();
        self.reduce(&Polynomial::new(coeffs))
    }

    /// Reduces a polynomial into the ring without multiplying it
    ///
    /// Equivalent to multiplying by the identity: degrees ≥ N fold onto
    /// degree i mod N and coefficients are reduced into [0, q).
    pub fn reduce(&self, a: &Polynomial) -> Polynomial {
        let low: Vec<i128> = a.coeffs().iter().rev().map(|&c| c as i128).collect();
        self.fold(low)
    }

    /// Centers every coefficient into [-q/2, q/2)
    pub fn center(&self, a: &Polynomial) -> Polynomial {
        center_unchecked(a, self.modulus)
    }

    /// The multiplicative identity of the ring
    pub fn one(&self) -> Polynomial {
        Polynomial::one()
    }

    /// Folds lowest-first coefficients modulo x^N - 1 and reduces them mod q
    fn fold(&self, mut low: Vec<i128>) -> Polynomial {
        let n = self.degree;
        let q = self.modulus as i128;
        if low.len() > n {
            for i in n..low.len() {
                let c = low[i];
                low[i % n] = (low[i % n] + c % q) % q;
            }
            low.truncate(n);
        }
        let coeffs = low.iter().rev().map(|&c| reduce_mod(c, self.modulus)).collect();
        Polynomial::new(coeffs)
    }
}

/// Adds two polynomials coefficient-wise modulo `modulus`
///
/// # Arguments
/// * `a`, `b` - Operands, most-significant degree first
/// * `modulus` - Coefficient modulus, at least 1
///
/// # Returns
/// * `Result<Polynomial>` - Sum with coefficients in [0, modulus), as long as
///   the longer operand
pub fn add_mod(a: &Polynomial, b: &Polynomial, modulus: i64) -> Result<Polynomial> {
    if modulus < 1 {
        return Err(LatticeError::InvalidModulus { modulus });
    }
    Ok(add_unchecked(a, b, modulus))
}

fn add_unchecked(a: &Polynomial, b: &Polynomial, modulus: i64) -> Polynomial {
    let len = a.len().max(b.len());
    let a = a.pad_left(len);
    let b = b.pad_left(len);
    let coeffs = a
        .coeffs()
        .iter()
        .zip(b.coeffs())
        .map(|(&x, &y)| reduce_mod(x as i128 + y as i128, modulus))
        .collect();
    Polynomial::new(coeffs)
}

/// Maps each coefficient c to ((c + ⌊q/2⌋) mod q) − ⌊q/2⌋
///
/// The representative lies in [-⌊q/2⌋, q - ⌊q/2⌋), i.e. [-q/2, q/2) for even q
/// and [-(q-1)/2, (q-1)/2] for odd q.
pub fn center(poly: &Polynomial, modulus: i64) -> Result<Polynomial> {
    if modulus < 1 {
        return Err(LatticeError::InvalidModulus { modulus });
    }
    Ok(center_unchecked(poly, modulus))
}

fn center_unchecked(poly: &Polynomial, modulus: i64) -> Polynomial {
    let half = (modulus / 2) as i128;
    let coeffs = poly
        .coeffs()
        .iter()
        .map(|&c| reduce_mod(c as i128 + half, modulus) - half as i64)
        .collect();
    Polynomial::new(coeffs)
}

/// Checks that every coefficient lies in `[lower, upper]`, both ends inclusive
pub fn in_range(poly: &Polynomial, (lower, upper): (i64, i64)) -> bool {
    poly.coeffs().iter().all(|&c| c >= lower && c <= upper)
}

/// Exact cyclic convolution over Z, lowest degree first
///
/// Used where the true integer coefficients matter (decryption bound checks)
/// rather than their residues.
pub(crate) fn cyclic_convolution(a: &Polynomial, b: &Polynomial, degree: usize) -> Vec<i128> {
    let mut result = vec![0i128; degree];
    for (i, &x) in a.to_low_first().iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.to_low_first().iter().enumerate() {
            result[(i + j) % degree] += x as i128 * y as i128;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring(n: usize, q: i64) -> TruncatedRing {
        TruncatedRing::new(n, q).unwrap()
    }

    #[test]
    fn test_ring_validation() {
        assert!(TruncatedRing::new(0, 41).is_err());
        assert_eq!(
            TruncatedRing::new(7, 1),
            Err(LatticeError::InvalidModulus { modulus: 1 })
        );
        assert!(TruncatedRing::new(7, 41).is_ok());
    }

    #[test]
    fn test_add_pads_high_degree_side() {
        let r = ring(7, 41);
        let a = Polynomial::new(vec![40, 1, 2]);
        let b = Polynomial::new(vec![5, 39]);
        // [40, 1, 2] + [0, 5, 39] = [40, 6, 41] → [40, 6, 0]
        assert_eq!(r.add(&a, &b).coeffs(), &[40, 6, 0]);
        assert_eq!(add_mod(&a, &b, 41).unwrap(), r.add(&a, &b));
        assert!(add_mod(&a, &b, 0).is_err());
    }

    #[test]
    fn test_add_reduces_negative_coefficients() {
        let a = Polynomial::new(vec![-1, -5]);
        let b = Polynomial::new(vec![0]);
        assert_eq!(add_mod(&a, &b, 3).unwrap().coeffs(), &[2, 1]);
    }

    #[test]
    fn test_multiply_without_wraparound() {
        // (x^2 + 2x + 3)(4x + 5) = 4x^3 + 13x^2 + 22x + 15
        let r = ring(7, 41);
        let product = r.multiply(&Polynomial::new(vec![1, 2, 3]), &Polynomial::new(vec![4, 5]));
        assert_eq!(product.coeffs(), &[4, 13, 22, 15]);
    }

    #[test]
    fn test_multiply_wraparound() {
        // x^6 * x^5 = x^11 = x^4 in Z[x]/(x^7 - 1)
        let r = ring(7, 41);
        let x6 = Polynomial::monomial(1, 6);
        let x5 = Polynomial::monomial(1, 5);
        assert_eq!(r.multiply(&x6, &x5).coeffs(), &[0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_scale_near_word_size() {
        let q = (1i64 << 62) - 57;
        let r = ring(3, q);
        let a = Polynomial::new(vec![q - 1, 2, 1 << 61]);
        // -1·3, 2·3, 2^61·3 = 2^62 + 2^61 ≡ 2^61 + 57
        assert_eq!(r.scale(&a, 3).coeffs(), &[q - 3, 6, (1 << 61) + 57]);
        assert_eq!(r.scale(&Polynomial::new(vec![5, -1]), 3).coeffs(), &[15, q - 3]);
    }

    #[test]
    fn test_multiply_constants() {
        let r = ring(7, 7);
        assert_eq!(r.multiply(&Polynomial::new(vec![3]), &Polynomial::new(vec![5])).coeffs(), &[1]);
    }

    #[test]
    fn test_multiply_identity() {
        let r = ring(7, 41);
        let f = Polynomial::new(vec![1, 0, 40, 1, 1, 0, 40]);
        assert_eq!(r.multiply(&f, &r.one()), f);
        assert_eq!(r.multiply(&r.one(), &f), f);
    }

    #[test]
    fn test_reduce_folds_high_degrees() {
        let r = ring(3, 5);
        // x^4 + 2x^3 + 1 → x + 2 + 1 = x + 3
        let p = Polynomial::new(vec![1, 2, 0, 0, 1]);
        assert_eq!(r.reduce(&p).coeffs(), &[0, 1, 3]);
    }

    #[test]
    fn test_center() {
        let p = Polynomial::new(vec![0, 1, 20, 21, 40]);
        assert_eq!(center(&p, 41).unwrap().coeffs(), &[0, 1, 20, -20, -1]);

        let p = Polynomial::new(vec![0, 15, 16, 31]);
        assert_eq!(center(&p, 32).unwrap().coeffs(), &[0, 15, -16, -1]);

        let p = Polynomial::new(vec![0, 1, 2]);
        assert_eq!(ring(7, 3).center(&p).coeffs(), &[0, 1, -1]);
    }

    #[test]
    fn test_in_range_inclusive() {
        let p = Polynomial::new(vec![-20, 0, 20]);
        assert!(in_range(&p, (-20, 20)));
        assert!(!in_range(&p, (-19, 20)));
        assert!(!in_range(&p, (-20, 19)));
    }

    #[test]
    fn test_cyclic_convolution_is_exact() {
        let a = Polynomial::new(vec![3, 0, -1]);
        let b = Polynomial::new(vec![-2, 5]);
        // low-first a = [-1, 0, 3], b = [5, -2]
        // product = [-5, 2, 15, -6] → fold degree 3 onto 0 with N = 3
        assert_eq!(cyclic_convolution(&a, &b, 3), vec![-11, 2, 15]);
    }

    proptest! {
        #[test]
        fn test_ring_closure(
            n in 1usize..24,
            q in 2i64..2048,
            a in prop::collection::vec(-5000i64..5000, 1..40),
            b in prop::collection::vec(-5000i64..5000, 1..40),
        ) {
            let r = ring(n, q);
            let product = r.multiply(&Polynomial::new(a), &Polynomial::new(b));
            prop_assert!(product.len() <= n);
            prop_assert!(product.len() >= 1);
            prop_assert!(in_range(&product, (0, q - 1)));
        }

        #[test]
        fn test_multiplication_commutes(
            n in 1usize..16,
            q in 2i64..512,
            a in prop::collection::vec(-100i64..100, 1..20),
            b in prop::collection::vec(-100i64..100, 1..20),
        ) {
            let r = ring(n, q);
            let a = Polynomial::new(a);
            let b = Polynomial::new(b);
            prop_assert_eq!(r.multiply(&a, &b), r.multiply(&b, &a));
        }

        #[test]
        fn test_multiply_matches_exact_convolution(
            n in 1usize..16,
            q in 2i64..512,
            a in prop::collection::vec(-100i64..100, 1..16),
            b in prop::collection::vec(-100i64..100, 1..16),
        ) {
            let r = ring(n, q);
            let a = Polynomial::new(a);
            let b = Polynomial::new(b);
            let exact = cyclic_convolution(&a, &b, n);
            let product = r.multiply(&a, &b).pad_left(n);
            for (i, &c) in exact.iter().enumerate() {
                prop_assert_eq!(product.coeff(i), reduce_mod(c, q));
            }
        }

        #[test]
        fn test_center_range(
            q in 2i64..4096,
            coeffs in prop::collection::vec(-100000i64..100000, 1..30),
        ) {
            let centered = center(&Polynomial::new(coeffs.clone()), q).unwrap();
            let half = q / 2;
            prop_assert!(in_range(&centered, (-half, q - half - 1)));
            for (c, orig) in centered.coeffs().iter().zip(coeffs.iter()) {
                prop_assert_eq!((c - orig).rem_euclid(q), 0);
            }
        }
    }
}
