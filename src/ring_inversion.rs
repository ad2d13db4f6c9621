/// Multiplicative inverses in Z_q[x]/(x^N - 1) for arbitrary moduli q
///
/// Inversion is the step NTRU key generation cannot do without: the private
/// polynomial f must have inverses F_p and F_q in the rings modulo p and q.
///
/// Strategy by modulus:
/// - q prime: Z_q[x] is a Euclidean domain, so the extended Euclidean
///   algorithm against x^N - 1 yields s with s·f ≡ gcd (mod x^N - 1). f is
///   invertible iff that gcd has degree 0.
/// - q = p^k: invert modulo p, then lift with the Newton/Hensel iteration
///   b ← b·(2 − f·b), which squares the modulus each round
///   (f·b ≡ 1 mod m ⇒ f·b(2 − f·b) = 1 − (1 − f·b)² ≡ 1 mod m²).
/// - q composite: factor q = ∏ p_i^k_i, invert modulo every prime power and
///   recombine the coefficients with the Chinese Remainder Theorem.
///
/// Since Z_{p^k} → Z_p is a local ring map, f is invertible modulo q iff it is
/// invertible modulo every prime p dividing q.

use crate::error::{LatticeError, Result};
use crate::modular_arithmetic::{crt_combine, mod_inverse, prime_power_factors, reduce_mod};
use crate::polynomial::Polynomial;
use crate::truncated_ring::TruncatedRing;

impl TruncatedRing {
    /// Computes the inverse of `f` in Z_q[x]/(x^N - 1)
    ///
    /// # Arguments
    /// * `f` - Polynomial to invert, any length (it is folded into the ring)
    ///
    /// # Returns
    /// * `Ok(Polynomial)` - Inverse with coefficients in [0, q), leading zeros
    ///   stripped
    /// * `Err(LatticeError::NotInvertible)` - gcd(f, x^N - 1) has positive
    ///   degree modulo the reported prime factor of q
    /// * `Err(LatticeError::InversionBreakdown)` - the composite path
    ///   degenerated (CRT overflow or failed lift verification)
    pub fn invert(&self, f: &Polynomial) -> Result<Polynomial> {
        let n = self.degree();
        let q = self.modulus();
        let f_low = self.reduce(f).pad_left(n).to_low_first();

        let mut combined = vec![0i64; n];
        let mut combined_modulus = 1i64;

        for (p, k) in prime_power_factors(q) {
            let prime_power = p.pow(k);
            let inverse = invert_prime_power(&f_low, n, p, k)?;

            for (acc, &c) in combined.iter_mut().zip(inverse.iter()) {
                *acc = crt_combine(*acc, combined_modulus, c, prime_power).ok_or_else(|| {
                    LatticeError::InversionBreakdown {
                        modulus: q,
                        reason: format!(
                            "CRT recombination failed for factors {} and {}",
                            combined_modulus, prime_power
                        ),
                    }
                })?;
            }
            combined_modulus *= prime_power;
        }

        log::trace!("inverted polynomial of length {} in ring N={} q={}", f.len(), n, q);
        Ok(Polynomial::from_low_first(combined).trim())
    }

    /// Checks whether `f` has an inverse in this ring
    pub fn is_invertible(&self, f: &Polynomial) -> bool {
        self.invert(f).is_ok()
    }
}

/// Computes the inverse of `f` in Z_q[x]/(x^N - 1)
///
/// Free-function form of [`TruncatedRing::invert`].
pub fn invert(f: &Polynomial, degree: usize, modulus: i64) -> Result<Polynomial> {
    TruncatedRing::new(degree, modulus)?.invert(f)
}

/// Inverse modulo p^k, lowest degree first, exactly `n` coefficients
fn invert_prime_power(f_low: &[i64], n: usize, p: i64, k: u32) -> Result<Vec<i64>> {
    let target = p.pow(k);
    let mut inverse = invert_mod_prime(f_low, n, p)?;
    let mut modulus = p;

    while modulus < target {
        modulus = modulus.checked_mul(modulus).map_or(target, |m| m.min(target));
        let ring = TruncatedRing::new(n, modulus)?;
        let f = Polynomial::from_low_first(f_low.to_vec());
        let b = Polynomial::from_low_first(inverse.clone());

        // 2 - f·b
        let fb = ring.multiply(&f, &b).pad_left(n).to_low_first();
        let mut correction: Vec<i64> = fb.iter().map(|&c| reduce_mod(-(c as i128), modulus)).collect();
        correction[0] = reduce_mod(correction[0] as i128 + 2, modulus);

        inverse = ring
            .multiply(&b, &Polynomial::from_low_first(correction))
            .pad_left(n)
            .to_low_first();
    }

    let ring = TruncatedRing::new(n, target)?;
    let check = ring.multiply(
        &Polynomial::from_low_first(f_low.to_vec()),
        &Polynomial::from_low_first(inverse.clone()),
    );
    if !check.ring_eq(&Polynomial::one()) {
        return Err(LatticeError::InversionBreakdown {
            modulus: target,
            reason: "lifted inverse does not satisfy f·F ≡ 1".to_string(),
        });
    }
    Ok(inverse)
}

/// Inverse over the field GF(p) via the extended Euclidean algorithm
fn invert_mod_prime(f_low: &[i64], n: usize, p: i64) -> Result<Vec<i64>> {
    let f = gf_trim(f_low.iter().map(|&c| reduce_mod(c as i128, p)).collect());
    if f.is_empty() {
        return Err(LatticeError::NotInvertible {
            modulus: p,
            gcd_degree: n,
        });
    }

    // x^N - 1 over GF(p)
    let mut ideal = vec![0i64; n + 1];
    ideal[0] = reduce_mod(-1, p);
    ideal[n] = 1;

    // Invariant: s_i · f ≡ r_i (mod x^N - 1)
    let (mut r0, mut r1) = (ideal, f);
    let (mut s0, mut s1) = (Vec::new(), vec![1i64]);

    while !r1.is_empty() {
        let (quotient, remainder) = gf_divmod(&r0, &r1, p)?;
        let next_s = gf_sub(&s0, &gf_mul(&quotient, &s1, p), p);
        r0 = std::mem::replace(&mut r1, remainder);
        s0 = std::mem::replace(&mut s1, next_s);
    }

    let gcd_degree = r0.len() - 1;
    if gcd_degree != 0 {
        return Err(LatticeError::NotInvertible { modulus: p, gcd_degree });
    }

    let unit = mod_inverse(r0[0], p).ok_or_else(|| LatticeError::InversionBreakdown {
        modulus: p,
        reason: format!("gcd constant {} is not a unit", r0[0]),
    })?;

    let mut inverse = vec![0i64; n];
    for (i, &c) in s0.iter().enumerate() {
        inverse[i % n] = reduce_mod(inverse[i % n] as i128 + c as i128 * unit as i128, p);
    }
    Ok(inverse)
}

/// Drops zero coefficients at the high-degree end; the zero polynomial is empty
fn gf_trim(mut a: Vec<i64>) -> Vec<i64> {
    while a.last() == Some(&0) {
        a.pop();
    }
    a
}

fn gf_mul(a: &[i64], b: &[i64], p: i64) -> Vec<i64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0i64; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            result[i + j] = reduce_mod(result[i + j] as i128 + x as i128 * y as i128, p);
        }
    }
    gf_trim(result)
}

fn gf_sub(a: &[i64], b: &[i64], p: i64) -> Vec<i64> {
    let len = a.len().max(b.len());
    let result = (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            reduce_mod(x as i128 - y as i128, p)
        })
        .collect();
    gf_trim(result)
}

/// Polynomial long division over GF(p); `divisor` must be non-zero
fn gf_divmod(dividend: &[i64], divisor: &[i64], p: i64) -> Result<(Vec<i64>, Vec<i64>)> {
    let lead = divisor[divisor.len() - 1];
    let lead_inv = mod_inverse(lead, p).ok_or_else(|| LatticeError::InversionBreakdown {
        modulus: p,
        reason: format!("leading coefficient {} has no inverse", lead),
    })?;

    let mut remainder = dividend.to_vec();
    if remainder.len() < divisor.len() {
        return Ok((Vec::new(), gf_trim(remainder)));
    }

    let mut quotient = vec![0i64; remainder.len() - divisor.len() + 1];
    while remainder.len() >= divisor.len() {
        let shift = remainder.len() - divisor.len();
        let factor = reduce_mod(remainder[remainder.len() - 1] as i128 * lead_inv as i128, p);
        quotient[shift] = factor;
        for (i, &d) in divisor.iter().enumerate() {
            remainder[shift + i] =
                reduce_mod(remainder[shift + i] as i128 - factor as i128 * d as i128, p);
        }
        remainder = gf_trim(remainder);
    }
    Ok((gf_trim(quotient), remainder))
}
