/// Integer modular arithmetic underpinning the truncated polynomial ring
///
/// Every ring operation eventually reduces to arithmetic in Z_q: canonical
/// reduction into [0, q), inverses of leading coefficients during polynomial
/// division, and the factorisation of q that decides how a polynomial inverse
/// is computed (directly over a prime field, by lifting over a prime power, or
/// by recombining prime-power inverses with the Chinese Remainder Theorem).
///
/// Mathematical Foundation:
/// Products are formed in i128 before reduction so that any pair of residues
/// of an i64 modulus can be multiplied without overflow.

/// Reduces `a` into the canonical range [0, modulus)
///
/// The modulus must be positive; callers validate it when constructing the
/// ring that owns it.
#[inline]
pub fn reduce_mod(a: i128, modulus: i64) -> i64 {
    a.rem_euclid(modulus as i128) as i64
}

/// Multiplies two residues modulo `modulus` without intermediate overflow
#[inline]
pub fn mul_mod(a: i64, b: i64, modulus: i64) -> i64 {
    reduce_mod(a as i128 * b as i128, modulus)
}

/// Greatest common divisor of the absolute values of `a` and `b`
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a as i64
}

/// Extended Euclidean algorithm for computing gcd and Bézout coefficients
///
/// # Arguments
/// * `a` - First integer
/// * `b` - Second integer
///
/// # Returns
/// * `(i128, i128, i128)` - Tuple (gcd, x, y) where gcd = ax + by
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (gcd, x1, y1) = extended_gcd(b, a % b);
        (gcd, y1, x1 - (a / b) * y1)
    }
}

/// Multiplicative inverse of `a` modulo `modulus`, if it exists
///
/// Returns `None` when gcd(a, modulus) ≠ 1.
pub fn mod_inverse(a: i64, modulus: i64) -> Option<i64> {
    if modulus <= 0 {
        return None;
    }
    let a = reduce_mod(a as i128, modulus);
    let (g, x, _) = extended_gcd(a as i128, modulus as i128);
    if g != 1 {
        return None;
    }
    Some(reduce_mod(x, modulus))
}

/// Deterministic Miller-Rabin primality test
///
/// The first twelve primes as witnesses decide every n < 3.3·10^24, which
/// covers the whole i64 range.
pub fn is_prime(n: i64) -> bool {
    const WITNESSES: [i64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    // n - 1 = d·2^s with d odd
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// base^exp mod `modulus` by square-and-multiply
pub fn pow_mod(base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result = reduce_mod(1, modulus);
    let mut base = reduce_mod(base as i128, modulus);
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

/// Factors `n` into its prime powers
///
/// # Returns
/// * `Vec<(i64, u32)>` - Pairs (p, k) with p prime, in increasing order of p,
///   such that n = ∏ p^k. Empty for n < 2.
pub fn prime_power_factors(n: i64) -> Vec<(i64, u32)> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    if is_prime(n) {
        factors.push((n, 1));
        return factors;
    }

    let mut rest = n;
    let mut d = 2i64;
    while d.saturating_mul(d) <= rest {
        if rest % d == 0 {
            let mut k = 0u32;
            while rest % d == 0 {
                rest /= d;
                k += 1;
            }
            factors.push((d, k));
            // A prime cofactor ends the search without dividing up to its root
            if is_prime(rest) {
                break;
            }
        }
        d += if d == 2 { 1 } else { 2 };
    }
    if rest > 1 {
        factors.push((rest, 1));
    }
    factors
}

/// Combines x ≡ r1 (mod m1) and x ≡ r2 (mod m2) for coprime m1, m2
///
/// # Returns
/// * `Option<i64>` - The unique solution in [0, m1·m2), or `None` if the
///   moduli share a factor or their product overflows i64.
pub fn crt_combine(r1: i64, m1: i64, r2: i64, m2: i64) -> Option<i64> {
    let modulus = m1.checked_mul(m2)?;
    let m1_inv = mod_inverse(m1, m2)?;
    // x = r1 + m1 * t where t ≡ (r2 - r1) * m1^{-1} (mod m2)
    let t = mul_mod(reduce_mod(r2 as i128 - r1 as i128, m2), m1_inv, m2);
    Some(reduce_mod(r1 as i128 + m1 as i128 * t as i128, modulus))
}
