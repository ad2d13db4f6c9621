//! Caller-driven sampling of NTRU polynomials
//!
//! Nothing in [`crate::ntru`] draws randomness; the blinding polynomial and
//! the private key are always arguments. These helpers make the entropy
//! source explicit: every function takes the caller's RNG.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::error::{LatticeError, Result};
use crate::ntru::{generate_keys, NtruParams, PrivateKey, PublicKey};
use crate::polynomial::Polynomial;

/// Default number of draws before [`sample_private_key`] gives up
pub const DEFAULT_KEY_ATTEMPTS: usize = 100;

/// Samples a ternary polynomial with exactly `ones` coefficients equal to +1
/// and `neg_ones` equal to −1, the rest zero, in uniformly random positions
///
/// # Errors
/// * `InvalidParameters` - `ones + neg_ones` exceeds `n`, or `n` is zero
pub fn sample_ternary<R: Rng + ?Sized>(
    n: usize,
    ones: usize,
    neg_ones: usize,
    rng: &mut R,
) -> Result<Polynomial> {
    if n == 0 || ones + neg_ones > n {
        return Err(LatticeError::InvalidParameters(format!(
            "cannot place {} ones and {} negative ones in {} coefficients",
            ones, neg_ones, n
        )));
    }

    let mut coeffs = vec![0i64; n];
    for coeff in coeffs.iter_mut().take(ones) {
        *coeff = 1;
    }
    for coeff in coeffs.iter_mut().skip(ones).take(neg_ones) {
        *coeff = -1;
    }
    coeffs.shuffle(rng);

    Ok(Polynomial::new(coeffs))
}

/// Samples a private polynomial f with d + 1 ones and d negative ones that is
/// invertible modulo both p and q
///
/// # Errors
/// * `InvalidParameters` - invalid `params`, or 2d + 1 > N
/// * `DidNotConverge` - no invertible candidate within `max_attempts` draws
pub fn sample_private_key<R: Rng + CryptoRng + ?Sized>(
    params: &NtruParams,
    d: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Polynomial> {
    params.validate()?;
    let ring_p = params.ring_p()?;
    let ring_q = params.ring_q()?;

    for attempt in 0..max_attempts {
        let f = sample_ternary(params.n, d + 1, d, rng)?;
        if ring_p.is_invertible(&f) && ring_q.is_invertible(&f) {
            log::debug!("sampled invertible private key after {} attempts", attempt + 1);
            return Ok(f);
        }
    }

    Err(LatticeError::DidNotConverge {
        iterations: max_attempts,
    })
}

/// Generates a key pair from freshly sampled f ∈ T(d+1, d) and g ∈ T(d, d)
pub fn generate_random_keys<R: Rng + CryptoRng + ?Sized>(
    params: &NtruParams,
    d: usize,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey)> {
    let f = sample_private_key(params, d, rng, DEFAULT_KEY_ATTEMPTS)?;
    let g = sample_ternary(params.n, d, d, rng)?;
    generate_keys(params, &g, &f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use crate::ntru::{decrypt, decryption_bound, encrypt};
    use crate::truncated_ring::center;

    #[test]
    fn test_ternary_weights() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..20 {
            let poly = sample_ternary(11, 4, 3, &mut rng).unwrap();
            assert_eq!(poly.len(), 11);
            assert_eq!(poly.coeffs().iter().filter(|&&c| c == 1).count(), 4);
            assert_eq!(poly.coeffs().iter().filter(|&&c| c == -1).count(), 3);
            assert_eq!(poly.coeffs().iter().filter(|&&c| c == 0).count(), 4);
        }
    }

    #[test]
    fn test_ternary_rejects_overfull() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(sample_ternary(5, 3, 3, &mut rng).is_err());
        assert!(sample_ternary(0, 0, 0, &mut rng).is_err());
    }

    #[test]
    fn test_sampled_private_key_is_invertible() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let params = NtruParams::TEXTBOOK_N11;
        let f = sample_private_key(&params, 3, &mut rng, DEFAULT_KEY_ATTEMPTS).unwrap();
        assert!(params.ring_p().unwrap().is_invertible(&f));
        assert!(params.ring_q().unwrap().is_invertible(&f));
    }

    #[test]
    fn test_zero_attempts_fail() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(
            sample_private_key(&NtruParams::TOY_N7, 2, &mut rng, 0),
            Err(LatticeError::DidNotConverge { iterations: 0 })
        );
    }

    #[test]
    fn test_random_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let params = NtruParams::TEXTBOOK_N11;
        let (public_key, private_key) = generate_random_keys(&params, 3, &mut rng).unwrap();
        assert_eq!(public_key.params(), &params);
        assert_eq!(private_key.f().len(), params.n);
    }

    #[test]
    fn test_sampled_round_trip_within_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        // 2·(p·|φ·g| + |f·m|) ≤ 2·(3·6 + 7) < 256 for these weights
        let params = NtruParams::new(11, 3, 256).unwrap();
        for _ in 0..10 {
            let f = sample_private_key(&params, 3, &mut rng, DEFAULT_KEY_ATTEMPTS).unwrap();
            let g = sample_ternary(params.n, 3, 3, &mut rng).unwrap();
            let phi = sample_ternary(params.n, 3, 3, &mut rng).unwrap();
            let m = sample_ternary(params.n, 4, 4, &mut rng).unwrap();

            let bound = decryption_bound(&params, &f, &g, &phi, &m).unwrap();
            assert!(bound.guaranteed);

            let (public_key, private_key) = generate_keys(&params, &g, &f).unwrap();
            let ciphertext = encrypt(&public_key, &phi, &m).unwrap();
            let decrypted = decrypt(&public_key, &private_key, &ciphertext).unwrap();
            assert_eq!(center(&decrypted, params.p).unwrap(), m);
        }
    }
}
