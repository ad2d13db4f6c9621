/// NTRU public-key encryption over the truncated ring Z[x]/(x^N - 1)
///
/// The cryptosystem composes ring operations into three steps:
///
/// ```text
/// keygen:   F_p = f^{-1} mod p,  F_q = f^{-1} mod q,  h = p·F_q·g mod q
/// encrypt:  e = φ·h + m mod q
/// decrypt:  a = f·e mod q (centered),  m = F_p·a mod p
/// ```
///
/// Caller Responsibilities:
/// - The blinding polynomial φ is an explicit argument of [`encrypt`]; this
///   module never draws randomness. [`crate::sampling`] offers helpers that
///   sample from a caller-provided RNG.
/// - Decryption is only guaranteed when every coefficient of p·φ·g + f·m lies
///   strictly inside (-q/2, q/2). A failure is silent: [`decrypt`] returns a
///   well-formed polynomial that differs from the message. Use
///   [`decryption_bound`] to check a parameter choice before relying on it.
///
/// Security Considerations:
/// This module defines exact, deterministic arithmetic only. It makes no
/// attempt at constant-time execution and performs no parameter-strength
/// checks.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};
use crate::modular_arithmetic::gcd;
use crate::polynomial::Polynomial;
use crate::truncated_ring::{cyclic_convolution, in_range, TruncatedRing};

/// NTRU system parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NtruParams {
    /// Ring degree N
    pub n: usize,
    /// Small modulus p (message space)
    pub p: i64,
    /// Large modulus q (ciphertext space)
    pub q: i64,
}

impl NtruParams {
    /// Textbook toy parameters (N = 7, p = 3, q = 41). Not secure.
    pub const TOY_N7: NtruParams = NtruParams { n: 7, p: 3, q: 41 };

    /// Textbook parameters with a prime-power q (N = 11, p = 3, q = 32). Not secure.
    pub const TEXTBOOK_N11: NtruParams = NtruParams { n: 11, p: 3, q: 32 };

    /// Creates validated parameters
    pub fn new(n: usize, p: i64, q: i64) -> Result<Self> {
        let params = Self { n, p, q };
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters
    ///
    /// Requires N > 0, 2 ≤ p < q and gcd(p, q) = 1.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(LatticeError::InvalidParameters(
                "N must be positive".to_string(),
            ));
        }
        if self.p < 2 {
            return Err(LatticeError::InvalidParameters(format!(
                "p must be at least 2, got {}",
                self.p
            )));
        }
        if self.p >= self.q {
            return Err(LatticeError::InvalidParameters(format!(
                "p must be smaller than q, got p = {}, q = {}",
                self.p, self.q
            )));
        }
        if gcd(self.p, self.q) != 1 {
            return Err(LatticeError::InvalidParameters(format!(
                "p and q must be coprime, gcd({}, {}) = {}",
                self.p,
                self.q,
                gcd(self.p, self.q)
            )));
        }
        Ok(())
    }

    /// The ring Z_p[x]/(x^N - 1)
    pub fn ring_p(&self) -> Result<TruncatedRing> {
        TruncatedRing::new(self.n, self.p)
    }

    /// The ring Z_q[x]/(x^N - 1)
    pub fn ring_q(&self) -> Result<TruncatedRing> {
        TruncatedRing::new(self.n, self.q)
    }
}

/// Public key (N, p, q, h)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicKey {
    params: NtruParams,
    h: Polynomial,
}

impl PublicKey {
    pub fn params(&self) -> &NtruParams {
        &self.params
    }

    pub fn n(&self) -> usize {
        self.params.n
    }

    pub fn p(&self) -> i64 {
        self.params.p
    }

    pub fn q(&self) -> i64 {
        self.params.q
    }

    /// Public polynomial h = p·F_q·g mod q
    pub fn h(&self) -> &Polynomial {
        &self.h
    }
}

/// Private key (f, F_p)
///
/// Coefficients are wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    f: Polynomial,
    fp: Polynomial,
}

impl PrivateKey {
    /// Private polynomial f
    pub fn f(&self) -> &Polynomial {
        &self.f
    }

    /// Inverse of f modulo p
    pub fn fp(&self) -> &Polynomial {
        &self.fp
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("f", &"<redacted>")
            .field("fp", &"<redacted>")
            .finish()
    }
}

/// Generates an NTRU key pair from caller-chosen f and g
///
/// # Arguments
/// * `params` - N, p, q; validated here
/// * `g` - Auxiliary polynomial, only used to form h and not retained
/// * `f` - Private polynomial, must be invertible modulo p and modulo q
///
/// # Returns
/// * `Result<(PublicKey, PrivateKey)>` - Key pair, or
///   `InvalidParameters` / `NonInvertibleKey`
pub fn generate_keys(
    params: &NtruParams,
    g: &Polynomial,
    f: &Polynomial,
) -> Result<(PublicKey, PrivateKey)> {
    params.validate()?;
    let ring_p = params.ring_p()?;
    let ring_q = params.ring_q()?;

    let fp = ring_p
        .invert(f)
        .map_err(|_| LatticeError::NonInvertibleKey { modulus: params.p })?;
    let mut fq = ring_q
        .invert(f)
        .map_err(|_| LatticeError::NonInvertibleKey { modulus: params.q })?;

    let mut p_fq = ring_q.scale(&fq, params.p);
    let h = ring_q.multiply(&p_fq, g);
    p_fq.zeroize();
    fq.zeroize();

    log::debug!(
        "generated NTRU key pair for N={} p={} q={}",
        params.n,
        params.p,
        params.q
    );

    Ok((
        PublicKey { params: *params, h },
        PrivateKey { f: f.clone(), fp },
    ))
}

/// Encrypts message `m` with blinding polynomial `phi`
///
/// Computes e = φ·h + m mod q, with m left-padded to N coefficients. The
/// ciphertext always has exactly N coefficients in [0, q).
///
/// # Errors
/// * `InvalidDimension` - the message is longer than N
pub fn encrypt(public_key: &PublicKey, phi: &Polynomial, m: &Polynomial) -> Result<Polynomial> {
    let n = public_key.n();
    if m.len() > n {
        return Err(LatticeError::InvalidDimension {
            expected: n,
            got: m.len(),
        });
    }
    let ring_q = public_key.params.ring_q()?;

    let blinded = ring_q.multiply(phi, &public_key.h);
    Ok(ring_q.add(&blinded, &m.pad_left(n)))
}

/// Decrypts a ciphertext
///
/// a = f·e mod q; if any coefficient of a falls outside [-q/2, q/2], every
/// coefficient is centered; the result is F_p·a mod p with coefficients in
/// [0, p). Center it modulo p to compare against a signed message.
pub fn decrypt(
    public_key: &PublicKey,
    private_key: &PrivateKey,
    ciphertext: &Polynomial,
) -> Result<Polynomial> {
    let q = public_key.q();
    let ring_p = public_key.params.ring_p()?;
    let ring_q = public_key.params.ring_q()?;

    let mut a = ring_q.multiply(&private_key.f, ciphertext);
    if !in_range(&a, (-(q / 2), q / 2)) {
        a = ring_q.center(&a);
    }
    Ok(ring_p.multiply(&private_key.fp, &a))
}

/// Outcome of [`decryption_bound`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptionBound {
    /// Largest |coefficient| of p·φ·g + f·m over Z[x]/(x^N - 1)
    pub max_coefficient: i128,
    /// True when 2·max_coefficient < q, so decryption recovers m exactly
    pub guaranteed: bool,
}

/// Checks whether decrypting φ, m under (f, g) is guaranteed to succeed
///
/// Decryption works on a ≡ p·φ·g + f·m (mod q). When every integer
/// coefficient of that polynomial lies strictly within (-q/2, q/2) centering
/// reconstructs it exactly and multiplying by F_p yields m mod p.
pub fn decryption_bound(
    params: &NtruParams,
    f: &Polynomial,
    g: &Polynomial,
    phi: &Polynomial,
    m: &Polynomial,
) -> Result<DecryptionBound> {
    params.validate()?;
    let n = params.n;

    let phi_g = cyclic_convolution(phi, g, n);
    let f_m = cyclic_convolution(f, m, n);

    let max_coefficient = phi_g
        .iter()
        .zip(f_m.iter())
        .map(|(&x, &y)| (params.p as i128 * x + y).abs())
        .max()
        .unwrap_or(0);

    Ok(DecryptionBound {
        max_coefficient,
        guaranteed: 2 * max_coefficient < params.q as i128,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truncated_ring::center;

    fn toy_inputs() -> (Polynomial, Polynomial, Polynomial, Polynomial) {
        (
            Polynomial::new(vec![1, 0, -1, 1, 1, 0, -1]),
            Polynomial::new(vec![1, 0, 1, 0, -1, -1, 0]),
            Polynomial::new(vec![1, -1, 0, 0, 0, 1, -1]),
            Polynomial::new(vec![0, -1, 0, 1, 1, -1, 1]),
        )
    }

    #[test]
    fn test_ntru_params_validation() {
        assert!(NtruParams::TOY_N7.validate().is_ok());
        assert!(NtruParams::TEXTBOOK_N11.validate().is_ok());

        assert!(NtruParams::new(0, 3, 41).is_err());
        assert!(NtruParams::new(7, 1, 41).is_err());
        assert!(NtruParams::new(7, 41, 3).is_err());
        assert!(NtruParams::new(7, 41, 41).is_err());
        // gcd(2, 128) = 2
        assert!(matches!(
            NtruParams::new(8, 2, 128),
            Err(LatticeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_key_generation() {
        let (f, g, _, _) = toy_inputs();
        let (public_key, private_key) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();

        assert_eq!(public_key.h().coeffs(), &[19, 38, 6, 32, 24, 37, 8]);
        assert_eq!(private_key.fp().coeffs(), &[1, 2, 0, 1, 1, 1, 1]);
        assert_eq!(private_key.f(), &f);
        assert_eq!((public_key.n(), public_key.p(), public_key.q()), (7, 3, 41));
    }

    #[test]
    fn test_key_generation_with_modulus_near_word_size() {
        let params = NtruParams {
            n: 3,
            p: 3,
            q: (1 << 62) - 57,
        };
        let f = Polynomial::new(vec![1, 1, 2]);
        let g = Polynomial::new(vec![1, 0, 1]);
        let (public_key, _) = generate_keys(&params, &g, &f).unwrap();

        // f·h = f·p·F_q·g = p·g
        let ring_q = params.ring_q().unwrap();
        let fh = ring_q.multiply(&f, public_key.h());
        assert!(fh.ring_eq(&Polynomial::new(vec![3, 0, 3])));
    }

    #[test]
    fn test_key_generation_rejects_bad_moduli() {
        let (f, g, _, _) = toy_inputs();
        let params = NtruParams { n: 7, p: 41, q: 3 };
        assert!(matches!(
            generate_keys(&params, &g, &f),
            Err(LatticeError::InvalidParameters(_))
        ));
        let params = NtruParams { n: 7, p: 3, q: 42 };
        assert!(matches!(
            generate_keys(&params, &g, &f),
            Err(LatticeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_key_generation_rejects_non_invertible_f() {
        let (_, g, _, _) = toy_inputs();
        // f(1) = 0, so x - 1 divides gcd(f, x^7 - 1) for every modulus
        let f = Polynomial::new(vec![1, 0, 0, 0, 0, 0, -1]);
        assert_eq!(
            generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap_err(),
            LatticeError::NonInvertibleKey { modulus: 3 }
        );
    }

    #[test]
    fn test_encrypt_known_ciphertext() {
        let (f, g, phi, m) = toy_inputs();
        let (public_key, _) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();
        let ciphertext = encrypt(&public_key, &phi, &m).unwrap();
        assert_eq!(ciphertext.coeffs(), &[31, 19, 4, 2, 40, 3, 25]);
    }

    #[test]
    fn test_toy_round_trip() {
        let (f, g, phi, m) = toy_inputs();
        let (public_key, private_key) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();
        let ciphertext = encrypt(&public_key, &phi, &m).unwrap();
        let decrypted = decrypt(&public_key, &private_key, &ciphertext).unwrap();

        assert_eq!(decrypted.coeffs(), &[0, 2, 0, 1, 1, 2, 1]);
        assert_eq!(center(&decrypted, 3).unwrap(), m);
    }

    #[test]
    fn test_short_message_is_left_padded() {
        let (f, g, phi, _) = toy_inputs();
        let (public_key, private_key) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();
        let m = Polynomial::new(vec![1, -1]);
        let ciphertext = encrypt(&public_key, &phi, &m).unwrap();
        assert_eq!(ciphertext.len(), 7);

        let decrypted = decrypt(&public_key, &private_key, &ciphertext).unwrap();
        assert!(center(&decrypted, 3).unwrap().ring_eq(&m));
    }

    #[test]
    fn test_encrypt_rejects_long_message() {
        let (f, g, phi, _) = toy_inputs();
        let (public_key, _) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();
        let m = Polynomial::new(vec![1; 8]);
        assert_eq!(
            encrypt(&public_key, &phi, &m),
            Err(LatticeError::InvalidDimension { expected: 7, got: 8 })
        );
    }

    #[test]
    fn test_decryption_bound() {
        let (f, g, phi, m) = toy_inputs();
        let bound = decryption_bound(&NtruParams::TOY_N7, &f, &g, &phi, &m).unwrap();
        assert!(bound.guaranteed);
        assert!(bound.max_coefficient < 21);

        // Scaling the message far past q/2 breaks the guarantee
        let big = m.scale(40).unwrap();
        let bound = decryption_bound(&NtruParams::TOY_N7, &f, &g, &phi, &big).unwrap();
        assert!(!bound.guaranteed);
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let (f, g, _, _) = toy_inputs();
        let (_, private_key) = generate_keys(&NtruParams::TOY_N7, &g, &f).unwrap();
        let rendered = format!("{:?}", private_key);
        assert!(rendered.contains("redacted"));
        assert!(!rendered.contains("-1"));
    }
}
