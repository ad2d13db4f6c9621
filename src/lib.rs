pub mod basis_equivalence;
pub mod error;
pub mod gauss_reduction;
pub mod lattice;
pub mod lll_reduction;
pub mod modular_arithmetic;
pub mod ntru;
pub mod polynomial;
pub mod ring_inversion;
pub mod sampling;
pub mod truncated_ring;

pub use basis_equivalence::{are_bases_equal_2d, are_bases_equivalent};
pub use error::{LatticeError, Result};
pub use gauss_reduction::{
    reduce_2d_basis, reduce_2d_basis_traced, reduce_2d_basis_with_params, GaussParams, GaussStep,
    GaussTrace,
};
pub use lattice::{gram_schmidt, GramSchmidt, LatticeBasis};
pub use lll_reduction::{
    is_lll_reduced, lll_reduce, lll_reduce_batch, lll_reduce_with_stats, LllParams, LllStats,
};
pub use ntru::{
    decrypt, decryption_bound, encrypt, generate_keys, DecryptionBound, NtruParams, PrivateKey,
    PublicKey,
};
pub use polynomial::Polynomial;
pub use ring_inversion::invert;
pub use sampling::{generate_random_keys, sample_private_key, sample_ternary};
pub use truncated_ring::{add_mod, center, in_range, TruncatedRing};

#[cfg(test)]
mod tests;
