use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid modulus: {modulus}")]
    InvalidModulus { modulus: i64 },

    #[error("Invalid dimension: expected {expected}, got {got}")]
    InvalidDimension {
        expected: usize,
        got: usize,
    },

    #[error("Private polynomial is not invertible modulo {modulus}")]
    NonInvertibleKey { modulus: i64 },

    #[error("Polynomial is not invertible modulo {modulus}: gcd with x^N - 1 has degree {gcd_degree}")]
    NotInvertible {
        modulus: i64,
        gcd_degree: usize,
    },

    #[error("Inversion modulo {modulus} broke down: {reason}")]
    InversionBreakdown {
        modulus: i64,
        reason: String,
    },

    #[error("Shape mismatch: {left_rows}x{left_cols} basis against {right_rows}x{right_cols} basis")]
    ShapeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Basis contains no vectors")]
    EmptyBasis,

    #[error("Basis vectors are linearly dependent: rank {rank} for {vectors} vectors")]
    LinearlyDependent {
        rank: usize,
        vectors: usize,
    },

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Reduction did not converge within {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

pub type Result<T> = std::result::Result<T, LatticeError>;
