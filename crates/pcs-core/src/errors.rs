//! Error types shared by the commitment and argument crates

use thiserror::Error;

/// Failure cases surfaced by commitment and argument operations.
///
/// An algebraically false proof is not an error: verifiers report it as
/// `Ok(false)`. Errors are reserved for malformed inputs and malformed
/// proof containers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcsError {
    /// Secret, public, and basis vectors must agree in length
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The halving and row/column splits require power-of-two lengths
    #[error("vector length {0} is not a nonzero power of two")]
    LengthNotPowerOfTwo(usize),

    /// Public parameters are too small for the requested vector
    #[error("insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// A received argument is structurally unusable: wrong round count,
    /// inconsistent field lengths, or undecodable group elements
    #[error("invalid proof shape: {0}")]
    InvalidProofShape(String),
}

/// Result type for commitment and argument operations
pub type PcsResult<T> = Result<T, PcsError>;
