//! # PCS Core
//!
//! Foundational types for the inner-product-argument polynomial
//! commitment crates in this workspace:
//!
//! - Ristretto group element wrapper and multi-scalar multiplication
//! - Pedersen vector commitment parameters
//! - Transcript management for the Fiat-Shamir transform
//! - Error types and scalar-vector utilities
//!
//! ## Mathematical Background
//!
//! Everything is built on a Pedersen vector commitment over a prime-order
//! group with public parameters:
//! - `{G_i}`: basis points for the committed vector
//! - `H`: blinding base
//! - `U`: inner-product base (scaled by a transcript challenge before use)
//!
//! A commitment to a vector `v` under blinder `rho` is:
//! ```text
//! cm(v; rho) = sum_i v_i * G_i + rho * H
//! ```
//! The engine crates prove statements of the form `<a, b> = c` about a
//! committed `a` without revealing it.

pub mod errors;
pub mod group;
pub mod params;
pub mod transcript;
pub mod utils;

pub use errors::*;
pub use group::*;
pub use params::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};

/// Re-export merlin transcript
pub use merlin::Transcript;
