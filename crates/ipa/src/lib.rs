//! # Inner Product Arguments
//!
//! Two engines proving `<a, b> = c` for a Pedersen-committed secret
//! vector `a`, a public vector `b`, and a claimed product `c`:
//!
//! - [`FoldingIpa`]: the recursive-halving argument. Each round commits
//!   to two cross terms, derives a challenge `mu`, and folds vectors and
//!   basis to half length, ending in a one-scalar Schnorr opening. The
//!   argument carries `O(log n)` group elements.
//!
//! - [`SqrtIpa`]: the row/column decomposition. The vector is committed
//!   as `O(sqrt n)` row commitments; an evaluation batches the rows with
//!   public weights and finishes with a single blinded opening round.
//!   Larger argument, but one round and `O(sqrt n)` verifier work.
//!
//! ## Folding round
//!
//! With the vectors split into low and high halves, a round publishes
//!
//! ```text
//! PL = <G_lo, a_hi> + gamma*U * <a_hi, b_lo> + rho_L * H
//! PR = <G_hi, a_lo> + gamma*U * <a_lo, b_hi> + rho_R * H
//! ```
//!
//! and folds with the challenge `mu`:
//!
//! ```text
//! a' = a_lo + mu * a_hi        b' = b_lo + mu^-1 * b_hi
//! G' = G_lo + mu^-1 * G_hi     P' = P + mu * PL + mu^-1 * PR
//! ```
//!
//! The low half always takes `mu` on the secret side and the high half
//! `mu^-1`; the verifier replays exactly this orientation.

pub mod fold;
pub mod proof;
pub mod sqrt;
pub mod zk;

pub use fold::*;
pub use proof::*;
pub use sqrt::*;
pub use zk::*;
