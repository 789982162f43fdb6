//! Ristretto group element wrapper

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, VartimeMultiscalarMul},
};
use serde::{Deserialize, Serialize};

use crate::{PcsError, PcsResult};

/// An element of the Ristretto prime-order group.
///
/// Wraps `RistrettoPoint` with the operations the argument engines need:
/// group arithmetic, multi-scalar multiplication, and the byte forms used
/// for transcripts and wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupElement(RistrettoPoint);

impl GroupElement {
    /// The group identity
    pub fn identity() -> Self {
        Self(RistrettoPoint::identity())
    }

    pub fn is_identity(&self) -> bool {
        self.0 == RistrettoPoint::identity()
    }

    /// Compress to the 32-byte wire form
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    /// Canonical bytes, as appended to transcripts
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Decode a compressed point received inside a proof
    pub fn from_compressed(compressed: &CompressedRistretto) -> PcsResult<Self> {
        compressed
            .decompress()
            .map(Self)
            .ok_or_else(|| PcsError::InvalidProofShape("undecodable group element".to_string()))
    }

    /// Map 64 uniform bytes to a group element (generator derivation)
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        Self(RistrettoPoint::from_uniform_bytes(bytes))
    }

    /// Variable-time multi-scalar multiplication: `sum_i scalars[i] * points[i]`
    pub fn msm(scalars: &[Scalar], points: &[GroupElement]) -> PcsResult<Self> {
        if scalars.len() != points.len() {
            return Err(PcsError::DimensionMismatch {
                expected: scalars.len(),
                actual: points.len(),
            });
        }
        Ok(Self(RistrettoPoint::vartime_multiscalar_mul(
            scalars,
            points.iter().map(|p| &p.0),
        )))
    }
}

impl std::ops::Add for GroupElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for GroupElement {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for GroupElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::Neg for GroupElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::ops::Mul<Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::iter::Sum for GroupElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, p| acc + p)
    }
}

impl From<RistrettoPoint> for GroupElement {
    fn from(point: RistrettoPoint) -> Self {
        Self(point)
    }
}

impl From<GroupElement> for RistrettoPoint {
    fn from(element: GroupElement) -> Self {
        element.0
    }
}
