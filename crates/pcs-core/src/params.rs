//! Pedersen vector commitment parameters

use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

use crate::{GroupElement, PcsError, PcsResult};

/// Public parameters for the Pedersen vector commitment.
///
/// Holds a basis `{G_i}` for committed vectors, a blinding base `H`, and
/// an inner-product base `U`. All points are derived by deterministic
/// hash-to-group, so two parties calling [`PedersenParams::setup`] with
/// the same capacity agree on the parameters without any exchange.
///
/// Parameters are an explicit value handed to every commitment and
/// argument call; nothing in this workspace keeps them in module state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedersenParams {
    basis: Vec<GroupElement>,
    h: GroupElement,
    u: GroupElement,
}

/// Hash a labelled byte string to a group element
fn hash_to_group(label: &[u8]) -> GroupElement {
    let mut hasher = Sha512::new();
    hasher.update(b"ipa-pcs/generator");
    hasher.update(label);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&digest);
    GroupElement::from_uniform_bytes(&bytes)
}

impl PedersenParams {
    /// Derive parameters with `capacity` basis points.
    ///
    /// Committing a vector of length `n` requires `capacity > n`, so size
    /// the setup with headroom for the largest vector in play.
    pub fn setup(capacity: usize) -> Self {
        let basis = (0..capacity)
            .map(|i| {
                let mut label = b"basis-".to_vec();
                label.extend_from_slice(&(i as u64).to_le_bytes());
                hash_to_group(&label)
            })
            .collect();

        Self {
            basis,
            h: hash_to_group(b"blinding"),
            u: hash_to_group(b"inner-product"),
        }
    }

    /// Number of basis points
    pub fn capacity(&self) -> usize {
        self.basis.len()
    }

    /// The blinding base `H`
    pub fn h(&self) -> GroupElement {
        self.h
    }

    /// The inner-product base `U`
    pub fn u(&self) -> GroupElement {
        self.u
    }

    /// The first `n` basis points
    pub fn basis(&self, n: usize) -> PcsResult<&[GroupElement]> {
        if n > self.basis.len() {
            return Err(PcsError::InsufficientGenerators {
                needed: n,
                available: self.basis.len(),
            });
        }
        Ok(&self.basis[..n])
    }

    /// Commit to a vector: `sum_i v_i * G_i + blinder * H`.
    ///
    /// Requires strictly more basis points than vector entries.
    pub fn commit(&self, vector: &[Scalar], blinder: &Scalar) -> PcsResult<GroupElement> {
        if vector.len() >= self.basis.len() {
            return Err(PcsError::InsufficientGenerators {
                needed: vector.len() + 1,
                available: self.basis.len(),
            });
        }
        Ok(Self::commit_with_basis(&self.basis[..vector.len()], vector)? + self.h * *blinder)
    }

    /// Unblinded multi-scalar multiplication over a caller-chosen basis
    pub fn commit_with_basis(basis: &[GroupElement], vector: &[Scalar]) -> PcsResult<GroupElement> {
        if basis.len() < vector.len() {
            return Err(PcsError::InsufficientGenerators {
                needed: vector.len(),
                available: basis.len(),
            });
        }
        GroupElement::msm(vector, &basis[..vector.len()])
    }

    /// Check an opening of a commitment produced by [`PedersenParams::commit`]
    pub fn open(
        &self,
        commitment: &GroupElement,
        vector: &[Scalar],
        blinder: &Scalar,
    ) -> PcsResult<bool> {
        Ok(self.commit(vector, blinder)? == *commitment)
    }
}
