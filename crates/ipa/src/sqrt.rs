//! Sqrt-decomposition inner product argument
//!
//! The committed vector is laid out as a `rows x cols` matrix. Each row
//! gets its own Pedersen commitment, so the commitment is `rows` group
//! elements rather than one. To prove `<a, b> = v` for a public vector
//! that factors as `b[i*cols + j] = b1[i] * b0[j]`, the prover batches
//! the rows with the weights `b1` into a single `cols`-length vector and
//! opens it with one blinded Schnorr-style round against `b0`.

use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use pcs_core::{
    utils::{inner_product, log2_exact, random_scalars},
    GroupElement, PcsError, PcsResult, PedersenParams, TranscriptProtocol,
};
use rand_core::{CryptoRng, RngCore};

use crate::BatchedProof;

/// Row/column split for a power-of-two length: `rows = 2^(k/2)` and
/// `cols = n / rows`, so `rows <= cols < 2 * rows`
pub fn split_dims(n: usize) -> PcsResult<(usize, usize)> {
    let k = log2_exact(n)?;
    let rows = 1usize << (k / 2);
    Ok((rows, n / rows))
}

/// Engine proving `<a, b> = v` with one batching round.
///
/// Commitment, argument, and verifier time are all `O(sqrt n)`; the
/// public vector must factor over the row/column split.
#[derive(Debug, Clone)]
pub struct SqrtIpa {
    params: PedersenParams,
}

impl SqrtIpa {
    pub fn new(params: PedersenParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PedersenParams {
        &self.params
    }

    /// Commit to a vector row by row.
    ///
    /// Returns one commitment and one blinder per row; the commitment
    /// list is the public artifact, the blinders stay with the witness.
    pub fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        a: &[Scalar],
    ) -> PcsResult<(Vec<GroupElement>, Vec<Scalar>)> {
        let (rows, cols) = split_dims(a.len())?;
        let blinders = random_scalars(rng, rows);
        let commitments = a
            .chunks(cols)
            .zip(blinders.iter())
            .map(|(row, blinder)| self.params.commit(row, blinder))
            .collect::<PcsResult<Vec<_>>>()?;
        Ok((commitments, blinders))
    }

    /// Prove `<a, b> = v` where `b` factors into `b0` (per column) and
    /// `b1` (per row)
    pub fn batch_prove<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        cm_rows: &[GroupElement],
        a: &[Scalar],
        blinders: &[Scalar],
        b0: &[Scalar],
        b1: &[Scalar],
        v: &Scalar,
    ) -> PcsResult<BatchedProof> {
        let cols = b0.len();
        let rows = b1.len();
        if rows * cols != a.len() {
            return Err(PcsError::DimensionMismatch {
                expected: rows * cols,
                actual: a.len(),
            });
        }
        for len in [blinders.len(), cm_rows.len()] {
            if len != rows {
                return Err(PcsError::DimensionMismatch {
                    expected: rows,
                    actual: len,
                });
            }
        }

        // batch the rows with the public weights b1
        let mut folded = vec![Scalar::ZERO; cols];
        for (weight, row) in b1.iter().zip(a.chunks(cols)) {
            for (entry, value) in folded.iter_mut().zip(row.iter()) {
                *entry += weight * value;
            }
        }
        let folded_blinder = inner_product(b1, blinders)?;
        let folded_cm = GroupElement::msm(b1, cm_rows)?;

        self.inner_product_prove(rng, transcript, &folded_cm, &folded, &folded_blinder, b0, v)
    }

    /// Verify a batched argument against the row commitments
    pub fn batch_verify(
        &self,
        transcript: &mut Transcript,
        cm_rows: &[GroupElement],
        b0: &[Scalar],
        b1: &[Scalar],
        v: &Scalar,
        proof: &BatchedProof,
    ) -> PcsResult<bool> {
        if cm_rows.len() != b1.len() {
            return Err(PcsError::DimensionMismatch {
                expected: b1.len(),
                actual: cm_rows.len(),
            });
        }
        let folded_cm = GroupElement::msm(b1, cm_rows)?;
        self.inner_product_verify(transcript, &folded_cm, b0, v, proof)
    }

    /// Prove `<a, b> = c` for a single committed vector with one blinded
    /// opening round
    pub fn inner_product_prove<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        cm_a: &GroupElement,
        a: &[Scalar],
        blinder: &Scalar,
        b: &[Scalar],
        c: &Scalar,
    ) -> PcsResult<BatchedProof> {
        if a.len() != b.len() {
            return Err(PcsError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }

        transcript.append_point(b"cm_a", cm_a);
        transcript.append_scalars(b"b", b);
        transcript.append_scalar(b"c", c);

        let round = BlindedOpening::sample(&self.params, rng, b)?;
        transcript.append_point(b"Ra", &round.ra_cm);
        transcript.append_point(b"E0", &round.e0_cm);
        transcript.append_point(b"E1", &round.e1_cm);
        let mu = transcript.challenge_nonzero_scalar(b"mu");

        Ok(round.respond(a, blinder, &mu))
    }

    /// Verify a one-round argument, re-deriving the challenge from the
    /// transcript
    pub fn inner_product_verify(
        &self,
        transcript: &mut Transcript,
        cm_a: &GroupElement,
        b: &[Scalar],
        c: &Scalar,
        proof: &BatchedProof,
    ) -> PcsResult<bool> {
        proof.validate(b.len())?;
        let ra = GroupElement::from_compressed(&proof.ra)?;
        let e0 = GroupElement::from_compressed(&proof.e0)?;
        let e1 = GroupElement::from_compressed(&proof.e1)?;

        transcript.append_point(b"cm_a", cm_a);
        transcript.append_scalars(b"b", b);
        transcript.append_scalar(b"c", c);
        transcript.append_point(b"Ra", &ra);
        transcript.append_point(b"E0", &e0);
        transcript.append_point(b"E1", &e1);
        let mu = transcript.challenge_nonzero_scalar(b"mu");

        self.check_opening(cm_a, b, c, &mu, proof)
    }

    /// Check the two opening identities under an explicit challenge.
    ///
    /// This is the verifier's algebra with the challenge supplied by the
    /// caller; the transcript path above and an interactive verifier that
    /// samples `mu` itself are equivalent through this function.
    pub fn check_opening(
        &self,
        cm_a: &GroupElement,
        b: &[Scalar],
        c: &Scalar,
        mu: &Scalar,
        proof: &BatchedProof,
    ) -> PcsResult<bool> {
        proof.validate(b.len())?;
        let ra = GroupElement::from_compressed(&proof.ra)?;
        let e0 = GroupElement::from_compressed(&proof.e0)?;
        let e1 = GroupElement::from_compressed(&proof.e1)?;

        let masked_product = inner_product(&proof.z, b)?;
        let blinded = ra + *cm_a * *mu == self.params.commit(&proof.z, &proof.z_blinder)?;

        let c_cm = self.params.commit(&[*c], &Scalar::ZERO)?;
        let product = e0 + e1 * *mu + c_cm * *mu
            == self.params.commit(&[masked_product], &proof.ze)?;

        Ok(blinded && product)
    }
}

/// Prover state for one blinded opening round.
///
/// Sampling and responding are separate moves so the round can be driven
/// interactively: the commitments go out, a challenge comes back, and the
/// same round may be opened under any number of challenges (which is what
/// the extractor in [`crate::zk`] exploits).
#[derive(Debug, Clone)]
pub struct BlindedOpening {
    ra: Vec<Scalar>,
    ra_rho: Scalar,
    e0_rho: Scalar,
    e1_rho: Scalar,
    /// Commitment to the masking vector
    pub ra_cm: GroupElement,
    /// Commitment to the masked inner product
    pub e0_cm: GroupElement,
    /// Auxiliary blinding commitment
    pub e1_cm: GroupElement,
}

impl BlindedOpening {
    /// Sample masks and commit to them against the public vector `b`
    pub fn sample<R: RngCore + CryptoRng>(
        params: &PedersenParams,
        rng: &mut R,
        b: &[Scalar],
    ) -> PcsResult<Self> {
        let ra = random_scalars(rng, b.len());
        let ra_rho = Scalar::random(rng);
        let ra_cm = params.commit(&ra, &ra_rho)?;

        let e0 = inner_product(&ra, b)?;
        let e0_rho = Scalar::random(rng);
        let e0_cm = params.commit(&[e0], &e0_rho)?;
        let e1_rho = Scalar::random(rng);
        let e1_cm = params.commit(&[Scalar::ZERO], &e1_rho)?;

        Ok(Self {
            ra,
            ra_rho,
            e0_rho,
            e1_rho,
            ra_cm,
            e0_cm,
            e1_cm,
        })
    }

    /// Open the round for the witness under the challenge `mu`
    pub fn respond(&self, a: &[Scalar], blinder: &Scalar, mu: &Scalar) -> BatchedProof {
        BatchedProof {
            ra: self.ra_cm.compress(),
            e0: self.e0_cm.compress(),
            e1: self.e1_cm.compress(),
            z: self
                .ra
                .iter()
                .zip(a.iter())
                .map(|(mask, value)| mask + mu * value)
                .collect(),
            z_blinder: self.ra_rho + mu * blinder,
            ze: self.e0_rho + mu * self.e1_rho,
        }
    }
}
