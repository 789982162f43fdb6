//! Recursive-halving inner product argument

use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use pcs_core::{
    utils::{inner_product, log2_exact},
    GroupElement, PcsError, PcsResult, PedersenParams, TranscriptProtocol,
};
use rand_core::{CryptoRng, RngCore};

use crate::{FoldingProof, RoundCommitments};

/// Engine proving `<a, b> = c` in `log n` folding rounds.
///
/// The commitment to `a` is a single group element; the argument carries
/// one cross-term pair per round plus a final Schnorr opening. Verifier
/// work is linear in `n` (it folds the public basis and vector itself).
#[derive(Debug, Clone)]
pub struct FoldingIpa {
    params: PedersenParams,
}

impl FoldingIpa {
    pub fn new(params: PedersenParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PedersenParams {
        &self.params
    }

    /// Commit to a secret vector under a fresh blinder
    pub fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        a: &[Scalar],
    ) -> PcsResult<(GroupElement, Scalar)> {
        let blinder = Scalar::random(rng);
        Ok((self.params.commit(a, &blinder)?, blinder))
    }

    /// Prove `<a, b> = c` for the committed vector `a`.
    ///
    /// The transcript binds the commitment, the public vector, and the
    /// claimed product before any challenge is derived; the verifier must
    /// replay the identical append sequence.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        cm_a: &GroupElement,
        a: &[Scalar],
        blinder: &Scalar,
        b: &[Scalar],
        c: &Scalar,
    ) -> PcsResult<FoldingProof> {
        let n = a.len();
        if b.len() != n {
            return Err(PcsError::DimensionMismatch {
                expected: n,
                actual: b.len(),
            });
        }
        let rounds_hint = FoldingProof::expected_rounds(n)?;
        let basis = self.params.basis(n)?;

        transcript.append_point(b"cm_a", cm_a);
        transcript.append_scalars(b"b", b);
        transcript.append_scalar(b"c", c);

        let gamma = transcript.challenge_scalar(b"gamma");
        let u_gamma = self.params.u() * gamma;
        let h = self.params.h();

        let mut state = FoldState::new(
            basis.to_vec(),
            a.to_vec(),
            b.to_vec(),
            *blinder,
            *cm_a + u_gamma * *c,
        )?;
        let mut rounds = Vec::with_capacity(rounds_hint);

        while state.len() > 1 {
            let rho_left = Scalar::random(rng);
            let rho_right = Scalar::random(rng);
            let (pl, pr) = state.cross_terms(&u_gamma, &h, &rho_left, &rho_right)?;

            transcript.append_point(b"PL", &pl);
            transcript.append_point(b"PR", &pr);
            let mu = transcript.challenge_nonzero_scalar(b"mu");

            state = state.fold(&mu, &pl, &pr, &rho_left, &rho_right);
            rounds.push(RoundCommitments {
                left: pl.compress(),
                right: pr.compress(),
            });
        }
        // wire order is most-recent-first
        rounds.reverse();

        let last = state.finalize();
        let g_new = last.basis + u_gamma * last.public;
        let r = Scalar::random(rng);
        let rho_r = Scalar::random(rng);
        let big_r = g_new * r + h * rho_r;

        transcript.append_point(b"R", &big_r);
        let zeta = transcript.challenge_scalar(b"zeta");

        Ok(FoldingProof {
            n: n as u64,
            rounds,
            r: big_r.compress(),
            z: r + zeta * last.secret,
            z_blinder: rho_r + zeta * last.blinder,
        })
    }

    /// Verify an argument against the public instance `(cm_a, b, c)`.
    ///
    /// Challenges are re-derived from the transcript only; nothing in the
    /// argument is trusted beyond its group elements and responses. A
    /// malformed container is an error, a false argument is `Ok(false)`.
    pub fn verify(
        &self,
        transcript: &mut Transcript,
        cm_a: &GroupElement,
        b: &[Scalar],
        c: &Scalar,
        proof: &FoldingProof,
    ) -> PcsResult<bool> {
        let n = b.len();
        proof.validate(n)?;
        let pairs = proof.decompress_rounds()?;
        let big_r = GroupElement::from_compressed(&proof.r)?;

        transcript.append_point(b"cm_a", cm_a);
        transcript.append_scalars(b"b", b);
        transcript.append_scalar(b"c", c);

        let gamma = transcript.challenge_scalar(b"gamma");
        let u_gamma = self.params.u() * gamma;

        let mut basis = self.params.basis(n)?.to_vec();
        let mut public = b.to_vec();
        let mut aggregate = *cm_a + u_gamma * *c;

        // replay the rounds oldest-first; only the public side is folded
        for (pl, pr) in pairs.iter().rev() {
            transcript.append_point(b"PL", pl);
            transcript.append_point(b"PR", pr);
            let mu = transcript.challenge_nonzero_scalar(b"mu");
            let mu_inv = mu.invert();

            let half = basis.len() / 2;
            basis = (0..half).map(|i| basis[i] + basis[i + half] * mu_inv).collect();
            public = (0..half).map(|i| public[i] + mu_inv * public[i + half]).collect();
            aggregate += *pl * mu + *pr * mu_inv;
        }

        let g_new = basis[0] + u_gamma * public[0];
        transcript.append_point(b"R", &big_r);
        let zeta = transcript.challenge_scalar(b"zeta");

        Ok(g_new * proof.z + self.params.h() * proof.z_blinder == big_r + aggregate * zeta)
    }
}

/// State threaded through the folding rounds on the prover side.
///
/// The three vectors always have equal, power-of-two length; each fold
/// halves them until a single entry remains. `aggregate` tracks the
/// running commitment `P` so that at every round
/// `P = <basis, secret> + gamma*U * <secret, public> + blinder * H`.
#[derive(Debug, Clone)]
pub(crate) struct FoldState {
    basis: Vec<GroupElement>,
    secret: Vec<Scalar>,
    public: Vec<Scalar>,
    blinder: Scalar,
    aggregate: GroupElement,
}

/// Scalar leftovers once folding reaches length one
pub(crate) struct FinalState {
    pub basis: GroupElement,
    pub secret: Scalar,
    pub public: Scalar,
    pub blinder: Scalar,
    #[allow(dead_code)] // read by the interactive-mode tests
    pub aggregate: GroupElement,
}

impl FoldState {
    pub(crate) fn new(
        basis: Vec<GroupElement>,
        secret: Vec<Scalar>,
        public: Vec<Scalar>,
        blinder: Scalar,
        aggregate: GroupElement,
    ) -> PcsResult<Self> {
        let n = secret.len();
        log2_exact(n)?;
        for len in [basis.len(), public.len()] {
            if len != n {
                return Err(PcsError::DimensionMismatch {
                    expected: n,
                    actual: len,
                });
            }
        }
        Ok(Self {
            basis,
            secret,
            public,
            blinder,
            aggregate,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.secret.len()
    }

    /// Cross-term commitments for the current round
    pub(crate) fn cross_terms(
        &self,
        u_gamma: &GroupElement,
        h: &GroupElement,
        rho_left: &Scalar,
        rho_right: &Scalar,
    ) -> PcsResult<(GroupElement, GroupElement)> {
        let half = self.len() / 2;
        let (g_lo, g_hi) = self.basis.split_at(half);
        let (a_lo, a_hi) = self.secret.split_at(half);
        let (b_lo, b_hi) = self.public.split_at(half);

        let pl = PedersenParams::commit_with_basis(g_lo, a_hi)?
            + *u_gamma * inner_product(a_hi, b_lo)?
            + *h * *rho_left;
        let pr = PedersenParams::commit_with_basis(g_hi, a_lo)?
            + *u_gamma * inner_product(a_lo, b_hi)?
            + *h * *rho_right;
        Ok((pl, pr))
    }

    /// Fold to half length under the challenge `mu`.
    ///
    /// Orientation is fixed: the low half of the secret takes `mu`, the
    /// high half `mu^-1`, and the basis/public side mirrors the inverse.
    pub(crate) fn fold(
        self,
        mu: &Scalar,
        pl: &GroupElement,
        pr: &GroupElement,
        rho_left: &Scalar,
        rho_right: &Scalar,
    ) -> Self {
        let mu_inv = mu.invert();
        let half = self.len() / 2;

        let secret = (0..half)
            .map(|i| self.secret[i] + mu * self.secret[i + half])
            .collect();
        let public = (0..half)
            .map(|i| self.public[i] + mu_inv * self.public[i + half])
            .collect();
        let basis = (0..half)
            .map(|i| self.basis[i] + self.basis[i + half] * mu_inv)
            .collect();

        Self {
            basis,
            secret,
            public,
            blinder: self.blinder + mu * rho_left + mu_inv * rho_right,
            aggregate: self.aggregate + *pl * *mu + *pr * mu_inv,
        }
    }

    pub(crate) fn finalize(self) -> FinalState {
        debug_assert_eq!(self.len(), 1);
        FinalState {
            basis: self.basis[0],
            secret: self.secret[0],
            public: self.public[0],
            blinder: self.blinder,
            aggregate: self.aggregate,
        }
    }

    /// Rebuild the aggregate from the current parts; must always equal
    /// the incrementally folded `aggregate`
    #[cfg(test)]
    pub(crate) fn recompute_aggregate(
        &self,
        u_gamma: &GroupElement,
        h: &GroupElement,
    ) -> GroupElement {
        PedersenParams::commit_with_basis(&self.basis, &self.secret).unwrap()
            + *u_gamma * inner_product(&self.secret, &self.public).unwrap()
            + *h * self.blinder
    }
}
