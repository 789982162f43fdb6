//! # Polynomial evaluation proofs
//!
//! Adapters that turn "committed polynomial `f` evaluates to `v` at a
//! point" into the inner-product instances consumed by the engines in
//! the `ipa` crate:
//!
//! - univariate, monomial basis: secret vector = coefficients, public
//!   vector = powers of the evaluation point;
//! - multilinear, hypercube table: secret vector = evaluations, public
//!   vector = the equality basis at the evaluation point.
//!
//! [`FoldingScheme`] commits to one group element and proves with the
//! recursive-halving argument; [`SqrtScheme`] commits to one group
//! element per row and proves with the batching argument, factoring the
//! public vector over the row/column split.

pub mod mle;

pub use mle::MlePolynomial;

use curve25519_dalek::scalar::Scalar;
use ipa::{split_dims, BatchedProof, FoldingIpa, FoldingProof, SqrtIpa};
use merlin::Transcript;
use pcs_core::{
    utils::{log2_exact, scalar_powers},
    GroupElement, PcsError, PcsResult, PedersenParams,
};
use rand_core::{CryptoRng, RngCore};

/// A polynomial commitment scheme with evaluation proofs in the
/// univariate monomial basis and the multilinear hypercube basis.
///
/// The two implementations share public parameters but differ in
/// commitment shape and argument size; callers pick by trade-off.
pub trait EvaluationScheme {
    type Commitment: Clone;
    type Blinding;
    type Proof;

    /// Commit to the secret vector (coefficients or evaluation table)
    fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        vector: &[Scalar],
    ) -> PcsResult<(Self::Commitment, Self::Blinding)>;

    /// Prove `f(x) = y` for committed coefficients of a univariate `f`
    fn prove_univariate<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &Self::Commitment,
        coeffs: &[Scalar],
        blinding: &Self::Blinding,
        x: &Scalar,
        y: &Scalar,
    ) -> PcsResult<Self::Proof>;

    fn verify_univariate(
        &self,
        transcript: &mut Transcript,
        commitment: &Self::Commitment,
        x: &Scalar,
        y: &Scalar,
        proof: &Self::Proof,
    ) -> PcsResult<bool>;

    /// Prove `f(point) = value` for a committed multilinear table
    fn prove_mle<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &Self::Commitment,
        poly: &MlePolynomial,
        blinding: &Self::Blinding,
        point: &[Scalar],
        value: &Scalar,
    ) -> PcsResult<Self::Proof>;

    fn verify_mle(
        &self,
        transcript: &mut Transcript,
        commitment: &Self::Commitment,
        point: &[Scalar],
        value: &Scalar,
        proof: &Self::Proof,
    ) -> PcsResult<bool>;
}

/// Evaluation proofs over the recursive-halving argument: one-element
/// commitments, `O(log n)` proofs, linear verifier folding
#[derive(Debug, Clone)]
pub struct FoldingScheme {
    engine: FoldingIpa,
}

impl FoldingScheme {
    pub fn new(params: PedersenParams) -> Self {
        Self {
            engine: FoldingIpa::new(params),
        }
    }

    pub fn engine(&self) -> &FoldingIpa {
        &self.engine
    }
}

impl EvaluationScheme for FoldingScheme {
    type Commitment = GroupElement;
    type Blinding = Scalar;
    type Proof = FoldingProof;

    fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        vector: &[Scalar],
    ) -> PcsResult<(GroupElement, Scalar)> {
        self.engine.commit(rng, vector)
    }

    fn prove_univariate<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &GroupElement,
        coeffs: &[Scalar],
        blinding: &Scalar,
        x: &Scalar,
        y: &Scalar,
    ) -> PcsResult<FoldingProof> {
        let powers = scalar_powers(x, coeffs.len());
        self.engine
            .prove(rng, transcript, commitment, coeffs, blinding, &powers, y)
    }

    fn verify_univariate(
        &self,
        transcript: &mut Transcript,
        commitment: &GroupElement,
        x: &Scalar,
        y: &Scalar,
        proof: &FoldingProof,
    ) -> PcsResult<bool> {
        let n = usize::try_from(proof.n).map_err(|_| {
            PcsError::InvalidProofShape(format!("length {} does not fit this platform", proof.n))
        })?;
        // bound n by the parameters before materializing the power basis
        self.engine.params().basis(n)?;
        let powers = scalar_powers(x, n);
        self.engine.verify(transcript, commitment, &powers, y, proof)
    }

    fn prove_mle<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &GroupElement,
        poly: &MlePolynomial,
        blinding: &Scalar,
        point: &[Scalar],
        value: &Scalar,
    ) -> PcsResult<FoldingProof> {
        if point.len() != poly.num_vars() {
            return Err(PcsError::DimensionMismatch {
                expected: poly.num_vars(),
                actual: point.len(),
            });
        }
        let basis = MlePolynomial::eq_basis(point);
        self.engine
            .prove(rng, transcript, commitment, poly.evals(), blinding, &basis, value)
    }

    fn verify_mle(
        &self,
        transcript: &mut Transcript,
        commitment: &GroupElement,
        point: &[Scalar],
        value: &Scalar,
        proof: &FoldingProof,
    ) -> PcsResult<bool> {
        let basis = MlePolynomial::eq_basis(point);
        self.engine.verify(transcript, commitment, &basis, value, proof)
    }
}

/// Evaluation proofs over the batching argument: `O(sqrt n)` commitments
/// and proofs, `O(sqrt n)` verifier time, a single challenge round
#[derive(Debug, Clone)]
pub struct SqrtScheme {
    engine: SqrtIpa,
}

impl SqrtScheme {
    pub fn new(params: PedersenParams) -> Self {
        Self {
            engine: SqrtIpa::new(params),
        }
    }

    pub fn engine(&self) -> &SqrtIpa {
        &self.engine
    }

    /// Powers of `x` factored over the split: `b0[j] = x^j` per column,
    /// `b1[i] = x^(i*cols)` per row
    fn factor_powers(x: &Scalar, rows: usize, cols: usize) -> (Vec<Scalar>, Vec<Scalar>) {
        let b0 = scalar_powers(x, cols);
        let x_to_cols = b0[cols - 1] * x;
        let b1 = scalar_powers(&x_to_cols, rows);
        (b0, b1)
    }

    /// Equality basis factored over the split: the low coordinates index
    /// the columns, the high coordinates the rows
    fn factor_eq(point: &[Scalar], cols: usize) -> (Vec<Scalar>, Vec<Scalar>) {
        let col_vars = cols.trailing_zeros() as usize;
        (
            MlePolynomial::eq_basis(&point[..col_vars]),
            MlePolynomial::eq_basis(&point[col_vars..]),
        )
    }
}

impl EvaluationScheme for SqrtScheme {
    type Commitment = Vec<GroupElement>;
    type Blinding = Vec<Scalar>;
    type Proof = BatchedProof;

    fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        vector: &[Scalar],
    ) -> PcsResult<(Vec<GroupElement>, Vec<Scalar>)> {
        self.engine.commit(rng, vector)
    }

    fn prove_univariate<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &Vec<GroupElement>,
        coeffs: &[Scalar],
        blinding: &Vec<Scalar>,
        x: &Scalar,
        y: &Scalar,
    ) -> PcsResult<BatchedProof> {
        let (rows, cols) = split_dims(coeffs.len())?;
        let (b0, b1) = Self::factor_powers(x, rows, cols);
        self.engine
            .batch_prove(rng, transcript, commitment, coeffs, blinding, &b0, &b1, y)
    }

    fn verify_univariate(
        &self,
        transcript: &mut Transcript,
        commitment: &Vec<GroupElement>,
        x: &Scalar,
        y: &Scalar,
        proof: &BatchedProof,
    ) -> PcsResult<bool> {
        let rows = commitment.len();
        let cols = proof.z.len();
        if rows == 0 || cols == 0 {
            return Err(PcsError::InvalidProofShape(
                "empty commitment or response vector".to_string(),
            ));
        }
        let (b0, b1) = Self::factor_powers(x, rows, cols);
        self.engine.batch_verify(transcript, commitment, &b0, &b1, y, proof)
    }

    fn prove_mle<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
        commitment: &Vec<GroupElement>,
        poly: &MlePolynomial,
        blinding: &Vec<Scalar>,
        point: &[Scalar],
        value: &Scalar,
    ) -> PcsResult<BatchedProof> {
        if point.len() != poly.num_vars() {
            return Err(PcsError::DimensionMismatch {
                expected: poly.num_vars(),
                actual: point.len(),
            });
        }
        let (_, cols) = split_dims(poly.evals().len())?;
        let (b0, b1) = Self::factor_eq(point, cols);
        self.engine
            .batch_prove(rng, transcript, commitment, poly.evals(), blinding, &b0, &b1, value)
    }

    fn verify_mle(
        &self,
        transcript: &mut Transcript,
        commitment: &Vec<GroupElement>,
        point: &[Scalar],
        value: &Scalar,
        proof: &BatchedProof,
    ) -> PcsResult<bool> {
        let row_vars = log2_exact(commitment.len())? as usize;
        if point.len() < row_vars {
            return Err(PcsError::DimensionMismatch {
                expected: row_vars,
                actual: point.len(),
            });
        }
        let cols = 1usize << (point.len() - row_vars);
        let (b0, b1) = Self::factor_eq(point, cols);
        self.engine.batch_verify(transcript, commitment, &b0, &b1, value, proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcs_core::utils::{inner_product, random_scalars};
    use pcs_core::{pcs_transcript, TranscriptProtocol};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn coeffs_2_through_9() -> Vec<Scalar> {
        (2u64..=9).map(Scalar::from).collect()
    }

    fn evaluate_univariate(coeffs: &[Scalar], x: &Scalar) -> Scalar {
        inner_product(coeffs, &scalar_powers(x, coeffs.len())).unwrap()
    }

    #[test]
    fn concrete_univariate_scenario_folding() {
        let mut rng = StdRng::seed_from_u64(50);
        let scheme = FoldingScheme::new(PedersenParams::setup(9));

        let coeffs = coeffs_2_through_9();
        let x = Scalar::from(4u64);
        let y = evaluate_univariate(&coeffs, &x);
        assert_eq!(y, Scalar::from(189_326u64));

        let (cm, blinding) = scheme.commit(&mut rng, &coeffs).unwrap();
        let root = pcs_transcript(b"uni-pcs");
        let proof = scheme
            .prove_univariate(&mut rng, &mut root.fork(b"p"), &cm, &coeffs, &blinding, &x, &y)
            .unwrap();
        assert!(scheme
            .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y, &proof)
            .unwrap());

        // swap the last coefficient but keep the original commitment: the
        // argument must no longer verify
        let mut tampered = coeffs.clone();
        tampered[7] = Scalar::from(100u64);
        let y_tampered = evaluate_univariate(&tampered, &x);
        let forged = scheme
            .prove_univariate(
                &mut rng,
                &mut root.fork(b"p"),
                &cm,
                &tampered,
                &blinding,
                &x,
                &y_tampered,
            )
            .unwrap();
        assert!(!scheme
            .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y_tampered, &forged)
            .unwrap());
    }

    #[test]
    fn concrete_univariate_scenario_sqrt() {
        let mut rng = StdRng::seed_from_u64(51);
        let scheme = SqrtScheme::new(PedersenParams::setup(9));

        let coeffs = coeffs_2_through_9();
        let x = Scalar::from(4u64);
        let y = evaluate_univariate(&coeffs, &x);

        let (cm, blinding) = scheme.commit(&mut rng, &coeffs).unwrap();
        let root = pcs_transcript(b"uni-pcs");
        let proof = scheme
            .prove_univariate(&mut rng, &mut root.fork(b"p"), &cm, &coeffs, &blinding, &x, &y)
            .unwrap();
        assert!(scheme
            .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y, &proof)
            .unwrap());

        let mut tampered = coeffs.clone();
        tampered[7] = Scalar::from(100u64);
        let y_tampered = evaluate_univariate(&tampered, &x);
        let forged = scheme
            .prove_univariate(
                &mut rng,
                &mut root.fork(b"p"),
                &cm,
                &tampered,
                &blinding,
                &x,
                &y_tampered,
            )
            .unwrap();
        assert!(!scheme
            .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y_tampered, &forged)
            .unwrap());
    }

    #[test]
    fn univariate_completeness_across_sizes_folding() {
        for (i, n) in [1usize, 2, 4, 8, 16, 32].into_iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(60 + i as u64);
            let scheme = FoldingScheme::new(PedersenParams::setup(n + 1));

            let coeffs = random_scalars(&mut rng, n);
            let x = Scalar::random(&mut rng);
            let y = evaluate_univariate(&coeffs, &x);

            let (cm, blinding) = scheme.commit(&mut rng, &coeffs).unwrap();
            let root = pcs_transcript(b"uni-pcs");
            let proof = scheme
                .prove_univariate(&mut rng, &mut root.fork(b"p"), &cm, &coeffs, &blinding, &x, &y)
                .unwrap();
            assert!(
                scheme
                    .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y, &proof)
                    .unwrap(),
                "degree bound {n} rejected"
            );
        }
    }

    #[test]
    fn univariate_completeness_across_sizes_sqrt() {
        for (i, n) in [1usize, 2, 4, 8, 16, 32].into_iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(70 + i as u64);
            let scheme = SqrtScheme::new(PedersenParams::setup(n + 1));

            let coeffs = random_scalars(&mut rng, n);
            let x = Scalar::random(&mut rng);
            let y = evaluate_univariate(&coeffs, &x);

            let (cm, blinding) = scheme.commit(&mut rng, &coeffs).unwrap();
            let root = pcs_transcript(b"uni-pcs");
            let proof = scheme
                .prove_univariate(&mut rng, &mut root.fork(b"p"), &cm, &coeffs, &blinding, &x, &y)
                .unwrap();
            assert!(
                scheme
                    .verify_univariate(&mut root.fork(b"p"), &cm, &x, &y, &proof)
                    .unwrap(),
                "degree bound {n} rejected"
            );
        }
    }

    #[test]
    fn mle_round_trip_both_schemes() {
        for k in 0usize..6 {
            let n = 1usize << k;
            let mut rng = StdRng::seed_from_u64(80 + k as u64);
            let poly = MlePolynomial::new(random_scalars(&mut rng, n)).unwrap();
            let point = random_scalars(&mut rng, k);
            let value = poly.evaluate(&point).unwrap();

            let folding = FoldingScheme::new(PedersenParams::setup(n + 1));
            let (cm, blinding) = folding.commit(&mut rng, poly.evals()).unwrap();
            let root = pcs_transcript(b"mle-pcs");
            let proof = folding
                .prove_mle(&mut rng, &mut root.fork(b"p"), &cm, &poly, &blinding, &point, &value)
                .unwrap();
            assert!(folding
                .verify_mle(&mut root.fork(b"p"), &cm, &point, &value, &proof)
                .unwrap());
            assert!(!folding
                .verify_mle(
                    &mut root.fork(b"p"),
                    &cm,
                    &point,
                    &(value + Scalar::ONE),
                    &proof
                )
                .unwrap());

            let sqrt = SqrtScheme::new(PedersenParams::setup(n + 1));
            let (cm, blinding) = sqrt.commit(&mut rng, poly.evals()).unwrap();
            let proof = sqrt
                .prove_mle(&mut rng, &mut root.fork(b"q"), &cm, &poly, &blinding, &point, &value)
                .unwrap();
            assert!(sqrt
                .verify_mle(&mut root.fork(b"q"), &cm, &point, &value, &proof)
                .unwrap());
            assert!(!sqrt
                .verify_mle(
                    &mut root.fork(b"q"),
                    &cm,
                    &point,
                    &(value + Scalar::ONE),
                    &proof
                )
                .unwrap());
        }
    }

    #[test]
    fn mle_point_length_is_gated() {
        let mut rng = StdRng::seed_from_u64(90);
        let scheme = FoldingScheme::new(PedersenParams::setup(5));
        let poly = MlePolynomial::new(random_scalars(&mut rng, 4)).unwrap();
        let (cm, blinding) = scheme.commit(&mut rng, poly.evals()).unwrap();

        let short_point = random_scalars(&mut rng, 1);
        let mut transcript = pcs_transcript(b"mle-pcs");
        assert!(matches!(
            scheme.prove_mle(
                &mut rng,
                &mut transcript,
                &cm,
                &poly,
                &blinding,
                &short_point,
                &Scalar::ONE
            ),
            Err(PcsError::DimensionMismatch { .. })
        ));
    }

    /// Identical seeds and transcript domains reproduce the proof down to
    /// its bytes; a diverging transcript domain changes the challenges
    /// and with them the argument
    #[test]
    fn proofs_are_reproducible_bit_for_bit() {
        let run = |domain: &'static [u8]| {
            let mut rng = StdRng::seed_from_u64(91);
            let scheme = FoldingScheme::new(PedersenParams::setup(17));
            let coeffs = random_scalars(&mut rng, 16);
            let x = Scalar::from(11u64);
            let y = evaluate_univariate(&coeffs, &x);
            let (cm, blinding) = scheme.commit(&mut rng, &coeffs).unwrap();
            let mut transcript = pcs_transcript(domain);
            scheme
                .prove_univariate(&mut rng, &mut transcript, &cm, &coeffs, &blinding, &x, &y)
                .unwrap()
                .to_bytes()
        };

        assert_eq!(run(b"domain-one"), run(b"domain-one"));
        assert_ne!(run(b"domain-one"), run(b"domain-two"));
    }
}
