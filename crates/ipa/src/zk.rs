//! Simulator and extractor for the blinded opening round
//!
//! Neither function is on the proving or verifying path. The simulator
//! demonstrates the zero-knowledge property: given only the public
//! instance and a pre-selected challenge, it emits a transcript the
//! verifier accepts, so accepting transcripts carry no information about
//! the witness. The extractor demonstrates special soundness: two
//! openings of the same round under distinct challenges yield the
//! witness by linear algebra.
//!
//! Challenges are chosen directly and deterministically by the caller;
//! there is no shared random-generator state to capture or rewind.

use curve25519_dalek::scalar::Scalar;
use pcs_core::{
    utils::{inner_product, random_scalars},
    GroupElement, PcsError, PcsResult, PedersenParams,
};
use rand_core::{CryptoRng, RngCore};

use crate::BatchedProof;

/// Build an accepting argument for `(cm_a, b, c)` without any witness,
/// valid under the pre-selected challenge `mu`.
///
/// The responses are sampled first; the round commitments are then
/// solved from the two verification identities.
pub fn simulate_opening<R: RngCore + CryptoRng>(
    params: &PedersenParams,
    rng: &mut R,
    cm_a: &GroupElement,
    b: &[Scalar],
    c: &Scalar,
    mu: &Scalar,
) -> PcsResult<BatchedProof> {
    let z = random_scalars(rng, b.len());
    let z_blinder = Scalar::random(rng);
    let ze = Scalar::random(rng);

    let ra_cm = params.commit(&z, &z_blinder)? - *cm_a * *mu;

    let e1_rho = Scalar::random(rng);
    let e1_cm = params.commit(&[Scalar::ZERO], &e1_rho)?;
    let masked_product = inner_product(&z, b)?;
    let c_cm = params.commit(&[*c], &Scalar::ZERO)?;
    let e0_cm = params.commit(&[masked_product], &ze)? - e1_cm * *mu - c_cm * *mu;

    Ok(BatchedProof {
        ra: ra_cm.compress(),
        e0: e0_cm.compress(),
        e1: e1_cm.compress(),
        z,
        z_blinder,
        ze,
    })
}

/// Recover the committed vector and its blinder from two openings of the
/// same round under distinct challenges
pub fn extract_witness(
    mu0: &Scalar,
    proof0: &BatchedProof,
    mu1: &Scalar,
    proof1: &BatchedProof,
) -> PcsResult<(Vec<Scalar>, Scalar)> {
    if proof0.ra != proof1.ra || proof0.e0 != proof1.e0 || proof0.e1 != proof1.e1 {
        return Err(PcsError::InvalidProofShape(
            "openings come from different rounds".to_string(),
        ));
    }
    if proof0.z.len() != proof1.z.len() {
        return Err(PcsError::DimensionMismatch {
            expected: proof0.z.len(),
            actual: proof1.z.len(),
        });
    }
    if mu0 == mu1 {
        return Err(PcsError::InvalidProofShape(
            "challenges must differ".to_string(),
        ));
    }

    let diff_inv = (mu0 - mu1).invert();
    let vector = proof0
        .z
        .iter()
        .zip(proof1.z.iter())
        .map(|(z0, z1)| (z0 - z1) * diff_inv)
        .collect();
    let blinder = (proof0.z_blinder - proof1.z_blinder) * diff_inv;
    Ok((vector, blinder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlindedOpening, SqrtIpa};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn simulated_openings_verify_without_a_witness() {
        let mut rng = StdRng::seed_from_u64(30);
        let engine = SqrtIpa::new(PedersenParams::setup(9));

        // a commitment whose opening the simulator never learns
        let hidden = random_scalars(&mut rng, 8);
        let hidden_blinder = Scalar::random(&mut rng);
        let cm_a = engine.params().commit(&hidden, &hidden_blinder).unwrap();

        let b = random_scalars(&mut rng, 8);
        // an arbitrary claimed product: the simulator accepts any statement
        let c = Scalar::from(123456u64);

        let mut challenge_rng = StdRng::seed_from_u64(31);
        let mu = Scalar::random(&mut challenge_rng);

        let simulated =
            simulate_opening(engine.params(), &mut rng, &cm_a, &b, &c, &mu).unwrap();
        assert!(engine.check_opening(&cm_a, &b, &c, &mu, &simulated).unwrap());

        // the simulation is tied to its pre-selected challenge
        let other = Scalar::random(&mut challenge_rng);
        assert!(!engine
            .check_opening(&cm_a, &b, &c, &other, &simulated)
            .unwrap());
    }

    #[test]
    fn two_openings_reveal_the_witness() {
        let mut rng = StdRng::seed_from_u64(32);
        let params = PedersenParams::setup(9);

        let a = random_scalars(&mut rng, 8);
        let blinder = Scalar::random(&mut rng);
        let cm_a = params.commit(&a, &blinder).unwrap();

        let b = random_scalars(&mut rng, 8);
        let round = BlindedOpening::sample(&params, &mut rng, &b).unwrap();

        let mut challenge_rng = StdRng::seed_from_u64(33);
        let mu0 = Scalar::random(&mut challenge_rng);
        let mu1 = Scalar::random(&mut challenge_rng);

        let proof0 = round.respond(&a, &blinder, &mu0);
        let proof1 = round.respond(&a, &blinder, &mu1);

        let (extracted, extracted_blinder) =
            extract_witness(&mu0, &proof0, &mu1, &proof1).unwrap();
        assert_eq!(extracted, a);
        assert_eq!(extracted_blinder, blinder);
        assert!(params.open(&cm_a, &extracted, &extracted_blinder).unwrap());
    }

    #[test]
    fn extraction_requires_distinct_challenges_and_one_round() {
        let mut rng = StdRng::seed_from_u64(34);
        let params = PedersenParams::setup(9);

        let a = random_scalars(&mut rng, 4);
        let blinder = Scalar::random(&mut rng);
        let b = random_scalars(&mut rng, 4);

        let round = BlindedOpening::sample(&params, &mut rng, &b).unwrap();
        let mu = Scalar::from(7u64);
        let proof = round.respond(&a, &blinder, &mu);

        assert!(extract_witness(&mu, &proof, &mu, &proof).is_err());

        let other_round = BlindedOpening::sample(&params, &mut rng, &b).unwrap();
        let other = other_round.respond(&a, &blinder, &Scalar::from(9u64));
        assert!(extract_witness(&mu, &proof, &Scalar::from(9u64), &other).is_err());
    }
}
