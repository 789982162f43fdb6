//! Transcript management for the Fiat-Shamir transform
//!
//! Challenges are pure functions of the append log up to the point of
//! derivation. Prover and verifier must therefore perform byte-identical
//! append sequences; a divergence is a programming error that shows up as
//! a verification failure, never as a recoverable runtime case.

use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;

use crate::GroupElement;

/// Extension trait adding the append/challenge vocabulary used by the
/// argument engines to `merlin::Transcript`
pub trait TranscriptProtocol {
    /// Append a group element to the transcript
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement);

    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Append a scalar vector, length-prefixed
    fn append_scalars(&mut self, label: &'static [u8], scalars: &[Scalar]);

    /// Append an unsigned integer
    fn append_u64(&mut self, label: &'static [u8], value: u64);

    /// Derive a scalar challenge from the current log
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Derive a scalar challenge, re-deriving on the (negligible) zero
    /// outcome. Both sides run the same loop, so determinism holds.
    fn challenge_nonzero_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Branch an independent transcript sharing this one's history
    fn fork(&self, label: &'static [u8]) -> Transcript;
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement) {
        self.append_message(label, &point.to_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn append_scalars(&mut self, label: &'static [u8], scalars: &[Scalar]) {
        self.append_u64(b"len", scalars.len() as u64);
        for scalar in scalars {
            self.append_message(label, scalar.as_bytes());
        }
    }

    fn append_u64(&mut self, label: &'static [u8], value: u64) {
        self.append_message(label, &value.to_le_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }

    fn challenge_nonzero_scalar(&mut self, label: &'static [u8]) -> Scalar {
        loop {
            let scalar = self.challenge_scalar(label);
            if scalar != Scalar::ZERO {
                return scalar;
            }
        }
    }

    fn fork(&self, label: &'static [u8]) -> Transcript {
        let mut branch = self.clone();
        branch.append_message(b"fork", label);
        branch
    }
}

/// Create a transcript bound to this protocol suite and a caller domain
pub fn pcs_transcript(domain_label: &'static [u8]) -> Transcript {
    let mut transcript = Transcript::new(b"ipa-pcs");
    transcript.append_message(b"domain", domain_label);
    transcript
}
