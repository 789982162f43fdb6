//! Argument containers and their wire encodings

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use pcs_core::{utils::log2_exact, GroupElement, PcsError, PcsResult};
use serde::{Deserialize, Serialize};

/// Cross-term commitments published in one folding round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCommitments {
    pub left: CompressedRistretto,
    pub right: CompressedRistretto,
}

/// Argument produced by the recursive-halving engine.
///
/// `rounds` is ordered most-recent-first: the verifier walks it from the
/// back so that the first folding round is replayed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingProof {
    /// Length of the vectors the argument was built for
    pub n: u64,
    /// Cross-term pairs, most recent round first
    pub rounds: Vec<RoundCommitments>,
    /// Schnorr commitment from the final opening
    pub r: CompressedRistretto,
    /// Schnorr response for the folded scalar
    pub z: Scalar,
    /// Schnorr response for the accumulated blinder
    pub z_blinder: Scalar,
}

impl FoldingProof {
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Folding rounds expected for vectors of length `n`
    pub fn expected_rounds(n: usize) -> PcsResult<usize> {
        Ok(log2_exact(n)? as usize)
    }

    /// Check the container against the public instance size
    pub fn validate(&self, n: usize) -> PcsResult<()> {
        if self.n != n as u64 {
            return Err(PcsError::InvalidProofShape(format!(
                "argument built for length {}, instance has length {}",
                self.n, n
            )));
        }
        let expected = Self::expected_rounds(n)?;
        if self.rounds.len() != expected {
            return Err(PcsError::InvalidProofShape(format!(
                "expected {} folding rounds for length {}, got {}",
                expected,
                n,
                self.rounds.len()
            )));
        }
        Ok(())
    }

    /// Decode the cross-term pairs, preserving order
    pub fn decompress_rounds(&self) -> PcsResult<Vec<(GroupElement, GroupElement)>> {
        self.rounds
            .iter()
            .map(|round| {
                Ok((
                    GroupElement::from_compressed(&round.left)?,
                    GroupElement::from_compressed(&round.right)?,
                ))
            })
            .collect()
    }

    /// Fixed-layout encoding: `n`, round pairs, `R`, `z`, `z_blinder`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.rounds.len() * 64 + 96);
        bytes.extend_from_slice(&self.n.to_le_bytes());
        for round in &self.rounds {
            bytes.extend_from_slice(round.left.as_bytes());
            bytes.extend_from_slice(round.right.as_bytes());
        }
        bytes.extend_from_slice(self.r.as_bytes());
        bytes.extend_from_slice(self.z.as_bytes());
        bytes.extend_from_slice(self.z_blinder.as_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> PcsResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let n = reader.read_u64()?;
        let rounds_len = log2_exact(usize::try_from(n).map_err(|_| {
            PcsError::InvalidProofShape(format!("length {n} does not fit this platform"))
        })?)? as usize;

        let rounds = (0..rounds_len)
            .map(|_| {
                Ok(RoundCommitments {
                    left: reader.read_point()?,
                    right: reader.read_point()?,
                })
            })
            .collect::<PcsResult<Vec<_>>>()?;
        let r = reader.read_point()?;
        let z = reader.read_scalar()?;
        let z_blinder = reader.read_scalar()?;
        reader.finish()?;

        Ok(Self {
            n,
            rounds,
            r,
            z,
            z_blinder,
        })
    }
}

/// Argument produced by the sqrt-decomposition engine's batching round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchedProof {
    /// Commitment to the masking vector
    pub ra: CompressedRistretto,
    /// Commitment to the masked inner product
    pub e0: CompressedRistretto,
    /// Auxiliary blinding commitment
    pub e1: CompressedRistretto,
    /// Masked responses, one per column
    pub z: Vec<Scalar>,
    /// Response for the commitment blinder
    pub z_blinder: Scalar,
    /// Response for the inner-product blinders
    pub ze: Scalar,
}

impl BatchedProof {
    /// Check the response vector against the public column count
    pub fn validate(&self, cols: usize) -> PcsResult<()> {
        if self.z.len() != cols {
            return Err(PcsError::InvalidProofShape(format!(
                "expected {} responses, got {}",
                cols,
                self.z.len()
            )));
        }
        Ok(())
    }

    /// Fixed-layout encoding: column count, `Ra`, `E0`, `E1`, responses
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + 96 + self.z.len() * 32 + 64);
        bytes.extend_from_slice(&(self.z.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.ra.as_bytes());
        bytes.extend_from_slice(self.e0.as_bytes());
        bytes.extend_from_slice(self.e1.as_bytes());
        for response in &self.z {
            bytes.extend_from_slice(response.as_bytes());
        }
        bytes.extend_from_slice(self.z_blinder.as_bytes());
        bytes.extend_from_slice(self.ze.as_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> PcsResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let cols = usize::try_from(reader.read_u64()?)
            .map_err(|_| PcsError::InvalidProofShape("oversized response count".to_string()))?;
        if cols > bytes.len() / 32 {
            return Err(PcsError::InvalidProofShape(
                "response count exceeds payload".to_string(),
            ));
        }

        let ra = reader.read_point()?;
        let e0 = reader.read_point()?;
        let e1 = reader.read_point()?;
        let z = (0..cols)
            .map(|_| reader.read_scalar())
            .collect::<PcsResult<Vec<_>>>()?;
        let z_blinder = reader.read_scalar()?;
        let ze = reader.read_scalar()?;
        reader.finish()?;

        Ok(Self {
            ra,
            e0,
            e1,
            z,
            z_blinder,
            ze,
        })
    }
}

/// Cursor over a fixed-layout proof encoding
struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> PcsResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| PcsError::InvalidProofShape("truncated encoding".to_string()))?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn read_u64(&mut self) -> PcsResult<u64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().expect("slice length checked");
        Ok(u64::from_le_bytes(bytes))
    }

    fn read_point(&mut self) -> PcsResult<CompressedRistretto> {
        let bytes: [u8; 32] = self.take(32)?.try_into().expect("slice length checked");
        Ok(CompressedRistretto(bytes))
    }

    fn read_scalar(&mut self) -> PcsResult<Scalar> {
        let bytes: [u8; 32] = self.take(32)?.try_into().expect("slice length checked");
        Option::from(Scalar::from_canonical_bytes(bytes))
            .ok_or_else(|| PcsError::InvalidProofShape("non-canonical scalar".to_string()))
    }

    fn finish(self) -> PcsResult<()> {
        if self.offset != self.bytes.len() {
            return Err(PcsError::InvalidProofShape(
                "trailing bytes after encoding".to_string(),
            ));
        }
        Ok(())
    }
}
