//! Multilinear polynomials over the Boolean hypercube

use curve25519_dalek::scalar::Scalar;
use pcs_core::{utils::log2_exact, PcsError, PcsResult};

/// A multilinear polynomial in `num_vars` variables, represented by its
/// evaluations over the Boolean hypercube `{0,1}^num_vars`.
///
/// Index `i` of the table corresponds to the point whose `j`-th
/// coordinate is bit `j` of `i` (little-endian).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlePolynomial {
    evals: Vec<Scalar>,
    num_vars: usize,
}

impl MlePolynomial {
    /// Wrap an evaluation table; the length must be a power of two
    pub fn new(evals: Vec<Scalar>) -> PcsResult<Self> {
        let num_vars = log2_exact(evals.len())? as usize;
        Ok(Self { evals, num_vars })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn evals(&self) -> &[Scalar] {
        &self.evals
    }

    /// Evaluate at an arbitrary point by successive halving: each
    /// coordinate interpolates adjacent pairs of the table
    pub fn evaluate(&self, point: &[Scalar]) -> PcsResult<Scalar> {
        if point.len() != self.num_vars {
            return Err(PcsError::DimensionMismatch {
                expected: self.num_vars,
                actual: point.len(),
            });
        }

        let mut table = self.evals.clone();
        for u in point {
            table = table
                .chunks(2)
                .map(|pair| pair[0] + u * (pair[1] - pair[0]))
                .collect();
        }
        Ok(table[0])
    }

    /// The equality basis `eq(point, .)` over the hypercube, built by
    /// doubling: for each coordinate the upper half becomes the old value
    /// times the coordinate and the lower half keeps the remainder.
    ///
    /// Satisfies `sum_i eq[i] * evals[i] == evaluate(point)` for every
    /// table of matching size.
    pub fn eq_basis(point: &[Scalar]) -> Vec<Scalar> {
        let mut evals = vec![Scalar::ONE; 1 << point.len()];
        let mut half = 1;
        for u in point {
            for j in 0..half {
                let upper = evals[j] * u;
                evals[j + half] = upper;
                evals[j] -= upper;
            }
            half *= 2;
        }
        evals
    }
}
