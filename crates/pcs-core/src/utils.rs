//! Scalar-vector utilities

use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};

use crate::{PcsError, PcsResult};

/// Inner product of two equal-length scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> PcsResult<Scalar> {
    if a.len() != b.len() {
        return Err(PcsError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Powers of a scalar: `[1, x, x^2, ..., x^(n-1)]`
pub fn scalar_powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;
    for _ in 0..n {
        powers.push(current);
        current *= x;
    }
    powers
}

/// Sample `n` scalars from the injected generator
pub fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| Scalar::random(rng)).collect()
}

/// Base-two logarithm of a nonzero power of two
pub fn log2_exact(n: usize) -> PcsResult<u32> {
    if n == 0 || !n.is_power_of_two() {
        return Err(PcsError::LengthNotPowerOfTwo(n));
    }
    Ok(n.trailing_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_product_small() {
        let a: Vec<Scalar> = [1u64, 2, 3].iter().map(|&x| Scalar::from(x)).collect();
        let b: Vec<Scalar> = [4u64, 5, 6].iter().map(|&x| Scalar::from(x)).collect();
        assert_eq!(inner_product(&a, &b).unwrap(), Scalar::from(32u64));
    }

    #[test]
    fn inner_product_checks_lengths() {
        let result = inner_product(&[Scalar::ONE, Scalar::ONE], &[Scalar::ONE]);
        assert_eq!(
            result,
            Err(PcsError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn powers_start_at_one() {
        let powers = scalar_powers(&Scalar::from(3u64), 4);
        assert_eq!(
            powers,
            vec![
                Scalar::ONE,
                Scalar::from(3u64),
                Scalar::from(9u64),
                Scalar::from(27u64)
            ]
        );
        assert!(scalar_powers(&Scalar::from(3u64), 0).is_empty());
    }

    #[test]
    fn log2_exact_gates_non_powers() {
        assert_eq!(log2_exact(1).unwrap(), 0);
        assert_eq!(log2_exact(32).unwrap(), 5);
        assert_eq!(log2_exact(0), Err(PcsError::LengthNotPowerOfTwo(0)));
        assert_eq!(log2_exact(12), Err(PcsError::LengthNotPowerOfTwo(12)));
    }
}
