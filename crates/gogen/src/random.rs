//! Secure random number generation.
//!
//! All randomness in the engine flows through [`RandomSource`]. The
//! default source is the operating system CSPRNG; any failure or short
//! read surfaces as [`CredentialError::RandomSource`] and is never retried.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use crate::error::{CredentialError, Result};

/// A cryptographically secure source of random bytes.
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes, or fail.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| CredentialError::RandomSource {
                operation: "read os random",
                reason: e.to_string(),
            })
    }
}

/// Adapter turning any seeded CSPRNG into a [`RandomSource`].
///
/// Used where reproducible output is wanted, e.g. `StdRng::seed_from_u64`
/// in tests.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore + CryptoRng> RandomSource for RngSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(buf)
            .map_err(|e| CredentialError::RandomSource {
                operation: "read seeded random",
                reason: e.to_string(),
            })
    }
}

/// Generate `length` random bytes from `src`.
pub fn random_bytes_with<S: RandomSource + ?Sized>(src: &mut S, length: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; length];
    src.fill(&mut buf)?;
    Ok(buf)
}

/// Generate a fixed-size array of random bytes from `src`.
pub fn random_array_with<S: RandomSource + ?Sized, const N: usize>(src: &mut S) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    src.fill(&mut buf)?;
    Ok(buf)
}

/// Draw an index uniformly from `[0, upper)`.
///
/// Rejection sampling over 32-bit draws: values in the biased tail above
/// the largest multiple of `upper` are discarded and redrawn.
pub fn uniform_index<S: RandomSource + ?Sized>(src: &mut S, upper: usize) -> Result<usize> {
    if upper == 0 || upper > u32::MAX as usize {
        return Err(CredentialError::InvalidLength {
            operation: "uniform index",
            length: upper,
            reason: "upper bound must be between 1 and 2^32 - 1",
        });
    }

    let upper = upper as u32;
    let zone = u32::MAX - (u32::MAX % upper);
    loop {
        let draw = u32::from_le_bytes(random_array_with(src)?);
        if draw < zone {
            return Ok((draw % upper) as usize);
        }
    }
}

/// Fisher-Yates shuffle of `items`, every swap index drawn from `src`.
pub fn shuffle<S: RandomSource + ?Sized, T>(src: &mut S, items: &mut [T]) -> Result<()> {
    for i in (1..items.len()).rev() {
        let j = uniform_index(src, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}
