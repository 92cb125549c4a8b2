//! bcrypt password hashing.
//!
//! Records are emitted in the `$2b$<cost>$<salt+digest>` form. bcrypt only
//! reads the first 72 bytes of its input; longer passwords are rejected
//! with [`CredentialError::InputTooLong`] instead of being truncated.

use bcrypt::Version;

use crate::error::{CredentialError, Result};
use crate::random::{random_array_with, OsRandom, RandomSource};

/// Lowest accepted work factor.
pub const MIN_COST: u32 = 4;
/// Highest accepted work factor.
pub const MAX_COST: u32 = 31;
/// Work factor used when the caller does not choose one.
pub const DEFAULT_COST: u32 = 12;
/// Longest plaintext bcrypt digests in full.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Reject costs outside `MIN_COST..=MAX_COST`.
pub fn check_cost(cost: u32) -> Result<()> {
    if (MIN_COST..=MAX_COST).contains(&cost) {
        Ok(())
    } else {
        Err(CredentialError::InvalidCost {
            cost,
            min: MIN_COST,
            max: MAX_COST,
        })
    }
}

/// Hash `password` at `cost` with a fresh salt from the OS CSPRNG.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    hash_password_with(&mut OsRandom, password, cost)
}

/// Hash `password` at `cost` with a fresh salt drawn from `src`.
pub fn hash_password_with<S: RandomSource + ?Sized>(
    src: &mut S,
    password: &str,
    cost: u32,
) -> Result<String> {
    check_cost(cost)?;
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CredentialError::InputTooLong {
            length: password.len(),
            max: MAX_PASSWORD_BYTES,
        });
    }

    let salt: [u8; 16] = random_array_with(src)?;
    log::debug!("bcrypt hashing at cost {cost}");

    bcrypt::hash_with_salt(password, cost, salt)
        .map(|parts| parts.format_for_version(Version::TwoB))
        .map_err(|e| CredentialError::Hash(format!("bcrypt: {e}")))
}

/// Check `password` against a bcrypt record.
///
/// Returns `Ok(false)` on mismatch and an error when `record` does not
/// parse. A plaintext longer than [`MAX_PASSWORD_BYTES`] can never have
/// produced a record here, so once the record parses it is reported as a
/// mismatch without hashing.
pub fn verify_bcrypt(password: &str, record: &str) -> Result<bool> {
    let malformed = |e: bcrypt::BcryptError| CredentialError::MalformedHash(format!("bcrypt: {e}"));

    record.parse::<bcrypt::HashParts>().map_err(malformed)?;
    if password.len() > MAX_PASSWORD_BYTES {
        log::debug!("bcrypt verify: plaintext exceeds {MAX_PASSWORD_BYTES} bytes");
        return Ok(false);
    }
    bcrypt::verify(password, record).map_err(malformed)
}

/// Read the work factor embedded in a bcrypt record.
pub fn record_cost(record: &str) -> Result<u32> {
    let mut parts = record.split('$');
    let cost = match (parts.next(), parts.next(), parts.next()) {
        (Some(""), Some(_version), Some(cost)) => cost,
        _ => {
            return Err(CredentialError::MalformedHash(
                "bcrypt: missing cost field".to_string(),
            ))
        }
    };
    cost.parse()
        .map_err(|_| CredentialError::MalformedHash(format!("bcrypt: invalid cost {cost:?}")))
}
