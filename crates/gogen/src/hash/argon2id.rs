//! Argon2id password hashing with fixed parameters.
//!
//! Records use the PHC string format:
//! `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{CredentialError, Result};
use crate::random::{random_array_with, OsRandom, RandomSource};

/// Memory cost in KiB (64 MiB).
pub const M_COST: u32 = 65536;
/// Number of passes.
pub const T_COST: u32 = 3;
/// Parallel lanes.
pub const P_COST: u32 = 4;
/// Salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Digest length in bytes.
pub const OUTPUT_LEN: usize = 32;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(M_COST, T_COST, P_COST, Some(OUTPUT_LEN))
        .map_err(|e| CredentialError::Hash(format!("argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `password` with a fresh salt from the OS CSPRNG.
pub fn hash_password_argon2(password: &str) -> Result<String> {
    hash_password_argon2_with(&mut OsRandom, password)
}

/// Hash `password` with a fresh salt drawn from `src`.
pub fn hash_password_argon2_with<S: RandomSource + ?Sized>(
    src: &mut S,
    password: &str,
) -> Result<String> {
    let salt_bytes: [u8; SALT_LEN] = random_array_with(src)?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CredentialError::Hash(format!("argon2 salt: {e}")))?;

    log::debug!("argon2id hashing (m={M_COST}, t={T_COST}, p={P_COST})");

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(format!("argon2: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against an Argon2id record.
///
/// Parameters are taken from the record, not from the constants above.
pub fn verify_argon2(password: &str, record: &str) -> Result<bool> {
    let parsed = PasswordHash::new(record)
        .map_err(|e| CredentialError::MalformedHash(format!("argon2: {e}")))?;
    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return Err(CredentialError::MalformedHash(format!(
            "argon2: expected argon2id, found {}",
            parsed.algorithm
        )));
    }
    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(CredentialError::MalformedHash(
            "argon2: record has no salt or digest".to_string(),
        ));
    }

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::MalformedHash(format!("argon2: {e}"))),
    }
}
