//! Password hashing and verification.
//!
//! Two algorithms are supported:
//! - bcrypt, with a caller-chosen cost factor
//! - Argon2id, with fixed memory, time and parallelism parameters
//!
//! [`hash_with`] is the single dispatch point. Options that only make sense
//! for one algorithm (a custom cost, benchmarking) are rejected there for
//! the other, rather than in the caller's generic validation.

pub mod argon2id;
pub mod bcrypt;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CredentialError, Result};
use crate::random::{OsRandom, RandomSource};

/// A password hashing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bcrypt,
    Argon2id,
}

impl Algorithm {
    /// The tag used on the command line and in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Argon2id => "argon2id",
        }
    }

    /// Identify the algorithm that produced `record` from its prefix.
    pub fn detect(record: &str) -> Result<Self> {
        const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

        if record.starts_with("$argon2id$") {
            Ok(Algorithm::Argon2id)
        } else if BCRYPT_PREFIXES.iter().any(|p| record.starts_with(p)) {
            Ok(Algorithm::Bcrypt)
        } else {
            Err(CredentialError::MalformedHash(
                "unrecognised hash prefix".to_string(),
            ))
        }
    }

    /// Reject `option` unless this algorithm has a tunable cost.
    pub fn ensure_tunable(self, option: &'static str) -> Result<()> {
        match self {
            Algorithm::Bcrypt => Ok(()),
            Algorithm::Argon2id => Err(CredentialError::UnsupportedOption {
                algorithm: self.as_str(),
                option,
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(Algorithm::Bcrypt),
            "argon2id" => Ok(Algorithm::Argon2id),
            other => Err(format!(
                "unknown algorithm '{other}' (expected bcrypt or argon2id)"
            )),
        }
    }
}

/// Hash `password` with `algorithm`, using the OS CSPRNG for the salt.
///
/// `cost` is the bcrypt work factor; `None` means [`bcrypt::DEFAULT_COST`].
/// Passing a cost with Argon2id is an error.
pub fn hash(password: &str, algorithm: Algorithm, cost: Option<u32>) -> Result<String> {
    hash_with(&mut OsRandom, password, algorithm, cost)
}

/// Hash `password` with `algorithm`, drawing the salt from `src`.
pub fn hash_with<S: RandomSource + ?Sized>(
    src: &mut S,
    password: &str,
    algorithm: Algorithm,
    cost: Option<u32>,
) -> Result<String> {
    match algorithm {
        Algorithm::Bcrypt => bcrypt::hash_password_with(
            src,
            password,
            cost.unwrap_or(bcrypt::DEFAULT_COST),
        ),
        Algorithm::Argon2id => {
            if cost.is_some() {
                algorithm.ensure_tunable("a custom cost")?;
            }
            argon2id::hash_password_argon2_with(src, password)
        }
    }
}

/// Check `password` against a bcrypt or Argon2id record.
///
/// Returns `Ok(false)` on mismatch and an error only when the record
/// cannot be parsed.
pub fn verify_password(password: &str, record: &str) -> Result<bool> {
    match Algorithm::detect(record)? {
        Algorithm::Bcrypt => bcrypt::verify_bcrypt(password, record),
        Algorithm::Argon2id => argon2id::verify_argon2(password, record),
    }
}
