//! Random key generation with hex encoding.
//!
//! A [`Key`] is an opaque byte string. It renders as lowercase hex with no
//! separators and parses back from hex after trimming surrounding
//! whitespace. Key bytes are zeroized on drop.

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CredentialError, Result};
use crate::random::{random_bytes_with, OsRandom, RandomSource};

/// A cryptographic key of caller-chosen length.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key(Vec<u8>);

impl Key {
    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a key from hex. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| CredentialError::Encoding(e.to_string()))
    }

    /// Lowercase hex encoding, two characters per byte.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(<{} bytes>)", self.0.len())
    }
}

impl FromStr for Key {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Generate a key of exactly `length` bytes from the OS CSPRNG.
///
/// No bounds are enforced here; acceptable lengths are the caller's
/// concern.
pub fn generate_key(length: usize) -> Result<Key> {
    generate_key_with(&mut OsRandom, length)
}

/// Generate a key of exactly `length` bytes from `src`.
pub fn generate_key_with<S: RandomSource + ?Sized>(src: &mut S, length: usize) -> Result<Key> {
    log::debug!("generating {length}-byte key");
    random_bytes_with(src, length).map(Key)
}
