//! Credential generation and password hashing engine.
//!
//! Generates random keys and passwords from a CSPRNG, computes and
//! verifies bcrypt and Argon2id password hashes, and measures bcrypt
//! latency across a range of cost factors.
//!
//! Every operation is synchronous and independent; the only shared
//! resource is the operating system random source.

pub mod benchmark;
pub mod error;
pub mod hash;
pub mod key;
pub mod password;
pub mod random;
pub mod validate;

// Re-export primary types
pub use error::{CredentialError, Result};
pub use key::{generate_key, Key};
pub use password::{generate_password, CharClass};
pub use random::{OsRandom, RandomSource};
pub use validate::{Rule, ValidationErrors, Validator};

// Re-export hashing
pub use hash::argon2id::hash_password_argon2;
pub use hash::bcrypt::hash_password;
pub use hash::{verify_password, Algorithm};

// Re-export benchmarking
pub use benchmark::{benchmark_costs, BenchmarkReport, BenchmarkRow, CostBenchmark};
