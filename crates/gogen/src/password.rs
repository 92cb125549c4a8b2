//! Random password generation.
//!
//! Passwords are drawn from a fixed alphabet split into four disjoint
//! character classes. The symbol class leaves out everything a shell
//! treats specially when unquoted: pipes, redirects, globs, quotes,
//! escapes and command substitution.
//!
//! With class coverage required, generation runs in two separate steps:
//! [`fill_password`] places one character of each class in slots 0..4 and
//! fills the rest from the full alphabet, then [`shuffle`] permutes the
//! whole buffer so the mandatory characters land at unpredictable
//! positions.

use crate::error::{CredentialError, Result};
use crate::random::{shuffle, uniform_index, OsRandom, RandomSource};

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Decimal digits.
pub const DIGITS: &str = "0123456789";
/// Symbols safe to paste unquoted into a shell.
pub const SYMBOLS: &str = "@#%^_+-=:,.";

/// Every character a generated password may contain.
pub const ALPHABET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "@#%^_+-=:,."
);

/// Shortest password that can hold one character of every class.
pub const MIN_LENGTH_ALL_CLASSES: usize = CharClass::ALL.len();

/// One of the four disjoint character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Characters belonging to this class.
    pub fn charset(self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    /// The class `c` belongs to, if it is in the alphabet at all.
    pub fn of(c: char) -> Option<CharClass> {
        Self::ALL
            .into_iter()
            .find(|class| class.charset().contains(c))
    }
}

/// Generate a password of `length` characters from the OS CSPRNG.
///
/// With `require_all_classes`, the result contains at least one lowercase
/// letter, uppercase letter, digit and symbol, and `length` must be at
/// least 4.
pub fn generate_password(length: usize, require_all_classes: bool) -> Result<String> {
    generate_password_with(&mut OsRandom, length, require_all_classes)
}

/// Generate a password of `length` characters from `src`.
pub fn generate_password_with<S: RandomSource + ?Sized>(
    src: &mut S,
    length: usize,
    require_all_classes: bool,
) -> Result<String> {
    if length == 0 {
        return Err(CredentialError::InvalidLength {
            operation: "generate password",
            length,
            reason: "must be greater than 0",
        });
    }
    if require_all_classes && length < MIN_LENGTH_ALL_CLASSES {
        return Err(CredentialError::InvalidLength {
            operation: "generate password",
            length,
            reason: "must be at least 4 when requiring all character classes",
        });
    }

    log::debug!("generating {length}-character password (all classes: {require_all_classes})");

    let mut buf = vec![0u8; length];
    fill_password(src, &mut buf, require_all_classes)?;
    if require_all_classes {
        shuffle(src, &mut buf)?;
    }

    // Every byte comes from the ASCII alphabet.
    Ok(buf.into_iter().map(char::from).collect())
}

/// Fill `buf` with alphabet characters.
///
/// With `require_all_classes`, slot `i` for `i < 4` is drawn from
/// `CharClass::ALL[i]` and the remaining slots from the whole alphabet.
/// The caller is responsible for shuffling afterwards.
pub fn fill_password<S: RandomSource + ?Sized>(
    src: &mut S,
    buf: &mut [u8],
    require_all_classes: bool,
) -> Result<()> {
    let mandatory = if require_all_classes {
        CharClass::ALL.len().min(buf.len())
    } else {
        0
    };

    for (slot, class) in buf[..mandatory].iter_mut().zip(CharClass::ALL) {
        *slot = pick(src, class.charset())?;
    }
    for slot in &mut buf[mandatory..] {
        *slot = pick(src, ALPHABET)?;
    }
    Ok(())
}

fn pick<S: RandomSource + ?Sized>(src: &mut S, charset: &str) -> Result<u8> {
    let bytes = charset.as_bytes();
    Ok(bytes[uniform_index(src, bytes.len())?])
}
