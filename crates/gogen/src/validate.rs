//! Parameter validation.
//!
//! A [`Validator`] is an explicit, caller-owned context: construct it, run
//! checks against named fields, then [`Validator::finish`] to collect
//! every violation at once. There is no process-wide validator state.

use std::fmt;

use serde::Serialize;

/// A constraint on an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be at least this.
    Min(i64),
    /// Value must be at most this.
    Max(i64),
    /// Value must be a multiple of this many bytes.
    MultipleOf(i64),
}

impl Rule {
    fn check(self, value: i64) -> Option<String> {
        match self {
            Rule::Min(min) if value < min => Some(format!("must be {min} or greater")),
            Rule::Max(max) if value > max => Some(format!("must be {max} or less")),
            Rule::MultipleOf(n) if n != 0 && value % n != 0 => {
                Some(format!("must be a multiple of {n} bytes"))
            }
            _ => None,
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// All violations found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "usage error"),
            [single] => write!(f, "usage error: {single}"),
            many => {
                write!(f, "usage errors:")?;
                for err in many {
                    write!(f, "\n  {err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects rule violations for a set of named fields.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check an integer field against every rule; each violation is kept.
    pub fn int(&mut self, field: &str, value: i64, rules: &[Rule]) -> &mut Self {
        for rule in rules {
            if let Some(message) = rule.check(value) {
                self.errors.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        self
    }

    /// Check that a string field is present and non-empty.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: "is a required field".to_string(),
            });
        }
        self
    }

    /// Add a violation found by the caller's own logic.
    pub fn reject(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    /// Consume the context, returning every violation collected.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
