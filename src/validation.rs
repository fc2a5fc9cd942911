//! Accumulating validation pipeline
//!
//! A validator is a pure function from an input to either nothing or one
//! [`ValidationError`]. [`validate_all`] runs every validator in list order and
//! collects every failure; it never stops at the first one, so callers see the
//! complete set of problems in one pass.

use std::fmt;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable description of the failure
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every failure from one validation run, in validator order. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Lift a failed run into the crate error type
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

/// A pure validator over `T`
///
/// Each validator detects a single kind of violation and knows nothing about
/// the other validators in the pipeline.
pub type Validator<'a, T> = Box<dyn Fn(&T) -> Option<ValidationError> + Send + Sync + 'a>;

/// Run every validator over `input` and accumulate the failures
pub fn validate_all<T: ?Sized>(input: &T, validators: &[Validator<'_, T>]) -> ValidationResult {
    let errors = validators.iter().fold(Vec::new(), |mut errors, validator| {
        if let Some(error) = validator(input) {
            errors.push(error);
        }
        errors
    });
    ValidationResult { errors }
}
