//! Input validation for review submissions.
//!
//! Pure checks only: the value that gets submitted is never trimmed or
//! normalized here.

use crate::error::ValidationError;

/// Default maximum submission length, in characters.
pub const MAX_CODE_LENGTH: usize = 10_000;

/// Check a candidate submission.
///
/// Emptiness is judged on the trimmed input; the length limit is measured on
/// the untrimmed input, counted in characters.
pub fn validate(input: &str, max: usize) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyCode);
    }

    if input.chars().count() > max {
        return Err(ValidationError::CodeTooLong { max });
    }

    Ok(())
}
