//! Common validation rules shared across request payloads.

use validator::ValidationError;

pub const MAX_REASON_LENGTH: usize = 2000;
pub const MAX_REJECT_REASON_LENGTH: usize = 500;

/// Validates the justification attached to a new request.
///
/// Requirements:
/// - Not empty once surrounding whitespace is removed
/// - At most 2000 characters
/// - No NUL characters
pub fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    validate_free_text(
        reason,
        MAX_REASON_LENGTH,
        FreeTextCodes {
            blank: "reason_blank",
            too_long: "reason_too_long",
            invalid_char: "reason_invalid_char",
        },
    )
}

/// Validates the explanation given when a request is rejected.
pub fn validate_reject_reason(reason: &str) -> Result<(), ValidationError> {
    validate_free_text(
        reason,
        MAX_REJECT_REASON_LENGTH,
        FreeTextCodes {
            blank: "reject_reason_blank",
            too_long: "reject_reason_too_long",
            invalid_char: "reject_reason_invalid_char",
        },
    )
}

struct FreeTextCodes {
    blank: &'static str,
    too_long: &'static str,
    invalid_char: &'static str,
}

fn validate_free_text(
    value: &str,
    max_chars: usize,
    codes: FreeTextCodes,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(codes.blank));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(codes.too_long));
    }
    // PostgreSQL TEXT cannot store NUL.
    if value.contains('\0') {
        return Err(ValidationError::new(codes.invalid_char));
    }
    Ok(())
}
