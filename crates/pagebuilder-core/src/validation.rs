//! Validation utilities.

use crate::PageBuilderError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PageBuilderError` on failure.
    fn validate_request(&self) -> Result<(), PageBuilderError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` into a single `PageBuilderError::Validation`.
///
/// Field errors are rendered as `field: message` and joined with `; `, sorted
/// by field name.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> PageBuilderError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();

    PageBuilderError::Validation(messages.join("; "))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a query-string parameter name.
    ///
    /// Names must be non-empty and made of ASCII letters, digits, `_`, `-` or `.`,
    /// so they survive URL encoding unchanged.
    pub fn valid_param_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new("param_name_empty"));
        }
        if name.len() > 64 {
            return Err(ValidationError::new("param_name_too_long"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ValidationError::new("param_name_invalid_characters"));
        }
        Ok(())
    }

    /// Validates a registry key of a page control factory.
    pub fn valid_factory_key(key: &str) -> Result<(), ValidationError> {
        if key.is_empty() {
            return Err(ValidationError::new("factory_key_empty"));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ValidationError::new("factory_key_invalid_characters"));
        }
        Ok(())
    }
}
