//! Error types shared by the page builder and the pagination renderer.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type of the page builder crates.
///
/// All errors are synchronous failures of the call that triggered them. A failed
/// build never produces a partial page.
#[derive(Error, Debug)]
pub enum PageBuilderError {
    // ============ Request Errors ============
    /// The requested page window is invalid (negative page number, non-positive size).
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    /// A sort directive cannot be applied to two values.
    #[error("Incomparable values for {field}: {left} <> {right}")]
    IncomparableValues {
        field: String,
        left: String,
        right: String,
    },

    /// Pagination metadata was requested for a position behind the last page.
    #[error("Invalid page state: page {page_number} is empty but not the first page (total pages: {total_pages})")]
    InvalidPageState { page_number: u32, total_pages: u64 },

    // ============ Setup Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No page control factory is registered under the key.
    #[error("Unknown page control factory: {0}")]
    UnknownFactory(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PageBuilderError {
    /// Returns the HTTP status code a web layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPageRequest(_)
            | Self::IncomparableValues { .. }
            | Self::InvalidPageState { .. }
            | Self::Validation(_) => 400,
            Self::Configuration(_) | Self::UnknownFactory(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPageRequest(_) => "INVALID_PAGE_REQUEST",
            Self::IncomparableValues { .. } => "INCOMPARABLE_VALUES",
            Self::InvalidPageState { .. } => "INVALID_PAGE_STATE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownFactory(_) => "UNKNOWN_FACTORY",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid page request error.
    #[must_use]
    pub fn invalid_request<T: Into<String>>(message: T) -> Self {
        Self::InvalidPageRequest(message.into())
    }

    /// Creates an incomparable values error.
    #[must_use]
    pub fn incomparable(field: Option<&str>, left: impl Debug, right: impl Debug) -> Self {
        Self::IncomparableValues {
            field: field.unwrap_or("<value>").to_string(),
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if the caller sent something that cannot be served.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<serde_json::Error> for PageBuilderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context("JSON serialization error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(PageBuilderError::invalid_request("negative page").status_code(), 400);
        assert_eq!(PageBuilderError::incomparable(Some("city"), 1, "x").status_code(), 400);
        assert_eq!(
            PageBuilderError::InvalidPageState { page_number: 3, total_pages: 1 }.status_code(),
            400
        );
        assert_eq!(PageBuilderError::configuration("bad").status_code(), 500);
        assert_eq!(PageBuilderError::UnknownFactory("x".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PageBuilderError::invalid_request("x").error_code(), "INVALID_PAGE_REQUEST");
        assert_eq!(PageBuilderError::incomparable(None, 1, 2).error_code(), "INCOMPARABLE_VALUES");
        assert_eq!(
            PageBuilderError::InvalidPageState { page_number: 1, total_pages: 1 }.error_code(),
            "INVALID_PAGE_STATE"
        );
        assert_eq!(PageBuilderError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(PageBuilderError::UnknownFactory("x".to_string()).error_code(), "UNKNOWN_FACTORY");
    }

    #[test]
    fn test_client_errors() {
        assert!(PageBuilderError::invalid_request("x").is_client_error());
        assert!(PageBuilderError::validation("x").is_client_error());
        assert!(!PageBuilderError::configuration("x").is_client_error());
        assert!(!PageBuilderError::Other(anyhow::anyhow!("boom")).is_client_error());
    }

    #[test]
    fn test_incomparable_message() {
        let err = PageBuilderError::incomparable(None, 1, "one");
        let message = err.to_string();
        assert!(message.contains("<value>"));
        assert!(message.contains("\"one\""));
    }

    #[test]
    fn test_invalid_page_state_message() {
        let err = PageBuilderError::InvalidPageState { page_number: 4, total_pages: 2 };
        assert!(err.to_string().contains("page 4"));
    }
}
