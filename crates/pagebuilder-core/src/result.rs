//! Result type aliases for the page builder.

use crate::PageBuilderError;

/// A specialized `Result` type for page building operations.
pub type PageBuilderResult<T> = Result<T, PageBuilderError>;
