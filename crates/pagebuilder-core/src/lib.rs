//! # Pagebuilder Core
//!
//! Builds pages: bounded, sorted and optionally converted slices of a larger
//! collection, together with the pagination metadata a UI or an API needs.
//!
//! The central piece is [`PageBuilder`]: it drains a source sequence, applies a
//! source filter, optionally sorts the source entries, converts every entry,
//! applies a target filter, optionally sorts the converted entries and finally
//! cuts out the requested page.

pub mod builder;
pub mod compare;
pub mod error;
pub mod page_math;
pub mod pagination;
pub mod result;
pub mod sort;
pub mod telemetry;
pub mod validation;

pub use builder::*;
pub use compare::*;
pub use error::*;
pub use page_math::{EmptyResultPages, PageWindow};
pub use pagination::*;
pub use result::*;
pub use sort::*;
pub use telemetry::{init_logging, LoggingConfig};
pub use validation::*;
