//! # Pagebuilder Config
//!
//! Configuration of the pagination controls. Settings are layered from TOML
//! files and `PAGEBUILDER__*` environment variables, validated once and then
//! handed to whoever renders page controls.

mod labels;
mod loader;
mod settings;
mod validation;

pub use labels::*;
pub use loader::*;
pub use settings::*;
pub use validation::*;
