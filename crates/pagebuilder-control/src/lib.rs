//! # Pagebuilder Control
//!
//! Turns a built [`Page`](pagebuilder_core::Page) into the data a UI needs to
//! render its pagination: links to every page, a bounded window of them,
//! first/previous/next/last buttons and the page-size selector. Nothing here
//! renders markup; every result is plain, serializable data.

mod control;
mod factory;
mod labels;
mod links;
mod params;
mod selector;

pub use control::*;
pub use factory::*;
pub use labels::*;
pub use links::*;
pub use params::*;
pub use selector::*;
