//! # Tally Common
//!
//! Shared types, utilities, and common functionality for Tally Bot.
//!
//! This crate provides the message record type, the skip-list line filter,
//! the error taxonomy and the logging bootstrap used across all other crates
//! in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod skip_list;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use skip_list::*;
pub use types::*;
pub use utils::*;
