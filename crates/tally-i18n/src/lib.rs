//! # Tally I18n
//!
//! Reply text for Tally Bot using the Fluent localization system.
//!
//! The en-US resource is embedded at compile time and validated when the
//! bundle is loaded, so formatting at command time cannot hit a missing
//! message.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use loader::*;
pub use messages::*;
