//! # Tally Config
//!
//! Type-safe configuration management for Tally Bot.
//!
//! This crate provides configuration loading from YAML files with
//! environment variable overrides, validation, and resolution of the
//! skip-lines file and display timezone into an immutable [`Settings`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod settings;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use settings::*;
pub use validator::*;
