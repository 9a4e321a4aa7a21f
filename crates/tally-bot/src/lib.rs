//! # Tally Bot
//!
//! Discord bot that charts channel activity and audits numbered sequences.
//!
//! This is the main binary crate that wires configuration, localisation and
//! the command framework together and runs the gateway client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
