//! # Tally Commands
//!
//! Discord command implementations using Poise framework for Tally Bot.
//!
//! Two commands are available, both restricted to the configured admin
//! channel: `count` charts a channel's lines per day and `validate` audits
//! a channel's numbered sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod count;
pub mod framework;
pub mod history;
pub mod reply;
pub mod sequence;
pub mod validate;

pub use channels::*;
pub use count::*;
pub use framework::*;
pub use history::*;
pub use reply::*;
pub use sequence::*;
pub use validate::*;
