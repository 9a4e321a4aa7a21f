//! # Tally Graphs
//!
//! Line tallying and graph rendering for channel activity.
//!
//! This crate turns message history into a dense daily histogram with
//! rolling-window totals and renders that histogram to a PNG using plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod daily_count;
pub mod traits;

pub use aggregator::*;
pub use daily_count::*;
pub use traits::*;
