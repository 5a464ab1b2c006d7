//! Neighborhood descent (hill climbing).
//!
//! Repeatedly applies an improving single-reassignment move until none
//! exists. Two interchangeable policies choose the move:
//!
//! - [`ImprovementPolicy::Best`]: scan the whole neighborhood, take the
//!   lowest-cost improving move (earliest on ties).
//! - [`ImprovementPolicy::First`]: take the first improving move in
//!   enumeration order, then rescan from the start.
//!
//! Both stop at a local optimum and never worsen the incumbent.

mod config;
mod runner;

pub use config::{ImprovementPolicy, LocalSearchConfig};
pub use runner::{descend, LocalSearch, LocalSearchState};
