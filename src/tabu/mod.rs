//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that uses short-term memory
//! (the tabu list) to forbid recently visited solutions, preventing cycling
//! and letting the walk climb out of local optima.
//!
//! Each iteration moves to the cheapest neighbor that is not in memory,
//! even if it is worse than the current solution. There is no aspiration
//! criterion: a tabu neighbor is never taken, whatever its cost.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use runner::{TabuSearch, TabuState};
