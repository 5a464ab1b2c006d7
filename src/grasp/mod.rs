//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! [`construct`] builds one assignment customer by customer: every
//! warehouse with room is ranked by its incremental cost (fixed cost if not
//! yet opened, plus the assignment cost), and the pick is drawn uniformly
//! from the best `max(1, ⌊alpha·k⌋)` of the `k` candidates, the
//! restricted candidate list (RCL).
//!
//! [`Grasp`] repeats construction, optionally followed by local search,
//! and keeps the best result.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive
//!   Search Procedures", *Journal of Global Optimization* 6, 109-133.

mod config;
mod runner;

pub use config::GraspConfig;
pub use runner::{construct, rcl_size, Grasp, GraspState};
