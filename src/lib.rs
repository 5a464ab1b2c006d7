//! Facility location optimization.
//!
//! Solves the facility location problem in its uncapacitated and
//! capacitated forms: open a subset of candidate warehouses and assign
//! every customer to exactly one of them, minimizing the fixed costs of the
//! warehouses in use plus the customer assignment costs.
//!
//! Four interchangeable search strategies share one cost model and one
//! neighborhood:
//!
//! - **GRASP**: randomized greedy construction with a restricted candidate
//!   list, optionally followed by local search, over several restarts.
//! - **Local Search**: best- or first-improvement descent over
//!   single-customer reassignments.
//! - **Tabu Search (TS)**: steepest admissible walk with a bounded memory
//!   of recently visited solutions.
//! - **Genetic Algorithm (GA)**: roulette selection, single-point crossover,
//!   and per-gene mutation over assignment vectors.
//!
//! # Architecture
//!
//! [`models`] holds the immutable instance and the solution type.
//! [`evaluation`] prices a solution; infeasible ones cost `f64::INFINITY`.
//! [`neighborhood`] enumerates and scores single-reassignment moves. Every
//! strategy implements [`strategy::SearchStrategy`] and is driven by
//! [`strategy::solve`]. [`io`] parses instance files and persists solutions
//! so that one strategy's output can seed another.

pub mod error;
pub mod evaluation;
pub mod ga;
pub mod grasp;
pub mod io;
pub mod local_search;
pub mod models;
pub mod neighborhood;
pub mod random;
pub mod strategy;
pub mod tabu;
