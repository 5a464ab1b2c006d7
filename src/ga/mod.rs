//! Genetic Algorithm over customer-to-warehouse assignments.
//!
//! Each chromosome is a [`Solution`](crate::models::Solution). Every
//! generation:
//!
//! 1. Draws `⌊P/2⌋` parents with replacement by roulette wheel on the
//!    inverse-cost fitness `1 / (cost + ε)`
//! 2. Breeds pairs of distinct parents with single-point crossover
//! 3. Mutates each child gene-wise
//! 4. Forms the next population by [`Replacement`] policy
//!
//! The best solution ever evaluated is tracked across the whole run.
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and reset mutation
//! - [`selection`]: Inverse-cost fitness and roulette wheel sampling
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
pub mod selection;

pub use config::{GaConfig, Replacement};
pub use runner::{Chromosome, GaState, GeneticSolver};
