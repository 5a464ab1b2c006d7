//! The capability every search strategy implements, and the loop that runs it.
//!
//! A strategy is a state machine: [`initialize`](SearchStrategy::initialize)
//! builds the run state, [`step`](SearchStrategy::step) advances it by one
//! unit of work (one descent move, one tabu iteration, one GRASP restart,
//! one generation), and [`is_done`](SearchStrategy::is_done) is the
//! termination predicate. [`solve`] drives any strategy to completion; an
//! external driver may instead call `step` itself and stop early.

use std::time::{Duration, Instant};

use crate::error::SolveError;
use crate::models::Solution;

/// A search strategy over a facility location instance.
///
/// Implementors own their instance reference and configuration; all
/// mutable run state (incumbent, tabu memory, population, RNG) lives in
/// [`State`](Self::State) and is discarded when the run ends.
pub trait SearchStrategy {
    /// Mutable run state.
    type State;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Validates the configuration and builds the starting state.
    fn initialize(&self) -> Result<Self::State, SolveError>;

    /// Advances the run by one step.
    ///
    /// Calling `step` on a finished state is a no-op.
    fn step(&self, state: &mut Self::State) -> Result<(), SolveError>;

    /// Returns `true` once the run has reached its terminal state.
    fn is_done(&self, state: &Self::State) -> bool;

    /// Best solution seen so far and its cost.
    fn best<'s>(&self, state: &'s Self::State) -> (&'s Solution, f64);
}

/// Outcome of driving a strategy to completion.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Best solution found.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Number of steps executed.
    pub steps: usize,
    /// Wall-clock time spent in `initialize` and the step loop.
    pub elapsed: Duration,
    /// Best cost after initialization and after every step.
    pub cost_history: Vec<f64>,
}

/// Runs `strategy` from initialization until its termination predicate holds.
///
/// # Examples
///
/// ```
/// use u_facility::local_search::{LocalSearch, LocalSearchConfig};
/// use u_facility::models::{Customer, Instance, Warehouse};
/// use u_facility::strategy::solve;
///
/// let instance = Instance::new(
///     vec![Warehouse::new(10.0), Warehouse::new(15.0)],
///     vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
/// )
/// .unwrap();
/// let search = LocalSearch::new(&instance, LocalSearchConfig::default().with_seed(1));
/// let result = solve(&search).unwrap();
/// assert!(result.best_cost <= 22.0);
/// ```
pub fn solve<S: SearchStrategy>(strategy: &S) -> Result<SearchResult, SolveError> {
    let start = Instant::now();
    let mut state = strategy.initialize()?;
    let mut cost_history = vec![strategy.best(&state).1];
    let mut steps = 0usize;

    while !strategy.is_done(&state) {
        strategy.step(&mut state)?;
        steps += 1;
        cost_history.push(strategy.best(&state).1);
    }

    let (best, best_cost) = strategy.best(&state);
    let elapsed = start.elapsed();
    tracing::info!(
        "{} finished: cost {:.5} after {} steps in {:?}",
        strategy.name(),
        best_cost,
        steps,
        elapsed
    );

    Ok(SearchResult {
        best: best.clone(),
        best_cost,
        steps,
        elapsed,
        cost_history,
    })
}
