//! Local search execution.
//!
//! # Algorithm
//!
//! 1. Start from the supplied solution, or a uniform-random one
//! 2. At each step, ask the neighborhood for an improving move under the
//!    configured policy
//! 3. Apply it, or stop: no improving move means a local optimum
//!
//! Candidates are screened with the O(1) move delta and confirmed with the
//! full cost model. A move is only accepted if its full cost is strictly
//! lower, so the incumbent cost is strictly decreasing and the run ends
//! within `m^n` steps. A candidate that fails confirmation does not end the
//! scan.

use crate::error::SolveError;
use crate::evaluation::CostEvaluator;
use crate::models::{Instance, Solution};
use crate::neighborhood::{Neighbor, NeighborhoodExplorer};
use crate::random::create_rng;
use crate::strategy::SearchStrategy;

use super::config::{ImprovementPolicy, LocalSearchConfig};

/// Run state of a local search.
#[derive(Debug, Clone)]
pub struct LocalSearchState {
    /// Incumbent (also the best, since descent never worsens it).
    pub current: Solution,
    /// Cost of `current`.
    pub cost: f64,
    /// Accepted moves so far.
    pub steps: usize,
    /// Set once no improving move exists.
    pub local_optimum: bool,
}

/// Best- or first-improvement descent.
pub struct LocalSearch<'a> {
    explorer: NeighborhoodExplorer<'a>,
    config: LocalSearchConfig,
    initial: Option<Solution>,
}

impl<'a> LocalSearch<'a> {
    /// Creates a local search over `instance`.
    pub fn new(instance: &'a Instance, config: LocalSearchConfig) -> Self {
        Self {
            explorer: NeighborhoodExplorer::new(CostEvaluator::new(instance)),
            config,
            initial: None,
        }
    }

    /// Starts from `solution` instead of a random assignment.
    pub fn with_initial(mut self, solution: Solution) -> Self {
        self.initial = Some(solution);
        self
    }
}

impl SearchStrategy for LocalSearch<'_> {
    type State = LocalSearchState;

    fn name(&self) -> &'static str {
        match self.config.policy {
            ImprovementPolicy::Best => "Local Search (best improvement)",
            ImprovementPolicy::First => "Local Search (first improvement)",
        }
    }

    fn initialize(&self) -> Result<LocalSearchState, SolveError> {
        let evaluator = self.explorer.evaluator();
        let instance = evaluator.instance();
        let current = match &self.initial {
            Some(s) => {
                s.check_shape(instance.num_customers(), instance.num_warehouses())
                    .map_err(SolveError::InvalidSolution)?;
                s.clone()
            }
            None => {
                let mut rng = create_rng(self.config.seed);
                Solution::random(instance.num_customers(), instance.num_warehouses(), &mut rng)
            }
        };
        let cost = evaluator.evaluate(&current);
        tracing::debug!("{}: initial cost {:.5}", self.name(), cost);

        Ok(LocalSearchState {
            current,
            cost,
            steps: 0,
            local_optimum: false,
        })
    }

    fn step(&self, state: &mut LocalSearchState) -> Result<(), SolveError> {
        if self.is_done(state) {
            return Ok(());
        }
        match improve_once(&self.explorer, self.config.policy, &state.current, state.cost) {
            Some((next, cost)) => {
                state.current = next;
                state.cost = cost;
                state.steps += 1;
                tracing::trace!("{}: step {} cost {:.5}", self.name(), state.steps, cost);
            }
            None => {
                state.local_optimum = true;
                tracing::debug!(
                    "{}: local optimum {:.5} after {} moves",
                    self.name(),
                    state.cost,
                    state.steps
                );
            }
        }
        Ok(())
    }

    fn is_done(&self, state: &LocalSearchState) -> bool {
        state.local_optimum || self.config.max_steps.is_some_and(|n| state.steps >= n)
    }

    fn best<'s>(&self, state: &'s LocalSearchState) -> (&'s Solution, f64) {
        (&state.current, state.cost)
    }
}

/// Finds and applies one improving move; `None` at a local optimum.
fn improve_once(
    explorer: &NeighborhoodExplorer<'_>,
    policy: ImprovementPolicy,
    solution: &Solution,
    cost: f64,
) -> Option<(Solution, f64)> {
    let found: Option<Neighbor> = match policy {
        ImprovementPolicy::Best => explorer.best_improving(solution, cost),
        ImprovementPolicy::First => explorer.first_improving(solution, cost),
    };
    found.map(|nb| (nb.mv.apply(solution), nb.cost))
}

/// Descends from `solution` to a local optimum.
///
/// Returns the optimum, its cost, and the number of moves applied.
pub fn descend(
    explorer: &NeighborhoodExplorer<'_>,
    policy: ImprovementPolicy,
    solution: Solution,
) -> (Solution, f64, usize) {
    let mut current = solution;
    let mut cost = explorer.evaluator().evaluate(&current);
    let mut moves = 0;
    while let Some((next, next_cost)) = improve_once(explorer, policy, &current, cost) {
        current = next;
        cost = next_cost;
        moves += 1;
    }
    (current, cost, moves)
}
