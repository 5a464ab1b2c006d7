//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the supplied solution (or a uniform-random one) and put it
//!    in memory
//! 2. At each iteration:
//!    a. Generate the full neighborhood, sorted ascending by cost
//!    b. Move to the first neighbor not in memory, and record it
//!    c. Update the global best if improved, else count a stale iteration
//! 3. Terminate after `max_iterations` or `max_no_improve` stale iterations
//!
//! If every neighbor is tabu the iteration is a no-op: `current` stays put
//! and the iteration counts as non-improving.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use crate::error::SolveError;
use crate::evaluation::CostEvaluator;
use crate::models::{Instance, Solution};
use crate::neighborhood::NeighborhoodExplorer;
use crate::random::create_rng;
use crate::strategy::SearchStrategy;

use super::config::TabuConfig;
use super::memory::TabuMemory;

/// Run state of a Tabu Search.
#[derive(Debug, Clone)]
pub struct TabuState {
    /// Walker position; may be worse than `best`.
    pub current: Solution,
    /// Cost of `current`.
    pub current_cost: f64,
    /// Best solution found.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Recently visited solutions.
    pub memory: TabuMemory,
    /// Iterations executed.
    pub iteration: usize,
    /// Consecutive iterations without a new best.
    pub no_improve: usize,
    /// Iteration at which `best` was found (0 for the start).
    pub best_iteration: usize,
}

/// Tabu Search over the single-reassignment neighborhood.
pub struct TabuSearch<'a> {
    explorer: NeighborhoodExplorer<'a>,
    config: TabuConfig,
    initial: Option<Solution>,
}

impl<'a> TabuSearch<'a> {
    /// Creates a tabu search over `instance`.
    pub fn new(instance: &'a Instance, config: TabuConfig) -> Self {
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

impl SearchStrategy for TabuSearch<'_> {
    type State = TabuState;

    fn name(&self) -> &'static str {
        "Tabu Search"
    }

    fn initialize(&self) -> Result<TabuState, SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
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
        let current_cost = evaluator.evaluate(&current);

        let mut memory = TabuMemory::new(self.config.tabu_tenure);
        memory.insert(current.clone());

        tracing::debug!("Tabu Search: initial cost {:.5}", current_cost);

        Ok(TabuState {
            best: current.clone(),
            best_cost: current_cost,
            current,
            current_cost,
            memory,
            iteration: 0,
            no_improve: 0,
            best_iteration: 0,
        })
    }

    fn step(&self, state: &mut TabuState) -> Result<(), SolveError> {
        if self.is_done(state) {
            return Ok(());
        }
        state.iteration += 1;

        let neighbors = self
            .explorer
            .sorted_neighbors(&state.current, state.current_cost);

        // First admissible neighbor in cost order
        let admissible = neighbors.iter().find_map(|nb| {
            let candidate = nb.mv.apply(&state.current);
            (!state.memory.contains(&candidate)).then_some(candidate)
        });

        let Some(next) = admissible else {
            tracing::trace!(
                "Tabu Search: iteration {} has no admissible move",
                state.iteration
            );
            state.no_improve += 1;
            return Ok(());
        };

        state.current_cost = self.explorer.evaluator().evaluate(&next);
        state.current = next;
        state.memory.insert(state.current.clone());

        if state.current_cost < state.best_cost {
            tracing::debug!(
                "Tabu Search: iteration {} new best {:.5}",
                state.iteration,
                state.current_cost
            );
            state.best = state.current.clone();
            state.best_cost = state.current_cost;
            state.best_iteration = state.iteration;
            state.no_improve = 0;
        } else {
            state.no_improve += 1;
        }
        Ok(())
    }

    fn is_done(&self, state: &TabuState) -> bool {
        state.iteration >= self.config.max_iterations
            || state.no_improve >= self.config.max_no_improve
    }

    fn best<'s>(&self, state: &'s TabuState) -> (&'s Solution, f64) {
        (&state.best, state.best_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::{LocalSearch, LocalSearchConfig};
    use crate::models::{Customer, Warehouse};
    use crate::strategy::solve;

    fn small_instance() -> Instance {
        Instance::new(
            vec![Warehouse::new(10.0), Warehouse::new(15.0)],
            vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
        )
        .unwrap()
    }

    // Several local optima: cheap variable costs spread across expensive warehouses.
    fn rugged_instance() -> Instance {
        let m = 6;
        let n = 14;
        let warehouses = (0..m)
            .map(|w| Warehouse::new(40.0 + ((w * 17) % 7) as f64 * 9.0))
            .collect();
        let customers = (0..n)
            .map(|c| {
                Customer::new(
                    (0..m)
                        .map(|w| ((c * 37 + w * 53) % 29) as f64 + 1.0)
                        .collect(),
                )
            })
            .collect();
        Instance::new(warehouses, customers).unwrap()
    }

    #[test]
    fn test_tabu_finds_optimum_small() {
        let instance = small_instance();
        let search = TabuSearch::new(&instance, TabuConfig::default().with_tabu_tenure(2))
            .with_initial(Solution::new(vec![1, 0]));
        let result = solve(&search).unwrap();
        assert_eq!(result.best, Solution::new(vec![0, 0]));
        assert_eq!(result.best_cost, 19.0);
    }

    #[test]
    fn test_tabu_cost_history_non_increasing() {
        let instance = rugged_instance();
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_tabu_tenure(5)
            .with_seed(42);
        let result = solve(&TabuSearch::new(&instance, config)).unwrap();

        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_tabu_never_selects_solution_in_memory() {
        let instance = rugged_instance();
        let config = TabuConfig::default()
            .with_max_iterations(150)
            .with_tabu_tenure(8)
            .with_seed(7);
        let search = TabuSearch::new(&instance, config);
        let mut state = search.initialize().unwrap();

        while !search.is_done(&state) {
            let before: Vec<Solution> = state.memory.iter().cloned().collect();
            let previous = state.current.clone();
            search.step(&mut state).unwrap();
            if state.current != previous {
                assert!(
                    !before.contains(&state.current),
                    "iteration {} moved to a tabu solution",
                    state.iteration
                );
            }
        }
    }

    #[test]
    fn test_tabu_escapes_local_optimum() {
        let instance = rugged_instance();
        let start = Solution::new(vec![0; 14]);
        let descent = solve(
            &LocalSearch::new(&instance, LocalSearchConfig::default())
                .with_initial(start.clone()),
        )
        .unwrap();
        let tabu = solve(
            &TabuSearch::new(
                &instance,
                TabuConfig::default()
                    .with_max_iterations(300)
                    .with_tabu_tenure(20),
            )
            .with_initial(start),
        )
        .unwrap();
        assert!(tabu.best_cost <= descent.best_cost);
    }

    #[test]
    fn test_all_neighbors_tabu_is_noop() {
        let instance = Instance::new(
            vec![Warehouse::new(1.0), Warehouse::new(2.0)],
            vec![Customer::new(vec![1.0, 1.0])],
        )
        .unwrap();
        let config = TabuConfig::default()
            .with_max_iterations(10)
            .with_max_no_improve(10)
            .with_tabu_tenure(2);
        let search = TabuSearch::new(&instance, config).with_initial(Solution::new(vec![0]));
        let mut state = search.initialize().unwrap();

        search.step(&mut state).unwrap();
        assert_eq!(state.current, Solution::new(vec![1]));
        assert_eq!(state.no_improve, 1);

        // [0] is still in memory, so the only neighbor is tabu
        search.step(&mut state).unwrap();
        assert_eq!(state.current, Solution::new(vec![1]));
        assert_eq!(state.iteration, 2);
        assert_eq!(state.no_improve, 2);

        let result = solve(&search).unwrap();
        assert_eq!(result.best_cost, 2.0);
        assert_eq!(result.steps, 10);
    }

    #[test]
    fn test_stagnation_termination() {
        let instance = small_instance();
        let config = TabuConfig::default()
            .with_max_iterations(10_000)
            .with_max_no_improve(5)
            .with_tabu_tenure(1);
        let search = TabuSearch::new(&instance, config).with_initial(Solution::new(vec![0, 0]));
        let result = solve(&search).unwrap();
        assert_eq!(result.steps, 5);
        assert_eq!(result.best_cost, 19.0);
    }

    #[test]
    fn test_best_iteration_recorded() {
        let instance = small_instance();
        let search = TabuSearch::new(&instance, TabuConfig::default())
            .with_initial(Solution::new(vec![1, 0]));
        let mut state = search.initialize().unwrap();
        while !search.is_done(&state) {
            search.step(&mut state).unwrap();
        }
        assert_eq!(state.best_iteration, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance = small_instance();
        let search = TabuSearch::new(&instance, TabuConfig::default().with_max_iterations(0));
        assert!(matches!(
            search.initialize(),
            Err(SolveError::InvalidConfig(_))
        ));
    }
}
