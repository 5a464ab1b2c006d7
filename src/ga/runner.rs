//! GA evolutionary loop execution.
//!
//! [`GeneticSolver`] orchestrates the evolutionary process:
//! initialization → selection → crossover → mutation → replacement → repeat.

use rand::seq::index;
use rand_chacha::ChaCha8Rng;

use crate::error::SolveError;
use crate::evaluation::CostEvaluator;
use crate::models::{Instance, Solution};
use crate::random::create_rng;
use crate::strategy::SearchStrategy;

use super::config::{GaConfig, Replacement};
use super::operators::{reset_mutation, single_point_crossover};
use super::selection::{fitness, roulette};

/// An evaluated member of the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    /// The encoded assignment.
    pub genes: Solution,
    /// Cost of `genes`.
    pub cost: f64,
}

/// Run state of a GA run.
#[derive(Debug, Clone)]
pub struct GaState {
    /// Current population, `population_size` members.
    pub population: Vec<Chromosome>,
    /// Generations completed.
    pub generation: usize,
    /// Best solution ever evaluated.
    pub best: Solution,
    /// Cost of `best`.
    pub best_cost: f64,
    rng: ChaCha8Rng,
}

/// Population-based genetic search.
///
/// # Usage
///
/// ```
/// use u_facility::ga::{GaConfig, GeneticSolver};
/// use u_facility::models::{Customer, Instance, Warehouse};
/// use u_facility::strategy::solve;
///
/// let instance = Instance::new(
///     vec![Warehouse::new(10.0), Warehouse::new(15.0)],
///     vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
/// )
/// .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = solve(&GeneticSolver::new(&instance, config)).unwrap();
/// assert!(result.best_cost <= 28.0);
/// ```
pub struct GeneticSolver<'a> {
    evaluator: CostEvaluator<'a>,
    config: GaConfig,
}

impl<'a> GeneticSolver<'a> {
    /// Creates a GA run over `instance`.
    pub fn new(instance: &'a Instance, config: GaConfig) -> Self {
        Self {
            evaluator: CostEvaluator::new(instance),
            config,
        }
    }

    fn chromosome(&self, genes: Vec<usize>) -> Chromosome {
        let genes = Solution::new(genes);
        let cost = self.evaluator.evaluate(&genes);
        Chromosome { genes, cost }
    }

    /// Breeds `population_size` children from a roulette-selected parent pool.
    fn breed(&self, population: &[Chromosome], rng: &mut ChaCha8Rng) -> Vec<Chromosome> {
        let size = self.config.population_size;
        let m = self.evaluator.instance().num_warehouses();

        let weights: Vec<f64> = population.iter().map(|c| fitness(c.cost)).collect();
        let parents = roulette(&weights, size / 2, rng);

        let mut children = Vec::with_capacity(size);
        while children.len() < size {
            let pair = index::sample(rng, parents.len(), 2);
            let p1 = &population[parents[pair.index(0)]];
            let p2 = &population[parents[pair.index(1)]];

            let (mut c1, mut c2) =
                single_point_crossover(p1.genes.assignments(), p2.genes.assignments(), rng);
            reset_mutation(&mut c1, self.config.mutation_rate, m, rng);
            reset_mutation(&mut c2, self.config.mutation_rate, m, rng);

            children.push(self.chromosome(c1));
            if children.len() < size {
                children.push(self.chromosome(c2));
            }
        }
        children
    }
}

impl SearchStrategy for GeneticSolver<'_> {
    type State = GaState;

    fn name(&self) -> &'static str {
        "Genetic Algorithm"
    }

    fn initialize(&self) -> Result<GaState, SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        let instance = self.evaluator.instance();
        let mut rng = create_rng(self.config.seed);

        let population: Vec<Chromosome> = (0..self.config.population_size)
            .map(|_| {
                let genes =
                    Solution::random(instance.num_customers(), instance.num_warehouses(), &mut rng);
                let cost = self.evaluator.evaluate(&genes);
                Chromosome { genes, cost }
            })
            .collect();

        // validate() guarantees a non-empty population
        let best = population
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .cloned()
            .ok_or_else(|| SolveError::InvalidConfig("empty population".into()))?;

        tracing::debug!("Genetic Algorithm: initial best {:.5}", best.cost);

        Ok(GaState {
            population,
            generation: 0,
            best: best.genes,
            best_cost: best.cost,
            rng,
        })
    }

    fn step(&self, state: &mut GaState) -> Result<(), SolveError> {
        if self.is_done(state) {
            return Ok(());
        }

        let children = self.breed(&state.population, &mut state.rng);

        if let Some(champion) = children.iter().min_by(|a, b| a.cost.total_cmp(&b.cost)) {
            if champion.cost < state.best_cost {
                tracing::debug!(
                    "Genetic Algorithm: generation {} new best {:.5}",
                    state.generation + 1,
                    champion.cost
                );
                state.best = champion.genes.clone();
                state.best_cost = champion.cost;
            }
        }

        match self.config.replacement {
            Replacement::Generational => state.population = children,
            Replacement::Elitist => {
                state.population.extend(children);
                // stable: parents win ties against children
                state.population.sort_by(|a, b| a.cost.total_cmp(&b.cost));
                state.population.truncate(self.config.population_size);
            }
        }

        state.generation += 1;
        Ok(())
    }

    fn is_done(&self, state: &GaState) -> bool {
        state.generation >= self.config.max_generations
    }

    fn best<'s>(&self, state: &'s GaState) -> (&'s Solution, f64) {
        (&state.best, state.best_cost)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Warehouse};
    use crate::strategy::solve;

    fn small_instance() -> Instance {
        Instance::new(
            vec![Warehouse::new(10.0), Warehouse::new(15.0)],
            vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
        )
        .unwrap()
    }

    fn grid_instance(m: usize, n: usize) -> Instance {
        let warehouses = (0..m)
            .map(|w| Warehouse::new(25.0 + 5.0 * w as f64))
            .collect();
        let customers = (0..n)
            .map(|c| {
                Customer::new(
                    (0..m)
                        .map(|w| ((c * 11 + w * 19) % 13) as f64 + 1.0)
                        .collect(),
                )
            })
            .collect();
        Instance::new(warehouses, customers).unwrap()
    }

    #[test]
    fn test_small_instance_reaches_optimum() {
        let instance = small_instance();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(50)
            .with_mutation_rate(0.1)
            .with_seed(42);
        let result = solve(&GeneticSolver::new(&instance, config)).unwrap();
        assert_eq!(result.best_cost, 19.0);
        assert_eq!(result.best, Solution::new(vec![0, 0]));
    }

    #[test]
    fn test_elitist_population_best_non_increasing() {
        let instance = grid_instance(6, 20);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_mutation_rate(0.05)
            .with_seed(7);
        let solver = GeneticSolver::new(&instance, config);
        let mut state = solver.initialize().unwrap();
        let mut last_pop_best = f64::INFINITY;
        let mut last_global = state.best_cost;

        while !solver.is_done(&state) {
            solver.step(&mut state).unwrap();
            assert_eq!(state.population.len(), 30);
            let pop_best = state.population[0].cost;
            assert!(pop_best <= last_pop_best);
            assert!(state.best_cost <= last_global);
            last_pop_best = pop_best;
            last_global = state.best_cost;
        }
    }

    #[test]
    fn test_generational_replaces_population() {
        let instance = grid_instance(4, 12);
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(15)
            .with_replacement(Replacement::Generational)
            .with_mutation_rate(0.1)
            .with_seed(3);
        let solver = GeneticSolver::new(&instance, config);
        let mut state = solver.initialize().unwrap();
        for _ in 0..15 {
            solver.step(&mut state).unwrap();
            assert_eq!(state.population.len(), 12);
        }
        assert!(solver.is_done(&state));

        // global best is at least as good as anything left in the population
        let pop_best = state
            .population
            .iter()
            .map(|c| c.cost)
            .fold(f64::INFINITY, f64::min);
        assert!(state.best_cost <= pop_best);
    }

    #[test]
    fn test_global_best_cost_matches_evaluator() {
        let instance = grid_instance(5, 15);
        let config = GaConfig::default()
            .with_population_size(16)
            .with_max_generations(30)
            .with_seed(11);
        let result = solve(&GeneticSolver::new(&instance, config)).unwrap();
        let ev = CostEvaluator::new(&instance);
        assert_eq!(ev.evaluate(&result.best), result.best_cost);
        assert_eq!(result.steps, 30);
        assert_eq!(result.cost_history.len(), 31);
    }

    #[test]
    fn test_same_seed_same_result() {
        let instance = grid_instance(5, 15);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(10)
            .with_seed(99);
        let a = solve(&GeneticSolver::new(&instance, config.clone())).unwrap();
        let b = solve(&GeneticSolver::new(&instance, config)).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_single_customer_instance() {
        let instance = Instance::new(
            vec![Warehouse::new(3.0), Warehouse::new(1.0)],
            vec![Customer::new(vec![1.0, 1.0])],
        )
        .unwrap();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(5)
            .with_seed(1);
        let result = solve(&GeneticSolver::new(&instance, config)).unwrap();
        assert_eq!(result.best_cost, 2.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance = small_instance();
        let solver = GeneticSolver::new(&instance, GaConfig::default().with_population_size(2));
        assert!(matches!(
            solver.initialize(),
            Err(SolveError::InvalidConfig(_))
        ));
    }
}
