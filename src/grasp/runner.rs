//! GRASP construction and multi-start execution.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::{ConstructionError, SolveError};
use crate::evaluation::{CostEvaluator, WarehouseUsage};
use crate::local_search::descend;
use crate::models::{Instance, Solution};
use crate::neighborhood::NeighborhoodExplorer;
use crate::random::create_rng;
use crate::strategy::SearchStrategy;

use super::config::GraspConfig;

/// Size of the restricted candidate list for `candidates` entries.
///
/// Always at least 1, so `alpha = 0` is pure greedy.
pub fn rcl_size(alpha: f64, candidates: usize) -> usize {
    ((alpha * candidates as f64).floor() as usize).clamp(1, candidates.max(1))
}

/// Builds one randomized greedy assignment.
///
/// Customers are processed in index order. Candidates are the warehouses
/// with room for the customer's demand, ranked by incremental cost
/// (ties by warehouse index); the pick is uniform over the RCL.
///
/// # Errors
/// Returns [`ConstructionError`] if some customer has no candidate.
///
/// # Examples
///
/// ```
/// use u_facility::evaluation::CostEvaluator;
/// use u_facility::grasp::construct;
/// use u_facility::models::{Customer, Instance, Warehouse};
/// use u_facility::random::create_rng;
///
/// let instance = Instance::new(
///     vec![Warehouse::new(10.0), Warehouse::new(15.0)],
///     vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
/// )
/// .unwrap();
/// let s = construct(&CostEvaluator::new(&instance), 0.0, &mut create_rng(Some(5))).unwrap();
/// assert_eq!(s.assignments(), &[0, 0]);
/// ```
pub fn construct<R: Rng>(
    evaluator: &CostEvaluator<'_>,
    alpha: f64,
    rng: &mut R,
) -> Result<Solution, ConstructionError> {
    let instance = evaluator.instance();
    let m = instance.num_warehouses();
    let mut usage = WarehouseUsage::empty(m);
    let mut assignments = Vec::with_capacity(instance.num_customers());
    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(m);

    for (customer, c) in instance.customers().iter().enumerate() {
        candidates.clear();
        for (w, wh) in instance.warehouses().iter().enumerate() {
            if !evaluator.has_room(&usage, w, c.demand()) {
                continue;
            }
            let opening = if usage.is_open(w) { 0.0 } else { wh.fixed_cost() };
            candidates.push((opening + c.cost_to(w), w));
        }
        if candidates.is_empty() {
            return Err(ConstructionError { customer });
        }

        // stable: equal costs stay in warehouse order
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        let rcl = rcl_size(alpha, candidates.len());
        let (_, chosen) = candidates[rng.random_range(0..rcl)];

        usage.add(chosen, c.demand());
        assignments.push(chosen);
    }

    Ok(Solution::new(assignments))
}

/// Run state of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspState {
    /// Restarts completed.
    pub iteration: usize,
    /// Best solution over all restarts.
    pub best: Solution,
    /// Cost of `best`.
    pub best_cost: f64,
    rng: ChaCha8Rng,
}

/// Multi-start GRASP: construct, optionally descend, keep the best.
///
/// `initialize` performs the first restart, so a state always carries a
/// complete solution; each `step` performs one more.
pub struct Grasp<'a> {
    evaluator: CostEvaluator<'a>,
    config: GraspConfig,
}

impl<'a> Grasp<'a> {
    /// Creates a GRASP run over `instance`.
    pub fn new(instance: &'a Instance, config: GraspConfig) -> Self {
        Self {
            evaluator: CostEvaluator::new(instance),
            config,
        }
    }

    fn restart(&self, rng: &mut ChaCha8Rng) -> Result<(Solution, f64), SolveError> {
        let built = construct(&self.evaluator, self.config.alpha, rng)?;
        Ok(match self.config.local_search {
            Some(policy) => {
                let explorer = NeighborhoodExplorer::new(self.evaluator);
                let (s, cost, _) = descend(&explorer, policy, built);
                (s, cost)
            }
            None => {
                let cost = self.evaluator.evaluate(&built);
                (built, cost)
            }
        })
    }
}

impl SearchStrategy for Grasp<'_> {
    type State = GraspState;

    fn name(&self) -> &'static str {
        "GRASP"
    }

    fn initialize(&self) -> Result<GraspState, SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        let mut rng = create_rng(self.config.seed);
        let (best, best_cost) = self.restart(&mut rng)?;
        tracing::debug!("GRASP: restart 1 cost {:.5}", best_cost);
        Ok(GraspState {
            iteration: 1,
            best,
            best_cost,
            rng,
        })
    }

    fn step(&self, state: &mut GraspState) -> Result<(), SolveError> {
        if self.is_done(state) {
            return Ok(());
        }
        let (solution, cost) = self.restart(&mut state.rng)?;
        state.iteration += 1;
        if cost < state.best_cost {
            tracing::debug!(
                "GRASP: restart {} improved {:.5} -> {:.5}",
                state.iteration,
                state.best_cost,
                cost
            );
            state.best = solution;
            state.best_cost = cost;
        }
        Ok(())
    }

    fn is_done(&self, state: &GraspState) -> bool {
        state.iteration >= self.config.max_iterations
    }

    fn best<'s>(&self, state: &'s GraspState) -> (&'s Solution, f64) {
        (&state.best, state.best_cost)
    }
}

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
            .map(|w| Warehouse::new(30.0 + 11.0 * w as f64))
            .collect();
        let customers = (0..n)
            .map(|c| {
                Customer::new(
                    (0..m)
                        .map(|w| ((c * 7 + w * 31) % 23) as f64 + 0.5)
                        .collect(),
                )
            })
            .collect();
        Instance::new(warehouses, customers).unwrap()
    }

    #[test]
    fn test_rcl_size() {
        assert_eq!(rcl_size(0.0, 10), 1);
        assert_eq!(rcl_size(0.1, 10), 1);
        assert_eq!(rcl_size(0.25, 10), 2);
        assert_eq!(rcl_size(1.0, 10), 10);
        assert_eq!(rcl_size(0.5, 1), 1);
    }

    #[test]
    fn test_alpha_zero_is_seed_independent() {
        let instance = grid_instance(6, 25);
        let ev = CostEvaluator::new(&instance);
        let reference = construct(&ev, 0.0, &mut create_rng(Some(0))).unwrap();
        for seed in 1..20 {
            let s = construct(&ev, 0.0, &mut create_rng(Some(seed))).unwrap();
            assert_eq!(s, reference, "seed {seed} diverged");
        }
    }

    #[test]
    fn test_alpha_zero_is_pure_greedy() {
        let instance = grid_instance(5, 15);
        let ev = CostEvaluator::new(&instance);
        let s = construct(&ev, 0.0, &mut create_rng(None)).unwrap();

        // replay: min incremental cost, lowest index on ties
        let mut open = vec![false; 5];
        for (c, customer) in instance.customers().iter().enumerate() {
            let mut best_w = 0;
            let mut best_inc = f64::INFINITY;
            for (w, wh) in instance.warehouses().iter().enumerate() {
                let inc = if open[w] { 0.0 } else { wh.fixed_cost() } + customer.cost_to(w);
                if inc < best_inc {
                    best_inc = inc;
                    best_w = w;
                }
            }
            open[best_w] = true;
            assert_eq!(s.warehouse_of(c), best_w, "customer {c}");
        }
    }

    #[test]
    fn test_construction_respects_capacity() {
        let instance = Instance::capacitated(
            vec![
                Warehouse::new(0.0).with_capacity(10.0),
                Warehouse::new(100.0).with_capacity(10.0),
            ],
            vec![
                Customer::new(vec![1.0, 1.0]).with_demand(6.0),
                Customer::new(vec![1.0, 1.0]).with_demand(6.0),
            ],
        )
        .unwrap();
        let ev = CostEvaluator::new(&instance);
        let s = construct(&ev, 0.0, &mut create_rng(None)).unwrap();
        assert_eq!(s.assignments(), &[0, 1]);
        assert!(ev.is_feasible(&s));
    }

    #[test]
    fn test_construction_failure_is_reported() {
        let instance = Instance::capacitated(
            vec![Warehouse::new(0.0).with_capacity(10.0)],
            vec![
                Customer::new(vec![1.0]).with_demand(6.0),
                Customer::new(vec![1.0]).with_demand(6.0),
            ],
        )
        .unwrap();
        let ev = CostEvaluator::new(&instance);
        let err = construct(&ev, 0.5, &mut create_rng(None)).unwrap_err();
        assert_eq!(err, ConstructionError { customer: 1 });

        let grasp = Grasp::new(&instance, GraspConfig::default());
        assert!(matches!(solve(&grasp), Err(SolveError::Construction(_))));
    }

    #[test]
    fn test_multi_start_keeps_best() {
        let instance = grid_instance(8, 30);
        let single = solve(&Grasp::new(
            &instance,
            GraspConfig::default().with_alpha(0.5).with_seed(4),
        ))
        .unwrap();
        let multi = solve(&Grasp::new(
            &instance,
            GraspConfig::default()
                .with_alpha(0.5)
                .with_max_iterations(10)
                .with_seed(4),
        ))
        .unwrap();
        assert!(multi.best_cost <= single.best_cost);
        assert_eq!(multi.steps, 9);
        for w in multi.cost_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_construction_only_matches_evaluator() {
        let instance = small_instance();
        let config = GraspConfig::default().with_alpha(0.0).without_local_search();
        let result = solve(&Grasp::new(&instance, config)).unwrap();
        assert_eq!(result.best, Solution::new(vec![0, 0]));
        assert_eq!(result.best_cost, 19.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance = small_instance();
        let grasp = Grasp::new(&instance, GraspConfig::default().with_max_iterations(0));
        assert!(matches!(
            grasp.initialize(),
            Err(SolveError::InvalidConfig(_))
        ));
    }
}
