//! Solution cost evaluation.
//!
//! Total cost = Σ fixed cost of every warehouse serving at least one
//! customer + Σ per-customer assignment cost. Which warehouses are open is
//! recomputed from the solution on every call.

use crate::models::{CapacityMode, Instance, Solution};

/// Cost reported for infeasible solutions.
pub const INFEASIBLE: f64 = f64::INFINITY;

/// Per-warehouse tally of assigned customers and their total demand.
///
/// Built fresh from a solution; it is the only place where "opened" state
/// lives, and it never outlives the evaluation or search step that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseUsage {
    counts: Vec<usize>,
    loads: Vec<f64>,
}

impl WarehouseUsage {
    /// An empty tally for `num_warehouses` warehouses.
    pub fn empty(num_warehouses: usize) -> Self {
        Self {
            counts: vec![0; num_warehouses],
            loads: vec![0.0; num_warehouses],
        }
    }

    /// Tallies `solution` against `instance`.
    ///
    /// Returns `None` if the solution length differs from the customer count
    /// or any warehouse index is out of range.
    pub fn from_solution(instance: &Instance, solution: &Solution) -> Option<Self> {
        if solution.len() != instance.num_customers() {
            return None;
        }
        let m = instance.num_warehouses();
        let mut usage = Self::empty(m);
        for (customer, &w) in instance.customers().iter().zip(solution.assignments()) {
            if w >= m {
                return None;
            }
            usage.add(w, customer.demand());
        }
        Some(usage)
    }

    /// Records one more customer of `demand` at `warehouse`.
    #[inline]
    pub fn add(&mut self, warehouse: usize, demand: f64) {
        self.counts[warehouse] += 1;
        self.loads[warehouse] += demand;
    }

    /// Removes one customer of `demand` from `warehouse`.
    #[inline]
    pub fn remove(&mut self, warehouse: usize, demand: f64) {
        self.counts[warehouse] -= 1;
        self.loads[warehouse] -= demand;
    }

    /// Number of customers assigned to `warehouse`.
    #[inline]
    pub fn count(&self, warehouse: usize) -> usize {
        self.counts[warehouse]
    }

    /// Total demand assigned to `warehouse`.
    #[inline]
    pub fn load(&self, warehouse: usize) -> f64 {
        self.loads[warehouse]
    }

    /// Whether `warehouse` serves at least one customer.
    #[inline]
    pub fn is_open(&self, warehouse: usize) -> bool {
        self.counts[warehouse] > 0
    }

    /// Number of open warehouses.
    pub fn open_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Computes total cost and feasibility of solutions for one instance.
///
/// # Examples
///
/// ```
/// use u_facility::evaluation::CostEvaluator;
/// use u_facility::models::{Customer, Instance, Solution, Warehouse};
///
/// let instance = Instance::new(
///     vec![Warehouse::new(10.0), Warehouse::new(15.0)],
///     vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
/// )
/// .unwrap();
/// let evaluator = CostEvaluator::new(&instance);
///
/// assert_eq!(evaluator.evaluate(&Solution::new(vec![0, 1])), 28.0);
/// assert_eq!(evaluator.evaluate(&Solution::new(vec![0, 0])), 19.0);
/// assert!(evaluator.evaluate(&Solution::new(vec![0, 2])).is_infinite());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator<'a> {
    instance: &'a Instance,
    mode: CapacityMode,
}

impl<'a> CostEvaluator<'a> {
    /// Creates an evaluator using the instance's own capacity mode.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            mode: instance.mode(),
        }
    }

    /// Overrides the capacity mode.
    pub fn with_mode(mut self, mode: CapacityMode) -> Self {
        self.mode = mode;
        self
    }

    /// The instance being evaluated against.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// The capacity mode in effect.
    pub fn mode(&self) -> CapacityMode {
        self.mode
    }

    /// Total cost of `solution`, or [`INFEASIBLE`].
    ///
    /// Infeasible means a wrong length, an out-of-range warehouse index, or
    /// (capacitated mode) a warehouse whose assigned demand exceeds its
    /// capacity.
    ///
    /// # Complexity
    /// O(n + m) time, O(m) extra space.
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        let Some(usage) = WarehouseUsage::from_solution(self.instance, solution) else {
            return INFEASIBLE;
        };
        if !self.fits(&usage) {
            return INFEASIBLE;
        }

        let variable: f64 = self
            .instance
            .customers()
            .iter()
            .zip(solution.assignments())
            .map(|(c, &w)| c.cost_to(w))
            .sum();
        let fixed: f64 = self
            .instance
            .warehouses()
            .iter()
            .enumerate()
            .filter(|&(w, _)| usage.is_open(w))
            .map(|(_, wh)| wh.fixed_cost())
            .sum();

        fixed + variable
    }

    /// Returns `true` if `solution` has a finite cost.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.evaluate(solution).is_finite()
    }

    /// Whether every warehouse load in `usage` is within capacity.
    ///
    /// Always `true` in uncapacitated mode.
    pub fn fits(&self, usage: &WarehouseUsage) -> bool {
        if self.mode == CapacityMode::Uncapacitated {
            return true;
        }
        self.instance
            .warehouses()
            .iter()
            .enumerate()
            .all(|(w, wh)| match wh.capacity() {
                Some(cap) => usage.load(w) <= cap,
                None => true,
            })
    }

    /// Whether `warehouse` can take `demand` more on top of `usage`.
    #[inline]
    pub fn has_room(&self, usage: &WarehouseUsage, warehouse: usize, demand: f64) -> bool {
        if self.mode == CapacityMode::Uncapacitated {
            return true;
        }
        match self.instance.warehouses()[warehouse].capacity() {
            Some(cap) => usage.load(warehouse) + demand <= cap,
            None => true,
        }
    }

    /// Cost change from moving `customer` from its warehouse `from` to `to`,
    /// given the tally of the current solution.
    ///
    /// Exact up to floating-point rounding, which can leave a zero change
    /// slightly negative. Capacity is not checked here; see [`has_room`](Self::has_room).
    #[inline]
    pub fn move_delta(&self, usage: &WarehouseUsage, customer: usize, from: usize, to: usize) -> f64 {
        if from == to {
            return 0.0;
        }
        let c = &self.instance.customers()[customer];
        let warehouses = self.instance.warehouses();
        let mut delta = c.cost_to(to) - c.cost_to(from);
        if usage.count(from) == 1 {
            delta -= warehouses[from].fixed_cost();
        }
        if !usage.is_open(to) {
            delta += warehouses[to].fixed_cost();
        }
        delta
    }
}
