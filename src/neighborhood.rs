//! Single-reassignment neighborhood.
//!
//! A move reassigns exactly one customer to a different warehouse and
//! leaves every other assignment unchanged, so the full neighborhood has
//! `n·(m−1)` members. Moves are enumerated customer-major, then by
//! warehouse index, and that order is the tie-break everywhere.
//!
//! In capacitated mode a move is skipped unless its destination has room
//! for the customer's demand.

use std::ops::ControlFlow;

use crate::evaluation::{CostEvaluator, WarehouseUsage};
use crate::models::Solution;

/// Reassign `customer` to `warehouse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Customer being reassigned.
    pub customer: usize,
    /// Destination warehouse.
    pub warehouse: usize,
}

impl Move {
    /// Applies the move to a copy of `solution`.
    pub fn apply(&self, solution: &Solution) -> Solution {
        solution.with_move(self.customer, self.warehouse)
    }
}

/// A move together with the cost of the solution it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// The move.
    pub mv: Move,
    /// Total cost after applying the move.
    pub cost: f64,
}

/// Enumerates and scores single-reassignment moves.
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodExplorer<'a> {
    evaluator: CostEvaluator<'a>,
}

impl<'a> NeighborhoodExplorer<'a> {
    /// Creates an explorer over the evaluator's instance.
    pub fn new(evaluator: CostEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// The underlying evaluator.
    pub fn evaluator(&self) -> &CostEvaluator<'a> {
        &self.evaluator
    }

    /// Upper bound on the neighborhood size, `n·(m−1)`.
    pub fn size(&self) -> usize {
        let instance = self.evaluator.instance();
        instance.num_customers() * instance.num_warehouses().saturating_sub(1)
    }

    /// All admissible neighbors of `solution` in enumeration order.
    ///
    /// `cost` must be the evaluator's cost of `solution`.
    pub fn neighbors(&self, solution: &Solution, cost: f64) -> Vec<Neighbor> {
        let mut out = Vec::with_capacity(self.size());
        self.scan(solution, cost, |nb| {
            out.push(nb);
            ControlFlow::Continue(())
        });
        out
    }

    /// All admissible neighbors sorted ascending by cost.
    ///
    /// The sort is stable, so equal costs keep enumeration order.
    pub fn sorted_neighbors(&self, solution: &Solution, cost: f64) -> Vec<Neighbor> {
        let mut out = self.neighbors(solution, cost);
        out.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        out
    }

    /// The lowest-cost neighbor strictly cheaper than `cost`, if any.
    ///
    /// Ties go to the earliest move in enumeration order. The returned cost
    /// is the full evaluation of the moved solution.
    pub fn best_improving(&self, solution: &Solution, cost: f64) -> Option<Neighbor> {
        let mut best: Option<Neighbor> = None;
        self.scan(solution, cost, |nb| {
            let threshold = best.map_or(cost, |b| b.cost);
            if let Some(confirmed) = self.confirm(solution, nb, threshold) {
                best = Some(confirmed);
            }
            ControlFlow::Continue(())
        });
        best
    }

    /// The first neighbor in enumeration order strictly cheaper than `cost`.
    ///
    /// The returned cost is the full evaluation of the moved solution.
    pub fn first_improving(&self, solution: &Solution, cost: f64) -> Option<Neighbor> {
        let mut found = None;
        self.scan(solution, cost, |nb| match self.confirm(solution, nb, cost) {
            Some(confirmed) => {
                found = Some(confirmed);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        });
        found
    }

    /// Re-prices a candidate the delta puts below `threshold`.
    ///
    /// Summed deltas can round a zero change slightly negative, so the
    /// candidate only counts if its full cost is also below `threshold`.
    fn confirm(&self, solution: &Solution, nb: Neighbor, threshold: f64) -> Option<Neighbor> {
        if nb.cost >= threshold {
            return None;
        }
        let exact = self.evaluator.evaluate(&nb.mv.apply(solution));
        (exact < threshold).then_some(Neighbor { cost: exact, ..nb })
    }

    /// Visits admissible neighbors in enumeration order until `visit` breaks.
    ///
    /// From a feasible solution, neighbor costs come from an O(1) delta on
    /// the warehouse tally. From an infeasible one they are fully
    /// re-evaluated, since the delta is undefined against an infinite base.
    fn scan<F>(&self, solution: &Solution, cost: f64, mut visit: F)
    where
        F: FnMut(Neighbor) -> ControlFlow<()>,
    {
        let instance = self.evaluator.instance();
        let m = instance.num_warehouses();
        let usage = WarehouseUsage::from_solution(instance, solution);
        let incremental = cost.is_finite() && usage.is_some();

        for (customer, c) in instance.customers().iter().enumerate().take(solution.len()) {
            let from = solution.warehouse_of(customer);
            for to in 0..m {
                if to == from {
                    continue;
                }
                if let Some(usage) = &usage {
                    if !self.evaluator.has_room(usage, to, c.demand()) {
                        continue;
                    }
                }
                let mv = Move {
                    customer,
                    warehouse: to,
                };
                let next_cost = match &usage {
                    Some(usage) if incremental => {
                        cost + self.evaluator.move_delta(usage, customer, from, to)
                    }
                    _ => self.evaluator.evaluate(&mv.apply(solution)),
                };
                if visit(Neighbor { mv, cost: next_cost }).is_break() {
                    return;
                }
            }
        }
    }
}
