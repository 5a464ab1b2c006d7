//! Cost and feasibility evaluation.
//!
//! [`CostEvaluator`] is the single cost model shared by every strategy.
//! It handles both the capacitated and the uncapacitated variant through
//! [`CapacityMode`](crate::models::CapacityMode).

mod evaluator;

pub use evaluator::{CostEvaluator, WarehouseUsage, INFEASIBLE};
