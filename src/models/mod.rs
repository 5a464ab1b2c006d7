//! Domain model types for facility location problems.
//!
//! An [`Instance`] holds the warehouses (candidate facilities) and the
//! customers with their per-warehouse assignment costs. A [`Solution`]
//! assigns every customer to exactly one warehouse.
//!
//! The instance is immutable once built. Whether a warehouse is "open" is
//! never stored on it; it is derived from a solution when needed.

mod instance;
mod solution;

pub use instance::{CapacityMode, Customer, Instance, Warehouse};
pub use solution::Solution;
