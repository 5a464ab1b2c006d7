//! Error types shared by the model and the search strategies.
//!
//! Infeasible assignments are *not* errors: the evaluator reports them as
//! an infinite cost so that every strategy rejects them through ordinary
//! cost comparison. The types here cover the cases that must stop a run.

use std::fmt;

/// A problem instance could not be assembled from the supplied records.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The instance has no warehouses.
    NoWarehouses,
    /// A customer's cost row does not have one entry per warehouse.
    CostRowLength {
        /// Index of the offending customer.
        customer: usize,
        /// Number of warehouses in the instance.
        expected: usize,
        /// Number of costs found in the row.
        found: usize,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWarehouses => write!(f, "instance must contain at least one warehouse"),
            Self::CostRowLength {
                customer,
                expected,
                found,
            } => write!(
                f,
                "customer {customer} has {found} assignment costs, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for InstanceError {}

/// GRASP construction found a customer that fits in no warehouse.
///
/// Only possible in the capacitated variant, once every warehouse's
/// remaining capacity is below the customer's demand. The caller decides
/// whether to retry with another seed or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionError {
    /// Index of the customer that could not be placed.
    pub customer: usize,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "customer {} has no warehouse with enough remaining capacity",
            self.customer
        )
    }
}

impl std::error::Error for ConstructionError {}

/// The error type for initializing or stepping a search strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The strategy configuration failed validation.
    InvalidConfig(String),
    /// A supplied starting solution does not fit the instance.
    InvalidSolution(String),
    /// Randomized greedy construction could not place a customer.
    Construction(ConstructionError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::InvalidSolution(msg) => write!(f, "invalid solution: {msg}"),
            Self::Construction(e) => write!(f, "construction failed: {e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Construction(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstructionError> for SolveError {
    fn from(e: ConstructionError) -> Self {
        Self::Construction(e)
    }
}
