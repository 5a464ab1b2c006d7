//! Warehouse, customer, and instance types.

use crate::error::InstanceError;

/// Whether warehouse capacities and customer demands are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapacityMode {
    /// Warehouses serve any number of customers.
    #[default]
    Uncapacitated,
    /// The demand assigned to a warehouse must not exceed its capacity.
    Capacitated,
}

/// A candidate facility.
///
/// # Examples
///
/// ```
/// use u_facility::models::Warehouse;
///
/// let w = Warehouse::new(7500.0).with_capacity(5000.0);
/// assert_eq!(w.fixed_cost(), 7500.0);
/// assert_eq!(w.capacity(), Some(5000.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warehouse {
    fixed_cost: f64,
    capacity: Option<f64>,
}

impl Warehouse {
    /// Creates a warehouse with unlimited capacity.
    pub fn new(fixed_cost: f64) -> Self {
        Self {
            fixed_cost,
            capacity: None,
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Cost charged once if at least one customer is assigned here.
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Capacity, or `None` for unlimited.
    pub fn capacity(&self) -> Option<f64> {
        self.capacity
    }
}

/// A customer with a demand and one assignment cost per warehouse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    demand: f64,
    costs: Vec<f64>,
}

impl Customer {
    /// Creates a customer with zero demand.
    pub fn new(costs: Vec<f64>) -> Self {
        Self { demand: 0.0, costs }
    }

    /// Sets the demand.
    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Demand served by the assigned warehouse.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Variable assignment costs, indexed by warehouse.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Cost of assigning this customer to `warehouse`.
    ///
    /// # Panics
    /// Panics if `warehouse` is out of range.
    #[inline]
    pub fn cost_to(&self, warehouse: usize) -> f64 {
        self.costs[warehouse]
    }
}

/// An immutable facility location instance.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Customer, Instance, Warehouse};
///
/// let instance = Instance::new(
///     vec![Warehouse::new(10.0), Warehouse::new(15.0)],
///     vec![Customer::new(vec![1.0, 5.0]), Customer::new(vec![8.0, 2.0])],
/// )
/// .unwrap();
/// assert_eq!(instance.num_warehouses(), 2);
/// assert_eq!(instance.num_customers(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    warehouses: Vec<Warehouse>,
    customers: Vec<Customer>,
    mode: CapacityMode,
}

impl Instance {
    /// Creates an uncapacitated instance.
    ///
    /// Fails if there are no warehouses or a customer's cost row length
    /// differs from the number of warehouses.
    pub fn new(warehouses: Vec<Warehouse>, customers: Vec<Customer>) -> Result<Self, InstanceError> {
        if warehouses.is_empty() {
            return Err(InstanceError::NoWarehouses);
        }
        let m = warehouses.len();
        if let Some((i, c)) = customers
            .iter()
            .enumerate()
            .find(|(_, c)| c.costs.len() != m)
        {
            return Err(InstanceError::CostRowLength {
                customer: i,
                expected: m,
                found: c.costs.len(),
            });
        }
        Ok(Self {
            warehouses,
            customers,
            mode: CapacityMode::Uncapacitated,
        })
    }

    /// Creates a capacitated instance.
    pub fn capacitated(
        warehouses: Vec<Warehouse>,
        customers: Vec<Customer>,
    ) -> Result<Self, InstanceError> {
        Ok(Self::new(warehouses, customers)?.with_mode(CapacityMode::Capacitated))
    }

    /// Sets the capacity mode.
    pub fn with_mode(mut self, mode: CapacityMode) -> Self {
        self.mode = mode;
        self
    }

    /// The capacity mode this instance is evaluated under.
    pub fn mode(&self) -> CapacityMode {
        self.mode
    }

    /// All warehouses, indexed by warehouse index.
    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    /// All customers, indexed by customer index.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of warehouses (m).
    pub fn num_warehouses(&self) -> usize {
        self.warehouses.len()
    }

    /// Number of customers (n).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }
}
