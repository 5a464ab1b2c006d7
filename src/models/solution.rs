//! Customer-to-warehouse assignment.

use rand::Rng;

/// One warehouse index per customer, in customer order.
///
/// Solutions are plain values: every move or mutation works on its own
/// copy, so no two chromosomes, tabu entries, or incumbents alias.
///
/// # Examples
///
/// ```
/// use u_facility::models::Solution;
///
/// let s = Solution::new(vec![0, 1, 1]);
/// let t = s.with_move(0, 1);
/// assert_eq!(s.assignments(), &[0, 1, 1]);
/// assert_eq!(t.assignments(), &[1, 1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    assignments: Vec<usize>,
}

impl Solution {
    /// Wraps an assignment vector.
    pub fn new(assignments: Vec<usize>) -> Self {
        Self { assignments }
    }

    /// Draws every customer's warehouse uniformly from `0..num_warehouses`.
    pub fn random<R: Rng>(num_customers: usize, num_warehouses: usize, rng: &mut R) -> Self {
        let assignments = (0..num_customers)
            .map(|_| rng.random_range(0..num_warehouses))
            .collect();
        Self { assignments }
    }

    /// Warehouse indices, indexed by customer.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Warehouse serving `customer`.
    #[inline]
    pub fn warehouse_of(&self, customer: usize) -> usize {
        self.assignments[customer]
    }

    /// Reassigns `customer` in place.
    #[inline]
    pub fn assign(&mut self, customer: usize, warehouse: usize) {
        self.assignments[customer] = warehouse;
    }

    /// Returns a copy with `customer` reassigned to `warehouse`.
    pub fn with_move(&self, customer: usize, warehouse: usize) -> Self {
        let mut next = self.clone();
        next.assign(customer, warehouse);
        next
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if there are no customers.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Checks the length against the instance and every index against `0..num_warehouses`.
    pub fn check_shape(&self, num_customers: usize, num_warehouses: usize) -> Result<(), String> {
        if self.len() != num_customers {
            return Err(format!(
                "solution assigns {} customers, instance has {}",
                self.len(),
                num_customers
            ));
        }
        if let Some((c, &w)) = self
            .assignments
            .iter()
            .enumerate()
            .find(|&(_, &w)| w >= num_warehouses)
        {
            return Err(format!(
                "customer {c} assigned to warehouse {w}, instance has {num_warehouses}"
            ));
        }
        Ok(())
    }
}

impl From<Vec<usize>> for Solution {
    fn from(assignments: Vec<usize>) -> Self {
        Self::new(assignments)
    }
}
