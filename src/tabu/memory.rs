//! Bounded first-in-first-out set of recently visited solutions.

use std::collections::{HashSet, VecDeque};

use crate::models::Solution;

/// Tabu list keyed by whole solutions.
///
/// Holds at most `capacity` entries; inserting into a full memory evicts
/// the oldest. A FIFO queue keeps insertion order and a set gives O(1)
/// membership.
///
/// # Examples
///
/// ```
/// use u_facility::models::Solution;
/// use u_facility::tabu::TabuMemory;
///
/// let mut memory = TabuMemory::new(2);
/// memory.insert(Solution::new(vec![0]));
/// memory.insert(Solution::new(vec![1]));
/// memory.insert(Solution::new(vec![2]));
/// assert!(!memory.contains(&Solution::new(vec![0])));
/// assert!(memory.contains(&Solution::new(vec![2])));
/// ```
#[derive(Debug, Clone)]
pub struct TabuMemory {
    capacity: usize,
    queue: VecDeque<Solution>,
    set: HashSet<Solution>,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` solutions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            set: HashSet::with_capacity(capacity),
        }
    }

    /// Returns `true` if `solution` is tabu.
    pub fn contains(&self, solution: &Solution) -> bool {
        self.set.contains(solution)
    }

    /// Records `solution`, evicting the oldest entry when full.
    ///
    /// Re-inserting a solution already present leaves the memory unchanged.
    pub fn insert(&mut self, solution: Solution) {
        if self.capacity == 0 || self.set.contains(&solution) {
            return;
        }
        if self.queue.len() >= self.capacity {
            if let Some(oldest) = self.queue.pop_front() {
                self.set.remove(&oldest);
            }
        }
        self.set.insert(solution.clone());
        self.queue.push_back(solution);
    }

    /// Number of solutions held.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of solutions held (the tenure).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.queue.iter()
    }
}
