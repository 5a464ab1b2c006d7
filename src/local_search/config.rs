//! Local search configuration.

/// How the next move is chosen from the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImprovementPolicy {
    /// Steepest descent over the full neighborhood.
    #[default]
    Best,
    /// First improving move in enumeration order.
    First,
}

/// Configuration parameters for local search.
///
/// # Examples
///
/// ```
/// use u_facility::local_search::{ImprovementPolicy, LocalSearchConfig};
///
/// let config = LocalSearchConfig::default()
///     .with_policy(ImprovementPolicy::First)
///     .with_max_steps(10_000)
///     .with_seed(7);
/// assert_eq!(config.policy, ImprovementPolicy::First);
/// assert_eq!(config.max_steps, Some(10_000));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Move selection policy.
    pub policy: ImprovementPolicy,
    /// Optional ceiling on accepted moves. `None` runs to a local optimum.
    pub max_steps: Option<usize>,
    /// Seed for the random starting solution when none is supplied.
    pub seed: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            policy: ImprovementPolicy::Best,
            max_steps: None,
            seed: None,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the improvement policy.
    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Caps the number of accepted moves.
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
