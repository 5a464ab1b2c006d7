//! GRASP configuration.

use crate::local_search::ImprovementPolicy;

/// Configuration parameters for GRASP.
///
/// # Examples
///
/// ```
/// use u_facility::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_alpha(0.3)
///     .with_max_iterations(20)
///     .without_local_search();
/// assert_eq!(config.alpha, 0.3);
/// assert!(config.local_search.is_none());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Greediness/randomness trade-off in `[0, 1]`.
    ///
    /// 0 is pure greedy; 1 samples uniformly among all candidates.
    pub alpha: f64,
    /// Number of construct (+ descend) restarts.
    pub max_iterations: usize,
    /// Descent applied to each construction, or `None` for construction only.
    pub local_search: Option<ImprovementPolicy>,
    /// Random seed (None for the default seed).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            max_iterations: 1,
            local_search: Some(ImprovementPolicy::Best),
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets alpha, clamped to `[0, 1]`.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of restarts.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the descent policy applied after each construction.
    pub fn with_local_search(mut self, policy: ImprovementPolicy) -> Self {
        self.local_search = Some(policy);
        self
    }

    /// Disables the descent phase.
    pub fn without_local_search(mut self) -> Self {
        self.local_search = None;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err("alpha must be within [0, 1]".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraspConfig::default();
        assert!((config.alpha - 0.1).abs() < 1e-12);
        assert_eq!(config.max_iterations, 1);
        assert_eq!(config.local_search, Some(ImprovementPolicy::Best));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_alpha_clamped() {
        assert_eq!(GraspConfig::default().with_alpha(2.0).alpha, 1.0);
        assert_eq!(GraspConfig::default().with_alpha(-1.0).alpha, 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(GraspConfig::default().with_max_iterations(0).validate().is_err());
        let config = GraspConfig {
            alpha: f64::NAN,
            ..GraspConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
