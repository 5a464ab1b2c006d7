//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// How children enter the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Replacement {
    /// Children fully replace the population.
    Generational,
    /// Parents and children are merged and the cheapest `population_size` survive.
    #[default]
    Elitist,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_facility::ga::{GaConfig, Replacement};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.replacement, Replacement::Elitist);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_facility::ga::{GaConfig, Replacement};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_replacement(Replacement::Generational)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population (P).
    ///
    /// Each generation samples `⌊P/2⌋` parents, so P must be at least 4
    /// for the parent pool to hold two members.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Per-gene probability of resetting to a random warehouse (0.0–1.0).
    pub mutation_rate: f64,

    /// Replacement policy.
    pub replacement: Replacement,

    /// Random seed for reproducibility.
    ///
    /// `None` uses the default seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.01,
            replacement: Replacement::Elitist,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the replacement policy.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 4 {
            return Err("population_size must be at least 4".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 1000);
        assert!((config.mutation_rate - 0.01).abs() < 1e-12);
        assert_eq!(config.replacement, Replacement::Elitist);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_generations(25)
            .with_mutation_rate(0.2)
            .with_replacement(Replacement::Generational)
            .with_seed(9);
        assert_eq!(config.population_size, 40);
        assert_eq!(config.max_generations, 25);
        assert!((config.mutation_rate - 0.2).abs() < 1e-12);
        assert_eq!(config.replacement, Replacement::Generational);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_clamp_rate() {
        assert_eq!(GaConfig::default().with_mutation_rate(2.0).mutation_rate, 1.0);
        assert_eq!(GaConfig::default().with_mutation_rate(-1.0).mutation_rate, 0.0);
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(GaConfig::default().with_population_size(3).validate().is_err());
        assert!(GaConfig::default().with_population_size(4).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }
}
