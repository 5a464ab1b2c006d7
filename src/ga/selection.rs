//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Costs are minimized, so fitness is the inverse cost `1 / (cost + ε)`.
//! An infeasible (infinite) cost maps to fitness 0 and is only drawn when
//! every individual is infeasible, in which case the draw is uniform.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use rand::Rng;

/// Guards the inverse-cost fitness against division by zero.
pub const FITNESS_EPSILON: f64 = 1e-9;

/// Selection fitness of a cost: `1 / (cost + ε)`.
#[inline]
pub fn fitness(cost: f64) -> f64 {
    1.0 / (cost + FITNESS_EPSILON)
}

/// Draws `count` indices with replacement, each with probability
/// proportional to `weights[i]`.
///
/// Non-finite or negative weights count as 0. If no weight is positive the
/// draw is uniform.
///
/// # Complexity
/// O(n + count·log n)
pub fn roulette<R: Rng>(weights: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let mut cumulative = Vec::with_capacity(n);
    let mut total = 0.0;
    for &w in weights {
        if w.is_finite() && w > 0.0 {
            total += w;
        }
        cumulative.push(total);
    }

    if !(total > 0.0 && total.is_finite()) {
        return (0..count).map(|_| rng.random_range(0..n)).collect();
    }

    (0..count)
        .map(|_| {
            let threshold = rng.random_range(0.0..total);
            cumulative
                .partition_point(|&c| c <= threshold)
                .min(n - 1) // floating-point fallback
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_fitness_inverse_cost() {
        assert!(fitness(1.0) > fitness(2.0));
        assert_eq!(fitness(f64::INFINITY), 0.0);
        assert!(fitness(0.0).is_finite());
    }

    #[test]
    fn test_roulette_favors_cheap() {
        let weights: Vec<f64> = [100.0, 50.0, 1.0, 80.0].iter().map(|&c| fitness(c)).collect();
        let mut rng = create_rng(Some(42));
        let mut counts = [0u32; 4];
        for idx in roulette(&weights, 10_000, &mut rng) {
            counts[idx] += 1;
        }
        assert!(
            counts[2] > counts[1] && counts[1] > counts[0],
            "counts {counts:?}"
        );
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let weights = [0.0, 1.0, 0.0, fitness(f64::INFINITY)];
        let mut rng = create_rng(Some(1));
        assert!(roulette(&weights, 1000, &mut rng).iter().all(|&i| i == 1));
    }

    #[test]
    fn test_roulette_all_zero_is_uniform() {
        let weights = [0.0; 4];
        let mut rng = create_rng(Some(2));
        let mut counts = [0u32; 4];
        for idx in roulette(&weights, 8000, &mut rng) {
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_empty() {
        assert!(roulette(&[], 5, &mut create_rng(None)).is_empty());
    }
}
