//! Genetic operators for assignment-encoded chromosomes.
//!
//! A chromosome is one warehouse index per customer. Any gene value in
//! `0..num_warehouses` is valid, so both operators act gene-wise with no
//! repair step.
//!
//! - [`single_point_crossover`]: swap tails after a random cut, O(n)
//! - [`reset_mutation`]: redraw each gene with probability `rate`, O(n)

use rand::Rng;

/// Chooses a crossover cut in `1..=n-2`.
///
/// For `n == 2` the only interior cut, 1, is used. Returns `None` when
/// `n < 2`, where no cut splits the chromosome.
pub fn cut_point<R: Rng>(n: usize, rng: &mut R) -> Option<usize> {
    match n {
        0 | 1 => None,
        2 => Some(1),
        _ => Some(rng.random_range(1..=n - 2)),
    }
}

/// Single-point crossover.
///
/// Child 1 takes `parent1[..cut]` then `parent2[cut..]`; child 2 the
/// reverse. Without a valid cut the children are copies of the parents.
///
/// # Panics
/// Panics if parents have different lengths.
///
/// # Examples
///
/// ```
/// use u_facility::ga::operators::single_point_crossover;
/// use u_facility::random::create_rng;
///
/// let (a, b) = single_point_crossover(&[0, 0], &[1, 1], &mut create_rng(None));
/// assert_eq!(a, vec![0, 1]);
/// assert_eq!(b, vec![1, 0]);
/// ```
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    let Some(cut) = cut_point(parent1.len(), rng) else {
        return (parent1.to_vec(), parent2.to_vec());
    };

    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Independently resets each gene to a uniform warehouse with probability `rate`.
///
/// A reset may redraw the gene's current value.
pub fn reset_mutation<R: Rng>(genes: &mut [usize], rate: f64, num_warehouses: usize, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = rng.random_range(0..num_warehouses);
        }
    }
}
