//! Gene vector operations for the genetic algorithm.
//!
//! These are the building blocks used by
//! [`GeneticAlgorithm`](crate::genetic_algorithm::GeneticAlgorithm):
//!
//! - **Initialization**: [`random`] draws genes uniformly from `[-1, 1]`
//! - **Crossover**: [`crossover`] picks two cut points, [`crossover_at`] applies them
//! - **Mutation**: [`mutate`] selects genes, [`blend_mutation`] computes their new value
//!
//! # Two-Cut Crossover
//!
//! The cut points are drawn independently and are not sorted, so three cases exist:
//!
//! - `start < end`: parent 1 supplies the genes strictly between the points
//! - `start > end`: parent 1 supplies every gene except those strictly between them
//! - `start == end`: every gene comes from parent 2
//!
//! The two points themselves always come from parent 2 when `start < end` and from
//! parent 1 when `start > end`. This asymmetry is part of the operator's contract and
//! trained populations depend on it.

use rand::Rng;

/// Creates a gene vector by applying a function to each index.
///
/// ```
/// use lander_training::genes;
///
/// let genes = genes::from_fn(|i| i as f64 / 2.0, 3);
/// assert_eq!(genes, vec![0.0, 0.5, 1.0]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Draws `len` genes uniformly from `[-1, 1]`.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-1.0..=1.0), len)
}

/// Returns `true` when gene `index` is inherited from parent 1 for the given cut points.
#[must_use]
pub fn from_first_parent(index: usize, start: usize, end: usize) -> bool {
    if start < end {
        start < index && index < end
    } else if start > end {
        !(index < start && index > end)
    } else {
        false
    }
}

/// Combines two parents using explicit cut points.
///
/// # Panics
///
/// Panics if the parents have different lengths.
///
/// ```
/// use lander_training::genes;
///
/// let p1 = [1.0; 10];
/// let p2 = [2.0; 10];
/// let child = genes::crossover_at(&p1, &p2, 2, 7);
/// assert_eq!(child, [2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
/// ```
#[must_use]
pub fn crossover_at(p1: &[f64], p2: &[f64], start: usize, end: usize) -> Vec<f64> {
    assert_eq!(p1.len(), p2.len(), "parents must have the same gene length");
    from_fn(
        |i| {
            if from_first_parent(i, start, end) {
                p1[i]
            } else {
                p2[i]
            }
        },
        p1.len(),
    )
}

/// Combines two parents using two cut points drawn uniformly from `[0, len)`.
///
/// # Panics
///
/// Panics if the parents have different lengths or are empty.
pub fn crossover<R>(p1: &[f64], p2: &[f64], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    assert!(!p1.is_empty(), "cannot cross over empty chromosomes");
    let start = rng.random_range(0..p1.len());
    let end = rng.random_range(0..p1.len());
    crossover_at(p1, p2, start, end)
}

/// New value of a mutated gene: the average of the old value and a random draw.
#[must_use]
pub fn blend_mutation(gene: f64, draw: f64) -> f64 {
    (gene + draw) / 2.0
}

/// Mutates each gene with probability `rate`, blending it with a draw from `[-1, 1)`.
///
/// # Arguments
///
/// * `genes` - Gene vector to mutate in place
/// * `rate` - Per-gene mutation probability
/// * `rng` - Random number generator
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(genes: &mut [f64], rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genes {
        if rng.random_bool(rate) {
            *gene = blend_mutation(*gene, rng.random_range(-1.0..1.0));
        }
    }
}
