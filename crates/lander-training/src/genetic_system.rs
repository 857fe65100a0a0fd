use rand::Rng;

use crate::{GeneIndexOutOfRange, genes};

/// A chromosome: one network's weights as a flat gene vector, plus its fitness.
///
/// Gene order is significant. Genes are decoded positionally into network weights
/// (see [`lander_brain`] for the canonical order).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticSystem {
    genes: Vec<f64>,
    fitness: f64,
}

impl GeneticSystem {
    /// Creates a chromosome with the given genes and zero fitness.
    #[must_use]
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// Creates a chromosome of `len` genes drawn uniformly from `[-1, 1]`.
    pub fn random<R>(len: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(genes::random(rng, len))
    }

    #[must_use]
    pub fn gene(&self, index: usize) -> Option<f64> {
        self.genes.get(index).copied()
    }

    #[must_use]
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Overwrites the gene at `index`, or appends it when `index == len()`.
    ///
    /// Writing further past the end would leave a hole and is rejected.
    pub fn set_gene_at(&mut self, index: usize, value: f64) -> Result<(), GeneIndexOutOfRange> {
        match index.cmp(&self.genes.len()) {
            std::cmp::Ordering::Less => self.genes[index] = value,
            std::cmp::Ordering::Equal => self.genes.push(value),
            std::cmp::Ordering::Greater => {
                return Err(GeneIndexOutOfRange {
                    index,
                    len: self.genes.len(),
                });
            }
        }
        Ok(())
    }

    /// Fitness accumulated so far in this generation.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Adds `delta` (possibly negative) to the fitness.
    pub fn add_score(&mut self, delta: f64) {
        self.fitness += delta;
    }

    pub fn reset_score(&mut self) {
        self.fitness = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn score_accumulates_and_resets() {
        let mut gs = GeneticSystem::new(vec![0.0; 3]);
        assert_eq!(gs.fitness(), 0.0);
        gs.add_score(10.0);
        gs.add_score(-2.5);
        assert_eq!(gs.fitness(), 7.5);
        gs.reset_score();
        assert_eq!(gs.fitness(), 0.0);
    }

    #[test]
    fn set_gene_at_overwrites_or_appends() {
        let mut gs = GeneticSystem::new(vec![]);
        gs.set_gene_at(0, 0.5).unwrap();
        gs.set_gene_at(1, -0.5).unwrap();
        gs.set_gene_at(0, 0.25).unwrap();
        assert_eq!(gs.genes(), &[0.25, -0.5]);
        assert_eq!(gs.gene(1), Some(-0.5));
        assert_eq!(gs.gene(2), None);
    }

    #[test]
    fn set_gene_at_rejects_holes() {
        let mut gs = GeneticSystem::new(vec![1.0]);
        assert_eq!(
            gs.set_gene_at(3, 0.0),
            Err(GeneIndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(gs.len(), 1);
    }

    #[test]
    fn random_genes_within_unit_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let gs = GeneticSystem::random(200, &mut rng);
        assert_eq!(gs.len(), 200);
        assert!(gs.genes().iter().all(|g| (-1.0..=1.0).contains(g)));
    }
}
