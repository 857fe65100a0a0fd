use lander_brain::Topology;
use rand::Rng;

use crate::{GeneticSystem, PopulationError};

/// A fixed-size, ordered set of chromosomes sharing one network topology.
///
/// The index of a chromosome is its slot. The controller keeps slot `i` bound to the
/// same ship across generations; the population itself only guarantees that every
/// member has [`Topology::gene_len`] genes.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    topology: Topology,
    systems: Vec<GeneticSystem>,
}

impl Population {
    /// Creates a population of `size` random chromosomes (generation 0).
    ///
    /// # Arguments
    ///
    /// * `topology` - Network shape; defines the chromosome length
    /// * `size` - Number of individuals, one per ship
    /// * `rng` - Random number generator
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::Empty`] when `size` is 0.
    pub fn random<R>(topology: Topology, size: usize, rng: &mut R) -> Result<Self, PopulationError>
    where
        R: Rng + ?Sized,
    {
        if size == 0 {
            return Err(PopulationError::Empty);
        }
        let gene_len = topology.gene_len();
        let systems = (0..size)
            .map(|_| GeneticSystem::random(gene_len, rng))
            .collect();
        Ok(Self { topology, systems })
    }

    /// Assembles a population from existing chromosomes.
    ///
    /// Fails when `systems` is empty or any chromosome's length differs from
    /// [`Topology::gene_len`].
    pub fn from_systems(
        topology: Topology,
        systems: Vec<GeneticSystem>,
    ) -> Result<Self, PopulationError> {
        if systems.is_empty() {
            return Err(PopulationError::Empty);
        }
        let expected = topology.gene_len();
        if let Some((index, gs)) = systems.iter().enumerate().find(|(_, gs)| gs.len() != expected) {
            return Err(PopulationError::GeneLengthMismatch {
                index,
                expected,
                actual: gs.len(),
            });
        }
        Ok(Self { topology, systems })
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Length of every chromosome in this population.
    #[must_use]
    pub fn gene_len(&self) -> usize {
        self.topology.gene_len()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn genetic_system(&self, index: usize) -> Option<&GeneticSystem> {
        self.systems.get(index)
    }

    pub fn genetic_system_mut(&mut self, index: usize) -> Option<&mut GeneticSystem> {
        self.systems.get_mut(index)
    }

    /// Replaces the chromosome in slot `index`.
    pub fn set_genetic_system(
        &mut self,
        index: usize,
        system: GeneticSystem,
    ) -> Result<(), PopulationError> {
        let size = self.systems.len();
        let expected = self.gene_len();
        if system.len() != expected {
            return Err(PopulationError::GeneLengthMismatch {
                index,
                expected,
                actual: system.len(),
            });
        }
        let slot = self
            .systems
            .get_mut(index)
            .ok_or(PopulationError::IndexOutOfRange { index, size })?;
        *slot = system;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneticSystem> {
        self.systems.iter()
    }

    pub(crate) fn systems(&self) -> &[GeneticSystem] {
        &self.systems
    }

    pub(crate) fn systems_mut(&mut self) -> &mut [GeneticSystem] {
        &mut self.systems
    }

    /// Slot of the fittest chromosome. Ties go to the later slot.
    #[must_use]
    pub fn fittest_index(&self) -> usize {
        fittest_of(self.systems.iter().enumerate()).0
    }

    /// The fittest chromosome. Ties go to the later slot.
    #[must_use]
    pub fn fittest(&self) -> &GeneticSystem {
        &self.systems[self.fittest_index()]
    }

    /// Resets the fitness of every chromosome to 0.
    pub fn reset_scores(&mut self) {
        self.systems.iter_mut().for_each(GeneticSystem::reset_score);
    }
}

/// Linear scan keeping the last candidate whose fitness is `>=` the current best.
///
/// # Panics
///
/// Panics if `candidates` is empty.
pub(crate) fn fittest_of<'a, T, I>(candidates: I) -> (T, &'a GeneticSystem)
where
    I: IntoIterator<Item = (T, &'a GeneticSystem)>,
{
    let mut candidates = candidates.into_iter();
    let first = candidates.next().expect("no candidates to pick from");
    candidates.fold(first, |best, candidate| {
        if best.1.fitness() <= candidate.1.fitness() {
            candidate
        } else {
            best
        }
    })
}
