//! One generation step: elitism, tournament selection, crossover and mutation.
//!
//! # Algorithm
//!
//! [`GeneticAlgorithm::evolve`] turns one [`Population`] into the next one of the same
//! size:
//!
//! 1. **Elitism** - Slot 0 receives a copy of the fittest chromosome, score included
//! 2. **Reproduction** - Every other slot receives a child of two tournament winners
//! 3. **Mutation** - Every gene of the non-elite slots mutates with `mutation_rate`
//!
//! ## Tournament Selection
//!
//! `tournament_size` slots are drawn uniformly with replacement and the fittest of the
//! draw wins, using the same tie rule as [`Population::fittest`] (later draw wins).
//!
//! ## Crossover and Mutation
//!
//! See [`genes::crossover`] and [`genes::mutate`].
//!
//! # Parameter Control
//!
//! The algorithm does not adapt its parameters. The controller raises
//! `mutation_rate` itself when almost no individual succeeds.

use rand::Rng;
use tracing::trace;

use crate::{EvolveError, GeneticSystem, Population, genes, population::fittest_of};

/// Number of fittest individuals carried over unchanged.
pub const ELITISM_OFFSET: usize = 1;

pub const DEFAULT_TOURNAMENT_SIZE: usize = 5;

pub const DEFAULT_MUTATION_RATE: f64 = 0.015;

/// Genetic algorithm parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticAlgorithm {
    /// Number of random draws per tournament (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Probability of mutating each gene of a non-elite child
    pub mutation_rate: f64,
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

impl GeneticAlgorithm {
    /// Breeds the next generation.
    ///
    /// The returned population has the same size and topology. Slot 0 keeps the
    /// fittest chromosome's genes and fitness; every other slot starts at fitness 0.
    ///
    /// # Arguments
    ///
    /// * `population` - Current generation with its accumulated fitness
    /// * `rng` - Random number generator for selection, crossover and mutation
    ///
    /// # Returns
    ///
    /// New population with the same size as the input
    ///
    /// # Errors
    ///
    /// Returns an error when these parameters fail [`GeneticAlgorithm::validate`]
    /// for the population's size.
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Result<Population, EvolveError>
    where
        R: Rng + ?Sized,
    {
        self.validate(population.size())?;

        let mut next = Vec::with_capacity(population.size());
        next.push(population.fittest().clone());

        while next.len() < population.size() {
            let parent1 = self.tournament_select(population, rng);
            let parent2 = self.tournament_select(population, rng);
            let child = genes::crossover(parent1.genes(), parent2.genes(), rng);
            next.push(GeneticSystem::new(child));
        }

        let mut next = Population::from_systems(population.topology().clone(), next)?;
        for system in &mut next.systems_mut()[ELITISM_OFFSET..] {
            genes::mutate(system.genes_mut(), self.mutation_rate, rng);
        }

        trace!(
            size = next.size(),
            elite_fitness = population.fittest().fitness(),
            mutation_rate = self.mutation_rate,
            "evolved population"
        );
        Ok(next)
    }

    /// Checks that these parameters can evolve a population of `population_size`.
    pub fn validate(&self, population_size: usize) -> Result<(), EvolveError> {
        if self.tournament_size == 0 {
            return Err(EvolveError::EmptyTournament);
        }
        if self.tournament_size > population_size {
            return Err(EvolveError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolveError::InvalidMutationRate {
                rate: self.mutation_rate,
            });
        }
        Ok(())
    }

    /// Selects a parent using tournament selection.
    ///
    /// Draws `tournament_size` individuals with replacement and returns the fittest
    /// of the draws (later draw wins a tie).
    ///
    /// # Panics
    ///
    /// Panics if `tournament_size` is 0.
    pub fn tournament_select<'a, R>(
        &self,
        population: &'a Population,
        rng: &mut R,
    ) -> &'a GeneticSystem
    where
        R: Rng + ?Sized,
    {
        let systems = population.systems();
        let draws = (0..self.tournament_size).map(|_| {
            let index = rng.random_range(0..systems.len());
            (index, &systems[index])
        });
        fittest_of(draws).1
    }
}
