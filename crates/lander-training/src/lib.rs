//! Evolutionary search over lander network weights.
//!
//! The autopilot is never trained by gradient descent. Instead a [`Population`] of
//! chromosomes ([`GeneticSystem`]s) is scored while flying, and at every generation
//! boundary a [`GeneticAlgorithm`] breeds the next population from it.
//!
//! # How a Generation Works
//!
//! 1. **Score** - The controller adds rewards and penalties to each chromosome
//! 2. **Elitism** - The single fittest chromosome is copied unchanged into slot 0
//! 3. **Tournament Selection** - Each parent is the best of a few random draws
//! 4. **Crossover** - Two cut points pick which parent supplies each gene
//! 5. **Mutation** - Selected genes are averaged with a fresh random value
//! 6. **Rebuild** - Networks are rebuilt from the new chromosomes
//!
//! # Architecture
//!
//! ```text
//! Population (chromosomes + fitness)
//!     ↓ evolve
//! GeneticAlgorithm (elitism, tournament, crossover, mutation)
//!     ↓ produces
//! Population (next generation, fitness 0)
//!     ↓ decoded by
//! NeuralNetwork::from_genes (lander-brain)
//! ```
//!
//! See the [`genetic_algorithm`] module for the exact operators and the [`genes`]
//! module for the gene-level building blocks.

pub use self::{genetic_algorithm::*, genetic_system::*, population::*};

pub mod genes;
pub mod genetic_algorithm;
pub mod genetic_system;
pub mod population;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("gene index {index} out of range for a chromosome of length {len}")]
pub struct GeneIndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PopulationError {
    #[display("population must contain at least one individual")]
    Empty,
    #[display("individual {index} has {actual} genes, topology needs {expected}")]
    GeneLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[display("individual index {index} out of range for a population of {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolveError {
    #[display("tournament size must be at least 1")]
    EmptyTournament,
    #[display("tournament size {tournament_size} exceeds population size {population_size}")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },
    #[display("mutation rate {rate} is outside [0, 1]")]
    InvalidMutationRate { rate: f64 },
    #[display("failed to assemble next generation: {_0}")]
    #[from]
    Population(PopulationError),
}
