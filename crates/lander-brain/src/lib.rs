//! Feed-forward sigmoid networks used to pilot a lander.
//!
//! A network is a fixed [`Topology`] of [`Neuron`]s. Every weight of every neuron maps
//! to exactly one gene, so a network can be rebuilt from a flat gene vector and read
//! back into one in the same canonical order:
//!
//! 1. hidden layers, first to last
//! 2. neurons within a layer, in order
//! 3. weights within a neuron, input weights first and bias last
//! 4. output neurons, in the same per-neuron order
//!
//! # Example
//!
//! ```
//! use lander_brain::{NeuralNetwork, Topology};
//!
//! let topology = Topology::new(2, vec![2], 1).unwrap();
//! assert_eq!(topology.gene_len(), 9);
//!
//! let genes = vec![0.1, -0.2, 0.3, 0.4, 0.5, -0.6, 0.7, 0.8, -0.9];
//! let mut network = NeuralNetwork::from_genes(topology, &genes).unwrap();
//! let output = network.evaluate(&[1.0, 0.0]).unwrap();
//! assert_eq!(output.len(), 1);
//! assert_eq!(network.genes(), genes);
//! ```

pub use self::{network::*, neuron::*, topology::*};

pub mod network;
pub mod neuron;
pub mod topology;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BrainError {
    #[display("network topology needs at least one hidden layer")]
    NoHiddenLayers,
    #[display("network topology contains a zero-sized layer")]
    EmptyLayer,
    #[display("expected {expected} genes for this topology, got {actual}")]
    GeneCountMismatch { expected: usize, actual: usize },
    #[display("gene slice too short: need {needed} genes from offset {offset}, have {available}")]
    GeneSliceTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[display("a neuron needs at least its bias weight")]
    MissingBias,
    #[display("expected {expected} inputs, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[display("weight index {index} out of range for a neuron with {len} weights")]
    WeightIndexOutOfRange { index: usize, len: usize },
}
