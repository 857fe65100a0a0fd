use rand::Rng;

use crate::{BrainError, Neuron, Topology};

/// A fully connected feed-forward network of sigmoid [`Neuron`]s.
///
/// Networks are never trained in place. Each generation builds fresh networks from
/// the evolved chromosomes with [`NeuralNetwork::from_genes`].
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    topology: Topology,
    hidden: Vec<Vec<Neuron>>,
    outputs: Vec<Neuron>,
}

impl NeuralNetwork {
    /// Creates a network with every weight drawn uniformly from `[-1, 1]`.
    pub fn random<R>(topology: Topology, rng: &mut R) -> Result<Self, BrainError>
    where
        R: Rng + ?Sized,
    {
        let hidden = (0..topology.hidden().len())
            .map(|layer| {
                (0..topology.hidden()[layer])
                    .map(|_| Neuron::random(topology.hidden_fan_in(layer), rng))
                    .collect()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = (0..topology.outputs())
            .map(|_| Neuron::random(topology.output_fan_in(), rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            topology,
            hidden,
            outputs,
        })
    }

    /// Creates a network by slicing `genes` in canonical order.
    ///
    /// The gene count must match [`Topology::gene_len`] exactly.
    pub fn from_genes(topology: Topology, genes: &[f64]) -> Result<Self, BrainError> {
        let expected = topology.gene_len();
        if genes.len() != expected {
            return Err(BrainError::GeneCountMismatch {
                expected,
                actual: genes.len(),
            });
        }

        let mut cursor = 0;
        let mut next_neuron = |weight_count: usize| {
            let neuron = Neuron::from_genes(weight_count, genes, cursor)?;
            cursor += weight_count;
            Ok::<_, BrainError>(neuron)
        };

        let mut hidden = Vec::with_capacity(topology.hidden().len());
        for (layer, &size) in topology.hidden().iter().enumerate() {
            let fan_in = topology.hidden_fan_in(layer);
            hidden.push(
                (0..size)
                    .map(|_| next_neuron(fan_in))
                    .collect::<Result<Vec<_>, _>>()?,
            );
        }
        let outputs = (0..topology.outputs())
            .map(|_| next_neuron(topology.output_fan_in()))
            .collect::<Result<Vec<_>, _>>()?;
        debug_assert_eq!(cursor, expected);

        Ok(Self {
            topology,
            hidden,
            outputs,
        })
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Forward-propagates `inputs` and returns one value per output neuron.
    ///
    /// Every neuron is cleared first, so repeated calls with the same input give the
    /// same result.
    pub fn evaluate(&mut self, inputs: &[f64]) -> Result<Vec<f64>, BrainError> {
        if inputs.len() != self.topology.inputs() {
            return Err(BrainError::InputSizeMismatch {
                expected: self.topology.inputs(),
                actual: inputs.len(),
            });
        }
        self.neurons_mut().for_each(Neuron::clear);

        let mut signal = inputs.to_vec();
        for layer in &mut self.hidden {
            signal = layer
                .iter_mut()
                .map(|neuron| neuron.evaluate(&signal))
                .collect::<Result<_, _>>()?;
        }
        self.outputs
            .iter_mut()
            .map(|neuron| neuron.evaluate(&signal))
            .collect()
    }

    /// Flattens every weight into a gene vector, in canonical order.
    #[must_use]
    pub fn genes(&self) -> Vec<f64> {
        let mut genes = Vec::with_capacity(self.topology.gene_len());
        for neuron in self.neurons() {
            genes.extend_from_slice(neuron.weights());
        }
        genes
    }

    fn neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.hidden.iter().flatten().chain(&self.outputs)
    }

    fn neurons_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.hidden.iter_mut().flatten().chain(&mut self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sigmoid;

    fn small_topology() -> Topology {
        Topology::new(2, vec![2], 1).unwrap()
    }

    #[test]
    fn genes_roundtrip() {
        let genes = vec![0.1, -0.2, 0.3, 0.4, 0.5, -0.6, 0.7, 0.8, -0.9];
        let network = NeuralNetwork::from_genes(small_topology(), &genes).unwrap();
        let read_back = network.genes();
        assert_eq!(read_back.len(), 9);
        assert_eq!(read_back, genes);
    }

    #[test]
    fn random_network_roundtrips_through_genes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let topology = Topology::new(7, vec![16, 8], 3).unwrap();
        let network = NeuralNetwork::random(topology.clone(), &mut rng).unwrap();
        let genes = network.genes();
        assert_eq!(genes.len(), topology.gene_len());
        assert_eq!(NeuralNetwork::from_genes(topology, &genes).unwrap(), network);
    }

    #[test]
    fn rejects_gene_count_mismatch() {
        assert_eq!(
            NeuralNetwork::from_genes(small_topology(), &[0.0; 8]),
            Err(BrainError::GeneCountMismatch {
                expected: 9,
                actual: 8,
            })
        );
        assert_eq!(
            NeuralNetwork::from_genes(small_topology(), &[0.0; 10]),
            Err(BrainError::GeneCountMismatch {
                expected: 9,
                actual: 10,
            })
        );
    }

    #[test]
    fn evaluate_forward_propagates_layer_by_layer() {
        // hidden 0: w = [1, 0], b = 0; hidden 1: w = [0, 1], b = 0; output: w = [1, 1], b = -1
        let genes = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, -1.0];
        let mut network = NeuralNetwork::from_genes(small_topology(), &genes).unwrap();
        let out = network.evaluate(&[2.0, -3.0]).unwrap();
        let expected = sigmoid(sigmoid(2.0) + sigmoid(-3.0) - 1.0);
        assert_eq!(out, vec![expected]);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let mut rng = Pcg32::seed_from_u64(5);
        let topology = Topology::new(7, vec![16], 3).unwrap();
        let mut network = NeuralNetwork::random(topology, &mut rng).unwrap();
        let a = [0.1, 1.0, 0.4, 0.0, 0.2, 1.0, 0.9];
        let b = [0.7, 0.0, 0.1, 1.0, 0.5, 0.0, 0.3];

        let first = network.evaluate(&a).unwrap();
        let other = network.evaluate(&b).unwrap();
        let again = network.evaluate(&a).unwrap();
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert!(first.iter().all(|v| *v > 0.0 && *v < 1.0));
    }

    #[test]
    fn rejects_wrong_input_size() {
        let mut network = NeuralNetwork::from_genes(small_topology(), &[0.0; 9]).unwrap();
        assert_eq!(
            network.evaluate(&[1.0, 2.0, 3.0]),
            Err(BrainError::InputSizeMismatch {
                expected: 2,
                actual: 3,
            })
        );
    }
}
