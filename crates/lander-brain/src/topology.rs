use serde::{Deserialize, Serialize};

use crate::BrainError;

/// Layer sizes of a fully connected feed-forward network.
///
/// A topology always has at least one hidden layer and no zero-sized layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TopologyParams")]
pub struct Topology {
    inputs: usize,
    hidden: Vec<usize>,
    outputs: usize,
}

#[derive(Debug, Deserialize)]
struct TopologyParams {
    inputs: usize,
    hidden: Vec<usize>,
    outputs: usize,
}

impl TryFrom<TopologyParams> for Topology {
    type Error = BrainError;

    fn try_from(params: TopologyParams) -> Result<Self, Self::Error> {
        Self::new(params.inputs, params.hidden, params.outputs)
    }
}

impl Topology {
    pub fn new(inputs: usize, hidden: Vec<usize>, outputs: usize) -> Result<Self, BrainError> {
        if hidden.is_empty() {
            return Err(BrainError::NoHiddenLayers);
        }
        if inputs == 0 || outputs == 0 || hidden.contains(&0) {
            return Err(BrainError::EmptyLayer);
        }
        Ok(Self {
            inputs,
            hidden,
            outputs,
        })
    }

    #[must_use]
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    #[must_use]
    pub fn hidden(&self) -> &[usize] {
        &self.hidden
    }

    #[must_use]
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Weight count (bias included) of each neuron in hidden layer `layer`.
    #[must_use]
    pub fn hidden_fan_in(&self, layer: usize) -> usize {
        let previous = match layer {
            0 => self.inputs,
            _ => self.hidden[layer - 1],
        };
        previous + 1
    }

    /// Weight count (bias included) of each output neuron.
    #[must_use]
    pub fn output_fan_in(&self) -> usize {
        // never empty, checked in `new`
        self.hidden[self.hidden.len() - 1] + 1
    }

    /// Total number of weights, which is also the length of a matching chromosome.
    ///
    /// `(inputs + 1) * h0 + (h0 + 1) * h1 + ... + (hn + 1) * outputs`
    ///
    /// ```
    /// # use lander_brain::Topology;
    /// let topology = Topology::new(7, vec![16, 8], 3).unwrap();
    /// assert_eq!(topology.gene_len(), 8 * 16 + 17 * 8 + 9 * 3);
    /// ```
    #[must_use]
    pub fn gene_len(&self) -> usize {
        let hidden = (0..self.hidden.len())
            .map(|layer| self.hidden_fan_in(layer) * self.hidden[layer])
            .sum::<usize>();
        hidden + self.output_fan_in() * self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_hidden_layers() {
        assert_eq!(Topology::new(7, vec![], 3), Err(BrainError::NoHiddenLayers));
    }

    #[test]
    fn rejects_zero_sized_layers() {
        assert_eq!(Topology::new(0, vec![4], 3), Err(BrainError::EmptyLayer));
        assert_eq!(Topology::new(7, vec![4, 0], 3), Err(BrainError::EmptyLayer));
        assert_eq!(Topology::new(7, vec![4], 0), Err(BrainError::EmptyLayer));
    }

    #[test]
    fn gene_len_of_deployed_topologies() {
        assert_eq!(Topology::new(2, vec![2], 1).unwrap().gene_len(), 9);
        assert_eq!(Topology::new(7, vec![16], 3).unwrap().gene_len(), 8 * 16 + 17 * 3);
        assert_eq!(
            Topology::new(7, vec![8, 8], 3).unwrap().gene_len(),
            8 * 8 + 9 * 8 + 9 * 3
        );
    }

    #[test]
    fn deserialization_validates() {
        let ok: Topology =
            serde_json::from_str(r#"{"inputs": 7, "hidden": [16, 8], "outputs": 3}"#).unwrap();
        assert_eq!(ok.hidden(), &[16, 8]);

        let err = serde_json::from_str::<Topology>(r#"{"inputs": 7, "hidden": [], "outputs": 3}"#);
        assert!(err.is_err());
    }
}
