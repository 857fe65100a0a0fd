use rand::Rng;

use crate::BrainError;

/// Logistic activation, `1 / (1 + e^-x)`.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A single sigmoid unit.
///
/// The last weight is the bias and is added unweighted. The output is memoized
/// between two calls to [`Neuron::clear`]; changing a weight does not invalidate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    output: Option<f64>,
}

impl Neuron {
    /// Creates a neuron with `weight_count` weights drawn uniformly from `[-1, 1]`.
    ///
    /// Fails with [`BrainError::MissingBias`] when `weight_count` is 0.
    pub fn random<R>(weight_count: usize, rng: &mut R) -> Result<Self, BrainError>
    where
        R: Rng + ?Sized,
    {
        if weight_count == 0 {
            return Err(BrainError::MissingBias);
        }
        let weights = (0..weight_count)
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Ok(Self {
            weights,
            output: None,
        })
    }

    /// Creates a neuron whose weights are `genes[offset..offset + weight_count]`.
    pub fn from_genes(weight_count: usize, genes: &[f64], offset: usize) -> Result<Self, BrainError> {
        if weight_count == 0 {
            return Err(BrainError::MissingBias);
        }
        let weights = genes
            .get(offset..offset + weight_count)
            .ok_or(BrainError::GeneSliceTooShort {
                offset,
                needed: weight_count,
                available: genes.len(),
            })?
            .to_vec();
        Ok(Self {
            weights,
            output: None,
        })
    }

    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of inputs, i.e. weights excluding the bias.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.weights.len() - 1
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, index: usize) -> Result<f64, BrainError> {
        self.weights
            .get(index)
            .copied()
            .ok_or(BrainError::WeightIndexOutOfRange {
                index,
                len: self.weights.len(),
            })
    }

    pub fn set_weight(&mut self, index: usize, value: f64) -> Result<(), BrainError> {
        let len = self.weights.len();
        let weight = self
            .weights
            .get_mut(index)
            .ok_or(BrainError::WeightIndexOutOfRange { index, len })?;
        *weight = value;
        Ok(())
    }

    /// Memoized output of the last evaluation, if any.
    #[must_use]
    pub fn output(&self) -> Option<f64> {
        self.output
    }

    /// Computes `sigmoid(sum(inputs[i] * w[i]) + bias)`, or returns the memoized value.
    pub fn evaluate(&mut self, inputs: &[f64]) -> Result<f64, BrainError> {
        if inputs.len() != self.input_count() {
            return Err(BrainError::InputSizeMismatch {
                expected: self.input_count(),
                actual: inputs.len(),
            });
        }
        if let Some(output) = self.output {
            return Ok(output);
        }

        let (weights, bias) = self.weights.split_at(self.input_count());
        let x = inputs.iter().zip(weights).map(|(i, w)| i * w).sum::<f64>() + bias[0];
        let output = sigmoid(x);
        self.output = Some(output);
        Ok(output)
    }

    /// Forgets the memoized output so the next [`Neuron::evaluate`] recomputes it.
    pub fn clear(&mut self) {
        self.output = None;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn sigmoid_stays_in_open_unit_interval() {
        for i in -300..=300 {
            let x = f64::from(i) / 10.0;
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
        }
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn evaluate_adds_bias_unweighted() {
        let mut neuron = Neuron::from_genes(3, &[0.5, -1.0, 0.25], 0).unwrap();
        let out = neuron.evaluate(&[2.0, 1.0]).unwrap();
        assert_eq!(out, sigmoid(0.5 * 2.0 - 1.0 + 0.25));
    }

    #[test]
    fn random_weights_within_unit_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let neuron = Neuron::random(64, &mut rng).unwrap();
        assert_eq!(neuron.weight_count(), 64);
        assert!(neuron.weights().iter().all(|w| (-1.0..=1.0).contains(w)));
    }

    #[test]
    fn evaluate_output_in_open_unit_interval() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let mut neuron = Neuron::random(4, &mut rng).unwrap();
            let inputs = [
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            ];
            let out = neuron.evaluate(&inputs).unwrap();
            assert!(out > 0.0 && out < 1.0);
        }
    }

    #[test]
    fn output_is_memoized_until_cleared() {
        let mut neuron = Neuron::from_genes(2, &[1.0, 0.0], 0).unwrap();
        let first = neuron.evaluate(&[1.0]).unwrap();

        neuron.set_weight(0, -3.0).unwrap();
        assert_eq!(neuron.evaluate(&[1.0]).unwrap(), first);
        assert_eq!(neuron.evaluate(&[42.0]).unwrap(), first);

        neuron.clear();
        assert_eq!(neuron.output(), None);
        assert_eq!(neuron.evaluate(&[1.0]).unwrap(), sigmoid(-3.0));
    }

    #[test]
    fn neuron_without_bias_is_rejected() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(Neuron::random(0, &mut rng), Err(BrainError::MissingBias));
        assert_eq!(Neuron::from_genes(0, &[1.0], 0), Err(BrainError::MissingBias));
    }

    #[test]
    fn from_genes_reads_at_offset() {
        let genes = [9.0, 9.0, 1.0, 2.0, 3.0];
        let neuron = Neuron::from_genes(3, &genes, 2).unwrap();
        assert_eq!(neuron.weights(), &[1.0, 2.0, 3.0]);

        assert_eq!(
            Neuron::from_genes(3, &genes, 3),
            Err(BrainError::GeneSliceTooShort {
                offset: 3,
                needed: 3,
                available: 5,
            })
        );
    }

    #[test]
    fn weight_access_is_bounds_checked() {
        let mut neuron = Neuron::from_genes(2, &[0.1, 0.2], 0).unwrap();
        assert_eq!(neuron.weight(1), Ok(0.2));
        assert_eq!(
            neuron.weight(2),
            Err(BrainError::WeightIndexOutOfRange { index: 2, len: 2 })
        );
        assert!(neuron.set_weight(5, 1.0).is_err());
    }

    #[test]
    fn rejects_wrong_input_length() {
        let mut neuron = Neuron::from_genes(3, &[0.1, 0.2, 0.3], 0).unwrap();
        assert_eq!(
            neuron.evaluate(&[1.0]),
            Err(BrainError::InputSizeMismatch {
                expected: 2,
                actual: 1,
            })
        );
    }
}
