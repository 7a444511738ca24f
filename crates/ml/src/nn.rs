use serde::{Deserialize, Serialize};

use crate::policy::{Observation, Policy, PolicyError};

/// A fully connected neural network layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dense {
    /// Row-major weight matrix, `out_dim` rows of `in_dim` columns.
    pub w: Vec<f32>,
    /// The bias vector for the layer.
    pub b: Vec<f32>,
    /// The number of input dimensions.
    pub in_dim: usize,
    /// The number of output dimensions.
    pub out_dim: usize,
}

impl Dense {
    /// Creates a new `Dense` layer with the given weights and biases.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lengths do not match the dimensions.
    #[must_use]
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_d: usize, out_d: usize) -> Self {
        assert_eq!(weights.len(), in_d * out_d);
        assert_eq!(bias.len(), out_d);
        Self {
            w: weights,
            b: bias,
            in_dim: in_d,
            out_dim: out_d,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn random(in_d: usize, out_d: usize, rng: &mut fastrand::Rng) -> Self {
        // Glorot initialization
        let limit = (6.0 / (in_d + out_d) as f32).sqrt();
        let weights = (0..in_d * out_d)
            .map(|_| rng.f32() * 2.0 * limit - limit)
            .collect();
        let bias = (0..out_d).map(|_| rng.f32() * 2.0 - 1.0).collect();
        Self::new(weights, bias, in_d, out_d)
    }

    /// `W x + b`.
    #[must_use]
    pub fn forward(&self, x: &[f32]) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.in_dim);
        self.w
            .chunks_exact(self.in_dim.max(1))
            .zip(&self.b)
            .map(|(row, bias)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>() + bias)
            .collect()
    }
}

/// Stack of dense layers with a tanh after every layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedForward {
    pub layers: Vec<Dense>,
}

impl FeedForward {
    /// # Panics
    ///
    /// Panics if consecutive layer dimensions do not line up.
    #[must_use]
    pub fn new(layers: Vec<Dense>) -> Self {
        for pair in layers.windows(2) {
            assert_eq!(pair[0].out_dim, pair[1].in_dim, "layer dimensions must chain");
        }
        Self { layers }
    }

    /// Random network with the given layer widths, e.g. `[3, 1]` or
    /// `[3, 4, 1]`.
    #[must_use]
    pub fn random(widths: &[usize], rng: &mut fastrand::Rng) -> Self {
        let layers = widths
            .windows(2)
            .map(|w| Dense::random(w[0], w[1], rng))
            .collect();
        Self::new(layers)
    }

    #[must_use]
    pub fn in_dim(&self) -> usize {
        self.layers.first().map_or(0, |l| l.in_dim)
    }

    #[must_use]
    pub fn forward(&self, x: &[f32]) -> Vec<f32> {
        self.layers.iter().fold(x.to_vec(), |acc, layer| {
            layer.forward(&acc).into_iter().map(f32::tanh).collect()
        })
    }
}

impl Policy for FeedForward {
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError> {
        let input = observation.as_array();
        if self.in_dim() != input.len() {
            return Err(PolicyError::Failed(format!(
                "network expects {} inputs, observation has {}",
                self.in_dim(),
                input.len()
            )));
        }
        Ok(self.forward(&input))
    }
}
