//! Dual-head dense network and forward pass.

use kibitz_core::Position;

use crate::evaluate::{Evaluate, Evaluation, SquareScores};
use crate::features::{self, FEATURE_COUNT};
use crate::loader::Tensor;
use crate::topology::Topology;

/// Fully connected layer `y = Wx + b`.
pub(crate) struct Dense {
    inputs: usize,
    /// Row-major `outputs x inputs` weight matrix.
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl Dense {
    /// Build a layer from a stored weight matrix and bias column.
    pub(crate) fn new(weights: Tensor, bias: Tensor) -> Self {
        debug_assert_eq!(weights.rows, bias.rows);
        debug_assert_eq!(bias.cols, 1);
        Self {
            inputs: weights.cols,
            weights: weights.data,
            bias: bias.data,
        }
    }

    fn forward(&self, x: &[f32]) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.inputs);
        self.weights
            .chunks_exact(self.inputs)
            .zip(&self.bias)
            .map(|(row, &b)| b + row.iter().zip(x).map(|(&w, &v)| w * v).sum::<f32>())
            .collect()
    }

    fn forward_relu(&self, x: &[f32]) -> Vec<f32> {
        let mut out = self.forward(x);
        for v in &mut out {
            *v = v.max(0.0);
        }
        out
    }
}

/// Position evaluation network.
///
/// A three-layer ReLU trunk over the [`features`] vector feeds two heads:
/// a linear square head producing a 64 x 12 score matrix, and a global head
/// (`h3 -> h_global -> 1`) producing the scalar evaluation.
pub struct Network {
    pub(crate) topology: Topology,
    pub(crate) trunk: [Dense; 3],
    pub(crate) square_head: Dense,
    pub(crate) global_hidden: Dense,
    pub(crate) global_out: Dense,
}

impl Network {
    /// Return the topology the network was loaded with.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Run the forward pass on a pre-encoded feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `features` is not [`FEATURE_COUNT`] long.
    pub fn forward(&self, features: &[f32]) -> Evaluation {
        assert_eq!(
            features.len(),
            FEATURE_COUNT,
            "expected {FEATURE_COUNT} features, got {}",
            features.len()
        );

        let hidden = self
            .trunk
            .iter()
            .fold(features.to_vec(), |x, layer| layer.forward_relu(&x));

        let squares = SquareScores::from_flat(&self.square_head.forward(&hidden))
            .unwrap_or_else(SquareScores::zeros);
        let global_hidden = self.global_hidden.forward_relu(&hidden);
        let global = self.global_out.forward(&global_hidden)[0];

        Evaluation { global, squares }
    }
}

impl Evaluate for Network {
    fn evaluate(&self, position: &Position) -> Evaluation {
        self.forward(&features::encode(position))
    }
}
