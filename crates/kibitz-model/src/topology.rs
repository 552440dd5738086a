//! Network hyperparameters.

use kibitz_core::{Piece, Square};

use crate::error::ModelError;
use crate::features::FEATURE_COUNT;

/// Shape of the dual-head network.
///
/// The hidden sizes must match the topology the weights were trained with;
/// loading fails on any mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    /// First trunk layer width.
    pub h1: usize,
    /// Second trunk layer width.
    pub h2: usize,
    /// Third trunk layer width, shared by both heads.
    pub h3: usize,
    /// Hidden width of the global-score head.
    pub h_global: usize,
    /// Training-time dropout rate. Inference never applies it.
    pub dropout: f32,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            h1: 512,
            h2: 256,
            h3: 128,
            h_global: 128,
            dropout: 0.1,
        }
    }
}

impl Topology {
    /// Check that every layer is non-empty and the dropout rate is in `[0, 1)`.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (layer, width) in [
            ("h1", self.h1),
            ("h2", self.h2),
            ("h3", self.h3),
            ("h_global", self.h_global),
        ] {
            if width == 0 {
                return Err(ModelError::EmptyLayer { layer });
            }
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ModelError::InvalidDropout {
                value: self.dropout,
            });
        }
        Ok(())
    }

    /// Shapes of every dense layer, in file order: the three trunk layers,
    /// the square head, then the two global-head layers.
    pub(crate) fn layer_shapes(&self) -> [LayerShape; 6] {
        let squares = Square::COUNT * Piece::COUNT;
        [
            LayerShape::new("w1", "b1", self.h1, FEATURE_COUNT),
            LayerShape::new("w2", "b2", self.h2, self.h1),
            LayerShape::new("w3", "b3", self.h3, self.h2),
            LayerShape::new("w_square", "b_square", squares, self.h3),
            LayerShape::new("w_global1", "b_global1", self.h_global, self.h3),
            LayerShape::new("w_global2", "b_global2", 1, self.h_global),
        ]
    }
}

/// Stored shape of one dense layer.
///
/// The weight matrix is `outputs x inputs`; the bias is `outputs x 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LayerShape {
    pub(crate) weight: &'static str,
    pub(crate) bias: &'static str,
    pub(crate) outputs: usize,
    pub(crate) inputs: usize,
}

impl LayerShape {
    const fn new(weight: &'static str, bias: &'static str, outputs: usize, inputs: usize) -> Self {
        Self {
            weight,
            bias,
            outputs,
            inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Topology;
    use crate::error::ModelError;

    #[test]
    fn default_validates() {
        Topology::default().validate().unwrap();
    }

    #[test]
    fn rejects_empty_layer() {
        let topology = Topology {
            h2: 0,
            ..Topology::default()
        };
        assert!(matches!(
            topology.validate(),
            Err(ModelError::EmptyLayer { layer: "h2" })
        ));
    }

    #[test]
    fn rejects_dropout_out_of_range() {
        for dropout in [-0.1, 1.0, 1.5] {
            let topology = Topology {
                dropout,
                ..Topology::default()
            };
            assert!(matches!(
                topology.validate(),
                Err(ModelError::InvalidDropout { .. })
            ));
        }
    }

    #[test]
    fn layer_shapes_chain() {
        let shapes = Topology::default().layer_shapes();
        assert_eq!((shapes[0].outputs, shapes[0].inputs), (512, 781));
        assert_eq!((shapes[3].outputs, shapes[3].inputs), (768, 128));
        assert_eq!((shapes[5].outputs, shapes[5].inputs), (1, 128));
        for pair in shapes.windows(2).take(3) {
            assert_eq!(pair[0].outputs, pair[1].inputs);
        }
    }
}
