//! Weights file reader.
//!
//! Binary layout (little-endian): a sequence of tensors, each stored as
//! `rows: i32`, `cols: i32`, then `rows * cols` `f32` values in row-major
//! order. Tensors appear in the order given by the topology, and nothing
//! may follow the last one.

use std::path::Path;

use tracing::{debug, info};

use crate::error::ModelError;
use crate::network::{Dense, Network};
use crate::topology::{LayerShape, Topology};

/// One stored matrix.
pub(crate) struct Tensor {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<f32>,
}

/// Cursor over the raw bytes of a weights file.
struct TensorReader<'a> {
    bytes: &'a [u8],
}

impl<'a> TensorReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, tensor: &'static str, needed: usize) -> Result<&'a [u8], ModelError> {
        if self.bytes.len() < needed {
            return Err(ModelError::Truncated {
                tensor,
                needed,
                remaining: self.bytes.len(),
            });
        }
        let (head, tail) = self.bytes.split_at(needed);
        self.bytes = tail;
        Ok(head)
    }

    fn read_i32(&mut self, tensor: &'static str) -> Result<i32, ModelError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(tensor, 4)?);
        Ok(i32::from_le_bytes(buf))
    }

    /// Read the next tensor and check it against the expected shape.
    fn read_tensor(
        &mut self,
        tensor: &'static str,
        expected: (usize, usize),
    ) -> Result<Tensor, ModelError> {
        let rows = self.read_i32(tensor)?;
        let cols = self.read_i32(tensor)?;
        let (Ok(rows_u), Ok(cols_u)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(ModelError::InvalidDimensions { tensor, rows, cols });
        };
        if (rows_u, cols_u) != expected {
            return Err(ModelError::ShapeMismatch {
                tensor,
                expected,
                found: (rows_u, cols_u),
            });
        }

        let raw = self.take(tensor, rows_u * cols_u * 4)?;
        let data = raw
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        debug!(tensor, rows = rows_u, cols = cols_u, "read tensor");

        Ok(Tensor {
            rows: rows_u,
            cols: cols_u,
            data,
        })
    }

    fn finish(self) -> Result<(), ModelError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(ModelError::TrailingBytes {
                count: self.bytes.len(),
            })
        }
    }
}

impl Network {
    /// Load a network from a weights file, checking it against `topology`.
    pub fn load(path: impl AsRef<Path>, topology: Topology) -> Result<Network, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network = Network::from_bytes(&bytes, topology)?;
        info!(
            path = %path.display(),
            h1 = topology.h1,
            h2 = topology.h2,
            h3 = topology.h3,
            h_global = topology.h_global,
            "loaded network weights"
        );
        Ok(network)
    }

    /// Build a network from the raw contents of a weights file.
    pub fn from_bytes(bytes: &[u8], topology: Topology) -> Result<Network, ModelError> {
        topology.validate()?;

        let mut reader = TensorReader::new(bytes);
        let mut read_layer = |shape: LayerShape| -> Result<Dense, ModelError> {
            let weights = reader.read_tensor(shape.weight, (shape.outputs, shape.inputs))?;
            let bias = reader.read_tensor(shape.bias, (shape.outputs, 1))?;
            Ok(Dense::new(weights, bias))
        };

        let [s1, s2, s3, square, global1, global2] = topology.layer_shapes();
        let network = Network {
            topology,
            trunk: [read_layer(s1)?, read_layer(s2)?, read_layer(s3)?],
            square_head: read_layer(square)?,
            global_hidden: read_layer(global1)?,
            global_out: read_layer(global2)?,
        };
        reader.finish()?;

        Ok(network)
    }
}
