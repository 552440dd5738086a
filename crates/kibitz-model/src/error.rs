//! Model loading and configuration errors.

use std::path::PathBuf;

/// Errors that can occur while configuring or loading the network.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The weights file could not be read.
    #[error("failed to read weights from {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The weights ended before a tensor was complete.
    #[error("weights truncated in tensor {tensor}: needed {needed} bytes, {remaining} left")]
    Truncated {
        /// Name of the tensor being read.
        tensor: &'static str,
        /// Bytes required to finish the current read.
        needed: usize,
        /// Bytes remaining in the input.
        remaining: usize,
    },

    /// A tensor header declares a negative dimension.
    #[error("tensor {tensor} has invalid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Name of the tensor.
        tensor: &'static str,
        /// Declared row count.
        rows: i32,
        /// Declared column count.
        cols: i32,
    },

    /// A tensor's stored shape does not match the requested topology.
    #[error(
        "tensor {tensor} has shape {}x{}, topology expects {}x{}",
        found.0, found.1, expected.0, expected.1
    )]
    ShapeMismatch {
        /// Name of the tensor.
        tensor: &'static str,
        /// Shape implied by the topology.
        expected: (usize, usize),
        /// Shape stored in the file.
        found: (usize, usize),
    },

    /// Bytes remain after the last tensor.
    #[error("{count} unexpected trailing bytes after the last tensor")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// A hidden layer was configured with zero units.
    #[error("hidden layer {layer} must have at least one unit")]
    EmptyLayer {
        /// Name of the offending layer option.
        layer: &'static str,
    },

    /// The dropout rate is outside `[0, 1)`.
    #[error("dropout must be in [0, 1), got {value}")]
    InvalidDropout {
        /// The configured rate.
        value: f32,
    },

    /// The requested device has no backend in this build.
    #[error("device {device} is not available in this build")]
    DeviceUnavailable {
        /// The requested device name.
        device: String,
    },

    /// A device name could not be parsed.
    #[error("unknown device \"{found}\", expected auto, cpu, or accelerator")]
    UnknownDevice {
        /// The unrecognised name.
        found: String,
    },
}
