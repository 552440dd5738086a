//! Position evaluation model for kibitz: feature encoding, the dual-head
//! network, and the [`Evaluate`] seam the explanation engine calls through.

mod device;
mod error;
mod evaluate;
pub mod features;
mod loader;
mod network;
mod topology;

pub use device::Device;
pub use error::ModelError;
pub use evaluate::{Evaluate, Evaluation, SquareScores};
pub use network::Network;
pub use topology::Topology;
