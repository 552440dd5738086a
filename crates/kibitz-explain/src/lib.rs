//! Attribution and counterfactual analysis of a position evaluator.
//!
//! Given an [`Evaluate`](kibitz_model::Evaluate) implementation and a
//! position, [`explain`] attributes the global score to occupied squares,
//! optionally measures the effect of removing each non-king piece, and
//! returns a [`Report`] that renders as plain text.

pub mod attribution;
pub mod config;
pub mod counterfactual;
mod error;
pub mod nominal;
mod pipeline;
pub mod report;

pub use attribution::{Adjustments, Attribution, AttributionRow};
pub use config::{ExplainConfig, GridMode};
pub use counterfactual::{CounterfactualRow, Counterfactuals};
pub use error::ExplainError;
pub use nominal::PieceValues;
pub use pipeline::explain;
pub use report::Report;
