//! The explanation pipeline: resolve values, extract, analyse, report.

use kibitz_core::Position;
use kibitz_model::Evaluate;
use tracing::{debug, info};

use crate::attribution::Attribution;
use crate::config::ExplainConfig;
use crate::counterfactual::Counterfactuals;
use crate::error::ExplainError;
use crate::nominal::PieceValues;
use crate::report::Report;

/// Explain the evaluation of `position`.
///
/// Evaluates the position once, attributes the global score to squares,
/// and, only when `config` asks for deltas, evaluates one derived position
/// per non-king piece.
pub fn explain<E: Evaluate + ?Sized>(
    evaluator: &E,
    position: &Position,
    config: &ExplainConfig,
) -> Result<Report, ExplainError> {
    let values = PieceValues::resolve(&config.piece_values)?;
    debug!(?values, "resolved piece values");

    let evaluation = evaluator.evaluate(position);
    info!(global = evaluation.global, "evaluated position");

    let attribution =
        Attribution::extract(&evaluation.squares, position, &values, config.adjustments);

    let counterfactuals = config.wants_counterfactuals().then(|| {
        let counterfactuals = Counterfactuals::analyze(evaluator, position, evaluation.global);
        info!(count = counterfactuals.len(), "computed counterfactuals");
        counterfactuals
    });

    Ok(Report::new(
        *position,
        f64::from(evaluation.global),
        attribution,
        counterfactuals,
        config,
    ))
}
