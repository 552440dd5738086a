//! Piece-removal counterfactuals: how much the global score moves when a
//! single piece is taken off the board.

use kibitz_core::{Piece, PieceKind, Position, Square};
use kibitz_model::Evaluate;
use tracing::debug;

/// Effect of removing one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterfactualRow {
    pub square: Square,
    pub piece: Piece,
    /// Original global score minus the score without this piece.
    pub delta: f64,
}

/// Counterfactual rows for every non-king piece, highest delta first.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterfactuals {
    rows: Vec<CounterfactualRow>,
}

impl Counterfactuals {
    /// Remove each non-king piece in turn, re-evaluate, and record the change
    /// against `global`, the evaluation of the unmodified position.
    ///
    /// Derived positions are built in square order and handed to
    /// [`Evaluate::evaluate_batch`]; the result is sorted by delta
    /// descending, ties keeping square order.
    pub fn analyze<E: Evaluate + ?Sized>(
        evaluator: &E,
        position: &Position,
        global: f32,
    ) -> Counterfactuals {
        let removable: Vec<(Square, Piece)> = position
            .pieces()
            .filter(|(_, piece)| piece.kind() != PieceKind::King)
            .collect();
        let derived: Vec<Position> = removable
            .iter()
            .map(|&(square, _)| position.without_piece(square))
            .collect();

        let evaluations = evaluator.evaluate_batch(&derived);
        debug_assert_eq!(evaluations.len(), derived.len());

        let mut rows: Vec<CounterfactualRow> = removable
            .into_iter()
            .zip(evaluations)
            .map(|((square, piece), evaluation)| {
                let delta = f64::from(global) - f64::from(evaluation.global);
                debug!(square = %square, piece = %piece, delta, "counterfactual");
                CounterfactualRow {
                    square,
                    piece,
                    delta,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.delta.total_cmp(&a.delta));

        Counterfactuals { rows }
    }

    /// Rows sorted by delta, highest first.
    pub fn rows(&self) -> &[CounterfactualRow] {
        &self.rows
    }

    /// Delta for `square`, or `None` if no piece there was removed.
    pub fn delta_at(&self, square: Square) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.square == square)
            .map(|row| row.delta)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use kibitz_core::{PieceKind, Position, Square};
    use kibitz_model::{Evaluate, Evaluation, SquareScores};

    use super::Counterfactuals;

    /// Scores a position as the sum of its occupied square indices, and
    /// counts how often it is called.
    #[derive(Default)]
    struct IndexSum {
        calls: Cell<usize>,
    }

    impl Evaluate for IndexSum {
        fn evaluate(&self, position: &Position) -> Evaluation {
            self.calls.set(self.calls.get() + 1);
            let global = position.pieces().map(|(sq, _)| sq.index() as f32).sum();
            Evaluation {
                global,
                squares: SquareScores::zeros(),
            }
        }
    }

    #[test]
    fn starting_position_has_thirty_rows() {
        let evaluator = IndexSum::default();
        let position = Position::starting_position();
        let global = evaluator.evaluate(&position).global;
        let counterfactuals = Counterfactuals::analyze(&evaluator, &position, global);
        assert_eq!(counterfactuals.len(), 30);
        assert_eq!(evaluator.calls.get(), 31);
    }

    #[test]
    fn kings_are_never_removed() {
        let position: Position = "4k3/8/8/3q4/8/8/8/4K2R w K - 0 1".parse().unwrap();
        let evaluator = IndexSum::default();
        let counterfactuals = Counterfactuals::analyze(&evaluator, &position, 0.0);
        assert_eq!(counterfactuals.len(), 2);
        assert!(
            counterfactuals
                .rows()
                .iter()
                .all(|row| row.piece.kind() != PieceKind::King)
        );
        assert_eq!(counterfactuals.delta_at(Square::E1), None);
        assert_eq!(counterfactuals.delta_at(Square::E8), None);
    }

    #[test]
    fn delta_is_original_minus_removed() {
        let evaluator = IndexSum::default();
        let position = Position::starting_position();
        let global = evaluator.evaluate(&position).global;
        let counterfactuals = Counterfactuals::analyze(&evaluator, &position, global);
        // Removing the piece on square i lowers the index sum by exactly i.
        for row in counterfactuals.rows() {
            assert_eq!(row.delta, row.square.index() as f64);
        }
        assert_eq!(counterfactuals.delta_at(Square::D1), Some(59.0));
        assert_eq!(counterfactuals.delta_at(Square::E4), None);
    }

    #[test]
    fn rows_sorted_by_delta_descending() {
        let evaluator = IndexSum::default();
        let position = Position::starting_position();
        let global = evaluator.evaluate(&position).global;
        let counterfactuals = Counterfactuals::analyze(&evaluator, &position, global);
        let deltas: Vec<f64> = counterfactuals.rows().iter().map(|row| row.delta).collect();
        assert!(deltas.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(counterfactuals.rows()[0].square, Square::H1);
    }

    #[test]
    fn bare_kings_yield_no_rows() {
        let position: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let evaluator = IndexSum::default();
        let counterfactuals = Counterfactuals::analyze(&evaluator, &position, 1.0);
        assert!(counterfactuals.is_empty());
        assert_eq!(evaluator.calls.get(), 0);
    }
}
