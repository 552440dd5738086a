//! Per-square attribution of the global score.

use kibitz_core::{Piece, Position, Square};
use kibitz_model::SquareScores;

use crate::nominal::PieceValues;

/// Optional rescaling of raw attributions by nominal piece value.
///
/// The two flags are independent. With both set, a value is divided and
/// then multiplied by the same nominal, which returns the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjustments {
    /// Divide by the nominal value where one is defined.
    pub normalize: bool,
    /// Multiply by the nominal value where one is defined.
    pub scale_piece: bool,
}

impl Adjustments {
    fn apply(self, raw: f64, factor: Option<f64>) -> f64 {
        let Some(factor) = factor else {
            return raw;
        };
        let mut value = raw;
        if self.normalize {
            value /= factor;
        }
        if self.scale_piece {
            value *= factor;
        }
        value
    }
}

/// Attribution of one square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributionRow {
    pub square: Square,
    /// Occupying piece, `None` for an empty square.
    pub piece: Option<Piece>,
    /// Adjusted contribution; exactly zero for an empty square.
    pub value: f64,
}

/// Attribution rows for all 64 squares, in square order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    rows: Vec<AttributionRow>,
}

impl Attribution {
    /// Select, for every occupied square, the score of the piece actually
    /// standing there and apply `adjustments`.
    pub fn extract(
        scores: &SquareScores,
        position: &Position,
        values: &PieceValues,
        adjustments: Adjustments,
    ) -> Attribution {
        let rows = Square::all()
            .map(|square| {
                let piece = position.piece_at(square);
                let value = piece.map_or(0.0, |piece| {
                    let raw = f64::from(scores.get(square, piece));
                    adjustments.apply(raw, values.factor(piece.kind()))
                });
                AttributionRow {
                    square,
                    piece,
                    value,
                }
            })
            .collect();
        Attribution { rows }
    }

    /// All 64 rows, indexed by [`Square::index`].
    pub fn rows(&self) -> &[AttributionRow] {
        &self.rows
    }

    /// Attribution of `square`.
    pub fn value_at(&self, square: Square) -> f64 {
        self.rows[square.index()].value
    }

    /// Sum of all attributions.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.value).sum()
    }

    /// Occupied squares sorted by attribution, highest first.
    ///
    /// Equal values keep square order.
    pub fn ranked(&self) -> Vec<AttributionRow> {
        let mut ranked: Vec<AttributionRow> = self
            .rows
            .iter()
            .filter(|row| row.piece.is_some())
            .copied()
            .collect();
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranked
    }
}
