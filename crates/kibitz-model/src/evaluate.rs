//! The evaluator seam: one global score plus a per-square, per-piece score matrix.

use kibitz_core::{Piece, Position, Square};

/// Per-square, per-piece scores produced alongside the global evaluation.
///
/// Rows follow [`Square::index`] (a8 first); columns follow
/// [`Piece::channel`].
#[derive(Debug, Clone, PartialEq)]
pub struct SquareScores([[f32; Piece::COUNT]; Square::COUNT]);

impl SquareScores {
    /// Number of scalar entries in the matrix.
    pub const LEN: usize = Square::COUNT * Piece::COUNT;

    /// An all-zero matrix.
    pub const fn zeros() -> SquareScores {
        SquareScores([[0.0; Piece::COUNT]; Square::COUNT])
    }

    /// Build the matrix from row-major values, returning `None` unless
    /// exactly [`SquareScores::LEN`] values are given.
    pub fn from_flat(values: &[f32]) -> Option<SquareScores> {
        if values.len() != Self::LEN {
            return None;
        }
        let mut scores = Self::zeros();
        for (row, chunk) in scores.0.iter_mut().zip(values.chunks_exact(Piece::COUNT)) {
            row.copy_from_slice(chunk);
        }
        Some(scores)
    }

    /// Build the matrix by calling `f` for every (square, channel) pair.
    pub fn from_fn(mut f: impl FnMut(Square, usize) -> f32) -> SquareScores {
        let mut scores = Self::zeros();
        for sq in Square::all() {
            for (channel, value) in scores.0[sq.index()].iter_mut().enumerate() {
                *value = f(sq, channel);
            }
        }
        scores
    }

    /// Score of `piece` standing on `sq`.
    #[inline]
    pub fn get(&self, sq: Square, piece: Piece) -> f32 {
        self.0[sq.index()][piece.channel()]
    }

    /// All twelve channel scores for `sq`.
    #[inline]
    pub fn row(&self, sq: Square) -> &[f32; Piece::COUNT] {
        &self.0[sq.index()]
    }
}

/// Output of a single evaluator call.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Scalar evaluation in network units (pawns).
    pub global: f32,
    /// Per-square, per-piece score matrix.
    pub squares: SquareScores,
}

/// A position evaluator.
///
/// Implementations are pure: the same position always produces the same
/// evaluation, and calls do not affect each other.
pub trait Evaluate {
    /// Evaluate a single position.
    fn evaluate(&self, position: &Position) -> Evaluation;

    /// Evaluate several positions, returning results in input order.
    ///
    /// The default evaluates them one at a time. Backends that can batch
    /// may override it.
    fn evaluate_batch(&self, positions: &[Position]) -> Vec<Evaluation> {
        positions.iter().map(|position| self.evaluate(position)).collect()
    }
}
