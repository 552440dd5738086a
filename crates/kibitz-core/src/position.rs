//! The analysed position: piece placement, side to move, castling, en passant, and move counters.

use std::fmt;

use tracing::trace;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::PositionError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::{Rank, Square};

/// Complete, immutable board state.
///
/// Pieces are held in a mailbox indexed by [`Square::index`]. Modified
/// positions are derived as copies; nothing mutates a `Position` after it
/// has been built.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece on each square, a8 first.
    squares: [Option<Piece>; Square::COUNT],
    /// Which side moves next.
    side_to_move: Color,
    /// Current castling rights.
    castling: CastleRights,
    /// En passant target square, if any.
    en_passant: Option<Square>,
    /// Halfmove clock for the fifty-move rule.
    halfmove_clock: u16,
    /// Fullmove number (starts at 1, incremented after Black moves).
    fullmove_number: u16,
}

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; Square::COUNT];
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            squares[file] = Some(Piece::new(kind, Color::Black));
            squares[8 + file] = Some(Piece::BLACK_PAWN);
            squares[48 + file] = Some(Piece::WHITE_PAWN);
            squares[56 + file] = Some(Piece::new(kind, Color::White));
        }

        Position {
            squares,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Construct a position from raw components. Used by FEN parsing.
    pub(crate) fn from_raw(
        squares: [Option<Piece>; Square::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Position {
        Position {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Iterate over occupied squares in square order, with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Return the number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Derive a copy of this position with the piece on `sq` removed.
    ///
    /// Castling rights that depend on a removed rook are dropped, and an en
    /// passant target is cleared when the pawn it refers to is removed. An
    /// empty square yields an identical copy. Removing a king produces a
    /// position that no longer passes [`Position::validate`].
    pub fn without_piece(&self, sq: Square) -> Position {
        let mut next = *self;
        let Some(piece) = next.squares[sq.index()].take() else {
            return next;
        };

        if piece.kind() == PieceKind::Rook {
            next.castling = next.castling.without_rook_on(sq);
        }

        if piece.kind() == PieceKind::Pawn
            && self.en_passant.and_then(en_passant_victim) == Some(sq)
        {
            next.en_passant = None;
        }

        if next.castling != self.castling || next.en_passant != self.en_passant {
            trace!(square = %sq, "derived position dropped dependent rights");
        }
        next
    }

    /// Validate the structural integrity of the position.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::ALL {
            let count = self
                .pieces()
                .filter(|&(_, piece)| piece == Piece::new(PieceKind::King, color))
                .count();
            if count != 1 {
                let color_name = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(PositionError::InvalidKingCount {
                    color: color_name,
                    count,
                });
            }
        }

        let pawn_on_back_rank = self.pieces().any(|(sq, piece)| {
            piece.kind() == PieceKind::Pawn && (sq.rank() == Rank::FIRST || sq.rank() == Rank::EIGHTH)
        });
        if pawn_on_back_rank {
            return Err(PositionError::PawnsOnBackRank);
        }

        Ok(())
    }
}

/// Square of the pawn that can be captured en passant on target `ep`.
fn en_passant_victim(ep: Square) -> Option<Square> {
    let victim_rank = match ep.rank().index() {
        2 => Rank::from_index(3)?,
        5 => Rank::from_index(4)?,
        _ => return None,
    };
    Some(Square::new(victim_rank, ep.file()))
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::color::Color;
    use crate::error::PositionError;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn starting_position_validates() {
        Position::starting_position().validate().unwrap();
    }

    #[test]
    fn starting_position_piece_at() {
        let pos = Position::starting_position();
        assert_eq!(pos.piece_at(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(pos.piece_at(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(pos.piece_at(Square::A1), Some(Piece::WHITE_ROOK));
        assert_eq!(pos.piece_at(Square::E8), Some(Piece::BLACK_KING));
        assert_eq!(pos.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(pos.piece_at(Square::E2), Some(Piece::WHITE_PAWN));
        assert_eq!(pos.piece_at(Square::E7), Some(Piece::BLACK_PAWN));
        assert_eq!(pos.piece_at(Square::E4), None);
        assert_eq!(pos.occupied_count(), 32);
    }

    #[test]
    fn pieces_iterates_in_square_order() {
        let pos = Position::starting_position();
        let squares: Vec<usize> = pos.pieces().map(|(sq, _)| sq.index()).collect();
        assert_eq!(squares.len(), 32);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(squares[0], 0);
        assert_eq!(squares[31], 63);
    }

    #[test]
    fn without_piece_leaves_original_untouched() {
        let pos = Position::starting_position();
        let derived = pos.without_piece(Square::D1);
        assert_eq!(derived.piece_at(Square::D1), None);
        assert_eq!(derived.occupied_count(), 31);
        assert_eq!(pos.piece_at(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(derived.side_to_move(), Color::White);
        assert_eq!(derived.castling(), pos.castling());
    }

    #[test]
    fn without_rook_drops_castling_right() {
        let pos = Position::starting_position();
        assert_eq!(pos.without_piece(Square::H1).castling().to_string(), "Qkq");
        assert_eq!(pos.without_piece(Square::A8).castling().to_string(), "KQk");
    }

    #[test]
    fn without_double_pushed_pawn_clears_en_passant() {
        let pos: Position = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
            .parse()
            .unwrap();
        assert_eq!(pos.without_piece(Square::E5).en_passant(), None);
        assert!(pos.without_piece(Square::E4).en_passant().is_some());
    }

    #[test]
    fn without_empty_square_is_identity() {
        let pos = Position::starting_position();
        assert_eq!(pos.without_piece(Square::E4), pos);
    }

    #[test]
    fn without_king_fails_validation() {
        let pos = Position::starting_position().without_piece(Square::E1);
        assert_eq!(
            pos.validate(),
            Err(PositionError::InvalidKingCount { color: "white", count: 0 })
        );
    }

    #[test]
    fn king_count_checks_both_sides() {
        let pos = Position::starting_position();
        let kings = pos
            .pieces()
            .filter(|(_, piece)| piece.kind() == PieceKind::King)
            .count();
        assert_eq!(kings, 2);
    }
}
