//! Castling rights stored as a 4-bit field within a `u8`.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Castling rights encoded as a 4-bit field: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// The bit order is also the order of the four castling features fed to the
/// model.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Every (color, side) pair in feature order.
    pub const FLAGS: [(Color, CastleSide); 4] = [
        (Color::White, CastleSide::KingSide),
        (Color::White, CastleSide::QueenSide),
        (Color::Black, CastleSide::KingSide),
        (Color::Black, CastleSide::QueenSide),
    ];

    /// Return the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Return new rights with the given color and side removed.
    #[inline]
    pub const fn without(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 & !Self::bit(color, side))
    }

    /// Return new rights with every right tied to the rook on `sq` removed.
    ///
    /// Squares that are not a rook's home square leave the rights untouched.
    pub fn without_rook_on(self, sq: Square) -> CastleRights {
        Self::FLAGS
            .into_iter()
            .filter(|&(color, side)| rook_home(color, side) == sq)
            .fold(self, |rights, (color, side)| rights.without(color, side))
    }

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => 0b0001,
            (Color::White, CastleSide::QueenSide) => 0b0010,
            (Color::Black, CastleSide::KingSide) => 0b0100,
            (Color::Black, CastleSide::QueenSide) => 0b1000,
        }
    }

    /// Parse castling rights from the FEN castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut bits = 0;
        for c in s.chars() {
            bits |= match c {
                'K' => Self::bit(Color::White, CastleSide::KingSide),
                'Q' => Self::bit(Color::White, CastleSide::QueenSide),
                'k' => Self::bit(Color::Black, CastleSide::KingSide),
                'q' => Self::bit(Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
        }
        Ok(CastleRights(bits))
    }
}

/// Home square of the rook that castles toward `side`.
const fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::KingSide) => Square::H1,
        (Color::White, CastleSide::QueenSide) => Square::A1,
        (Color::Black, CastleSide::KingSide) => Square::H8,
        (Color::Black, CastleSide::QueenSide) => Square::A8,
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for ((color, side), c) in Self::FLAGS.into_iter().zip(['K', 'Q', 'k', 'q']) {
            if self.has(color, side) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
