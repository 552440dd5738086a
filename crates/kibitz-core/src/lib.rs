//! Core chess types for kibitz: squares in model order, pieces, and the analysed position.

mod castle_rights;
mod color;
mod error;
mod fen;
mod piece;
mod piece_kind;
mod position;
mod square;

pub use castle_rights::{CastleRights, CastleSide};
pub use color::Color;
pub use error::{FenError, PositionError};
pub use fen::STARTING_FEN;
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::Position;
pub use square::{File, Rank, Square};
