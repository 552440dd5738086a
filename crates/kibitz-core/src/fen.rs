//! FEN string parsing and serialization for [`Position`].

use std::fmt;
use std::str::FromStr;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::{File, Rank, Square};

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    /// Parse a FEN string. The two move counters may be omitted, in which
    /// case they default to `0 1`.
    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let squares = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastleRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            field => Some(
                Square::from_algebraic(field)
                    .filter(|sq| matches!(sq.rank().index(), 2 | 5))
                    .ok_or_else(|| FenError::InvalidEnPassant {
                        found: field.to_string(),
                    })?,
            ),
        };

        let (halfmove_clock, fullmove_number) = match fields.get(4..6) {
            Some(&[halfmove, fullmove]) => (
                parse_counter("halfmove clock", halfmove)?,
                parse_counter("fullmove number", fullmove)?,
            ),
            _ => (0, 1),
        };

        let position = Position::from_raw(
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );

        position.validate()?;
        Ok(position)
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; Square::COUNT], FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut squares = [None; Square::COUNT];

    // FEN ranks go from 8 to 1, the same order as the mailbox.
    for ((rank_index, rank_str), rank) in ranks.iter().enumerate().zip(Rank::top_down()) {
        let mut file_index: usize = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file_index += digit as usize;
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let Some(file) = u8::try_from(file_index).ok().and_then(File::from_index) else {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file_index + 1,
                });
            };
            squares[Square::new(rank, file).index()] = Some(piece);
            file_index += 1;
        }

        if file_index != File::COUNT {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file_index,
            });
        }
    }

    Ok(squares)
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, FenError> {
    value.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
        field,
        found: value.to_string(),
    })
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in Rank::top_down().enumerate() {
            let mut empty_count = 0u8;

            for file_idx in 0u8..8 {
                let Some(file) = File::from_index(file_idx) else {
                    continue;
                };
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if row < Rank::COUNT - 1 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;

        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::error::{FenError, PositionError};
    use crate::position::Position;

    fn roundtrip(fen: &str) {
        let position: Position = fen.parse().unwrap();
        let output = position.to_string();
        assert_eq!(output, fen, "FEN roundtrip failed");
        let reparsed: Position = output.parse().unwrap();
        assert_eq!(position, reparsed);
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_sicilian() {
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn roundtrip_endgame_black_to_move() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 3 41");
    }

    #[test]
    fn starting_position_matches_fen() {
        let from_fen: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(Position::starting_position(), from_fen);
    }

    #[test]
    fn counters_may_be_omitted() {
        let position: Position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
            .parse()
            .unwrap();
        assert_eq!(position, Position::starting_position());
    }

    #[test]
    fn error_wrong_field_count() {
        assert_eq!(
            "e4 e5".parse::<Position>(),
            Err(FenError::WrongFieldCount { found: 2 })
        );
    }

    #[test]
    fn error_invalid_piece_char() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidPieceChar { character: 'X' }));
    }

    #[test]
    fn error_bad_rank_length() {
        let short = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert!(matches!(short, Err(FenError::BadRankLength { rank_index: 1, length: 7 })));

        let long = "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert!(long.is_err());

        let overflow = "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert!(matches!(overflow, Err(FenError::BadRankLength { rank_index: 0, length: 9 })));
    }

    #[test]
    fn error_invalid_color() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Position>();
        assert!(matches!(result, Err(FenError::InvalidColor { .. })));
    }

    #[test]
    fn error_invalid_castling() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidCastlingChar { character: 'X' }));
    }

    #[test]
    fn error_invalid_en_passant() {
        let off_board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Position>();
        assert!(matches!(off_board, Err(FenError::InvalidEnPassant { .. })));

        let wrong_rank = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1".parse::<Position>();
        assert!(matches!(wrong_rank, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn error_invalid_move_counter() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - abc 1".parse::<Position>();
        assert!(matches!(
            result,
            Err(FenError::InvalidMoveCounter { field: "halfmove clock", .. })
        ));
    }

    #[test]
    fn error_missing_king() {
        let result = "rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1".parse::<Position>();
        assert_eq!(
            result,
            Err(FenError::InvalidPosition {
                source: PositionError::InvalidKingCount { color: "black", count: 0 }
            })
        );
    }

    #[test]
    fn error_pawn_on_back_rank() {
        let result = "rnbqkbnP/pppppppp/8/8/8/8/PPPPPPP1/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert!(matches!(result, Err(FenError::InvalidPosition { .. })));
    }
}
