//! Feature encoding: a [`Position`] as the 781-float input vector of the network.
//!
//! Layout:
//! - 64 squares (a8 first) x 12 piece channels, one-hot per occupied square
//! - castling rights: white king-side, white queen-side, black king-side, black queen-side
//! - en passant file, one-hot over files a-h (all zero when there is no target)
//! - side to move: +1 for White, -1 for Black

use kibitz_core::{CastleRights, Piece, Position, Square};

/// Length of the one-hot board block.
pub const BOARD_FEATURES: usize = Square::COUNT * Piece::COUNT;

/// Offset of the four castling flags.
pub const CASTLING_OFFSET: usize = BOARD_FEATURES;

/// Offset of the eight en passant file bits.
pub const EN_PASSANT_OFFSET: usize = CASTLING_OFFSET + 4;

/// Offset of the side-to-move feature.
pub const SIDE_TO_MOVE_OFFSET: usize = EN_PASSANT_OFFSET + 8;

/// Total length of the feature vector.
pub const FEATURE_COUNT: usize = SIDE_TO_MOVE_OFFSET + 1;

/// Index of the board feature for `piece` standing on `sq`.
///
/// The square-score head of the network is laid out with the same index,
/// so this also addresses a piece's entry in flattened
/// [`SquareScores`](crate::SquareScores).
#[inline]
pub fn feature_index(sq: Square, piece: Piece) -> usize {
    sq.index() * Piece::COUNT + piece.channel()
}

/// Encode a position into a [`FEATURE_COUNT`]-length vector.
pub fn encode(position: &Position) -> Vec<f32> {
    let mut features = vec![0.0; FEATURE_COUNT];

    for (sq, piece) in position.pieces() {
        features[feature_index(sq, piece)] = 1.0;
    }

    let castling = position.castling();
    for (offset, (color, side)) in CastleRights::FLAGS.into_iter().enumerate() {
        if castling.has(color, side) {
            features[CASTLING_OFFSET + offset] = 1.0;
        }
    }

    if let Some(ep) = position.en_passant() {
        features[EN_PASSANT_OFFSET + ep.file().index()] = 1.0;
    }

    features[SIDE_TO_MOVE_OFFSET] = position.side_to_move().sign();
    features
}

#[cfg(test)]
mod tests {
    use kibitz_core::{Piece, Position, Square};

    use super::{
        BOARD_FEATURES, CASTLING_OFFSET, EN_PASSANT_OFFSET, FEATURE_COUNT, SIDE_TO_MOVE_OFFSET,
        encode, feature_index,
    };

    #[test]
    fn feature_count_is_781() {
        assert_eq!(FEATURE_COUNT, 781);
        assert_eq!(encode(&Position::starting_position()).len(), 781);
    }

    #[test]
    fn one_channel_per_occupied_square() {
        let position = Position::starting_position();
        let features = encode(&position);
        for sq in Square::all() {
            let block = &features[sq.index() * 12..(sq.index() + 1) * 12];
            let hot = block.iter().filter(|&&v| v == 1.0).count();
            let expected = usize::from(position.piece_at(sq).is_some());
            assert_eq!(hot, expected, "square {sq}");
        }
        assert_eq!(features[feature_index(Square::E1, Piece::WHITE_KING)], 1.0);
        assert_eq!(features[feature_index(Square::A8, Piece::BLACK_ROOK)], 1.0);
        assert_eq!(features[..BOARD_FEATURES].iter().sum::<f32>(), 32.0);
    }

    #[test]
    fn extras_for_starting_position() {
        let features = encode(&Position::starting_position());
        assert_eq!(&features[CASTLING_OFFSET..EN_PASSANT_OFFSET], &[1.0; 4]);
        assert_eq!(&features[EN_PASSANT_OFFSET..SIDE_TO_MOVE_OFFSET], &[0.0; 8]);
        assert_eq!(features[SIDE_TO_MOVE_OFFSET], 1.0);
    }

    #[test]
    fn extras_for_black_to_move_with_en_passant() {
        let position: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b Kq e3 0 1"
            .parse()
            .unwrap();
        let features = encode(&position);
        assert_eq!(&features[CASTLING_OFFSET..EN_PASSANT_OFFSET], &[1.0, 0.0, 0.0, 1.0]);
        let ep_bits = &features[EN_PASSANT_OFFSET..SIDE_TO_MOVE_OFFSET];
        assert_eq!(ep_bits, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(features[SIDE_TO_MOVE_OFFSET], -1.0);
    }
}
