//! Board squares in model order: a8 first, h1 last.
//!
//! Every 64-entry table in kibitz (feature blocks, model output rows,
//! attribution rows) is indexed the same way, so a [`Square`] index can be
//! used directly as a row index into any of them.

use std::fmt;

/// A file (column) on the board, a through h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct File(u8);

impl File {
    /// Total number of files.
    pub const COUNT: usize = 8;

    /// Create a file from a zero-based index (0 = a, 7 = h).
    #[inline]
    pub const fn from_index(index: u8) -> Option<File> {
        if index < 8 { Some(File(index)) } else { None }
    }

    /// Return the index (0..7).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the algebraic letter of this file.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the board, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    /// Total number of ranks.
    pub const COUNT: usize = 8;

    /// White's back rank.
    pub const FIRST: Rank = Rank(0);
    /// Black's back rank.
    pub const EIGHTH: Rank = Rank(7);

    /// Create a rank from a zero-based index (0 = rank 1, 7 = rank 8).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Rank> {
        if index < 8 { Some(Rank(index)) } else { None }
    }

    /// Return the index (0..7).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Ranks in display order, rank 8 first.
    pub fn top_down() -> impl Iterator<Item = Rank> {
        (0u8..8).rev().map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// A square on the board.
///
/// Index = (7 - rank) * 8 + file, so a8 = 0, h8 = 7, a1 = 56, h1 = 63.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    pub const A8: Square = Square(0);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const H8: Square = Square(7);
    pub const E7: Square = Square(12);
    pub const E5: Square = Square(28);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const E2: Square = Square(52);
    pub const A1: Square = Square(56);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const H1: Square = Square(63);

    /// Create a square from a rank and file.
    #[inline]
    pub const fn new(rank: Rank, file: File) -> Square {
        Square((7 - rank.0) * 8 + file.0)
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Parse an algebraic notation string (e.g. "e4") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let &[file_byte, rank_byte] = s.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }
        Some(Square::new(Rank(rank_byte - b'1'), File(file_byte - b'a')))
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank(7 - self.0 / 8)
    }

    /// Return the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File(self.0 % 8)
    }

    /// Iterate over all 64 squares in index order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}
