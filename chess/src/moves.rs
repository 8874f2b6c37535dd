//! Moves and move errors

use crate::types::{Color, Coord, CoordError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a move cannot be made
///
/// The board is never modified when one of these errors is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    /// Coordinate is outside of the board
    #[error("bad input: {0}")]
    BadInput(#[from] CoordError),
    /// Source and destination are the same square
    #[error("source and destination are both {0}")]
    SameSquare(Coord),
    /// There is no piece on the square
    #[error("square {0} is empty")]
    EmptySquare(Coord),
    /// Destination is not among the legal moves of the piece
    #[error("move {0} is illegal")]
    IllegalMove(Move),
    /// Piece of the wrong color tries to move
    #[error("it is {expected}'s turn, but {found} tries to move")]
    BadSequence { expected: Color, found: Color },
    /// Move leaves the king of the moving side in check
    #[error("move {0} leaves the king in check")]
    KingIsChecked(Move),
}

/// Chess move from one square to another
///
/// Castling is represented as a king move by two files, en passant as a diagonal
/// pawn move to the empty square behind the captured pawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    from: Coord,
    to: Coord,
}

impl Move {
    /// Creates a move, rejecting moves whose source and destination coincide
    pub fn new(from: Coord, to: Coord) -> Result<Move, MoveError> {
        if from == to {
            return Err(MoveError::SameSquare(from));
        }
        Ok(Move { from, to })
    }

    #[inline]
    pub const fn from(&self) -> Coord {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Coord {
        self.to
    }

    /// Signed file delta between source and destination
    #[inline]
    pub fn file_delta(&self) -> isize {
        self.to.file().index() as isize - self.from.file().index() as isize
    }

    /// Signed rank delta between source and destination
    #[inline]
    pub fn rank_delta(&self) -> isize {
        self.to.rank().index() as isize - self.from.rank().index() as isize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    /// Parses a pair of squares, like `e2e4`
    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveError::BadInput(CoordError::BadLength));
        }
        Move::new(Coord::from_str(&s[..2])?, Coord::from_str(&s[2..])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let e2 = Coord::from_str("e2").unwrap();
        let e4 = Coord::from_str("e4").unwrap();
        let mv = Move::new(e2, e4).unwrap();
        assert_eq!(mv.from(), e2);
        assert_eq!(mv.to(), e4);
        assert_eq!(mv.rank_delta(), -2);
        assert_eq!(mv.file_delta(), 0);
        assert_eq!(Move::new(e2, e2), Err(MoveError::SameSquare(e2)));
    }

    #[test]
    fn test_str() {
        let mv = Move::from_str("g1f3").unwrap();
        assert_eq!(mv.to_string(), "g1f3");
        assert_eq!(mv.file_delta(), -1);
        assert_eq!(
            Move::from_str("g1g1"),
            Err(MoveError::SameSquare(Coord::from_str("g1").unwrap()))
        );
        assert_eq!(
            Move::from_str("g1"),
            Err(MoveError::BadInput(CoordError::BadLength))
        );
        assert_eq!(
            Move::from_str("z1f3"),
            Err(MoveError::BadInput(CoordError::UnexpectedFileChar('z')))
        );
    }
}
