//! Static position evaluation

use crate::chessboard::ChessBoard;
use crate::types::{Color, Coord, Kind};

use derive_more::{Add, AddAssign, Display, From, Into, Neg, Sub, SubAssign};

/// Position score, in pawns
///
/// Higher is better for the side the score is computed for.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    From,
    Into,
    Display,
)]
#[display(fmt = "{:.2}", _0)]
pub struct Score(pub f64);

impl Score {
    pub const ZERO: Score = Score(0.0);

    /// Score of a won position, exceeding any material balance
    pub const MATE: Score = Score(1000.0);

    #[inline]
    pub fn is_mate(self) -> bool {
        self.0.abs() >= Self::MATE.0
    }
}

type Table = [[f64; 8]; 8];

const PAWN_TABLE: Table = [
    [0.0, 0.1, 0.1, 0.2, 0.2, 0.1, 0.1, 0.0],
    [0.1, 0.2, 0.3, 0.4, 0.4, 0.3, 0.2, 0.1],
    [0.1, 0.3, 0.4, 0.5, 0.5, 0.4, 0.3, 0.1],
    [0.2, 0.4, 0.5, 0.6, 0.6, 0.5, 0.4, 0.2],
    [0.2, 0.4, 0.6, 0.7, 0.7, 0.6, 0.4, 0.2],
    [0.2, 0.3, 0.4, 0.6, 0.6, 0.4, 0.3, 0.2],
    [0.1, 0.2, 0.3, 0.4, 0.4, 0.3, 0.2, 0.1],
    [0.0, 0.1, 0.1, 0.2, 0.2, 0.1, 0.1, 0.0],
];

const KNIGHT_TABLE: Table = [
    [-0.5, -0.4, -0.4, -0.4, -0.4, -0.4, -0.4, -0.5],
    [-0.4, 0.0, 0.2, 0.2, 0.2, 0.2, 0.0, -0.4],
    [-0.4, 0.2, 0.4, 0.5, 0.5, 0.4, 0.2, -0.4],
    [-0.4, 0.2, 0.5, 0.6, 0.6, 0.5, 0.2, -0.4],
    [-0.4, 0.2, 0.5, 0.6, 0.6, 0.5, 0.2, -0.4],
    [-0.4, 0.2, 0.4, 0.5, 0.5, 0.4, 0.2, -0.4],
    [-0.4, 0.0, 0.2, 0.2, 0.2, 0.2, 0.0, -0.4],
    [-0.5, -0.4, -0.4, -0.4, -0.4, -0.4, -0.4, -0.5],
];

const BISHOP_TABLE: Table = [
    [-0.5, -0.3, -0.2, -0.1, -0.1, -0.2, -0.3, -0.5],
    [-0.3, 0.0, 0.1, 0.3, 0.3, 0.1, 0.0, -0.3],
    [-0.2, 0.1, 0.2, 0.4, 0.4, 0.2, 0.1, -0.2],
    [-0.1, 0.3, 0.4, 0.6, 0.6, 0.4, 0.3, -0.1],
    [-0.1, 0.3, 0.4, 0.6, 0.6, 0.4, 0.3, -0.1],
    [-0.2, 0.1, 0.2, 0.4, 0.4, 0.2, 0.1, -0.2],
    [-0.3, 0.0, 0.1, 0.3, 0.3, 0.1, 0.0, -0.3],
    [-0.5, -0.3, -0.2, -0.1, -0.1, -0.2, -0.3, -0.5],
];

const ROOK_TABLE: Table = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.2, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.2],
    [0.2, 0.4, 0.6, 0.6, 0.6, 0.6, 0.4, 0.2],
    [0.2, 0.4, 0.6, 0.8, 0.8, 0.6, 0.4, 0.2],
    [0.2, 0.4, 0.6, 0.8, 0.8, 0.6, 0.4, 0.2],
    [0.2, 0.4, 0.6, 0.6, 0.6, 0.6, 0.4, 0.2],
    [0.2, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.2],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const QUEEN_TABLE: Table = [
    [-0.5, -0.4, -0.4, -0.3, -0.3, -0.4, -0.4, -0.5],
    [-0.4, -0.2, 0.0, 0.1, 0.1, 0.0, -0.2, -0.4],
    [-0.4, 0.0, 0.2, 0.3, 0.3, 0.2, 0.0, -0.4],
    [-0.3, 0.1, 0.3, 0.5, 0.5, 0.3, 0.1, -0.3],
    [-0.3, 0.1, 0.3, 0.5, 0.5, 0.3, 0.1, -0.3],
    [-0.4, 0.0, 0.2, 0.3, 0.3, 0.2, 0.0, -0.4],
    [-0.4, -0.2, 0.0, 0.1, 0.1, 0.0, -0.2, -0.4],
    [-0.5, -0.4, -0.4, -0.3, -0.3, -0.4, -0.4, -0.5],
];

/// Material weight of the piece kind
///
/// The king is not counted, as it never leaves the board.
pub const fn weight(kind: Kind) -> f64 {
    match kind {
        Kind::Pawn => 1.0,
        Kind::Knight | Kind::Bishop => 3.0,
        Kind::Rook => 5.0,
        Kind::Queen => 9.0,
        Kind::King | Kind::Empty => 0.0,
    }
}

fn table(kind: Kind) -> Option<&'static Table> {
    match kind {
        Kind::Pawn => Some(&PAWN_TABLE),
        Kind::Knight => Some(&KNIGHT_TABLE),
        Kind::Bishop => Some(&BISHOP_TABLE),
        Kind::Rook => Some(&ROOK_TABLE),
        Kind::Queen => Some(&QUEEN_TABLE),
        Kind::King | Kind::Empty => None,
    }
}

/// Positional multiplier for a piece of `kind` and `color` standing on `coord`
///
/// Tables are laid out from White's point of view, so they are mirrored vertically for Black.
pub fn multiplier(kind: Kind, color: Color, coord: Coord) -> f64 {
    let row = match color {
        Color::Black => coord.flipped_rank().rank().index(),
        _ => coord.rank().index(),
    };
    match table(kind) {
        Some(t) => 1.0 + t[row][coord.file().index()],
        None => 0.0,
    }
}

/// Sums the weighted material of `color`
///
/// Each piece contributes its [`weight()`] scaled by its [`multiplier()`].
pub fn evaluate(board: &ChessBoard, color: Color) -> Score {
    board
        .board()
        .iter()
        .filter(|(_, p)| p.color() == color)
        .map(|(c, p)| Score(weight(p.kind()) * multiplier(p.kind(), color, c)))
        .fold(Score::ZERO, |acc, s| acc + s)
}

/// Returns the material balance from the point of view of `color`
#[inline]
pub fn balance(board: &ChessBoard, color: Color) -> Score {
    evaluate(board, color) - evaluate(board, color.inv())
}
