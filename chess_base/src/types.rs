use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("file index {0} is out of range")]
    FileOutOfRange(isize),
    #[error("rank index {0} is out of range")]
    RankOutOfRange(isize),
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub const fn try_from_index(val: isize) -> Option<Self> {
        if val < 0 || val >= 8 {
            return None;
        }
        Some(unsafe { Self::from_index_unchecked(val as usize) })
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Rank of the board
///
/// Ranks are indexed from the top of the board as printed from White's side, so
/// [`Rank::R8`] has index 0 and [`Rank::R1`] has index 7.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R8,
            1 => Rank::R7,
            2 => Rank::R6,
            3 => Rank::R5,
            4 => Rank::R4,
            5 => Rank::R3,
            6 => Rank::R2,
            7 => Rank::R1,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub const fn try_from_index(val: isize) -> Option<Self> {
        if val < 0 || val >= 8 {
            return None;
        }
        Some(unsafe { Self::from_index_unchecked(val as usize) })
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::from_index((u32::from('8') - u32::from(c)) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'8' - *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// A `Coord` is always valid. Speculative squares produced by adding an offset are
/// obtained through [`Coord::try_shift()`], which returns `None` once the result leaves
/// the board.
///
/// Coordinates are ordered by file first, then by rank.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    file: File,
    rank: Rank,
}

impl Coord {
    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord { file, rank }
    }

    pub fn new(file: isize, rank: isize) -> Result<Coord, CoordError> {
        let file = File::try_from_index(file).ok_or(CoordError::FileOutOfRange(file))?;
        let rank = Rank::try_from_index(rank).ok_or(CoordError::RankOutOfRange(rank))?;
        Ok(Coord::from_parts(file, rank))
    }

    pub const fn is_valid(file: isize, rank: isize) -> bool {
        0 <= file && file < 8 && 0 <= rank && rank < 8
    }

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord::from_parts(File::from_index(val & 7), Rank::from_index(val >> 3))
    }

    pub const fn file(&self) -> File {
        self.file
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub const fn index(&self) -> usize {
        (self.rank.index() << 3) | self.file.index()
    }

    pub const fn flipped_rank(self) -> Coord {
        Coord::from_parts(self.file, Rank::from_index(7 - self.rank.index()))
    }

    pub const fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        let file = match File::try_from_index(self.file.index() as isize + delta_file) {
            Some(file) => file,
            None => return None,
        };
        let rank = match Rank::try_from_index(self.rank.index() as isize + delta_rank) {
            Some(rank) => rank,
            None => return None,
        };
        Some(Coord::from_parts(file, rank))
    }

    /// Iterates over all the squares, rank by rank starting from [`Rank::R8`]
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..64).map(Coord::from_index)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file.as_char(), self.rank.as_char())
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(CoordError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, rank_ch) = (bytes[0] as char, bytes[1] as char);
        Ok(Coord::from_parts(
            File::from_char(file_ch).ok_or(CoordError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(CoordError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

/// Piece color
///
/// Empty squares hold a [`Piece`] with [`Color::Neutral`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
    Neutral = 2,
}

impl Color {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the opposing color; [`Color::Neutral`] stays neutral
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::Neutral => Color::Neutral,
        }
    }

    pub const fn is_neutral(&self) -> bool {
        matches!(*self, Color::Neutral)
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
            Color::Neutral => '-',
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let name = match *self {
            Color::White => "White",
            Color::Black => "Black",
            Color::Neutral => "Neutral",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Empty = 0,
    Pawn = 1,
    Rook = 2,
    Knight = 3,
    Bishop = 4,
    Queen = 5,
    King = 6,
}

impl Kind {
    pub const COUNT: usize = 7;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }
}

/// Contents of a single square
///
/// Empty squares are represented by [`Piece::EMPTY`] rather than by the absence of a
/// value. A piece is empty if and only if its color is [`Color::Neutral`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: Kind,
    color: Color,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        kind: Kind::Empty,
        color: Color::Neutral,
    };

    /// Creates a piece from its color and kind
    ///
    /// # Panics
    ///
    /// Panics if exactly one of `color` and `kind` is neutral, i.e. the pair is neither
    /// [`Piece::EMPTY`] nor a real piece. Use [`Piece::try_from_parts()`] for unchecked input.
    pub const fn from_parts(color: Color, kind: Kind) -> Piece {
        match Piece::try_from_parts(color, kind) {
            Some(piece) => piece,
            None => panic!("only empty squares may be neutral"),
        }
    }

    /// Creates a piece from its color and kind, or returns `None` if exactly one of them is
    /// neutral
    pub const fn try_from_parts(color: Color, kind: Kind) -> Option<Piece> {
        if matches!(kind, Kind::Empty) != color.is_neutral() {
            return None;
        }
        Some(Piece { kind, color })
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, Kind::Empty)
    }

    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub const fn is(&self, color: Color, kind: Kind) -> bool {
        self.color as u8 == color as u8 && self.kind as u8 == kind as u8
    }

    /// Index into per-piece tables; the empty square has index 0
    pub const fn index(&self) -> usize {
        match self.color {
            Color::White => self.kind.index(),
            Color::Black => 6 + self.kind.index(),
            Color::Neutral => 0,
        }
    }

    pub const COUNT: usize = 13;

    pub fn as_char(&self) -> char {
        b".PRNBQKprnbqk"[self.index()] as char
    }

    /// Display symbol of the piece
    pub fn glyph(&self) -> char {
        [
            '□', '♙', '♖', '♘', '♗', '♕', '♔', '♟', '♜', '♞', '♝', '♛', '♚',
        ][self.index()]
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Piece::EMPTY);
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => Kind::Pawn,
            'r' => Kind::Rook,
            'n' => Kind::Knight,
            'b' => Kind::Bishop,
            'q' => Kind::Queen,
            'k' => Kind::King,
            _ => return None,
        };
        Some(Piece::from_parts(color, kind))
    }
}

impl Default for Piece {
    fn default() -> Piece {
        Piece::EMPTY
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Piece({})", self.as_char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Piece::from_char(ch).ok_or(PieceParseError::UnexpectedChar(ch)),
            _ => Err(PieceParseError::BadLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file() {
        for (idx, file) in File::iter().enumerate() {
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_index(idx), file);
        }
        assert_eq!(File::try_from_index(-1), None);
        assert_eq!(File::try_from_index(8), None);
    }

    #[test]
    fn test_rank() {
        for (idx, rank) in Rank::iter().enumerate() {
            assert_eq!(rank.index(), idx);
            assert_eq!(Rank::from_index(idx), rank);
        }
        assert_eq!(Rank::from_char('8'), Some(Rank::R8));
        assert_eq!(Rank::from_char('1'), Some(Rank::R1));
    }

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for rank in Rank::iter() {
            for file in File::iter() {
                let coord = Coord::from_parts(file, rank);
                assert_eq!(coord.file(), file);
                assert_eq!(coord.rank(), rank);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_coord_new() {
        assert_eq!(Coord::new(4, 6), Ok(Coord::from_parts(File::E, Rank::R2)));
        assert_eq!(Coord::new(8, 0), Err(CoordError::FileOutOfRange(8)));
        assert_eq!(Coord::new(0, -1), Err(CoordError::RankOutOfRange(-1)));
        assert!(Coord::is_valid(7, 7));
        assert!(!Coord::is_valid(-1, 3));
        assert!(!Coord::is_valid(3, 8));
    }

    #[test]
    fn test_coord_order() {
        let a2 = Coord::from_str("a2").unwrap();
        let a1 = Coord::from_str("a1").unwrap();
        let b8 = Coord::from_str("b8").unwrap();
        assert!(a2 < a1);
        assert!(a1 < b8);
        let mut coords = vec![b8, a1, a2];
        coords.sort();
        assert_eq!(coords, vec![a2, a1, b8]);
    }

    #[test]
    fn test_try_shift() {
        let e2 = Coord::from_str("e2").unwrap();
        assert_eq!(e2.try_shift(0, -2), Some(Coord::from_str("e4").unwrap()));
        assert_eq!(e2.try_shift(-1, 1), Some(Coord::from_str("d1").unwrap()));
        assert_eq!(e2.try_shift(0, 2), None);
        assert_eq!(e2.try_shift(4, 0), None);
    }

    #[test]
    fn test_piece() {
        assert_eq!(Piece::EMPTY.color(), Color::Neutral);
        assert_eq!(Piece::EMPTY.kind(), Kind::Empty);
        assert!(Piece::EMPTY.is_empty());
        let mut indices = vec![Piece::EMPTY.index()];
        for color in [Color::White, Color::Black] {
            for kind in [
                Kind::Pawn,
                Kind::Rook,
                Kind::Knight,
                Kind::Bishop,
                Kind::Queen,
                Kind::King,
            ] {
                let piece = Piece::from_parts(color, kind);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.kind(), kind);
                assert!(piece.is(color, kind));
                assert_eq!(Piece::from_char(piece.as_char()), Some(piece));
                indices.push(piece.index());
            }
        }
        assert_eq!(indices, (0..Piece::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_try_from_parts() {
        assert_eq!(
            Piece::try_from_parts(Color::Neutral, Kind::Empty),
            Some(Piece::EMPTY)
        );
        assert_eq!(
            Piece::try_from_parts(Color::Black, Kind::Rook),
            Some(Piece::from_parts(Color::Black, Kind::Rook))
        );
        assert_eq!(Piece::try_from_parts(Color::Neutral, Kind::Queen), None);
        assert_eq!(Piece::try_from_parts(Color::White, Kind::Empty), None);
    }

    #[test]
    #[should_panic]
    fn test_neutral_piece() {
        let _ = Piece::from_parts(Color::Neutral, Kind::Queen);
    }

    #[test]
    fn test_color() {
        assert_eq!(Color::White.inv(), Color::Black);
        assert_eq!(Color::Black.inv(), Color::White);
        assert_eq!(Color::Neutral.inv(), Color::Neutral);
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(
            Coord::from_parts(File::B, Rank::R4).to_string(),
            "b4".to_string()
        );
        assert_eq!(
            Coord::from_str("a1"),
            Ok(Coord::from_parts(File::A, Rank::R1))
        );
        assert_eq!(
            Coord::from_str("h9"),
            Err(CoordError::UnexpectedRankChar('9'))
        );
        assert_eq!(
            Coord::from_str("i4"),
            Err(CoordError::UnexpectedFileChar('i'))
        );
        assert_eq!(Coord::from_str("a10"), Err(CoordError::BadLength));
    }

    #[test]
    fn test_piece_str() {
        assert_eq!(
            Piece::from_str("Q"),
            Ok(Piece::from_parts(Color::White, Kind::Queen))
        );
        assert_eq!(
            Piece::from_str("x"),
            Err(PieceParseError::UnexpectedChar('x'))
        );
        assert_eq!(Piece::from_str("QQ"), Err(PieceParseError::BadLength));
    }
}
