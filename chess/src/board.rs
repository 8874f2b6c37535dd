//! Board and related things

use crate::types::{Color, Coord, File, Kind, Piece, Rank};
use crate::zobrist;

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement of a [`Board`]
///
/// The placement uses the same syntax as the first part of FEN, i.e. ranks from 8 down to 1
/// separated by `/`, digits denoting runs of empty squares.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum BoardParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Dense 8×8 grid of pieces
///
/// Every square always holds a well-defined [`Piece`], possibly [`Piece::EMPTY`]. The
/// grid is stored row-major, rank by rank starting from [`Rank::R8`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Piece; 8]; 8],
}

const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [[Piece::EMPTY; 8]; 8],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for (color, back, pawns) in [
            (Color::White, Rank::R1, Rank::R2),
            (Color::Black, Rank::R8, Rank::R7),
        ] {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                res.put2(file, back, Piece::from_parts(color, kind));
                res.put2(file, pawns, Piece::from_parts(color, Kind::Pawn));
            }
        }
        res
    }

    /// Parses the piece placement
    ///
    /// Does the same as [`Board::from_str`].
    #[inline]
    pub fn from_placement(s: &str) -> Result<Board, BoardParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Piece {
        self.cells[c.rank().index()][c.file().index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Piece {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `piece` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, piece: Piece) {
        self.cells[c.rank().index()][c.file().index()] = piece;
    }

    /// Puts `piece` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, piece: Piece) {
        self.put(Coord::from_parts(file, rank), piece);
    }

    /// Iterates over all the squares with their contents, in [`Coord::iter()`] order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::iter().map(move |c| (c, self.get(c)))
    }

    /// Returns the square holding the king of color `c`, if any
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        self.iter()
            .find(|(_, p)| p.is(c, Kind::King))
            .map(|(coord, _)| coord)
    }

    /// Returns Zobrist hash of the piece placement
    pub fn zobrist_hash(&self) -> u64 {
        self.iter()
            .filter(|(_, p)| p.is_occupied())
            .fold(0, |hash, (c, p)| hash ^ zobrist::pieces(p, c))
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: self,
            side: None,
            style,
        }
    }

    /// Converts the board into the piece placement string
    pub fn as_placement(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl Index<Coord> for Board {
    type Output = Piece;

    #[inline]
    fn index(&self, c: Coord) -> &Piece {
        &self.cells[c.rank().index()][c.file().index()]
    }
}

impl IndexMut<Coord> for Board {
    #[inline]
    fn index_mut(&mut self, c: Coord) -> &mut Piece {
        &mut self.cells[c.rank().index()][c.file().index()]
    }
}

fn parse_rank(s: &str, rank: Rank, row: &mut [Piece; 8]) -> Result<(), BoardParseError> {
    let mut file = 0_usize;
    for b in s.chars() {
        match b {
            '1'..='8' => {
                let add = (b as u8 - b'0') as usize;
                if file + add > 8 {
                    return Err(BoardParseError::RankOverflow(rank));
                }
                file += add;
            }
            _ => {
                if file >= 8 {
                    return Err(BoardParseError::RankOverflow(rank));
                }
                row[file] = match Piece::from_char(b) {
                    Some(p) if p.is_occupied() => p,
                    _ => return Err(BoardParseError::UnexpectedChar(b)),
                };
                file += 1;
            }
        }
    }
    if file < 8 {
        return Err(BoardParseError::RankUnderflow(rank));
    }
    Ok(())
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        let mut res = Board::empty();
        let mut ranks = Rank::iter();
        for (row, part) in s.split('/').enumerate() {
            let rank = ranks.next().ok_or(BoardParseError::Overflow)?;
            parse_rank(part, rank, &mut res.cells[row])?;
        }
        if ranks.next().is_some() {
            return Err(BoardParseError::Underflow);
        }
        Ok(res)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, row) in self.cells.iter().enumerate() {
            if i != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for piece in row {
                if piece.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", piece.as_char())?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrettyStyle {
    /// Use only ASCII characters
    Ascii,
    /// Use piece glyphs and box-drawing characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See [`Board::pretty()`] and [`ChessBoard::pretty()`](crate::ChessBoard::pretty) for details.
pub struct Pretty<'a> {
    pub(crate) board: &'a Board,
    pub(crate) side: Option<Color>,
    pub(crate) style: PrettyStyle,
}

impl<'a> fmt::Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let (vert, horz, cross) = match self.style {
            PrettyStyle::Ascii => ('|', '-', '+'),
            PrettyStyle::Utf8 => ('│', '─', '┼'),
        };
        for rank in Rank::iter() {
            write!(f, "{}{}", rank.as_char(), vert)?;
            for file in File::iter() {
                let piece = self.board.get2(file, rank);
                match self.style {
                    PrettyStyle::Ascii => write!(f, "{}", piece.as_char())?,
                    PrettyStyle::Utf8 => write!(f, "{}", piece.glyph())?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", horz, cross)?;
        for _ in File::iter() {
            write!(f, "{}", horz)?;
        }
        writeln!(f)?;
        let side = match (self.side, self.style) {
            (Some(Color::White), PrettyStyle::Ascii) => 'W',
            (Some(Color::Black), PrettyStyle::Ascii) => 'B',
            (Some(Color::White), PrettyStyle::Utf8) => '○',
            (Some(Color::Black), PrettyStyle::Utf8) => '●',
            _ => ' ',
        };
        write!(f, "{}{}", side, vert)?;
        for file in File::iter() {
            write!(f, "{}", file.as_char())?;
        }
        writeln!(f)?;
        Ok(())
    }
}
