//! Game state and rule queries

use crate::board::{Board, Pretty, PrettyStyle};
use crate::movegen::{self, MoveList};
use crate::moves::{Move, MoveError};
use crate::temporal::{self, TemporalMove};
use crate::types::{Color, Coord, File, Kind, Piece};
use crate::{geometry, zobrist};

use std::ops::{Index, IndexMut};

use thiserror::Error;
use tracing::trace;

/// Error returned when a game state cannot be created
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidateError {
    /// Side to move is neither White nor Black
    #[error("side to move must not be neutral")]
    NeutralSide,
}

/// State of the game from the point of view of the side to move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Side to move has legal moves and is not in check
    Ongoing,
    /// Side to move is in check, but can escape
    Check,
    /// Side to move is in check and has no legal moves
    Checkmate,
    /// Side to move is not in check and has no legal moves
    Stalemate,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(*self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Authoritative game state
///
/// Contains the [`Board`], the list of moves applied so far and the side to move. All the
/// permanent mutation goes through [`ChessBoard::make_move()`], which either applies the move
/// completely or returns an error without touching anything.
///
/// Queries that have to try moves (such as [`ChessBoard::legal_moves()`] or
/// [`ChessBoard::is_game_over()`]) take `&mut self`: they simulate moves with
/// [`TemporalMove`] and always leave the board as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) turn: Color,
}

impl ChessBoard {
    /// Returns the standard initial position with White to move
    pub fn new() -> ChessBoard {
        ChessBoard {
            board: Board::initial(),
            history: Vec::new(),
            turn: Color::White,
        }
    }

    /// Creates the game state from an arbitrary position, with empty history
    ///
    /// Pieces standing on their initial squares are considered unmoved, so castling is
    /// available whenever king and rook are at home and the path is clear.
    pub fn from_board(board: Board, turn: Color) -> Result<ChessBoard, ValidateError> {
        if turn.is_neutral() {
            return Err(ValidateError::NeutralSide);
        }
        Ok(ChessBoard {
            board,
            history: Vec::new(),
            turn,
        })
    }

    /// Resets the board, history and side to move to the initial state
    pub fn restore(&mut self) {
        self.board = Board::initial();
        self.history.clear();
        self.turn = Color::White;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves applied so far, oldest first
    ///
    /// Castling is recorded as two entries: the rook move followed by the king move.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Returns the side to move
    #[inline]
    pub fn colors_turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Piece {
        self.board.get(c)
    }

    /// Returns `true` if the pieces on `a` and `b` have different non-neutral colors
    pub fn is_enemy(&self, a: Coord, b: Coord) -> bool {
        let (ca, cb) = (self.board[a].color(), self.board[b].color());
        !ca.is_neutral() && !cb.is_neutral() && ca != cb
    }

    /// Returns `true` if any move in history started or ended on `square`
    ///
    /// If this returns `false`, the piece standing on `square` has been there since the
    /// beginning of the history.
    pub fn piece_was_moved(&self, square: Coord) -> bool {
        self.history
            .iter()
            .any(|mv| mv.from() == square || mv.to() == square)
    }

    /// Returns `true` if the pawn on `location` may capture the pawn on `adjacent` en passant
    pub fn passant_is_legal(&self, location: Coord, adjacent: Coord) -> bool {
        let (piece, other) = (self.board[location], self.board[adjacent]);
        if piece.kind() != Kind::Pawn
            || other.kind() != Kind::Pawn
            || !self.is_enemy(location, adjacent)
        {
            return false;
        }
        if location.rank() != adjacent.rank()
            || location.file().index().abs_diff(adjacent.file().index()) != 1
        {
            return false;
        }
        match self.history.last() {
            Some(last) => {
                last.to() == adjacent && last.file_delta() == 0 && last.rank_delta().abs() == 2
            }
            None => false,
        }
    }

    /// Returns the square of the pawn captured en passant by `mv`, if `mv` is such a capture
    pub(crate) fn passant_victim(&self, mv: Move) -> Option<Coord> {
        let last = self.history.last()?;
        if mv.file_delta() != 0
            && mv.to().file() == last.to().file()
            && self.passant_is_legal(mv.from(), last.to())
        {
            return Some(last.to());
        }
        None
    }

    /// Returns `true` if `mv` moves a king by two files
    pub fn is_castle(&self, mv: Move) -> bool {
        self.board[mv.from()].kind() == Kind::King
            && mv.file_delta().abs() == geometry::CASTLING_OFFSET
    }

    /// Returns the rook move accompanying the castling `mv`
    pub(crate) fn castling_rook_move(&self, mv: Move) -> Option<Move> {
        let rank = mv.from().rank();
        let (rook_file, delta) = if mv.file_delta() > 0 {
            (File::H, -1)
        } else {
            (File::A, 1)
        };
        let src = Coord::from_parts(rook_file, rank);
        let dst = mv.to().try_shift(delta, 0)?;
        if self.board[src].kind() != Kind::Rook {
            return None;
        }
        Move::new(src, dst).ok()
    }

    /// Returns `true` if any enemy of `color` can geometrically reach the king of `color`
    pub fn is_checked(&self, color: Color) -> bool {
        let king = match self.board.king_pos(color) {
            Some(king) => king,
            None => return false,
        };
        let enemy = color.inv();
        Coord::iter()
            .filter(|&c| self.board[c].color() == enemy)
            .any(|c| {
                movegen::potential_moves(self, c)
                    .map(|moves| moves.contains(&king))
                    .unwrap_or(false)
            })
    }

    /// Returns `true` if, after `mv`, the king of the moving side is not in check
    pub fn move_is_unchecking(&mut self, mv: Move) -> bool {
        let color = self.board[mv.from()].color();
        let guard = TemporalMove::new(self, mv);
        !guard.is_checked(color)
    }

    /// Returns `true` if no piece of `color` has a legal move
    ///
    /// Checkmate and stalemate are not distinguished here, see [`ChessBoard::status()`].
    pub fn is_game_over(&mut self, color: Color) -> bool {
        !movegen::has_legal_moves(self, color)
    }

    /// Returns the state of the game for the side to move
    pub fn status(&mut self) -> GameStatus {
        let side = self.turn;
        match (self.is_checked(side), self.is_game_over(side)) {
            (false, false) => GameStatus::Ongoing,
            (true, false) => GameStatus::Check,
            (true, true) => GameStatus::Checkmate,
            (false, true) => GameStatus::Stalemate,
        }
    }

    /// Geometric destinations of the piece on `location`, see [`movegen::potential_moves()`]
    #[inline]
    pub fn potential_moves(&self, location: Coord) -> Result<MoveList, MoveError> {
        movegen::potential_moves(self, location)
    }

    /// Legal destinations of the piece on `location`, see [`movegen::legal_moves()`]
    #[inline]
    pub fn legal_moves(&mut self, location: Coord) -> Result<MoveList, MoveError> {
        movegen::legal_moves(self, location)
    }

    /// Applies `mv`, given the legal destinations `moves` previously computed for `mv.from()`
    ///
    /// En passant captures remove the captured pawn, castling also moves the rook (recorded
    /// in history before the king move), and a pawn reaching the last rank becomes a queen.
    /// Then the side to move is flipped.
    ///
    /// The turn is not verified here; use [`ChessBoard::try_move()`] for a fully validated
    /// move. On error, nothing is modified.
    pub fn make_move(&mut self, moves: &[Coord], mv: Move) -> Result<(), MoveError> {
        if self.board[mv.from()].is_empty() {
            return Err(MoveError::EmptySquare(mv.from()));
        }
        if !moves.contains(&mv.to()) {
            return Err(MoveError::IllegalMove(mv));
        }
        let undo = temporal::make_move_raw(self, mv);
        if let Some(rook) = undo.rook {
            self.history.push(rook);
        }
        self.history.push(mv);
        self.turn = self.turn.inv();
        trace!(
            %mv,
            castle = undo.rook.is_some(),
            en_passant = undo.passant.is_some(),
            "move committed"
        );
        Ok(())
    }

    /// Validates and applies the move from `from` to `to`
    ///
    /// Unlike [`ChessBoard::make_move()`], this also verifies that the piece belongs to the
    /// side to move and computes the legal moves itself.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<(), MoveError> {
        let mv = Move::new(from, to)?;
        let piece = self.board[from];
        if piece.is_empty() {
            return Err(MoveError::EmptySquare(from));
        }
        if piece.color() != self.turn {
            return Err(MoveError::BadSequence {
                expected: self.turn,
                found: piece.color(),
            });
        }
        let legal = self.legal_moves(from)?;
        if !legal.contains(&to) {
            if self.potential_moves(from)?.contains(&to) {
                return Err(MoveError::KingIsChecked(mv));
            }
            return Err(MoveError::IllegalMove(mv));
        }
        self.make_move(&legal, mv)
    }

    /// Returns the Zobrist hash of the piece placement and the side to move
    pub fn zobrist_hash(&self) -> u64 {
        let hash = self.board.zobrist_hash();
        match self.turn {
            Color::White => hash ^ zobrist::MOVE_SIDE,
            _ => hash,
        }
    }

    /// Wraps the board to allow pretty-printing, marking the side to move
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: &self.board,
            side: Some(self.turn),
            style,
        }
    }
}

impl Default for ChessBoard {
    fn default() -> ChessBoard {
        ChessBoard::new()
    }
}

impl Index<Coord> for ChessBoard {
    type Output = Piece;

    #[inline]
    fn index(&self, c: Coord) -> &Piece {
        &self.board[c]
    }
}

impl IndexMut<Coord> for ChessBoard {
    #[inline]
    fn index_mut(&mut self, c: Coord) -> &mut Piece {
        &mut self.board[c]
    }
}
