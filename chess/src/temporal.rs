//! Scoped, reversible move application

use crate::chessboard::ChessBoard;
use crate::geometry;
use crate::moves::Move;
use crate::types::{Color, Coord, Kind, Piece};

use std::ops::{Deref, DerefMut};

/// Everything needed to take back a move applied by [`make_move_raw()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct RawUndo {
    pub moved: Piece,
    pub captured: Piece,
    pub passant: Option<(Coord, Piece)>,
    pub rook: Option<Move>,
}

fn placed_piece(piece: Piece, dst: Coord) -> Piece {
    if piece.kind() == Kind::Pawn && dst.rank() == geometry::promote_rank(piece.color()) {
        return Piece::from_parts(piece.color(), Kind::Queen);
    }
    piece
}

/// Physically applies `mv` to the squares, without touching history or turn
///
/// The en passant victim is determined from the current history, so this must be called
/// before `mv` itself is appended to it.
pub(crate) fn make_move_raw(b: &mut ChessBoard, mv: Move) -> RawUndo {
    let passant = b.passant_victim(mv).map(|sq| {
        let victim = b.board[sq];
        b.board[sq] = Piece::EMPTY;
        (sq, victim)
    });

    let rook = if b.is_castle(mv) {
        b.castling_rook_move(mv)
    } else {
        None
    };
    if let Some(rook) = rook {
        b.board[rook.to()] = b.board[rook.from()];
        b.board[rook.from()] = Piece::EMPTY;
    }

    let moved = b.board[mv.from()];
    let captured = b.board[mv.to()];
    b.board[mv.to()] = placed_piece(moved, mv.to());
    b.board[mv.from()] = Piece::EMPTY;

    RawUndo {
        moved,
        captured,
        passant,
        rook,
    }
}

/// Reverts [`make_move_raw()`]
pub(crate) fn unmake_move_raw(b: &mut ChessBoard, mv: Move, u: RawUndo) {
    b.board[mv.from()] = u.moved;
    b.board[mv.to()] = u.captured;
    if let Some(rook) = u.rook {
        b.board[rook.from()] = b.board[rook.to()];
        b.board[rook.to()] = Piece::EMPTY;
    }
    if let Some((sq, victim)) = u.passant {
        b.board[sq] = victim;
    }
}

/// Move that lasts until the end of the scope
///
/// Creating a `TemporalMove` relocates the moving piece (together with the en passant
/// victim, the castling rook or the promoted piece where applicable). Dropping it puts
/// every affected square back, on all exit paths including unwinding.
///
/// [`TemporalMove::new()`] leaves history and side to move untouched, so it is suited for
/// probing a single move, e.g. for check detection. [`TemporalMove::play()`] also records
/// the move in history and passes the turn, so a whole line of moves can be explored by
/// nesting guards.
///
/// The guard dereferences to the underlying [`ChessBoard`]. Nested guards are fine, but moves
/// committed through it with [`ChessBoard::make_move()`] are not taken back on drop.
///
/// # Example
///
/// ```
/// # use chessbot::{ChessBoard, Coord, Move, Piece, TemporalMove};
/// # use std::str::FromStr;
/// #
/// let mut board = ChessBoard::new();
/// let before = board.clone();
/// {
///     let mv = Move::from_str("e2e4").unwrap();
///     let guard = TemporalMove::new(&mut board, mv);
///     assert_eq!(guard[Coord::from_str("e2").unwrap()], Piece::EMPTY);
/// }
/// assert_eq!(board, before);
/// ```
pub struct TemporalMove<'a> {
    board: &'a mut ChessBoard,
    mv: Move,
    undo: RawUndo,
    history_len: usize,
    turn: Color,
    #[cfg(feature = "selftest")]
    hash: u64,
}

impl<'a> TemporalMove<'a> {
    fn apply(board: &'a mut ChessBoard, mv: Move, record: bool) -> Self {
        #[cfg(feature = "selftest")]
        let hash = board.zobrist_hash();
        let history_len = board.history.len();
        let turn = board.turn;
        let undo = make_move_raw(board, mv);
        if record {
            if let Some(rook) = undo.rook {
                board.history.push(rook);
            }
            board.history.push(mv);
            board.turn = turn.inv();
        }
        TemporalMove {
            board,
            mv,
            undo,
            history_len,
            turn,
            #[cfg(feature = "selftest")]
            hash,
        }
    }

    /// Applies `mv` to the squares only
    pub fn new(board: &'a mut ChessBoard, mv: Move) -> Self {
        Self::apply(board, mv, false)
    }

    /// Applies `mv` as a full ply: squares, history and side to move
    pub fn play(board: &'a mut ChessBoard, mv: Move) -> Self {
        Self::apply(board, mv, true)
    }

    #[inline]
    pub fn get_move(&self) -> Move {
        self.mv
    }

    /// Piece that stood on the destination square before the move
    #[inline]
    pub fn captured(&self) -> Piece {
        match self.undo.passant {
            Some((_, victim)) => victim,
            None => self.undo.captured,
        }
    }
}

impl<'a> Deref for TemporalMove<'a> {
    type Target = ChessBoard;

    #[inline]
    fn deref(&self) -> &ChessBoard {
        &*self.board
    }
}

impl<'a> DerefMut for TemporalMove<'a> {
    #[inline]
    fn deref_mut(&mut self) -> &mut ChessBoard {
        &mut *self.board
    }
}

impl<'a> Drop for TemporalMove<'a> {
    fn drop(&mut self) {
        self.board.history.truncate(self.history_len);
        self.board.turn = self.turn;
        unmake_move_raw(self.board, self.mv, self.undo);
        #[cfg(feature = "selftest")]
        debug_assert_eq!(self.board.zobrist_hash(), self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use std::panic::{self, AssertUnwindSafe};
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_str(s).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let mut b = ChessBoard::new();
        let before = b.clone();
        {
            let guard = TemporalMove::new(&mut b, mv("g1f3"));
            assert_eq!(guard[c("g1")], Piece::EMPTY);
            assert_eq!(
                guard[c("f3")],
                Piece::from_parts(Color::White, Kind::Knight)
            );
            assert!(guard.history().is_empty());
            assert_eq!(guard.colors_turn(), Color::White);
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_capture() {
        let board = Board::from_placement("4k3/8/8/3p4/4Q3/8/8/4K3").unwrap();
        let mut b = ChessBoard::from_board(board, Color::White).unwrap();
        let before = b.clone();
        {
            let guard = TemporalMove::new(&mut b, mv("e4d5"));
            assert_eq!(
                guard.captured(),
                Piece::from_parts(Color::Black, Kind::Pawn)
            );
            assert_eq!(guard[c("d5")], Piece::from_parts(Color::White, Kind::Queen));
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_play() {
        let mut b = ChessBoard::new();
        let before = b.clone();
        {
            let mut first = TemporalMove::play(&mut b, mv("e2e4"));
            assert_eq!(first.colors_turn(), Color::Black);
            assert_eq!(first.history(), &[mv("e2e4")]);
            {
                let second = TemporalMove::play(&mut first, mv("d7d5"));
                assert_eq!(second.colors_turn(), Color::White);
                assert_eq!(second.history().len(), 2);
            }
            assert_eq!(first.history(), &[mv("e2e4")]);
            assert_eq!(first[c("d7")], Piece::from_parts(Color::Black, Kind::Pawn));
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_castling_and_passant() {
        let board = Board::from_placement("4k3/8/8/8/3p4/8/4P3/4K2R").unwrap();
        let mut b = ChessBoard::from_board(board, Color::White).unwrap();
        {
            let guard = TemporalMove::play(&mut b, mv("e1g1"));
            assert_eq!(guard[c("f1")], Piece::from_parts(Color::White, Kind::Rook));
            assert_eq!(guard.history(), &[mv("h1f1"), mv("e1g1")]);
        }
        assert_eq!(b[c("h1")], Piece::from_parts(Color::White, Kind::Rook));
        assert_eq!(b[c("e1")], Piece::from_parts(Color::White, Kind::King));
        assert!(b.history().is_empty());

        let moves = b.legal_moves(c("e2")).unwrap();
        b.make_move(&moves, mv("e2e4")).unwrap();
        let before = b.clone();
        {
            let guard = TemporalMove::new(&mut b, mv("d4e3"));
            assert_eq!(guard[c("e4")], Piece::EMPTY);
            assert_eq!(
                guard.captured(),
                Piece::from_parts(Color::White, Kind::Pawn)
            );
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_promotion() {
        let board = Board::from_placement("4k3/8/8/8/8/8/p7/4K3").unwrap();
        let mut b = ChessBoard::from_board(board, Color::Black).unwrap();
        let before = b.clone();
        {
            let guard = TemporalMove::new(&mut b, mv("a2a1"));
            assert_eq!(guard[c("a1")], Piece::from_parts(Color::Black, Kind::Queen));
            assert!(guard.is_checked(Color::White));
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_restore_on_unwind() {
        let mut b = ChessBoard::new();
        let before = b.clone();
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = TemporalMove::play(&mut b, mv("b1c3"));
            panic!("interrupted search");
        }));
        assert!(res.is_err());
        assert_eq!(b, before);
    }
}
