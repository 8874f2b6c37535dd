//! Move generation
//!
//! Moves are generated per square, in two tiers. [`potential_moves()`] only looks at the
//! geometry of the piece, while [`legal_moves()`] additionally drops the destinations that
//! would leave the own king in check.

use crate::chessboard::ChessBoard;
use crate::moves::{Move, MoveError};
use crate::types::{Color, Coord, File, Kind};
use crate::{geometry, offsets};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Destination squares of a single piece
///
/// A queen in the center has 27 destinations at most, so the list never overflows.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Coord, 32>);

impl Deref for MoveList {
    type Target = ArrayVec<Coord, 32>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Coord;
    type IntoIter = arrayvec::IntoIter<Coord, 32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

struct MoveGenImpl<'a> {
    board: &'a ChessBoard,
    src: Coord,
    color: Color,
    dst: MoveList,
}

impl<'a> MoveGenImpl<'a> {
    fn new(board: &'a ChessBoard, src: Coord) -> Self {
        MoveGenImpl {
            board,
            src,
            color: board[src].color(),
            dst: MoveList::new(),
        }
    }

    fn is_free_or_enemy(&self, c: Coord) -> bool {
        self.board[c].is_empty() || self.board.is_enemy(self.src, c)
    }

    fn gen_slider(&mut self, dirs: &[(isize, isize)]) {
        for &(delta_file, delta_rank) in dirs {
            let mut p = self.src;
            while let Some(next) = p.try_shift(delta_file, delta_rank) {
                if self.board[next].is_occupied() {
                    if self.board.is_enemy(self.src, next) {
                        self.dst.push(next);
                    }
                    break;
                }
                self.dst.push(next);
                p = next;
            }
        }
    }

    fn gen_leaper(&mut self, offs: &[(isize, isize)]) {
        for &(delta_file, delta_rank) in offs {
            if let Some(next) = self.src.try_shift(delta_file, delta_rank) {
                if self.is_free_or_enemy(next) {
                    self.dst.push(next);
                }
            }
        }
    }

    fn gen_pawn(&mut self) {
        let forward = geometry::pawn_forward_delta(self.color);

        if let Some(one) = self.src.try_shift(0, forward) {
            if self.board[one].is_empty() {
                self.dst.push(one);
                if self.src.rank() == geometry::pawn_home_rank(self.color) {
                    if let Some(two) = one.try_shift(0, forward) {
                        if self.board[two].is_empty() {
                            self.dst.push(two);
                        }
                    }
                }
            }
        }

        for delta_file in [-1, 1] {
            if let Some(next) = self.src.try_shift(delta_file, forward) {
                if self.board.is_enemy(self.src, next) {
                    self.dst.push(next);
                }
            }
        }

        for delta_file in [-1, 1] {
            if let Some(adjacent) = self.src.try_shift(delta_file, 0) {
                if self.board.passant_is_legal(self.src, adjacent) {
                    if let Some(next) = adjacent.try_shift(0, forward) {
                        self.dst.push(next);
                    }
                }
            }
        }
    }

    fn gen_castling(&mut self) {
        let rank = geometry::castling_rank(self.color);
        if self.src != Coord::from_parts(geometry::KING_HOME_FILE, rank)
            || self.board.piece_was_moved(self.src)
        {
            return;
        }
        for (rook_file, dir) in [(File::A, -1), (File::H, 1)] {
            let rook = Coord::from_parts(rook_file, rank);
            if !self.board[rook].is(self.color, Kind::Rook) || self.board.piece_was_moved(rook) {
                continue;
            }
            let (lo, hi) = if dir < 0 {
                (rook_file.index() + 1, self.src.file().index())
            } else {
                (self.src.file().index() + 1, rook_file.index())
            };
            let path_clear = (lo..hi)
                .all(|f| self.board[Coord::from_parts(File::from_index(f), rank)].is_empty());
            if !path_clear {
                continue;
            }
            if let Some(dst) = self.src.try_shift(dir * geometry::CASTLING_OFFSET, 0) {
                self.dst.push(dst);
            }
        }
    }

    fn gen(mut self) -> MoveList {
        match self.board[self.src].kind() {
            Kind::Pawn => self.gen_pawn(),
            Kind::Rook => self.gen_slider(&offsets::ROOK),
            Kind::Bishop => self.gen_slider(&offsets::BISHOP),
            Kind::Queen => self.gen_slider(&offsets::QUEEN),
            Kind::Knight => self.gen_leaper(&offsets::KNIGHT),
            Kind::King => {
                self.gen_leaper(&offsets::KING);
                self.gen_castling();
            }
            Kind::Empty => {}
        }
        self.dst
    }
}

/// Returns the squares the piece on `location` can geometrically reach
///
/// Whether the move leaves the own king in check is not considered. Castling destinations
/// are included when neither king nor rook has moved and the squares between them are empty.
pub fn potential_moves(b: &ChessBoard, location: Coord) -> Result<MoveList, MoveError> {
    if b[location].is_empty() {
        return Err(MoveError::EmptySquare(location));
    }
    Ok(MoveGenImpl::new(b, location).gen())
}

fn castling_path_is_safe(b: &mut ChessBoard, mv: Move, color: Color) -> bool {
    if b.is_checked(color) {
        return false;
    }
    let step = mv.file_delta().signum();
    let passed = match mv.from().try_shift(step, 0) {
        Some(passed) => passed,
        None => return false,
    };
    match Move::new(mv.from(), passed) {
        Ok(step_mv) => b.move_is_unchecking(step_mv),
        Err(_) => false,
    }
}

fn is_legal(b: &mut ChessBoard, mv: Move, color: Color) -> bool {
    if b.is_castle(mv) && !castling_path_is_safe(b, mv, color) {
        return false;
    }
    b.move_is_unchecking(mv)
}

/// Returns the legal destinations of the piece on `location`, sorted
///
/// Every candidate from [`potential_moves()`] is tried with a
/// [`TemporalMove`](crate::TemporalMove), and dropped if the
/// own king ends up in check. A castling king must also neither start in check nor pass
/// through an attacked square.
pub fn legal_moves(b: &mut ChessBoard, location: Coord) -> Result<MoveList, MoveError> {
    let color = b[location].color();
    let mut res = MoveList::new();
    for dst in potential_moves(b, location)? {
        let mv = Move::new(location, dst)?;
        if is_legal(b, mv, color) {
            res.push(dst);
        }
    }
    res.sort();
    Ok(res)
}

/// Returns `true` if any piece of `color` has at least one legal move
pub fn has_legal_moves(b: &mut ChessBoard, color: Color) -> bool {
    for src in Coord::iter() {
        if b[src].color() != color {
            continue;
        }
        let candidates = match potential_moves(b, src) {
            Ok(candidates) => candidates,
            Err(_) => continue,
        };
        for dst in candidates {
            if let Ok(mv) = Move::new(src, dst) {
                if is_legal(b, mv, color) {
                    return true;
                }
            }
        }
    }
    false
}

/// Returns all the legal moves of `color`
///
/// Sources are visited in [`Coord::iter()`] order, and destinations of each source are
/// sorted, so the result is deterministic.
pub fn all_legal_moves(b: &mut ChessBoard, color: Color) -> Vec<Move> {
    let mut res = Vec::new();
    for src in Coord::iter() {
        if b[src].color() != color {
            continue;
        }
        if let Ok(dsts) = legal_moves(b, src) {
            res.extend(dsts.into_iter().filter_map(|dst| Move::new(src, dst).ok()));
        }
    }
    res
}
