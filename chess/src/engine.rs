//! Fixed-depth minimax search

use crate::chessboard::ChessBoard;
use crate::eval::{self, Score};
use crate::movegen;
use crate::moves::Move;
use crate::temporal::TemporalMove;
use crate::types::Color;

use tracing::{debug, trace};

/// Search parameters
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    /// Number of plies to look ahead
    pub depth: u32,
}

impl EngineConfig {
    #[inline]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { depth: 3 }
    }
}

/// Result of [`Engine::search()`]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best move for the side to move, `None` if the depth is zero or there are no legal moves
    pub best: Option<Move>,
    /// Score of the best line from the point of view of the side to move
    pub score: Score,
    /// Number of visited positions, including the root
    pub nodes: u64,
}

/// Minimax player
///
/// The engine holds no state besides its configuration. Every search works on its own copy
/// of the position, so the caller's board is never touched.
///
/// The search is full-width and deterministic: moves are tried in the order given by
/// [`movegen::all_legal_moves()`], and among equally scored moves the first one wins.
#[derive(Debug, Default, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        Engine { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the best move for the side to move, searching at the configured depth
    pub fn best_move(&self, board: &ChessBoard) -> Option<Move> {
        self.search(board.clone(), self.config.depth).best
    }

    /// Returns the best move for the side to move, searching `depth` plies
    ///
    /// Returns `None` if `depth` is zero or the game is already over.
    pub fn best_notation(&self, board: ChessBoard, depth: u32) -> Option<Move> {
        self.search(board, depth).best
    }

    /// Returns the minimax score of the position from the point of view of the side to move
    pub fn minimax(&self, board: ChessBoard, depth: u32) -> Score {
        self.search(board, depth).score
    }

    /// Runs the search and returns the best move together with its score
    pub fn search(&self, mut board: ChessBoard, depth: u32) -> SearchOutcome {
        let own = board.colors_turn();
        let mut searcher = Searcher { own, nodes: 0 };

        if depth == 0 || board.is_game_over(own) {
            let score = searcher.minimax(&mut board, depth);
            return SearchOutcome {
                best: None,
                score,
                nodes: searcher.nodes,
            };
        }

        searcher.nodes += 1;
        let mut best: Option<(Move, Score)> = None;
        for mv in movegen::all_legal_moves(&mut board, own) {
            let score = {
                let mut guard = TemporalMove::play(&mut board, mv);
                searcher.minimax(&mut guard, depth - 1)
            };
            trace!(%mv, %score, "root move scored");
            if best.map_or(true, |(_, cur)| score > cur) {
                best = Some((mv, score));
            }
        }

        let outcome = SearchOutcome {
            best: best.map(|(mv, _)| mv),
            score: best.map_or_else(|| eval::balance(&board, own), |(_, score)| score),
            nodes: searcher.nodes,
        };
        debug!(
            depth,
            nodes = outcome.nodes,
            best = ?outcome.best,
            score = %outcome.score,
            "search finished"
        );
        outcome
    }
}

struct Searcher {
    own: Color,
    nodes: u64,
}

impl Searcher {
    /// Scores a terminal node, or returns `None` if the search must go deeper
    fn leaf(&self, b: &mut ChessBoard, depth: u32) -> Option<Score> {
        let side = b.colors_turn();
        if b.is_game_over(side) {
            if !b.is_checked(side) {
                return Some(eval::balance(b, self.own));
            }
            // Faster mates are preferred.
            let mate = Score::MATE + Score(f64::from(depth));
            return Some(if side == self.own { -mate } else { mate });
        }
        if depth == 0 {
            return Some(eval::balance(b, self.own));
        }
        None
    }

    fn minimax(&mut self, b: &mut ChessBoard, depth: u32) -> Score {
        self.nodes += 1;
        if let Some(score) = self.leaf(b, depth) {
            return score;
        }

        let side = b.colors_turn();
        let maximize = side == self.own;
        let mut best: Option<Score> = None;
        for mv in movegen::all_legal_moves(b, side) {
            let score = {
                let mut guard = TemporalMove::play(b, mv);
                self.minimax(&mut guard, depth - 1)
            };
            let better = match best {
                Some(cur) if maximize => score > cur,
                Some(cur) => score < cur,
                None => true,
            };
            if better {
                best = Some(score);
            }
        }
        best.unwrap_or_else(|| eval::balance(b, self.own))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use std::str::FromStr;

    fn mv(s: &str) -> Move {
        Move::from_str(s).unwrap()
    }

    fn from_placement(s: &str, turn: Color) -> ChessBoard {
        ChessBoard::from_board(Board::from_placement(s).unwrap(), turn).unwrap()
    }

    #[test]
    fn test_config() {
        assert_eq!(Engine::default().config().depth, 3);
        let engine = Engine::new(EngineConfig::default().with_depth(1));
        assert_eq!(engine.config().depth, 1);
    }

    #[test]
    fn test_zero_depth() {
        let engine = Engine::default();
        let b = ChessBoard::new();
        let outcome = engine.search(b.clone(), 0);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.nodes, 1);
        assert_eq!(outcome.score, eval::balance(&b, Color::White));
        assert_eq!(engine.best_notation(b, 0), None);
    }

    #[test]
    fn test_nodes() {
        let outcome = Engine::default().search(ChessBoard::new(), 1);
        assert_eq!(outcome.nodes, 21);
        assert!(outcome.best.is_some());
    }

    #[test]
    fn test_deterministic() {
        let engine = Engine::default();
        let mut b = ChessBoard::new();
        b.try_move(mv("e2e4").from(), mv("e2e4").to()).unwrap();
        let first = engine.search(b.clone(), 2);
        let second = engine.search(b.clone(), 2);
        assert_eq!(first, second);
        assert_eq!(engine.minimax(b.clone(), 2), first.score);
        assert_eq!(engine.best_notation(b, 2), first.best);
    }

    #[test]
    fn test_mate_in_one() {
        let engine = Engine::default();
        let b = from_placement("6k1/5ppp/8/8/8/8/8/R5K1", Color::White);
        for depth in [1, 2] {
            let outcome = engine.search(b.clone(), depth);
            assert_eq!(outcome.best, Some(mv("a1a8")));
            assert!(outcome.score.is_mate());
            assert!(outcome.score > Score::ZERO);
        }
    }

    #[test]
    fn test_takes_hanging_queen() {
        let engine = Engine::default();
        let b = from_placement("4k3/8/8/3q4/8/8/3R4/4K3", Color::White);
        assert_eq!(engine.best_notation(b, 1), Some(mv("d2d5")));
        let b = from_placement("4k3/3r4/8/3Q4/8/8/8/4K3", Color::Black);
        assert_eq!(engine.best_notation(b.clone(), 1), Some(mv("d7d5")));
        assert!(engine.minimax(b, 1) > Score::ZERO);
    }

    #[test]
    fn test_finished_game() {
        let engine = Engine::default();
        let mut b = ChessBoard::new();
        for m in ["e2e4", "f7f6", "d2d4", "g7g5", "d1h5"] {
            b.try_move(mv(m).from(), mv(m).to()).unwrap();
        }
        let outcome = engine.search(b, 2);
        assert_eq!(outcome.best, None);
        assert!(outcome.score.is_mate());
        assert!(outcome.score < Score::ZERO);

        let b = from_placement("k7/8/1Q6/8/8/8/8/7K", Color::Black);
        let outcome = engine.search(b.clone(), 2);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.score, eval::balance(&b, Color::Black));
    }

    #[test]
    fn test_board_untouched() {
        let engine = Engine::new(EngineConfig { depth: 2 });
        let mut b = ChessBoard::new();
        b.try_move(mv("g1f3").from(), mv("g1f3").to()).unwrap();
        let before = b.clone();
        let reply = engine.best_move(&b).unwrap();
        assert_eq!(b, before);
        assert_eq!(b[reply.from()].color(), Color::Black);
        b.try_move(reply.from(), reply.to()).unwrap();
    }
}
