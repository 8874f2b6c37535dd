//! # Chessbot
//!
//! A chess rules engine with a fixed-depth minimax player.
//!
//! The game state is kept in [`ChessBoard`], which knows the position, the move history and
//! the side to move. Moves are generated per square by [`movegen`], and applied either
//! permanently with [`ChessBoard::make_move()`] or for a limited scope with [`TemporalMove`].
//! The [`Engine`] searches for the best move using the material evaluation from [`eval`].
//!
//! # Example
//!
//! ```
//! use chessbot::{ChessBoard, Coord, Engine, GameStatus};
//! use std::str::FromStr;
//!
//! let mut board = ChessBoard::new();
//! board
//!     .try_move(Coord::from_str("e2").unwrap(), Coord::from_str("e4").unwrap())
//!     .unwrap();
//! assert_eq!(board.status(), GameStatus::Ongoing);
//!
//! let reply = Engine::default().best_move(&board).unwrap();
//! board.try_move(reply.from(), reply.to()).unwrap();
//! assert_eq!(board.history().len(), 2);
//! ```

pub mod board;
pub mod chessboard;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod moves;
pub mod temporal;

mod offsets;
mod zobrist;

pub use chessbot_base::{geometry, types};

pub use board::{Board, BoardParseError, PrettyStyle};
pub use chessboard::{ChessBoard, GameStatus, ValidateError};
pub use engine::{Engine, EngineConfig, SearchOutcome};
pub use eval::Score;
pub use movegen::MoveList;
pub use moves::{Move, MoveError};
pub use temporal::TemporalMove;
pub use types::{Color, Coord, CoordError, File, Kind, Piece, Rank};
