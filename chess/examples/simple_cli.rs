// Simple command-line application to play chess against the engine
//
// Run with `--human` to let two people play. Set `RUST_LOG=chessbot=debug` to see what the
// engine thinks.

use chessbot::{
    board::PrettyStyle, ChessBoard, Color, Coord, Engine, EngineConfig, GameStatus, MoveError,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn read_coord(stdin: &mut impl BufRead, prompt: &str) -> Option<Result<Coord, MoveError>> {
    print!("{}: ", prompt);
    io::stdout().flush().unwrap();
    let mut s = String::new();
    if stdin.read_line(&mut s).unwrap() == 0 {
        return None;
    }
    Some(Coord::from_str(s.trim()).map_err(MoveError::from))
}

fn report(board: &mut ChessBoard) -> bool {
    match board.status() {
        GameStatus::Ongoing => false,
        GameStatus::Check => {
            println!("{} is in check", board.colors_turn());
            false
        }
        GameStatus::Checkmate => {
            println!("Checkmate! {} wins", board.colors_turn().inv());
            true
        }
        GameStatus::Stalemate => {
            println!("Stalemate, it's a draw");
            true
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let human_only = env::args().any(|a| a == "--human");
    let engine = Engine::new(EngineConfig::default());
    let mut stdin = io::stdin().lock();
    let mut board = ChessBoard::new();

    loop {
        println!("{}", board.pretty(PrettyStyle::Utf8));

        if !human_only && board.colors_turn() == Color::Black {
            match engine.best_move(&board) {
                Some(mv) => {
                    println!("Engine plays {}", mv);
                    board.try_move(mv.from(), mv.to()).unwrap();
                }
                None => break,
            }
        } else {
            let from = match read_coord(&mut stdin, "Move from") {
                Some(Ok(c)) => c,
                Some(Err(e)) => {
                    println!("Bad square: {}\n", e);
                    continue;
                }
                None => break,
            };
            match board.legal_moves(from) {
                Ok(moves) => {
                    let list: Vec<String> = moves.iter().map(|c| c.to_string()).collect();
                    println!("Legal moves: {}", list.join(" "));
                }
                Err(e) => {
                    println!("{}\n", e);
                    continue;
                }
            }
            let to = match read_coord(&mut stdin, "Move to") {
                Some(Ok(c)) => c,
                Some(Err(e)) => {
                    println!("Bad square: {}\n", e);
                    continue;
                }
                None => break,
            };
            if let Err(e) = board.try_move(from, to) {
                println!("Bad move: {}\n", e);
                continue;
            }
        }

        println!();
        if report(&mut board) {
            println!("{}", board.pretty(PrettyStyle::Utf8));
            println!("Starting a new game\n");
            board.restore();
        }
    }
}
