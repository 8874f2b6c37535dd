use chessbot::{
    movegen, ChessBoard, Color, Coord, Engine, GameStatus, Move, MoveError, TemporalMove,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

const MAX_PLIES: usize = 120;

fn check_move_sets(b: &mut ChessBoard) {
    for src in Coord::iter() {
        if b[src].is_empty() {
            assert_eq!(b.legal_moves(src), Err(MoveError::EmptySquare(src)));
            continue;
        }
        let potential = b.potential_moves(src).unwrap();
        let legal = b.legal_moves(src).unwrap();
        for dst in &legal {
            assert!(potential.contains(dst), "{src} -> {dst} is not potential");
        }
        assert!(legal.windows(2).all(|w| w[0] < w[1]));
    }
}

fn check_temporal_moves(b: &mut ChessBoard, moves: &[Move]) {
    let before = b.clone();
    let hash = b.zobrist_hash();
    for &mv in moves {
        {
            let guard = TemporalMove::play(b, mv);
            assert_ne!(guard.colors_turn(), before.colors_turn());
            assert!(!guard.is_checked(before.colors_turn()));
        }
        assert_eq!(*b, before);
        assert_eq!(b.zobrist_hash(), hash);
    }
}

fn check_failed_moves(b: &mut ChessBoard, rng: &mut impl Rng) {
    let before = b.clone();
    let side = b.colors_turn();

    let own: Vec<Coord> = Coord::iter().filter(|&c| b[c].color() == side).collect();
    let src = own[rng.gen_range(0..own.len())];
    let legal = b.legal_moves(src).unwrap();
    if let Some(dst) = Coord::iter().find(|&c| c != src && !legal.contains(&c)) {
        let mv = Move::new(src, dst).unwrap();
        assert!(b.try_move(src, dst).is_err());
        assert_eq!(b.make_move(&legal, mv), Err(MoveError::IllegalMove(mv)));
        assert_eq!(*b, before);
    }

    if let Some(enemy) = Coord::iter().find(|&c| b[c].color() == side.inv()) {
        let dst = Coord::iter().find(|&c| c != enemy).unwrap();
        assert_eq!(
            b.try_move(enemy, dst),
            Err(MoveError::BadSequence {
                expected: side,
                found: side.inv()
            })
        );
        assert_eq!(*b, before);
    }
}

fn play_random_game(seed: u64) -> ChessBoard {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut b = ChessBoard::new();
    for _ in 0..MAX_PLIES {
        let side = b.colors_turn();
        let moves = movegen::all_legal_moves(&mut b, side);
        let status = b.status();
        assert_eq!(moves.is_empty(), status.is_finished());
        assert_eq!(
            status == GameStatus::Checkmate,
            moves.is_empty() && b.is_checked(side)
        );
        if moves.is_empty() {
            break;
        }

        check_move_sets(&mut b);
        check_temporal_moves(&mut b, &moves);
        check_failed_moves(&mut b, &mut rng);

        let mv = moves[rng.gen_range(0..moves.len())];
        let len = b.history().len();
        b.try_move(mv.from(), mv.to()).unwrap();
        assert_eq!(b.last_move(), Some(mv));
        assert!(b.history().len() == len + 1 || b.history().len() == len + 2);
        assert_eq!(b.colors_turn(), side.inv());
        assert!(!b.is_checked(side));
    }
    b
}

#[test]
fn test_random_games() {
    for seed in 0..8 {
        play_random_game(seed);
    }
}

#[test]
fn test_search_is_deterministic() {
    let engine = Engine::default();
    for seed in [3, 11] {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut b = ChessBoard::new();
        for _ in 0..10 {
            let side = b.colors_turn();
            let moves = movegen::all_legal_moves(&mut b, side);
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            b.try_move(mv.from(), mv.to()).unwrap();
        }
        let before = b.clone();
        let first = engine.search(b.clone(), 2);
        let second = engine.search(b.clone(), 2);
        assert_eq!(first, second);
        assert_eq!(b, before);
        if let Some(best) = first.best {
            assert_eq!(b[best.from()].color(), b.colors_turn());
            b.try_move(best.from(), best.to()).unwrap();
        }
    }
}

#[test]
fn test_initial_mobility() {
    let mut b = ChessBoard::new();
    for color in [Color::White, Color::Black] {
        let moves = movegen::all_legal_moves(&mut b, color);
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|mv| b[mv.from()].color() == color));
    }
}
