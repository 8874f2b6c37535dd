use crate::types::{Color, File, Rank};

/// File delta of the king when castling
pub const CASTLING_OFFSET: isize = 2;

pub const KING_HOME_FILE: File = File::E;

pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
        Color::Neutral => panic!("neutral color has no castling rank"),
    }
}

pub const fn pawn_home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
        Color::Neutral => panic!("neutral color has no pawns"),
    }
}

pub const fn promote_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
        Color::Neutral => panic!("neutral color has no pawns"),
    }
}

/// Rank delta of a single pawn step
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
        Color::Neutral => panic!("neutral color has no pawns"),
    }
}

/// Returns all the sign reflections of the offset pair `(a, b)` and of its transpose `(b, a)`
///
/// Duplicates are removed, so `reflections(1, 0)` yields the four orthogonal directions,
/// `reflections(1, 1)` the four diagonal ones and `reflections(1, 2)` the eight knight jumps.
pub fn reflections(a: isize, b: isize) -> Vec<(isize, isize)> {
    let mut res = Vec::with_capacity(8);
    for (x, y) in [(a, b), (b, a)] {
        for (sx, sy) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            let item = (x * sx, y * sy);
            if !res.contains(&item) {
                res.push(item);
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn check_reflections(a: isize, b: isize, expected: usize) {
        let items = reflections(a, b);
        assert_eq!(items.len(), expected);
        assert_eq!(items.iter().collect::<BTreeSet<_>>().len(), expected);
        for &(x, y) in &items {
            assert!((x.abs(), y.abs()) == (a, b) || (x.abs(), y.abs()) == (b, a));
        }
    }

    #[test]
    fn test_reflections() {
        check_reflections(1, 0, 4);
        check_reflections(0, 1, 4);
        check_reflections(1, 1, 4);
        check_reflections(1, 2, 8);
        check_reflections(2, 1, 8);
    }

    #[test]
    fn test_pawn_geometry() {
        for c in [Color::White, Color::Black] {
            let home = pawn_home_rank(c).index() as isize;
            let promote = promote_rank(c).index() as isize;
            assert_eq!(home + 6 * pawn_forward_delta(c), promote);
            assert_eq!(
                castling_rank(c).index() as isize,
                home - pawn_forward_delta(c)
            );
        }
    }
}
