use crate::types::{Coord, Piece};

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

pub fn pieces(piece: Piece, coord: Coord) -> u64 {
    PIECES[piece.index()][coord.index()]
}
