//! Bitboard primitives: directional shifts, precomputed leaper attack
//! tables, magic-bitboard slider attacks, and the `between`/`line`
//! tables used for pin detection and check evasion.

mod leapers;
mod lines;
mod magic;

pub use leapers::{king_attacks, knight_attacks, pawn_attacks};
pub use lines::{between, line};
pub use magic::{bishop_attacks, queen_attacks, rook_attacks};

use crate::types::Bitboard;

/// The eight ray directions a sliding piece or pawn can shift along.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Shift every bit of `bb` one step in `dir`, masking off wraparound
/// across the a/h files.
#[must_use]
pub fn shift(bb: Bitboard, dir: Direction) -> Bitboard {
    match dir {
        Direction::North => bb.shift_north(),
        Direction::South => bb.shift_south(),
        Direction::East => bb.shift_east(),
        Direction::West => bb.shift_west(),
        Direction::NorthEast => bb.shift_north_east(),
        Direction::NorthWest => bb.shift_north_west(),
        Direction::SouthEast => bb.shift_south_east(),
        Direction::SouthWest => bb.shift_south_west(),
    }
}
