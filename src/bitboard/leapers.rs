//! Precomputed knight, king, and pawn attack tables.

use once_cell::sync::Lazy;

use crate::types::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for idx in 0..64u8 {
        let sq = Square::from_index(idx);
        let mut bb = 0u64;
        for &(dr, df) in deltas {
            let r = sq.rank() as i8 + dr;
            let f = sq.file() as i8 + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                bb |= 1u64 << (r * 8 + f);
            }
        }
        table[idx as usize] = Bitboard(bb);
    }
    table
}

fn pawn_attack_table(white: bool) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let dr: i8 = if white { 1 } else { -1 };
    for idx in 0..64u8 {
        let sq = Square::from_index(idx);
        let mut bb = 0u64;
        for df in [-1i8, 1] {
            let r = sq.rank() as i8 + dr;
            let f = sq.file() as i8 + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                bb |= 1u64 << (r * 8 + f);
            }
        }
        table[idx as usize] = Bitboard(bb);
    }
    table
}

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));
static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [pawn_attack_table(true), pawn_attack_table(false)]);

#[must_use]
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

#[must_use]
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

#[must_use]
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}
