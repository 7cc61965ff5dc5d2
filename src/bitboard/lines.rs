//! `betweenBB` and `lineBB`: the tables that drive pin detection and
//! check-evasion target generation.

use once_cell::sync::Lazy;

use crate::types::{Bitboard, Square};

fn direction(a: Square, b: Square) -> Option<(i8, i8)> {
    let (ar, af) = (a.rank() as i8, a.file() as i8);
    let (br, bf) = (b.rank() as i8, b.file() as i8);
    let (dr, df) = (br - ar, bf - af);
    if dr == 0 && df == 0 {
        return None;
    }
    if dr == 0 {
        Some((0, df.signum()))
    } else if df == 0 {
        Some((dr.signum(), 0))
    } else if dr.abs() == df.abs() {
        Some((dr.signum(), df.signum()))
    } else {
        None
    }
}

fn build_between() -> Vec<Vec<Bitboard>> {
    let mut table = vec![vec![Bitboard::EMPTY; 64]; 64];
    for a_idx in 0..64u8 {
        let a = Square::from_index(a_idx);
        for b_idx in 0..64u8 {
            let b = Square::from_index(b_idx);
            let Some((dr, df)) = direction(a, b) else {
                continue;
            };
            let mut bb = 0u64;
            let (mut r, mut f) = (a.rank() as i8 + dr, a.file() as i8 + df);
            while (r, f) != (b.rank() as i8, b.file() as i8) {
                bb |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            table[a_idx as usize][b_idx as usize] = Bitboard(bb);
        }
    }
    table
}

fn build_line() -> Vec<Vec<Bitboard>> {
    let mut table = vec![vec![Bitboard::EMPTY; 64]; 64];
    for a_idx in 0..64u8 {
        let a = Square::from_index(a_idx);
        for b_idx in 0..64u8 {
            let b = Square::from_index(b_idx);
            if a == b {
                table[a_idx as usize][b_idx as usize] = Bitboard::from_square(a);
                continue;
            }
            let Some((dr, df)) = direction(a, b) else {
                continue;
            };
            let mut bb = 0u64;
            // Walk the full line in both directions from `a` across the
            // whole board, not just the a..b segment.
            for sign in [1i8, -1i8] {
                let (mut r, mut f) = (a.rank() as i8, a.file() as i8);
                loop {
                    bb |= 1u64 << (r * 8 + f);
                    let nr = r + dr * sign;
                    let nf = f + df * sign;
                    if !(0..8).contains(&nr) || !(0..8).contains(&nf) {
                        break;
                    }
                    r = nr;
                    f = nf;
                }
            }
            table[a_idx as usize][b_idx as usize] = Bitboard(bb);
        }
    }
    table
}

static BETWEEN: Lazy<Vec<Vec<Bitboard>>> = Lazy::new(build_between);
static LINE: Lazy<Vec<Vec<Bitboard>>> = Lazy::new(build_line);

/// Squares strictly between `a` and `b` if they share a rank, file, or
/// diagonal; otherwise empty.
#[must_use]
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index() as usize][b.index() as usize]
}

/// The full line through `a` and `b`, including both endpoints and
/// every square beyond them to the edges of the board, if they are
/// collinear; otherwise empty.
#[must_use]
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    LINE[a.index() as usize][b.index() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_same_rank() {
        let bb = between(Square::new(0, 0), Square::new(0, 4));
        assert_eq!(bb.popcount(), 3);
        assert!(bb.contains(Square::new(0, 2)));
    }

    #[test]
    fn between_diagonal() {
        let bb = between(Square::new(0, 0), Square::new(3, 3));
        assert_eq!(bb.popcount(), 2);
    }

    #[test]
    fn between_non_collinear_is_empty() {
        assert!(between(Square::new(0, 0), Square::new(3, 4)).is_empty());
    }

    #[test]
    fn line_spans_whole_board() {
        let bb = line(Square::new(0, 0), Square::new(0, 4));
        assert!(bb.contains(Square::new(0, 7)));
        assert!(bb.contains(Square::new(0, 0)));
    }

    #[test]
    fn line_between_king_and_pinner_contains_pinned_square() {
        let king = Square::new(4, 4);
        let pinner = Square::new(4, 0);
        let pinned = Square::new(4, 2);
        assert!(line(king, pinner).contains(pinned));
    }
}
