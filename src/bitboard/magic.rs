//! Magic-bitboard slider attack tables.
//!
//! Rook and bishop attack sets are precomputed per square and per
//! relevant occupancy subset, addressed by a perfect hash: `(occupancy
//! & mask).wrapping_mul(magic) >> shift`. The magic numbers are not
//! hardcoded; each square searches for one candidate that hashes every
//! occupancy subset without collision, verified against a brute-force
//! ray walk. The search runs once, at first use, behind a [`Lazy`].

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::types::{Bitboard, Square};

const ROOK_DELTAS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Every square strictly between `sq` and the edge of the board along
/// `deltas`, excluding the final (edge) square of each ray: the blocker
/// relevance mask for magic indexing.
fn relevant_mask(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let mut bb = 0u64;
    for &(dr, df) in deltas {
        let (mut r, mut f) = (sq.rank() as i8, sq.file() as i8);
        loop {
            let nr = r + dr;
            let nf = f + df;
            if !(0..8).contains(&nr) || !(0..8).contains(&nf) {
                break;
            }
            r = nr;
            f = nf;
            let after_r = r + dr;
            let after_f = f + df;
            if (0..8).contains(&after_r) && (0..8).contains(&after_f) {
                bb |= 1u64 << (r * 8 + f);
            } else {
                break;
            }
        }
    }
    Bitboard(bb)
}

/// The real attack set from `sq` given `occ` as blockers: walks every
/// ray to the edge of the board or the first occupied square
/// (inclusive).
fn sliding_attack(sq: Square, occ: Bitboard, deltas: &[(i8, i8)]) -> Bitboard {
    let mut bb = 0u64;
    for &(dr, df) in deltas {
        let (mut r, mut f) = (sq.rank() as i8, sq.file() as i8);
        loop {
            r += dr;
            f += df;
            if !(0..8).contains(&r) || !(0..8).contains(&f) {
                break;
            }
            let idx = (r * 8 + f) as u64;
            bb |= 1u64 << idx;
            if occ.0 & (1u64 << idx) != 0 {
                break;
            }
        }
    }
    Bitboard(bb)
}

/// The `index`-th subset of the bits set in `mask` (standard
/// occupancy-enumeration trick used to populate every blocker pattern
/// a magic must hash correctly).
fn occupancy_subset(index: usize, mask: Bitboard) -> Bitboard {
    let mut occ = 0u64;
    let mut bits = mask;
    let mut i = 0usize;
    while !bits.is_empty() {
        let sq = bits.pop_lsb();
        if index & (1 << i) != 0 {
            occ |= 1u64 << sq.index();
        }
        i += 1;
    }
    Bitboard(occ)
}

struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    attacks: Vec<Bitboard>,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occ: Bitboard) -> usize {
        let relevant = occ.0 & self.mask.0;
        ((relevant.wrapping_mul(self.magic)) >> self.shift) as usize
    }

    #[inline]
    fn attacks(&self, occ: Bitboard) -> Bitboard {
        self.attacks[self.index(occ)]
    }
}

/// Biasing candidate magics toward sparse bit patterns converges the
/// search much faster than uniform random u64s.
fn sparse_random(rng: &mut StdRng) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

fn find_magic(sq: Square, deltas: &[(i8, i8)], rng: &mut StdRng) -> MagicEntry {
    let mask = relevant_mask(sq, deltas);
    let bits = mask.popcount();
    let size = 1usize << bits;
    let shift = 64 - bits;

    let mut occupancies = Vec::with_capacity(size);
    let mut reference = Vec::with_capacity(size);
    for i in 0..size {
        let occ = occupancy_subset(i, mask);
        occupancies.push(occ);
        reference.push(sliding_attack(sq, occ, deltas));
    }

    loop {
        let magic = sparse_random(rng);
        // A magic with too few high bits in the top byte hashes
        // poorly; the popcount check mirrors the classic heuristic for
        // skipping obviously-bad candidates before the full trial.
        if ((mask.0.wrapping_mul(magic)) >> 56).count_ones() < 6 {
            continue;
        }

        let mut attacks = vec![Bitboard::EMPTY; size];
        let mut used = vec![false; size];
        let mut failed = false;
        for i in 0..size {
            let idx = ((occupancies[i].0.wrapping_mul(magic)) >> shift) as usize;
            if !used[idx] {
                used[idx] = true;
                attacks[idx] = reference[i];
            } else if attacks[idx] != reference[i] {
                failed = true;
                break;
            }
        }
        if !failed {
            return MagicEntry {
                mask,
                magic,
                shift,
                attacks,
            };
        }
    }
}

struct MagicTable {
    entries: Vec<MagicEntry>,
}

impl MagicTable {
    fn build(deltas: &[(i8, i8)], seed: u64) -> MagicTable {
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = (0..64)
            .map(|idx| find_magic(Square::from_index(idx), deltas, &mut rng))
            .collect();
        MagicTable { entries }
    }

    #[inline]
    fn attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.entries[sq.index() as usize].attacks(occ)
    }
}

static ROOK_MAGICS: Lazy<MagicTable> = Lazy::new(|| MagicTable::build(&ROOK_DELTAS, 0xB00C_u64));
static BISHOP_MAGICS: Lazy<MagicTable> =
    Lazy::new(|| MagicTable::build(&BISHOP_DELTAS, 0xB15B_u64));

#[must_use]
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ROOK_MAGICS.attacks(sq, occ)
}

#[must_use]
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    BISHOP_MAGICS.attacks(sq, occ)
}

#[must_use]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}
