//! The process-lifetime table of Zobrist random numbers.
//!
//! Seeded deterministically so that two runs of the engine hash
//! identical positions identically; this matters for reproducing
//! search traces and for the incremental-vs-from-scratch hash
//! invariant tested in [`crate::position`].

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::types::{CastlingRights, Color, Piece, Square};

/// Deterministic seed for the Zobrist random table. Any fixed value
/// works; what matters is that it never changes across builds.
const ZOBRIST_SEED: u64 = 0x5A6F_6272_6973_74u64;

pub struct ZobristKeys {
    /// Indexed by `color.index() * 6 + piece.index()`, then by square.
    piece_keys: [[u64; 64]; 12],
    castling_keys: [u64; 16],
    en_passant_file_keys: [u64; 8],
    black_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[0u64; 64]; 12];
        for entry in piece_keys.iter_mut() {
            for key in entry.iter_mut() {
                *key = rng.gen();
            }
        }
        let mut castling_keys = [0u64; 16];
        for key in castling_keys.iter_mut() {
            *key = rng.gen();
        }
        let mut en_passant_file_keys = [0u64; 8];
        for key in en_passant_file_keys.iter_mut() {
            *key = rng.gen();
        }
        ZobristKeys {
            piece_keys,
            castling_keys,
            en_passant_file_keys,
            black_to_move_key: rng.gen(),
        }
    }

    #[inline]
    fn piece_index(color: Color, piece: Piece) -> usize {
        color.index() * 6 + piece.index()
    }

    #[must_use]
    #[inline]
    pub fn piece_key(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[Self::piece_index(color, piece)][sq.index() as usize]
    }

    /// XOR contribution for a whole castling-rights nibble. Each of
    /// the 16 possible nibble values gets its own pre-combined key so
    /// updating rights is a single XOR rather than up to four.
    #[must_use]
    #[inline]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.bits() as usize]
    }

    #[must_use]
    #[inline]
    pub fn en_passant_key(&self, file: u8) -> u64 {
        self.en_passant_file_keys[file as usize]
    }

    #[must_use]
    #[inline]
    pub fn black_to_move_key(&self) -> u64 {
        self.black_to_move_key
    }
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
