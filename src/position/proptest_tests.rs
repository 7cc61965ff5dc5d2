//! Property-based tests over random legal move sequences (spec §8:
//! properties that span move generation, make/unmake, and hashing
//! together rather than a single module in isolation).

use proptest::prelude::*;
use rand::prelude::*;

use crate::eval::evaluate;
use crate::movegen::legal_moves;

use super::Position;

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn play_random_moves(pos: &mut Position, rng: &mut StdRng, count: usize) -> Vec<crate::types::Move> {
    let mut played = Vec::new();
    for _ in 0..count {
        let moves = legal_moves(pos);
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = moves[idx];
        pos.make_move(mv);
        played.push(mv);
    }
    played
}

proptest! {
    /// make_move followed by unmake_move in reverse order restores the
    /// hash and FEN exactly, for any sequence of legal moves.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in 1..=20usize) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_hash = pos.hash();
        let initial_fen = pos.to_fen();

        let played = play_random_moves(&mut pos, &mut rng, num_moves);
        for mv in played.into_iter().rev() {
            pos.unmake_move(mv);
        }

        prop_assert_eq!(pos.hash(), initial_hash);
        prop_assert_eq!(pos.to_fen(), initial_fen);
    }

    /// The incrementally maintained Zobrist key never drifts from a
    /// from-scratch recomputation, after any sequence of legal moves.
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in 1..=20usize) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = legal_moves(&pos);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            pos.make_move(moves[idx]);
            prop_assert_eq!(pos.hash(), pos.compute_hash_from_scratch());
        }
    }

    /// Round-tripping through FEN preserves the position (checked via
    /// hash, side to move, castling rights, and en-passant target
    /// rather than byte-for-byte string equality).
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in 1..=20usize) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);
        play_random_moves(&mut pos, &mut rng, num_moves);

        let fen = pos.to_fen();
        let restored = Position::from_fen(&fen).unwrap();

        prop_assert_eq!(pos.hash(), restored.hash());
        prop_assert_eq!(pos.side_to_move(), restored.side_to_move());
        prop_assert_eq!(pos.castling_rights(), restored.castling_rights());
        prop_assert_eq!(pos.en_passant_target(), restored.en_passant_target());
    }

    /// Every legal move, once played, leaves the mover's own king
    /// unattacked — the defining property of "legal".
    #[test]
    fn prop_legal_moves_never_leave_the_king_in_check(seed in seed_strategy()) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = legal_moves(&pos);
            if moves.is_empty() {
                break;
            }
            let mover = pos.side_to_move();
            for i in 0..moves.len() {
                let mv = moves[i];
                pos.make_move(mv);
                let king_sq = pos.king_square(mover);
                prop_assert!(
                    !pos.attacked_by(king_sq, mover.other()),
                    "legal move {mv} left {mover:?} in check"
                );
                pos.unmake_move(mv);
            }
            let idx = rng.gen_range(0..moves.len());
            pos.make_move(moves[idx]);
        }
    }

    /// The static evaluation never drifts into implausibly large
    /// territory for a position reached by ordinary legal play; a
    /// PST or mobility-table bug tends to blow this bound wide open.
    #[test]
    fn prop_eval_is_bounded_for_reachable_positions(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);
        play_random_moves(&mut pos, &mut rng, num_moves);

        let score = evaluate(&pos);
        prop_assert!(score.abs() < 10_000, "evaluation {score} is unreasonably large");
    }
}
