//! Staged, pin-aware legal move generation.
//!
//! Move generation proceeds in two stages: a pseudo-legal generator
//! produces candidate moves per piece kind (or, when the side to move
//! is in check, a dedicated evasion generator restricts candidates to
//! moves that address every checker), then a legality filter removes
//! anything that would leave the king attacked. Only king moves, moves
//! by a pinned piece, and en-passant captures need the expensive
//! per-move legality check; everything else is legal by construction
//! once pins are accounted for.

mod castling;
mod pawns;
mod perft;
mod pieces;

pub use perft::perft;

use crate::bitboard;
use crate::position::Position;
use crate::types::{Bitboard, Color, Move, MoveList, Piece, Square};

/// Every legal move available to the side to move.
#[must_use]
pub fn legal_moves(pos: &Position) -> MoveList {
    let side = pos.side_to_move();
    if pos.in_check() {
        generate_evasions(pos, side)
    } else {
        let pseudo = generate_pseudo_legal(pos, side, Bitboard::ALL, true, true);
        filter_legal(pos, side, pseudo)
    }
}

/// Legal captures and promotions only, used by quiescence search. When
/// the side to move is in check this still returns full evasions:
/// standing pat while in check is never sound, so the caller is
/// expected to search all of them rather than just captures.
#[must_use]
pub fn legal_captures(pos: &Position) -> MoveList {
    let side = pos.side_to_move();
    if pos.in_check() {
        return generate_evasions(pos, side);
    }
    let enemy = pos.color_occupancy(side.other());
    let pseudo = generate_pseudo_legal(pos, side, enemy, true, false);
    filter_legal(pos, side, pseudo)
}

/// Pseudo-legal moves landing in `dest_mask`, without castling's own
/// path-safety rule applied yet (castling is appended separately since
/// it is never restricted by `dest_mask`).
fn generate_pseudo_legal(
    pos: &Position,
    side: Color,
    dest_mask: Bitboard,
    include_ep: bool,
    include_castling: bool,
) -> MoveList {
    let mut moves = MoveList::new();
    pawns::generate(pos, side, dest_mask, &mut moves);
    pieces::generate(pos, side, dest_mask, &mut moves);
    if !include_ep {
        moves.retain(|m| !m.is_en_passant());
    }
    if include_castling {
        castling::generate(pos, side, &mut moves);
    }
    moves
}

/// Removes any pseudo-legal move that would leave the mover's own king
/// attacked.
fn filter_legal(pos: &Position, side: Color, mut pseudo: MoveList) -> MoveList {
    let king_sq = pos.king_square(side);
    let pinned = pos.pinned(side);
    pseudo.retain(|m| is_legal(pos, m, side, king_sq, pinned));
    pseudo
}

/// True iff playing `m` does not leave `side`'s king attacked. Only
/// king moves, pinned-piece moves, and en-passant captures are
/// actually evaluated here (by construction, everything else is safe);
/// everything else is accepted unconditionally for speed.
fn is_legal(pos: &Position, m: Move, side: Color, king_sq: Square, pinned: Bitboard) -> bool {
    if m.from() == king_sq {
        let occ_without_king = pos.occupied().without(king_sq);
        return !attacked_with_occ(pos, m.to(), side.other(), occ_without_king);
    }
    if m.is_en_passant() {
        return ep_is_legal(pos, m, side, king_sq);
    }
    if pinned.contains(m.from()) {
        // A pinned piece may only move along the line connecting it,
        // the king, and the pinner.
        return !bitboard::line(king_sq, m.from()).is_empty()
            && bitboard::line(king_sq, m.from()).contains(m.to());
    }
    true
}

/// Whether `sq` is attacked by `by`, using a caller-supplied occupancy
/// bitboard instead of the position's actual occupancy. Needed to
/// check a king's destination with its own origin square vacated (a
/// slider "sees through" the square the king is leaving) and to check
/// en-passant's double-pawn-removal discovered check.
fn attacked_with_occ(pos: &Position, sq: Square, by: Color, occ: Bitboard) -> bool {
    if !(bitboard::pawn_attacks(by.other(), sq) & pos.pieces_of(by, Piece::Pawn)).is_empty() {
        return true;
    }
    if !(bitboard::knight_attacks(sq) & pos.pieces_of(by, Piece::Knight)).is_empty() {
        return true;
    }
    if !(bitboard::king_attacks(sq) & pos.pieces_of(by, Piece::King)).is_empty() {
        return true;
    }
    let rook_like = pos.pieces_of(by, Piece::Rook) | pos.pieces_of(by, Piece::Queen);
    if !(bitboard::rook_attacks(sq, occ) & rook_like).is_empty() {
        return true;
    }
    let bishop_like = pos.pieces_of(by, Piece::Bishop) | pos.pieces_of(by, Piece::Queen);
    !(bitboard::bishop_attacks(sq, occ) & bishop_like).is_empty()
}

/// En passant's discovered-check special case: removing both the
/// capturing and captured pawns from the same rank can expose the king
/// to a horizontal slider that neither pawn's own removal alone would
/// reveal.
fn ep_is_legal(pos: &Position, m: Move, side: Color, king_sq: Square) -> bool {
    let captured_sq = Square::new(m.from().rank(), m.to().file());
    let occ_after = pos
        .occupied()
        .without(m.from())
        .without(captured_sq)
        .with(m.to());
    !attacked_with_occ(pos, king_sq, side.other(), occ_after)
}

/// Squares a king in check must treat as unsafe even though they
/// appear to be beyond the checking slider: the slider's ray continues
/// through the king's own square, so stepping further along that ray
/// does not escape the attack.
fn slider_ray_mask(pos: &Position, side: Color, king_sq: Square, checkers: Bitboard) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for checker in checkers {
        let is_slider = pos
            .pieces_of(side.other(), Piece::Rook)
            .contains(checker)
            || pos.pieces_of(side.other(), Piece::Bishop).contains(checker)
            || pos.pieces_of(side.other(), Piece::Queen).contains(checker);
        if is_slider {
            let line = bitboard::line(king_sq, checker);
            if !line.is_empty() {
                mask |= line & !bitboard::between(king_sq, checker) & !Bitboard::from_square(checker);
            }
        }
    }
    mask
}

/// Generates every legal move when the side to move is in check.
fn generate_evasions(pos: &Position, side: Color) -> MoveList {
    let king_sq = pos.king_square(side);
    let checkers = pos.checkers();
    let mut moves = MoveList::new();

    let ray_mask = slider_ray_mask(pos, side, king_sq, checkers);
    let king_targets = bitboard::king_attacks(king_sq) & !pos.color_occupancy(side) & !ray_mask;
    let enemy = pos.color_occupancy(side.other());
    for to in king_targets {
        let occ_without_king = pos.occupied().without(king_sq);
        if attacked_with_occ(pos, to, side.other(), occ_without_king) {
            continue;
        }
        if enemy.contains(to) {
            moves.push(Move::capture(king_sq, to));
        } else {
            moves.push(Move::quiet(king_sq, to));
        }
    }

    if checkers.more_than_one() {
        return moves;
    }

    let checker_sq = checkers.lsb();
    let targets = bitboard::between(king_sq, checker_sq) | Bitboard::from_square(checker_sq);

    let pinned = pos.pinned(side);
    let mut blockers = generate_pseudo_legal(pos, side, targets, true, false);
    blockers.retain(|m| {
        if m.from() == king_sq {
            return false;
        }
        if m.is_en_passant() {
            // En passant can only resolve a single check by capturing
            // the checking pawn itself, never by interposition.
            let captured_sq = Square::new(m.from().rank(), m.to().file());
            if captured_sq != checker_sq {
                return false;
            }
            return ep_is_legal(pos, m, side, king_sq);
        }
        if pinned.contains(m.from()) {
            let line = bitboard::line(king_sq, m.from());
            return !line.is_empty() && line.contains(m.to());
        }
        true
    });

    for i in 0..blockers.len() {
        moves.push(blockers[i]);
    }
    moves
}
