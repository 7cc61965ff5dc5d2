//! Knight, bishop, rook, queen, and king pseudo-legal move generation.

use crate::bitboard;
use crate::position::Position;
use crate::types::{Bitboard, Color, Move, MoveList, Piece};

fn emit_from(moves: &mut MoveList, from: crate::types::Square, targets: Bitboard, enemy: Bitboard) {
    for to in targets {
        if enemy.contains(to) {
            moves.push(Move::capture(from, to));
        } else {
            moves.push(Move::quiet(from, to));
        }
    }
}

/// Generates pseudo-legal knight, bishop, rook, queen, and king moves
/// for `color`, restricted to `dest_mask`. Castling is handled
/// separately in [`super::castling`].
pub fn generate(pos: &Position, color: Color, dest_mask: Bitboard, moves: &mut MoveList) {
    let own = pos.color_occupancy(color);
    let enemy = pos.color_occupancy(color.other());
    let occ = pos.occupied();

    for from in pos.pieces_of(color, Piece::Knight) {
        let targets = bitboard::knight_attacks(from) & !own & dest_mask;
        emit_from(moves, from, targets, enemy);
    }

    for from in pos.pieces_of(color, Piece::Bishop) {
        let targets = bitboard::bishop_attacks(from, occ) & !own & dest_mask;
        emit_from(moves, from, targets, enemy);
    }

    for from in pos.pieces_of(color, Piece::Rook) {
        let targets = bitboard::rook_attacks(from, occ) & !own & dest_mask;
        emit_from(moves, from, targets, enemy);
    }

    for from in pos.pieces_of(color, Piece::Queen) {
        let targets = bitboard::queen_attacks(from, occ) & !own & dest_mask;
        emit_from(moves, from, targets, enemy);
    }

    let king_sq = pos.king_square(color);
    let targets = bitboard::king_attacks(king_sq) & !own & dest_mask;
    emit_from(moves, king_sq, targets, enemy);
}
