//! Pawn pushes, captures, double pushes, en passant, and promotions.

use crate::bitboard::{self, Direction};
use crate::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES, RANK_4, RANK_5};

struct PawnGeometry {
    up: Direction,
    up_left: Direction,
    up_right: Direction,
    double_push_rank: Bitboard,
    promo_rank: Bitboard,
}

fn geometry(color: Color) -> PawnGeometry {
    if color.is_white() {
        PawnGeometry {
            up: Direction::North,
            up_left: Direction::NorthWest,
            up_right: Direction::NorthEast,
            double_push_rank: RANK_4,
            promo_rank: crate::types::RANK_8,
        }
    } else {
        PawnGeometry {
            up: Direction::South,
            up_left: Direction::SouthEast,
            up_right: Direction::SouthWest,
            double_push_rank: RANK_5,
            promo_rank: crate::types::RANK_1,
        }
    }
}

fn push_emit(moves: &mut MoveList, from: Square, to: Square, promo_rank: Bitboard, is_capture: bool) {
    if promo_rank.contains(to) {
        for &piece in &PROMOTION_PIECES {
            moves.push(Move::promotion(from, to, piece, is_capture));
        }
    } else if is_capture {
        moves.push(Move::capture(from, to));
    } else {
        moves.push(Move::quiet(from, to));
    }
}

/// Generates every pseudo-legal pawn move for `color`, restricting
/// ordinary pushes/captures to `dest_mask`. En passant is attempted
/// unconditionally whenever the position's en-passant target is set
/// (the caller filters it out afterwards if it doesn't apply, e.g.
/// during check evasions where it must capture the checker).
pub fn generate(
    pos: &crate::position::Position,
    color: Color,
    dest_mask: Bitboard,
    moves: &mut MoveList,
) {
    let geo = geometry(color);
    let pawns = pos.pieces_of(color, Piece::Pawn);
    let empty = pos.empty_squares();
    let enemy = pos.color_occupancy(color.other());

    let singles = bitboard::shift(pawns, geo.up) & empty;
    for to in singles & dest_mask {
        let from = to.backward(color.is_white());
        push_emit(moves, from, to, geo.promo_rank, false);
    }

    let doubles = bitboard::shift(singles, geo.up) & empty & geo.double_push_rank;
    for to in doubles & dest_mask {
        let from = to.backward(color.is_white()).backward(color.is_white());
        moves.push(Move::double_pawn_push(from, to));
    }

    let left_captures = bitboard::shift(pawns, geo.up_left) & enemy;
    for to in left_captures & dest_mask {
        let from = from_of_diagonal(to, geo.up_left);
        push_emit(moves, from, to, geo.promo_rank, true);
    }

    let right_captures = bitboard::shift(pawns, geo.up_right) & enemy;
    for to in right_captures & dest_mask {
        let from = from_of_diagonal(to, geo.up_right);
        push_emit(moves, from, to, geo.promo_rank, true);
    }

    let ep_target = pos.en_passant_target();
    if !ep_target.is_none() {
        let ep_bb = Bitboard::from_square(ep_target);
        let left_ep = bitboard::shift(pawns, geo.up_left) & ep_bb;
        if !left_ep.is_empty() {
            moves.push(Move::en_passant(from_of_diagonal(ep_target, geo.up_left), ep_target));
        }
        let right_ep = bitboard::shift(pawns, geo.up_right) & ep_bb;
        if !right_ep.is_empty() {
            moves.push(Move::en_passant(from_of_diagonal(ep_target, geo.up_right), ep_target));
        }
    }
}

/// Inverts a single-step diagonal shift to recover the origin square of
/// a pawn capture landing on `to`.
fn from_of_diagonal(to: Square, dir: Direction) -> Square {
    let opposite = match dir {
        Direction::NorthWest => Direction::SouthEast,
        Direction::NorthEast => Direction::SouthWest,
        Direction::SouthWest => Direction::NorthEast,
        Direction::SouthEast => Direction::NorthWest,
        _ => unreachable!("pawn captures only ever move diagonally"),
    };
    bitboard::shift(Bitboard::from_square(to), opposite).lsb()
}
