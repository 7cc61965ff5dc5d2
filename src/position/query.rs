//! Attack and check queries used by move generation and search: who
//! attacks a square, whether the side to move is in check, and which
//! of its pieces are pinned to its king.

use crate::bitboard;
use crate::types::{Bitboard, Color, Piece, Square};

use super::Position;

impl Position {
    /// True iff any piece of `by` attacks `sq` in the current
    /// position.
    #[must_use]
    pub fn attacked_by(&self, sq: Square, by: Color) -> bool {
        !self.attackers_of(sq, by).is_empty()
    }

    /// Every piece of `by` that attacks `sq`.
    #[must_use]
    pub fn attackers_of(&self, sq: Square, by: Color) -> Bitboard {
        let mut attackers = Bitboard::EMPTY;
        attackers |= bitboard::pawn_attacks(by.other(), sq) & self.pieces_of(by, Piece::Pawn);
        attackers |= bitboard::knight_attacks(sq) & self.pieces_of(by, Piece::Knight);
        attackers |= bitboard::king_attacks(sq) & self.pieces_of(by, Piece::King);
        let rook_like = self.pieces_of(by, Piece::Rook) | self.pieces_of(by, Piece::Queen);
        let bishop_like = self.pieces_of(by, Piece::Bishop) | self.pieces_of(by, Piece::Queen);
        attackers |= bitboard::rook_attacks(sq, self.occupied()) & rook_like;
        attackers |= bitboard::bishop_attacks(sq, self.occupied()) & bishop_like;
        attackers
    }

    /// Enemy pieces currently giving check to the side to move.
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        let side = self.side_to_move();
        self.attackers_of(self.king_square(side), side.other())
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.checkers().is_empty()
    }

    #[must_use]
    pub fn double_check(&self) -> bool {
        self.checkers().more_than_one()
    }

    /// Pieces belonging to `color` that are pinned against their own
    /// king: removing one would expose the king to a slider it
    /// currently blocks.
    #[must_use]
    pub fn pinned(&self, color: Color) -> Bitboard {
        let king_sq = self.king_square(color);
        let enemy = color.other();
        let rook_like = self.pieces_of(enemy, Piece::Rook) | self.pieces_of(enemy, Piece::Queen);
        let bishop_like = self.pieces_of(enemy, Piece::Bishop) | self.pieces_of(enemy, Piece::Queen);
        let candidates = (bitboard::rook_attacks(king_sq, Bitboard::EMPTY) & rook_like)
            | (bitboard::bishop_attacks(king_sq, Bitboard::EMPTY) & bishop_like);

        let mut pinned = Bitboard::EMPTY;
        for pinner in candidates {
            let between = bitboard::between(king_sq, pinner) & self.occupied();
            if between.popcount() == 1 && !(between & self.color_occupancy(color)).is_empty() {
                pinned |= between;
            }
        }
        pinned
    }

    /// True iff the current Zobrist key has occurred earlier since the
    /// last irreversible move (capture or pawn push), the span the
    /// fifty-move counter already tracks.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        let current = self.hash();
        let halfmove = self.halfmove_clock() as usize;
        let history = &self.zobrist_history;
        let len = history.len();
        if len < 2 || halfmove < 2 {
            return false;
        }
        let floor = len.saturating_sub(halfmove + 1);
        history[floor..len - 1].iter().any(|&k| k == current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    #[test]
    fn startpos_has_no_checkers() {
        let pos = Position::startpos();
        assert!(!pos.in_check());
        assert!(pos.checkers().is_empty());
    }

    #[test]
    fn scholars_mate_setup_gives_check() {
        let pos = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(pos.in_check());
        assert!(!pos.double_check());
    }

    #[test]
    fn pinned_rook_is_reported() {
        // Black rook on e8 pins the white knight on e3 to the white
        // king on e1 along the e-file.
        let pos = Position::from_fen("4r1k1/8/8/8/8/4N3/8/4K3 w - - 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        assert!(pinned.contains(Square::new(2, 4)));
    }

    #[test]
    fn ep_discovered_check_square_is_still_attacked_by_rook_after_capture() {
        let mut pos = Position::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
        let ep_capture = Move::en_passant(Square::new(4, 1), Square::new(5, 2));
        pos.make_move(ep_capture);
        assert!(pos.attacked_by(Square::new(4, 0), Color::Black));
    }
}
