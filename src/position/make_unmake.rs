//! The make/unmake pair. `make_move` mutates in place and pushes onto
//! the four undo stacks plus the Zobrist history; `unmake_move` is its
//! exact mirror and only ever needs the move word itself plus the tops
//! of those stacks, since popping the Zobrist history restores the
//! hash without having to XOR anything back out.

use crate::types::{CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::ZOBRIST;

use super::Position;

impl Position {
    /// Applies `m`, which must be pseudo-legal in the current
    /// position. Legality (does this leave the mover's own king in
    /// check) is the caller's responsibility; see
    /// [`crate::movegen`].
    pub fn make_move(&mut self, m: Move) {
        let mover = self.side_to_move;
        let from = m.from();
        let to = m.to();
        let mut key = self.hash();

        let moved_piece = self
            .piece_at(from)
            .expect("make_move called with no piece on the origin square");

        // Step 1: fifty-move counter.
        let reset_halfmove = moved_piece == Piece::Pawn || m.is_capture();
        let new_halfmove = if reset_halfmove { 0 } else { self.halfmove_clock() + 1 };

        // Step 2: remove the old EP file key, if any.
        let old_ep = self.en_passant_target();
        if !old_ep.is_none() {
            key ^= ZOBRIST.en_passant_key(old_ep.file());
        }

        // Step 3: toggle side-to-move key and flip the mover.
        key ^= ZOBRIST.black_to_move_key();
        self.side_to_move = mover.other();
        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        // Step 4: remove moving piece at `from`.
        self.remove_piece(mover, moved_piece, from);
        key ^= ZOBRIST.piece_key(mover, moved_piece, from);

        let mut captured: Option<Piece> = None;

        // Step 5/6: captures, including en passant.
        if m.is_en_passant() {
            let captured_sq = Square::new(from.rank(), to.file());
            self.remove_piece(mover.other(), Piece::Pawn, captured_sq);
            key ^= ZOBRIST.piece_key(mover.other(), Piece::Pawn, captured_sq);
            captured = Some(Piece::Pawn);
        } else if m.is_capture() {
            let victim = self
                .piece_at(to)
                .expect("capture move with no piece on the destination square");
            self.remove_piece(mover.other(), victim, to);
            key ^= ZOBRIST.piece_key(mover.other(), victim, to);
            captured = Some(victim);
        }

        // Step 7: promotion replaces the pawn with the chosen piece.
        let placed_piece = m.promoted_piece().unwrap_or(moved_piece);
        self.put_piece(mover, placed_piece, to);
        key ^= ZOBRIST.piece_key(mover, placed_piece, to);

        // Step 8: castling also relocates the rook.
        if m.is_castle_kingside() || m.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if m.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(mover, Piece::Rook, rook_from);
            key ^= ZOBRIST.piece_key(mover, Piece::Rook, rook_from);
            self.put_piece(mover, Piece::Rook, rook_to);
            key ^= ZOBRIST.piece_key(mover, Piece::Rook, rook_to);
        }

        // Step 9: update castling rights from king/rook movement or capture.
        let mut rights = self.castling_rights();
        key ^= ZOBRIST.castling_key(rights);
        if moved_piece == Piece::King {
            rights = rights.without_color(mover);
        }
        rights = strip_corner_right(rights, from);
        rights = strip_corner_right(rights, to);
        key ^= ZOBRIST.castling_key(rights);

        // Step 10: new EP target.
        let new_ep = if m.is_double_pawn_push() {
            from.forward(mover.is_white())
        } else {
            Square::NONE
        };
        if !new_ep.is_none() {
            key ^= ZOBRIST.en_passant_key(new_ep.file());
        }

        // Step 11: push the new stack tops.
        self.en_passant_stack.push(new_ep);
        self.castling_stack.push(rights);
        self.halfmove_stack.push(new_halfmove);
        self.captured_stack.push(captured);
        self.zobrist_history.push(key);

        // Step 12: refresh derived occupancy caches.
        self.recompute_caches();
    }

    /// The exact inverse of [`Position::make_move`] for the same `m`
    /// just applied.
    pub fn unmake_move(&mut self, m: Move) {
        debug_assert!(self.ply_count() > 0, "unmake_move called with nothing to unmake");

        self.zobrist_history.pop();
        self.castling_stack.pop();
        self.halfmove_stack.pop();
        let captured = self.captured_stack.pop().flatten();
        self.en_passant_stack.pop();

        let mover = self.side_to_move.other();
        let from = m.from();
        let to = m.to();

        let moved_piece = self
            .piece_at(to)
            .expect("unmake_move: no piece on the destination square");
        self.remove_piece(mover, moved_piece, to);

        if m.is_castle_kingside() || m.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if m.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(mover, Piece::Rook, rook_to);
            self.put_piece(mover, Piece::Rook, rook_from);
        }

        let original_piece = if m.is_promotion() { Piece::Pawn } else { moved_piece };
        self.put_piece(mover, original_piece, from);

        if m.is_en_passant() {
            let captured_sq = Square::new(from.rank(), to.file());
            self.put_piece(mover.other(), Piece::Pawn, captured_sq);
        } else if let Some(victim) = captured {
            self.put_piece(mover.other(), victim, to);
        }

        self.side_to_move = mover;
        if mover == Color::Black {
            self.fullmove_number -= 1;
        }
        self.recompute_caches();
    }

    /// Toggles the side to move without moving a piece; used by
    /// null-move pruning.
    pub fn make_null_move(&mut self) {
        let mut key = self.hash();
        let old_ep = self.en_passant_target();
        if !old_ep.is_none() {
            key ^= ZOBRIST.en_passant_key(old_ep.file());
        }
        key ^= ZOBRIST.black_to_move_key();

        self.en_passant_stack.push(Square::NONE);
        self.castling_stack.push(self.castling_rights());
        self.halfmove_stack.push(self.halfmove_clock());
        self.captured_stack.push(None);
        self.zobrist_history.push(key);

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
    }

    pub fn unmake_null_move(&mut self) {
        debug_assert!(self.ply_count() > 0, "unmake_null_move called with nothing to unmake");
        self.zobrist_history.pop();
        self.castling_stack.pop();
        self.halfmove_stack.pop();
        self.captured_stack.pop();
        self.en_passant_stack.pop();

        self.side_to_move = self.side_to_move.other();
        if self.side_to_move == Color::Black {
            self.fullmove_number -= 1;
        }
    }

}

fn strip_corner_right(rights: CastlingRights, sq: Square) -> CastlingRights {
    match (sq.rank(), sq.file()) {
        (0, 0) => rights.without(Color::White, false),
        (0, 7) => rights.without(Color::White, true),
        (7, 0) => rights.without(Color::Black, false),
        (7, 7) => rights.without(Color::Black, true),
        _ => rights,
    }
}
