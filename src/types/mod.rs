//! The primitive board vocabulary: squares, bitboards, pieces, colors,
//! castling rights, and the packed move word.

mod bitboard;
mod castling;
mod color;
mod mv;
mod piece;
mod square;

pub use bitboard::{Bitboard, FILES, FILE_A, FILE_H, RANKS, RANK_1, RANK_2, RANK_4, RANK_5, RANK_7, RANK_8};
pub use castling::CastlingRights;
pub use color::Color;
pub use mv::{Move, MoveList, MAX_MOVES};
pub use piece::{Piece, ALL_PIECES, PIECE_VALUES, PROMOTION_PIECES};
pub use square::Square;
