//! Move-generator correctness against the reference perft counts
//! named in spec §8. These only exercise the public API (`Position`
//! and `movegen::perft`), the way an external consumer of the crate
//! would.

use chess_engine::movegen;
use chess_engine::Position;

#[test]
fn startpos_perft_5() {
    let mut pos = Position::startpos();
    assert_eq!(movegen::perft(&mut pos, 5), 4_865_609);
}

#[test]
fn kiwipete_perft_4() {
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(movegen::perft(&mut pos, 4), 4_085_603);
}

#[test]
fn en_passant_position_perft_3() {
    let mut pos =
        Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2").unwrap();
    assert_eq!(movegen::perft(&mut pos, 3), 9_467);
}
