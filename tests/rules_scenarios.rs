// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use artemis::eval::{BoardEvaluator, PieceSquareEvaluator, Score};
use artemis::{legal_moves, Color, Move, Piece, PieceKind, Position, Square};

fn parse(fen: &str) -> Position {
    Position::from_fen(fen).unwrap().0
}

#[test]
fn start_position_has_twenty_moves() {
    let pos = Position::from_start_position();

    // sixteen pawn moves and four knight moves, for either side.
    assert_eq!(20, legal_moves(&pos, Color::White).len());
    assert_eq!(20, legal_moves(&pos, Color::Black).len());
}

#[test]
fn kingside_castle() {
    let pos = parse("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    let castled = pos.make_move(Color::White, Move::new(Square::E1, Square::G1)).unwrap();

    // the king lands on g1 and the rook jumps over it to f1.
    assert_eq!(
        Some(Piece::new(PieceKind::King, Color::White)),
        castled.piece_at(Square::G1)
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        castled.piece_at(Square::F1)
    );
    assert_eq!(None, castled.piece_at(Square::E1));
    assert_eq!(None, castled.piece_at(Square::H1));

    // white can never castle again.
    assert!(!castled.can_castle_kingside(Color::White));
    assert!(!castled.can_castle_queenside(Color::White));
}

#[test]
fn queenside_castle() {
    let pos = parse("r3k3/8/8/8/8/8/8/4K3 b q - 0 1");
    let castled = pos.make_move(Color::Black, Move::new(Square::E8, Square::C8)).unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::King, Color::Black)),
        castled.piece_at(Square::C8)
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::Black)),
        castled.piece_at(Square::D8)
    );
    assert!(!castled.can_castle_queenside(Color::Black));
}

#[test]
fn no_castling_through_control() {
    // the black rook watches f1, which the king would cross.
    let pos = parse("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));

    // and no castling out of check either.
    let pos = parse("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));

    // a blocked path is no good.
    let pos = parse("4k3/8/8/8/8/8/8/4KN1R w K - 0 1");
    assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));
}

#[test]
fn king_move_clears_both_rights() {
    let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moved = pos.make_move(Color::White, Move::new(Square::E1, Square::E2)).unwrap();
    assert!(!moved.can_castle_kingside(Color::White));
    assert!(!moved.can_castle_queenside(Color::White));

    // walking back home doesn't restore anything.
    let back = moved.make_move(Color::White, Move::new(Square::E2, Square::E1)).unwrap();
    assert!(!back.can_castle_kingside(Color::White));
    assert!(!back.can_castle_queenside(Color::White));
    assert!(!back.is_legal(Color::White, Move::new(Square::E1, Square::G1)));

    // black's rights are untouched.
    assert!(back.can_castle_kingside(Color::Black));
    assert!(back.can_castle_queenside(Color::Black));
}

#[test]
fn rook_move_clears_one_right() {
    let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moved = pos.make_move(Color::White, Move::new(Square::H1, Square::H2)).unwrap();
    assert!(!moved.can_castle_kingside(Color::White));
    assert!(moved.can_castle_queenside(Color::White));

    let moved = pos.make_move(Color::White, Move::new(Square::A1, Square::A2)).unwrap();
    assert!(moved.can_castle_kingside(Color::White));
    assert!(!moved.can_castle_queenside(Color::White));
}

#[test]
fn capturing_a_corner_rook_clears_its_right() {
    // the white bishop takes the rook on h8; black loses the kingside castle only.
    let pos = parse("r3k2r/6B1/8/8/8/8/8/4K3 w kq - 0 1");
    let taken = pos.make_move(Color::White, Move::new(Square::G7, Square::H8)).unwrap();
    assert!(!taken.can_castle_kingside(Color::Black));
    assert!(taken.can_castle_queenside(Color::Black));
}

#[test]
fn en_passant_capture() {
    let mut pos = parse("7k/3p4/8/4P3/8/8/8/4K3 b - - 0 1");

    // black double-pushes past the white pawn.
    pos = pos.make_move(Color::Black, Move::new(Square::D7, Square::D5)).unwrap();
    assert!(pos.en_passant_flag(Color::Black, 3));

    // white's turn: its own flags expire, black's stay live for this one ply.
    pos.reset_en_passant(Color::White);
    let captured = pos.make_move(Color::White, Move::new(Square::E5, Square::D6)).unwrap();

    // the captured pawn is removed from beside the capturing pawn, not from the target.
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        captured.piece_at(Square::D6)
    );
    assert_eq!(None, captured.piece_at(Square::D5));
    assert_eq!(None, captured.piece_at(Square::E5));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut pos = parse("7k/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    pos = pos.make_move(Color::Black, Move::new(Square::D7, Square::D5)).unwrap();

    // white declines the capture.
    pos.reset_en_passant(Color::White);
    pos = pos.make_move(Color::White, Move::new(Square::E1, Square::E2)).unwrap();

    // black's turn: its flag from the double push is gone.
    pos.reset_en_passant(Color::Black);
    assert!(!pos.en_passant_flag(Color::Black, 3));
    pos = pos.make_move(Color::Black, Move::new(Square::H8, Square::G8)).unwrap();

    // so white can no longer take on d6.
    pos.reset_en_passant(Color::White);
    assert!(!pos.is_legal(Color::White, Move::new(Square::E5, Square::D6)));
}

#[test]
fn en_passant_that_exposes_the_king() {
    // capturing en passant would clear the fifth rank between the black rook and the white king.
    let pos = parse("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
    assert!(pos.is_pseudo_legal(Color::White, Move::new(Square::B5, Square::C6)));
    assert!(!pos.is_legal(Color::White, Move::new(Square::B5, Square::C6)));
}

#[test]
fn pinned_piece_cannot_move() {
    let pos = parse("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    let moves = legal_moves(&pos, Color::White);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.source() != Square::E2));
}

#[test]
fn promotion_waits_for_a_choice() {
    let pos = parse("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let mut pushed = pos.make_move(Color::White, Move::new(Square::E7, Square::E8)).unwrap();

    // the pawn sits on the last rank until someone decides what it becomes.
    assert_eq!(Some(Square::E8), pushed.pending_promotion());
    pushed.promote(Square::E8, PieceKind::Rook).unwrap();
    assert_eq!(None, pushed.pending_promotion());
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        pushed.piece_at(Square::E8)
    );

    // kings and pawns are not promotion choices.
    let mut pushed = pos.make_move(Color::White, Move::new(Square::E7, Square::E8)).unwrap();
    assert!(pushed.promote(Square::E8, PieceKind::King).is_err());
}

#[test]
fn promotion_moves_carry_their_kind() {
    let pos = parse("3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let moves = legal_moves(&pos, Color::White);

    // four kinds for the push and four for the capture on d8.
    let promotions: Vec<_> = moves.iter().filter(|m| m.promotion().is_some()).collect();
    assert_eq!(8, promotions.len());
    let knight = Move::promoting(Square::E7, Square::D8, PieceKind::Knight);
    assert!(moves.contains(&knight));
}

#[test]
fn stalemate_evaluates_to_zero() {
    // black's king is boxed in without being attacked.
    let pos = parse("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1");
    assert!(pos.is_stalemate(Color::Black));
    assert!(!pos.is_checkmate(Color::Black));
    assert!(pos.is_game_over());
    assert_eq!(Score::draw(), PieceSquareEvaluator::new().evaluate(&pos, 2));
}

#[test]
fn fools_mate() {
    let pos = parse("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(pos.is_check(Color::White));
    assert!(pos.is_checkmate(Color::White));
    assert!(!pos.is_checkmate(Color::Black));
    assert!(legal_moves(&pos, Color::White).is_empty());

    // the mated side is white, so the score is negative and grows with the remaining depth.
    let eval = PieceSquareEvaluator::new();
    assert_eq!(Score::new(-100_003), eval.evaluate(&pos, 3));
    assert_eq!(Score::new(-100_000), eval.evaluate(&pos, 0));
}

#[test]
fn black_mated_scores_positive() {
    let pos = parse("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1");
    let mated = pos.make_move(Color::White, Move::new(Square::D1, Square::D8)).unwrap();
    assert!(mated.is_checkmate(Color::Black));
    let eval = PieceSquareEvaluator::new();
    assert_eq!(Score::new(100_001), eval.evaluate(&mated, 1));
}

#[test]
fn copies_never_leak() {
    let pos = parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let original = pos;

    // castle, capture, and a pawn push, each on its own copy.
    for &mov in &[
        Move::new(Square::E1, Square::G1),
        Move::new(Square::E5, Square::F7),
        Move::new(Square::A2, Square::A4),
    ] {
        let mut copy = pos;
        copy.apply_move(mov);
        assert_ne!(original, copy);
        assert_eq!(original, pos);
    }
}
