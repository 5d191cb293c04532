// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use bitchess::{
    Color, Move, MoveGenerator, Piece, PieceKind, Position, Snapshot, SnapshotError, Square, TransitionError,
};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn transition_recovers_every_successor() {
    bitchess::initialize();
    let fens = [
        KIWIPETE,
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "1r2k3/P7/8/8/8/8/8/4K3 w",
    ];

    let mut gen = MoveGenerator::new();
    for fen in fens.iter() {
        let pos = Position::from_fen(fen).unwrap();
        for (mov, child) in gen.successors(&pos) {
            assert_eq!(Ok(mov), pos.transition_to(&child), "{} in {}", mov, fen);
        }
    }
}

#[test]
fn promotion_push_and_capture() {
    bitchess::initialize();
    let pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w").unwrap();
    let promotions: Vec<Move> = MoveGenerator::new()
        .successors(&pos)
        .into_iter()
        .map(|(mov, _)| mov)
        .filter(Move::is_promotion)
        .collect();

    assert_eq!(
        vec![
            Move::promotion(Square::A7, Square::A8, PieceKind::Queen),
            Move::promotion(Square::A7, Square::A8, PieceKind::Rook),
            Move::promotion(Square::A7, Square::A8, PieceKind::Knight),
            Move::promotion(Square::A7, Square::A8, PieceKind::Bishop),
            Move::promotion(Square::A7, Square::B8, PieceKind::Queen),
            Move::promotion(Square::A7, Square::B8, PieceKind::Rook),
            Move::promotion(Square::A7, Square::B8, PieceKind::Knight),
            Move::promotion(Square::A7, Square::B8, PieceKind::Bishop),
        ],
        promotions
    );
}

#[test]
fn promoted_piece_replaces_pawn() {
    bitchess::initialize();
    let pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w").unwrap();
    let (_, child) = MoveGenerator::new()
        .successors(&pos)
        .into_iter()
        .find(|(mov, _)| *mov == Move::promotion(Square::A7, Square::B8, PieceKind::Knight))
        .unwrap();

    assert_eq!(
        Some(Piece::new(PieceKind::Knight, Color::White)),
        child.piece_at(Square::B8)
    );
    assert_eq!(None, child.piece_at(Square::A7));
    assert!(child.rooks(Color::Black).empty());
    assert!(child.pawns(Color::White).empty());
    assert_eq!(Color::Black, child.side_to_move());
}

#[test]
fn transition_rejects_unrelated_positions() {
    bitchess::initialize();
    let start = Position::from_start_position();

    assert_eq!(Err(TransitionError::SameSideToMove), start.transition_to(&start));
    assert_eq!(
        Err(TransitionError::MoverUnchanged),
        start.transition_to(&start.flip_side())
    );

    let two_moves_on = Position::from_fen("rnbqkbnr/pppppppp/8/8/3PP3/8/PPP2PPP/RNBQKBNR b").unwrap();
    assert_eq!(
        Err(TransitionError::OriginNotSingleSquare(2)),
        start.transition_to(&two_moves_on)
    );
}

#[test]
fn snapshot_round_trip() {
    bitchess::initialize();
    let pos = Position::from_fen(KIWIPETE).unwrap();
    let snapshot = pos.to_snapshot();

    assert_eq!(Ok(pos.clone()), Position::from_snapshot(&snapshot));
    assert_eq!(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        pos.as_fen()
    );
}

#[test]
fn snapshot_built_by_hand() {
    bitchess::initialize();
    let mut snapshot = Snapshot::empty(Color::Black);
    snapshot
        .place(Square::E1, Piece::new(PieceKind::King, Color::White))
        .unwrap();
    snapshot
        .place(Square::E8, Piece::new(PieceKind::King, Color::Black))
        .unwrap();
    assert_eq!(
        Err(SnapshotError::SquareOccupied(Square::E8)),
        snapshot.place(Square::E8, Piece::new(PieceKind::Queen, Color::Black))
    );

    let pos = Position::from_snapshot(&snapshot).unwrap();
    assert_eq!(Some(Square::E1), pos.king_square(Color::White));
    assert_eq!(Some(Square::E8), pos.king_square(Color::Black));
    assert_eq!(Color::Black, pos.side_to_move());
}

#[test]
fn malformed_boards_are_rejected() {
    bitchess::initialize();
    assert_eq!(
        Err(SnapshotError::MissingKing(Color::Black)),
        Position::from_fen("8/8/8/8/8/8/8/4K3 w")
    );
    assert_eq!(
        Err(SnapshotError::PawnOnBackRank(Square::A8)),
        Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w")
    );
}

#[test]
fn hash_key_follows_side_to_move() {
    bitchess::initialize();
    let pos = Position::from_fen(KIWIPETE).unwrap();
    let same = Position::from_fen(KIWIPETE).unwrap();

    assert_eq!(pos.hash_key(), same.hash_key());
    assert_eq!(!pos.hash_key(), pos.flip_side().hash_key());
}
