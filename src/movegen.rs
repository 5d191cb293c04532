// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Successor generation.
//!
//! For every piece of the side to move, a geometric template gives the
//! candidate destinations. Squares held by the mover's own pieces are
//! removed, sliding pieces drop destinations whose line is blocked, and
//! pawns follow their own push and capture rules. Every surviving
//! (origin, destination) pair is a two-bit move mask that is applied to the
//! parent's boards to build a child position. Children that leave the
//! mover's king attacked are discarded.
use arrayvec::ArrayVec;

use crate::bitboard::Bitboard;
use crate::check;
use crate::geometry;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{PieceKind, Square, PROMOTION_KINDS};

/// The order piece kinds are visited in when building children. Children
/// appear grouped by kind in this order, origins from a1 to h8 within a kind
/// and destinations from a1 to h8 within an origin.
pub static GENERATION_ORDER: [PieceKind; 6] = [
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::King,
    PieceKind::Pawn,
    PieceKind::Queen,
    PieceKind::Rook,
];

/// A queen in the middle of an empty board has 27 destinations, the most of
/// any single piece.
const MAX_MASKS_PER_PIECE: usize = 27;

/// A move's origin and destination squares as a two-bit mask. Applied with
/// xor to the moving piece's board, it lifts the piece off its origin and
/// drops it on its destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveMask(Bitboard);

impl MoveMask {
    /// Marks a candidate a sliding piece cannot reach.
    pub const INVALID: MoveMask = MoveMask(Bitboard::all());

    pub fn new(origin: Square, destination: Square) -> MoveMask {
        MoveMask(Bitboard::of(origin) | Bitboard::of(destination))
    }

    pub fn is_valid(self) -> bool {
        self != MoveMask::INVALID
    }

    pub fn bits(self) -> Bitboard {
        self.0
    }

    /// The square this mask moves a piece on `origin` to.
    pub fn destination(self, origin: Square) -> Square {
        self.0.without(Bitboard::of(origin)).single_square()
    }
}

/// Produces move masks and successor positions.
///
/// A generator keeps scratch space between calls and is therefore used
/// through `&mut self`; every search owns its own.
pub struct MoveGenerator {
    scratch: ArrayVec<[MoveMask; MAX_MASKS_PER_PIECE]>,
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator {
            scratch: ArrayVec::new(),
        }
    }

    /// Every legal successor of `pos`.
    pub fn children(&mut self, pos: &Position) -> Vec<Position> {
        self.successors(pos)
            .into_iter()
            .map(|(_, child)| child)
            .collect()
    }

    /// Every legal successor of `pos` alongside the move that produces it.
    pub fn successors(&mut self, pos: &Position) -> Vec<(Move, Position)> {
        let mut successors = self.pseudo_legal_successors(pos);
        successors.retain(|(_, child)| !check::is_king_in_check(child));
        successors
    }

    /// Every successor of `pos` that obeys the movement rules of the piece
    /// moved, whether or not it leaves the mover's king attacked.
    pub fn pseudo_legal_successors(&mut self, pos: &Position) -> Vec<(Move, Position)> {
        let mover = pos.side_to_move();
        let mut successors = Vec::new();
        for &kind in GENERATION_ORDER.iter() {
            for origin in pos.pieces_of_kind(mover, kind) {
                self.fill_masks(pos, kind, origin);
                for &mask in self.scratch.iter() {
                    let destination = mask.destination(origin);
                    if kind == PieceKind::Pawn && destination.row() == mover.promotion_row() {
                        for &promoted in PROMOTION_KINDS.iter() {
                            successors.push((
                                Move::promotion(origin, destination, promoted),
                                pos.apply_move_mask(kind, mask.bits(), destination, Some(promoted)),
                            ));
                        }
                    } else {
                        successors.push((
                            Move::quiet(origin, destination),
                            pos.apply_move_mask(kind, mask.bits(), destination, None),
                        ));
                    }
                }
            }
        }

        successors
    }

    /// The pseudo-legal move masks of every piece of `kind` belonging to the
    /// side to move.
    pub fn move_masks(&mut self, pos: &Position, kind: PieceKind) -> Vec<MoveMask> {
        let mut masks = Vec::new();
        for origin in pos.pieces_of_kind(pos.side_to_move(), kind) {
            self.fill_masks(pos, kind, origin);
            masks.extend(self.scratch.iter().cloned());
        }

        masks
    }

    /// Every square the side to move attacks: the steppers' templates, both
    /// pawn capture squares whether or not anything stands there, and each
    /// sliding line up to and including the first occupied square.
    pub fn control_zone(&self, pos: &Position) -> Bitboard {
        let mover = pos.side_to_move();
        let occupancy = pos.occupancy();
        let mut zone = Bitboard::none();
        for sq in pos.kings(mover) {
            zone |= geometry::king_template(sq);
        }

        for sq in pos.knights(mover) {
            zone |= geometry::knight_template(sq);
        }

        for sq in pos.pawns(mover) {
            zone |= geometry::pawn_capture_template(sq, mover);
        }

        for &kind in GENERATION_ORDER.iter().filter(|kind| kind.is_sliding()) {
            for origin in pos.pieces_of_kind(mover, kind) {
                for target in sliding_template(kind, origin) {
                    if geometry::line_is_clear(origin, target, occupancy) {
                        zone.set(target);
                    }
                }
            }
        }

        zone
    }

    /// Fills the scratch buffer with the valid move masks of the piece of
    /// `kind` on `origin`.
    fn fill_masks(&mut self, pos: &Position, kind: PieceKind, origin: Square) {
        self.scratch.clear();
        let mover = pos.side_to_move();
        let own = pos.pieces(mover);
        match kind {
            PieceKind::King => {
                let targets = geometry::king_template(origin).without(own);
                self.push_targets(origin, targets);
            }
            PieceKind::Knight => {
                let targets = geometry::knight_template(origin).without(own);
                self.push_targets(origin, targets);
            }
            PieceKind::Pawn => {
                let targets = pawn_targets(pos, origin);
                self.push_targets(origin, targets);
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let occupancy = pos.occupancy();
                let candidates = sliding_template(kind, origin).without(own);
                for target in candidates {
                    let mask = if geometry::line_is_clear(origin, target, occupancy) {
                        MoveMask::new(origin, target)
                    } else {
                        MoveMask::INVALID
                    };

                    self.scratch.push(mask);
                }

                self.scratch.retain(|mask| mask.is_valid());
            }
        }
    }

    fn push_targets(&mut self, origin: Square, targets: Bitboard) {
        for target in targets {
            self.scratch.push(MoveMask::new(origin, target));
        }
    }
}

fn sliding_template(kind: PieceKind, origin: Square) -> Bitboard {
    match kind {
        PieceKind::Bishop => geometry::bishop_template(origin),
        PieceKind::Rook => geometry::rook_template(origin),
        PieceKind::Queen => geometry::queen_template(origin),
        _ => unreachable!("{:?} is not a sliding piece", kind),
    }
}

/// Destinations of the pawn on `origin`: one square forward onto an empty
/// square, two forward from the home row when both squares are empty, and
/// either forward diagonal when an enemy piece stands there.
fn pawn_targets(pos: &Position, origin: Square) -> Bitboard {
    let mover = pos.side_to_move();
    let occupancy = pos.occupancy();
    let enemy = pos.pieces(mover.toggle());

    let single = geometry::pawn_push_template(origin, mover).without(occupancy);
    let double = if origin.row() == mover.pawn_home_row() {
        single.shift_by(mover.forward(), 0).without(occupancy)
    } else {
        Bitboard::none()
    };

    let captures = geometry::pawn_capture_template(origin, mover) & enemy;
    single | double | captures
}
