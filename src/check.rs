// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! King safety. The move generator produces children without looking at
//! the mover's own king; every child is then run through
//! `is_king_in_check`, which asks whether the side that just moved left its
//! king attacked.
use crate::bitboard::Bitboard;
use crate::geometry;
use crate::position::Position;
use crate::types::Color;

/// Whether the side that made the last move, the side *not* to move in
/// `pos`, has its king attacked. A position for which this holds is not a
/// legal successor.
pub fn is_king_in_check(pos: &Position) -> bool {
    king_attacked(pos, pos.side_to_move().toggle())
}

/// Whether the king of `color` is attacked by any piece of the other color.
///
/// Candidate attackers are the enemy pieces standing on the squares a piece
/// of the same kind on the king's square would reach on an empty board. A
/// candidate really attacks when nothing other than the king itself stands
/// on the line between them; knights and pawns have an empty line and
/// attack whenever they are candidates. Kings within one square of each
/// other count as attacking, which keeps a king from stepping next to the
/// enemy king.
///
/// A missing king counts as attacked.
pub fn king_attacked(pos: &Position, color: Color) -> bool {
    let king = match pos.king_square(color) {
        Some(sq) => sq,
        None => return true,
    };

    let enemy = color.toggle();
    let blockers = pos.occupancy().without(Bitboard::of(king));
    let candidates = (pos.queens(enemy) & geometry::queen_template(king))
        | (pos.rooks(enemy) & geometry::rook_template(king))
        | (pos.bishops(enemy) & geometry::bishop_template(king))
        | (pos.knights(enemy) & geometry::knight_template(king))
        | (pos.pawns(enemy) & geometry::pawn_capture_template(king, color));

    for attacker in candidates {
        if geometry::line_is_clear(king, attacker, blockers) {
            return true;
        }
    }

    match pos.king_square(enemy) {
        Some(enemy_king) => geometry::distance(king, enemy_king) < 2,
        None => false,
    }
}
