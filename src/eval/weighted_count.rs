// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::bitboard::{Bitboard, BB_FILES, BB_RANKS};
use crate::eval::{BoardEvaluator, Score};
use crate::position::Position;
use crate::types::{Color, PieceKind};

const QUEEN_WEIGHT: f32 = 9f32;
const ROOK_WEIGHT: f32 = 5f32;
const BISHOP_WEIGHT: f32 = 3f32;
const KNIGHT_WEIGHT: f32 = 3f32;
const PAWN_WEIGHT: f32 = 1f32;
const CENTER_WEIGHT: f32 = 1f32;
const SMALL_CENTER_WEIGHT: f32 = 0.5;

/// Files c through f, ranks 3 through 6.
const CENTER: Bitboard = BB_FILES[2]
    .or(BB_FILES[3])
    .or(BB_FILES[4])
    .or(BB_FILES[5])
    .and(BB_RANKS[2].or(BB_RANKS[3]).or(BB_RANKS[4]).or(BB_RANKS[5]));

/// d4, e4, d5 and e5.
const SMALL_CENTER: Bitboard = BB_FILES[3]
    .or(BB_FILES[4])
    .and(BB_RANKS[3].or(BB_RANKS[4]));

/// Material plus centre occupation.
///
/// Every term is counted as Black's total minus White's: queens 9, rooks 5,
/// bishops and knights 3, pawns 1, then 1 for each piece of any kind in the
/// central sixteen squares and another 0.5 for each piece in the central
/// four.
pub struct WeightedCountEvaluator;

impl WeightedCountEvaluator {
    pub fn new() -> WeightedCountEvaluator {
        WeightedCountEvaluator
    }
}

impl Default for WeightedCountEvaluator {
    fn default() -> WeightedCountEvaluator {
        WeightedCountEvaluator
    }
}

impl BoardEvaluator for WeightedCountEvaluator {
    fn favors(&self) -> Color {
        Color::Black
    }

    fn evaluate(&self, pos: &Position) -> Score {
        let material = [
            (PieceKind::Queen, QUEEN_WEIGHT),
            (PieceKind::Rook, ROOK_WEIGHT),
            (PieceKind::Bishop, BISHOP_WEIGHT),
            (PieceKind::Knight, KNIGHT_WEIGHT),
            (PieceKind::Pawn, PAWN_WEIGHT),
        ]
        .iter()
        .map(|&(kind, weight)| evaluate_metric(weight, |c| pos.pieces_of_kind(c, kind)))
        .sum::<f32>();

        let center = evaluate_metric(CENTER_WEIGHT, |c| pos.pieces(c) & CENTER);
        let small_center = evaluate_metric(SMALL_CENTER_WEIGHT, |c| pos.pieces(c) & SMALL_CENTER);
        Score::Evaluated(material + center + small_center)
    }
}

fn evaluate_metric<F>(weight: f32, func: F) -> f32
where
    F: Fn(Color) -> Bitboard,
{
    weight * (func(Color::Black).count() as f32 - func(Color::White).count() as f32)
}
