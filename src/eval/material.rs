// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, Score};
use crate::position::Position;
use crate::types::{Color, PieceKind};

/// Plain material balance, White's total minus Black's.
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl Default for MaterialEvaluator {
    fn default() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

fn weight(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::Queen => 9f32,
        PieceKind::Rook => 5f32,
        PieceKind::Bishop | PieceKind::Knight => 3f32,
        PieceKind::Pawn => 1f32,
        PieceKind::King => 0f32,
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn favors(&self) -> Color {
        Color::White
    }

    fn evaluate(&self, pos: &Position) -> Score {
        let total = |color: Color| -> f32 {
            crate::types::PIECE_KINDS
                .iter()
                .map(|&kind| weight(kind) * pos.pieces_of_kind(color, kind).count() as f32)
                .sum()
        };

        Score::Evaluated(total(Color::White) - total(Color::Black))
    }
}
