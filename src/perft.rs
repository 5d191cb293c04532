// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Leaf counting over the legal move tree, the standard check of a move
//! generator against published node counts. Castling and en passant are not
//! part of the model, so published counts only match at depths where
//! neither could have been played.
use rayon::prelude::*;

use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::position::Position;

/// Number of legal positions exactly `depth` plies below `pos`.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let children = MoveGenerator::new().children(pos);
    if depth == 1 {
        return children.len() as u64;
    }

    children
        .par_iter()
        .map(|child| perft(child, depth - 1))
        .sum()
}

/// `perft` split by root move, in generation order.
pub fn perft_divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let divided: Vec<(Move, u64)> = MoveGenerator::new()
        .successors(pos)
        .par_iter()
        .map(|(mov, child)| (*mov, perft(child, depth - 1)))
        .collect();
    for (mov, count) in &divided {
        debug!("{}: {}", mov, count);
    }

    divided
}
