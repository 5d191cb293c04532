// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::position::Position;
use crate::types::Color;

mod material;
mod score;
mod weighted_count;

pub use material::MaterialEvaluator;
pub use score::Score;
pub use weighted_count::WeightedCountEvaluator;

/// A static evaluation of a position. Evaluators are pure: the same position
/// always gets the same score.
pub trait BoardEvaluator: Default {
    /// The side whose advantage raises the score. The searcher negates scores
    /// when it searches for the other side.
    fn favors(&self) -> Color;

    fn evaluate(&self, pos: &Position) -> Score;
}
