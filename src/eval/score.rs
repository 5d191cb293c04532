// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Score is the value the search assigns to a position, always relative to
/// the maximizing player, the side to move at the root of the search.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum Score {
    /// The maximizer has no legal move. Worse than any evaluated position.
    Loss,

    /// The board evaluator has assigned the given score to this position.
    Evaluated(f32),

    /// The minimizer has no legal move. Better than any evaluated position.
    Win,
}

impl Score {
    /// The score of a position in which the given side to move has no legal
    /// move.
    pub fn no_moves_for_maximizer(maximizing: bool) -> Score {
        if maximizing {
            Score::Loss
        } else {
            Score::Win
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Score::Win => write!(f, "win"),
            Score::Loss => write!(f, "loss"),
            Score::Evaluated(score) => write!(f, "{:.2}", score),
        }
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Score) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Score) -> Ordering {
        match (self, other) {
            (Score::Win, Score::Win) | (Score::Loss, Score::Loss) => Ordering::Equal,
            (Score::Win, _) => Ordering::Greater,
            (_, Score::Win) => Ordering::Less,
            (Score::Loss, _) => Ordering::Less,
            (_, Score::Loss) => Ordering::Greater,
            (Score::Evaluated(self_score), Score::Evaluated(other_score)) => self_score
                .partial_cmp(other_score)
                .expect("NaN in score comparison"),
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Win => Score::Loss,
            Score::Loss => Score::Win,
            Score::Evaluated(score) => Score::Evaluated(-score),
        }
    }
}
