// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use crate::types::{PieceKind, Square};

/// A move as seen from outside the engine: where a piece came from, where it
/// went, and what it became if it was a promoting pawn. Moves are recovered
/// from pairs of positions with `Position::transition_to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn quiet(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn promotion(source: Square, destination: Square, kind: PieceKind) -> Move {
        Move {
            source,
            destination,
            promotion: Some(kind),
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}
