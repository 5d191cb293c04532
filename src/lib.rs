// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A bitboard chess position engine. Positions are immutable sets of twelve
//! bitboards; the move generator produces every legal successor of a
//! position and the searcher runs a fixed-depth minimax over the resulting
//! tree. Castling, en passant and the draw rules are not modelled.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod bitboard;
pub mod check;
pub mod eval;
pub mod geometry;
pub mod movegen;
mod moves;
mod perft;
mod position;
pub mod search;
mod snapshot;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use check::{is_king_in_check, king_attacked};
pub use geometry::initialize;
pub use movegen::{MoveGenerator, MoveMask};
pub use moves::Move;
pub use perft::{perft, perft_divide};
pub use position::{Position, TransitionError};
pub use snapshot::{Snapshot, SnapshotError};
pub use types::{Color, File, Piece, PieceKind, Rank, Square, COLORS, FILES, PIECE_KINDS, PROMOTION_KINDS, RANKS};
