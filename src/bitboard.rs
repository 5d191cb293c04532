// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, which is conceptually a set of
//! squares on the chess board. Every piece-kind/color occupancy, every
//! geometric template and every move mask in the engine is a bitboard.
//!
//! A bitboard is a single 64-bit integer and it behaves like a set, using
//! bitwise operations for the normal set operations (union, intersection,
//! set complement, etc.). Bit `row * 8 + col` stands for the square on that
//! row and column.
use num_traits::FromPrimitive;
use std::default::Default;
use std::fmt;
use std::iter::Iterator;
use std::ops;

use crate::types::{Square, TableIndex, FILES, RANKS};

const RANK_MASKS: [u64; 8] = [
    0x0000_0000_0000_00FF,
    0x0000_0000_0000_FF00,
    0x0000_0000_00FF_0000,
    0x0000_0000_FF00_0000,
    0x0000_00FF_0000_0000,
    0x0000_FF00_0000_0000,
    0x00FF_0000_0000_0000,
    0xFF00_0000_0000_0000,
];

const FILE_MASKS: [u64; 8] = [
    0x0101_0101_0101_0101,
    0x0202_0202_0202_0202,
    0x0404_0404_0404_0404,
    0x0808_0808_0808_0808,
    0x1010_1010_1010_1010,
    0x2020_2020_2020_2020,
    0x4040_4040_4040_4040,
    0x8080_8080_8080_8080,
];

/// A Bitboard is a 64-bit integer in which one bit represents one of the
/// sixty-four squares on the board.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Default for Bitboard {
    fn default() -> Bitboard {
        Bitboard::none()
    }
}

impl Bitboard {
    /// Constructs a new bitboard from the given bits.
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    /// Constructs a new bitboard with all bits set to one, representing
    /// a complete set.
    pub const fn all() -> Bitboard {
        Bitboard::from_bits(0xFFFF_FFFF_FFFF_FFFF)
    }

    /// Constructs a new bitboard with all bits zeroed, representing
    /// the empty set.
    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    /// Constructs a bitboard containing exactly one square.
    pub fn of(square: Square) -> Bitboard {
        Bitboard::from_bits(1u64 << square.as_index())
    }

    /// Tests whether or not a square is a member of this bitboard.
    pub fn test(self, square: Square) -> bool {
        (self.bits & (1u64 << square.as_index())) != 0
    }

    /// Sets a square to be a member of this bitboard.
    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << square.as_index();
    }

    /// Removes a square from this bitboard.
    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << square.as_index());
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn xor(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits ^ other.bits)
    }

    /// The set difference, everything in `self` that is not in `other`.
    pub const fn without(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & !other.bits)
    }

    /// Produces an iterator over the squares contained in this bitboard,
    /// lowest index first.
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self.bits)
    }

    /// Retrieves the raw bits associated with this bitboard.
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Retrieves the number of squares contained in the set represented
    /// by this bitboard.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Retrieves whether or not the set represented by this bitboard is
    /// the empty set.
    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    /// Retrieves one piece in the set represented by this bitboard.
    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }

    /// Returns the only square in this bitboard.
    ///
    /// # Panics
    /// Panics if the bitboard does not contain exactly one square. Callers
    /// that reach this with any other mask have broken an invariant upstream.
    pub fn single_square(self) -> Square {
        if self.count() != 1 {
            panic!(
                "bitboard {:#018x} should have exactly one bit set:\n{}",
                self.bits, self
            );
        }

        Square::from_index(self.bits.trailing_zeros() as usize)
    }

    /// Shifts the whole pattern by the given number of rows and columns.
    ///
    /// Bits pushed past the left or right edge are dropped instead of
    /// reappearing on a neighbouring rank; bits pushed past the first or last
    /// row fall out of the 64-bit range.
    pub fn shift_by(self, rows: i32, cols: i32) -> Bitboard {
        if cols >= 8 || cols <= -8 || rows >= 8 || rows <= -8 {
            return Bitboard::none();
        }

        let offset = rows * 8 + cols;
        let shifted = if offset >= 0 {
            self.bits.checked_shl(offset as u32).unwrap_or(0)
        } else {
            self.bits.checked_shr((-offset) as u32).unwrap_or(0)
        };

        Bitboard::from_bits(shifted).and(wraparound_mask(cols))
    }
}

/// Columns that must be cleared after a horizontal shift of `cols`: a shift
/// to the right empties the leftmost `cols` files, a shift to the left the
/// rightmost ones.
fn wraparound_mask(cols: i32) -> Bitboard {
    let mut mask = Bitboard::all();
    if cols > 0 {
        for file in 0..cols as usize {
            mask = mask.without(BB_FILES[file]);
        }
    } else {
        for file in (8 + cols) as usize..8 {
            mask = mask.without(BB_FILES[file]);
        }
    }

    mask
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if self.test(sq) {
                    write!(f, " 1 ")?
                } else {
                    write!(f, " . ")?
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

// Operator overloads for ease of use
impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        *self = self.and(rhs);
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

impl ops::BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        self.xor(rhs)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        *self = self.xor(rhs);
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Bitboard {
        Bitboard::from_bits(!self.bits)
    }
}

/// BitboardIterator is an iterator over squares that are set in a
/// given bitboard.
pub struct BitboardIterator {
    bits: u64,
}

impl BitboardIterator {
    fn new(bits: u64) -> BitboardIterator {
        BitboardIterator { bits }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        FromPrimitive::from_u32(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

pub const BB_RANK_1: Bitboard = Bitboard::from_bits(RANK_MASKS[0]);
pub const BB_RANK_8: Bitboard = Bitboard::from_bits(RANK_MASKS[7]);

pub const BB_FILE_A: Bitboard = Bitboard::from_bits(FILE_MASKS[0]);
pub const BB_FILE_H: Bitboard = Bitboard::from_bits(FILE_MASKS[7]);

#[rustfmt::skip]
pub const BB_RANKS: [Bitboard; 8] = [
    Bitboard::from_bits(RANK_MASKS[0]), Bitboard::from_bits(RANK_MASKS[1]),
    Bitboard::from_bits(RANK_MASKS[2]), Bitboard::from_bits(RANK_MASKS[3]),
    Bitboard::from_bits(RANK_MASKS[4]), Bitboard::from_bits(RANK_MASKS[5]),
    Bitboard::from_bits(RANK_MASKS[6]), Bitboard::from_bits(RANK_MASKS[7]),
];

#[rustfmt::skip]
pub const BB_FILES: [Bitboard; 8] = [
    Bitboard::from_bits(FILE_MASKS[0]), Bitboard::from_bits(FILE_MASKS[1]),
    Bitboard::from_bits(FILE_MASKS[2]), Bitboard::from_bits(FILE_MASKS[3]),
    Bitboard::from_bits(FILE_MASKS[4]), Bitboard::from_bits(FILE_MASKS[5]),
    Bitboard::from_bits(FILE_MASKS[6]), Bitboard::from_bits(FILE_MASKS[7]),
];
