// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed square, line and diagonal patterns.
//!
//! Non-sliding pieces use a template laid out around d4 (row 3, column 3)
//! and shifted onto the piece's real square; sliding pieces use the union of
//! the rank, file or diagonals running through their square. The
//! `line_between` table answers line-of-sight questions for both move
//! generation and check detection.
//!
//! All tables are built once, on first use or through `initialize`, and are
//! read-only afterwards.
use crate::bitboard::{Bitboard, BB_FILES, BB_RANKS};
use crate::types::{Color, Square, TableIndex, COLORS};

/// Reference square every non-sliding template is laid out around.
pub const TEMPLATE_ORIGIN: Square = Square::D4;

const LONG_DIAGONAL: u64 = 0x8040_2010_0804_0201;
const LONG_ANTI_DIAGONAL: u64 = 0x0102_0408_1020_4080;

struct DiagonalTable {
    main: [Bitboard; 15],
    anti: [Bitboard; 15],
}

impl DiagonalTable {
    pub fn new() -> DiagonalTable {
        let mut dt = DiagonalTable {
            main: [Bitboard::none(); 15],
            anti: [Bitboard::none(); 15],
        };

        // The long diagonals run through the middle of the board; every other
        // diagonal is one of them slid up or down whole rows.
        let main = Bitboard::from_bits(LONG_DIAGONAL);
        let anti = Bitboard::from_bits(LONG_ANTI_DIAGONAL);
        for i in 0..8 {
            dt.main[i] = main.shift_by(i as i32 - 7, 0);
            dt.main[14 - i] = main.shift_by(7 - i as i32, 0);
            dt.anti[i] = anti.shift_by(i as i32 - 7, 0);
            dt.anti[14 - i] = anti.shift_by(7 - i as i32, 0);
        }

        dt
    }

    /// The a1-h8 direction diagonal through `sq`, indexed by `row - col + 7`.
    pub fn main(&self, sq: Square) -> Bitboard {
        self.main[(sq.row() - sq.col() + 7) as usize]
    }

    /// The h1-a8 direction diagonal through `sq`, indexed by `row + col`.
    pub fn anti(&self, sq: Square) -> Bitboard {
        self.anti[(sq.row() + sq.col()) as usize]
    }
}

/// Knight and king templates, shifted from d4 onto every square.
struct StepperTable {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
}

impl StepperTable {
    pub fn new() -> StepperTable {
        let mut st = StepperTable {
            king: [Bitboard::none(); 64],
            knight: [Bitboard::none(); 64],
        };

        let king_at_origin = king_at_origin();
        let knight_at_origin = knight_at_origin();
        for sq in Square::iter() {
            let rows = sq.row() - TEMPLATE_ORIGIN.row();
            let cols = sq.col() - TEMPLATE_ORIGIN.col();
            st.king[sq.as_index()] = king_at_origin.shift_by(rows, cols);
            st.knight[sq.as_index()] = knight_at_origin.shift_by(rows, cols);
        }

        st
    }
}

fn king_at_origin() -> Bitboard {
    let mut template = Bitboard::none();
    for row in 2..5 {
        for col in 2..5 {
            if row != 3 || col != 3 {
                template |= BB_RANKS[row] & BB_FILES[col];
            }
        }
    }

    template
}

fn knight_at_origin() -> Bitboard {
    let half = (BB_RANKS[1] | BB_RANKS[5]) & (BB_FILES[2] | BB_FILES[4]);
    let other_half = (BB_RANKS[2] | BB_RANKS[4]) & (BB_FILES[1] | BB_FILES[5]);
    half | other_half
}

struct PawnTable {
    pushes: [[Bitboard; 64]; 2],
    captures: [[Bitboard; 64]; 2],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            pushes: [[Bitboard::none(); 64]; 2],
            captures: [[Bitboard::none(); 64]; 2],
        };

        for &color in COLORS.iter() {
            let forward = color.forward();
            for sq in Square::iter() {
                let pawn = Bitboard::of(sq);
                pt.pushes[color.as_index()][sq.as_index()] = pawn.shift_by(forward, 0);
                pt.captures[color.as_index()][sq.as_index()] =
                    pawn.shift_by(forward, -1) | pawn.shift_by(forward, 1);
            }
        }

        pt
    }
}

struct LineTable {
    between: [[Bitboard; 64]; 64],
}

impl LineTable {
    pub fn new() -> LineTable {
        let mut lt = LineTable {
            between: [[Bitboard::none(); 64]; 64],
        };

        for first in Square::iter() {
            for second in Square::iter() {
                lt.between[first.as_index()][second.as_index()] = draw_line(first, second);
            }
        }

        lt
    }
}

/// Walks from `from` towards `to` one step at a time, collecting every
/// square strictly between them. Squares that share no rank, file or
/// diagonal have no line.
fn draw_line(from: Square, to: Square) -> Bitboard {
    let row_diff = to.row() - from.row();
    let col_diff = to.col() - from.col();
    if from == to {
        return Bitboard::none();
    }

    if row_diff != 0 && col_diff != 0 && row_diff.abs() != col_diff.abs() {
        return Bitboard::none();
    }

    let (row_step, col_step) = (row_diff.signum(), col_diff.signum());
    let mut line = Bitboard::none();
    let (mut row, mut col) = (from.row() + row_step, from.col() + col_step);
    while (row, col) != (to.row(), to.col()) {
        if let Some(sq) = Square::from_row_col(row, col) {
            line.set(sq);
        }

        row += row_step;
        col += col_step;
    }

    line
}

lazy_static! {
    static ref DIAGONAL_TABLE: DiagonalTable = DiagonalTable::new();
    static ref STEPPER_TABLE: StepperTable = StepperTable::new();
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref LINE_TABLE: LineTable = LineTable::new();
}

/// Forces construction of every table. Calling this is optional, the tables
/// build themselves on first use, but doing it up front keeps table
/// construction out of the first search's timings.
pub fn initialize() {
    lazy_static::initialize(&DIAGONAL_TABLE);
    lazy_static::initialize(&STEPPER_TABLE);
    lazy_static::initialize(&PAWN_TABLE);
    lazy_static::initialize(&LINE_TABLE);
}

/// Squares strictly between `a` and `b` on their shared rank, file or
/// diagonal. Empty if they share none or are the same square.
pub fn line_between(a: Square, b: Square) -> Bitboard {
    LINE_TABLE.between[a.as_index()][b.as_index()]
}

/// Whether nothing in `occupancy` stands on the line between `a` and `b`.
/// Squares that are not colinear trivially have a clear (empty) line.
pub fn line_is_clear(a: Square, b: Square, occupancy: Bitboard) -> bool {
    let line = line_between(a, b);
    line.without(occupancy) == line
}

pub fn rank_through(sq: Square) -> Bitboard {
    BB_RANKS[sq.row() as usize]
}

pub fn file_through(sq: Square) -> Bitboard {
    BB_FILES[sq.col() as usize]
}

pub fn main_diagonal_through(sq: Square) -> Bitboard {
    DIAGONAL_TABLE.main(sq)
}

pub fn anti_diagonal_through(sq: Square) -> Bitboard {
    DIAGONAL_TABLE.anti(sq)
}

/// Every square a rook on `sq` could reach on an empty board.
pub fn rook_template(sq: Square) -> Bitboard {
    (rank_through(sq) | file_through(sq)).without(Bitboard::of(sq))
}

/// Every square a bishop on `sq` could reach on an empty board.
pub fn bishop_template(sq: Square) -> Bitboard {
    (main_diagonal_through(sq) | anti_diagonal_through(sq)).without(Bitboard::of(sq))
}

pub fn queen_template(sq: Square) -> Bitboard {
    rook_template(sq) | bishop_template(sq)
}

pub fn king_template(sq: Square) -> Bitboard {
    STEPPER_TABLE.king[sq.as_index()]
}

pub fn knight_template(sq: Square) -> Bitboard {
    STEPPER_TABLE.knight[sq.as_index()]
}

/// The square directly in front of a pawn of `color` on `sq`.
pub fn pawn_push_template(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.pushes[color.as_index()][sq.as_index()]
}

/// The two forward diagonal squares a pawn of `color` on `sq` captures on.
pub fn pawn_capture_template(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.captures[color.as_index()][sq.as_index()]
}

/// Chebyshev distance between two squares.
pub fn distance(a: Square, b: Square) -> i32 {
    (a.row() - b.row()).abs().max((a.col() - b.col()).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(list: &[Square]) -> Bitboard {
        list.iter().fold(Bitboard::none(), |acc, &sq| acc | Bitboard::of(sq))
    }

    #[test]
    fn diagonal_counts() {
        let main_lengths: Vec<u32> = (0..15).map(|i| DIAGONAL_TABLE.main[i].count()).collect();
        let anti_lengths: Vec<u32> = (0..15).map(|i| DIAGONAL_TABLE.anti[i].count()).collect();
        let expected = vec![1, 2, 3, 4, 5, 6, 7, 8, 7, 6, 5, 4, 3, 2, 1];
        assert_eq!(expected, main_lengths);
        assert_eq!(expected, anti_lengths);
    }

    #[test]
    fn diagonals_through_square() {
        assert_eq!(
            squares(&[Square::A1, Square::B2, Square::C3, Square::D4, Square::E5, Square::F6, Square::G7, Square::H8]),
            main_diagonal_through(Square::C3)
        );
        assert_eq!(
            squares(&[Square::A3, Square::B2, Square::C1]),
            anti_diagonal_through(Square::B2)
        );
        assert_eq!(Bitboard::of(Square::H1), main_diagonal_through(Square::H1));
    }

    #[test]
    fn king_template_corners() {
        assert_eq!(
            squares(&[Square::A2, Square::B1, Square::B2]),
            king_template(Square::A1)
        );
        assert_eq!(
            squares(&[Square::G8, Square::G7, Square::H7]),
            king_template(Square::H8)
        );
        assert_eq!(8, king_template(Square::E4).count());
        assert_eq!(5, king_template(Square::E1).count());
    }

    #[test]
    fn knight_template_edges() {
        assert_eq!(squares(&[Square::B3, Square::C2]), knight_template(Square::A1));
        assert_eq!(squares(&[Square::F7, Square::G6]), knight_template(Square::H8));
        assert_eq!(
            squares(&[Square::F3, Square::H3, Square::E2]),
            knight_template(Square::G1)
        );
        assert_eq!(8, knight_template(Square::D4).count());
        assert_eq!(4, knight_template(Square::H5).count());
    }

    #[test]
    fn pawn_templates() {
        assert_eq!(Bitboard::of(Square::E3), pawn_push_template(Square::E2, Color::White));
        assert_eq!(Bitboard::of(Square::E6), pawn_push_template(Square::E7, Color::Black));
        assert_eq!(
            squares(&[Square::D3, Square::F3]),
            pawn_capture_template(Square::E2, Color::White)
        );
        assert_eq!(
            Bitboard::of(Square::B6),
            pawn_capture_template(Square::A7, Color::Black)
        );
        assert_eq!(
            Bitboard::of(Square::G3),
            pawn_capture_template(Square::H2, Color::White)
        );
        assert!(pawn_push_template(Square::E8, Color::White).empty());
    }

    #[test]
    fn sliding_templates_exclude_origin() {
        assert!(!rook_template(Square::D4).test(Square::D4));
        assert_eq!(14, rook_template(Square::D4).count());
        assert_eq!(13, bishop_template(Square::D4).count());
        assert_eq!(7, bishop_template(Square::A1).count());
        assert_eq!(27, queen_template(Square::D4).count());
    }

    #[test]
    fn lines() {
        assert_eq!(
            squares(&[Square::B1, Square::C1, Square::D1]),
            line_between(Square::A1, Square::E1)
        );
        assert_eq!(
            squares(&[Square::A2, Square::A3, Square::A4, Square::A5, Square::A6, Square::A7]),
            line_between(Square::A8, Square::A1)
        );
        assert_eq!(
            squares(&[Square::E5, Square::F6]),
            line_between(Square::D4, Square::G7)
        );
        assert_eq!(Bitboard::of(Square::B7), line_between(Square::A8, Square::C6));
        assert!(line_between(Square::A1, Square::B3).empty());
        assert!(line_between(Square::D4, Square::D4).empty());
        assert!(line_between(Square::D4, Square::D5).empty());
    }

    #[test]
    fn line_clearance() {
        let blockers = Bitboard::of(Square::C1);
        assert!(!line_is_clear(Square::A1, Square::E1, blockers));
        assert!(line_is_clear(Square::A1, Square::B1, blockers));
        assert!(line_is_clear(Square::E1, Square::E8, blockers));
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(0, distance(Square::E4, Square::E4));
        assert_eq!(1, distance(Square::E4, Square::F5));
        assert_eq!(7, distance(Square::A1, Square::H8));
        assert_eq!(2, distance(Square::E1, Square::E3));
    }
}
