// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Property tests for the precomputed board geometry.
use bitchess::geometry;
use bitchess::{Bitboard, Square};
use proptest::prelude::*;

fn square_strategy() -> impl Strategy<Value = Square> {
    prop::sample::select(Square::iter().collect::<Vec<_>>())
}

fn colinear(a: Square, b: Square) -> bool {
    let rows = (a.row() - b.row()).abs();
    let cols = (a.col() - b.col()).abs();
    rows == 0 || cols == 0 || rows == cols
}

proptest! {
    #[test]
    fn prop_line_between_is_symmetric(a in square_strategy(), b in square_strategy()) {
        prop_assert_eq!(geometry::line_between(a, b), geometry::line_between(b, a));
    }

    #[test]
    fn prop_line_between_excludes_endpoints(a in square_strategy(), b in square_strategy()) {
        let line = geometry::line_between(a, b);
        prop_assert!(!line.test(a));
        prop_assert!(!line.test(b));
    }

    /// Property: a line has one square per step strictly between the
    /// endpoints, and only colinear squares have one at all
    #[test]
    fn prop_line_between_length(a in square_strategy(), b in square_strategy()) {
        let line = geometry::line_between(a, b);
        if colinear(a, b) && a != b {
            prop_assert_eq!((geometry::distance(a, b) - 1) as u32, line.count());
        } else {
            prop_assert!(line.empty());
        }
    }

    #[test]
    fn prop_line_squares_share_the_line(a in square_strategy(), b in square_strategy()) {
        for sq in geometry::line_between(a, b) {
            prop_assert!(colinear(a, sq));
            prop_assert!(colinear(sq, b));
            prop_assert!(geometry::distance(a, sq) < geometry::distance(a, b));
        }
    }

    #[test]
    fn prop_empty_board_line_is_clear(a in square_strategy(), b in square_strategy()) {
        prop_assert!(geometry::line_is_clear(a, b, Bitboard::none()));
        prop_assert!(geometry::line_is_clear(a, b, Bitboard::of(a) | Bitboard::of(b)));
    }

    /// Property: shifting a single square lands on the offset square, or
    /// nowhere if that falls off the board; it never wraps to another rank
    #[test]
    fn prop_shift_never_wraps(sq in square_strategy(), rows in -7i32..=7, cols in -7i32..=7) {
        let shifted = Bitboard::of(sq).shift_by(rows, cols);
        match Square::from_row_col(sq.row() + rows, sq.col() + cols) {
            Some(target) => prop_assert_eq!(Bitboard::of(target), shifted),
            None => prop_assert!(shifted.empty()),
        }
    }

    #[test]
    fn prop_templates_exclude_origin(sq in square_strategy()) {
        prop_assert!(!geometry::queen_template(sq).test(sq));
        prop_assert!(!geometry::king_template(sq).test(sq));
        prop_assert!(!geometry::knight_template(sq).test(sq));
        prop_assert_eq!(
            geometry::queen_template(sq),
            geometry::rook_template(sq) | geometry::bishop_template(sq)
        );
    }

    #[test]
    fn prop_rook_sees_along_its_template(a in square_strategy(), b in square_strategy()) {
        let same_line = a != b && (a.row() == b.row() || a.col() == b.col());
        prop_assert_eq!(same_line, geometry::rook_template(a).test(b));
    }
}
