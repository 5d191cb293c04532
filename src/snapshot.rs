// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board snapshots, the one-shot translation between an outside board model
//! and the engine. A snapshot only knows which squares hold which pieces and
//! whose turn it is; castling rights, en-passant targets and move clocks are
//! not modelled by the engine and are dropped on the way in.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::types::{Color, File, Piece, PieceKind, Rank, Square, TableIndex};
use crate::types::{COLORS, FILES, RANKS};

/// Possible errors that can arise when building a snapshot, either from FEN
/// or from a piece-by-piece description of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece(char),
    InvalidSideToMove,
    SquareOccupied(Square),
    MissingKing(Color),
    ExtraKing(Color),
    PawnOnBackRank(Square),
    TooManyPieces(Color),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SnapshotError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            SnapshotError::UnexpectedEnd => write!(f, "unexpected end of input"),
            SnapshotError::InvalidDigit => write!(f, "empty-square counts must be 1 through 8"),
            SnapshotError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            SnapshotError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            SnapshotError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            SnapshotError::SquareOccupied(sq) => write!(f, "square {} is already occupied", sq),
            SnapshotError::MissingKing(color) => write!(f, "no king for side '{}'", color),
            SnapshotError::ExtraKing(color) => write!(f, "more than one king for side '{}'", color),
            SnapshotError::PawnOnBackRank(sq) => write!(f, "pawn on back rank square {}", sq),
            SnapshotError::TooManyPieces(color) => {
                write!(f, "more than 16 pieces for side '{}'", color)
            }
        }
    }
}

impl Error for SnapshotError {}

/// A piece-per-square picture of a board plus the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Snapshot {
    pub fn empty(side_to_move: Color) -> Snapshot {
        Snapshot {
            squares: [None; 64],
            side_to_move,
        }
    }

    /// The standard initial arrangement with White to move.
    pub fn start_position() -> Snapshot {
        let mut snap = Snapshot::empty(Color::White);
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            snap.squares[Square::of(Rank::One, file).as_index()] = Some(Piece::new(kind, Color::White));
            snap.squares[Square::of(Rank::Two, file).as_index()] =
                Some(Piece::new(PieceKind::Pawn, Color::White));
            snap.squares[Square::of(Rank::Seven, file).as_index()] =
                Some(Piece::new(PieceKind::Pawn, Color::Black));
            snap.squares[Square::of(Rank::Eight, file).as_index()] = Some(Piece::new(kind, Color::Black));
        }

        snap
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// Puts a piece on an empty square.
    pub fn place(&mut self, square: Square, piece: Piece) -> Result<(), SnapshotError> {
        let slot = &mut self.squares[square.as_index()];
        if slot.is_some() {
            return Err(SnapshotError::SquareOccupied(square));
        }

        *slot = Some(piece);
        Ok(())
    }

    /// Every occupied square and its piece, in square index order.
    pub fn pieces<'a>(&'a self) -> impl Iterator<Item = (Square, Piece)> + 'a {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    /// Checks that the arrangement is one the engine can search from: exactly
    /// one king per side, no pawns on either back rank and at most sixteen
    /// pieces per side.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for &color in COLORS.iter() {
            let mut kings = 0;
            let mut total = 0;
            for (square, piece) in self.pieces().filter(|(_, p)| p.color == color) {
                total += 1;
                match piece.kind {
                    PieceKind::King => kings += 1,
                    PieceKind::Pawn if square.row() == 0 || square.row() == 7 => {
                        return Err(SnapshotError::PawnOnBackRank(square));
                    }
                    _ => {}
                }
            }

            if kings == 0 {
                return Err(SnapshotError::MissingKing(color));
            }

            if kings > 1 {
                return Err(SnapshotError::ExtraKing(color));
            }

            if total > 16 {
                return Err(SnapshotError::TooManyPieces(color));
            }
        }

        Ok(())
    }

    /// Parses the placement and side-to-move fields of a FEN string. Any
    /// fields after those are accepted and ignored.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Snapshot, SnapshotError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), SnapshotError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(SnapshotError::UnexpectedChar(c)),
                None => Err(SnapshotError::UnexpectedEnd),
            }
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, SnapshotError> {
            iter.peek().cloned().ok_or(SnapshotError::UnexpectedEnd)
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, SnapshotError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(SnapshotError::InvalidSideToMove),
            };

            iter.next();
            Ok(side)
        }

        let mut snap = Snapshot::empty(Color::White);
        let iter = &mut fen.as_ref().trim().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A as usize;
            while file <= File::H as usize {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(SnapshotError::InvalidDigit);
                    }

                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(SnapshotError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' || c == ' ' {
                    return Err(SnapshotError::FileDoesNotSumToEight);
                }

                let piece = Piece::try_from(c).map_err(|_| SnapshotError::UnknownPiece(c))?;
                snap.place(Square::of(rank, File::from_index(file)), piece)?;
                iter.next();
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        snap.side_to_move = eat_side_to_move(iter)?;
        match iter.next() {
            None | Some(' ') => Ok(snap),
            Some(c) => Err(SnapshotError::UnexpectedChar(c)),
        }
    }

    /// Renders the snapshot as FEN. Castling and en-passant fields are always
    /// empty and the clocks are reset.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }

                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.side_to_move.to_string());
        buf.push_str(" - - 0 1");
        buf
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        f.write_str(match self.side_to_move {
            Color::White => "white to move\n",
            Color::Black => "black to move\n",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn start_position_matches_fen() {
        let parsed = Snapshot::from_fen(START_FEN).unwrap();
        assert_eq!(Snapshot::start_position(), parsed);
        assert_eq!(32, parsed.pieces().count());
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            parsed.piece_at(Square::D1)
        );
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::Black)),
            parsed.piece_at(Square::E8)
        );
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn trailing_fields_are_optional() {
        let short = Snapshot::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        let long = Snapshot::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 12 40").unwrap();
        assert_eq!(short, long);
        assert_eq!(Color::Black, short.side_to_move());
    }

    #[test]
    fn fen_round_trip() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b - - 0 1";
        assert_eq!(fen, Snapshot::from_fen(fen).unwrap().as_fen());
    }

    #[test]
    fn empty_input() {
        assert_eq!(Err(SnapshotError::UnexpectedEnd), Snapshot::from_fen(""));
    }

    #[test]
    fn unknown_piece() {
        assert_eq!(
            Err(SnapshotError::UnknownPiece('z')),
            Snapshot::from_fen("z7/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn invalid_digit() {
        assert_eq!(
            Err(SnapshotError::InvalidDigit),
            Snapshot::from_fen("9/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn not_sum_to_8() {
        assert_eq!(
            Err(SnapshotError::FileDoesNotSumToEight),
            Snapshot::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 0")
        );
        assert_eq!(
            Err(SnapshotError::FileDoesNotSumToEight),
            Snapshot::from_fen("7/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn bad_side_to_move() {
        assert_eq!(
            Err(SnapshotError::InvalidSideToMove),
            Snapshot::from_fen("8/8/8/8/8/8/8/8 c - - 0 0")
        );
    }

    #[test]
    fn place_rejects_occupied_square() {
        let mut snap = Snapshot::empty(Color::White);
        let king = Piece::new(PieceKind::King, Color::White);
        assert!(snap.place(Square::E1, king).is_ok());
        assert_eq!(
            Err(SnapshotError::SquareOccupied(Square::E1)),
            snap.place(Square::E1, king)
        );
        assert_eq!(Some(king), snap.piece_at(Square::E1));
        assert_eq!(None, snap.piece_at(Square::E2));
    }

    #[test]
    fn validation_failures() {
        let no_white_king = Snapshot::from_fen("4k3/8/8/8/8/8/8/8 w").unwrap();
        assert_eq!(Err(SnapshotError::MissingKing(Color::White)), no_white_king.validate());

        let two_black_kings = Snapshot::from_fen("3kk3/8/8/8/8/8/8/4K3 w").unwrap();
        assert_eq!(Err(SnapshotError::ExtraKing(Color::Black)), two_black_kings.validate());

        let back_rank_pawn = Snapshot::from_fen("4k3/8/8/8/8/8/8/P3K3 w").unwrap();
        assert_eq!(
            Err(SnapshotError::PawnOnBackRank(Square::A1)),
            back_rank_pawn.validate()
        );

        let crowded = Snapshot::from_fen("4k3/8/8/8/NNNNNNNN/NNNNNNNN/NNNNNNNN/4K3 w").unwrap();
        assert_eq!(Err(SnapshotError::TooManyPieces(Color::White)), crowded.validate());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            "pawn on back rank square a1",
            SnapshotError::PawnOnBackRank(Square::A1).to_string()
        );
        assert_eq!("no king for side 'w'", SnapshotError::MissingKing(Color::White).to_string());
    }
}
