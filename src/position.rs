// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bitboard::Bitboard;
use crate::check;
use crate::moves::Move;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};
use crate::types::{FILES, PIECE_KINDS, RANKS};

/// Reasons two positions cannot be read as one move apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionError {
    SameSideToMove,
    MoverUnchanged,
    OriginNotSingleSquare(u32),
    DestinationNotSingleSquare(u32),
    MissingPromotion,
    AmbiguousPromotion,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransitionError::SameSideToMove => {
                write!(f, "both positions have the same side to move")
            }
            TransitionError::MoverUnchanged => write!(f, "the moving side's pieces did not change"),
            TransitionError::OriginNotSingleSquare(n) => {
                write!(f, "expected one origin square, found {}", n)
            }
            TransitionError::DestinationNotSingleSquare(n) => {
                write!(f, "expected one destination square, found {}", n)
            }
            TransitionError::MissingPromotion => {
                write!(f, "a pawn disappeared but no piece was promoted")
            }
            TransitionError::AmbiguousPromotion => {
                write!(f, "more than one piece kind gained a piece on promotion")
            }
        }
    }
}

impl Error for TransitionError {}

/// An immutable chess position: one bitboard per piece kind and color, the
/// two color unions derived from them, and the side to move.
///
/// Positions are never modified in place. Moving a piece produces a new
/// position, see `MoveGenerator::children`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    boards_by_piece: [Bitboard; 12],
    boards_by_color: [Bitboard; 2],
    side_to_move: Color,
}

fn board_index(color: Color, kind: PieceKind) -> usize {
    let offset = match color {
        Color::White => 0,
        Color::Black => 6,
    };
    offset + kind.as_index()
}

//
// Construction
//

impl Position {
    fn from_boards(boards_by_piece: [Bitboard; 12], side_to_move: Color) -> Position {
        let mut boards_by_color = [Bitboard::none(); 2];
        for &kind in &PIECE_KINDS {
            boards_by_color[Color::White.as_index()] |= boards_by_piece[board_index(Color::White, kind)];
            boards_by_color[Color::Black.as_index()] |= boards_by_piece[board_index(Color::Black, kind)];
        }

        Position {
            boards_by_piece,
            boards_by_color,
            side_to_move,
        }
    }

    /// Builds a position from a validated board snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Position, SnapshotError> {
        snapshot.validate()?;
        let mut boards = [Bitboard::none(); 12];
        for (square, piece) in snapshot.pieces() {
            boards[board_index(piece.color, piece.kind)].set(square);
        }

        Ok(Position::from_boards(boards, snapshot.side_to_move()))
    }

    /// Parses a FEN string into a position. Only the placement and side to
    /// move fields are used.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, SnapshotError> {
        Position::from_snapshot(&Snapshot::from_fen(fen)?)
    }

    pub fn from_start_position() -> Position {
        let mut boards = [Bitboard::none(); 12];
        for (square, piece) in Snapshot::start_position().pieces() {
            boards[board_index(piece.color, piece.kind)].set(square);
        }

        Position::from_boards(boards, Color::White)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty(self.side_to_move);
        for &color in &[Color::White, Color::Black] {
            for &kind in &PIECE_KINDS {
                for square in self.pieces_of_kind(color, kind) {
                    // The boards are disjoint, so every square is free.
                    let _ = snapshot.place(square, Piece::new(kind, color));
                }
            }
        }

        snapshot
    }

    pub fn as_fen(&self) -> String {
        self.to_snapshot().as_fen()
    }

    /// The same placement with the other side to move.
    pub fn flip_side(&self) -> Position {
        Position {
            boards_by_piece: self.boards_by_piece,
            boards_by_color: self.boards_by_color,
            side_to_move: self.side_to_move.toggle(),
        }
    }

    /// Applies a move mask for a piece of `kind` belonging to the side to
    /// move. `mask` holds exactly the origin and destination squares.
    ///
    /// The mover's board is toggled with the mask, or for a promotion the
    /// pawn is removed and `promotion` placed on the destination. Every
    /// opposing board loses the destination square and the side to move
    /// flips.
    pub(crate) fn apply_move_mask(
        &self,
        kind: PieceKind,
        mask: Bitboard,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Position {
        let mover = self.side_to_move;
        let opponent = mover.toggle();
        let mut boards = self.boards_by_piece;
        match promotion {
            None => boards[board_index(mover, kind)] ^= mask,
            Some(promoted) => {
                let origin = mask.without(Bitboard::of(destination));
                boards[board_index(mover, PieceKind::Pawn)] ^= origin;
                boards[board_index(mover, promoted)].set(destination);
            }
        }

        for &captured in &PIECE_KINDS {
            boards[board_index(opponent, captured)].unset(destination);
        }

        Position::from_boards(boards, opponent)
    }
}

//
// Board state getters
//

impl Position {
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.boards_by_color[color.as_index()]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards_by_piece[board_index(color, kind)]
    }

    /// Every occupied square, both colors.
    pub fn occupancy(&self) -> Bitboard {
        self.boards_by_color[0] | self.boards_by_color[1]
    }

    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Pawn)
    }

    pub fn bishops(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Bishop)
    }

    pub fn knights(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Knight)
    }

    pub fn rooks(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Rook)
    }

    pub fn queens(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Queen)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    /// The king's square, or `None` once the king has been captured. Only a
    /// line of play that already left a king en prise can capture it.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings(color).first()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = if self.boards_by_color[Color::White.as_index()].test(square) {
            Color::White
        } else if self.boards_by_color[Color::Black.as_index()].test(square) {
            Color::Black
        } else {
            return None;
        };

        for &kind in &PIECE_KINDS {
            if self.pieces_of_kind(color, kind).test(square) {
                return Some(Piece::new(kind, color));
            }
        }

        // If we get here, the color boards disagree with the piece boards.
        unreachable!()
    }

    /// Whether the king of `color` is attacked in this position.
    pub fn is_check(&self, color: Color) -> bool {
        check::king_attacked(self, color)
    }

    /// A cheap 32-bit key: every board xor'd together and folded in half,
    /// inverted when Black is to move. Different positions may share a key.
    pub fn hash_key(&self) -> u32 {
        let combined = self
            .boards_by_piece
            .iter()
            .fold(0u64, |acc, board| acc ^ board.bits());
        // Inverting before the fold would cancel out, so invert the folded key.
        let folded = (combined as u32) ^ ((combined >> 32) as u32);
        match self.side_to_move {
            Color::White => folded,
            Color::Black => !folded,
        }
    }
}

//
// Move reconstruction
//

impl Position {
    /// Recovers the move that turns this position into `next`.
    ///
    /// The two positions must be exactly one move apart: opposite sides to
    /// move and a single piece of the mover relocated. A pawn that
    /// disappeared from the mover's side marks a promotion, and exactly one
    /// other piece kind must have gained a piece.
    pub fn transition_to(&self, next: &Position) -> Result<Move, TransitionError> {
        if self.side_to_move == next.side_to_move {
            return Err(TransitionError::SameSideToMove);
        }

        let mover = self.side_to_move;
        let before = self.pieces(mover);
        let after = next.pieces(mover);
        if before == after {
            return Err(TransitionError::MoverUnchanged);
        }

        let vacated = before.without(after);
        let arrived = after.without(before);
        if vacated.count() != 1 {
            return Err(TransitionError::OriginNotSingleSquare(vacated.count()));
        }

        if arrived.count() != 1 {
            return Err(TransitionError::DestinationNotSingleSquare(arrived.count()));
        }

        let source = vacated.single_square();
        let destination = arrived.single_square();
        let pawns_before = self.pawns(mover).count();
        let pawns_after = next.pawns(mover).count();
        if pawns_before != pawns_after + 1 {
            return Ok(Move::quiet(source, destination));
        }

        let mut promoted = None;
        for &kind in PIECE_KINDS.iter().filter(|&&k| k != PieceKind::Pawn) {
            let gained = self.pieces_of_kind(mover, kind).count() + 1;
            if next.pieces_of_kind(mover, kind).count() == gained {
                if promoted.is_some() {
                    return Err(TransitionError::AmbiguousPromotion);
                }

                promoted = Some(kind);
            }
        }

        match promoted {
            Some(kind) => Ok(Move::promotion(source, destination, kind)),
            None => Err(TransitionError::MissingPromotion),
        }
    }
}

//
// Trait implementations
//

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_key());
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
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
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}
