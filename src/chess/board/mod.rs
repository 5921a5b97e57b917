//! The board: an 8x8 grid of pieces, the per-color piece lists and the state that goes with them
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use super::*;
use super::error::ParseFenError;

mod fen;
mod make;

pub use make::{Undo, Speculation};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASTLE_KING_SIDE: u8 = 1;
const CASTLE_QUEEN_SIDE: u8 = 2;

fn castle_flag(side: CastleSide) -> u8 {
    match side {
        CastleSide::KingSide => CASTLE_KING_SIDE,
        CastleSide::QueenSide => CASTLE_QUEEN_SIDE,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A chess board with everything needed to continue the game from it.
///
/// Every piece lives in exactly one grid cell, and its square is listed in its color's piece list.
/// Each list keeps that color's king first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vec<Option<Piece>>,
    pieces: [Vec<Square>; Color::COUNT],
    turn: Color,
    castling_rights: [u8; Color::COUNT],
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<String>,
}

impl Board {
    /// Returns a board set up in the standard starting position.
    pub fn new() -> Board {
        Board::from_fen_str(START_FEN).expect("INFALLIBLE")
    }

    fn empty() -> Board {
        Board {
            grid: vec![None; Square::COUNT],
            pieces: [Vec::new(), Vec::new()],
            turn: Color::White,
            castling_rights: [0, 0],
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Returns the side to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the number of plies since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the move number, which starts at 1 and increments after each Black move
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.grid[sq.index()].as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.grid[sq.index()].as_mut()
    }

    /// Returns the squares of all pieces of `color`, king first.
    pub fn pieces(&self, color: Color) -> &[Square] {
        &self.pieces[color as usize]
    }

    /// Returns the square of the king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces[color as usize].first().copied()
            .filter(|&sq| self.piece_at(sq).map(Piece::kind) == Some(Kind::King))
    }

    /// Returns `true` if any piece of color `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        BoardView::is_attacked(self, sq, by)
    }

    /// Returns `true` if the king of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_attacked(sq, !color),
            None => false,
        }
    }

    /// Returns the en passant target square, if any.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns `true` if `color` may still castle on `side`.
    pub fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights[color as usize] & castle_flag(side) != 0
    }

    fn clear_castling_right(&mut self, color: Color, side: CastleSide) {
        self.castling_rights[color as usize] &= !castle_flag(side);
    }

    /// Places `piece` on its square, which must be empty.
    fn put(&mut self, piece: Piece) {
        let sq = piece.square();
        let list = &mut self.pieces[piece.color() as usize];

        debug_assert!(self.grid[sq.index()].is_none());
        if piece.kind() == Kind::King {
            list.insert(0, sq);
        } else {
            list.push(sq);
        }
        self.grid[sq.index()] = Some(piece);
    }

    /// Removes and returns the piece on `sq` along with its index in the piece list.
    fn take(&mut self, sq: Square) -> Option<(usize, Piece)> {
        let color = self.grid[sq.index()].as_ref()?.color();
        let list = &mut self.pieces[color as usize];
        let index = list.iter().position(|&s| s == sq)?;
        list.remove(index);

        self.grid[sq.index()].take().map(|piece| (index, piece))
    }

    /// Puts back a piece removed by `take` at the same place in its piece list.
    fn restore(&mut self, index: usize, piece: Piece) {
        let sq = piece.square();
        self.pieces[piece.color() as usize].insert(index, sq);
        self.grid[sq.index()] = Some(piece);
    }

    /// Moves the piece on `orig` to the empty square `dest` without touching any other state.
    fn relocate(&mut self, orig: Square, dest: Square) {
        debug_assert!(self.grid[dest.index()].is_none());
        if let Some(mut piece) = self.grid[orig.index()].take() {
            if let Some(entry) = self.pieces[piece.color() as usize].iter_mut().find(|s| **s == orig) {
                *entry = dest;
            }
            piece.set_square(dest);
            self.grid[dest.index()] = Some(piece);
        }
    }

    /// Returns the part of the FEN that identifies a position for repetition: placement, side to
    /// move, castling rights and en passant target.
    pub fn signature(&self) -> String {
        format!("{} {} {} {}",
            self.placement_str(),
            self.turn,
            self.castling_str(),
            self.ep_square.map_or("-".to_string(), |sq| sq.to_string()),
        )
    }

    /// Appends the current position's signature to the history.
    pub fn record_position(&mut self) {
        let signature = self.signature();
        self.history.push(signature);
    }

    /// Returns the number of times the current position has been recorded.
    pub fn repetitions(&self) -> usize {
        let signature = self.signature();
        self.history.iter().filter(|s| **s == signature).count()
    }

    /// Returns the signatures of every recorded position, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns `true` if each grid cell and piece list agree with each other.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let listed: usize = self.pieces.iter().map(Vec::len).sum();
        let on_grid = self.grid.iter().filter(|p| p.is_some()).count();

        listed == on_grid && [Color::White, Color::Black].iter().all(|&color| {
            self.pieces(color).iter().all(|&sq| match self.piece_at(sq) {
                Some(p) => p.color() == color && p.square() == sq,
                None => false,
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl BoardView for Board {
    fn piece_at(&self, sq: Square) -> Option<&Piece> {
        Board::piece_at(self, sq)
    }

    fn squares_of(&self, color: Color) -> &[Square] {
        self.pieces(color)
    }

    fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        Board::has_castling_right(self, color, side)
    }
}

impl fmt::Display for Board {
    /// Writes the board as a FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Board::from_fen_str(s)
    }
}
