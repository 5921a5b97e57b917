//! Reversible move application
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops::Deref;
use super::*;
use crate::chess::error::{Error, Result};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything `Board::unmake` needs to take back a move made by `Board::make`.
#[derive(Debug)]
pub struct Undo {
    mv: Move,
    captured: Option<(usize, Piece)>,
    had_moved: bool,
    castling_rights: [u8; Color::COUNT],
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Undo {
    /// Returns the move this undoes
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Returns the piece captured by the move, if any
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref().map(|(_, piece)| piece)
    }
}

impl Board {
    /// Applies `mv` for the side to move and returns what is needed to take it back.
    ///
    /// The move must be pseudo-legal: `make` carries out the relocation, capture, castling rook
    /// move, promotion, castling-right, en passant and counter updates, but doesn't check whether
    /// the move leaves the mover's king attacked. The position is not added to the history.
    pub fn make(&mut self, mv: &Move) -> Result<Undo> {
        let color = self.turn;
        let (kind, had_moved) = match self.piece_at(mv.orig()) {
            Some(piece) if piece.color() == color => (piece.kind(), piece.has_moved()),
            _ => return Err(Error::IllegalMove),
        };
        if let Some(target) = self.piece_at(mv.dest()) {
            if target.color() == color || target.kind() == Kind::King {
                return Err(Error::IllegalMove);
            }
        }

        let mut undo = Undo {
            mv: *mv,
            captured: None,
            had_moved,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        // the pawn captured en passant is beside the mover, not on the target
        let capture_square = match mv.move_type() {
            MoveType::EnPassant => Square::from_coord(mv.dest().file(), mv.orig().rank()),
            _ => mv.dest(),
        };
        undo.captured = self.take(capture_square);

        self.relocate(mv.orig(), mv.dest());
        if let Some(piece) = self.piece_at_mut(mv.dest()) {
            piece.set_has_moved(true);
            if let MoveType::Promotion(prom) = mv.move_type() {
                piece.promote(prom);
            }
        }

        if mv.move_type() == MoveType::Castling {
            let (rook_orig, rook_dest) = castling_rook_squares(mv);
            self.relocate(rook_orig, rook_dest);
            if let Some(rook) = self.piece_at_mut(rook_dest) {
                rook.set_has_moved(true);
            }
        }

        // castling rights
        for &side in &CastleSide::ALL {
            if kind == Kind::King || mv.orig() == rook_corner(color, side) {
                self.clear_castling_right(color, side);
            }
            if undo.captured.is_some() && capture_square == rook_corner(!color, side) {
                self.clear_castling_right(!color, side);
            }
        }

        // en passant target, only when an enemy pawn could take it
        self.ep_square = None;
        if mv.move_type() == MoveType::Advance2 {
            let capturer_beside = [-1, 1].iter()
                .filter_map(|&dx| mv.dest().add(dx, 0))
                .filter_map(|sq| self.piece_at(sq))
                .any(|p| p.kind() == Kind::Pawn && p.color() != color);
            if capturer_beside {
                self.ep_square = mv.orig().add(0, color.forward());
            }
        }

        if kind == Kind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = !color;

        Ok(undo)
    }

    /// Takes back the move that produced `undo`, restoring the board exactly as it was.
    pub fn unmake(&mut self, undo: Undo) {
        let mv = undo.mv;
        self.turn = !self.turn;

        if mv.move_type() == MoveType::Castling {
            let (rook_orig, rook_dest) = castling_rook_squares(&mv);
            self.relocate(rook_dest, rook_orig);
            if let Some(rook) = self.piece_at_mut(rook_orig) {
                rook.set_has_moved(false);
            }
        }

        self.relocate(mv.dest(), mv.orig());
        if let Some(piece) = self.piece_at_mut(mv.orig()) {
            piece.set_has_moved(undo.had_moved);
            if let MoveType::Promotion(_) = mv.move_type() {
                piece.demote();
            }
        }

        if let Some((index, piece)) = undo.captured {
            self.restore(index, piece);
        }

        self.castling_rights = undo.castling_rights;
        self.ep_square = undo.ep_square;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }

    /// Makes `mv` for as long as the returned guard lives. Dropping the guard unmakes the move.
    pub fn speculate(&mut self, mv: &Move) -> Result<Speculation<'_>> {
        let undo = self.make(mv)?;
        Ok(Speculation { board: self, undo: Some(undo) })
    }
}

fn rook_corner(color: Color, side: CastleSide) -> Square {
    Square::from_coord(side.rook_file(), color.home_rank())
}

fn castling_rook_squares(mv: &Move) -> (Square, Square) {
    let side = if mv.dest().file() == File::G { CastleSide::KingSide } else { CastleSide::QueenSide };
    let rank = mv.orig().rank();

    (Square::from_coord(side.rook_file(), rank), Square::from_coord(side.rook_destination_file(), rank))
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move made only to look at the resulting position.
///
/// Dereferences to the board after the move. The move is taken back when the guard is dropped,
/// however the scope is left.
#[derive(Debug)]
pub struct Speculation<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.unmake(undo);
        }
    }
}
