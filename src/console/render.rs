//! Draws a board as text
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::{Board, Color, File, Kind, Piece, Rank, Square};

/// Renders `board` with rank 8 at the top, using FEN letters or unicode glyphs.
pub fn render(board: &Board, unicode: bool) -> String {
    let mut s = String::new();

    for &rank in Rank::ALL.iter().rev() {
        s += &format!("{} ", rank);
        for &file in &File::ALL {
            let glyph = match board.piece_at(Square::from_coord(file, rank)) {
                Some(piece) if unicode => glyph(piece),
                Some(piece) => piece.fen_char(),
                None => '.',
            };
            s.push(' ');
            s.push(glyph);
        }
        s.push('\n');
    }

    s += "  ";
    for &file in &File::ALL {
        s += &format!(" {}", file);
    }
    s.push('\n');

    s
}

fn glyph(piece: &Piece) -> char {
    match (piece.color(), piece.kind()) {
        (Color::White, Kind::King) => '♔',
        (Color::White, Kind::Queen) => '♕',
        (Color::White, Kind::Rook) => '♖',
        (Color::White, Kind::Bishop) => '♗',
        (Color::White, Kind::Knight) => '♘',
        (Color::White, Kind::Pawn) => '♙',
        (Color::Black, Kind::King) => '♚',
        (Color::Black, Kind::Queen) => '♛',
        (Color::Black, Kind::Rook) => '♜',
        (Color::Black, Kind::Bishop) => '♝',
        (Color::Black, Kind::Knight) => '♞',
        (Color::Black, Kind::Pawn) => '♟',
    }
}
