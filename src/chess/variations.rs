//! Module for counting and printing the number of variations from a given position
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::*;

/// Print the number of variations of the given `depth` for each legal move from `board`
pub fn print(board: &mut Board, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for m in legality::legal_moves(board) {
        if let Ok(undo) = board.make(&m) {
            let count = count(board, depth - 1);
            total += count;
            println!("\t{:7}\t{:12}\t{}", m, count, board);
            board.unmake(undo);
        }
    }

    total
}

/// Count the number of variations of the given `depth` from `board`
///
/// The board is left as it was.
pub fn count(board: &mut Board, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let moves = legality::legal_moves(board);
    if depth == 1 {
        return moves.len();
    }

    let mut total = 0;

    for m in moves {
        if let Ok(undo) = board.make(&m) {
            total += count(board, depth - 1);
            board.unmake(undo);
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position() {
        let mut board = Board::new();
        assert_eq!(count(&mut board, 0), 1);
        assert_eq!(count(&mut board, 1), 20);
        assert_eq!(count(&mut board, 2), 400);
        assert_eq!(count(&mut board, 3), 8902);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut board: Board = fen.parse().unwrap();
        assert_eq!(count(&mut board, 1), 48);
        assert_eq!(count(&mut board, 2), 2039);
    }
}
