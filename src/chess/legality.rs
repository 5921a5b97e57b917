//! Legal move generation: pseudo-legal candidates filtered by whether they leave the mover's king
//! attacked
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::trace;
use super::*;

/// Returns `true` if `mv` is a legal move for the side to move.
///
/// The move is made on `board` to see whether it leaves the mover's king attacked, and taken back
/// before returning.
pub fn is_legal(board: &mut Board, mv: &Move) -> bool {
    let color = board.turn();

    match board.piece_at(mv.orig()) {
        Some(piece) if piece.color() == color && piece.can_move(&*board, mv.dest()) => {},
        _ => return false,
    }

    match board.speculate(mv) {
        Ok(after) => !after.in_check(color),
        Err(_) => false,
    }
}

/// Returns every square the piece on `sq` can legally move to, in a1, b1, ..., h8 order.
///
/// Empty if there is no piece on `sq` or it belongs to the side not on move.
pub fn legal_destinations(board: &mut Board, sq: Square) -> Vec<Square> {
    match board.piece_at(sq) {
        Some(piece) if piece.color() == board.turn() => {},
        _ => return Vec::new(),
    }

    Square::iter()
        .filter(|&dest| {
            let mv = Move::classify(&*board, sq, dest, None);
            is_legal(board, &mv)
        })
        .collect()
}

/// Returns every legal move for the side to move. A promotion appears once per promotion piece.
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    let mut moves = Vec::new();

    for orig in board.pieces(board.turn()).to_vec() {
        for dest in legal_destinations(board, orig) {
            let mv = Move::classify(&*board, orig, dest, None);
            if mv.move_type().is_promotion() {
                for &prom in &Promotion::ALL {
                    moves.push(Move::new(orig, dest, MoveType::Promotion(prom)));
                }
            } else {
                moves.push(mv);
            }
        }
    }

    moves
}

/// Recomputes the cached legal moves of every piece of the side to move, and clears those of the
/// other side.
pub fn refresh(board: &mut Board) {
    let turn = board.turn();

    for sq in board.pieces(!turn).to_vec() {
        if let Some(piece) = board.piece_at_mut(sq) {
            piece.clear_legal_moves();
        }
    }

    for sq in board.pieces(turn).to_vec() {
        let dests = legal_destinations(board, sq);
        trace!("{} legal moves for {} on {}", dests.len(), turn, sq);
        if let Some(piece) = board.piece_at_mut(sq) {
            piece.set_legal_moves(dests);
        }
    }
}

/// Returns `true` if the side to move has at least one legal move.
pub fn has_legal_move(board: &mut Board) -> bool {
    for orig in board.pieces(board.turn()).to_vec() {
        for dest in Square::iter() {
            let mv = Move::classify(&*board, orig, dest, None);
            if is_legal(board, &mv) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(legal_moves(&mut board).len(), 20);
        assert_eq!(board, before);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board: Board = "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1".parse().unwrap();
        assert!(legal_destinations(&mut board, sq("e2")).is_empty());

        let mut board: Board = "4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1".parse().unwrap();
        let dests = legal_destinations(&mut board, sq("e2"));
        assert_eq!(dests, vec![sq("e3"), sq("e4"), sq("e5"), sq("e6"), sq("e7")]);
    }

    #[test]
    fn king_cannot_step_into_check() {
        let mut board: Board = "4k3/8/8/8/8/8/3r4/4K3 w - - 0 1".parse().unwrap();
        let dests = legal_destinations(&mut board, sq("e1"));
        assert_eq!(dests, vec![sq("f1"), sq("d2")]);
    }

    #[test]
    fn check_must_be_answered() {
        let mut board: Board = "4k3/4r3/8/8/8/8/8/1R2K3 w - - 0 1".parse().unwrap();
        assert!(legal_destinations(&mut board, sq("b1")).is_empty());

        let mut board: Board = "4k3/4r3/8/8/8/8/3R4/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(legal_destinations(&mut board, sq("d2")), vec![sq("e2")]);
    }

    #[test]
    fn pinned_rook_moves_along_the_pin() {
        let mut board: Board = "4k3/8/8/8/8/8/8/r1R1K3 w - - 0 1".parse().unwrap();
        assert_eq!(legal_destinations(&mut board, sq("c1")), vec![sq("a1"), sq("b1"), sq("d1")]);
    }

    #[test]
    fn en_passant_may_not_expose_the_king() {
        let mut board: Board = "8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1".parse().unwrap();
        assert_eq!(legal_destinations(&mut board, sq("e5")), vec![sq("e6")]);
    }

    #[test]
    fn promotions_are_expanded() {
        let mut board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promotions = legal_moves(&mut board).into_iter()
            .filter(|mv| mv.move_type().is_promotion())
            .count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn refresh_caches_the_side_to_move_only() {
        let mut board = Board::new();
        refresh(&mut board);
        let knight = board.piece_at(sq("g1")).unwrap();
        assert_eq!(knight.legal_moves().to_vec(), vec![sq("f3"), sq("h3")]);
        assert!(board.piece_at(sq("g8")).unwrap().legal_moves().is_empty());
    }

    #[test]
    fn mate_and_stalemate_have_no_moves() {
        let mut board: Board = "7k/6Q1/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(!has_legal_move(&mut board));
        assert!(board.in_check(Color::Black));

        let mut board: Board = "7k/8/6QK/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(!has_legal_move(&mut board));
        assert!(!board.in_check(Color::Black));
    }
}
