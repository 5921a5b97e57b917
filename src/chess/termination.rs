//! Detects the end of the game
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::*;
use super::legality;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why the game ended
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// Neither side has enough material to mate.
    InsufficientMaterial,
    /// A hundred plies without a capture or pawn move.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
            Status::InsufficientMaterial => "insufficient material",
            Status::FiftyMoveRule => "fifty-move rule",
            Status::ThreefoldRepetition => "repetition",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The end of a game and who won it, if anybody
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GameOver {
    status: Status,
    winner: Option<Color>,
}

impl GameOver {
    /// Creates a result. Only a checkmate has a winner.
    pub fn new(status: Status, winner: Option<Color>) -> GameOver {
        GameOver { status, winner }
    }

    /// Returns why the game ended
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the winner, or `None` for a draw
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns `true` if the game is drawn
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Returns the PGN result token: `1-0`, `0-1` or `1/2-1/2`
    pub fn score(&self) -> &'static str {
        match self.winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{} {{{}}}", self.score(), self.status).fmt(f)
    }
}

/// Decides whether the game is over in the position on `board`.
///
/// Checked in order, first match wins: no legal move (checkmate or stalemate), the fifty-move
/// rule, threefold repetition, then insufficient material.
pub fn detect(board: &mut Board) -> Option<GameOver> {
    let turn = board.turn();

    if !legality::has_legal_move(board) {
        return if board.in_check(turn) {
            Some(GameOver::new(Status::Checkmate, Some(!turn)))
        } else {
            Some(GameOver::new(Status::Stalemate, None))
        };
    }

    if board.halfmove_clock() >= 100 {
        return Some(GameOver::new(Status::FiftyMoveRule, None));
    }

    if board.repetitions() >= 3 {
        return Some(GameOver::new(Status::ThreefoldRepetition, None));
    }

    if insufficient_material(board) {
        return Some(GameOver::new(Status::InsufficientMaterial, None));
    }

    None
}

/// Neither side has a pawn, rook or queen, and each has at most one piece besides its king.
fn insufficient_material(board: &Board) -> bool {
    [Color::White, Color::Black].iter().all(|&color| {
        let squares = board.pieces(color);
        let heavy = squares.iter()
            .filter_map(|&sq| board.piece_at(sq))
            .any(|p| match p.kind() {
                Kind::Pawn | Kind::Rook | Kind::Queen => true,
                _ => false,
            });

        !heavy && squares.len() <= 2
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_fen(fen: &str) -> Option<GameOver> {
        let mut board: Board = fen.parse().unwrap();
        detect(&mut board)
    }

    #[test]
    fn checkmate_names_the_winner() {
        let over = detect_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(over, Some(GameOver::new(Status::Checkmate, Some(Color::Black))));
        assert_eq!(over.unwrap().score(), "0-1");
    }

    #[test]
    fn stalemate_is_a_draw() {
        let over = detect_fen("7k/8/6QK/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(over.status(), Status::Stalemate);
        assert!(over.is_draw());
        assert_eq!(over.to_string(), "1/2-1/2 {stalemate}");
    }

    #[test]
    fn fifty_moves() {
        assert_eq!(detect_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").map(|o| o.status()),
            Some(Status::FiftyMoveRule));
        assert_eq!(detect_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"), None);
    }

    #[test]
    fn mate_takes_precedence_over_fifty_moves() {
        assert_eq!(detect_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 100 90").map(|o| o.status()),
            Some(Status::Checkmate));
    }

    #[test]
    fn insufficient_material() {
        for fen in &[
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4kn2/8/8/8/8/8/8/4K3 w - - 0 1",
            "4kb2/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4kb2/8/8/8/8/8/8/3BK3 w - - 0 1",
            "4kn2/8/8/8/8/8/8/4KN2 w - - 0 1",
        ] {
            assert_eq!(detect_fen(fen).map(|o| o.status()), Some(Status::InsufficientMaterial),
                "{}", fen);
        }
        for fen in &[
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KR2 w - - 0 1",
            "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1",
            "4k3/8/8/8/8/8/8/3QK3 w - - 0 1",
        ] {
            assert_eq!(detect_fen(fen), None, "{}", fen);
        }
    }

    #[test]
    fn threefold_repetition() {
        let mut board: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert_eq!(detect(&mut board), None);
        board.record_position();
        assert_eq!(detect(&mut board), None);
        board.record_position();
        assert_eq!(detect(&mut board).map(|o| o.status()), Some(Status::ThreefoldRepetition));
    }
}
