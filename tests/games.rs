//! Plays whole games through the public interface
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use arbiter::chess::*;
use arbiter::chess::error::{MoveInputError, ParseFenError};

fn play_all(game: &mut Game, moves: &str) -> Transition {
    let mut last = Transition::Committed(game.turn());
    for text in moves.split_whitespace() {
        last = game.play(text).unwrap_or_else(|err| panic!("{}: {}", text, err));
    }
    last
}

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    let last = play_all(&mut game, "f3 e5 g4 Qh4");

    match last {
        Transition::Terminal(over) => {
            assert_eq!(over.status(), Status::Checkmate);
            assert_eq!(over.winner(), Some(Color::Black));
        },
        other => panic!("expected checkmate, got {:?}", other),
    }
    assert_eq!(game.play("a3"), Err(Error::GameFinished));
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    let last = play_all(&mut game, "e4 e5 Bc4 Nc6 Qh5 Nf6 Qxf7");
    assert_eq!(last, Transition::Terminal(GameOver::new(Status::Checkmate, Some(Color::White))));
    assert_eq!(game.moves().last().map(String::as_str), Some("Qxf7#"));
}

#[test]
fn queen_needs_an_open_diagonal() {
    let mut game = Game::new();
    assert_eq!(game.play("Qh5"), Err(Error::InvalidMoveInput(MoveInputError::NoCandidate)));
    play_all(&mut game, "e4 e5");
    assert_eq!(game.play("Qh5"), Ok(Transition::Committed(Color::Black)));
}

#[test]
fn bare_bishops_are_a_draw() {
    let mut game = Game::from_fen("4k3/8/8/8/3p4/8/1B6/4K3 w - - 0 1").unwrap();
    assert_eq!(game.result(), None);
    let last = play_all(&mut game, "Bxd4");
    // a lone king against king and bishop
    assert_eq!(last, Transition::Terminal(GameOver::new(Status::InsufficientMaterial, None)));
}

#[test]
fn castling_after_the_king_returned_is_refused() {
    let mut game = Game::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    play_all(&mut game, "Kf1 Kf8 Ke1 Ke8");
    assert_eq!(game.board().to_fen_str(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 4 3");
    assert_eq!(game.play("O-O"), Err(Error::IllegalMove));
    assert_eq!(game.play("Kg1"), Err(Error::IllegalMove));
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn castling_out_of_check_is_refused() {
    let mut game = Game::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(game.play("O-O"), Err(Error::IllegalMove));
    assert_eq!(game.play("O-O-O"), Err(Error::IllegalMove));
}

#[test]
fn castling_through_check_is_refused() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(game.play("O-O"), Err(Error::IllegalMove));
    assert_eq!(game.play("O-O-O"), Ok(Transition::Committed(Color::Black)));
}

#[test]
fn castling_both_ways() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play_all(&mut game, "O-O O-O-O");
    assert_eq!(game.board().to_fen_str(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    assert_eq!(game.moves().to_vec(), vec!["O-O", "O-O-O"]);
}

#[test]
fn en_passant_only_right_away() {
    let mut game = Game::new();
    play_all(&mut game, "e4 a6 e5 d5");
    assert_eq!(game.board().en_passant_square(), Some(sq("d6")));
    assert!(game.legal_moves(sq("e5")).contains(&sq("d6")));

    let mut later = game.clone();
    play_all(&mut later, "a3 a5");
    assert_eq!(later.play("exd6"), Err(Error::InvalidMoveInput(MoveInputError::NoCandidate)));

    play_all(&mut game, "exd6");
    assert!(game.board().piece_at(sq("d5")).is_none());
    assert_eq!(game.board().to_fen_str(),
        "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3");
}

#[test]
fn promotion_must_be_named() {
    let mut game = Game::from_fen("4k3/1P6/8/8/8/8/7p/4K3 w - - 0 1").unwrap();
    assert_eq!(game.play("b8"), Err(Error::InvalidMoveInput(MoveInputError::MissingPromotion)));
    assert_eq!(game.play("b8=N"), Ok(Transition::Committed(Color::Black)));
    assert_eq!(game.board().piece_at(sq("b8")).map(Piece::kind), Some(Kind::Knight));
}

#[test]
fn stalemate() {
    let mut game = Game::from_fen("7k/8/4Q3/6K1/8/8/8/8 w - - 0 1").unwrap();
    let last = play_all(&mut game, "Qf7");
    assert_eq!(last, Transition::Terminal(GameOver::new(Status::Stalemate, None)));
}

#[test]
fn threefold_repetition() {
    let mut game = Game::new();
    let last = play_all(&mut game, "Nf3 Nf6 Ng1 Ng8 Nf3 Nf6 Ng1");
    assert_eq!(last, Transition::Committed(Color::Black));
    let last = play_all(&mut game, "Ng8");
    assert_eq!(last, Transition::Terminal(GameOver::new(Status::ThreefoldRepetition, None)));
}

#[test]
fn bad_positions_are_refused() {
    assert_eq!(Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
        Err(Error::InvalidFen(ParseFenError::ParseBoard)));
    assert_eq!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
        Err(Error::InvalidFen(ParseFenError::ParseTurn)));
}

#[test]
fn pgn_of_a_finished_game() {
    let mut game = Game::new();
    play_all(&mut game, "e4 e5 Bc4 Nc6 Qh5 Nf6 Qxf7");

    let mut tags = HashMap::new();
    tags.insert("White".to_owned(), "Alice".to_owned());
    tags.insert("Black".to_owned(), "Bob".to_owned());
    let pgn = game.to_pgn(&tags);

    assert!(pgn.contains("[White \"Alice\"]\n[Black \"Bob\"]\n[Result \"1-0\"]\n"));
    assert!(pgn.ends_with("\n1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0 {checkmate}\n"));
}

#[test]
fn lost_castling_rights_make_a_new_position() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let last = play_all(&mut game, "Rh2 Rh7 Rh1 Rh8 Rh2 Rh7 Rh1 Rh8");

    // the starting placement has now been seen three times, but only twice without castling
    assert_eq!(last, Transition::Committed(Color::White));
    assert_eq!(game.board().repetitions(), 2);
    assert_eq!(game.board().to_fen_str(), "r3k2r/8/8/8/8/8/8/R3K2R w Qq - 8 5");
}

#[test]
fn capture_resets_the_halfmove_clock() {
    let mut game = Game::new();
    play_all(&mut game, "Nf3 Nf6 Ng5 Ng4");
    assert_eq!(game.board().halfmove_clock(), 4);
    play_all(&mut game, "Nxf7");
    assert_eq!(game.board().halfmove_clock(), 0);
}

#[test]
fn fifty_move_rule_through_play() {
    let fen = "4k3/8/8/8/8/8/4P3/R3K3 w - - 99 80";

    let mut game = Game::from_fen(fen).unwrap();
    assert_eq!(game.result(), None);
    assert_eq!(play_all(&mut game, "e3"), Transition::Committed(Color::Black));
    assert_eq!(game.board().halfmove_clock(), 0);

    let mut game = Game::from_fen(fen).unwrap();
    let last = play_all(&mut game, "Ra2");
    assert_eq!(last, Transition::Terminal(GameOver::new(Status::FiftyMoveRule, None)));
    assert_eq!(game.board().halfmove_clock(), 100);
}
