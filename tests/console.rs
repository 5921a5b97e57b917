//! Plays sessions through the console front end
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::Cursor;
use arbiter::chess::{Color, Game, GameOver, Status};
use arbiter::console::{self, Config, Console};

fn session(input: &str, game: &mut Game, config: Config) -> (Option<GameOver>, String) {
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config);
    let result = console::run(&mut console, game).expect("session failed");
    let (_, output) = console.into_inner();
    (result, String::from_utf8(output).expect("output is not UTF-8"))
}

#[test]
fn game_to_checkmate() {
    let mut game = Game::new();
    let (result, output) = session("f3\ne5\ng4\nQh4\n", &mut game, Config::default());

    assert_eq!(result, Some(GameOver::new(Status::Checkmate, Some(Color::Black))));
    assert!(output.ends_with("Game over: 0-1 {checkmate}\n"));
    assert_eq!(output.matches("to move: ").count(), 4);
}

#[test]
fn end_of_input_leaves_the_game_open() {
    let mut game = Game::new();
    let (result, output) = session("e4\n", &mut game, Config::default());

    assert_eq!(result, None);
    assert_eq!(game.turn(), Color::Black);
    assert!(output.contains("4  . . . . P . . .\n"));
}

#[test]
fn illegal_moves_are_asked_again() {
    let mut game = Game::from_fen("4k3/4r3/8/8/8/8/3B4/4K3 w - - 0 1").expect("valid position");
    let (_, output) = session("Bc3\nBe3\nexit\n", &mut game, Config::default());

    assert_eq!(output.matches("Error: ").count(), 1);
    assert_eq!(game.moves().to_vec(), vec!["Be3"]);
}

#[test]
fn unicode_board() {
    let mut game = Game::new();
    let config = Config { unicode: true, ..Config::default() };
    let (_, output) = session("quit\n", &mut game, config);

    assert!(output.contains("1  ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖\n"));
}

#[test]
fn finished_position_ends_at_once() {
    let mut game = Game::from_fen("7k/8/6QK/8/8/8/8/8 b - - 0 1").expect("valid position");
    let (result, output) = session("", &mut game, Config::default());

    assert_eq!(result.map(|over| over.status()), Some(Status::Stalemate));
    assert!(!output.contains("to move: "));
}
