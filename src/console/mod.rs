//! A line-oriented front end for playing a game at the terminal
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::{self, BufRead, Write};
use log::info;
use crate::chess::{self, Board, Color, Game, GameOver, Square};

pub mod config;
mod render;

pub use config::Config;
pub use render::render;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What a game session needs from its user interface
pub trait Frontend {
    /// Asks for the next line of input from the player whose `turn` it is. Returns `None` at end
    /// of input.
    fn request_move(&mut self, turn: Color) -> io::Result<Option<String>>;

    /// Shows the current position.
    fn display_board(&mut self, board: &Board) -> io::Result<()>;

    /// Reports a rejected move or command.
    fn display_error(&mut self, err: &chess::Error) -> io::Result<()>;

    /// Reports the end of the game.
    fn display_termination(&mut self, result: GameOver) -> io::Result<()>;

    /// Shows any other text, such as the answer to a command.
    fn display_message(&mut self, msg: &str) -> io::Result<()>;

    /// The FEN of the position to start from, or `None` for the standard position.
    fn select_starting_position(&mut self) -> Option<String> {
        None
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A `Frontend` reading lines from `R` and writing text to `W`
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    config: Config,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console using the given streams and settings.
    pub fn new(input: R, output: W, config: Config) -> Self {
        Console { input, output, config }
    }

    /// Returns the settings
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the console, returning its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Frontend for Console<R, W> {
    fn request_move(&mut self, turn: Color) -> io::Result<Option<String>> {
        let side = match turn {
            Color::White => "White",
            Color::Black => "Black",
        };
        write!(self.output, "{} to move: ", side)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn display_board(&mut self, board: &Board) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", render(board, self.config.unicode))?;
        if self.config.show_fen {
            writeln!(self.output, "{}", board)?;
        }
        writeln!(self.output)
    }

    fn display_error(&mut self, err: &chess::Error) -> io::Result<()> {
        writeln!(self.output, "Error: {}", err)
    }

    fn display_termination(&mut self, result: GameOver) -> io::Result<()> {
        writeln!(self.output, "Game over: {}", result)
    }

    fn display_message(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{}", msg)
    }

    fn select_starting_position(&mut self) -> Option<String> {
        self.config.start_fen.clone()
    }
}

/// Plays `game` through `frontend` until the game ends or the player leaves.
///
/// Besides moves, the player may enter `fen` to see the position in FEN, `moves <square>` to see
/// where the piece on that square can go, or `quit`/`exit` to leave. Rejected moves are reported
/// and asked for again. Returns the result if the game ended.
pub fn run<F: Frontend>(frontend: &mut F, game: &mut Game) -> io::Result<Option<GameOver>> {
    loop {
        frontend.display_board(game.board())?;

        if let Some(result) = game.result() {
            frontend.display_termination(result)?;
            return Ok(Some(result));
        }

        let line = match frontend.request_move(game.turn())? {
            Some(line) => line,
            None => {
                info!("end of input");
                return Ok(None);
            },
        };

        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {},
            (Some("quit"), None) | (Some("exit"), None) => {
                info!("player left the game");
                return Ok(None);
            },
            (Some("fen"), None) => frontend.display_message(&game.board().to_fen_str())?,
            (Some("moves"), Some(word)) => match word.parse::<Square>() {
                Ok(sq) => {
                    let dests: Vec<String> = game.legal_moves(sq).iter()
                        .map(|dest| dest.to_string())
                        .collect();
                    frontend.display_message(&format!("{}: {}", sq, dests.join(" ")))?;
                },
                Err(err) => frontend.display_message(&format!("{}: {}", word, err))?,
            },
            (Some(text), None) => {
                if let Err(err) = game.play(text) {
                    frontend.display_error(&err)?;
                }
            },
            (Some(_), Some(_)) => frontend.display_message(&format!("{}: unknown command", line))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str, game: &mut Game) -> (Option<GameOver>, String) {
        let mut console = Console::new(Cursor::new(input.to_owned()), Vec::new(), Config::default());
        let result = run(&mut console, game).unwrap();
        let (_, output) = console.into_inner();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn quit_leaves_without_result() {
        let mut game = Game::new();
        let (result, output) = session("e4\nquit\n", &mut game);
        assert_eq!(result, None);
        assert_eq!(game.moves().to_vec(), vec!["e4"]);
        assert!(output.contains("White to move: "));
        assert!(output.contains("Black to move: "));
    }

    #[test]
    fn errors_are_reported_and_play_continues() {
        let mut game = Game::new();
        let (_, output) = session("Ke2\ne4\n", &mut game);
        assert!(output.contains("Error: "));
        assert_eq!(game.moves().to_vec(), vec!["e4"]);
    }

    #[test]
    fn commands() {
        let mut game = Game::new();
        let (_, output) = session("fen\nmoves g1\nmoves z9\n", &mut game);
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"));
        assert!(output.contains("g1: f3 h3\n"));
        assert!(output.contains("z9: "));
        assert!(game.moves().is_empty());
    }

    #[test]
    fn shows_fen_under_the_board_when_configured() {
        let config = Config { show_fen: true, ..Config::default() };
        let mut console = Console::new(Cursor::new(String::new()), Vec::new(), config);
        console.display_board(&Board::new()).unwrap();
        let (_, output) = console.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("   a b c d e f g h\nrnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"));
    }
}
