//! Module to implement a chess game
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use log::{debug, info};
use super::*;
use super::board::START_FEN;
use super::error::Result;
use super::moves::MoveText;
use super::legality;
use super::termination;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What happened after a move was accepted
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The move was played and it is now the given color's turn.
    Committed(Color),
    /// The move was played and ended the game.
    Terminal(GameOver),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A chess game
///
/// Owns the board for the whole game. Moves are accepted one at a time in algebraic notation; a
/// rejected move leaves the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    initial_fen: String,
    moves: Vec<String>,
    result: Option<GameOver>,
}

impl Game {
    /// Creates a new game from the standard starting position
    pub fn new() -> Self {
        Game::starting_at(Board::new())
    }

    /// Creates a new game from a position in FEN.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidFen` if the FEN is malformed or describes an impossible position.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = Board::from_fen_str(fen)?;

        Ok(Game::starting_at(board))
    }

    /// Creates a new game using `board` as the starting position.
    ///
    /// A position that is already over (such as checkmate) reports its result straight away.
    pub fn starting_at(mut board: Board) -> Self {
        let initial_fen = board.to_fen_str();

        legality::refresh(&mut board);
        let result = termination::detect(&mut board);
        if let Some(over) = result {
            info!("game starts finished: {}", over);
        }

        Game {
            board,
            initial_fen,
            moves: Vec::new(),
            result,
        }
    }

    /// Returns the current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    /// Returns the result of the game, or `None` if the game isn't over
    pub fn result(&self) -> Option<GameOver> {
        self.result
    }

    /// Returns the FEN of the starting position
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    /// Returns the moves played so far in Standard Algebraic Notation
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Returns the legal destinations of the piece on `sq`, which are empty unless it belongs to
    /// the side to move.
    pub fn legal_moves(&self, sq: Square) -> &[Square] {
        match self.board.piece_at(sq) {
            Some(piece) => piece.legal_moves(),
            None => &[],
        }
    }

    /// Plays a move given in algebraic notation (eg `e4`, `Nbd7`, `exd6`, `e8=Q` or `O-O`).
    ///
    /// # Errors
    ///
    /// - `Error::GameFinished` if the game is already over
    /// - `Error::InvalidMoveInput` if the text doesn't describe exactly one move of the side to
    ///   move, or its capture marker or promotion suffix is wrong
    /// - `Error::IllegalMove` if the move would leave the mover's king attacked, or castle out of,
    ///   through or into check
    pub fn play(&mut self, text: &str) -> Result<Transition> {
        if let Some(over) = self.result {
            debug!("move {} after the game ended ({})", text, over);
            return Err(Error::GameFinished);
        }

        let resolved = text.parse::<MoveText>()
            .and_then(|move_text| move_text.resolve(&self.board));

        match resolved {
            Ok(mv) => self.commit(mv),
            Err(err) => {
                debug!("rejected move {}: {} in {}", text, err, self.board);
                Err(err)
            }
        }
    }

    /// Plays a move given by its squares, such as one chosen from `legal_moves`.
    ///
    /// # Errors
    ///
    /// Same as [play](#method.play).
    pub fn play_move(&mut self, mv: Move) -> Result<Transition> {
        if self.result.is_some() {
            return Err(Error::GameFinished);
        }

        let legal = match self.board.piece_at(mv.orig()) {
            Some(piece) if piece.color() == self.turn() => piece.is_legal(mv.dest()),
            _ => return Err(error::MoveInputError::NoCandidate.into()),
        };
        if !legal {
            debug!("illegal move {} in {}", mv, self.board);
            return Err(Error::IllegalMove);
        }

        let classified = Move::classify(&self.board, mv.orig(), mv.dest(), mv.promotion());
        match (classified.move_type().is_promotion(), mv.promotion()) {
            (true, None) => return Err(error::MoveInputError::MissingPromotion.into()),
            (false, Some(_)) => return Err(error::MoveInputError::UnexpectedPromotion.into()),
            _ => {},
        }

        self.commit(classified)
    }

    fn commit(&mut self, mv: Move) -> Result<Transition> {
        let color = self.turn();
        let san = mv.to_san(&mut self.board)?;

        self.board.make(&mv)?;
        self.board.record_position();
        legality::refresh(&mut self.board);

        info!("{} played {} ({})", color, san, mv);
        self.moves.push(san);

        match termination::detect(&mut self.board) {
            Some(over) => {
                info!("game over: {}", over);
                self.result = Some(over);
                Ok(Transition::Terminal(over))
            },
            None => Ok(Transition::Committed(self.turn())),
        }
    }

    /// Returns a PGN representation of the game, using the given tags.
    ///
    /// This method will add a "Result" tag, and, if needed, the "SetUp" and "FEN" tags to the
    /// given tags.
    pub fn to_pgn(&self, tags: &HashMap<String, String>) -> String {
        let mut tags = tags.to_owned();

        if self.initial_fen != START_FEN {
            tags.insert("SetUp".to_owned(), "1".to_owned());
            tags.insert("FEN".to_owned(), self.initial_fen.clone());
        }

        let score = self.result.map_or("*", |over| over.score());
        tags.insert("Result".to_owned(), score.to_owned());

        let mut tag_list = String::new();
        for &name in &["Event", "Site", "Date", "Round", "White", "Black", "Result"] {
            let value = match (name, tags.remove(name)) {
                (_, Some(value)) => value,
                ("Date", None) => "????.??.??".to_owned(),
                (_, None) => "?".to_owned(),
            };

            tag_list += &format!("[{} \"{}\"]\n", name, value);
        }

        let mut names: Vec<_> = tags.keys().collect();
        names.sort_unstable();

        for name in names {
            tag_list += &format!("[{} \"{}\"]\n", name, tags[name]);
        }

        let result = match self.result {
            Some(over) => over.to_string(),
            None => "*".to_owned(),
        };

        let mut move_text = String::new();
        let mut width = 0;
        for word in format!("{} {}", self.numbered_moves(), result).split_whitespace() {
            // split into lines of no more than than 80 BYTES each
            if width + word.len() < 80 && width > 0 {
                move_text += " ";
                width += 1;
            } else if width > 0 {
                move_text += "\n";
                width = 0;
            }
            move_text += word;
            width += word.len();
        }

        format!("{}\n{}\n", tag_list, move_text)
    }

    /// The move list with move numbers (eg 1. e4 e5 2. Nf3)
    fn numbered_moves(&self) -> String {
        let (mut number, mut turn) = match Board::from_fen_str(&self.initial_fen) {
            Ok(board) => (board.fullmove_number(), board.turn()),
            Err(_) => (1, Color::White),
        };

        let mut s = String::new();
        for (i, san) in self.moves.iter().enumerate() {
            if turn == Color::White {
                s += &format!("{}. ", number);
            } else if i == 0 {
                s += &format!("{}... ", number);
            }
            s += san;
            s += " ";

            if turn == Color::Black {
                number += 1;
            }
            turn = !turn;
        }

        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
