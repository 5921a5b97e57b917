//! Contains structures to represent moves and to read them from algebraic notation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use super::*;
use super::error::{MoveInputError, Result};
use super::legality;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// Any move which is not castling, a two-square pawn advancement, en-passant capture, or pawn
    /// promotion
    Standard,
    /// A castling move
    Castling,
    /// A two-square pawn advancement
    Advance2,
    /// An en passant capture
    EnPassant,
    /// A pawn promotion to the given piece type
    Promotion(Promotion),
}

impl MoveType {
    /// Returns `true` if the `MoveType` is a promotion.
    pub fn is_promotion(self) -> bool {
        if let MoveType::Promotion(_) = self {
            true
        } else {
            false
        }
    }
}

impl Default for MoveType {
    fn default() -> Self {
        MoveType::Standard
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from one square to another.
///
/// A move is only a description; whether it is legal depends on the board it is played on. The
/// move of the rook when castling is implied by the king's move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    orig: Square,
    dest: Square,
    move_type: MoveType,
}

impl Move {
    /// Creates a move
    pub fn new(orig: Square, dest: Square, move_type: MoveType) -> Move {
        Move { orig, dest, move_type }
    }

    /// Creates a move, working out its type from the piece on `orig`.
    ///
    /// `promotion` is only used if the move turns out to be a promotion; it defaults to a queen.
    pub fn classify<B>(board: &B, orig: Square, dest: Square, promotion: Option<Promotion>) -> Move
        where B: BoardView + ?Sized {
        let (dx, dy) = dest.diff(orig);

        let move_type = match board.piece_at(orig) {
            Some(piece) if piece.kind() == Kind::King && dx.abs() == 2 && dy == 0 => {
                MoveType::Castling
            },
            Some(piece) if piece.kind() == Kind::Pawn => {
                if dy.abs() == 2 {
                    MoveType::Advance2
                } else if dest.rank() == piece.color().promotion_rank() {
                    MoveType::Promotion(promotion.unwrap_or_default())
                } else if dx != 0 && board.piece_at(dest).is_none()
                    && board.en_passant_square() == Some(dest) {
                    MoveType::EnPassant
                } else {
                    MoveType::Standard
                }
            },
            _ => MoveType::Standard,
        };

        Move { orig, dest, move_type }
    }

    /// Returns the origin of the moved piece.
    pub fn orig(&self) -> Square {
        self.orig
    }

    /// Returns the destination of the moved piece.
    pub fn dest(&self) -> Square {
        self.dest
    }

    /// Returns the type of move.
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    /// Returns the type of promotion, if any
    pub fn promotion(&self) -> Option<Promotion> {
        if let MoveType::Promotion(prom) = self.move_type {
            Some(prom)
        } else {
            None
        }
    }

    /// Returns `true` if the move captures a piece on `board`, which must be the board the move is
    /// about to be played on.
    pub fn is_capture(&self, board: &Board) -> bool {
        self.move_type == MoveType::EnPassant || board.piece_at(self.dest).is_some()
    }

    /// Formats the move in Standard Algebraic Notation (eg Nf3, exd5, e8=Q, O-O or Qh4#).
    ///
    /// `board` must be the board the move is about to be played on, with the legal moves of the
    /// side to move already computed. It is left as it was.
    pub fn to_san(&self, board: &mut Board) -> Result<String> {
        let mut s = String::new();

        let kind = match board.piece_at(self.orig) {
            Some(piece) => piece.kind(),
            None => return Err(Error::IllegalMove),
        };

        if self.move_type == MoveType::Castling {
            match self.dest.file() {
                File::G => s += "O-O",
                _ => s += "O-O-O",
            }
        } else {
            if kind == Kind::Pawn {
                if self.is_capture(board) {
                    s += &self.orig.file().to_string();
                }
            } else {
                s += &kind.to_string();

                let rivals: Vec<Square> = board.pieces(board.turn()).iter()
                    .copied()
                    .filter(|&sq| sq != self.orig)
                    .filter(|&sq| board.piece_at(sq).map_or(false, |p| {
                        p.kind() == kind && p.is_legal(self.dest)
                    }))
                    .collect();

                if !rivals.is_empty() {
                    if rivals.iter().all(|sq| sq.file() != self.orig.file()) {
                        s += &self.orig.file().to_string();
                    } else if rivals.iter().all(|sq| sq.rank() != self.orig.rank()) {
                        s += &self.orig.rank().to_string();
                    } else {
                        s += &self.orig.to_string();
                    }
                }
            }

            if self.is_capture(board) {
                s += "x";
            }
            s += &self.dest.to_string();

            if let Some(prom) = self.promotion() {
                s += &format!("={}", Kind::from(prom));
            }
        }

        let undo = board.make(self)?;
        if board.in_check(board.turn()) {
            if legality::legal_moves(board).is_empty() {
                s += "#";
            } else {
                s += "+";
            }
        }
        board.unmake(undo);

        Ok(s)
    }
}

impl fmt::Display for Move {
    /// Writes the move in Coordinate Notation (eg g1f3, e7e8q, or e1g1)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{}{}", self.orig, self.dest);

        if let Some(prom) = self.promotion() {
            s += &Kind::from(prom).to_string().to_lowercase();
        }

        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
lazy_static! {
    static ref MOVE_TEXT: Regex = Regex::new(
        r"^(?:([NBRQK])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=([NBRQ]))?|(O-O-O)|(O-O))$"
    ).expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move as written in algebraic notation, before it is matched against a board.
///
/// ```rust
/// use arbiter::chess::Board;
/// use arbiter::chess::legality;
/// use arbiter::chess::moves::MoveText;
///
/// let mut board = Board::new();
/// legality::refresh(&mut board);
///
/// let mv = "Nf3".parse::<MoveText>()?.resolve(&board)?;
/// assert_eq!(mv.to_string(), "g1f3");
/// # Ok::<(), arbiter::chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveText {
    kind: Option<Kind>,
    orig_file: Option<File>,
    orig_rank: Option<Rank>,
    capture: bool,
    dest: Option<Square>,
    promotion: Option<Promotion>,
    castle: Option<CastleSide>,
}

impl MoveText {
    /// Returns the castling side if the text is a castling token.
    pub fn castle(&self) -> Option<CastleSide> {
        self.castle
    }

    /// Finds the unique move of the side to move that the text describes.
    ///
    /// The pieces' cached legal moves must be current (see
    /// [legality::refresh](../legality/fn.refresh.html)).
    ///
    /// # Errors
    ///
    /// - `InvalidMoveInput(NoCandidate)` if no piece of the side to move can make the move at all
    /// - `IllegalMove` if one can, but the move would leave its king attacked or castle through
    ///   check
    /// - `InvalidMoveInput(Ambiguous)` if more than one piece can legally make the move
    /// - `InvalidMoveInput(CaptureMarker)`, `InvalidMoveInput(MissingPromotion)` or
    ///   `InvalidMoveInput(UnexpectedPromotion)` if the notation doesn't match the move
    pub fn resolve(&self, board: &Board) -> Result<Move> {
        let color = board.turn();
        let home = color.home_rank();

        let (kind, dest) = match (self.castle, self.dest) {
            (Some(side), _) => (Kind::King, Square::from_coord(side.king_file(), home)),
            (None, Some(dest)) => (self.kind.unwrap_or(Kind::Pawn), dest),
            (None, None) => return Err(MoveInputError::Unparsable.into()),
        };

        let castling = kind == Kind::King
            && dest.rank() == home
            && (dest.file() == File::G || dest.file() == File::C)
            && board.king_square(color) == Some(Square::from_coord(File::E, home));

        if self.castle.is_some() && !castling {
            return Err(Error::IllegalMove);
        }

        let candidates: Vec<&Piece> = board.pieces(color).iter()
            .filter_map(|&sq| board.piece_at(sq))
            .filter(|p| p.kind() == kind)
            .filter(|p| self.orig_file.map_or(true, |f| f == p.square().file()))
            .filter(|p| self.orig_rank.map_or(true, |r| r == p.square().rank()))
            .filter(|p| p.can_move(board, dest))
            .collect();

        let legal: Vec<&Piece> = candidates.iter()
            .copied()
            .filter(|p| p.is_legal(dest))
            .collect();

        let piece = match legal.len() {
            1 => legal[0],
            0 if candidates.is_empty() && !castling => {
                return Err(MoveInputError::NoCandidate.into());
            },
            0 => return Err(Error::IllegalMove),
            _ => return Err(MoveInputError::Ambiguous.into()),
        };

        let mv = Move::classify(board, piece.square(), dest, self.promotion);

        if self.capture != mv.is_capture(board) {
            return Err(MoveInputError::CaptureMarker.into());
        }

        match (mv.move_type().is_promotion(), self.promotion) {
            (true, None) => Err(MoveInputError::MissingPromotion.into()),
            (false, Some(_)) => Err(MoveInputError::UnexpectedPromotion.into()),
            _ => Ok(mv),
        }
    }
}

impl FromStr for MoveText {
    type Err = Error;

    fn from_str(s: &str) -> Result<MoveText> {
        let caps = MOVE_TEXT.captures(s.trim())
            .ok_or(Error::InvalidMoveInput(MoveInputError::Unparsable))?;

        if caps.get(7).is_some() {
            return Ok(MoveText { castle: Some(CastleSide::QueenSide), ..Default::default() });
        }
        if caps.get(8).is_some() {
            return Ok(MoveText { castle: Some(CastleSide::KingSide), ..Default::default() });
        }

        Ok(MoveText {
            kind: group(&caps, 1)?,
            orig_file: group(&caps, 2)?,
            orig_rank: group(&caps, 3)?,
            capture: caps.get(4).is_some(),
            dest: group(&caps, 5)?,
            promotion: group(&caps, 6)?,
            castle: None,
        })
    }
}

/// Parses capture group `i`, if it matched.
fn group<T: FromStr>(caps: &Captures<'_>, i: usize) -> Result<Option<T>> {
    caps.get(i)
        .map(|m| m.as_str().parse::<T>())
        .transpose()
        .map_err(|_| Error::InvalidMoveInput(MoveInputError::Unparsable))
}
