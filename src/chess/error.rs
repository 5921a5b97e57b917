//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The starting position is not a valid FEN string. Fatal to game construction.
    InvalidFen(ParseFenError),
    /// The move text does not parse, or does not describe a move in the current position.
    InvalidMoveInput(MoveInputError),
    /// The move identifies a unique piece and destination, but would leave the mover's king
    /// attacked or castle out of, through or into check.
    IllegalMove,
    /// A move was attempted after the game ended.
    GameFinished,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFen(err) => write!(f, "invalid FEN: {}", err),
            Error::InvalidMoveInput(err) => write!(f, "invalid move: {}", err),
            Error::IllegalMove => "illegal move".fmt(f),
            Error::GameFinished => "the game is over".fmt(f),
        }
    }
}

impl std::error::Error for Error { }

impl From<ParseFenError> for Error {
    fn from(err: ParseFenError) -> Self {
        Error::InvalidFen(err)
    }
}

impl From<MoveInputError> for Error {
    fn from(err: MoveInputError) -> Self {
        Error::InvalidMoveInput(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The reason a FEN string was rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    /// Empty string
    Empty,
    /// Malformed piece placement
    ParseBoard,
    /// Missing or invalid side to move
    ParseTurn,
    /// Missing or invalid castling field
    ParseCastling,
    /// Missing or invalid en passant field
    ParseEnPassant,
    /// Invalid halfmove clock
    ParseHalfMoveClock,
    /// Invalid fullmove number
    ParseMoveNumber,
    /// Unexpected text after the last field
    ExtraFields,
    /// Missing king or multiple kings of the same color
    KingCount,
    /// Pawn on first or last rank
    InvalidPawnRank,
    /// The side not on move is in check
    KingCapturable,
    /// En passant square is occupied, on the wrong rank, or has no pawn to capture
    EnPassantPawn,
    /// Castling rights without the king and rook on their original squares
    InvalidCastling,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFenError::*;

        match self {
            Empty => "empty string",
            ParseBoard => "malformed piece placement",
            ParseTurn => "side to move must be 'w' or 'b'",
            ParseCastling => "malformed castling rights",
            ParseEnPassant => "malformed en passant square",
            ParseHalfMoveClock => "halfmove clock must be a non-negative integer",
            ParseMoveNumber => "fullmove number must be a positive integer",
            ExtraFields => "unexpected text after the fullmove number",
            KingCount => "missing king or multiple kings of the same color",
            InvalidPawnRank => "pawn on first or last rank",
            KingCapturable => "king is under attack on opponent's move",
            EnPassantPawn => "en passant square without capturable pawn",
            InvalidCastling => "castling rights aren't valid for this position",
        }.fmt(f)
    }
}

impl std::error::Error for ParseFenError { }

impl From<ParseKindError> for ParseFenError {
    fn from(_: ParseKindError) -> Self {
        ParseFenError::ParseBoard
    }
}

impl From<ParseColorError> for ParseFenError {
    fn from(_: ParseColorError) -> Self {
        ParseFenError::ParseTurn
    }
}

impl From<ParseSquareError> for ParseFenError {
    fn from(_: ParseSquareError) -> Self {
        ParseFenError::ParseEnPassant
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The reason move text was rejected before any legality test
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveInputError {
    /// The text does not match the move grammar
    Unparsable,
    /// No piece of the side to move can make the move
    NoCandidate,
    /// More than one piece of the side to move can legally make the move
    Ambiguous,
    /// Capture marker present without a capture, or absent despite one
    CaptureMarker,
    /// A pawn reaches the last rank but no promotion piece was given
    MissingPromotion,
    /// A promotion piece was given for a move that does not promote
    UnexpectedPromotion,
}

impl fmt::Display for MoveInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MoveInputError::*;

        match self {
            Unparsable => "cannot parse move",
            NoCandidate => "no piece can make that move",
            Ambiguous => "ambiguous move",
            CaptureMarker => "capture marker does not match the position",
            MissingPromotion => "promotion piece required",
            UnexpectedPromotion => "move is not a promotion",
        }.fmt(f)
    }
}

impl std::error::Error for MoveInputError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Integer out of range for the target type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TryFromIntError;

impl fmt::Display for TryFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "integer out of range".fmt(f)
    }
}

impl std::error::Error for TryFromIntError { }

/// Cannot parse a `Color`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse color".fmt(f)
    }
}

impl std::error::Error for ParseColorError { }

/// Cannot parse a `Kind`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseKindError;

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse piece".fmt(f)
    }
}

impl std::error::Error for ParseKindError { }

/// Cannot parse a `File`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseFileError;

impl fmt::Display for ParseFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse file".fmt(f)
    }
}

impl std::error::Error for ParseFileError { }

/// Cannot parse a `Rank`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseRankError;

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse rank".fmt(f)
    }
}

impl std::error::Error for ParseRankError { }

/// Cannot parse a `Square`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse square".fmt(f)
    }
}

impl std::error::Error for ParseSquareError { }

impl From<ParseFileError> for ParseSquareError {
    fn from(_: ParseFileError) -> Self {
        ParseSquareError
    }
}

impl From<ParseRankError> for ParseSquareError {
    fn from(_: ParseRankError) -> Self {
        ParseSquareError
    }
}
