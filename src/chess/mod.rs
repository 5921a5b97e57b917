//! The `chess` module implements the rules of chess for a single game: board representation,
//! piece movement, legality, special moves, FEN and end-of-game detection.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use std::iter::FusedIterator;
use error::{ParseColorError, ParseFileError, ParseRankError, ParseSquareError, TryFromIntError};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Rank direction in which this color's pawns advance: `1` for White, `-1` for Black.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank on which this color's king and rooks start.
    pub fn home_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// The rank on which this color's pawns start.
    pub fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// The rank on which this color's pawns promote.
    pub fn promotion_rank(self) -> Rank {
        (!self).home_rank()
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use arbiter::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// Every file, from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];

    /// Returns the file `delta` files to the right (or left, if negative), if there is one.
    pub fn offset(self, delta: i8) -> Option<File> {
        let index = (self as i8).checked_add(delta)?;
        if index < 0 {
            None
        } else {
            File::ALL.get(index as usize).copied()
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            File::A => "a",
            File::B => "b",
            File::C => "c",
            File::D => "d",
            File::E => "e",
            File::F => "f",
            File::G => "g",
            File::H => "h",
        }.fmt(f)
    }
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(File::A),
            "b" => Ok(File::B),
            "c" => Ok(File::C),
            "d" => Ok(File::D),
            "e" => Ok(File::E),
            "f" => Ok(File::F),
            "g" => Ok(File::G),
            "h" => Ok(File::H),
            _   => Err(ParseFileError),
        }
    }
}

impl TryFrom<usize> for File {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        File::ALL.get(value).copied().ok_or(TryFromIntError)
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// Every rank, from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    /// Returns the rank `delta` ranks up (or down, if negative), if there is one.
    pub fn offset(self, delta: i8) -> Option<Rank> {
        let index = (self as i8).checked_add(delta)?;
        if index < 0 {
            None
        } else {
            Rank::ALL.get(index as usize).copied()
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self as usize + 1).fmt(f)
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::R1),
            "2" => Ok(Rank::R2),
            "3" => Ok(Rank::R3),
            "4" => Ok(Rank::R4),
            "5" => Ok(Rank::R5),
            "6" => Ok(Rank::R6),
            "7" => Ok(Rank::R7),
            "8" => Ok(Rank::R8),
            _   => Err(ParseRankError),
        }
    }
}

impl TryFrom<usize> for Rank {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Rank::ALL.get(value).copied().ok_or(TryFromIntError)
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Squares are ordered (and indexed) rank by rank starting at `a1`, which is the order in which
/// [successor](#method.successor) walks the board: a1, b1, ..., h1, a2, ..., h8.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        self.file
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Returns the index of the square in a1, b1, ..., h8 order.
    pub fn index(self) -> usize {
        self.rank as usize * File::COUNT + self.file as usize
    }

    /// Returns the square `dx` files and `dy` ranks away, or `None` if that is off the board.
    ///
    /// ```
    /// use arbiter::chess::Square;
    /// let e4: Square = "e4".parse().unwrap();
    /// assert_eq!(e4.add(1, 2), Some("f6".parse().unwrap()));
    /// assert_eq!(e4.add(4, 0), None);
    /// ```
    pub fn add(self, dx: i8, dy: i8) -> Option<Square> {
        Some(Square::from_coord(self.file.offset(dx)?, self.rank.offset(dy)?))
    }

    /// Returns the square `dx` files and `dy` ranks back, or `None` if that is off the board.
    pub fn subtract(self, dx: i8, dy: i8) -> Option<Square> {
        self.add(dx.checked_neg()?, dy.checked_neg()?)
    }

    /// Returns the `(file, rank)` distance from `other` to `self`.
    pub fn diff(self, other: Square) -> (i8, i8) {
        (self.file as i8 - other.file as i8, self.rank as i8 - other.rank as i8)
    }

    /// Returns the next square in a1, b1, ..., h1, a2, ... order, or `None` after h8.
    pub fn successor(self) -> Option<Square> {
        Square::try_from(self.index() + 1).ok()
    }

    /// Returns an iterator over all 64 squares, starting at a1 and following `successor`.
    pub fn iter() -> Squares {
        Squares { next: Some(Square::from_coord(File::A, Rank::R1)) }
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}{}", self.file, self.rank).fmt(f)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.is_char_boundary(1) {
            Ok(Square::from_coord(s[0..1].parse()?, s[1..2].parse()?))
        } else {
            Err(ParseSquareError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::from_coord(File::A, Rank::R1)
    }
}

impl TryFrom<usize> for Square {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            Ok(Square::from_coord(
                File::try_from(value % File::COUNT)?,
                Rank::try_from(value / File::COUNT)?,
            ))
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.index()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An iterator over squares following the successor chain.
#[derive(Debug, Clone)]
pub struct Squares {
    next: Option<Square>,
}

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let sq = self.next?;
        self.next = sq.successor();

        Some(sq)
    }
}

impl FusedIterator for Squares { }

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod error;
pub mod piece;
pub mod board;
pub mod legality;
pub mod moves;
pub mod termination;
pub mod game;
pub mod variations;

pub use error::Error;
pub use piece::{Piece, Kind, Promotion, CastleSide, BoardView};
pub use board::Board;
pub use moves::{Move, MoveType};
pub use termination::{GameOver, Status};
pub use game::{Game, Transition};
