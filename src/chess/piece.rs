//! The piece catalog: piece kinds and their movement predicates
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use super::*;
use super::error::ParseKindError;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Kind {
    /// The number of piece types
    pub const COUNT: usize = Kind::King as usize + 1;
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Pawn => "P",
            Kind::Knight => "N",
            Kind::Bishop => "B",
            Kind::Rook => "R",
            Kind::Queen => "Q",
            Kind::King => "K",
        }.fmt(f)
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "P"|"p" => Ok(Kind::Pawn),
            "N"|"n" => Ok(Kind::Knight),
            "B"|"b" => Ok(Kind::Bishop),
            "R"|"r" => Ok(Kind::Rook),
            "Q"|"q" => Ok(Kind::Queen),
            "K"|"k" => Ok(Kind::King),
            _       => Err(ParseKindError),
        }
    }
}

impl From<Kind> for usize {
    fn from(value: Kind) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Promotion {
    ToKnight,
    ToBishop,
    ToRook,
    ToQueen,
}

impl Promotion {
    /// Every promotion, strongest first
    pub const ALL: [Promotion; 4] = [
        Promotion::ToQueen, Promotion::ToRook, Promotion::ToBishop, Promotion::ToKnight,
    ];
}

impl Default for Promotion {
    fn default() -> Self {
        Promotion::ToQueen
    }
}

impl From<Promotion> for Kind {
    fn from(prom: Promotion) -> Self {
        match prom {
            Promotion::ToKnight => Kind::Knight,
            Promotion::ToBishop => Kind::Bishop,
            Promotion::ToRook => Kind::Rook,
            Promotion::ToQueen => Kind::Queen,
        }
    }
}

impl FromStr for Promotion {
    type Err = ParseKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.parse()? {
            Kind::Knight => Ok(Promotion::ToKnight),
            Kind::Bishop => Ok(Promotion::ToBishop),
            Kind::Rook => Ok(Promotion::ToRook),
            Kind::Queen => Ok(Promotion::ToQueen),
            Kind::Pawn | Kind::King => Err(ParseKindError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The side of the board to castle on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File the rook starts on
    pub fn rook_file(self) -> File {
        match self {
            CastleSide::KingSide => File::H,
            CastleSide::QueenSide => File::A,
        }
    }

    /// File the king lands on
    pub fn king_file(self) -> File {
        match self {
            CastleSide::KingSide => File::G,
            CastleSide::QueenSide => File::C,
        }
    }

    /// File the rook lands on
    pub fn rook_destination_file(self) -> File {
        match self {
            CastleSide::KingSide => File::F,
            CastleSide::QueenSide => File::D,
        }
    }

    /// Direction the king travels along its home rank
    pub fn direction(self) -> i8 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Read-only view of a board, which is all a piece needs to decide where it can move.
///
/// Implemented by [Board](../board/struct.Board.html). Keeping the movement predicates on this
/// trait rather than on the board type means pieces never hold or mutate the board they live on.
pub trait BoardView {
    /// Returns the piece, if any, on `sq`.
    fn piece_at(&self, sq: Square) -> Option<&Piece>;

    /// Returns the squares occupied by pieces of `color`.
    fn squares_of(&self, color: Color) -> &[Square];

    /// Returns the square a pawn may move to by capturing en passant, if any.
    fn en_passant_square(&self) -> Option<Square>;

    /// Returns `true` if `color` still has the right to castle on `side`.
    fn has_castling_right(&self, color: Color, side: CastleSide) -> bool;

    /// Returns `true` if any piece of color `by` attacks `sq`.
    ///
    /// Pawns attack diagonally only; kings attack adjacent squares only.
    fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.squares_of(by).iter().any(|&from| {
            self.piece_at(from).map_or(false, |piece| piece.attacks(self, sq))
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece on the board.
///
/// Besides its kind and color, a piece remembers where it stands, whether it has ever moved,
/// whether it was promoted from a pawn, and the legal destinations most recently computed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: Kind,
    color: Color,
    square: Square,
    has_moved: bool,
    promoted: bool,
    legal_moves: Vec<Square>,
}

impl Piece {
    /// Creates a piece that has not moved.
    pub fn new(kind: Kind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
            promoted: false,
            legal_moves: Vec::new(),
        }
    }

    /// Creates a piece from its FEN letter (uppercase is White).
    pub fn from_fen_char(c: char, square: Square) -> std::result::Result<Piece, ParseKindError> {
        let kind: Kind = c.to_string().parse()?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };

        Ok(Piece::new(kind, color, square))
    }

    /// Returns the piece's FEN letter.
    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            Kind::Pawn => 'P',
            Kind::Knight => 'N',
            Kind::Bishop => 'B',
            Kind::Rook => 'R',
            Kind::Queen => 'Q',
            Kind::King => 'K',
        };

        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Returns the kind of piece
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the piece's color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the square the piece stands on
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` if the piece has moved at any point in the game. Never reset.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns `true` if the piece started the game as a pawn and was promoted.
    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    /// Returns the legal destinations last computed for this piece.
    pub fn legal_moves(&self) -> &[Square] {
        &self.legal_moves
    }

    /// Returns `true` if `dest` is among the legal destinations last computed for this piece.
    pub fn is_legal(&self, dest: Square) -> bool {
        self.legal_moves.contains(&dest)
    }

    pub(crate) fn set_legal_moves(&mut self, moves: Vec<Square>) {
        self.legal_moves = moves;
    }

    pub(crate) fn clear_legal_moves(&mut self) {
        self.legal_moves.clear();
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn set_has_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }

    /// Changes a pawn into the promotion piece, keeping its color, square and identity.
    pub fn promote(&mut self, to: Promotion) {
        debug_assert_eq!(self.kind, Kind::Pawn);
        self.kind = to.into();
        self.promoted = true;
    }

    /// Reverts a promotion made by `promote`.
    pub(crate) fn demote(&mut self) {
        self.kind = Kind::Pawn;
        self.promoted = false;
    }

    /// Returns `true` if the piece can move to `dest` by its own movement rules.
    ///
    /// This is pseudo-legal: it does not consider whether the move leaves the mover's king in
    /// check. Castling is the exception, since its rules forbid castling out of, through or into
    /// check.
    pub fn can_move<B: BoardView + ?Sized>(&self, board: &B, dest: Square) -> bool {
        if dest == self.square {
            return false;
        }

        if let Some(occupant) = board.piece_at(dest) {
            if occupant.color == self.color {
                return false;
            }
        }

        match self.kind {
            Kind::Pawn => self.pawn_can_move(board, dest),
            Kind::King => {
                if self.attacks(board, dest) {
                    return true;
                }

                CastleSide::ALL.iter().any(|&side| {
                    dest == Square::from_coord(side.king_file(), self.color.home_rank())
                        && self.can_castle(board, side)
                })
            },
            _ => self.attacks(board, dest),
        }
    }

    /// Returns `true` if a pawn standing here would capture on `dest` if an enemy piece were
    /// there, regardless of what actually occupies `dest`. Always `false` for other pieces.
    pub fn can_capture(&self, dest: Square) -> bool {
        if self.kind != Kind::Pawn {
            return false;
        }

        let forward = self.color.forward();
        self.square.add(-1, forward) == Some(dest) || self.square.add(1, forward) == Some(dest)
    }

    /// Returns `true` if the piece attacks `dest`, whatever occupies it.
    ///
    /// Pawns attack only diagonally forward and kings only adjacent squares, so an attacked square
    /// is not necessarily one the piece can move to, and vice versa.
    pub fn attacks<B: BoardView + ?Sized>(&self, board: &B, dest: Square) -> bool {
        if dest == self.square {
            return false;
        }

        let (dx, dy) = dest.diff(self.square);
        let (ax, ay) = (dx.abs(), dy.abs());

        match self.kind {
            Kind::Pawn => self.can_capture(dest),
            Kind::Knight => (ax == 1 && ay == 2) || (ax == 2 && ay == 1),
            Kind::Bishop => ax == ay && self.path_is_clear(board, dest),
            Kind::Rook => (dx == 0 || dy == 0) && self.path_is_clear(board, dest),
            Kind::Queen => (dx == 0 || dy == 0 || ax == ay) && self.path_is_clear(board, dest),
            Kind::King => ax <= 1 && ay <= 1,
        }
    }

    /// Returns `true` if this king may castle on `side`.
    ///
    /// Neither the king nor the rook may have moved, the right must still be held, every square
    /// between them must be empty, and the king may not be in check or pass through or land on an
    /// attacked square.
    pub fn can_castle<B: BoardView + ?Sized>(&self, board: &B, side: CastleSide) -> bool {
        if self.kind != Kind::King || self.has_moved {
            return false;
        }

        let home = self.color.home_rank();
        if self.square != Square::from_coord(File::E, home)
            || !board.has_castling_right(self.color, side) {
            return false;
        }

        let rook_square = Square::from_coord(side.rook_file(), home);
        match board.piece_at(rook_square) {
            Some(rook) if rook.kind == Kind::Rook
                && rook.color == self.color
                && !rook.has_moved => {},
            _ => return false,
        }

        let mut sq = self.square;
        while let Some(next) = sq.add(side.direction(), 0) {
            if next == rook_square {
                break;
            }
            if board.piece_at(next).is_some() {
                return false;
            }
            sq = next;
        }

        let king_path = [0, 1, 2].iter()
            .filter_map(|&step| self.square.add(side.direction() * step, 0));
        for sq in king_path {
            if board.is_attacked(sq, !self.color) {
                return false;
            }
        }

        true
    }

    fn pawn_can_move<B: BoardView + ?Sized>(&self, board: &B, dest: Square) -> bool {
        let forward = self.color.forward();

        if board.piece_at(dest).is_some() {
            return self.can_capture(dest);
        }

        if board.en_passant_square() == Some(dest) {
            let capture_rank = (!self.color).pawn_rank().offset((!self.color).forward());
            return Some(dest.rank()) == capture_rank && self.can_capture(dest);
        }

        if self.square.add(0, forward) == Some(dest) {
            return true;
        }

        self.square.rank() == self.color.pawn_rank()
            && self.square.add(0, 2 * forward) == Some(dest)
            && self.square.add(0, forward).map_or(false, |sq| board.piece_at(sq).is_none())
    }

    /// Every square strictly between `self.square` and `dest` on a straight line is empty.
    fn path_is_clear<B: BoardView + ?Sized>(&self, board: &B, dest: Square) -> bool {
        let (dx, dy) = dest.diff(self.square);
        let (step_x, step_y) = (dx.signum(), dy.signum());

        let mut sq = self.square;
        loop {
            sq = match sq.add(step_x, step_y) {
                Some(next) => next,
                None => return false,
            };
            if sq == dest {
                return true;
            }
            if board.piece_at(sq).is_some() {
                return false;
            }
        }
    }
}

impl fmt::Display for Piece {
    /// Writes the piece's FEN letter
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fen_char().fmt(f)
    }
}
