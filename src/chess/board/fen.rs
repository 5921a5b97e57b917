//! Loading and storing boards in Forsyth–Edwards Notation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use super::*;
use crate::chess::error::ParseFenError;

impl Board {
    /// Parse a board from a FEN string.
    ///
    /// The halfmove clock and fullmove number may be left off, in which case they default to `0`
    /// and `1`. The parsed position is recorded as the first entry in the board's history.
    pub fn from_fen_str(s: &str) -> Result<Board, ParseFenError> {
        use ParseFenError::*;
        use Color::*;

        let mut board = Board::empty();
        let mut fields = s.trim().split_whitespace();

        // parse the board
        if let Some(placement) = fields.next() {
            let mut r = Rank::COUNT - 1;
            let mut f = 0;
            let mut after_digit = false;
            for c in placement.chars() {
                match c {
                    '1' ..= '8' => {
                        // runs of empty squares are written as a single digit
                        if after_digit {
                            return Err(ParseBoard);
                        }
                        f += c.to_digit(10).expect("INFALLIBLE") as usize;
                        if f > File::COUNT {
                            return Err(ParseBoard);
                        }
                    }
                    '/' => {
                        if f == File::COUNT && r > 0 {
                            r -= 1;
                            f = 0;
                        } else {
                            return Err(ParseBoard);
                        }
                    }
                    _ => {
                        let sq = match (File::try_from(f), Rank::try_from(r)) {
                            (Ok(f), Ok(r)) => Square::from_coord(f, r),
                            _ => return Err(ParseBoard),
                        };
                        board.put(Piece::from_fen_char(c, sq)?);

                        f += 1;
                    }
                }
                after_digit = c.is_ascii_digit();
            }
            if r > 0 || f < File::COUNT {
                return Err(ParseBoard);
            }
        } else {
            return Err(Empty);
        }

        // parse the turn
        match fields.next() {
            Some(turn) => board.turn = turn.parse()?,
            None => return Err(ParseTurn),
        }

        // parse the castling flags
        match fields.next() {
            Some("-") => {},
            Some(castling_flags) => {
                for c in castling_flags.chars() {
                    let (color, flag) = match c {
                        'K' => (White, CASTLE_KING_SIDE),
                        'Q' => (White, CASTLE_QUEEN_SIDE),
                        'k' => (Black, CASTLE_KING_SIDE),
                        'q' => (Black, CASTLE_QUEEN_SIDE),
                        _ => return Err(ParseCastling),
                    };
                    if board.castling_rights[color as usize] & flag != 0 {
                        return Err(ParseCastling);
                    }
                    board.castling_rights[color as usize] |= flag;
                }
            },
            None => return Err(ParseCastling),
        }

        // parse en passant square
        match fields.next() {
            Some("-") => {},
            Some(ep_square) => board.ep_square = Some(ep_square.parse()?),
            None => return Err(ParseEnPassant),
        }

        // parse half move clock, if present
        if let Some(plies) = fields.next() {
            match plies.parse::<u32>() {
                Ok(plies) => board.halfmove_clock = plies,
                Err(_) => return Err(ParseHalfMoveClock),
            }
        }

        // parse move number, if present
        if let Some(move_num) = fields.next() {
            match move_num.parse::<u32>() {
                Ok(move_num) if move_num >= 1 => board.fullmove_number = move_num,
                _ => return Err(ParseMoveNumber),
            }
        }

        if fields.next().is_some() {
            return Err(ExtraFields);
        }

        board.validate()?;
        board.init_has_moved();
        board.record_position();

        Ok(board)
    }

    fn validate(&self) -> Result<(), ParseFenError> {
        use ParseFenError::*;

        for &color in &[Color::White, Color::Black] {
            // Step 1: verify exactly one king per side
            let kings = self.pieces(color).iter()
                .filter(|&&sq| self.piece_at(sq).map(Piece::kind) == Some(Kind::King))
                .count();
            if kings != 1 {
                return Err(KingCount);
            }
            // Step 2: no pawns on ranks 1 and 8
            let misplaced_pawn = self.pieces(color).iter().any(|&sq| {
                self.piece_at(sq).map(Piece::kind) == Some(Kind::Pawn)
                    && (sq.rank() == Rank::R1 || sq.rank() == Rank::R8)
            });
            if misplaced_pawn {
                return Err(InvalidPawnRank);
            }
        }
        // Step 3: opponent's king is not attacked
        if self.in_check(!self.turn) {
            return Err(KingCapturable);
        }
        // Step 4: if there is an EP square, it must be empty, on the capture rank, and have a pawn
        // to capture in front of it
        if let Some(ep_square) = self.ep_square {
            let them = !self.turn;
            let capture_rank = them.pawn_rank().offset(them.forward());
            if Some(ep_square.rank()) != capture_rank || self.piece_at(ep_square).is_some() {
                return Err(EnPassantPawn);
            }
            let pawn = ep_square.add(0, them.forward())
                .and_then(|sq| self.piece_at(sq));
            match pawn {
                Some(p) if p.kind() == Kind::Pawn && p.color() == them => {},
                _ => return Err(EnPassantPawn),
            }
            let origin = ep_square.subtract(0, them.forward())
                .and_then(|sq| self.piece_at(sq));
            if origin.is_some() {
                return Err(EnPassantPawn);
            }
        }
        // Step 5: if castling rights exist, king and rook must be in the correct squares
        for &color in &[Color::White, Color::Black] {
            let home = color.home_rank();
            for &side in &CastleSide::ALL {
                if !self.has_castling_right(color, side) {
                    continue;
                }
                let king = self.piece_at(Square::from_coord(File::E, home));
                let rook = self.piece_at(Square::from_coord(side.rook_file(), home));
                let in_place = |p: Option<&Piece>, kind: Kind| {
                    p.map_or(false, |p| p.kind() == kind && p.color() == color)
                };
                if !in_place(king, Kind::King) || !in_place(rook, Kind::Rook) {
                    return Err(InvalidCastling);
                }
            }
        }

        Ok(())
    }

    /// A FEN doesn't say which pieces have moved, so work it out from the castling rights and
    /// pawn ranks.
    fn init_has_moved(&mut self) {
        for &color in &[Color::White, Color::Black] {
            let rights = self.castling_rights[color as usize];
            let home = color.home_rank();
            let squares = self.pieces(color).to_vec();

            for sq in squares {
                let unmoved = match self.piece_at(sq).map(Piece::kind) {
                    Some(Kind::King) => rights != 0,
                    Some(Kind::Rook) => CastleSide::ALL.iter().any(|&side| {
                        sq == Square::from_coord(side.rook_file(), home)
                            && self.has_castling_right(color, side)
                    }),
                    Some(Kind::Pawn) => sq.rank() == color.pawn_rank(),
                    _ => false,
                };
                if let Some(piece) = self.piece_at_mut(sq) {
                    piece.set_has_moved(!unmoved);
                }
            }
        }
    }

    /// Converts the board to a FEN string
    pub fn to_fen_str(&self) -> String {
        format!("{} {} {} {} {} {}",
            self.placement_str(),
            self.turn,
            self.castling_str(),
            self.ep_square.map_or("-".to_string(), |sq| sq.to_string()),
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// Returns the piece placement field of the FEN
    pub(crate) fn placement_str(&self) -> String {
        let mut placement = String::new();

        for &rank in Rank::ALL.iter().rev() {
            let mut count = 0;
            for &file in File::ALL.iter() {
                if let Some(piece) = self.piece_at(Square::from_coord(file, rank)) {
                    if count > 0 {
                        placement += &count.to_string();
                        count = 0;
                    }
                    placement.push(piece.fen_char());
                } else {
                    count += 1;
                }
            }
            if count > 0 {
                placement += &count.to_string();
            }
            if rank != Rank::R1 {
                placement.push('/');
            }
        }

        placement
    }

    /// Returns the castling field of the FEN
    pub(crate) fn castling_str(&self) -> String {
        let mut castling = String::new();

        for &(color, side, c) in &[
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ] {
            if self.has_castling_right(color, side) {
                castling.push(c);
            }
        }

        if castling.is_empty() {
            castling.push('-');
        }

        castling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParseFenError::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn fen_round_trips() {
        for fen in &[
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/8/8/8/8/8/8/4K2R b K - 37 80",
        ] {
            assert_eq!(Board::from_fen_str(fen).unwrap().to_fen_str(), *fen);
        }
    }

    #[test]
    fn counters_are_optional() {
        let board = Board::from_fen_str("4k3/8/8/8/8/8/8/4K3 b -  -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.to_fen_str(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn empty_string_returns_error() {
        assert_eq!(Board::from_fen_str(""), Err(Empty));
        assert_eq!(Board::from_fen_str(" \t\r\n"), Err(Empty));
    }

    #[test]
    fn malformed_placement_returns_error() {
        assert_eq!(Board::from_fen_str("0K1k5/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/9/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k6/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/b8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k4/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/6B w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/7x w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/44/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/11111111 w - - 0 1"), Err(ParseBoard));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/1B33 w - - 0 1"), Err(ParseBoard));
        assert!(Board::from_fen_str("K1k5/8/8/8/8/8/8/1B3B2 w - - 0 1").is_ok());
    }

    #[test]
    fn bad_fields_return_errors() {
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8"), Err(ParseTurn));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 x - - 0 1"), Err(ParseTurn));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w"), Err(ParseCastling));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w X - 0 1"), Err(ParseCastling));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w -"), Err(ParseEnPassant));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - e9 0 1"), Err(ParseEnPassant));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - x 1"), Err(ParseHalfMoveClock));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - -1 1"), Err(ParseHalfMoveClock));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 x"), Err(ParseMoveNumber));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 0"), Err(ParseMoveNumber));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 1 x"), Err(ExtraFields));
    }

    #[test]
    fn duplicate_castling_flags_return_error() {
        assert_eq!(Board::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w KKq - 0 1"), Err(ParseCastling));
    }

    #[test]
    fn wrong_king_count_returns_error() {
        assert_eq!(Board::from_fen_str("8/8/8/8/8/8/8/K7 w - - 0 1"), Err(KingCount));
        assert_eq!(Board::from_fen_str("KK1k4/8/8/8/8/8/8/8 w - - 0 1"), Err(KingCount));
    }

    #[test]
    fn pawns_on_back_ranks_return_error() {
        assert_eq!(Board::from_fen_str("K1k4P/8/8/8/8/8/8/8 w - - 0 1"), Err(InvalidPawnRank));
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/p7 w - - 0 1"), Err(InvalidPawnRank));
    }

    #[test]
    fn capturable_king_returns_error() {
        assert_eq!(Board::from_fen_str("K1k5/8/8/8/8/8/8/2R5 w - - 0 1"), Err(KingCapturable));
        Board::from_fen_str("K1k5/8/8/8/8/8/8/2R5 b - - 0 1").expect("valid fen");
    }

    #[test]
    fn bad_en_passant_square_returns_error() {
        let ok = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        Board::from_fen_str(ok).expect("valid fen");
        // no pawn
        assert_eq!(Board::from_fen_str("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"), Err(EnPassantPawn));
        // wrong rank for the side to move
        assert_eq!(Board::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1"), Err(EnPassantPawn));
        assert_eq!(Board::from_fen_str("4k3/8/8/8/3pP3/8/8/4K3 w - e3 0 1"), Err(EnPassantPawn));
        // occupied
        assert_eq!(Board::from_fen_str("4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1"), Err(EnPassantPawn));
        Board::from_fen_str("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("valid fen");
    }

    #[test]
    fn castling_without_pieces_in_place_returns_error() {
        assert_eq!(Board::from_fen_str("r3k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1"), Err(InvalidCastling));
        assert_eq!(Board::from_fen_str("r3k2r/8/8/8/8/8/8/R3K1R1 w KQkq - 0 1"), Err(InvalidCastling));
        assert_eq!(Board::from_fen_str("1r2k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), Err(InvalidCastling));
        Board::from_fen_str("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1").expect("valid fen");
    }

    #[test]
    fn has_moved_is_inferred_from_rights_and_ranks() {
        let board = Board::from_fen_str("r3k2r/8/8/8/4P3/8/P7/R3K2R w Qk - 0 1").unwrap();
        let moved = |s: &str| board.piece_at(sq(s)).unwrap().has_moved();
        assert!(!moved("e1"));
        assert!(!moved("a1"));
        assert!(moved("h1"));
        assert!(!moved("e8"));
        assert!(!moved("h8"));
        assert!(moved("a8"));
        assert!(!moved("a2"));
        assert!(moved("e4"));

        let board = Board::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(board.piece_at(sq("e1")).unwrap().has_moved());
        assert!(board.piece_at(sq("a8")).unwrap().has_moved());
    }
}
