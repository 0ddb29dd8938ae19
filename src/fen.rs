// This file is part of the arbiter library.
// Copyright (C) 2026 The arbiter developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! ```
//! use arbiter::{Board, Color, Square};
//!
//! let board: Board = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! assert_eq!(board.turn(), Color::Black);
//! assert_eq!(board.ep_square(), Some(Square::E3));
//!
//! assert_eq!(
//!     board.to_string(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! # Ok::<_, arbiter::ParseFenError>(())
//! ```
//!
//! Parsing does not check whether the position is legal. Use
//! [`Board::validate()`] for that.

use core::{
    fmt::{self, Write as _},
    num::NonZeroU32,
    str::FromStr,
};
use std::error::Error;

use crate::{
    board::Board,
    castling_side::{CastlingRights, CastlingSide},
    color::Color,
    square::{File, Rank, Square},
    types::Piece,
};

/// Error when parsing an invalid FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    /// The FEN does not have exactly six fields.
    InvalidFieldCount,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidFieldCount => "invalid fen: expected 6 fields",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove number in fen",
        })
    }
}

impl Error for ParseFenError {}

fn parse_board_fen(board_fen: &[u8]) -> Option<Board> {
    let mut board = Board::empty();

    let mut ranks = 0;
    for (rank_fen, rank) in board_fen.split(|&ch| ch == b'/').zip(Rank::ALL.into_iter().rev()) {
        ranks += 1;

        let mut file = 0;
        for &ch in rank_fen {
            if (b'1'..=b'8').contains(&ch) {
                file += u32::from(ch - b'0');
            } else {
                let piece = Piece::from_char(char::from(ch))?;
                board.set_piece_at(Square::from_coords(File::new(file)?, rank), piece);
                file += 1;
            }
            if file > 8 {
                return None;
            }
        }
        if file != 8 {
            return None;
        }
    }

    // Zipping stops early on extra ranks, so compare against the separators.
    if ranks != 8 || board_fen.iter().filter(|&&ch| ch == b'/').count() != 7 {
        return None;
    }

    Some(board)
}

fn parse_castling(castling: &[u8]) -> Option<CastlingRights> {
    if castling == b"-" {
        return Some(CastlingRights::empty());
    }
    if castling.is_empty() {
        return None;
    }

    let mut rights = CastlingRights::empty();
    for &ch in castling {
        let flag = match ch {
            b'K' => CastlingRights::WHITE_KING_SIDE,
            b'Q' => CastlingRights::WHITE_QUEEN_SIDE,
            b'k' => CastlingRights::BLACK_KING_SIDE,
            b'q' => CastlingRights::BLACK_QUEEN_SIDE,
            _ => return None,
        };
        if rights.contains(flag) {
            return None;
        }
        rights.insert(flag);
    }
    Some(rights)
}

impl Board {
    /// Parses a complete FEN with all six fields.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] describing the first malformed field.
    pub fn from_ascii(fen: &[u8]) -> Result<Board, ParseFenError> {
        let mut fields = fen
            .split(u8::is_ascii_whitespace)
            .filter(|field| !field.is_empty());

        let (
            Some(board_part),
            Some(turn_part),
            Some(castling_part),
            Some(ep_part),
            Some(halfmoves_part),
            Some(fullmoves_part),
            None,
        ) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        )
        else {
            return Err(ParseFenError::InvalidFieldCount);
        };

        let mut board = parse_board_fen(board_part).ok_or(ParseFenError::InvalidBoard)?;

        board.set_turn(match turn_part {
            b"w" => Color::White,
            b"b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        });

        board.set_castling_rights(
            parse_castling(castling_part).ok_or(ParseFenError::InvalidCastling)?,
        );

        board.set_ep_square(match ep_part {
            b"-" => None,
            _ => Some(Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?),
        });

        board.set_halfmoves(
            btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?,
        );

        board.set_fullmoves(
            btoi::btou(fullmoves_part)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ParseFenError::InvalidFullmoves)?,
        );

        Ok(board)
    }

    /// Parses only the piece placement field, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`. The remaining state
    /// is that of [`Board::empty()`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError::InvalidBoard`] if the placement is malformed.
    pub fn from_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
        parse_board_fen(board_fen).ok_or(ParseFenError::InvalidBoard)
    }

    /// The piece placement field of the FEN.
    ///
    /// ```
    /// use arbiter::Board;
    ///
    /// assert_eq!(Board::default().board_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn board_fen(&self) -> String {
        BoardFen(self).to_string()
    }

    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

struct BoardFen<'a>(&'a Board);

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.0.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > Rank::First {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", BoardFen(self), self.turn().char())?;

        let rights = self.castling_rights();
        if rights.is_empty() {
            f.write_char('-')?;
        } else {
            for (color, side) in rights.sides() {
                let ch = match side {
                    CastlingSide::KingSide => 'k',
                    CastlingSide::QueenSide => 'q',
                };
                f.write_char(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
            }
        }

        match self.ep_square() {
            Some(ep) => write!(f, " {ep}")?,
            None => f.write_str(" -")?,
        }

        write!(f, " {} {}", self.halfmoves(), self.fullmoves())
    }
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Board, ParseFenError> {
        Board::from_ascii(fen.as_bytes())
    }
}

#[cfg(feature = "serde")]
serde_via_str!(Board, "fen");
