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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! # Examples
//!
//! Parsing UCIs:
//!
//! ```
//! use arbiter::{uci::Uci, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//!
//! assert_eq!(uci, Uci {
//!     from: Square::G1,
//!     to: Square::F3,
//!     promotion: None,
//! });
//! # Ok::<_, arbiter::uci::ParseUciError>(())
//! ```
//!
//! Playing it in the context of a position:
//!
//! ```
//! use arbiter::{legal, uci::Uci, Board, Color, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//! let after = legal::play_uci(&Board::default(), &uci)?;
//! assert_eq!(after.piece_at(Square::F3), Some(Color::White.knight()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting from [`Move`] to [`Uci`]:
//!
//! ```
//! use arbiter::{uci::Uci, CastlingSide, Color, Move};
//!
//! let m = Move::Castle { color: Color::White, side: CastlingSide::KingSide };
//! assert_eq!(Uci::from(m).to_string(), "e1g1");
//! ```

use core::{
    fmt::{self, Write as _},
    str::FromStr,
};
use std::error::Error;

use crate::{
    castling_side::CastlingSide,
    color::Color,
    m::Move,
    role::Role,
    square::{File, Square},
};

/// Error when parsing an invalid UCI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// A move as represented in the UCI protocol: origin, target and an
/// optional promotion role.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses a move in UCI notation, like `e2e4` or `a7a8q`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if the notation is malformed. The
    /// promotion letter must be one of `n`, `b`, `r` or `q`.
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, ParseUciError> {
        let (squares, promotion) = match uci {
            [squares @ .., b'n'] if squares.len() == 4 => (squares, Some(Role::Knight)),
            [squares @ .., b'b'] if squares.len() == 4 => (squares, Some(Role::Bishop)),
            [squares @ .., b'r'] if squares.len() == 4 => (squares, Some(Role::Rook)),
            [squares @ .., b'q'] if squares.len() == 4 => (squares, Some(Role::Queen)),
            _ if uci.len() == 4 => (uci, None),
            _ => return Err(ParseUciError),
        };

        Ok(Uci {
            from: Square::from_ascii(&squares[0..2]).map_err(|_| ParseUciError)?,
            to: Square::from_ascii(&squares[2..4]).map_err(|_| ParseUciError)?,
            promotion,
        })
    }

    /// Converts to a [`Move`] without looking at a position. `e1g1`, `e1c1`,
    /// `e8g8` and `e8c8` become [`Move::Castle`].
    pub fn to_move(&self) -> Move {
        if let Some(role) = self.promotion {
            return Move::Promotion {
                from: self.from,
                to: self.to,
                role,
            };
        }

        for color in Color::ALL {
            if self.from == CastlingSide::king_from(color) && self.to.rank() == color.backrank() {
                match self.to.file() {
                    File::G => {
                        return Move::Castle {
                            color,
                            side: CastlingSide::KingSide,
                        }
                    }
                    File::C => {
                        return Move::Castle {
                            color,
                            side: CastlingSide::QueenSide,
                        }
                    }
                    _ => (),
                }
            }
        }

        Move::Normal {
            from: self.from,
            to: self.to,
        }
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "e7e8q".parse::<Uci>(),
            Ok(Uci {
                from: Square::E7,
                to: Square::E8,
                promotion: Some(Role::Queen),
            })
        );
        for invalid in ["", "e2", "e2e", "e2e4 ", "e7e8k", "e7e8Q", "e7e8qq", "i2e4", "e2e9", "é2e4"] {
            assert_eq!(invalid.parse::<Uci>(), Err(ParseUciError), "{invalid}");
        }
    }

    #[test]
    fn test_to_move() {
        let normal: Uci = "e1f1".parse().expect("valid uci");
        assert_eq!(
            normal.to_move(),
            Move::Normal {
                from: Square::E1,
                to: Square::F1
            }
        );

        let castle: Uci = "e8c8".parse().expect("valid uci");
        assert_eq!(
            castle.to_move(),
            Move::Castle {
                color: Color::Black,
                side: CastlingSide::QueenSide
            }
        );

        let not_castle: Uci = "e1g3".parse().expect("valid uci");
        assert!(!not_castle.to_move().is_castle());
    }

    #[test]
    fn test_display_round_trip() {
        for uci in ["e2e4", "a7a8n", "h2h1b", "e1c1", "g8f6"] {
            assert_eq!(uci.parse::<Uci>().expect("valid uci").to_string(), uci);
            assert_eq!(Move::from_uci(uci).expect("valid uci").to_string(), uci);
        }
    }
}
