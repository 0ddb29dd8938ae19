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

use core::{
    fmt::{self, Write as _},
    str::FromStr,
};

use arrayvec::ArrayVec;

use crate::{
    castling_side::CastlingSide,
    color::Color,
    role::Role,
    square::Square,
    uci::{ParseUciError, Uci},
};

/// A move, independent of any position.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using the UCI notation,
/// e.g. `e2e4`, `e7e8q` or `e1g1`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// Any move that is not a promotion or castling, including en passant.
    Normal { from: Square, to: Square },
    /// A pawn move to the last rank.
    Promotion { from: Square, to: Square, role: Role },
    /// King and rook moving together.
    Castle { color: Color, side: CastlingSide },
}

impl Move {
    /// Gets the origin square. For castling moves this is the king's home
    /// square.
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. } | Move::Promotion { from, .. } => from,
            Move::Castle { color, .. } => CastlingSide::king_from(color),
        }
    }

    /// Gets the target square. For castling moves this is the square the
    /// king moves to.
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Promotion { to, .. } => to,
            Move::Castle { color, side } => side.king_to(color),
        }
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Promotion { role, .. } => Some(role),
            _ => None,
        }
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { side, .. } => Some(side),
            _ => None,
        }
    }

    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Parses a move in UCI notation. See [`Uci::to_move()`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if the notation is malformed.
    pub fn from_uci(uci: &str) -> Result<Move, ParseUciError> {
        Ok(uci.parse::<Uci>()?.to_move())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(role) = self.promotion() {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Move, ParseUciError> {
        Move::from_uci(uci)
    }
}

#[cfg(feature = "serde")]
serde_via_str!(Move, "uci move");

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space to hold the legal
/// moves of any chess position.
pub type MoveList = ArrayVec<Move, 256>;
