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

use core::ops;

use bitflags::bitflags;

use crate::{
    color::Color,
    square::{File, Square},
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// File of the rook that castles on this side.
    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    /// Home square of the king, `e1` or `e8`.
    pub const fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

bitflags! {
    /// The four independent castling availability flags.
    ///
    /// A flag only records that neither the king nor the corresponding rook
    /// has moved. Whether castling is possible right now also depends on the
    /// path being empty and not attacked.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1 << 0;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    /// The flag for a single color and side.
    pub const fn of(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Both flags of a color.
    pub const fn color(color: Color) -> CastlingRights {
        CastlingRights::of(color, CastlingSide::KingSide)
            .union(CastlingRights::of(color, CastlingSide::QueenSide))
    }

    /// The flag that is lost when a piece leaves or is captured on `sq`, if
    /// `sq` is one of the four rook home squares.
    pub const fn of_rook_square(sq: Square) -> CastlingRights {
        match sq {
            Square::H1 => CastlingRights::WHITE_KING_SIDE,
            Square::A1 => CastlingRights::WHITE_QUEEN_SIDE,
            Square::H8 => CastlingRights::BLACK_KING_SIDE,
            Square::A8 => CastlingRights::BLACK_QUEEN_SIDE,
            _ => CastlingRights::empty(),
        }
    }

    /// Exchanges the white and black flags.
    #[must_use]
    pub const fn swap_colors(self) -> CastlingRights {
        CastlingRights::from_bits_truncate(((self.bits() & 0b0011) << 2) | ((self.bits() & 0b1100) >> 2))
    }

    /// Iterates over the set flags as `(color, side)` pairs, in FEN order
    /// (`K`, `Q`, `k`, `q`).
    pub fn sides(self) -> impl Iterator<Item = (Color, CastlingSide)> {
        Color::ALL
            .into_iter()
            .flat_map(|color| CastlingSide::ALL.into_iter().map(move |side| (color, side)))
            .filter(move |&(color, side)| self.contains(CastlingRights::of(color, side)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_squares() {
        assert_eq!(CastlingSide::KingSide.king_to(Color::White), Square::G1);
        assert_eq!(CastlingSide::QueenSide.king_to(Color::Black), Square::C8);
        assert_eq!(CastlingSide::KingSide.rook_to(Color::Black), Square::F8);
        assert_eq!(CastlingSide::QueenSide.rook_from(Color::White), Square::A1);
        assert_eq!(CastlingSide::king_from(Color::Black), Square::E8);
    }

    #[test]
    fn test_swap_colors() {
        let rights = CastlingRights::WHITE_KING_SIDE | CastlingRights::BLACK_QUEEN_SIDE;
        assert_eq!(
            rights.swap_colors(),
            CastlingRights::BLACK_KING_SIDE | CastlingRights::WHITE_QUEEN_SIDE
        );
        assert_eq!(CastlingRights::all().swap_colors(), CastlingRights::all());
    }

    #[test]
    fn test_sides_in_fen_order() {
        let sides: Vec<_> = CastlingRights::all().sides().collect();
        assert_eq!(
            sides,
            [
                (Color::White, CastlingSide::KingSide),
                (Color::White, CastlingSide::QueenSide),
                (Color::Black, CastlingSide::KingSide),
                (Color::Black, CastlingSide::QueenSide),
            ]
        );
    }
}
