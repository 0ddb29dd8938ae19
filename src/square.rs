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
use std::error::Error;

use crate::color::Color;

/// A file of the chessboard, `a` to `h`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const B: File = File(1);
    pub const C: File = File(2);
    pub const D: File = File(3);
    pub const E: File = File(4);
    pub const F: File = File(5);
    pub const G: File = File(6);
    pub const H: File = File(7);

    /// Gets a file from its index, `0` being the a-file.
    #[inline]
    pub const fn new(index: u32) -> Option<File> {
        if index < 8 {
            Some(File(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => Some(File(ch as u8 - b'a')),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self.0) as char
    }

    /// All files from `a` to `h`.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.char())
    }
}

/// A rank of the chessboard, `1` to `8`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Rank(u8);

#[allow(non_upper_case_globals)]
impl Rank {
    pub const First: Rank = Rank(0);
    pub const Second: Rank = Rank(1);
    pub const Third: Rank = Rank(2);
    pub const Fourth: Rank = Rank(3);
    pub const Fifth: Rank = Rank(4);
    pub const Sixth: Rank = Rank(5);
    pub const Seventh: Rank = Rank(6);
    pub const Eighth: Rank = Rank(7);

    /// Gets a rank from its index, `0` being the first rank.
    #[inline]
    pub const fn new(index: u32) -> Option<Rank> {
        if index < 8 {
            Some(Rank(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank(ch as u8 - b'1')),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self.0) as char
    }

    /// Interprets the rank from the point of view of `color`, so that
    /// `Rank::Second.relative_to(Color::Black)` is the seventh rank.
    #[inline]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank(7 - self.0),
        }
    }

    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Rank {
        Rank(7 - self.0)
    }

    /// All ranks from `1` to `8`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// Error when converting an out-of-range index to a [`Square`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SquareError;

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("square index out of range")
    }
}

impl Error for SquareError {}

/// A square of the chessboard, indexed from `0` (a1) to `63` (h8).
///
/// The rank is `index / 8`, the file `index % 8`. A `Square` is always on the
/// board; raw indices are checked on conversion.
///
/// # Examples
///
/// ```
/// use arbiter::{File, Rank, Square};
///
/// let sq: Square = "e4".parse()?;
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.file(), File::E);
/// assert_eq!(sq.rank(), Rank::Fourth);
/// assert_eq!(u32::from(sq), 28);
///
/// assert!(Square::try_from(64u32).is_err());
/// # Ok::<_, arbiter::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file.0 | (rank.0 << 3))
    }

    /// Parses a square name like `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file, rank] => Ok(Square::from_coords(
                File::from_char(char::from(file)).ok_or(ParseSquareError)?,
                Rank::from_char(char::from(rank)).ok_or(ParseSquareError)?,
            )),
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        File(self.0 & 7)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank(self.0 >> 3)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps `files` to the right and `ranks` up. Returns `None` if the
    /// resulting square would leave the board, in particular when crossing
    /// the a-file or h-file edge.
    ///
    /// ```
    /// use arbiter::Square;
    ///
    /// assert_eq!(Square::E4.offset(1, 2), Some(Square::F6));
    /// assert_eq!(Square::H4.offset(1, 0), None);
    /// assert_eq!(Square::A1.offset(0, -1), None);
    /// ```
    #[inline]
    pub const fn offset(self, files: i32, ranks: i32) -> Option<Square> {
        let file = self.file().0 as i32 + files;
        let rank = self.rank().0 as i32 + ranks;
        if 0 <= file && file < 8 && 0 <= rank && rank < 8 {
            Some(Square((file | (rank << 3)) as u8))
        } else {
            None
        }
    }

    /// Signed file and rank difference from `self` to `other`.
    #[inline]
    pub const fn delta(self, other: Square) -> (i32, i32) {
        (
            other.file().0 as i32 - self.file().0 as i32,
            other.rank().0 as i32 - self.rank().0 as i32,
        )
    }

    /// King-move distance between two squares.
    pub fn distance(self, other: Square) -> u32 {
        let (files, ranks) = self.delta(other);
        files.unsigned_abs().max(ranks.unsigned_abs())
    }

    /// Light squares are those of the same color as h1.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file().0 + self.rank().0) % 2 == 1
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        !self.is_light()
    }

    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Square {
        Square(self.0 ^ 0x38)
    }

    /// Iterates over all squares from a1 to h8.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr),+ $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    };
}

square_consts! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

macro_rules! int_from_square_impl {
    ($($t:ty)+) => {
        $(impl From<Square> for $t {
            #[inline]
            fn from(sq: Square) -> $t {
                sq.0 as $t
            }
        })+
    }
}

int_from_square_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_square_from_int_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<$t> for Square {
            type Error = SquareError;

            #[inline]
            fn try_from(value: $t) -> Result<Square, SquareError> {
                if (0..64).contains(&value) {
                    Ok(Square(value as u8))
                } else {
                    Err(SquareError)
                }
            }
        })+
    }
}

try_square_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file().char())?;
        f.write_char(self.rank().char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file().char().to_ascii_uppercase())?;
        f.write_char(self.rank().char())
    }
}

#[cfg(feature = "serde")]
serde_via_str!(Square, "square name");
