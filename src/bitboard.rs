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

//! Sets of squares.
//!
//! Results of [`attackers_of`](crate::attacks::attackers_of) and
//! [`legal_destinations`](crate::legal::legal_destinations) are returned as
//! [`Bitboard`]s.

use core::{
    fmt::{self, Write as _},
    iter::FusedIterator,
    ops,
};

use crate::square::{Rank, Square};

/// A set of squares, represented by a 64-bit integer mask.
///
/// # Examples
///
/// ```
/// use arbiter::{Bitboard, Square};
///
/// let mask = Bitboard::from(Square::A1) | Bitboard::from(Square::E4);
/// assert!(mask.contains(Square::E4));
/// assert_eq!(mask.count(), 2);
/// assert_eq!(mask.into_iter().collect::<Vec<_>>(), [Square::A1, Square::E4]);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(!0);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1 << sq.index())
    }

    #[inline]
    pub const fn from_rank(rank: Rank) -> Bitboard {
        Bitboard(0xff << (8 * rank.index()))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        self.0 |= 1 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1 << sq.index());
    }

    #[must_use]
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | 1 << sq.index())
    }

    #[must_use]
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// The lowest square in the set.
    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::try_from(self.0.trailing_zeros()).ok()
        }
    }

    /// The only square in the set, or `None` if it is empty or contains more
    /// than one square.
    #[inline]
    pub fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }

    /// Mirrors the set vertically, swapping ranks 1 and 8 etc.
    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Bitboard {
        Bitboard(self.0.swap_bytes())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for sq in Square::all().filter(|sq| sq.rank() == rank) {
                f.write_char(if self.contains(sq) { '1' } else { '.' })?;
                f.write_char(if sq.file().index() < 7 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T>(iter: T) -> Bitboard
    where
        T: IntoIterator<Item = Square>,
    {
        let mut result = Bitboard::EMPTY;
        for sq in iter {
            result.add(sq);
        }
        result
    }
}

impl Extend<Square> for Bitboard {
    fn extend<T: IntoIterator<Item = Square>>(&mut self, iter: T) {
        for sq in iter {
            self.add(sq);
        }
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> IntoIter {
        IntoIter(self)
    }
}

/// Iterator over the squares of a [`Bitboard`], from a1 to h8.
#[derive(Debug, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let square = self.0.first();
        self.0 .0 &= self.0 .0.wrapping_sub(1);
        square
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count();
        (len, Some(len))
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first() {
        assert_eq!(Bitboard::from(Square::A1).first(), Some(Square::A1));
        assert_eq!(Bitboard::from(Square::D2).first(), Some(Square::D2));
        assert_eq!(Bitboard::EMPTY.first(), None);
    }

    #[test]
    fn test_single_square() {
        assert_eq!(Bitboard::from(Square::H8).single_square(), Some(Square::H8));
        assert_eq!(
            Bitboard::from(Square::A1).with(Square::B1).single_square(),
            None
        );
    }

    #[test]
    fn test_rank() {
        assert_eq!(Bitboard::from_rank(Rank::Fourth), Bitboard(0xff00_0000));
    }

    #[test]
    fn test_iter_is_ordered() {
        let squares: Bitboard = [Square::H8, Square::C3, Square::A1].into_iter().collect();
        assert_eq!(
            squares.into_iter().collect::<Vec<_>>(),
            [Square::A1, Square::C3, Square::H8]
        );
    }

    #[test]
    fn test_flip_vertical() {
        assert_eq!(
            Bitboard::from(Square::E2).flip_vertical(),
            Bitboard::from(Square::E7)
        );
    }
}
