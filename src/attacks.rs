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

//! Attacks and rays.
//!
//! # Examples
//!
//! ```
//! use arbiter::{attacks, Bitboard, Rank, Square};
//!
//! let occupied = Bitboard::from_rank(Rank::Sixth); // blocking pieces
//! let attacks = attacks::bishop_attacks(Square::C2, occupied);
//! // . . . . . . . .
//! // . . . . . . . .
//! // 0 0 0 0 0 0 1 0
//! // . . . . . 1 . .
//! // 1 . . . 1 . . .
//! // . 1 . 1 . . . .
//! // . . . . . . . .
//! // . 1 . 1 . . . .
//!
//! assert!(attacks.contains(Square::G6));
//! assert!(!attacks.contains(Square::H7));
//! ```

use crate::{
    bitboard::Bitboard,
    board::Board,
    color::Color,
    role::Role,
    square::Square,
    types::Piece,
};

/// `(files, ranks)` steps of a knight.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// `(files, ranks)` steps of a king.
pub const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

fn step_attacks(sq: Square, offsets: &[(i32, i32)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(files, ranks)| sq.offset(files, ranks))
        .collect()
}

fn sliding_attacks(sq: Square, occupied: Bitboard, directions: &[(i32, i32)]) -> Bitboard {
    let mut attack = Bitboard::EMPTY;

    for &(files, ranks) in directions {
        let mut previous = sq;

        while let Some(s) = previous.offset(files, ranks) {
            attack.add(s);

            if occupied.contains(s) {
                break;
            }

            previous = s;
        }
    }

    attack
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    step_attacks(sq, &KNIGHT_OFFSETS)
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    step_attacks(sq, &KING_OFFSETS)
}

/// Squares a pawn of `color` on `sq` attacks (the two forward diagonals).
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    let dir = color.pawn_direction();
    step_attacks(sq, &[(-1, dir), (1, dir)])
}

/// Looks up attacks for a rook on `sq` with `occupied` squares. The first
/// occupied square on each ray is included.
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(sq, occupied, &ROOK_DIRECTIONS)
}

pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(sq, occupied, &BISHOP_DIRECTIONS)
}

pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Attacks for `piece` on `sq` with `occupied` squares.
pub fn attacks(sq: Square, piece: Piece, occupied: Bitboard) -> Bitboard {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, sq),
        Role::Knight => knight_attacks(sq),
        Role::Bishop => bishop_attacks(sq, occupied),
        Role::Rook => rook_attacks(sq, occupied),
        Role::Queen => queen_attacks(sq, occupied),
        Role::King => king_attacks(sq),
    }
}

/// Unit step from `a` towards `b`, if they share a file, rank or diagonal.
pub fn direction(a: Square, b: Square) -> Option<(i32, i32)> {
    let (files, ranks) = a.delta(b);
    if (files, ranks) == (0, 0) {
        None
    } else if files == 0 || ranks == 0 || files.abs() == ranks.abs() {
        Some((files.signum(), ranks.signum()))
    } else {
        None
    }
}

/// Squares strictly between `a` and `b`, or the empty set if they are not
/// on a common file, rank or diagonal.
///
/// ```
/// use arbiter::{attacks, Square};
///
/// let between = attacks::between(Square::E1, Square::H1);
/// assert_eq!(between.into_iter().collect::<Vec<_>>(), [Square::F1, Square::G1]);
///
/// assert!(attacks::between(Square::E1, Square::F3).is_empty());
/// ```
pub fn between(a: Square, b: Square) -> Bitboard {
    let Some((files, ranks)) = direction(a, b) else {
        return Bitboard::EMPTY;
    };

    let mut result = Bitboard::EMPTY;
    let mut sq = a;
    while let Some(next) = sq.offset(files, ranks) {
        if next == b {
            break;
        }
        result.add(next);
        sq = next;
    }
    result
}

/// Pieces of color `attacker` that attack `sq`.
///
/// Sliders see through nothing: each ray stops at the first occupied square.
/// Whether `sq` itself is occupied does not matter.
pub fn attackers_of(board: &Board, sq: Square, attacker: Color) -> Bitboard {
    let occupied = board.occupied();

    let of_role = |role: Role| board.by_piece(role.of(attacker));

    let rooks_and_queens = of_role(Role::Rook) | of_role(Role::Queen);
    let bishops_and_queens = of_role(Role::Bishop) | of_role(Role::Queen);

    (rook_attacks(sq, occupied) & rooks_and_queens)
        | (bishop_attacks(sq, occupied) & bishops_and_queens)
        | (knight_attacks(sq) & of_role(Role::Knight))
        | (king_attacks(sq) & of_role(Role::King))
        | (pawn_attacks(!attacker, sq) & of_role(Role::Pawn))
}

/// Attackers of `sq`: pieces of the opposite color of the piece on `sq`,
/// or, if `sq` is empty, pieces of the side not to move.
pub fn attackers(board: &Board, sq: Square) -> Bitboard {
    let defender = board.color_at(sq).unwrap_or(board.turn());
    attackers_of(board, sq, !defender)
}

#[inline]
pub fn is_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    attackers_of(board, sq, attacker).any()
}

/// Pieces giving check to the side to move. Empty if the side to move has
/// no king.
pub fn checkers(board: &Board) -> Bitboard {
    board
        .king_of(board.turn())
        .map_or(Bitboard::EMPTY, |king| {
            attackers_of(board, king, !board.turn())
        })
}
