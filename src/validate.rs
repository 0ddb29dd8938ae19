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

//! Checks whether a position could plausibly arise in a game.
//!
//! This is a necessary condition, not a sufficient one: a position that
//! passes may still be unreachable from the starting position.

use core::fmt;
use std::error::Error;

use bitflags::bitflags;
use tracing::debug;

use crate::{
    attacks,
    board::Board,
    castling_side::{CastlingRights, CastlingSide},
    color::{ByColor, Color},
    role::Role,
    square::Rank,
};

bitflags! {
    /// Reasons for a [`PositionError`]. More than one reason can apply to
    /// a single position.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u16 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;
        /// There are pawns on the first or eighth rank.
        const PAWNS_ON_BACKRANK = 1 << 2;
        /// A side has more than 8 pawns.
        const TOO_MANY_PAWNS = 1 << 3;
        /// A side has more than 16 pieces, or more promoted pieces than
        /// missing pawns.
        const TOO_MANY_PIECES = 1 << 4;
        /// A castling flag is set although the king or rook is not on its
        /// home square.
        const BAD_CASTLING_RIGHTS = 1 << 5;
        /// The en passant square is not consistent with a pawn double step
        /// on the previous move.
        const INVALID_EP_SQUARE = 1 << 6;
        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 7;
        /// The side to move is in a check that no single move could have
        /// given.
        const IMPOSSIBLE_CHECK = 1 << 8;
    }
}

/// Error when a position is not plausible.
///
/// ```
/// use arbiter::{Board, PositionErrorKinds};
///
/// let board: Board = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse()?;
/// let err = board.validate().unwrap_err();
/// assert_eq!(err.kinds(), PositionErrorKinds::MISSING_KING);
/// # Ok::<_, arbiter::ParseFenError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    kinds: PositionErrorKinds,
}

impl PositionError {
    pub(crate) const fn from_kinds(kinds: PositionErrorKinds) -> PositionError {
        PositionError { kinds }
    }

    pub const fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reasons = Vec::new();
        for (kind, reason) in [
            (PositionErrorKinds::MISSING_KING, "missing king"),
            (PositionErrorKinds::TOO_MANY_KINGS, "too many kings"),
            (PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
            (PositionErrorKinds::TOO_MANY_PAWNS, "too many pawns"),
            (PositionErrorKinds::TOO_MANY_PIECES, "too many pieces"),
            (PositionErrorKinds::BAD_CASTLING_RIGHTS, "bad castling rights"),
            (PositionErrorKinds::INVALID_EP_SQUARE, "invalid ep square"),
            (PositionErrorKinds::OPPOSITE_CHECK, "opposite check"),
            (PositionErrorKinds::IMPOSSIBLE_CHECK, "impossible check"),
        ] {
            if self.kinds.contains(kind) {
                reasons.push(reason);
            }
        }
        write!(f, "illegal position: {}", reasons.join(", "))
    }
}

impl Error for PositionError {}

#[derive(Default, Debug)]
struct Material {
    pawns: u32,
    knights: u32,
    light_bishops: u32,
    dark_bishops: u32,
    rooks: u32,
    queens: u32,
    kings: u32,
}

impl Material {
    fn count(&self) -> u32 {
        self.pawns
            + self.knights
            + self.light_bishops
            + self.dark_bishops
            + self.rooks
            + self.queens
            + self.kings
    }

    /// Lower bound for the number of pieces that must have been promoted.
    fn promoted(&self) -> u32 {
        self.queens.saturating_sub(1)
            + self.rooks.saturating_sub(2)
            + self.knights.saturating_sub(2)
            + self.light_bishops.saturating_sub(1)
            + self.dark_bishops.saturating_sub(1)
    }
}

fn material(board: &Board) -> ByColor<Material> {
    let mut material = ByColor::<Material>::default();
    for (sq, piece) in board.pieces() {
        let side = &mut material[piece.color];
        match piece.role {
            Role::Pawn => side.pawns += 1,
            Role::Knight => side.knights += 1,
            Role::Bishop if sq.is_light() => side.light_bishops += 1,
            Role::Bishop => side.dark_bishops += 1,
            Role::Rook => side.rooks += 1,
            Role::Queen => side.queens += 1,
            Role::King => side.kings += 1,
        }
    }
    material
}

fn validate_material(material: &ByColor<Material>) -> PositionErrorKinds {
    let mut errors = PositionErrorKinds::empty();
    for color in Color::ALL {
        let side = &material[color];
        match side.kings {
            0 => errors |= PositionErrorKinds::MISSING_KING,
            1 => (),
            _ => errors |= PositionErrorKinds::TOO_MANY_KINGS,
        }
        if side.pawns > 8 {
            errors |= PositionErrorKinds::TOO_MANY_PAWNS;
        }
        if side.count() > 16 || side.promoted() > 8u32.saturating_sub(side.pawns) {
            errors |= PositionErrorKinds::TOO_MANY_PIECES;
        }
    }
    errors
}

fn validate_checks(board: &Board) -> PositionErrorKinds {
    let mut errors = PositionErrorKinds::empty();

    if let Some(their_king) = board.king_of(!board.turn()) {
        if attacks::is_attacked(board, their_king, board.turn()) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }
    }

    let checkers = attacks::checkers(board);
    let non_sliders = checkers
        .into_iter()
        .filter(|&sq| board.role_at(sq).is_some_and(|role| !role.is_slider()))
        .count();
    if checkers.count() > 2 || (checkers.count() == 2 && non_sliders == 2) {
        errors |= PositionErrorKinds::IMPOSSIBLE_CHECK;
    }

    errors
}

fn validate_ep_square(board: &Board) -> PositionErrorKinds {
    let Some(ep_square) = board.ep_square() else {
        return PositionErrorKinds::empty();
    };

    let turn = board.turn();
    let dir = turn.pawn_direction();
    let valid = ep_square.rank() == Rank::Sixth.relative_to(turn)
        && board.piece_at(ep_square).is_none()
        && ep_square
            .offset(0, -dir)
            .is_some_and(|pushed_to| board.piece_at(pushed_to) == Some((!turn).pawn()))
        && ep_square
            .offset(0, dir)
            .is_some_and(|pushed_from| board.piece_at(pushed_from).is_none());

    if valid {
        PositionErrorKinds::empty()
    } else {
        PositionErrorKinds::INVALID_EP_SQUARE
    }
}

fn validate_castling_rights(board: &Board) -> PositionErrorKinds {
    if consistent_castling_rights(board) == board.castling_rights() {
        PositionErrorKinds::empty()
    } else {
        PositionErrorKinds::BAD_CASTLING_RIGHTS
    }
}

impl Board {
    /// Checks that the position could plausibly arise in a game, reporting
    /// every problem found.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] listing all violated rules.
    pub fn validate(&self) -> Result<(), PositionError> {
        let material = material(self);
        let mut errors = validate_material(&material);

        if self
            .pieces()
            .any(|(sq, piece)| {
                piece.role == Role::Pawn
                    && (sq.rank() == Rank::First || sq.rank() == Rank::Eighth)
            })
        {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        // Checks are only meaningful with exactly one king on each side.
        if material.white.kings == 1 && material.black.kings == 1 {
            errors |= validate_checks(self);
        }

        errors |= validate_ep_square(self);
        errors |= validate_castling_rights(self);

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(fen = %self, ?errors, "implausible position");
            Err(PositionError { kinds: errors })
        }
    }
}

/// Whether the position could plausibly arise in a game.
pub fn is_legal_position(board: &Board) -> bool {
    board.validate().is_ok()
}

/// The castling rights that are consistent with the placement of kings and
/// rooks.
pub fn consistent_castling_rights(board: &Board) -> CastlingRights {
    let mut rights = board.castling_rights();
    for (color, side) in board.castling_rights().sides() {
        if board.piece_at(CastlingSide::king_from(color)) != Some(color.king())
            || board.piece_at(side.rook_from(color)) != Some(color.rook())
        {
            rights.remove(CastlingRights::of(color, side));
        }
    }
    rights
}
