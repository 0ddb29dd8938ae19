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

//! Board state and raw mutators.
//!
//! The mutators on [`Board`] do not check whose turn it is or whether a move
//! is geometrically possible. Use [`legal::play`](crate::legal::play) to
//! validate moves.

use core::{fmt, num::NonZeroU32};
use std::error::Error;

use crate::{
    attacks,
    bitboard::Bitboard,
    castling_side::{CastlingRights, CastlingSide},
    color::Color,
    role::Role,
    square::{Rank, Square},
    types::Piece,
};

/// Error when applying a raw mutation to a [`Board`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// There is no piece on the origin square.
    EmptySquare,
    /// Only pawns can be promoted.
    NotAPawn,
    /// The promotion piece has a different color than the pawn.
    PromotionColor,
    /// Pawns can only promote to knights, bishops, rooks or queens.
    PromotionRole,
    /// The requested castling right is not available.
    CastlingUnavailable,
    /// There are pieces between the king and the rook.
    CastlingPathBlocked,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoardError::EmptySquare => "no piece on origin square",
            BoardError::NotAPawn => "only pawns can promote",
            BoardError::PromotionColor => "promotion piece has wrong color",
            BoardError::PromotionRole => "invalid promotion role",
            BoardError::CastlingUnavailable => "castling right not available",
            BoardError::CastlingPathBlocked => "pieces between king and rook",
        })
    }
}

impl Error for BoardError {}

/// A chess position: piece placement, side to move, castling rights,
/// en passant target and move counters.
///
/// `Board` is a plain value. It carries no move history, only what is needed
/// to decide the legality of the next move. Two boards are equal if and only
/// if they have the same FEN.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Color, Square};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
/// assert_eq!(board.turn(), Color::White);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    turn: Color,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Board {
    /// A board without pieces, White to move, no castling rights.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
            turn: Color::White,
            castling_rights: CastlingRights::empty(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (sq, role) in Square::all().zip(BACKRANK) {
            board.squares[sq.index()] = Some(role.of(Color::White));
            board.squares[sq.flip_vertical().index()] = Some(role.of(Color::Black));
        }
        for sq in Bitboard::from_rank(Rank::Second) {
            board.squares[sq.index()] = Some(Color::White.pawn());
            board.squares[sq.flip_vertical().index()] = Some(Color::Black.pawn());
        }
        board.castling_rights = CastlingRights::all();
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The square a pawn skipped over on the immediately preceding move.
    #[inline]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub const fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Starts at 1 and is increased after every move of Black.
    #[inline]
    pub const fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub fn set_castling_rights(&mut self, castling_rights: CastlingRights) {
        self.castling_rights = castling_rights;
    }

    pub fn set_ep_square(&mut self, ep_square: Option<Square>) {
        self.ep_square = ep_square;
    }

    pub fn set_halfmoves(&mut self, halfmoves: u32) {
        self.halfmoves = halfmoves;
    }

    pub fn set_fullmoves(&mut self, fullmoves: NonZeroU32) {
        self.fullmoves = fullmoves;
    }

    /// Iterates over all occupied squares, from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Set of occupied squares.
    pub fn occupied(&self) -> Bitboard {
        self.pieces().map(|(sq, _)| sq).collect()
    }

    /// Squares occupied by `piece`.
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.pieces()
            .filter(|&(_, p)| p == piece)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Square of the king of `color`. If there is more than one, the lowest
    /// is returned.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.by_piece(color.king()).first()
    }

    /// Places a piece, returning whatever stood there before.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.index()].replace(piece)
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Relocates the piece on `from` to `to`, returning the captured piece.
    ///
    /// Updates the side to move (to the opponent of the moved piece), the
    /// move counters and the castling rights, clears the en passant target
    /// and sets a new one if a pawn advanced two squares. Does not check
    /// whose turn it is or whether the move is geometrically possible.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptySquare`] if there is no piece on `from`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Piece>, BoardError> {
        let piece = self.remove_piece_at(from).ok_or(BoardError::EmptySquare)?;
        let capture = self.set_piece_at(to, piece);

        self.ep_square = None;
        if piece.role == Role::Pawn {
            let (files, ranks) = from.delta(to);
            if files == 0 && ranks.abs() == 2 {
                self.ep_square = from.offset(0, ranks / 2);
            }
        }

        if piece.role == Role::King {
            self.castling_rights.remove(CastlingRights::color(piece.color));
        }
        self.castling_rights.remove(CastlingRights::of_rook_square(from));
        self.castling_rights.remove(CastlingRights::of_rook_square(to));

        self.finish_move(piece.color, piece.role == Role::Pawn || capture.is_some());
        Ok(capture)
    }

    /// Castles king and rook of `color` in one step.
    ///
    /// Only checks that the castling right is available and that the squares
    /// between king and rook are empty. Whether the king passes through an
    /// attacked square is decided by the legality pipeline.
    ///
    /// # Errors
    ///
    /// [`BoardError::CastlingUnavailable`] if the right is not set, and
    /// [`BoardError::CastlingPathBlocked`] if the path is not empty.
    pub fn castle(&mut self, color: Color, side: CastlingSide) -> Result<(), BoardError> {
        if !self.castling_rights.contains(CastlingRights::of(color, side)) {
            return Err(BoardError::CastlingUnavailable);
        }

        let king = CastlingSide::king_from(color);
        let rook = side.rook_from(color);
        if attacks::between(king, rook)
            .into_iter()
            .any(|sq| self.piece_at(sq).is_some())
        {
            return Err(BoardError::CastlingPathBlocked);
        }
        if self.piece_at(king) != Some(color.king()) || self.piece_at(rook) != Some(color.rook()) {
            return Err(BoardError::EmptySquare);
        }

        self.remove_piece_at(king);
        self.remove_piece_at(rook);
        self.set_piece_at(side.king_to(color), color.king());
        self.set_piece_at(side.rook_to(color), color.rook());

        self.ep_square = None;
        self.castling_rights.remove(CastlingRights::color(color));
        self.finish_move(color, false);
        Ok(())
    }

    /// Moves a pawn to `to` and replaces it with `piece`.
    ///
    /// # Errors
    ///
    /// Fails if there is no pawn on `from`, if `piece` does not have the
    /// color of the pawn, or if `piece` is not a knight, bishop, rook or
    /// queen. The board is unchanged in that case.
    pub fn promote(
        &mut self,
        from: Square,
        to: Square,
        piece: Piece,
    ) -> Result<Option<Piece>, BoardError> {
        let pawn = self.piece_at(from).ok_or(BoardError::EmptySquare)?;
        if pawn.role != Role::Pawn {
            return Err(BoardError::NotAPawn);
        }
        if pawn.color != piece.color {
            return Err(BoardError::PromotionColor);
        }
        if !piece.role.is_promotable() {
            return Err(BoardError::PromotionRole);
        }

        let capture = self.move_piece(from, to)?;
        self.set_piece_at(to, piece);
        Ok(capture)
    }

    fn finish_move(&mut self, mover: Color, zeroing: bool) {
        self.halfmoves = if zeroing {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };
        if mover == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.turn = !mover;
    }

    /// The same position with colors swapped and ranks mirrored.
    ///
    /// ```
    /// use arbiter::{Board, Color, Square};
    ///
    /// let mirrored = Board::default().mirrored();
    /// assert_eq!(mirrored.piece_at(Square::E8), Some(Color::Black.king()));
    /// assert_eq!(mirrored.turn(), Color::Black);
    /// ```
    #[must_use]
    pub fn mirrored(&self) -> Board {
        let mut board = Board {
            squares: [None; 64],
            turn: !self.turn,
            castling_rights: self.castling_rights.swap_colors(),
            ep_square: self.ep_square.map(Square::flip_vertical),
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        };
        for (sq, piece) in self.pieces() {
            board.set_piece_at(sq.flip_vertical(), piece.with_color(!piece.color));
        }
        board
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&format_args!("{self}")).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_start_position() {
        let board = Board::default();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(board.piece_at(Square::H7), Some(Color::Black.pawn()));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(board.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn test_move_piece_double_step() {
        let mut board = Board::default();
        assert_eq!(board.move_piece(Square::E2, Square::E4), Ok(None));
        assert_eq!(board.ep_square(), Some(Square::E3));
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.fullmoves().get(), 1);

        board.move_piece(Square::G8, Square::F6).expect("piece on g8");
        assert_eq!(board.ep_square(), None);
        assert_eq!(board.halfmoves(), 1);
        assert_eq!(board.fullmoves().get(), 2);
    }

    #[test]
    fn test_move_piece_from_empty_square() {
        let mut board = Board::default();
        assert_eq!(
            board.move_piece(Square::E4, Square::E5),
            Err(BoardError::EmptySquare)
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_rook_moves_and_captures_clear_rights() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let capture = board.move_piece(Square::A1, Square::A8).expect("rook on a1");
        assert_eq!(capture, Some(Color::Black.rook()));
        assert_eq!(
            board.castling_rights(),
            CastlingRights::WHITE_KING_SIDE | CastlingRights::BLACK_KING_SIDE
        );
        assert_eq!(board.halfmoves(), 0);
    }

    #[test]
    fn test_castle() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        board
            .castle(Color::White, CastlingSide::QueenSide)
            .expect("castling right");
        assert_eq!(board.piece_at(Square::C1), Some(Color::White.king()));
        assert_eq!(board.piece_at(Square::D1), Some(Color::White.rook()));
        assert_eq!(board.piece_at(Square::A1), None);
        assert_eq!(board.piece_at(Square::E1), None);
        assert_eq!(board.castling_rights(), CastlingRights::color(Color::Black));
        assert_eq!(board.halfmoves(), 4);
        assert_eq!(board.turn(), Color::Black);

        assert_eq!(
            board.castle(Color::White, CastlingSide::KingSide),
            Err(BoardError::CastlingUnavailable)
        );
    }

    #[test]
    fn test_castle_blocked() {
        let mut board = Board::default();
        assert_eq!(
            board.castle(Color::White, CastlingSide::KingSide),
            Err(BoardError::CastlingPathBlocked)
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_promote() {
        let mut board = board("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            board.clone().promote(Square::A7, Square::A8, Color::Black.queen()),
            Err(BoardError::PromotionColor)
        );
        assert_eq!(
            board.clone().promote(Square::A7, Square::A8, Color::White.king()),
            Err(BoardError::PromotionRole)
        );
        assert_eq!(
            board.clone().promote(Square::E1, Square::E2, Color::White.queen()),
            Err(BoardError::NotAPawn)
        );

        let capture = board
            .promote(Square::A7, Square::B8, Color::White.knight())
            .expect("valid promotion");
        assert_eq!(capture, Some(Color::Black.knight()));
        assert_eq!(board.piece_at(Square::B8), Some(Color::White.knight()));
        assert_eq!(board.piece_at(Square::A7), None);
    }

    #[test]
    fn test_mirrored() {
        let board = board("r3k2r/8/8/3pP3/8/8/8/R3K3 w Qkq d6 0 7");
        let mirrored = board.mirrored();
        assert_eq!(
            mirrored.to_string(),
            "r3k3/8/8/8/3Pp3/8/8/R3K2R b KQq d3 0 7"
        );
        assert_eq!(mirrored.mirrored(), board);
    }
}
