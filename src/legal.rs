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

//! Decides whether moves are legal and plays them.
//!
//! Every entry point first checks that the input position is plausible
//! (see [`Board::validate()`]). The input board is never modified: a legal
//! move yields a new [`Board`].
//!
//! # Examples
//!
//! ```
//! use arbiter::{legal, Board, Square};
//!
//! let board = Board::default();
//! let after = legal::play(&board, Square::E2, Square::E4, None)?;
//! assert_eq!(
//!     after.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! assert_eq!(legal::is_legal_move(&board, Square::E2, Square::E5, None), Ok(false));
//! # Ok::<_, legal::MoveError>(())
//! ```

use core::fmt;
use std::error::Error;

use tracing::trace;

use crate::{
    attacks,
    bitboard::Bitboard,
    board::{Board, BoardError},
    castling_side::{CastlingRights, CastlingSide},
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::{Rank, Square},
    types::Piece,
    uci::Uci,
    validate::{PositionError, PositionErrorKinds},
};

/// Reason why a well-formed move is illegal in a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Rejection {
    /// The piece cannot move like that.
    Shape,
    /// A square between origin and target is occupied.
    Blocked,
    /// The target is occupied by a piece of the mover.
    OwnPiece,
    /// Kings are never captured.
    KingCapture,
    /// A pawn advancing straight onto a piece, or moving diagonally onto an
    /// empty square other than the en passant target.
    PawnCapture,
    CastlingRights,
    CastlingBlocked,
    /// The king would start on, pass over or land on an attacked square.
    CastlingThroughCheck,
    /// The move would leave the mover's king in check.
    SelfCheck,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::Shape => "piece cannot move like that",
            Rejection::Blocked => "path is blocked",
            Rejection::OwnPiece => "cannot capture own piece",
            Rejection::KingCapture => "cannot capture king",
            Rejection::PawnCapture => "invalid pawn capture",
            Rejection::CastlingRights => "castling right not available",
            Rejection::CastlingBlocked => "pieces between king and rook",
            Rejection::CastlingThroughCheck => "cannot castle out of, through or into check",
            Rejection::SelfCheck => "king would be in check",
        })
    }
}

/// Error when playing a move.
///
/// [`MoveError::Rejected`] means the move is well-formed but illegal in
/// the position. All other variants are malformed requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// The position is not plausible.
    InvalidBoard(PositionErrorKinds),
    /// A raw square index is out of range.
    SquareNotExist,
    /// Origin and target are the same square.
    SameSquare,
    /// There is no piece on the origin square.
    NoPiece,
    /// The piece on the origin square does not belong to the side to move.
    WrongColor,
    /// A promotion piece is missing, superfluous, of the wrong color, or
    /// not a knight, bishop, rook or queen.
    InvalidPromotion,
    Rejected(Rejection),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidBoard(kinds) => {
                fmt::Display::fmt(&PositionError::from_kinds(*kinds), f)
            }
            MoveError::SquareNotExist => f.write_str("square does not exist"),
            MoveError::SameSquare => f.write_str("from and to square are the same"),
            MoveError::NoPiece => f.write_str("no piece on from square"),
            MoveError::WrongColor => f.write_str("piece does not belong to side to move"),
            MoveError::InvalidPromotion => f.write_str("invalid promotion"),
            MoveError::Rejected(rejection) => write!(f, "illegal move: {rejection}"),
        }
    }
}

impl Error for MoveError {}

impl From<PositionError> for MoveError {
    fn from(err: PositionError) -> MoveError {
        MoveError::InvalidBoard(err.kinds())
    }
}

impl From<Rejection> for MoveError {
    fn from(rejection: Rejection) -> MoveError {
        MoveError::Rejected(rejection)
    }
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> MoveError {
        match err {
            BoardError::EmptySquare => MoveError::NoPiece,
            BoardError::NotAPawn | BoardError::PromotionColor | BoardError::PromotionRole => {
                MoveError::InvalidPromotion
            }
            BoardError::CastlingUnavailable => MoveError::Rejected(Rejection::CastlingRights),
            BoardError::CastlingPathBlocked => MoveError::Rejected(Rejection::CastlingBlocked),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Shape {
    Step,
    PawnPush,
    PawnDoublePush,
    PawnCapture,
    Slide,
    KnightJump,
    Castle(CastlingSide),
}

impl Shape {
    /// Shapes whose intermediate squares must be empty. Castling checks its
    /// path separately.
    fn is_sliding(self) -> bool {
        matches!(self, Shape::Slide | Shape::PawnDoublePush)
    }
}

fn shape(piece: Piece, from: Square, to: Square) -> Option<Shape> {
    let (files, ranks) = from.delta(to);
    let (df, dr) = (files.abs(), ranks.abs());

    match piece.role {
        Role::Pawn => {
            let dir = piece.color.pawn_direction();
            if files == 0 && ranks == dir {
                Some(Shape::PawnPush)
            } else if files == 0
                && ranks == 2 * dir
                && from.rank() == Rank::Second.relative_to(piece.color)
            {
                Some(Shape::PawnDoublePush)
            } else if df == 1 && ranks == dir {
                Some(Shape::PawnCapture)
            } else {
                None
            }
        }
        Role::Knight => ((df, dr) == (1, 2) || (df, dr) == (2, 1)).then_some(Shape::KnightJump),
        Role::Bishop => (df == dr && df != 0).then_some(Shape::Slide),
        Role::Rook => ((df == 0) != (dr == 0)).then_some(Shape::Slide),
        Role::Queen => ((df == dr && df != 0) || (df == 0) != (dr == 0)).then_some(Shape::Slide),
        Role::King => {
            if df.max(dr) == 1 {
                Some(Shape::Step)
            } else if from == CastlingSide::king_from(piece.color) && dr == 0 && df == 2 {
                Some(Shape::Castle(CastlingSide::from_king_side(files > 0)))
            } else {
                None
            }
        }
    }
}

fn check_promotion(piece: Piece, to: Square, promotion: Option<Piece>) -> Result<(), MoveError> {
    let promotes = piece.role == Role::Pawn && to.rank() == piece.color.promotion_rank();
    match promotion {
        None if !promotes => Ok(()),
        Some(p) if promotes && p.color == piece.color && p.role.is_promotable() => Ok(()),
        _ => Err(MoveError::InvalidPromotion),
    }
}

fn check_castling(board: &Board, color: Color, side: CastlingSide) -> Result<(), Rejection> {
    if !board
        .castling_rights()
        .contains(CastlingRights::of(color, side))
    {
        return Err(Rejection::CastlingRights);
    }

    let king = CastlingSide::king_from(color);
    if (attacks::between(king, side.rook_from(color)) & board.occupied()).any() {
        return Err(Rejection::CastlingBlocked);
    }

    let king_to = side.king_to(color);
    let king_path = attacks::between(king, king_to).with(king).with(king_to);
    if king_path
        .into_iter()
        .any(|sq| attacks::is_attacked(board, sq, !color))
    {
        return Err(Rejection::CastlingThroughCheck);
    }

    Ok(())
}

/// Runs the legality pipeline on a board that is already known to be
/// plausible.
fn play_validated(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<Board, MoveError> {
    if from == to {
        return Err(MoveError::SameSquare);
    }

    let piece = board.piece_at(from).ok_or(MoveError::NoPiece)?;
    let color = piece.color;
    if color != board.turn() {
        return Err(MoveError::WrongColor);
    }

    check_promotion(piece, to, promotion)?;

    let shape = shape(piece, from, to).ok_or(Rejection::Shape)?;

    if shape.is_sliding() && (attacks::between(from, to) & board.occupied()).any() {
        return Err(Rejection::Blocked.into());
    }

    let mut ep_capture = None;
    if let Shape::Castle(side) = shape {
        check_castling(board, color, side)?;
    } else {
        match board.piece_at(to) {
            Some(target) if target.color == color => return Err(Rejection::OwnPiece.into()),
            Some(target) if target.role == Role::King => {
                return Err(Rejection::KingCapture.into())
            }
            Some(_) if matches!(shape, Shape::PawnPush | Shape::PawnDoublePush) => {
                return Err(Rejection::PawnCapture.into())
            }
            None if shape == Shape::PawnCapture => {
                if board.ep_square() != Some(to) {
                    return Err(Rejection::PawnCapture.into());
                }
                ep_capture = to.offset(0, -color.pawn_direction());
            }
            _ => (),
        }
    }

    let mut after = board.clone();
    match (shape, promotion) {
        (Shape::Castle(side), _) => after.castle(color, side)?,
        (_, Some(promoted)) => {
            after.promote(from, to, promoted)?;
        }
        (_, None) => {
            after.move_piece(from, to)?;
        }
    }
    if let Some(captured) = ep_capture {
        after.remove_piece_at(captured);
    }

    if let Some(king) = after.king_of(color) {
        if attacks::is_attacked(&after, king, !color) {
            return Err(Rejection::SelfCheck.into());
        }
    }

    Ok(after)
}

fn traced(
    board: &Board,
    from: Square,
    to: Square,
    result: Result<Board, MoveError>,
) -> Result<Board, MoveError> {
    result.map_err(|err| {
        trace!(fen = %board, %from, %to, reason = %err, "move rejected");
        err
    })
}

/// Plays a move, given by origin and target square, returning the
/// resulting position.
///
/// `promotion` must be given if and only if a pawn reaches the last rank,
/// and must be a knight, bishop, rook or queen of the moving side.
///
/// # Errors
///
/// [`MoveError::Rejected`] if the move is illegal. Any other
/// [`MoveError`] if the request itself is malformed or the position is not
/// plausible.
pub fn play(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<Board, MoveError> {
    let result = match board.validate() {
        Ok(()) => play_validated(board, from, to, promotion),
        Err(err) => Err(err.into()),
    };
    traced(board, from, to, result)
}

/// Like [`play()`], but with raw square indices from `0` (a1) to `63` (h8).
///
/// # Errors
///
/// [`MoveError::InvalidBoard`] if the position is not plausible, then
/// [`MoveError::SquareNotExist`] if an index is out of range, otherwise as
/// [`play()`].
pub fn play_raw(
    board: &Board,
    from: u32,
    to: u32,
    promotion: Option<Piece>,
) -> Result<Board, MoveError> {
    board.validate()?;
    let from = Square::try_from(from).map_err(|_| MoveError::SquareNotExist)?;
    let to = Square::try_from(to).map_err(|_| MoveError::SquareNotExist)?;
    play(board, from, to, promotion)
}

/// Plays a [`Move`].
///
/// The promotion role is given the color of the side to move. A castling
/// move requires the king on its home square.
///
/// # Errors
///
/// As [`play()`]. A [`Move::Castle`] whose origin holds a piece other than
/// a king is rejected with [`Rejection::Shape`].
pub fn play_move(board: &Board, m: Move) -> Result<Board, MoveError> {
    let (from, to) = (m.from(), m.to());
    let result = board
        .validate()
        .map_err(MoveError::from)
        .and_then(|()| match m {
            Move::Normal { .. } => play_validated(board, from, to, None),
            Move::Promotion { role, .. } => {
                play_validated(board, from, to, Some(role.of(board.turn())))
            }
            Move::Castle { .. } => {
                if board.role_at(from).is_some_and(|role| role != Role::King) {
                    Err(Rejection::Shape.into())
                } else {
                    play_validated(board, from, to, None)
                }
            }
        });
    traced(board, from, to, result)
}

/// Plays a move in UCI notation, coloring the promotion role for the side
/// to move.
///
/// Unlike [`Uci::to_move()`] followed by [`play_move()`], this looks at the
/// piece on the origin square, so a rook moving from e1 to g1 is a normal
/// move.
///
/// # Errors
///
/// As [`play()`].
pub fn play_uci(board: &Board, uci: &Uci) -> Result<Board, MoveError> {
    play(
        board,
        uci.from,
        uci.to,
        uci.promotion.map(|role| role.of(board.turn())),
    )
}

/// Checks whether a move is legal.
///
/// # Errors
///
/// Returns `Ok(false)` for illegal moves and errors only for malformed
/// requests or implausible positions, like [`play()`].
pub fn is_legal_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<bool, MoveError> {
    match play(board, from, to, promotion) {
        Ok(_) => Ok(true),
        Err(MoveError::Rejected(_)) => Ok(false),
        Err(err) => Err(err),
    }
}

fn destinations(board: &Board, from: Square, piece: Piece) -> Bitboard {
    Square::all()
        .filter(|&to| {
            shape(piece, from, to).is_some() && {
                let promotion = (piece.role == Role::Pawn
                    && to.rank() == piece.color.promotion_rank())
                .then_some(piece.color.queen());
                play_validated(board, from, to, promotion).is_ok()
            }
        })
        .collect()
}

/// All squares the piece on `from` can legally move to.
///
/// Returns the empty set if there is no piece of the side to move on
/// `from`, or if the position is not plausible.
///
/// ```
/// use arbiter::{legal, Board, Square};
///
/// let destinations = legal::legal_destinations(&Board::default(), Square::G1);
/// assert_eq!(destinations.into_iter().collect::<Vec<_>>(), [Square::F3, Square::H3]);
/// ```
pub fn legal_destinations(board: &Board, from: Square) -> Bitboard {
    if board.validate().is_err() {
        return Bitboard::EMPTY;
    }
    match board.piece_at(from) {
        Some(piece) if piece.color == board.turn() => destinations(board, from, piece),
        _ => Bitboard::EMPTY,
    }
}

/// All legal moves of the side to move. Promotions are expanded into the
/// four promotion roles.
///
/// Empty if the position is not plausible.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    if board.validate().is_err() {
        return moves;
    }

    let turn = board.turn();
    for (from, piece) in board.pieces().filter(|&(_, piece)| piece.color == turn) {
        for to in destinations(board, from, piece) {
            match shape(piece, from, to) {
                Some(Shape::Castle(side)) => moves.push(Move::Castle { color: turn, side }),
                _ if piece.role == Role::Pawn && to.rank() == turn.promotion_rank() => {
                    for role in Role::PROMOTIONS {
                        moves.push(Move::Promotion { from, to, role });
                    }
                }
                _ => moves.push(Move::Normal { from, to }),
            }
        }
    }
    moves
}

/// Whether the side to move is in check.
pub fn is_check(board: &Board) -> bool {
    attacks::checkers(board).any()
}

/// Whether the side to move is checkmated. `false` for implausible
/// positions.
pub fn is_checkmate(board: &Board) -> bool {
    is_check(board) && board.validate().is_ok() && legal_moves(board).is_empty()
}

/// Whether the side to move is stalemated. `false` for implausible
/// positions.
pub fn is_stalemate(board: &Board) -> bool {
    !is_check(board) && board.validate().is_ok() && legal_moves(board).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid fen")
    }

    fn rejection(fen: &str, uci: &str) -> Option<Rejection> {
        let uci: Uci = uci.parse().expect("valid uci");
        match play_uci(&board(fen), &uci) {
            Ok(_) => None,
            Err(MoveError::Rejected(rejection)) => Some(rejection),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_e2e4() {
        let before = Board::default();
        let after = play(&before, Square::E2, Square::E4, None).expect("legal");
        assert_eq!(
            after.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(before, Board::default());
    }

    #[test]
    fn test_malformed_requests() {
        let start = Board::default();
        assert_eq!(
            play(&start, Square::E2, Square::E2, None),
            Err(MoveError::SameSquare)
        );
        assert_eq!(
            play(&start, Square::E4, Square::E5, None),
            Err(MoveError::NoPiece)
        );
        assert_eq!(
            play(&start, Square::E7, Square::E5, None),
            Err(MoveError::WrongColor)
        );
        assert_eq!(
            play(&start, Square::E2, Square::E4, Some(Color::White.queen())),
            Err(MoveError::InvalidPromotion)
        );
        assert_eq!(
            play_raw(&start, 12, 64, None),
            Err(MoveError::SquareNotExist)
        );
        assert!(play_raw(&start, 12, 28, None).is_ok());
    }

    #[test]
    fn test_play_raw_checks_board_first() {
        let two_kings = board("4k3/8/8/8/8/8/8/3KK3 w - - 0 1");
        assert!(matches!(
            play_raw(&two_kings, 64, 12, None),
            Err(MoveError::InvalidBoard(kinds))
                if kinds.contains(PositionErrorKinds::TOO_MANY_KINGS)
        ));
        assert_eq!(
            play_raw(&Board::default(), 64, 12, None),
            Err(MoveError::SquareNotExist)
        );
    }

    #[test]
    fn test_promotion_piece() {
        let fen = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(
            play(&board(fen), Square::B7, Square::B8, None),
            Err(MoveError::InvalidPromotion)
        );
        assert_eq!(
            play(&board(fen), Square::B7, Square::B8, Some(Color::Black.queen())),
            Err(MoveError::InvalidPromotion)
        );
        assert_eq!(
            play(&board(fen), Square::B7, Square::B8, Some(Color::White.king())),
            Err(MoveError::InvalidPromotion)
        );
        assert_eq!(
            play(&board(fen), Square::E1, Square::E2, Some(Color::White.queen())),
            Err(MoveError::InvalidPromotion)
        );

        let after = play(&board(fen), Square::B7, Square::B8, Some(Color::White.knight()))
            .expect("legal promotion");
        assert_eq!(after.to_fen(), "1N2k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn test_invalid_board() {
        let no_kings = board("8/8/8/8/8/8/4P3/8 w - - 0 1");
        assert_eq!(
            play(&no_kings, Square::E2, Square::E4, None),
            Err(MoveError::InvalidBoard(PositionErrorKinds::MISSING_KING))
        );
        assert!(is_legal_move(&no_kings, Square::E2, Square::E4, None).is_err());
        assert!(legal_destinations(&no_kings, Square::E2).is_empty());
        assert!(legal_moves(&no_kings).is_empty());
        assert!(!is_stalemate(&no_kings));
    }

    #[test]
    fn test_rejections() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(rejection(start, "e2e5"), Some(Rejection::Shape));
        assert_eq!(rejection(start, "g1g3"), Some(Rejection::Shape));
        assert_eq!(rejection(start, "a1a3"), Some(Rejection::Blocked));
        assert_eq!(rejection(start, "b1d2"), Some(Rejection::OwnPiece));
        assert_eq!(rejection(start, "e2d3"), Some(Rejection::PawnCapture));
        assert_eq!(rejection(start, "e1g1"), Some(Rejection::CastlingBlocked));
        assert_eq!(rejection(start, "g1f3"), None);

        // Pawn double step over a piece.
        assert_eq!(
            rejection("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2e4"),
            Some(Rejection::Blocked)
        );
        // Pawns do not capture straight ahead.
        assert_eq!(
            rejection("4k3/8/8/8/4n3/4P3/8/4K3 w - - 0 1", "e3e4"),
            Some(Rejection::PawnCapture)
        );
        assert_eq!(rejection("8/8/8/8/8/2k5/3Q4/7K b - - 0 1", "c3d2"), None);
        // Pinned knight.
        assert_eq!(
            rejection("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1", "e2c3"),
            Some(Rejection::SelfCheck)
        );
        // King steps into check.
        assert_eq!(
            rejection("3rk3/8/8/8/8/8/8/4K3 w - - 0 1", "e1d1"),
            Some(Rejection::SelfCheck)
        );
        // Kings never stand next to each other.
        assert_eq!(
            rejection("8/8/8/8/8/4k3/8/4K3 w - - 0 1", "e1e2"),
            Some(Rejection::SelfCheck)
        );
    }

    #[test]
    fn test_king_capture() {
        assert_eq!(
            play(
                &board("4k3/4P3/8/8/8/8/8/K7 w - - 0 1"),
                Square::E7,
                Square::E8,
                Some(Color::White.queen())
            ),
            Err(MoveError::Rejected(Rejection::KingCapture))
        );
        // A king that could be captured is never in a plausible position.
        assert_eq!(
            play(&board("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"), Square::E1, Square::E8, None),
            Err(MoveError::InvalidBoard(PositionErrorKinds::OPPOSITE_CHECK))
        );
    }

    #[test]
    fn test_castling() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

        let king_side = play(&board(fen), Square::E1, Square::G1, None).expect("legal");
        assert_eq!(
            king_side.to_fen(),
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq - 1 1"
        );

        let queen_side = play(&board(fen), Square::E1, Square::C1, None).expect("legal");
        assert_eq!(
            queen_side.to_fen(),
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/2KR3R b kq - 1 1"
        );

        let black = play(&queen_side, Square::E8, Square::G8, None).expect("legal");
        assert_eq!(
            black.to_fen(),
            "r4rk1/pppppppp/8/8/8/8/PPPPPPPP/2KR3R w - - 2 2"
        );
    }

    #[test]
    fn test_castling_rejections() {
        assert_eq!(
            rejection("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", "e1g1"),
            Some(Rejection::CastlingRights)
        );
        assert_eq!(
            rejection("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", "e1c1"),
            Some(Rejection::CastlingBlocked)
        );
        // b1 may be attacked, only the king's squares matter.
        assert_eq!(rejection("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1c1"), None);
        // Passing over an attacked square.
        assert_eq!(
            rejection("3rk3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1c1"),
            Some(Rejection::CastlingThroughCheck)
        );
        // Landing on an attacked square.
        assert_eq!(
            rejection("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1", "e1g1"),
            Some(Rejection::CastlingThroughCheck)
        );
        // Castling out of check.
        assert_eq!(
            rejection("4k3/8/8/8/8/5n2/8/4K2R w K - 0 1", "e1g1"),
            Some(Rejection::CastlingThroughCheck)
        );
        // A king away from home cannot jump two squares.
        assert_eq!(
            rejection("4k3/8/8/8/8/8/8/3K3R w - - 0 1", "d1f1"),
            Some(Rejection::Shape)
        );
    }

    #[test]
    fn test_castle_move_requires_king() {
        let m = Move::Castle {
            color: Color::White,
            side: CastlingSide::KingSide,
        };
        assert_eq!(
            play_move(&board("3k4/8/8/8/8/8/8/4RK2 w - - 0 1"), m),
            Err(MoveError::Rejected(Rejection::Shape))
        );

        let uci: Uci = "e1g1".parse().expect("valid uci");
        assert_eq!(
            play_uci(&board("3k4/8/8/8/8/8/8/4R2K w - - 0 1"), &uci).map(|b| b.to_fen()),
            Ok("3k4/8/8/8/8/8/8/6RK b - - 1 1".to_owned())
        );
    }

    #[test]
    fn test_en_passant() {
        let fen = "rnbq1bnr/ppP5/3p4/4pB1p/3PPPp1/QP2k1P1/P6P/R3K1NR b KQ f3 5 6";
        let after = play(&board(fen), Square::G4, Square::F3, None).expect("legal en passant");
        assert_eq!(after.piece_at(Square::F4), None);
        assert_eq!(after.piece_at(Square::F3), Some(Color::Black.pawn()));
        assert_eq!(after.halfmoves(), 0);
        assert_eq!(after.ep_square(), None);

        assert_eq!(rejection(fen, "g4h3"), Some(Rejection::PawnCapture));
    }

    #[test]
    fn test_en_passant_discovered_check() {
        // Capturing en passant would expose the king along the rank.
        let fen = "8/8/8/KPp4r/8/8/8/6k1 w - c6 0 2";
        assert_eq!(rejection(fen, "b5c6"), Some(Rejection::SelfCheck));
    }

    #[test]
    fn test_double_step_sets_ep_square() {
        let after = play(&Board::default(), Square::G2, Square::G4, None).expect("legal");
        assert_eq!(after.ep_square(), Some(Square::G3));
        let after = play(&after, Square::A7, Square::A6, None).expect("legal");
        assert_eq!(after.ep_square(), None);
    }

    #[test]
    fn test_legal_destinations() {
        let start = Board::default();
        assert_eq!(
            legal_destinations(&start, Square::E2),
            Bitboard::from(Square::E3).with(Square::E4)
        );
        assert!(legal_destinations(&start, Square::E1).is_empty());
        assert!(legal_destinations(&start, Square::E7).is_empty());
        assert!(legal_destinations(&start, Square::E4).is_empty());

        let castling = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            legal_destinations(&castling, Square::E1),
            [Square::C1, Square::D1, Square::D2, Square::E2, Square::F2, Square::F1, Square::G1]
                .into_iter()
                .collect::<Bitboard>()
        );

        let promotion = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            legal_destinations(&promotion, Square::B7),
            Bitboard::from(Square::B8)
        );
    }

    #[test]
    fn test_destinations_agree_with_is_legal_move() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbq1bnr/ppP5/3p4/4pB1p/3PPPp1/QP2k1P1/P6P/R3K1NR b KQ f3 5 6",
        ] {
            let board = board(fen);
            for from in Square::all() {
                let destinations = legal_destinations(&board, from);
                for to in Square::all() {
                    let promotion = board
                        .piece_at(from)
                        .filter(|piece| {
                            piece.role == Role::Pawn && to.rank() == piece.color.promotion_rank()
                        })
                        .map(|piece| piece.color.queen());
                    let legal =
                        matches!(is_legal_move(&board, from, to, promotion), Ok(true));
                    assert_eq!(destinations.contains(to), legal, "{fen} {from}{to}");
                }
            }
        }
    }

    #[test]
    fn test_no_self_check() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1bnr/ppP5/3p4/4pB1p/3PPPp1/QP2k1P1/P6P/R3K1NR b KQ f3 5 6",
        ] {
            let board = board(fen);
            for m in legal_moves(&board) {
                let after = play_move(&board, m).expect("legal move");
                let king = after.king_of(board.turn()).expect("king");
                assert!(
                    !attacks::is_attacked(&after, king, after.turn()),
                    "{fen} {m}"
                );
                assert!(after.validate().is_ok(), "{fen} {m}");
            }
        }
    }

    #[test]
    fn test_mirrored_legality() {
        let board = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let mirrored = board.mirrored();
        for from in Square::all() {
            assert_eq!(
                legal_destinations(&board, from).flip_vertical(),
                legal_destinations(&mirrored, from.flip_vertical()),
                "{from}"
            );
        }
    }

    #[test]
    fn test_legal_moves() {
        let moves = legal_moves(&Board::default());
        assert_eq!(moves.len(), 20);

        let castling = legal_moves(&board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"));
        assert!(castling.contains(&Move::Castle {
            color: Color::White,
            side: CastlingSide::KingSide
        }));
        assert!(castling.contains(&Move::Castle {
            color: Color::White,
            side: CastlingSide::QueenSide
        }));

        let promotions = legal_moves(&board("4k3/1P6/8/8/8/8/8/K7 w - - 0 1"));
        assert_eq!(
            promotions
                .iter()
                .filter(|m| m.is_promotion())
                .count(),
            4
        );
    }

    #[test]
    fn test_mate_and_stalemate() {
        let mate = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_check(&mate));
        assert!(is_checkmate(&mate));
        assert!(!is_stalemate(&mate));

        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_check(&stalemate));
        assert!(is_stalemate(&stalemate));
        assert!(!is_checkmate(&stalemate));

        assert!(!is_checkmate(&Board::default()));
        assert!(!is_stalemate(&Board::default()));
    }

    #[test]
    fn test_queries_are_idempotent() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbq1bnr/ppP5/3p4/4pB1p/3PPPp1/QP2k1P1/P6P/R3K1NR b KQ f3 5 6",
        ] {
            let b = board(fen);
            for sq in Square::all() {
                assert_eq!(
                    legal_destinations(&b, sq),
                    legal_destinations(&b, sq),
                    "{sq} in {fen}"
                );
                assert_eq!(
                    attacks::attackers(&b, sq),
                    attacks::attackers(&b, sq),
                    "{sq} in {fen}"
                );
            }
            assert_eq!(b.to_fen(), fen);
            assert_eq!(b, board(fen));
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MoveError::Rejected(Rejection::SelfCheck).to_string(),
            "illegal move: king would be in check"
        );
        assert_eq!(
            MoveError::InvalidBoard(PositionErrorKinds::MISSING_KING).to_string(),
            "illegal position: missing king"
        );
    }
}
