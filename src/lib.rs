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

//! A chess rules oracle: decides whether moves are legal and whether
//! positions are plausible.
//!
//! # Examples
//!
//! Check and play a move:
//!
//! ```
//! use arbiter::{legal, Board, Square};
//!
//! let board = Board::default();
//! assert_eq!(legal::is_legal_move(&board, Square::E2, Square::E4, None), Ok(true));
//!
//! let after = legal::play(&board, Square::E2, Square::E4, None)?;
//! assert_eq!(after.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! # Ok::<_, arbiter::MoveError>(())
//! ```
//!
//! List legal destinations of a piece:
//!
//! ```
//! use arbiter::{legal, Board, Square};
//!
//! let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse()?;
//! let destinations = legal::legal_destinations(&board, Square::E1);
//! assert!(destinations.contains(Square::G1));
//! assert!(destinations.contains(Square::C1));
//! # Ok::<_, arbiter::ParseFenError>(())
//! ```
//!
//! Judge a position:
//!
//! ```
//! use arbiter::{validate, Board, PositionErrorKinds};
//!
//! let board: Board = "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1".parse()?;
//! assert!(!validate::is_legal_position(&board));
//! assert_eq!(
//!     board.validate().unwrap_err().kinds(),
//!     PositionErrorKinds::OPPOSITE_CHECK
//! );
//! # Ok::<_, arbiter::ParseFenError>(())
//! ```
//!
//! Positions are read and written in [FEN](fen), moves in [UCI](uci)
//! notation.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Square`], [`Color`], [`Move`] and [`Board`], using their text
//!   representations.
//!
//! # Logging
//!
//! Rejected moves are reported with [`tracing`](https://docs.rs/tracing)
//! at trace level, implausible positions at debug level. The library does
//! not install a subscriber.

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[macro_use]
mod util;
mod castling_side;
mod color;
mod m;
mod perft;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod legal;
pub mod uci;
pub mod validate;

pub use bitboard::Bitboard;
pub use board::{Board, BoardError};
pub use castling_side::{CastlingRights, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use fen::ParseFenError;
pub use legal::{MoveError, Rejection};
pub use m::{Move, MoveList};
pub use perft::perft;
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square, SquareError};
pub use types::Piece;
pub use validate::{PositionError, PositionErrorKinds};
