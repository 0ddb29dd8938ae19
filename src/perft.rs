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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use arbiter::{perft, Board};
//!
//! let board = Board::default();
//! assert_eq!(perft(&board, 1), 20);
//! assert_eq!(perft(&board, 2), 400);
//! ```

use crate::{board::Board, legal};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = legal::legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| legal::play_move(board, m).map_or(0, |child| perft(&child, depth - 1)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_perft_zero() {
        assert_eq!(perft(&Board::default(), 0), 1);
    }

    #[test]
    fn test_mate_in_final_position() {
        let board: Board = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2"
            .parse()
            .expect("valid fen");
        let mated = legal::play(&board, Square::D8, Square::H4, None)
            .expect("legal move");
        assert_eq!(perft(&mated, 1), 0);
        assert_eq!(perft(&mated, 2), 0);
    }
}
