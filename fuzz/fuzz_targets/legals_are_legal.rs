#![no_main]

use arbiter::{legal, Board, Square};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [from, to, fen @ ..] = data else {
        return;
    };
    let (Ok(from), Ok(to)) = (Square::try_from(from % 64), Square::try_from(to % 64)) else {
        return;
    };
    let Ok(board) = Board::from_ascii(fen) else {
        return;
    };

    let legals = legal::legal_moves(&board);
    assert!(legals.iter().all(|&m| legal::play_move(&board, m).is_ok()));

    let destinations = legal::legal_destinations(&board, from);
    let candidate = legal::is_legal_move(&board, from, to, None) == Ok(true);
    if candidate {
        assert!(destinations.contains(to));
    }
});
