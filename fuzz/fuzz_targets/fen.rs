#![no_main]

use libfuzzer_sys::fuzz_target;

use arbiter::Board;

fuzz_target!(|data: &[u8]| {
    if let Ok(board) = Board::from_ascii(data) {
        let roundtripped = Board::from_ascii(board.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(board, roundtripped);
    }
});
