#![no_main]

use isoboard::codec::{decode, encode};
use isoboard::{CellTypePolicy, LoadOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for policy in [CellTypePolicy::Lenient, CellTypePolicy::Strict] {
        let options = LoadOptions {
            unknown_cell_type: policy,
        };
        let Ok(board) = decode(text, options) else {
            continue;
        };

        // Anything that decodes must survive a strict round trip unchanged.
        let encoded = encode(&board).expect("encode of a decoded board");
        let again = decode(&encoded, LoadOptions::STRICT).expect("re-decode of encoded board");
        assert_eq!(again, board);
    }
});
