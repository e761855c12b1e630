//! Fuzz target for cell coercion and quote-aware field splitting.

#![no_main]

use datascan::input::split_quoted;
use datascan::Cell;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if data.len() > 10_000 {
        return;
    }

    match Cell::coerce(data) {
        Cell::Number(n) => assert!(n.is_finite()),
        Cell::Null => assert!(data.is_empty()),
        Cell::Boolean(_) | Cell::Text(_) => {}
    }

    for field in split_quoted(data, ',') {
        let _ = Cell::coerce(&field);
    }
});
