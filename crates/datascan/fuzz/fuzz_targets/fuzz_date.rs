//! Fuzz target for lenient date parsing.
//!
//! Pathological strings must never panic the chrono format list.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if data.len() > 1_000 {
        return;
    }
    let _ = datascan::validation::parse_date(data);
});
