//! Fuzz target for import and validation.
//!
//! This fuzzer checks that importing arbitrary bytes under every supported
//! extension never panics, and that any dataset it produces validates
//! without panicking and with rows matching the header width.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    format: u8,
    data: Vec<u8>,
}

const FILE_NAMES: [&str; 4] = ["fuzz.csv", "fuzz.json", "fuzz.txt", "fuzz.tsv"];

fuzz_target!(|input: Input| {
    // Only process reasonable-sized inputs to avoid OOM
    if input.data.len() > 100_000 {
        return;
    }

    let file_name = FILE_NAMES[input.format as usize % FILE_NAMES.len()];
    let result = datascan::import(&input.data, file_name);
    assert_eq!(result.success, result.dataset.is_some());

    if let Some(dataset) = result.dataset {
        let width = dataset.column_count();
        assert!(dataset.rows().iter().all(|row| row.len() == width));

        let validation = datascan::validate(&dataset, None);
        assert!((0.0..=100.0).contains(&validation.summary.data_quality_score));
    }
});
