//! Fuzz test for candidate admission.
//!
//! Feeds arbitrary marker and path strings through the filter, catching
//! panics in the substring matching and size comparison.

#![no_main]

use corpus_sweep::CandidateFilter;
use libfuzzer_sys::fuzz_target;
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };
    let mut lines = text.splitn(3, '\n');
    let marker = lines.next().unwrap_or_default();
    let path = lines.next().unwrap_or_default();
    let size_word = lines.next().unwrap_or_default();

    let filter = CandidateFilter {
        max_file_size: size_word.len() as u64,
        exclude_markers: vec![marker.to_string()],
    };

    let _ = filter.admits(&PathBuf::from(path), data.len() as u64);
    let _ = filter.admits(&PathBuf::from(path), 0);
});
