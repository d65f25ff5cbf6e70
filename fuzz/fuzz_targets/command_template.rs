//! Fuzz test for probe command template parsing.
//!
//! Arbitrary text must either parse into a prober or produce an
//! empty-command error; nothing here may panic or spawn a process.

#![no_main]

use corpus_sweep::CommandProber;
use libfuzzer_sys::fuzz_target;
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };
    let mut lines = text.splitn(2, '\n');
    let decode = lines.next().unwrap_or_default();
    let compress = lines.next().unwrap_or_default();

    let _ = CommandProber::new(decode, compress, PathBuf::from("scratch.out"));
});
