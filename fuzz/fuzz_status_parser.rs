//! Fuzz target for the daemon-status text parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_status_parser
//!
//! This exercises `parse_daemon_status()` with arbitrary byte sequences to
//! find panics or hangs in the label scanning and integer extraction.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed input must come back as Err, never as a panic
        let _ = banstat_core::parse_daemon_status(s);
    }
});
