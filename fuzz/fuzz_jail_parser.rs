//! Fuzz target for the jail-detail text parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_jail_parser

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = banstat_core::parse_jail_status(s, "sshd");
    }
});
