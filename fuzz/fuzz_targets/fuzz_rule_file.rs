//! Fuzz target for `.zonefence.toml` parsing.
//!
//! Goal: the parser should **never panic** on any input. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_file
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = zonefence_repo::fuzz::parse_rule_file(text);
    }
});
