//! Fuzz target for tsconfig path alias extraction (JSON with comments).
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tsconfig
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = zonefence_repo::fuzz::parse_tsconfig(text);
    }
});
