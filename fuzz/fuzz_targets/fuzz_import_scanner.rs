//! Fuzz target for the import scanner.
//!
//! Unterminated strings and comments are the interesting inputs here.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_import_scanner
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let text = String::from_utf8_lossy(data);
    let _ = zonefence_repo::fuzz::scan_imports(&text);
});
