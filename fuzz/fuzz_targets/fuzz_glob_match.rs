//! Fuzz target for rule glob matching.
//!
//! Goal: matching should **never panic**, whatever the pattern looks like.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_glob_match
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Structured input so libFuzzer produces pattern/path pairs.
#[derive(Arbitrary, Debug)]
struct GlobInput {
    /// Rule patterns (e.g., "../api/**", "@/domain/*")
    patterns: Vec<String>,
    /// Candidate import paths
    candidates: Vec<String>,
}

fuzz_target!(|input: GlobInput| {
    if input.patterns.len() > 20 || input.candidates.len() > 100 {
        return;
    }

    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();
    let candidates: Vec<String> = input
        .candidates
        .into_iter()
        .filter(|c| c.len() <= 512)
        .collect();

    let _ = zonefence_repo::fuzz::match_globs(&patterns, &candidates);
});
