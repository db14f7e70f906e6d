use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an import boundary violation.
///
/// Identity fields:
/// - rule
/// - code
/// - source file (repo-relative)
/// - module specifier
/// - rule file (repo-relative)
///
/// Line and column are left out so fingerprints survive unrelated edits.
pub fn fingerprint_for_violation(
    rule: &str,
    code: &str,
    source_file: &str,
    module_specifier: &str,
    rule_file: &str,
) -> String {
    let canonical = [rule, code, source_file, module_specifier, rule_file].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
