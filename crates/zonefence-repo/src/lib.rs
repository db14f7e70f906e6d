//! Repository adapters: discover rule files, list directories, collect imports.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external processes.

#![forbid(unsafe_code)]

mod collect;
mod discover;
mod module;
mod scan;
mod tsconfig;

pub use collect::{collect_imports, list_source_files};
pub use discover::{discover_rule_files, find_tsconfig, list_directories, load_rules};
pub use module::is_external_import;
pub use scan::{RawImport, scan_imports};
pub use tsconfig::load_alias_mapping;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use camino::Utf8Path;

    /// Parse arbitrary text as a `.zonefence.toml`.
    pub fn parse_rule_file(text: &str) -> anyhow::Result<()> {
        let _ = zonefence_settings::parse_rule_file(text)?.into_policy();
        Ok(())
    }

    /// Parse arbitrary text as a tsconfig. **Never panics** on any input.
    pub fn parse_tsconfig(text: &str) -> anyhow::Result<()> {
        let root = Utf8Path::new("/project");
        let _ = zonefence_settings::parse_alias_mapping(text, root, root)?;
        Ok(())
    }

    /// Scan arbitrary text for imports and return the specifiers.
    pub fn scan_imports(text: &str) -> Vec<String> {
        super::scan_imports(text)
            .into_iter()
            .map(|i| i.specifier)
            .collect()
    }

    /// Match candidate paths against glob patterns with the boundary matcher.
    pub fn match_globs(patterns: &[String], candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .filter(|c| {
                patterns
                    .iter()
                    .any(|p| zonefence_domain::glob::glob_match(c, p))
            })
            .cloned()
            .collect()
    }
}
