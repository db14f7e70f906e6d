//! Rule file and path alias parsing.
//!
//! This crate is intentionally IO-free: it parses and validates configuration provided as strings.

#![forbid(unsafe_code)]

mod alias;
mod model;
mod resolve;

pub use alias::{TsConfigLayer, alias_mapping_from_layers, parse_alias_mapping, parse_tsconfig_layer};
pub use model::{
    ApplySetting, DirectoryPatternSection, ImportEntry, ImportsSection, MergeSetting, ModeSetting,
    PatternConfigSection, RuleFileV1, ScopeSection,
};

/// File name of a directory rule file.
pub const RULE_FILE_NAME: &str = ".zonefence.toml";

/// Parse and validate a `.zonefence.toml` into a typed model.
pub fn parse_rule_file(input: &str) -> anyhow::Result<RuleFileV1> {
    let file: RuleFileV1 = toml::from_str(input)?;
    resolve::validate(&file)?;
    Ok(file)
}
