use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `.zonefence.toml` schema v1.
///
/// One file per directory. Unknown keys are ignored so newer files still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleFileV1 {
    /// Schema version, at least 1.
    pub version: u32,

    /// Design intent of the directory, shown alongside violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<ImportsSection>,

    /// Policy fragments for descendant directories matching a glob.
    #[serde(
        default,
        alias = "directoryPatterns",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub directory_patterns: Vec<DirectoryPatternSection>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeSection {
    /// `descendants` (default) or `self`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply: Option<ApplySetting>,

    /// Globs matched against root-relative paths and bare file names.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ApplySetting {
    #[serde(rename = "self")]
    SelfOnly,
    #[serde(rename = "descendants")]
    Descendants,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImportsSection {
    #[serde(default)]
    pub allow: Vec<ImportEntry>,

    #[serde(default)]
    pub deny: Vec<ImportEntry>,

    /// `allow-first` (default) or `deny-first`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeSetting>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSetting {
    AllowFirst,
    DenyFirst,
}

/// An allow/deny entry: either a bare pattern or a table with a custom message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ImportEntry {
    Pattern(String),
    Detailed {
        from: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ImportEntry {
    pub fn from(&self) -> &str {
        match self {
            ImportEntry::Pattern(from) => from,
            ImportEntry::Detailed { from, .. } => from,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DirectoryPatternSection {
    /// Glob relative to the declaring directory, e.g. `**/containers`.
    pub pattern: String,

    #[serde(default)]
    pub config: PatternConfigSection,

    /// Higher wins; defaults to 0.
    #[serde(default)]
    pub priority: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatternConfigSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<ImportsSection>,

    /// `merge` (default) or `override`.
    #[serde(
        default,
        alias = "mergeStrategy",
        skip_serializing_if = "Option::is_none"
    )]
    pub merge_strategy: Option<MergeSetting>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeSetting {
    Merge,
    Override,
}
