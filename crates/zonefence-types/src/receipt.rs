use camino::Utf8PathBuf;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for zonefence reports.
pub const SCHEMA_REPORT_V1: &str = "zonefence.report.v1";

/// One denied import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// The file containing the import statement.
    #[schemars(with = "String")]
    pub source_file: Utf8PathBuf,
    /// The import specifier exactly as written.
    pub module_specifier: String,
    pub line: u32,
    pub column: u32,
    /// Always `import-boundary` for boundary violations.
    pub rule: String,
    /// `denied_import` or `not_in_allow_list`.
    pub code: String,
    pub message: String,
    /// The rule file that declared the policy in effect.
    #[schemars(with = "String")]
    pub rule_file_path: Utf8PathBuf,

    /// Copied from the policy `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// The deny pattern that matched, when the violation came from a deny rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,

    /// Stable identifier intended for dedup and trending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Zonefence-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ZonefenceData {
    /// The checked root directory.
    pub root: String,

    pub files_checked: u32,
    pub imports_checked: u32,
    pub rules_resolved: u32,
    pub violations_total: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZonefenceReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub violations: Vec<Violation>,
    pub data: ZonefenceData,
}

impl Verdict {
    pub fn from_violations(violations: &[Violation]) -> Self {
        if violations.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_violation() -> Violation {
        Violation {
            source_file: Utf8PathBuf::from("/project/src/index.ts"),
            module_specifier: "axios".to_string(),
            line: 3,
            column: 1,
            rule: crate::ids::RULE_IMPORT_BOUNDARY.to_string(),
            code: crate::ids::CODE_DENIED_IMPORT.to_string(),
            message: "no http clients here".to_string(),
            rule_file_path: Utf8PathBuf::from("/project/src/.zonefence.toml"),
            design_intent: None,
            suggestion: None,
            matched_pattern: Some("axios".to_string()),
            fingerprint: None,
        }
    }

    #[test]
    fn violation_omits_empty_optionals() {
        let json = serde_json::to_value(sample_violation()).expect("serialize");
        assert_eq!(json["rule"], "import-boundary");
        assert_eq!(json["matched_pattern"], "axios");
        assert!(json.get("design_intent").is_none());
        assert!(json.get("fingerprint").is_none());
    }

    #[test]
    fn verdict_follows_violation_count() {
        assert_eq!(Verdict::from_violations(&[]), Verdict::Pass);
        assert_eq!(Verdict::from_violations(&[sample_violation()]), Verdict::Fail);
    }
}
