use anyhow::Context;
use zonefence_render::{
    RenderableData, RenderableReport, RenderableVerdictStatus, RenderableViolation,
};
use zonefence_types::{SCHEMA_REPORT_V1, Verdict, Violation, ZonefenceReport};

pub fn serialize_report(report: &ZonefenceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Parse a previously written report, rejecting unknown schemas.
pub fn parse_report_json(text: &str) -> anyhow::Result<ZonefenceReport> {
    let report: ZonefenceReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

pub fn to_renderable(report: &ZonefenceReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        violations: report.violations.iter().map(renderable_violation).collect(),
        data: RenderableData {
            files_checked: report.data.files_checked,
            imports_checked: report.data.imports_checked,
        },
    }
}

fn renderable_violation(v: &Violation) -> RenderableViolation {
    RenderableViolation {
        path: v.source_file.as_str().to_string(),
        line: v.line,
        column: v.column,
        rule: v.rule.clone(),
        code: v.code.clone(),
        message: v.message.clone(),
        design_intent: v.design_intent.clone(),
        suggestion: v.suggestion.clone(),
        rule_file: v.rule_file_path.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use time::OffsetDateTime;
    use zonefence_types::{ToolMeta, ZonefenceData, ids};

    fn sample_report() -> ZonefenceReport {
        let violation = Violation {
            source_file: Utf8PathBuf::from("src/domain/user.ts"),
            module_specifier: "react".to_string(),
            line: 2,
            column: 1,
            rule: ids::RULE_IMPORT_BOUNDARY.to_string(),
            code: ids::CODE_DENIED_IMPORT.to_string(),
            message: "No UI code in the domain".to_string(),
            rule_file_path: Utf8PathBuf::from("src/domain/.zonefence.toml"),
            design_intent: Some("Pure domain".to_string()),
            suggestion: None,
            matched_pattern: Some("react".to_string()),
            fingerprint: Some("ab".repeat(32)),
        };
        ZonefenceReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "zonefence".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            verdict: Verdict::Fail,
            violations: vec![violation],
            data: ZonefenceData {
                root: "/project".to_string(),
                files_checked: 3,
                imports_checked: 9,
                rules_resolved: 2,
                violations_total: 1,
            },
        }
    }

    #[test]
    fn report_survives_serialization() {
        let report = sample_report();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"schema\": \"zonefence.report.v1\""));
        assert!(text.contains("\"verdict\": \"fail\""));
        assert!(text.contains("\"started_at\": \"1970-01-01T00:00:00Z\""));

        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let mut report = sample_report();
        report.schema = "something.else.v9".to_string();
        let text = String::from_utf8(serialize_report(&report).expect("serialize")).expect("utf8");

        let err = parse_report_json(&text).expect_err("should fail");
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn renderable_keeps_violation_details() {
        let renderable = to_renderable(&sample_report());
        assert_eq!(renderable.verdict, RenderableVerdictStatus::Fail);
        assert_eq!(renderable.data.imports_checked, 9);
        let v = &renderable.violations[0];
        assert_eq!(v.path, "src/domain/user.ts");
        assert_eq!(v.rule_file, "src/domain/.zonefence.toml");
        assert_eq!(v.design_intent.as_deref(), Some("Pure domain"));
    }
}
