use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Zonefence report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Checked: {} imports across {} files\n- Violations: {}\n\n",
        verdict,
        report.data.imports_checked,
        report.data.files_checked,
        report.violations.len()
    ));

    if report.violations.is_empty() {
        out.push_str("No import boundary violations.\n");
        return out;
    }

    out.push_str("## Violations\n\n");

    for (path, violations) in report.by_file() {
        out.push_str(&format!("### `{}`\n\n", path));
        for v in violations {
            out.push_str(&format!(
                "- `{}:{}` `{}` / `{}`: {}\n",
                v.line, v.column, v.rule, v.code, v.message
            ));
            if let Some(intent) = &v.design_intent {
                out.push_str(&format!("  - design intent: {}\n", intent));
            }
            if let Some(suggestion) = &v.suggestion {
                out.push_str(&format!("  - suggestion: {}\n", suggestion));
            }
            out.push_str(&format!("  - rule file: `{}`\n", v.rule_file));
        }
        out.push('\n');
    }

    out
}
