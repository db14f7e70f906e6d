use crate::RenderableReport;
use colored::{ColoredString, Colorize};

/// Applies a color only when enabled, so output stays byte-stable without a terminal.
#[derive(Clone, Copy)]
struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(self, text: &str, f: impl Fn(&str) -> ColoredString) -> String {
        if self.enabled {
            f(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Render a report for a terminal.
///
/// Violations are grouped by file, each followed by its design intent, suggestion and
/// rule file. The last line is the summary.
pub fn render_console(report: &RenderableReport, color: bool) -> String {
    let p = Painter { enabled: color };
    let mut out = String::new();

    if report.violations.is_empty() {
        out.push_str(&p.paint("✓ No import boundary violations found", |s| s.green()));
        out.push('\n');
        out.push_str(&p.paint(
            &format!(
                "  Checked {} imports across {} files",
                report.data.imports_checked, report.data.files_checked
            ),
            |s| s.dimmed(),
        ));
        out.push('\n');
        return out;
    }

    let groups = report.by_file();
    for (path, violations) in &groups {
        out.push('\n');
        out.push_str(&p.paint(path, |s| s.bold()));
        out.push('\n');

        for v in violations {
            out.push_str(&format!(
                "  {}  {}  {}  {}\n",
                p.paint(&format!("{}:{}", v.line, v.column), |s| s.dimmed()),
                p.paint("error", |s| s.red()),
                v.message,
                p.paint(&format!("({})", v.rule), |s| s.dimmed()),
            ));
            if let Some(intent) = &v.design_intent {
                out.push_str(&p.paint(&format!("    Design intent: {intent}"), |s| s.cyan()));
                out.push('\n');
            }
            if let Some(suggestion) = &v.suggestion {
                out.push_str(&p.paint(&format!("    Suggestion: {suggestion}"), |s| s.yellow()));
                out.push('\n');
            }
            out.push_str(&p.paint(&format!("    Rule: {}", v.rule_file), |s| s.bright_black()));
            out.push('\n');
        }
    }

    out.push('\n');
    let summary = format!(
        "✖ {} in {}",
        plural(report.violations.len(), "error"),
        plural(groups.len(), "file")
    );
    out.push_str(&p.paint(&summary, |s| s.red().bold()));
    out.push('\n');

    out
}
