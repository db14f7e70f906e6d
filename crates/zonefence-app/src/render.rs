//! Render use case: turn a report into the requested output format.

use crate::report::{serialize_report, to_renderable};
use zonefence_types::ZonefenceReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console output.
    Text { color: bool },
    Json,
    Markdown,
    /// GitHub Actions workflow commands, one per violation.
    Github,
}

pub fn render_report(report: &ZonefenceReport, format: OutputFormat) -> anyhow::Result<String> {
    let renderable = to_renderable(report);
    let text = match format {
        OutputFormat::Text { color } => zonefence_render::render_console(&renderable, color),
        OutputFormat::Json => {
            let mut json = String::from_utf8(serialize_report(report)?)?;
            json.push('\n');
            json
        }
        OutputFormat::Markdown => zonefence_render::render_markdown(&renderable),
        OutputFormat::Github => {
            let mut lines = zonefence_render::render_github_annotations(&renderable).join("\n");
            if !lines.is_empty() {
                lines.push('\n');
            }
            lines
        }
    };
    Ok(text)
}
