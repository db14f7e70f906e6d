use crate::RenderableReport;

/// Render violations as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error file={path},line={line},col={col}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report
        .violations
        .iter()
        .map(|v| {
            let mut message = format!("[{}:{}] {}", v.rule, v.code, v.message);
            if let Some(intent) = &v.design_intent {
                message.push_str(&format!("\nDesign intent: {intent}"));
            }
            let message = message
                .replace('%', "%25")
                .replace('\r', "%0D")
                .replace('\n', "%0A");
            let path = v.path.replace(',', "%2C").replace(':', "%3A");
            format!(
                "::error file={},line={},col={}::{}",
                path, v.line, v.column, message
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{report, violation};

    #[test]
    fn one_annotation_per_violation() {
        let mut v = violation("src/domain/user.ts", 3, 7, "100% not allowed");
        v.design_intent = Some("pure domain".to_string());
        let lines = render_github_annotations(&report(vec![v]));
        assert_eq!(
            lines,
            vec![
                "::error file=src/domain/user.ts,line=3,col=7::[import-boundary:denied_import] 100%25 not allowed%0ADesign intent: pure domain"
                    .to_string()
            ]
        );
    }

    #[test]
    fn clean_report_has_no_annotations() {
        assert!(render_github_annotations(&report(Vec::new())).is_empty());
    }
}
