use crate::boundary::evaluate_import_boundary;
use crate::model::{EvaluateOptions, ImportEdge, ResolvedRuleSet};
use crate::report::EvaluationResult;
use camino::Utf8Path;
use std::collections::BTreeSet;

/// Evaluate every import, in input order, without stopping at the first violation.
pub fn evaluate(
    imports: &[ImportEdge],
    rules: &ResolvedRuleSet,
    root_dir: &Utf8Path,
    options: &EvaluateOptions,
) -> EvaluationResult {
    let mut violations = Vec::new();
    let mut files = BTreeSet::new();

    for edge in imports {
        files.insert(edge.source_file.as_path());
        if let Some(v) = evaluate_import_boundary(edge, rules, root_dir, options) {
            violations.push(v);
        }
    }

    tracing::debug!(
        imports = imports.len(),
        files = files.len(),
        violations = violations.len(),
        "evaluated import boundaries"
    );

    EvaluationResult {
        violations,
        files_checked: files.len(),
        imports_checked: imports.len(),
    }
}
