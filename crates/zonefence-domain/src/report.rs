use serde::Serialize;
use zonefence_types::Violation;

/// Outcome of evaluating a batch of imports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    /// In input order.
    pub violations: Vec<Violation>,
    /// Distinct source files among the evaluated imports.
    pub files_checked: usize,
    pub imports_checked: usize,
}

impl EvaluationResult {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Files with at least one violation.
    pub fn files_with_violations(&self) -> usize {
        self.violations
            .iter()
            .map(|v| &v.source_file)
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }
}
