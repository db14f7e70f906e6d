#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableViolation {
    /// Root-relative path of the importing file.
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub rule: String,
    pub code: String,
    pub message: String,
    pub design_intent: Option<String>,
    pub suggestion: Option<String>,
    /// Root-relative path of the rule file in effect.
    pub rule_file: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub files_checked: u32,
    pub imports_checked: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub violations: Vec<RenderableViolation>,
    pub data: RenderableData,
}

impl RenderableReport {
    /// Violations grouped by file (in path order), each group sorted by line then column.
    pub fn by_file(&self) -> Vec<(&str, Vec<&RenderableViolation>)> {
        let mut grouped: std::collections::BTreeMap<&str, Vec<&RenderableViolation>> =
            std::collections::BTreeMap::new();
        for v in &self.violations {
            grouped.entry(v.path.as_str()).or_default().push(v);
        }
        grouped
            .into_iter()
            .map(|(path, mut group)| {
                group.sort_by_key(|v| (v.line, v.column));
                (path, group)
            })
            .collect()
    }
}
