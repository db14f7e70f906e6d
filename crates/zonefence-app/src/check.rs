//! The `check` use case: evaluate import boundaries and produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use zonefence_domain::fingerprint::fingerprint_for_violation;
use zonefence_domain::{EvaluateOptions, evaluate};
use zonefence_types::{
    RepoPath, SCHEMA_REPORT_V1, ToolMeta, Verdict, Violation, ZonefenceData, ZonefenceReport,
};

use crate::rules::resolve_tree;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Absolute directory to check.
    pub root: &'a Utf8Path,
    /// Explicit tsconfig; when absent the nearest one at or above `root` is used.
    pub tsconfig: Option<&'a Utf8Path>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ZonefenceReport,
    /// The tsconfig whose path aliases were applied, if any.
    pub tsconfig: Option<Utf8PathBuf>,
}

/// Run the check use case: load rules, resolve them, collect imports, evaluate, report.
///
/// Violation paths in the report are relative to `root`.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();
    let root = input.root;

    let rules = resolve_tree(root).context("resolve rules")?;

    let tsconfig = input
        .tsconfig
        .map(Utf8Path::to_path_buf)
        .or_else(|| zonefence_repo::find_tsconfig(root));
    let aliases = tsconfig
        .as_deref()
        .map(|path| zonefence_repo::load_alias_mapping(path, root))
        .transpose()
        .context("load path aliases")?;

    let imports =
        zonefence_repo::collect_imports(root, aliases.as_ref()).context("collect imports")?;

    let options = EvaluateOptions {
        alias_mapping: aliases,
    };
    let result = evaluate(&imports, &rules, root, &options);

    let violations: Vec<Violation> = result
        .violations
        .into_iter()
        .map(|v| relativize(v, root))
        .collect();

    tracing::info!(
        root = %root,
        rules = rules.len(),
        files = result.files_checked,
        imports = result.imports_checked,
        violations = violations.len(),
        "check finished"
    );

    let report = ZonefenceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "zonefence".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: Verdict::from_violations(&violations),
        data: ZonefenceData {
            root: root.to_string(),
            files_checked: saturating_u32(result.files_checked),
            imports_checked: saturating_u32(result.imports_checked),
            rules_resolved: saturating_u32(rules.len()),
            violations_total: saturating_u32(violations.len()),
        },
        violations,
    };

    Ok(CheckOutput { report, tsconfig })
}

/// Rewrite paths relative to `root` and attach the fingerprint.
fn relativize(mut violation: Violation, root: &Utf8Path) -> Violation {
    let source_file = RepoPath::from_absolute(root, &violation.source_file);
    let rule_file = RepoPath::from_absolute(root, &violation.rule_file_path);

    violation.fingerprint = Some(fingerprint_for_violation(
        &violation.rule,
        &violation.code,
        source_file.as_str(),
        &violation.module_specifier,
        rule_file.as_str(),
    ));
    violation.source_file = source_file.to_utf8_pathbuf();
    violation.rule_file_path = rule_file.to_utf8_pathbuf();
    violation
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map verdict to exit code: 0 = pass, 1 = violations found.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
    }
}
