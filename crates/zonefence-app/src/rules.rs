//! The `rules` use case: show the effective policy of every directory.

use anyhow::Context;
use camino::Utf8Path;
use serde::Serialize;
use zonefence_domain::policy::{EvaluationMode, MergeStrategy, ScopeApply};
use zonefence_domain::{ResolvedRule, ResolvedRuleSet, resolve_rules_with_patterns};
use zonefence_types::RepoPath;

/// Load every rule file under `root` and resolve inheritance and directory patterns.
pub(crate) fn resolve_tree(root: &Utf8Path) -> anyhow::Result<ResolvedRuleSet> {
    let declared = zonefence_repo::load_rules(root).context("load rule files")?;
    let directories = zonefence_repo::list_directories(root);
    Ok(ResolvedRuleSet::new(resolve_rules_with_patterns(
        &declared,
        &directories,
    )))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedPatternSummary {
    pub pattern: String,
    pub source_file: RepoPath,
    pub priority: i32,
    pub merge_strategy: MergeStrategy,
}

/// The effective policy of one directory, with root-relative paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub directory: RepoPath,
    pub rule_file: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scope: ScopeApply,
    pub mode: EvaluationMode,
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub exclude: Vec<String>,
    /// Lowest precedence first.
    pub applied_patterns: Vec<AppliedPatternSummary>,
}

impl RuleSummary {
    fn from_resolved(rule: &ResolvedRule, root: &Utf8Path) -> Self {
        let config = &rule.config;
        Self {
            directory: RepoPath::from_absolute(root, &rule.directory),
            rule_file: RepoPath::from_absolute(root, &rule.rule_file_path),
            description: config.description.clone(),
            scope: config.scope_apply(),
            mode: config.mode(),
            allow: config.allow().iter().map(|r| r.from.clone()).collect(),
            deny: config.deny().iter().map(|r| r.from.clone()).collect(),
            exclude: rule.exclude_patterns.clone(),
            applied_patterns: rule
                .applied_pattern_rules
                .iter()
                .map(|a| AppliedPatternSummary {
                    pattern: a.pattern.clone(),
                    source_file: RepoPath::from_absolute(root, &a.source_file),
                    priority: a.priority,
                    merge_strategy: a.merge_strategy,
                })
                .collect(),
        }
    }
}

/// Resolve the rules under `root`, ordered by directory.
pub fn run_rules(root: &Utf8Path) -> anyhow::Result<Vec<RuleSummary>> {
    let rules = resolve_tree(root)?;
    tracing::info!(root = %root, rules = rules.len(), "resolved rules");
    Ok(rules
        .iter()
        .map(|rule| RuleSummary::from_resolved(rule, root))
        .collect())
}

/// Format resolved rules for terminal display.
pub fn format_rules(rules: &[RuleSummary]) -> String {
    if rules.is_empty() {
        return "No rule files found.\n".to_string();
    }

    let mut out = String::new();
    for rule in rules {
        out.push_str(&format!("{}\n", rule.directory));
        out.push_str(&format!("  rule file: {}\n", rule.rule_file));
        if let Some(description) = &rule.description {
            out.push_str(&format!("  description: {}\n", description));
        }
        let scope = match rule.scope {
            ScopeApply::SelfOnly => "self",
            ScopeApply::Descendants => "descendants",
        };
        let mode = match rule.mode {
            EvaluationMode::AllowFirst => "allow-first",
            EvaluationMode::DenyFirst => "deny-first",
        };
        out.push_str(&format!("  scope: {scope}, mode: {mode}\n"));
        push_list(&mut out, "allow", &rule.allow);
        push_list(&mut out, "deny", &rule.deny);
        push_list(&mut out, "exclude", &rule.exclude);
        for applied in &rule.applied_patterns {
            let strategy = match applied.merge_strategy {
                MergeStrategy::Merge => "merge",
                MergeStrategy::Override => "override",
            };
            out.push_str(&format!(
                "  pattern: {} (priority {}, {}) from {}\n",
                applied.pattern, applied.priority, strategy, applied.source_file
            ));
        }
        out.push('\n');
    }
    out
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        out.push_str(&format!("  {label}: {}\n", items.join(", ")));
    }
}
