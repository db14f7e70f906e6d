//! Hierarchical policy resolution.

use crate::model::{AppliedPatternRule, DeclaredPolicy, ResolvedRule, RulesByDirectory};
use crate::paths::normalize;
use crate::pattern::{PatternMatch, PatternSource, collect_pattern_sources, find_matching_patterns};
use crate::policy::{
    MergeStrategy, PatternRuleConfig, Policy, ScopeApply, merge_imports,
    merge_two_configs,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;

/// Resolve every rule-owning directory.
///
/// Directory patterns still apply to owning directories they match, but directories
/// without a rule file never get a synthetic rule.
pub fn resolve_rules(rules: &RulesByDirectory) -> Vec<ResolvedRule> {
    resolve_rules_with_patterns(rules, &[])
}

/// Resolve every rule-owning directory plus each directory in `all_directories`
/// matched by at least one directory pattern.
///
/// Output is sorted by directory.
pub fn resolve_rules_with_patterns(
    rules: &RulesByDirectory,
    all_directories: &[Utf8PathBuf],
) -> Vec<ResolvedRule> {
    let sources = collect_pattern_sources(rules);

    let mut working: BTreeSet<Utf8PathBuf> = rules.keys().cloned().collect();
    if !sources.is_empty() {
        working.extend(all_directories.iter().map(|d| normalize(d)));
    }

    working
        .iter()
        .filter_map(|dir| resolve_directory(dir, rules, &sources))
        .collect()
}

fn resolve_directory(
    dir: &Utf8Path,
    rules: &RulesByDirectory,
    sources: &[PatternSource],
) -> Option<ResolvedRule> {
    let own = rules.get(dir);
    let matches = find_matching_patterns(dir, sources);
    if own.is_none() && matches.is_empty() {
        return None;
    }

    let version = match own {
        Some(declared) => declared.policy.version,
        None => matches
            .iter()
            .max_by_key(|m| m.source_dir.components().count())
            .map(|m| m.source_version)
            .unwrap_or(1),
    };

    let inherited = ancestors(dir, rules)
        .into_iter()
        .fold(Policy::new(version), |acc, declared| {
            merge_two_configs(&acc, &declared.policy)
        });
    let local = match own {
        Some(declared) => merge_two_configs(&inherited, &declared.policy),
        None => inherited,
    };

    // Lowest precedence first so higher-ranked fragments land on top.
    let pattern_policy = matches
        .iter()
        .rev()
        .fold(Policy::new(version), |acc, m| apply_pattern_rule(&acc, &m.config));
    let config = merge_two_configs(&pattern_policy, &local);

    let applied_pattern_rules: Vec<AppliedPatternRule> =
        matches.iter().rev().map(applied_from_match).collect();

    let rule_file_path = match (own, matches.first()) {
        (Some(declared), _) => declared.rule_file_path.clone(),
        (None, Some(top)) => top.source_file.clone(),
        (None, None) => return None,
    };

    tracing::debug!(
        directory = %dir,
        rule_file = %rule_file_path,
        patterns = applied_pattern_rules.len(),
        synthetic = own.is_none(),
        "resolved directory policy"
    );

    Some(ResolvedRule {
        directory: dir.to_path_buf(),
        rule_file_path,
        exclude_patterns: config.exclude().to_vec(),
        config,
        applied_pattern_rules,
    })
}

/// Rule-owning strict ancestors of `dir` whose scope reaches descendants, root first.
fn ancestors<'a>(dir: &Utf8Path, rules: &'a RulesByDirectory) -> Vec<&'a DeclaredPolicy> {
    let mut found: Vec<(&Utf8PathBuf, &DeclaredPolicy)> = rules
        .iter()
        .filter(|(candidate, declared)| {
            candidate.as_path() != dir
                && dir.starts_with(candidate)
                && declared.policy.scope_apply() == ScopeApply::Descendants
        })
        .collect();
    found.sort_by_key(|(candidate, _)| candidate.components().count());
    found.into_iter().map(|(_, declared)| declared).collect()
}

/// Fold one pattern fragment onto `base`.
///
/// `Merge` concatenates allow/deny and takes the fragment's description and mode when set.
/// `Override` replaces imports wholesale, with empty lists when the fragment has none.
pub fn apply_pattern_rule(base: &Policy, fragment: &PatternRuleConfig) -> Policy {
    let imports = match fragment.merge_strategy {
        MergeStrategy::Merge => merge_imports(base.imports.as_ref(), fragment.imports.as_ref()),
        MergeStrategy::Override => Some(fragment.imports.clone().unwrap_or_default()),
    };

    Policy {
        version: base.version,
        description: fragment
            .description
            .clone()
            .or_else(|| base.description.clone()),
        scope: base.scope.clone(),
        imports,
        directory_patterns: Vec::new(),
    }
}

fn applied_from_match(m: &PatternMatch) -> AppliedPatternRule {
    AppliedPatternRule {
        pattern: m.pattern.clone(),
        source_directory: m.source_dir.clone(),
        source_file: m.source_file.clone(),
        priority: m.priority,
        merge_strategy: m.config.merge_strategy,
    }
}
