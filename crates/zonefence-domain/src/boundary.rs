//! Per-import boundary evaluation.

use crate::glob::{glob_match, is_glob};
use crate::model::{AliasMapping, EvaluateOptions, ImportEdge, ResolvedRule, ResolvedRuleSet};
use crate::paths::{relative_path, resolve};
use crate::policy::{EvaluationMode, ImportRule};
use camino::Utf8Path;
use zonefence_types::{Violation, ids};

/// Evaluate one import against the policy of its source file.
///
/// Returns `None` when the import is permitted.
pub fn evaluate_import_boundary(
    edge: &ImportEdge,
    rules: &ResolvedRuleSet,
    root_dir: &Utf8Path,
    options: &EvaluateOptions,
) -> Option<Violation> {
    let rule = rules.applicable_rule(&edge.source_file)?;

    if is_excluded(&edge.source_file, rule, root_dir) {
        return None;
    }

    let imports = rule.config.imports.as_ref()?;
    let target = MatchTarget {
        path_to_match: path_to_match(edge, root_dir),
        module_specifier: &edge.module_specifier,
        source_file: &edge.source_file,
        root_dir,
        is_external: edge.is_external,
        aliases: options.alias_mapping.as_ref(),
    };

    let violation = match rule.config.mode() {
        EvaluationMode::AllowFirst => {
            if let Some(denied) = target.find_match(&imports.deny) {
                Some(violation(edge, rule, ids::CODE_DENIED_IMPORT, Some(denied), None))
            } else if !imports.allow.is_empty() && target.find_match(&imports.allow).is_none() {
                let message = format!(
                    "Import from \"{}\" is not in the allow list",
                    edge.module_specifier
                );
                Some(violation(
                    edge,
                    rule,
                    ids::CODE_NOT_IN_ALLOW_LIST,
                    None,
                    Some(message),
                ))
            } else {
                None
            }
        }
        EvaluationMode::DenyFirst => {
            if target.find_match(&imports.allow).is_some() {
                None
            } else {
                target
                    .find_match(&imports.deny)
                    .map(|denied| violation(edge, rule, ids::CODE_DENIED_IMPORT, Some(denied), None))
            }
        }
    };

    if let Some(v) = &violation {
        tracing::debug!(
            source = %edge.source_file,
            specifier = %edge.module_specifier,
            code = %v.code,
            rule_file = %rule.rule_file_path,
            "import boundary violation"
        );
    }
    violation
}

/// Whether `pattern` matches `path_to_match` in the context of one import.
pub fn matches_pattern(
    path_to_match: &str,
    pattern: &str,
    source_file: &Utf8Path,
    root_dir: &Utf8Path,
    is_external: bool,
    aliases: Option<&AliasMapping>,
) -> bool {
    if pattern.starts_with("./") || pattern.starts_with("../") {
        let source_dir = source_file.parent().unwrap_or(root_dir);
        let absolute = resolve(root_dir, path_to_match);
        let mut relative = relative_path(source_dir, &absolute);
        if !relative.starts_with("..") {
            relative = format!("./{relative}");
        }
        return glob_match(&relative, pattern);
    }

    expand_aliases(pattern, aliases).iter().any(|candidate| {
        if is_glob(candidate) {
            (is_external && glob_match(package_name(path_to_match), candidate))
                || glob_match(path_to_match, candidate)
        } else {
            let candidate_package = package_name(candidate);
            package_name(path_to_match) == candidate_package
                && (candidate == candidate_package
                    || path_to_match == candidate
                    || path_to_match
                        .strip_prefix(candidate.as_str())
                        .is_some_and(|rest| rest.starts_with('/')))
        }
    })
}

/// `pattern` plus one rewrite per alias target whose alias prefix starts the pattern.
///
/// With `"@/*" -> ["./src/*"]`, `@/api/**` also yields `src/api/**`.
pub fn expand_aliases(pattern: &str, aliases: Option<&AliasMapping>) -> Vec<String> {
    let mut out = vec![pattern.to_string()];
    let Some(aliases) = aliases else {
        return out;
    };

    for (alias, targets) in aliases {
        let alias_base = alias.strip_suffix('*').unwrap_or(alias);
        let Some(remainder) = pattern.strip_prefix(alias_base) else {
            continue;
        };
        for target in targets {
            let target = target.strip_prefix("./").unwrap_or(target);
            let target_base = target.strip_suffix('*').unwrap_or(target);
            out.push(format!("{target_base}{remainder}"));
        }
    }
    out
}

/// `@scope/name/sub` -> `@scope/name`, `name/sub` -> `name`.
pub fn package_name(specifier: &str) -> &str {
    if specifier.starts_with('@') {
        match specifier.match_indices('/').nth(1) {
            Some((idx, _)) => &specifier[..idx],
            None => specifier,
        }
    } else {
        match specifier.find('/') {
            Some(idx) => &specifier[..idx],
            None => specifier,
        }
    }
}

struct MatchTarget<'a> {
    path_to_match: String,
    module_specifier: &'a str,
    source_file: &'a Utf8Path,
    root_dir: &'a Utf8Path,
    is_external: bool,
    aliases: Option<&'a AliasMapping>,
}

impl MatchTarget<'_> {
    /// First rule matching the path to match, or failing that the raw specifier.
    fn find_match<'r>(&self, rules: &'r [ImportRule]) -> Option<&'r ImportRule> {
        rules.iter().find(|rule| {
            self.matches(&self.path_to_match, &rule.from)
                || (self.path_to_match != self.module_specifier
                    && self.matches(self.module_specifier, &rule.from))
        })
    }

    fn matches(&self, path: &str, pattern: &str) -> bool {
        matches_pattern(
            path,
            pattern,
            self.source_file,
            self.root_dir,
            self.is_external,
            self.aliases,
        )
    }
}

fn path_to_match(edge: &ImportEdge, root_dir: &Utf8Path) -> String {
    match (&edge.resolved_path, edge.is_external) {
        (Some(resolved), false) => relative_path(root_dir, resolved),
        _ => edge.module_specifier.clone(),
    }
}

fn is_excluded(source_file: &Utf8Path, rule: &ResolvedRule, root_dir: &Utf8Path) -> bool {
    if rule.exclude_patterns.is_empty() {
        return false;
    }
    let relative = relative_path(root_dir, source_file);
    let file_name = source_file.file_name().unwrap_or_default();
    rule.exclude_patterns
        .iter()
        .any(|p| glob_match(&relative, p) || glob_match(file_name, p))
}

fn violation(
    edge: &ImportEdge,
    rule: &ResolvedRule,
    code: &str,
    matched: Option<&ImportRule>,
    fallback: Option<String>,
) -> Violation {
    let message = matched
        .and_then(|m| m.message.clone())
        .or(fallback)
        .unwrap_or_else(|| format!("Import from \"{}\" is not allowed", edge.module_specifier));

    Violation {
        source_file: edge.source_file.clone(),
        module_specifier: edge.module_specifier.clone(),
        line: edge.line,
        column: edge.column,
        rule: ids::RULE_IMPORT_BOUNDARY.to_string(),
        code: code.to_string(),
        message,
        rule_file_path: rule.rule_file_path.clone(),
        design_intent: rule.config.description.clone(),
        suggestion: None,
        matched_pattern: matched.map(|m| m.from.clone()),
        fingerprint: None,
    }
}
