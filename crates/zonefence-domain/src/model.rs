use crate::policy::{MergeStrategy, Policy};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::collections::BTreeMap;

/// One import statement found in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportEdge {
    /// Absolute, normalized path of the importing file.
    pub source_file: Utf8PathBuf,
    /// The specifier exactly as written.
    pub module_specifier: String,
    /// Absolute path of the imported module, when it could be resolved.
    pub resolved_path: Option<Utf8PathBuf>,
    pub is_external: bool,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
}

/// A policy as declared by a rule file, keyed by its directory in [`RulesByDirectory`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredPolicy {
    pub policy: Policy,
    pub rule_file_path: Utf8PathBuf,
}

/// Absolute directory -> declared policy.
pub type RulesByDirectory = BTreeMap<Utf8PathBuf, DeclaredPolicy>;

/// tsconfig-style path aliases, e.g. `"@/*" -> ["./src/*"]`.
///
/// Targets are relative to the checked root directory.
pub type AliasMapping = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, Default)]
pub struct EvaluateOptions {
    pub alias_mapping: Option<AliasMapping>,
}

/// Provenance of a directory pattern applied during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedPatternRule {
    pub pattern: String,
    pub source_directory: Utf8PathBuf,
    pub source_file: Utf8PathBuf,
    pub priority: i32,
    pub merge_strategy: MergeStrategy,
}

/// The effective policy of one directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedRule {
    pub directory: Utf8PathBuf,
    /// The rule file that declared the most local part of this policy.
    pub rule_file_path: Utf8PathBuf,
    pub config: Policy,
    /// Accumulated `scope.exclude` patterns.
    pub exclude_patterns: Vec<String>,
    /// Applied patterns in fold order, lowest precedence first.
    pub applied_pattern_rules: Vec<AppliedPatternRule>,
}

impl ResolvedRule {
    /// Whether this rule governs `file`.
    ///
    /// Files directly inside the directory are always governed; files in nested
    /// directories only when the scope applies to descendants.
    pub fn governs(&self, file: &Utf8Path) -> bool {
        match file.parent() {
            Some(parent) if parent == self.directory.as_path() => true,
            _ => {
                self.config.scope_apply() == crate::policy::ScopeApply::Descendants
                    && file.starts_with(&self.directory)
            }
        }
    }
}

/// Resolved rules indexed by directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedRuleSet {
    rules: BTreeMap<Utf8PathBuf, ResolvedRule>,
}

impl ResolvedRuleSet {
    pub fn new(rules: impl IntoIterator<Item = ResolvedRule>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|r| (r.directory.clone(), r))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, directory: &Utf8Path) -> Option<&ResolvedRule> {
        self.rules.get(directory)
    }

    /// Rules in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedRule> {
        self.rules.values()
    }

    /// The rule of the deepest directory containing `file` that governs it.
    pub fn applicable_rule(&self, file: &Utf8Path) -> Option<&ResolvedRule> {
        file.ancestors()
            .skip(1)
            .filter_map(|dir| self.rules.get(dir))
            .find(|rule| rule.governs(file))
    }
}

impl FromIterator<ResolvedRule> for ResolvedRuleSet {
    fn from_iter<T: IntoIterator<Item = ResolvedRule>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for ResolvedRuleSet {
    type Item = ResolvedRule;
    type IntoIter = std::collections::btree_map::IntoValues<Utf8PathBuf, ResolvedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_values()
    }
}
