//! Directory pattern matching for `directory_patterns`.

use crate::glob::glob_match;
use crate::model::RulesByDirectory;
use crate::paths::{escapes_base, relative_path};
use crate::policy::{PatternRule, PatternRuleConfig};
use camino::{Utf8Path, Utf8PathBuf};
use std::cmp::Reverse;

/// A directory whose policy declares `directory_patterns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSource {
    pub source_dir: Utf8PathBuf,
    pub source_file: Utf8PathBuf,
    /// Version of the declaring policy.
    pub version: u32,
    pub patterns: Vec<PatternRule>,
}

/// One pattern rule that matched a target directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: String,
    pub config: PatternRuleConfig,
    pub priority: i32,
    pub source_dir: Utf8PathBuf,
    pub source_file: Utf8PathBuf,
    pub source_version: u32,
    pub specificity: i32,
}

/// Whether `target_dir` is a strict descendant of `source_dir` matched by `pattern`.
pub fn match_directory_pattern(target_dir: &Utf8Path, pattern: &str, source_dir: &Utf8Path) -> bool {
    let relative = relative_path(source_dir, target_dir);
    if relative.is_empty() || escapes_base(&relative) {
        return false;
    }
    glob_match(&relative, pattern)
}

/// Higher is more specific.
///
/// Per `/` segment: literal 10, partial wildcard 8, `*` 5, `**` 1.
pub fn calculate_specificity(pattern: &str) -> i32 {
    pattern
        .split('/')
        .map(|segment| match segment {
            "**" => 1,
            "*" => 5,
            s if s.contains('*') => 8,
            _ => 10,
        })
        .sum()
}

/// Every pattern from `sources` that matches `target_dir`.
///
/// Sorted by priority, then specificity, then source depth, all descending.
/// The last key makes the nearest declaring directory win remaining ties.
pub fn find_matching_patterns(target_dir: &Utf8Path, sources: &[PatternSource]) -> Vec<PatternMatch> {
    let mut matches: Vec<PatternMatch> = sources
        .iter()
        .flat_map(|source| {
            source
                .patterns
                .iter()
                .filter(|rule| match_directory_pattern(target_dir, &rule.pattern, &source.source_dir))
                .map(|rule| PatternMatch {
                    pattern: rule.pattern.clone(),
                    config: rule.config.clone(),
                    priority: rule.priority,
                    source_dir: source.source_dir.clone(),
                    source_file: source.source_file.clone(),
                    source_version: source.version,
                    specificity: calculate_specificity(&rule.pattern),
                })
        })
        .collect();

    matches.sort_by_key(|m| {
        (
            Reverse(m.priority),
            Reverse(m.specificity),
            Reverse(m.source_dir.components().count()),
        )
    });
    matches
}

/// Directories whose policy declares at least one directory pattern.
pub fn collect_pattern_sources(rules: &RulesByDirectory) -> Vec<PatternSource> {
    rules
        .iter()
        .filter(|(_, declared)| !declared.policy.directory_patterns.is_empty())
        .map(|(dir, declared)| PatternSource {
            source_dir: dir.clone(),
            source_file: declared.rule_file_path.clone(),
            version: declared.policy.version,
            patterns: declared.policy.directory_patterns.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{declared, pattern_rule, policy};
    use std::collections::BTreeMap;

    fn source(dir: &str, patterns: Vec<PatternRule>) -> PatternSource {
        PatternSource {
            source_dir: Utf8PathBuf::from(dir),
            source_file: Utf8PathBuf::from(format!("{dir}/.zonefence.toml")),
            version: 1,
            patterns,
        }
    }

    #[test]
    fn matches_descendants_only() {
        let src = Utf8Path::new("/root/pages");
        assert!(match_directory_pattern(
            Utf8Path::new("/root/pages/home/containers"),
            "**/containers",
            src
        ));
        assert!(match_directory_pattern(
            Utf8Path::new("/root/pages/containers"),
            "**/containers",
            src
        ));
        assert!(!match_directory_pattern(
            Utf8Path::new("/root/api/containers"),
            "**/containers",
            src
        ));
        assert!(!match_directory_pattern(src, "**", src));
    }

    #[test]
    fn single_star_is_one_level() {
        let src = Utf8Path::new("/root/features");
        assert!(match_directory_pattern(
            Utf8Path::new("/root/features/auth"),
            "*",
            src
        ));
        assert!(!match_directory_pattern(
            Utf8Path::new("/root/features/auth/ui"),
            "*",
            src
        ));
    }

    #[test]
    fn hidden_directories_need_dot_pattern() {
        let src = Utf8Path::new("/root");
        assert!(!match_directory_pattern(
            Utf8Path::new("/root/.cache/containers"),
            "**/containers",
            src
        ));
    }

    #[test]
    fn specificity_ranks_literals_highest() {
        assert_eq!(calculate_specificity("home/containers"), 20);
        assert_eq!(calculate_specificity("**/containers"), 11);
        assert_eq!(calculate_specificity("*/containers"), 15);
        assert_eq!(calculate_specificity("containers*"), 8);
        assert_eq!(calculate_specificity("**"), 1);
        assert!(calculate_specificity("home/containers") > calculate_specificity("*/containers"));
        assert!(calculate_specificity("*/containers") > calculate_specificity("**/containers"));
    }

    #[test]
    fn sorts_by_priority_then_specificity() {
        let sources = vec![source(
            "/root/pages",
            vec![
                pattern_rule("**/containers", 0),
                pattern_rule("home/containers", 0),
                pattern_rule("*/containers", 10),
            ],
        )];

        let matches = find_matching_patterns(Utf8Path::new("/root/pages/home/containers"), &sources);
        let order: Vec<_> = matches.iter().map(|m| m.pattern.as_str()).collect();
        assert_eq!(order, vec!["*/containers", "home/containers", "**/containers"]);
    }

    #[test]
    fn single_star_beats_globstar_at_equal_priority() {
        for patterns in [["**/containers", "*/containers"], ["*/containers", "**/containers"]] {
            let sources = vec![source(
                "/root/pages",
                patterns.iter().map(|p| pattern_rule(p, 0)).collect(),
            )];

            let matches =
                find_matching_patterns(Utf8Path::new("/root/pages/home/containers"), &sources);
            let order: Vec<_> = matches.iter().map(|m| m.pattern.as_str()).collect();
            assert_eq!(order, vec!["*/containers", "**/containers"]);
        }
    }

    #[test]
    fn nearest_source_wins_full_ties() {
        let sources = vec![
            source("/root", vec![pattern_rule("**/containers", 0)]),
            source("/root/pages", vec![pattern_rule("**/containers", 0)]),
        ];
        let matches = find_matching_patterns(Utf8Path::new("/root/pages/home/containers"), &sources);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].source_dir, "/root/pages");
    }

    #[test]
    fn collects_only_directories_with_patterns() {
        let mut with_patterns = policy(1);
        with_patterns.directory_patterns = vec![pattern_rule("**/containers", 0)];
        let rules: RulesByDirectory = BTreeMap::from([
            declared("/root", policy(1)),
            declared("/root/pages", with_patterns),
        ]);

        let sources = collect_pattern_sources(&rules);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].source_dir, "/root/pages");
        assert_eq!(sources[0].source_file, "/root/pages/.zonefence.toml");
    }
}
