//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Pattern specificity ordering and directory scoping
//! - Allow/deny precedence per evaluation mode
//! - Package name matching
//! - Policy merging and aggregation counters

use crate::boundary::evaluate_import_boundary;
use crate::engine::evaluate;
use crate::model::{EvaluateOptions, ResolvedRuleSet};
use crate::pattern::{calculate_specificity, match_directory_pattern};
use crate::policy::{EvaluationMode, merge_two_configs};
use crate::test_support::*;
use camino::{Utf8Path, Utf8PathBuf};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Plain package names like `lodash` or `react-dom`.
fn arb_package() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

/// Optional `@scope/` prefix plus a package name.
fn arb_maybe_scoped_package() -> impl Strategy<Value = String> {
    (proptest::option::of(arb_package()), arb_package()).prop_map(|(scope, name)| match scope {
        Some(scope) => format!("@{scope}/{name}"),
        None => name,
    })
}

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
}

fn arb_relative_dir() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..5).prop_map(|segs| segs.join("/"))
}

/// Pattern segments drawn from every specificity class.
fn arb_pattern_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("**".to_string()),
        Just("*".to_string()),
        arb_segment().prop_map(|s| format!("{s}*")),
        arb_segment(),
    ]
}

fn arb_mode() -> impl Strategy<Value = EvaluationMode> {
    prop_oneof![Just(EvaluationMode::AllowFirst), Just(EvaluationMode::DenyFirst)]
}

const ROOT: &str = "/project";
const SOURCE: &str = "/project/src/index.ts";

fn rules_for(allow: &[&str], deny: &[&str], mode: EvaluationMode) -> ResolvedRuleSet {
    ResolvedRuleSet::new(vec![resolved(
        "/project/src",
        policy_with_imports(allow, deny, Some(mode)),
    )])
}

fn permitted(specifier: &str, rules: &ResolvedRuleSet) -> bool {
    evaluate_import_boundary(
        &external(SOURCE, specifier),
        rules,
        Utf8Path::new(ROOT),
        &EvaluateOptions::default(),
    )
    .is_none()
}

// ============================================================================
// Pattern matcher
// ============================================================================

proptest! {
    #[test]
    fn specificity_ranks_segment_kinds(prefix in prop::collection::vec(arb_pattern_segment(), 0..4), literal in arb_segment()) {
        let join = |last: &str| {
            let mut segs = prefix.clone();
            segs.push(last.to_string());
            segs.join("/")
        };
        let literal_score = calculate_specificity(&join(&literal));
        let partial_score = calculate_specificity(&join(&format!("{literal}*")));
        let star_score = calculate_specificity(&join("*"));
        let globstar_score = calculate_specificity(&join("**"));

        prop_assert!(literal_score > partial_score);
        prop_assert!(partial_score > star_score);
        prop_assert!(star_score > globstar_score);
    }

    #[test]
    fn directory_patterns_never_leave_their_source(rel in arb_relative_dir(), other in arb_segment()) {
        let source = Utf8PathBuf::from("/repo/pages");
        let inside = source.join(&rel);
        let outside = Utf8PathBuf::from(format!("/repo/{other}x/{rel}"));

        prop_assert!(match_directory_pattern(&inside, "**", &source));
        prop_assert!(!match_directory_pattern(&outside, "**", &source));
        prop_assert!(!match_directory_pattern(&source, "**", &source));
    }
}

// ============================================================================
// Boundary evaluator
// ============================================================================

proptest! {
    #[test]
    fn allow_first_deny_always_wins(pkg in arb_maybe_scoped_package()) {
        let rules = rules_for(&[pkg.as_str()], &[pkg.as_str()], EvaluationMode::AllowFirst);
        prop_assert!(!permitted(&pkg, &rules));
    }

    #[test]
    fn deny_first_allow_always_wins(pkg in arb_maybe_scoped_package()) {
        let rules = rules_for(&[pkg.as_str()], &[pkg.as_str()], EvaluationMode::DenyFirst);
        prop_assert!(permitted(&pkg, &rules));
    }

    #[test]
    fn package_names_match_exactly(pkg in arb_maybe_scoped_package(), suffix in "[a-z-]{1,6}", mode in arb_mode()) {
        let lookalike = format!("{pkg}{suffix}");
        let rules = rules_for(&[], &[pkg.as_str()], mode);
        prop_assert!(!permitted(&pkg, &rules));
        prop_assert!(permitted(&lookalike, &rules));
    }

    #[test]
    fn subpaths_inherit_package_rules(pkg in arb_maybe_scoped_package(), sub in arb_relative_dir()) {
        let rules = rules_for(&[pkg.as_str()], &[], EvaluationMode::AllowFirst);
        let subpath = format!("{pkg}/{sub}");
        prop_assert!(permitted(&subpath, &rules));
    }
}

// ============================================================================
// Resolver and aggregator
// ============================================================================

proptest! {
    #[test]
    fn merge_concatenates_without_dedup(
        base_allow in prop::collection::vec(arb_package(), 0..5),
        child_allow in prop::collection::vec(arb_package(), 0..5),
    ) {
        let base_refs: Vec<&str> = base_allow.iter().map(String::as_str).collect();
        let child_refs: Vec<&str> = child_allow.iter().map(String::as_str).collect();
        let merged = merge_two_configs(
            &policy_with_imports(&base_refs, &[], None),
            &policy_with_imports(&child_refs, &[], None),
        );

        let froms: Vec<&str> = merged.allow().iter().map(|r| r.from.as_str()).collect();
        let expected: Vec<&str> = base_refs.iter().chain(&child_refs).copied().collect();
        prop_assert_eq!(froms, expected);
    }

    #[test]
    fn aggregator_counts_every_import(
        files in prop::collection::vec(arb_segment(), 1..6),
        specs in prop::collection::vec(arb_package(), 1..10),
    ) {
        let imports: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| external(&format!("/project/src/{}.ts", files[i % files.len()]), spec))
            .collect();
        let rules = rules_for(&[], &[], EvaluationMode::AllowFirst);

        let result = evaluate(&imports, &rules, Utf8Path::new(ROOT), &EvaluateOptions::default());

        let distinct: std::collections::BTreeSet<_> = imports.iter().map(|e| &e.source_file).collect();
        prop_assert_eq!(result.imports_checked, imports.len());
        prop_assert_eq!(result.files_checked, distinct.len());
        prop_assert!(result.violations.is_empty());
    }
}
