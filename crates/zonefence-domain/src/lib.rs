//! Pure import boundary resolution and evaluation (no IO).
//!
//! Input: declared directory policies and import edges constructed elsewhere.
//! Output: resolved per-directory policies and boundary violations.

#![forbid(unsafe_code)]

pub mod boundary;
pub mod fingerprint;
pub mod glob;
pub mod model;
pub mod paths;
pub mod pattern;
pub mod policy;
pub mod report;
pub mod resolve;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use boundary::evaluate_import_boundary;
pub use engine::evaluate;
pub use model::{
    AliasMapping, AppliedPatternRule, DeclaredPolicy, EvaluateOptions, ImportEdge, ResolvedRule,
    ResolvedRuleSet, RulesByDirectory,
};
pub use report::EvaluationResult;
pub use resolve::{resolve_rules, resolve_rules_with_patterns};
