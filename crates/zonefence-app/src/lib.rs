//! Use case orchestration for zonefence.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;
mod rules;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, IdentifierKind, format_explain, run_explain};
pub use render::{OutputFormat, render_report};
pub use report::{parse_report_json, serialize_report, to_renderable};
pub use rules::{RuleSummary, format_rules, run_rules};
