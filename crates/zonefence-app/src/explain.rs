//! The `explain` use case: documentation for the import-boundary rule and its codes.
//!
//! Identifiers are matched loosely: case is ignored and `-`/`_` are interchangeable,
//! so `denied-import` and `IMPORT_BOUNDARY` both resolve.

use std::fmt::Write as _;
use zonefence_types::explain::{self, Explanation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Appears in the `rule` field of a violation.
    Rule,
    /// Appears in the `code` field of a violation.
    Code,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        /// Canonical spelling, as it appears in reports.
        identifier: &'static str,
        kind: IdentifierKind,
        explanation: Explanation,
    },
    NotFound {
        identifier: String,
        did_you_mean: Option<&'static str>,
    },
}

fn known_identifiers() -> impl Iterator<Item = (&'static str, IdentifierKind)> {
    let rules = explain::all_rule_ids()
        .iter()
        .map(|id| (*id, IdentifierKind::Rule));
    let codes = explain::all_codes()
        .iter()
        .map(|code| (*code, IdentifierKind::Code));
    rules.chain(codes)
}

fn canonical(identifier: &str) -> String {
    identifier.trim().to_ascii_lowercase().replace('-', "_")
}

/// Look up an explanation for a rule id or violation code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let wanted = canonical(identifier);

    let found = known_identifiers()
        .find(|(known, _)| canonical(known) == wanted)
        .and_then(|(known, kind)| {
            explain::lookup_explanation(known).map(|explanation| ExplainOutput::Found {
                identifier: known,
                kind,
                explanation,
            })
        });

    found.unwrap_or_else(|| ExplainOutput::NotFound {
        identifier: identifier.to_string(),
        did_you_mean: (!wanted.is_empty())
            .then(|| {
                known_identifiers()
                    .map(|(known, _)| known)
                    .find(|known| canonical(known).contains(&wanted))
            })
            .flatten(),
    })
}

/// Render an explain result for the terminal.
///
/// A found entry goes to stdout; an unknown identifier is meant for stderr and
/// lists what can be explained.
pub fn format_explain(output: &ExplainOutput) -> String {
    match output {
        ExplainOutput::Found {
            identifier,
            kind,
            explanation,
        } => format_found(identifier, *kind, explanation),
        ExplainOutput::NotFound {
            identifier,
            did_you_mean,
        } => format_not_found(identifier, *did_you_mean),
    }
}

fn format_found(identifier: &str, kind: IdentifierKind, exp: &Explanation) -> String {
    let heading = format!("{} ({identifier})", exp.title);
    let kind_line = match kind {
        IdentifierKind::Rule => "Rule reported in the `rule` field of each violation.".to_string(),
        IdentifierKind::Code => format!(
            "Violation code of the `{}` rule.",
            explain::all_rule_ids().join("`, `")
        ),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "=".repeat(heading.chars().count()));
    let _ = writeln!(out, "{kind_line}\n");
    let _ = writeln!(out, "{}\n", exp.description);
    let _ = writeln!(out, "Remediation\n-----------\n{}\n", exp.remediation);
    let _ = writeln!(out, "Reported by this .zonefence.toml:");
    let _ = writeln!(out, "```toml\n{}\n```\n", exp.examples.before);
    let _ = writeln!(out, "Passes with:");
    let _ = writeln!(out, "```toml\n{}\n```", exp.examples.after);
    out
}

fn format_not_found(identifier: &str, did_you_mean: Option<&str>) -> String {
    let mut out = format!("Unknown rule or code: {identifier}\n");
    if let Some(suggestion) = did_you_mean {
        let _ = writeln!(out, "Did you mean `{suggestion}`?");
    }

    let width = known_identifiers()
        .map(|(known, _)| known.len())
        .max()
        .unwrap_or(0);
    for (label, wanted_kind) in [("Rules", IdentifierKind::Rule), ("Codes", IdentifierKind::Code)] {
        let _ = writeln!(out, "\n{label}:");
        let listed = known_identifiers()
            .filter(|(_, kind)| *kind == wanted_kind)
            .map(|(known, _)| known);
        for known in listed {
            let title = explain::lookup_explanation(known)
                .map(|exp| exp.title)
                .unwrap_or_default();
            let _ = writeln!(out, "  {known:<width$}  {title}");
        }
    }
    out
}
