//! Explain registry for rules and codes.
//!
//! Maps rule tags and violation codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after rule file examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration or code that would trigger a violation.
    pub before: &'static str,
    /// Configuration or code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by rule tag or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rules
        ids::RULE_IMPORT_BOUNDARY => Some(explain_import_boundary()),

        // Codes
        ids::CODE_DENIED_IMPORT => Some(explain_denied_import()),
        ids::CODE_NOT_IN_ALLOW_LIST => Some(explain_not_in_allow_list()),

        _ => None,
    }
}

/// List all known rule tags.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[ids::RULE_IMPORT_BOUNDARY]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_DENIED_IMPORT, ids::CODE_NOT_IN_ALLOW_LIST]
}

fn explain_import_boundary() -> Explanation {
    Explanation {
        title: "Import Boundary",
        description: "\
Checks every import against the `.zonefence.toml` policy of the directory that owns the
importing file.

Policies are hierarchical:
- A rule file applies to its directory and, unless `scope.apply = \"self\"`, to every
  nested directory without a closer rule file
- Allow, deny and exclude lists accumulate from the root down to the importing directory
- `directory_patterns` attach a policy fragment to every matching descendant directory,
  even ones without their own rule file

The deepest directory with a resolved policy decides. In `allow-first` mode (the default) a
deny match always wins; in `deny-first` mode an allow match always wins.",
        remediation: "\
Either move the import so it respects the declared boundary, or change the policy:
- Add the module to `imports.allow` of the owning directory
- Remove or narrow the matching `imports.deny` entry
- Exclude generated or test files with `scope.exclude`",
        examples: ExamplePair {
            before: r#"# src/domain/.zonefence.toml
version = 1
description = "Domain must stay framework free"

[imports]
allow = ["./**"]
deny = [{ from = "react", message = "No UI code in the domain layer" }]"#,
            after: r#"# src/domain/.zonefence.toml
version = 1
description = "Domain must stay framework free"

[imports]
allow = ["./**", "zod"]
deny = [{ from = "react", message = "No UI code in the domain layer" }]"#,
        },
    }
}

fn explain_denied_import() -> Explanation {
    Explanation {
        title: "Denied Import",
        description: "\
The import matched an entry in `imports.deny` of the policy in effect.

Deny patterns understand packages (`lodash` also covers `lodash/get`, but `@babel` does not
cover `@babel/core`), globs (`@internal/*`, `lodash*`), relative paths resolved from the
importing file (`../containers/**`) and path aliases from tsconfig `paths` (`@/internal/**`).",
        remediation: "\
Import the functionality through an allowed layer instead. If the dependency is intended,
narrow or remove the deny entry in the rule file reported with the violation.",
        examples: ExamplePair {
            before: r#"[imports]
mode = "deny-first"
deny = ["axios"]"#,
            after: r#"[imports]
mode = "deny-first"
allow = [{ from = "axios", message = "Allowed for the API client only" }]
deny = ["axios"]"#,
        },
    }
}

fn explain_not_in_allow_list() -> Explanation {
    Explanation {
        title: "Not In Allow List",
        description: "\
The policy in effect declares an `imports.allow` list and the import matched none of its
entries. In `allow-first` mode a non-empty allow list turns the directory into a closed zone:
everything that is not explicitly allowed is rejected.",
        remediation: "\
Add a pattern covering the import to `imports.allow`, or move the importing file to a
directory whose policy already allows it.",
        examples: ExamplePair {
            before: r#"[imports]
allow = ["./utils/**"]"#,
            after: r#"[imports]
allow = ["./utils/**", "./db/**"]"#,
        },
    }
}
