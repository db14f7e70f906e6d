//! Stable identifiers for rules and violation codes.
//!
//! `rule` is the tag carried by every violation. `code` is a short snake_case discriminator.

// Rules
pub const RULE_IMPORT_BOUNDARY: &str = "import-boundary";

// Codes: import-boundary
pub const CODE_DENIED_IMPORT: &str = "denied_import";
pub const CODE_NOT_IN_ALLOW_LIST: &str = "not_in_allow_list";
