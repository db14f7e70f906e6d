use serde::Serialize;

/// One allow or deny entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportRule {
    /// Package name, glob, relative path or alias pattern.
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportRule {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeApply {
    /// Only files directly inside the declaring directory.
    #[serde(rename = "self")]
    SelfOnly,
    #[default]
    Descendants,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Deny wins; a non-empty allow list closes the zone.
    #[default]
    AllowFirst,
    /// Allow wins; everything not denied passes.
    DenyFirst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    #[default]
    Merge,
    Override,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<ScopeApply>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportsConfig {
    pub allow: Vec<ImportRule>,
    pub deny: Vec<ImportRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<EvaluationMode>,
}

/// Policy fragment attached to directories matched by a [`PatternRule`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PatternRuleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<ImportsConfig>,
    pub merge_strategy: MergeStrategy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternRule {
    /// Glob matched against directory paths relative to the declaring directory.
    pub pattern: String,
    pub config: PatternRuleConfig,
    /// Higher wins.
    pub priority: i32,
}

/// A directory policy, either as declared in a rule file or after resolution.
///
/// Optional scalars stay `None` when unset so inheritance can tell "not declared"
/// apart from "declared with the default value".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Policy {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<ImportsConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directory_patterns: Vec<PatternRule>,
}

impl Policy {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            description: None,
            scope: None,
            imports: None,
            directory_patterns: Vec::new(),
        }
    }

    pub fn scope_apply(&self) -> ScopeApply {
        self.scope
            .as_ref()
            .and_then(|s| s.apply)
            .unwrap_or_default()
    }

    pub fn mode(&self) -> EvaluationMode {
        self.imports
            .as_ref()
            .and_then(|i| i.mode)
            .unwrap_or_default()
    }

    pub fn allow(&self) -> &[ImportRule] {
        self.imports.as_ref().map(|i| i.allow.as_slice()).unwrap_or(&[])
    }

    pub fn deny(&self) -> &[ImportRule] {
        self.imports.as_ref().map(|i| i.deny.as_slice()).unwrap_or(&[])
    }

    pub fn exclude(&self) -> &[String] {
        self.scope.as_ref().map(|s| s.exclude.as_slice()).unwrap_or(&[])
    }
}

/// Merge `override_cfg` on top of `base`.
///
/// Lists concatenate (base first). Scalars take the override's value when it is set.
/// The result carries no `directory_patterns`; pattern provenance is tracked on the
/// resolved rule instead.
pub fn merge_two_configs(base: &Policy, override_cfg: &Policy) -> Policy {
    let scope = match (&base.scope, &override_cfg.scope) {
        (None, None) => None,
        (b, o) => {
            let mut exclude = Vec::new();
            if let Some(b) = b {
                exclude.extend(b.exclude.iter().cloned());
            }
            if let Some(o) = o {
                exclude.extend(o.exclude.iter().cloned());
            }
            Some(ScopeConfig {
                apply: o.as_ref().and_then(|s| s.apply).or(b.as_ref().and_then(|s| s.apply)),
                exclude,
            })
        }
    };

    Policy {
        version: override_cfg.version,
        description: override_cfg
            .description
            .clone()
            .or_else(|| base.description.clone()),
        scope,
        imports: merge_imports(base.imports.as_ref(), override_cfg.imports.as_ref()),
        directory_patterns: Vec::new(),
    }
}

pub(crate) fn merge_imports(
    base: Option<&ImportsConfig>,
    override_imports: Option<&ImportsConfig>,
) -> Option<ImportsConfig> {
    match (base, override_imports) {
        (None, None) => None,
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (Some(b), Some(o)) => Some(ImportsConfig {
            allow: b.allow.iter().chain(&o.allow).cloned().collect(),
            deny: b.deny.iter().chain(&o.deny).cloned().collect(),
            mode: o.mode.or(b.mode),
        }),
    }
}
