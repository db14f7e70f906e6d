use crate::model::{
    ApplySetting, DirectoryPatternSection, ImportEntry, ImportsSection, MergeSetting, ModeSetting,
    RuleFileV1,
};
use anyhow::Context;
use globset::Glob;
use zonefence_domain::policy::{
    EvaluationMode, ImportRule, ImportsConfig, MergeStrategy, PatternRule, PatternRuleConfig,
    Policy, ScopeApply, ScopeConfig,
};

pub fn validate(file: &RuleFileV1) -> anyhow::Result<()> {
    if file.version < 1 {
        anyhow::bail!("unsupported version: {} (expected >= 1)", file.version);
    }

    if let Some(scope) = &file.scope {
        validate_globs("scope.exclude", scope.exclude.iter().map(String::as_str))?;
    }
    if let Some(imports) = &file.imports {
        validate_imports("imports", imports)?;
    }
    for (idx, dp) in file.directory_patterns.iter().enumerate() {
        validate_globs(
            &format!("directory_patterns[{idx}].pattern"),
            std::iter::once(dp.pattern.as_str()),
        )?;
        if let Some(imports) = &dp.config.imports {
            validate_imports(&format!("directory_patterns[{idx}].config.imports"), imports)?;
        }
    }
    Ok(())
}

fn validate_imports(section: &str, imports: &ImportsSection) -> anyhow::Result<()> {
    validate_globs(
        &format!("{section}.allow"),
        imports.allow.iter().map(ImportEntry::from),
    )?;
    validate_globs(
        &format!("{section}.deny"),
        imports.deny.iter().map(ImportEntry::from),
    )
}

fn validate_globs<'a>(
    field: &str,
    patterns: impl IntoIterator<Item = &'a str>,
) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid glob in {field}: {pattern}"))?;
    }
    Ok(())
}

impl RuleFileV1 {
    /// Convert into the domain policy. Unset optional settings stay unset so that
    /// inheritance can fill them in.
    pub fn into_policy(self) -> Policy {
        Policy {
            version: self.version,
            description: self.description,
            scope: self.scope.map(|s| ScopeConfig {
                apply: s.apply.map(apply_from_setting),
                exclude: s.exclude,
            }),
            imports: self.imports.map(imports_from_section),
            directory_patterns: self
                .directory_patterns
                .into_iter()
                .map(pattern_from_section)
                .collect(),
        }
    }
}

fn apply_from_setting(v: ApplySetting) -> ScopeApply {
    match v {
        ApplySetting::SelfOnly => ScopeApply::SelfOnly,
        ApplySetting::Descendants => ScopeApply::Descendants,
    }
}

fn mode_from_setting(v: ModeSetting) -> EvaluationMode {
    match v {
        ModeSetting::AllowFirst => EvaluationMode::AllowFirst,
        ModeSetting::DenyFirst => EvaluationMode::DenyFirst,
    }
}

fn merge_from_setting(v: Option<MergeSetting>) -> MergeStrategy {
    match v {
        None | Some(MergeSetting::Merge) => MergeStrategy::Merge,
        Some(MergeSetting::Override) => MergeStrategy::Override,
    }
}

fn imports_from_section(section: ImportsSection) -> ImportsConfig {
    ImportsConfig {
        allow: section.allow.into_iter().map(rule_from_entry).collect(),
        deny: section.deny.into_iter().map(rule_from_entry).collect(),
        mode: section.mode.map(mode_from_setting),
    }
}

fn rule_from_entry(entry: ImportEntry) -> ImportRule {
    match entry {
        ImportEntry::Pattern(from) => ImportRule::new(from),
        ImportEntry::Detailed { from, message } => ImportRule { from, message },
    }
}

fn pattern_from_section(section: DirectoryPatternSection) -> PatternRule {
    PatternRule {
        pattern: section.pattern,
        config: PatternRuleConfig {
            description: section.config.description,
            imports: section.config.imports.map(imports_from_section),
            merge_strategy: merge_from_setting(section.config.merge_strategy),
        },
        priority: section.priority,
    }
}
