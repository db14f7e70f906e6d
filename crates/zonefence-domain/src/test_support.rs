use crate::model::{DeclaredPolicy, ImportEdge, ResolvedRule};
use crate::policy::{
    EvaluationMode, ImportRule, ImportsConfig, MergeStrategy, PatternRule, PatternRuleConfig,
    Policy, ScopeApply, ScopeConfig,
};
use camino::Utf8PathBuf;

pub fn policy(version: u32) -> Policy {
    Policy::new(version)
}

pub fn rules(froms: &[&str]) -> Vec<ImportRule> {
    froms.iter().map(|f| ImportRule::new(*f)).collect()
}

pub fn imports(allow: &[&str], deny: &[&str], mode: Option<EvaluationMode>) -> ImportsConfig {
    ImportsConfig {
        allow: rules(allow),
        deny: rules(deny),
        mode,
    }
}

pub fn policy_with_imports(allow: &[&str], deny: &[&str], mode: Option<EvaluationMode>) -> Policy {
    let mut p = Policy::new(1);
    p.imports = Some(imports(allow, deny, mode));
    p
}

pub fn scoped(mut p: Policy, apply: Option<ScopeApply>, exclude: &[&str]) -> Policy {
    p.scope = Some(ScopeConfig {
        apply,
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
    });
    p
}

pub fn described(mut p: Policy, description: &str) -> Policy {
    p.description = Some(description.to_string());
    p
}

pub fn declared(dir: &str, policy: Policy) -> (Utf8PathBuf, DeclaredPolicy) {
    (
        Utf8PathBuf::from(dir),
        DeclaredPolicy {
            policy,
            rule_file_path: Utf8PathBuf::from(format!("{dir}/.zonefence.toml")),
        },
    )
}

pub fn pattern_rule(pattern: &str, priority: i32) -> PatternRule {
    PatternRule {
        pattern: pattern.to_string(),
        config: PatternRuleConfig::default(),
        priority,
    }
}

pub fn pattern_rule_with(
    pattern: &str,
    priority: i32,
    imports: Option<ImportsConfig>,
    merge_strategy: MergeStrategy,
) -> PatternRule {
    PatternRule {
        pattern: pattern.to_string(),
        config: PatternRuleConfig {
            description: None,
            imports,
            merge_strategy,
        },
        priority,
    }
}

pub fn resolved(dir: &str, config: Policy) -> ResolvedRule {
    let exclude_patterns = config.exclude().to_vec();
    ResolvedRule {
        directory: Utf8PathBuf::from(dir),
        rule_file_path: Utf8PathBuf::from(format!("{dir}/.zonefence.toml")),
        config,
        exclude_patterns,
        applied_pattern_rules: Vec::new(),
    }
}

pub fn edge(source: &str, specifier: &str, resolved: Option<&str>, is_external: bool) -> ImportEdge {
    ImportEdge {
        source_file: Utf8PathBuf::from(source),
        module_specifier: specifier.to_string(),
        resolved_path: resolved.map(Utf8PathBuf::from),
        is_external,
        line: 1,
        column: 1,
    }
}

pub fn external(source: &str, specifier: &str) -> ImportEdge {
    edge(source, specifier, None, true)
}

pub fn internal(source: &str, specifier: &str, resolved: &str) -> ImportEdge {
    edge(source, specifier, Some(resolved), false)
}
