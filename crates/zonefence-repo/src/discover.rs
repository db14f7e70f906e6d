use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};
use zonefence_domain::{DeclaredPolicy, RulesByDirectory};
use zonefence_settings::{RULE_FILE_NAME, parse_rule_file};

/// Directory names never descended into, in addition to any dot-directory.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

pub(crate) fn is_skipped_dir(name: &str) -> bool {
    SKIPPED_DIRECTORIES.contains(&name) || name.starts_with('.')
}

/// Walk `root` in file-name order, pruning skipped directories. The root itself is always visited.
pub(crate) fn walk(root: &Utf8Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !e.file_name().to_str().is_some_and(is_skipped_dir)
        })
        .filter_map(|e| e.ok())
}

pub(crate) fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

/// Every `.zonefence.toml` under `root`, sorted by path.
pub fn discover_rule_files(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut out: Vec<Utf8PathBuf> = walk(root)
        .filter(|e| e.file_type().is_file() && e.file_name() == RULE_FILE_NAME)
        .filter_map(|e| pathbuf_to_utf8(e.into_path()))
        .collect();
    out.sort();
    out
}

/// Every directory under `root` (including `root`), sorted by path.
pub fn list_directories(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut out: Vec<Utf8PathBuf> = walk(root)
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| pathbuf_to_utf8(e.into_path()))
        .collect();
    out.sort();
    out
}

/// Read and parse every rule file under `root`, keyed by the directory that holds it.
pub fn load_rules(root: &Utf8Path) -> anyhow::Result<RulesByDirectory> {
    let mut rules = RulesByDirectory::new();

    for rule_file_path in discover_rule_files(root) {
        let text = std::fs::read_to_string(&rule_file_path)
            .with_context(|| format!("read {rule_file_path}"))?;
        let policy = parse_rule_file(&text)
            .with_context(|| format!("parse {rule_file_path}"))?
            .into_policy();

        let Some(directory) = rule_file_path.parent().map(Utf8Path::to_path_buf) else {
            continue;
        };
        tracing::debug!(directory = %directory, "loaded rule file");
        rules.insert(
            directory,
            DeclaredPolicy {
                policy,
                rule_file_path,
            },
        );
    }

    Ok(rules)
}

/// Nearest `tsconfig.json` at or above `start`.
pub fn find_tsconfig(start: &Utf8Path) -> Option<Utf8PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("tsconfig.json"))
        .find(|candidate| candidate.is_file())
}
