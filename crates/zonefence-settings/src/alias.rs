//! tsconfig `compilerOptions.paths` parsing.
//!
//! A tsconfig may `extend` others. Each file is parsed into a [`TsConfigLayer`]
//! and the layers are folded child first: the nearest `paths` and the nearest
//! `baseUrl` win independently.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use zonefence_domain::AliasMapping;
use zonefence_domain::paths::{escapes_base, normalize, relative_path};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    paths: Option<BTreeMap<String, Vec<String>>>,
}

/// The alias-related settings declared by one tsconfig file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TsConfigLayer {
    /// Directory of the file; `paths` without a `baseUrl` resolve against it.
    pub dir: Utf8PathBuf,
    /// `extends` entries as written, in declaration order.
    pub extends: Vec<String>,
    /// `baseUrl` resolved against `dir`.
    pub base_url: Option<Utf8PathBuf>,
    pub paths: Option<BTreeMap<String, Vec<String>>>,
}

/// Parse one tsconfig (JSON with comments) without following `extends`.
pub fn parse_tsconfig_layer(tsconfig_text: &str, tsconfig_dir: &Utf8Path) -> anyhow::Result<TsConfigLayer> {
    let cleaned = strip_jsonc(tsconfig_text);
    let config: TsConfig = serde_json::from_str(&cleaned).context("parse tsconfig json")?;

    let extends = match config.extends {
        None => Vec::new(),
        Some(Extends::One(base)) => vec![base],
        Some(Extends::Many(bases)) => bases,
    };
    Ok(TsConfigLayer {
        dir: normalize(tsconfig_dir),
        extends,
        base_url: config
            .compiler_options
            .base_url
            .map(|base_url| normalize(&tsconfig_dir.join(base_url))),
        paths: config.compiler_options.paths,
    })
}

/// Fold `layers` (the leaf tsconfig first, then what it extends) into aliases
/// re-based onto `root_dir`.
///
/// Targets are resolved against the effective `baseUrl` (or the directory of the
/// file declaring `paths`) and then expressed relative to `root_dir` with a
/// leading `./`, so `"@/*": ["./src/*"]` becomes `"@/*": ["./*"]` when checking
/// `src` itself.
pub fn alias_mapping_from_layers(layers: &[TsConfigLayer], root_dir: &Utf8Path) -> AliasMapping {
    let Some(declaring) = layers.iter().find(|layer| layer.paths.is_some()) else {
        return AliasMapping::new();
    };
    let base = layers
        .iter()
        .find_map(|layer| layer.base_url.clone())
        .unwrap_or_else(|| declaring.dir.clone());

    declaring
        .paths
        .iter()
        .flatten()
        .map(|(alias, targets)| {
            let rebased = targets
                .iter()
                .map(|target| {
                    let absolute = normalize(&base.join(target));
                    let relative = relative_path(root_dir, &absolute);
                    if escapes_base(&relative) {
                        relative
                    } else {
                        format!("./{relative}")
                    }
                })
                .collect();
            (alias.clone(), rebased)
        })
        .collect()
}

/// Read path aliases from a single tsconfig and re-base their targets onto `root_dir`.
pub fn parse_alias_mapping(
    tsconfig_text: &str,
    tsconfig_dir: &Utf8Path,
    root_dir: &Utf8Path,
) -> anyhow::Result<AliasMapping> {
    let layer = parse_tsconfig_layer(tsconfig_text, tsconfig_dir)?;
    Ok(alias_mapping_from_layers(&[layer], root_dir))
}

/// Drop `//` and `/* */` comments plus trailing commas, leaving string literals intact.
fn strip_jsonc(input: &str) -> String {
    let mut without_comments = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            without_comments.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        without_comments.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                without_comments.push(c);
            }
            ('/', Some('/')) => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            _ => without_comments.push(c),
        }
    }

    strip_trailing_commas(&without_comments)
}

fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in input.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        if c == ',' {
            let next = input[idx + 1..].trim_start().chars().next();
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
