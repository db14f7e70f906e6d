//! Loading path aliases from a tsconfig and the files it extends.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use zonefence_domain::AliasMapping;
use zonefence_domain::paths::normalize;
use zonefence_settings::{TsConfigLayer, alias_mapping_from_layers, parse_tsconfig_layer};

const MAX_EXTENDS_DEPTH: usize = 16;

/// Read `tsconfig_path`, follow its relative `extends` chain, and return the
/// effective path aliases re-based onto `root`.
///
/// Package `extends` (e.g. `@tsconfig/node20/tsconfig.json`) are skipped.
pub fn load_alias_mapping(tsconfig_path: &Utf8Path, root: &Utf8Path) -> anyhow::Result<AliasMapping> {
    let mut layers = Vec::new();
    let mut visiting = BTreeSet::new();
    load_layers(&normalize(tsconfig_path), 0, &mut visiting, &mut layers)?;
    Ok(alias_mapping_from_layers(&layers, root))
}

/// Push the layer for `path`, then the layers it extends; later `extends`
/// entries override earlier ones, so they are visited first.
fn load_layers(
    path: &Utf8Path,
    depth: usize,
    visiting: &mut BTreeSet<Utf8PathBuf>,
    layers: &mut Vec<TsConfigLayer>,
) -> anyhow::Result<()> {
    if depth > MAX_EXTENDS_DEPTH {
        bail!("tsconfig extends chain deeper than {MAX_EXTENDS_DEPTH} at {path}");
    }
    if !visiting.insert(path.to_path_buf()) {
        bail!("tsconfig extends cycle at {path}");
    }

    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let dir = path.parent().unwrap_or(Utf8Path::new("."));
    let layer = parse_tsconfig_layer(&text, dir).with_context(|| format!("parse {path}"))?;
    let bases: Vec<Utf8PathBuf> = layer
        .extends
        .iter()
        .rev()
        .filter_map(|base| {
            let resolved = resolve_extends(dir, base);
            if resolved.is_none() {
                tracing::debug!(tsconfig = %path, extends = %base, "skipping non-relative extends");
            }
            resolved
        })
        .collect();
    layers.push(layer);

    for base in &bases {
        load_layers(base, depth + 1, visiting, layers)?;
    }
    visiting.remove(path);
    Ok(())
}

fn resolve_extends(dir: &Utf8Path, base: &str) -> Option<Utf8PathBuf> {
    let is_path = base.starts_with("./") || base.starts_with("../") || base.starts_with('/');
    if !is_path {
        return None;
    }
    let candidate = normalize(&dir.join(base));
    if candidate.extension() == Some("json") || candidate.is_file() {
        Some(candidate)
    } else {
        Some(Utf8PathBuf::from(format!("{candidate}.json")))
    }
}
