use crate::discover::{pathbuf_to_utf8, walk};
use crate::module::{ModuleResolver, SOURCE_EXTENSIONS, is_external_import};
use crate::scan::scan_imports;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::borrow::Cow;
use zonefence_domain::{AliasMapping, ImportEdge};

/// TypeScript and JavaScript sources under `root`, excluding declaration files.
pub fn list_source_files(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut out: Vec<Utf8PathBuf> = walk(root)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.into_path()))
        .filter(|p| is_source_file(p))
        .collect();
    out.sort();
    out
}

fn is_source_file(path: &Utf8Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let is_declaration = [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|suffix| name.ends_with(suffix));
    !is_declaration
        && path
            .extension()
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Scan every source file under `root` and return its imports as edges.
///
/// Files are read and scanned in parallel; the result is ordered by source file,
/// then line, then column. Invalid UTF-8 is replaced rather than rejected, so one
/// legacy-encoded file does not stop the run.
pub fn collect_imports(
    root: &Utf8Path,
    aliases: Option<&AliasMapping>,
) -> anyhow::Result<Vec<ImportEdge>> {
    let files = list_source_files(root);
    let resolver = ModuleResolver::new(root, aliases);

    let per_file = files
        .par_iter()
        .map(|file| -> anyhow::Result<Vec<ImportEdge>> {
            let bytes = std::fs::read(file).with_context(|| format!("read {file}"))?;
            let text = String::from_utf8_lossy(&bytes);
            if let Cow::Owned(_) = text {
                tracing::warn!(file = %file, "source is not valid UTF-8; scanning it lossily");
            }
            Ok(edges_for_file(file, &text, &resolver))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut edges: Vec<ImportEdge> = per_file.into_iter().flatten().collect();
    edges.sort_by(|a, b| {
        (&a.source_file, a.line, a.column).cmp(&(&b.source_file, b.line, b.column))
    });

    tracing::debug!(
        files = files.len(),
        imports = edges.len(),
        "collected imports"
    );
    Ok(edges)
}

fn edges_for_file(file: &Utf8Path, text: &str, resolver: &ModuleResolver<'_>) -> Vec<ImportEdge> {
    scan_imports(text)
        .into_iter()
        .map(|raw| {
            let resolved_path = resolver.resolve(file, &raw.specifier);
            ImportEdge {
                source_file: file.to_path_buf(),
                is_external: is_external_import(&raw.specifier, resolved_path.as_deref()),
                module_specifier: raw.specifier,
                resolved_path,
                line: raw.line,
                column: raw.column,
            }
        })
        .collect()
}
