use camino::{Utf8Path, Utf8PathBuf};
use zonefence_domain::AliasMapping;
use zonefence_domain::boundary::package_name;
use zonefence_domain::paths;

/// Extensions probed when a specifier omits one, in resolution order.
pub(crate) const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Whether an import refers to a third-party package rather than project code.
///
/// Relative and absolute specifiers are always local. A bare specifier is external
/// unless it resolved to a path outside any `node_modules` directory (an alias, say).
pub fn is_external_import(specifier: &str, resolved: Option<&Utf8Path>) -> bool {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return false;
    }
    match resolved {
        Some(path) => path.components().any(|c| c.as_str() == "node_modules"),
        None => true,
    }
}

/// One `compilerOptions.paths` entry, split around its `*`.
struct AliasEntry<'a> {
    prefix: &'a str,
    suffix: &'a str,
    wildcard: bool,
    targets: &'a [String],
}

impl AliasEntry<'_> {
    /// The part of `specifier` matched by `*`, or `""` for an exact alias.
    fn capture<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        if self.wildcard {
            specifier.strip_prefix(self.prefix)?.strip_suffix(self.suffix)
        } else {
            (specifier == self.prefix).then_some("")
        }
    }
}

/// Best-effort, filesystem-backed module resolution.
pub(crate) struct ModuleResolver<'a> {
    root: &'a Utf8Path,
    /// Longest prefix first.
    aliases: Vec<AliasEntry<'a>>,
}

impl<'a> ModuleResolver<'a> {
    pub(crate) fn new(root: &'a Utf8Path, aliases: Option<&'a AliasMapping>) -> Self {
        let mut entries: Vec<AliasEntry<'a>> = aliases
            .into_iter()
            .flatten()
            .map(|(alias, targets)| {
                let (prefix, suffix, wildcard) = match alias.split_once('*') {
                    Some((prefix, suffix)) => (prefix, suffix, true),
                    None => (alias.as_str(), "", false),
                };
                AliasEntry {
                    prefix,
                    suffix,
                    wildcard,
                    targets,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self {
            root,
            aliases: entries,
        }
    }

    pub(crate) fn resolve(&self, source_file: &Utf8Path, specifier: &str) -> Option<Utf8PathBuf> {
        let source_dir = source_file.parent()?;

        if specifier.starts_with('.') || specifier.starts_with('/') {
            return probe(&paths::resolve(source_dir, specifier));
        }
        if let Some(found) = self.resolve_alias(specifier) {
            return Some(found);
        }
        find_package(source_dir, package_name(specifier))
    }

    fn resolve_alias(&self, specifier: &str) -> Option<Utf8PathBuf> {
        self.aliases.iter().find_map(|alias| {
            let captured = alias.capture(specifier)?;
            alias.targets.iter().find_map(|target| {
                let target = target.replacen('*', captured, 1);
                probe(&paths::resolve(self.root, &target))
            })
        })
    }
}

/// Try `path` as a file, with each source extension, then as a directory index.
fn probe(path: &Utf8Path) -> Option<Utf8PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    // `./user.js` in TypeScript sources usually means `./user.ts`.
    let stem = match path.extension() {
        Some("js" | "jsx" | "mjs" | "cjs") => path.with_extension(""),
        _ => path.to_path_buf(),
    };
    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| Utf8PathBuf::from(format!("{stem}.{ext}")))
        .chain(
            SOURCE_EXTENSIONS
                .iter()
                .map(|ext| path.join(format!("index.{ext}"))),
        )
        .find(|candidate| candidate.is_file())
}

/// `node_modules/<package>` in the nearest directory at or above `start` that has one.
fn find_package(start: &Utf8Path, package: &str) -> Option<Utf8PathBuf> {
    if package.is_empty() {
        return None;
    }
    start
        .ancestors()
        .map(|dir| dir.join("node_modules").join(package))
        .find(|candidate| candidate.is_dir())
}
