//! Lexical path helpers. Nothing here touches the filesystem.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Collapse `.` and `..` components.
///
/// `..` at the root of an absolute path is dropped; leading `..` of a relative path is kept.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_str()),
        }
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

/// Join `path` onto `base` unless it is already absolute, then normalize.
pub fn resolve(base: &Utf8Path, path: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(path);
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Path from `from` to `to` with `/` separators; empty when both are the same.
///
/// Both paths should be absolute. Mixed absolute and relative input returns `to` unchanged.
pub fn relative_path(from: &Utf8Path, to: &Utf8Path) -> String {
    if from.is_absolute() != to.is_absolute() {
        return to.as_str().to_string();
    }
    let from = normalize(from);
    let to = normalize(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = from_parts[common..]
        .iter()
        .filter(|c| matches!(c, Utf8Component::Normal(_)))
        .map(|_| "..")
        .collect();
    parts.extend(to_parts[common..].iter().map(|c| c.as_str()));
    parts.join("/")
}

/// Whether a relative path produced by [`relative_path`] leaves its base.
pub fn escapes_base(relative: &str) -> bool {
    relative == ".." || relative.starts_with("../") || Utf8Path::new(relative).is_absolute()
}
