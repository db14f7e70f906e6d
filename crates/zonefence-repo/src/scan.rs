//! Lexical import extraction for TypeScript and JavaScript sources.
//!
//! This is not a parser. Comments are blanked out first (byte offsets are kept so
//! positions still point into the original text) and string literals are recorded,
//! then a single regex picks up the forms below. A match whose keyword sits inside a
//! string literal is text, not an import.
//!
//! - `import x from "m"`, `import type { X } from "m"`, `import * as ns from "m"`
//! - `import "m"`
//! - `export { x } from "m"`, `export * from "m"`
//! - `import("m")` and `require("m")` with a string literal argument

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\b(?:import|export)\b[\w$*{},\s]*?\bfrom\s*["']([^"'\n]+)["']"#,
        r#"|\bimport\s*["']([^"'\n]+)["']"#,
        r#"|\b(?:import|require)\s*\(\s*["']([^"'\n]+)["']\s*\)"#,
    ))
    .expect("import pattern is a valid regex")
});

/// An import found in source text, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImport {
    pub specifier: String,
    /// 1-based.
    pub line: u32,
    /// 1-based, in characters.
    pub column: u32,
}

/// Find every import in `source`, in order of appearance.
pub fn scan_imports(source: &str) -> Vec<RawImport> {
    let Lexed { code, strings } = lex(source);
    let line_starts = line_starts(source);

    IMPORT_PATTERN
        .captures_iter(&code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if inside_string(&strings, whole.start()) {
                return None;
            }
            let specifier = (1..=3).find_map(|i| caps.get(i))?.as_str();

            let line_idx = line_starts.partition_point(|&start| start <= whole.start()) - 1;
            let line_start = line_starts[line_idx];
            let column = source.get(line_start..whole.start())?.chars().count() + 1;

            Some(RawImport {
                specifier: specifier.to_string(),
                line: (line_idx + 1) as u32,
                column: column as u32,
            })
        })
        .collect()
}

fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

/// `strings` is sorted and non-overlapping.
fn inside_string(strings: &[Range<usize>], offset: usize) -> bool {
    let idx = strings.partition_point(|r| r.end <= offset);
    strings.get(idx).is_some_and(|r| r.start <= offset)
}

struct Lexed {
    /// Source with comments blanked; same byte length as the input.
    code: String,
    /// Byte ranges of string and template literals, quotes included.
    strings: Vec<Range<usize>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Replace comment contents with spaces, keeping newlines and byte offsets intact,
/// and record where string literals are.
fn lex(source: &str) -> Lexed {
    let mut out = String::with_capacity(source.len());
    let mut strings = Vec::new();
    let mut string_start = 0;
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    let blank = |out: &mut String, c: char| {
        if c == '\n' {
            out.push('\n');
        } else {
            out.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => {
                let next = chars.peek().copied();
                match (c, next) {
                    ('/', Some('/')) => {
                        chars.next();
                        out.push_str("  ");
                        state = State::LineComment;
                    }
                    ('/', Some('*')) => {
                        chars.next();
                        out.push_str("  ");
                        state = State::BlockComment;
                    }
                    ('"' | '\'' | '`', _) => {
                        string_start = out.len();
                        out.push(c);
                        state = State::Str(c);
                    }
                    _ => out.push(c),
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
                blank(&mut out, c);
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || (c == '\n' && quote != '`') {
                    strings.push(string_start..out.len());
                    state = State::Code;
                }
            }
        }
    }
    if matches!(state, State::Str(_)) {
        strings.push(string_start..out.len());
    }

    Lexed { code: out, strings }
}
