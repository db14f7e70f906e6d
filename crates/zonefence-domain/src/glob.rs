//! Segment-wise glob matching over `/`-separated paths.
//!
//! Semantics:
//! - `*`, `?`, `[...]` and `{a,b}` match within one path segment
//! - a `**` segment matches zero or more whole segments
//! - path segments starting with `.` only match pattern segments that start with `.`
//! - `a/**` also matches `a` itself
//!
//! A segment globset cannot compile is compared literally, so matching never fails.

use globset::{GlobBuilder, GlobMatcher};

#[derive(Clone, Debug)]
enum Segment {
    GlobStar,
    Literal(String),
    Wild { text: String, matcher: GlobMatcher },
}

impl Segment {
    fn parse(text: &str) -> Self {
        if text == "**" {
            return Segment::GlobStar;
        }
        if !has_segment_magic(text) {
            return Segment::Literal(text.to_string());
        }
        match GlobBuilder::new(text).literal_separator(true).build() {
            Ok(glob) => Segment::Wild {
                text: text.to_string(),
                matcher: glob.compile_matcher(),
            },
            Err(_) => Segment::Literal(text.to_string()),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::GlobStar => is_plain_segment(segment),
            Segment::Literal(text) => text == segment,
            Segment::Wild { text, matcher } => {
                if segment == "." || segment == ".." {
                    return false;
                }
                if segment.starts_with('.') && !text.starts_with('.') {
                    return false;
                }
                matcher.is_match(segment)
            }
        }
    }
}

/// A compiled glob pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            segments: pattern.split('/').map(Segment::parse).collect(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        let p = self.segments.len();
        let s = parts.len();

        // reachable[i][j]: pattern[i..] matches parts[j..]
        let mut reachable = vec![vec![false; s + 1]; p + 1];
        reachable[p][s] = true;

        for i in (0..p).rev() {
            for j in (0..=s).rev() {
                reachable[i][j] = match &self.segments[i] {
                    Segment::GlobStar => {
                        reachable[i + 1][j]
                            || (j < s && self.segments[i].matches(parts[j]) && reachable[i][j + 1])
                    }
                    seg => j < s && seg.matches(parts[j]) && reachable[i + 1][j + 1],
                };
            }
        }

        reachable[0][0]
    }
}

/// Match `path` against `pattern`.
pub fn glob_match(path: &str, pattern: &str) -> bool {
    Pattern::new(pattern).matches(path)
}

/// Whether a policy pattern is treated as a glob rather than a package name or path prefix.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains('*')
}

fn has_segment_magic(text: &str) -> bool {
    text.contains(['*', '?', '[', '{'])
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.starts_with('.')
}
