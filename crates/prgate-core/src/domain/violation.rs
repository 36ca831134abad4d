//! Canonical violation record produced by artifact parsers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity level of a violation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A single normalized finding from a static-analysis tool report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    /// Rule or lint code (e.g. "no-unused-vars", "F401").
    pub code: String,

    /// Human-readable message.
    pub message: String,

    /// File path as reported by the tool, or repository-relative when derivable.
    pub path: String,

    /// Line number (1-indexed).
    pub line: Option<u32>,

    /// Column number (1-indexed).
    pub column: Option<u32>,

    pub level: Level,

    /// Tool-specific fields preserved verbatim.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Violation {
    /// Create a violation without location or metadata.
    pub fn new(code: String, message: String, path: String, level: Level) -> Self {
        Self {
            code,
            message,
            path,
            line: None,
            column: None,
            level,
            meta: Map::new(),
        }
    }

    /// Set line/column location.
    pub fn with_location(mut self, line: Option<u32>, column: Option<u32>) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }

    /// Rewrite `path` relative to `root` when it lives under it.
    ///
    /// Paths outside `root`, and relative paths, are returned unchanged.
    /// A root of `/` covers every absolute path.
    pub fn relative_to(mut self, root: &str) -> Self {
        if root.is_empty() {
            return self;
        }
        let root = root.trim_end_matches('/');
        if let Some(rest) = self.path.strip_prefix(root) {
            if let Some(relative) = rest.strip_prefix('/') {
                if !relative.is_empty() {
                    self.path = relative.to_string();
                }
            }
        }
        self
    }

    /// `path:line:column` location, omitting unknown parts.
    pub fn location(&self) -> String {
        match (self.line, self.column) {
            (Some(line), Some(col)) => format!("{}:{}:{}", self.path, line, col),
            (Some(line), None) => format!("{}:{}", self.path, line),
            _ => self.path.clone(),
        }
    }
}

/// Count violations by level: `(errors, warnings, infos)`.
pub fn count_by_level(violations: &[Violation]) -> (usize, usize, usize) {
    violations
        .iter()
        .fold((0, 0, 0), |(e, w, i), v| match v.level {
            Level::Error => (e + 1, w, i),
            Level::Warning => (e, w + 1, i),
            Level::Info => (e, w, i + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
    }

    #[test]
    fn test_level_serde_snake_case() {
        let json = serde_json::to_string(&Level::Warning).expect("serialize");
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_relative_to_strips_root() {
        let v = Violation::new(
            "F401".into(),
            "unused import".into(),
            "/work/repo/src/app.py".into(),
            Level::Error,
        )
        .relative_to("/work/repo/");
        assert_eq!(v.path, "src/app.py");
    }

    #[test]
    fn test_relative_to_leaves_foreign_paths() {
        let v = Violation::new("x".into(), "m".into(), "/other/a.js".into(), Level::Info)
            .relative_to("/work/repo");
        assert_eq!(v.path, "/other/a.js");

        // A sibling directory sharing the prefix is not under the root.
        let v = Violation::new("x".into(), "m".into(), "/work/repo2/a.js".into(), Level::Info)
            .relative_to("/work/repo");
        assert_eq!(v.path, "/work/repo2/a.js");
    }

    #[test]
    fn test_relative_to_filesystem_root() {
        let v = Violation::new("x".into(), "m".into(), "/srv/app/main.py".into(), Level::Info)
            .relative_to("/");
        assert_eq!(v.path, "srv/app/main.py");

        let v = Violation::new("x".into(), "m".into(), "src/a.js".into(), Level::Info)
            .relative_to("/");
        assert_eq!(v.path, "src/a.js");

        let v = Violation::new("x".into(), "m".into(), "/srv/a.js".into(), Level::Info)
            .relative_to("");
        assert_eq!(v.path, "/srv/a.js");
    }

    #[test]
    fn test_location_formats() {
        let v = Violation::new("x".into(), "m".into(), "a.js".into(), Level::Info);
        assert_eq!(v.location(), "a.js");
        let v = v.with_location(Some(3), Some(7));
        assert_eq!(v.location(), "a.js:3:7");
    }

    #[test]
    fn test_count_by_level() {
        let vs = vec![
            Violation::new("a".into(), "m".into(), "p".into(), Level::Error),
            Violation::new("b".into(), "m".into(), "p".into(), Level::Warning),
            Violation::new("c".into(), "m".into(), "p".into(), Level::Error)
                .with_meta("severity", json!(2)),
        ];
        assert_eq!(count_by_level(&vs), (2, 1, 0));
    }
}
