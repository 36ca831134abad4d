//! Read-only pull-request snapshot handed to every gate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{GateError, Result};

/// Change status of a file in the pull request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    #[default]
    Modified,
    Removed,
    Renamed,
}

/// One changed file with its diff stats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>, additions: u64, deletions: u64) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Modified,
            additions,
            deletions,
        }
    }

    pub fn with_status(mut self, status: FileStatus) -> Self {
        self.status = status;
        self
    }
}

/// Pull-request metadata supplied by the event collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PullRequestMeta {
    /// `owner/name` of the target repository.
    pub repository: String,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub base_ref: String,
    #[serde(default)]
    pub head_ref: String,
    pub head_sha: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Validated, read-only pull-request context.
///
/// Construction goes through [`PullRequestContext::new`] (or deserialization,
/// which runs the same checks), so gates never see a half-populated context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawPullRequestContext")]
pub struct PullRequestContext {
    #[serde(flatten)]
    meta: PullRequestMeta,
    files: Vec<ChangedFile>,
    /// Pre-fetched tool artifacts (raw JSON), keyed by name.
    artifacts: BTreeMap<String, Value>,
    /// Absolute checkout root used to relativize tool paths.
    workspace_root: Option<String>,
}

#[derive(Deserialize)]
struct RawPullRequestContext {
    #[serde(flatten)]
    meta: PullRequestMeta,
    #[serde(default)]
    files: Vec<ChangedFile>,
    #[serde(default)]
    artifacts: BTreeMap<String, Value>,
    #[serde(default)]
    workspace_root: Option<String>,
}

impl TryFrom<RawPullRequestContext> for PullRequestContext {
    type Error = GateError;

    fn try_from(raw: RawPullRequestContext) -> Result<Self> {
        let mut ctx = PullRequestContext::new(raw.meta)?;
        ctx.files = raw.files;
        ctx.artifacts = raw.artifacts;
        ctx.workspace_root = raw.workspace_root;
        Ok(ctx)
    }
}

impl PullRequestContext {
    /// Create a context, rejecting metadata gates cannot work with.
    pub fn new(meta: PullRequestMeta) -> Result<Self> {
        if meta.repository.trim().is_empty() {
            return Err(GateError::InvalidContext(
                "repository must not be empty".to_string(),
            ));
        }
        if meta.number == 0 {
            return Err(GateError::InvalidContext(
                "pull request number must be positive".to_string(),
            ));
        }
        if meta.head_sha.trim().is_empty() {
            return Err(GateError::InvalidContext(
                "head_sha must not be empty".to_string(),
            ));
        }
        Ok(Self {
            meta,
            files: Vec::new(),
            artifacts: BTreeMap::new(),
            workspace_root: None,
        })
    }

    pub fn with_files(mut self, files: Vec<ChangedFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_artifact(mut self, name: impl Into<String>, payload: Value) -> Self {
        self.artifacts.insert(name.into(), payload);
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<String>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn repository(&self) -> &str {
        &self.meta.repository
    }

    pub fn number(&self) -> u64 {
        self.meta.number
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn body(&self) -> Option<&str> {
        self.meta.body.as_deref()
    }

    pub fn labels(&self) -> &[String] {
        &self.meta.labels
    }

    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn artifact(&self, name: &str) -> Option<&Value> {
        self.artifacts.get(name)
    }

    pub fn workspace_root(&self) -> Option<&str> {
        self.workspace_root.as_deref()
    }

    pub fn total_additions(&self) -> u64 {
        self.files.iter().map(|f| f.additions).sum()
    }

    pub fn total_deletions(&self) -> u64 {
        self.files.iter().map(|f| f.deletions).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> PullRequestMeta {
        PullRequestMeta {
            repository: "acme/widgets".to_string(),
            number: 42,
            title: "feat: add widget".to_string(),
            head_sha: "abc123".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_accepts_valid_meta() {
        let ctx = PullRequestContext::new(meta())
            .expect("valid context")
            .with_files(vec![ChangedFile::new("a.rs", 10, 2), ChangedFile::new("b.rs", 5, 1)]);
        assert_eq!(ctx.number(), 42);
        assert_eq!(ctx.total_additions(), 15);
        assert_eq!(ctx.total_deletions(), 3);
    }

    #[test]
    fn test_new_rejects_zero_number() {
        let mut m = meta();
        m.number = 0;
        let err = PullRequestContext::new(m).expect_err("zero PR number");
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_new_rejects_empty_repository() {
        let mut m = meta();
        m.repository = String::new();
        assert!(PullRequestContext::new(m).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PullRequestContext = serde_json::from_value(json!({
            "repository": "acme/widgets",
            "number": 7,
            "title": "fix",
            "head_sha": "deadbeef",
            "files": [{ "path": "src/lib.rs", "additions": 3 }],
            "artifacts": { "eslint": [] }
        }))
        .expect("valid payload");
        assert_eq!(ok.files()[0].status, FileStatus::Modified);
        assert!(ok.artifact("eslint").is_some());

        let bad = serde_json::from_value::<PullRequestContext>(json!({
            "repository": "acme/widgets",
            "number": 7,
            "title": "fix",
            "head_sha": ""
        }));
        assert!(bad.is_err());
    }
}
