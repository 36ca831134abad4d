//! Domain types for gate evaluation.

pub mod context;
pub mod error;
pub mod repo_spec;
pub mod result;
pub mod verdict;
pub mod violation;

pub use context::{ChangedFile, FileStatus, PullRequestContext, PullRequestMeta};
pub use error::{GateError, Result};
pub use repo_spec::{ExecutionMode, GateSpec, RepoSpec, DEFAULT_ANNOTATION_BUDGET};
pub use result::{GateResult, GateStatus};
pub use verdict::{Overall, Verdict};
pub use violation::{count_by_level, Level, Violation};
