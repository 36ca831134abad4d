//! Input file loading for the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use prgate_core::{PullRequestContext, RepoSpec};
use serde_json::Value;

/// Load a repo spec; `.toml` files are read as TOML, anything else as JSON.
pub fn load_repo_spec(path: &Path) -> Result<RepoSpec> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let spec: RepoSpec = if is_toml {
        toml::from_str(&raw)
            .with_context(|| format!("Invalid TOML spec in {}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON spec in {}", path.display()))?
    };

    spec.validate()
        .with_context(|| format!("Spec {} failed validation", path.display()))?;
    Ok(spec)
}

/// Load a pull-request context document (JSON).
pub fn load_context(path: &Path) -> Result<PullRequestContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid pull request context in {}", path.display()))
}

/// Load a raw tool artifact (JSON).
pub fn load_artifact(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Artifact {} is not JSON", path.display()))
}
