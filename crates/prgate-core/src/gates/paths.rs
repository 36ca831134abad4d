//! Forbidden path policy for changed files.

use serde_json::{Map, Value};

use super::params::{opt_bool, string_list};
use super::{Gate, GateEvaluation};
use crate::domain::context::{FileStatus, PullRequestContext};
use crate::domain::error::{GateError, Result};

const MAX_LISTED: usize = 10;

/// Fails when a changed file matches a forbidden prefix or suffix.
///
/// Config: `prefixes`, `suffixes`, `allow_deletions` (default true).
pub struct ForbiddenPathsGate;

impl Gate for ForbiddenPathsGate {
    fn gate_type(&self) -> &'static str {
        "forbidden_paths"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let prefixes = string_list(config, "prefixes")?;
        let suffixes = string_list(config, "suffixes")?;
        let allow_deletions = opt_bool(config, "allow_deletions")?.unwrap_or(true);

        if prefixes.is_empty() && suffixes.is_empty() {
            return Err(GateError::InvalidConfig(
                "forbidden_paths needs at least one of 'prefixes' or 'suffixes'".to_string(),
            ));
        }

        let offending: Vec<&str> = ctx
            .files()
            .iter()
            .filter(|f| !(allow_deletions && f.status == FileStatus::Removed))
            .map(|f| f.path.as_str())
            .filter(|path| {
                prefixes.iter().any(|p| path.starts_with(p.as_str()))
                    || suffixes.iter().any(|s| path.ends_with(s.as_str()))
            })
            .collect();

        if offending.is_empty() {
            return Ok(GateEvaluation::pass(format!(
                "{} changed file(s) checked",
                ctx.files().len()
            )));
        }

        let mut listed = offending
            .iter()
            .take(MAX_LISTED)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if offending.len() > MAX_LISTED {
            listed.push_str(&format!(" (+{} more)", offending.len() - MAX_LISTED));
        }
        Ok(GateEvaluation::fail(format!(
            "{} forbidden path(s) changed: {}",
            offending.len(),
            listed
        )))
    }
}
