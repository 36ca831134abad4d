//! Lint threshold gate over a pre-fetched tool artifact.

use serde_json::{Map, Value};

use super::params::{opt_str, opt_usize, require_str};
use super::{ArtifactFindings, Gate, GateEvaluation, ViolationPolicy};
use crate::domain::context::PullRequestContext;
use crate::domain::error::{GateError, Result};
use crate::parsers::ParserConfig;

/// Fails when a lint artifact carries more errors/warnings than allowed.
///
/// Config: `artifact` (required), `parser` or `custom_mapping`,
/// `max_errors` (default 0), `max_warnings`, `missing` = `neutral` | `fail`.
pub struct LintArtifactGate;

impl Gate for LintArtifactGate {
    fn gate_type(&self) -> &'static str {
        "lint_artifact"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let artifact = require_str(config, "artifact")?;
        let parser = ParserConfig::from_config(config)?;
        let policy = ViolationPolicy {
            max_errors: opt_usize(config, "max_errors")?.unwrap_or(0),
            max_warnings: opt_usize(config, "max_warnings")?,
        };

        let Some(raw) = ctx.artifact(artifact) else {
            let detail = format!("artifact '{}' was not provided", artifact);
            return match opt_str(config, "missing")?.unwrap_or("neutral") {
                "neutral" => Ok(GateEvaluation::neutral(detail)),
                "fail" => Ok(GateEvaluation::fail(detail)),
                other => Err(GateError::InvalidConfig(format!(
                    "'missing' must be 'neutral' or 'fail', got '{}'",
                    other
                ))),
            };
        };

        Ok(GateEvaluation::Artifact(ArtifactFindings {
            artifact: artifact.to_string(),
            raw,
            parser,
            policy,
        }))
    }
}
