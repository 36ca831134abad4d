//! Gates over pull-request metadata: title, description and labels.

use regex::RegexBuilder;
use serde_json::{Map, Value};

use super::params::{opt_bool, opt_str, opt_usize, require_str, string_list};
use super::{Gate, GateEvaluation};
use crate::domain::context::PullRequestContext;
use crate::domain::error::{GateError, Result};

/// Title must match `pattern`.
pub struct PrTitleGate;

impl Gate for PrTitleGate {
    fn gate_type(&self) -> &'static str {
        "pr_title"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let pattern = require_str(config, "pattern")?;
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(opt_bool(config, "case_insensitive")?.unwrap_or(false))
            .build()
            .map_err(|e| GateError::InvalidConfig(format!("invalid title pattern: {}", e)))?;

        if regex.is_match(ctx.title()) {
            Ok(GateEvaluation::pass(format!("title matches `{pattern}`")))
        } else {
            Ok(GateEvaluation::fail(format!(
                "title \"{}\" does not match `{}`",
                ctx.title(),
                pattern
            )))
        }
    }
}

/// Description must be at least `min_length` characters once trimmed.
pub struct PrDescriptionGate;

impl Gate for PrDescriptionGate {
    fn gate_type(&self) -> &'static str {
        "pr_description"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let min_length = opt_usize(config, "min_length")?.unwrap_or(1);
        let length = ctx.body().map(|b| b.trim().chars().count()).unwrap_or(0);

        if length >= min_length {
            Ok(GateEvaluation::pass(format!("description has {length} character(s)")))
        } else if length == 0 {
            Ok(GateEvaluation::fail("description is empty"))
        } else {
            Ok(GateEvaluation::fail(format!(
                "description has {} character(s), at least {} required",
                length, min_length
            )))
        }
    }
}

/// Pull request must carry the configured labels.
///
/// Config: `labels`, `mode` = `all` (default) | `any`.
pub struct RequiredLabelsGate;

impl Gate for RequiredLabelsGate {
    fn gate_type(&self) -> &'static str {
        "required_labels"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let required = string_list(config, "labels")?;
        let mode = opt_str(config, "mode")?.unwrap_or("all");
        if mode != "all" && mode != "any" {
            return Err(GateError::InvalidConfig(format!(
                "'mode' must be 'all' or 'any', got '{}'",
                mode
            )));
        }
        if required.is_empty() {
            return Ok(GateEvaluation::neutral("no labels configured"));
        }

        let present: Vec<&String> = required
            .iter()
            .filter(|label| ctx.labels().contains(*label))
            .collect();
        let missing: Vec<&str> = required
            .iter()
            .filter(|label| !ctx.labels().contains(*label))
            .map(String::as_str)
            .collect();

        let satisfied = match mode {
            "any" => !present.is_empty(),
            _ => missing.is_empty(),
        };

        if satisfied {
            Ok(GateEvaluation::pass(format!(
                "{} of {} required label(s) present",
                present.len(),
                required.len()
            )))
        } else {
            let missing = missing.join(", ");
            Ok(GateEvaluation::fail(format!("missing label(s): {missing}")))
        }
    }
}
