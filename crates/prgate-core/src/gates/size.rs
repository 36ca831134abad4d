//! Pull-request size limits.

use serde_json::{Map, Value};

use super::params::opt_u64;
use super::{Gate, GateEvaluation};
use crate::domain::context::PullRequestContext;
use crate::domain::error::Result;

/// Fails when the diff exceeds any configured limit.
///
/// Config: `max_changed_files`, `max_additions`, `max_deletions`,
/// `max_total_lines` (all optional).
pub struct PrSizeGate;

impl Gate for PrSizeGate {
    fn gate_type(&self) -> &'static str {
        "pr_size"
    }

    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>> {
        let files = ctx.files().len() as u64;
        let additions = ctx.total_additions();
        let deletions = ctx.total_deletions();

        let checks = [
            ("changed files", files, opt_u64(config, "max_changed_files")?),
            ("additions", additions, opt_u64(config, "max_additions")?),
            ("deletions", deletions, opt_u64(config, "max_deletions")?),
            ("total lines", additions + deletions, opt_u64(config, "max_total_lines")?),
        ];

        let exceeded: Vec<String> = checks
            .iter()
            .filter_map(|(what, actual, limit)| match limit {
                Some(max) if actual > max => {
                    Some(format!("{} {} > max allowed {}", what, actual, max))
                }
                _ => None,
            })
            .collect();

        let summary = format!("{files} file(s), +{additions} -{deletions}");
        if exceeded.is_empty() {
            Ok(GateEvaluation::pass(summary))
        } else {
            let exceeded = exceeded.join("; ");
            Ok(GateEvaluation::fail(format!("{summary}: {exceeded}")))
        }
    }
}
