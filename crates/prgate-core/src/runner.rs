//! Single-gate execution.
//!
//! The runner resolves a [`GateSpec`] to its implementation, evaluates it,
//! parses and budgets any artifact it yields, and always returns a
//! [`GateResult`]. Errors and panics inside a gate end up as `status = error`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::budget::AnnotationBudget;
use crate::domain::context::PullRequestContext;
use crate::domain::error::{GateError, Result};
use crate::domain::repo_spec::GateSpec;
use crate::domain::result::{GateResult, GateStatus};
use crate::gates::{ArtifactFindings, Gate, GateEvaluation, GateRegistry};
use crate::metrics::METRICS;
use crate::obs;
use crate::parsers::parse_violations;

/// Runs one configured gate against a pull request.
#[derive(Debug, Clone)]
pub struct GateRunner {
    registry: Arc<GateRegistry>,
}

impl GateRunner {
    pub fn new(registry: Arc<GateRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &GateRegistry {
        &self.registry
    }

    /// Run `spec` against `ctx`, drawing surfaced violations from `budget`.
    pub fn run(
        &self,
        spec: &GateSpec,
        ctx: &PullRequestContext,
        budget: &AnnotationBudget,
    ) -> GateResult {
        obs::emit_gate_started(&spec.id, &spec.gate_type);
        let start = Instant::now();

        let mut result = match self.registry.get(&spec.gate_type) {
            Some(gate) => run_guarded(gate.as_ref(), spec, ctx, budget),
            None => GateResult::error(
                &spec.id,
                &spec.gate_type,
                format!("unknown gate type '{}'", spec.gate_type),
            ),
        };
        result.duration_ms = start.elapsed().as_millis() as u64;

        METRICS.inc_gates_evaluated();
        if result.status == GateStatus::Error {
            METRICS.inc_gates_errored();
            obs::emit_gate_error(&spec.id, &result.detail);
        }
        obs::emit_gate_finished(&result);
        result
    }
}

fn run_guarded(
    gate: &dyn Gate,
    spec: &GateSpec,
    ctx: &PullRequestContext,
    budget: &AnnotationBudget,
) -> GateResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| evaluate(gate, spec, ctx, budget)));
    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => GateResult::error(&spec.id, &spec.gate_type, e.to_string()),
        Err(payload) => GateResult::error(
            &spec.id,
            &spec.gate_type,
            format!("gate panicked: {}", panic_message(payload.as_ref())),
        ),
    }
}

fn evaluate(
    gate: &dyn Gate,
    spec: &GateSpec,
    ctx: &PullRequestContext,
    budget: &AnnotationBudget,
) -> Result<GateResult> {
    let evaluation = gate
        .evaluate(ctx, &spec.config)
        .map_err(|e| GateError::GateExecution {
            gate: spec.id.clone(),
            reason: e.to_string(),
        })?;

    match evaluation {
        GateEvaluation::Decided { status, detail } => {
            Ok(GateResult::new(&spec.id, &spec.gate_type, status, detail))
        }
        GateEvaluation::Artifact(findings) => judge_artifact(spec, ctx, budget, findings),
    }
}

/// Parse the artifact, judge the full list, then budget what gets surfaced.
fn judge_artifact(
    spec: &GateSpec,
    ctx: &PullRequestContext,
    budget: &AnnotationBudget,
    findings: ArtifactFindings<'_>,
) -> Result<GateResult> {
    let parsed = parse_violations(findings.raw, &findings.parser).map_err(|e| {
        GateError::GateExecution {
            gate: spec.id.clone(),
            reason: format!("artifact '{}': {}", findings.artifact, e),
        }
    })?;

    let (status, detail) = findings.policy.judge(&parsed);

    let parsed = match ctx.workspace_root() {
        Some(root) => parsed.into_iter().map(|v| v.relative_to(root)).collect(),
        None => parsed,
    };

    let reservation = budget.try_reserve(parsed);
    METRICS.add_violations(reservation.exposed.len(), reservation.overflow);
    if reservation.overflow > 0 {
        obs::emit_budget_exhausted(&spec.id, reservation.overflow);
    }

    let mut result = GateResult::new(&spec.id, &spec.gate_type, status, detail);
    result.violations = reservation.exposed;
    result.overflow = reservation.overflow;
    Ok(result)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
