//! Structured observability hooks for gate evaluations.
//!
//! This module provides:
//! - Evaluation-scoped tracing spans via the `EvaluationSpan` RAII guard
//! - Emission functions for gate start/finish, budget exhaustion and the final verdict
//!
//! Events are emitted at `info!` level; filter with `RUST_LOG`.

use tracing::info;
use uuid::Uuid;

use crate::domain::result::GateResult;
use crate::domain::verdict::Verdict;

/// RAII guard that enters an evaluation-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = EvaluationSpan::enter("acme/widgets", 42, &spec.digest());
/// // every gate log line now carries evaluation_id, repository and pr
/// ```
pub struct EvaluationSpan {
    evaluation_id: Uuid,
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    /// Create and enter a span tagged with a fresh evaluation id.
    pub fn enter(repository: &str, number: u64, spec_digest: &str) -> Self {
        let (evaluation_id, span) = evaluation_span(repository, number, spec_digest);
        Self {
            evaluation_id,
            _span: span.entered(),
        }
    }

    pub fn evaluation_id(&self) -> Uuid {
        self.evaluation_id
    }
}

/// Build (without entering) an evaluation span, for instrumenting futures.
pub fn evaluation_span(repository: &str, number: u64, spec_digest: &str) -> (Uuid, tracing::Span) {
    let evaluation_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "prgate.evaluation",
        evaluation_id = %evaluation_id,
        repository = %repository,
        pr = number,
        spec_digest = %spec_digest.get(..12).unwrap_or(spec_digest),
    );
    (evaluation_id, span)
}

/// Emit event: gate evaluation started.
pub fn emit_gate_started(gate_id: &str, gate_type: &str) {
    info!(event = "gate.started", gate_id = %gate_id, gate_type = %gate_type);
}

/// Emit event: gate finished with status, duration and violation counts.
pub fn emit_gate_finished(result: &GateResult) {
    info!(
        event = "gate.finished",
        gate_id = %result.id,
        gate_type = %result.gate_type,
        status = result.status.as_str(),
        duration_ms = result.duration_ms,
        exposed = result.violations.len(),
        overflow = result.overflow,
    );
}

/// Emit event: a gate errored (warning level).
pub fn emit_gate_error(gate_id: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "gate.error", gate_id = %gate_id, error = %error);
}

/// Emit event: the annotation budget ran out while reserving for a gate.
pub fn emit_budget_exhausted(gate_id: &str, overflow: usize) {
    info!(event = "budget.exhausted", gate_id = %gate_id, overflow = overflow);
}

/// Emit event: verdict aggregated.
pub fn emit_verdict(verdict: &Verdict) {
    info!(
        event = "verdict.aggregated",
        overall = verdict.overall.banner(),
        passed = verdict.passed,
        failed = verdict.failed,
        neutral = verdict.neutral,
        errored = verdict.errored(),
        exposed = verdict.exposed_violations(),
        overflow = verdict.overflow(),
    );
}
