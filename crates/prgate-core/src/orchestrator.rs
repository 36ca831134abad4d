//! Gate orchestration over a repository spec.
//!
//! Every entry in `RepoSpec.gates` runs exactly once, duplicates included,
//! and results come back in spec order whichever scheduling mode is used.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{dispatcher, info, Instrument, Span};

use crate::aggregate::aggregate;
use crate::budget::AnnotationBudget;
use crate::domain::context::PullRequestContext;
use crate::domain::repo_spec::{ExecutionMode, RepoSpec};
use crate::domain::result::GateResult;
use crate::domain::verdict::Verdict;
use crate::gates::GateRegistry;
use crate::metrics::METRICS;
use crate::obs::{self, EvaluationSpan};
use crate::runner::GateRunner;

/// Runs a repository's configured gates against a pull request.
#[derive(Debug, Clone)]
pub struct GateOrchestrator {
    runner: GateRunner,
}

impl Default for GateOrchestrator {
    fn default() -> Self {
        Self::new(GateRegistry::builtin())
    }
}

impl GateOrchestrator {
    pub fn new(registry: GateRegistry) -> Self {
        Self {
            runner: GateRunner::new(Arc::new(registry)),
        }
    }

    pub fn registry(&self) -> &GateRegistry {
        self.runner.registry()
    }

    /// Evaluate every configured gate sequentially, in spec order.
    pub fn evaluate(&self, spec: &RepoSpec, ctx: &PullRequestContext) -> Vec<GateResult> {
        let budget = AnnotationBudget::new(spec.annotation_budget);
        spec.gates
            .iter()
            .map(|gate| self.runner.run(gate, ctx, &budget))
            .collect()
    }

    /// Evaluate gates on the blocking pool, sharing one budget.
    ///
    /// Which gate reserves first is up to the scheduler; the returned list is
    /// still in spec order.
    pub async fn evaluate_concurrent(
        &self,
        spec: &RepoSpec,
        ctx: Arc<PullRequestContext>,
    ) -> Vec<GateResult> {
        let budget = Arc::new(AnnotationBudget::new(spec.annotation_budget));
        // Blocking-pool threads start without the caller's span or subscriber.
        let span = Span::current();
        let dispatch = dispatcher::get_default(|current| current.clone());

        let tasks = spec.gates.iter().cloned().map(|gate| {
            let runner = self.runner.clone();
            let ctx = Arc::clone(&ctx);
            let budget = Arc::clone(&budget);
            let span = span.clone();
            let dispatch = dispatch.clone();
            tokio::task::spawn_blocking(move || {
                dispatcher::with_default(&dispatch, || {
                    span.in_scope(|| runner.run(&gate, &ctx, &budget))
                })
            })
        });

        join_all(tasks)
            .await
            .into_iter()
            .zip(&spec.gates)
            .map(|(joined, gate)| {
                joined.unwrap_or_else(|e| {
                    METRICS.inc_gates_errored();
                    GateResult::error(
                        &gate.id,
                        &gate.gate_type,
                        format!("gate task failed: {}", e),
                    )
                })
            })
            .collect()
    }

    /// Evaluate with the spec's execution mode and aggregate the verdict.
    pub async fn review(&self, spec: &RepoSpec, ctx: Arc<PullRequestContext>) -> Verdict {
        let (evaluation_id, span) =
            obs::evaluation_span(ctx.repository(), ctx.number(), &spec.digest());

        async move {
            info!(
                evaluation_id = %evaluation_id,
                gates = spec.gates.len(),
                mode = ?spec.execution,
                "Starting gate evaluation"
            );

            let results = match spec.execution {
                ExecutionMode::Sequential => self.evaluate(spec, &ctx),
                ExecutionMode::Concurrent => {
                    self.evaluate_concurrent(spec, Arc::clone(&ctx)).await
                }
            };

            let verdict = aggregate(results);
            obs::emit_verdict(&verdict);
            METRICS.flush();
            verdict
        }
        .instrument(span)
        .await
    }

    /// Sequential evaluation plus aggregation, for callers without a runtime.
    pub fn review_blocking(&self, spec: &RepoSpec, ctx: &PullRequestContext) -> Verdict {
        let _span = EvaluationSpan::enter(ctx.repository(), ctx.number(), &spec.digest());
        let verdict = aggregate(self.evaluate(spec, ctx));
        obs::emit_verdict(&verdict);
        METRICS.flush();
        verdict
    }
}
