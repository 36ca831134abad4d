//! prgate Core Library
//!
//! Evaluates a repository's configured pull-request gates and reduces them
//! to one verdict:
//! - Normalizes ESLint / Ruff JSON artifacts into [`Violation`]s
//! - Bounds surfaced violations with a shared [`AnnotationBudget`]
//! - Runs every configured gate exactly once, in spec order
//! - Aggregates a [`Verdict`] and renders the report text

pub mod aggregate;
pub mod budget;
pub mod domain;
pub mod gates;
pub mod metrics;
pub mod obs;
pub mod orchestrator;
pub mod parsers;
pub mod report;
pub mod runner;
pub mod telemetry;

pub use aggregate::aggregate;
pub use budget::{AnnotationBudget, Reservation};
pub use domain::{
    count_by_level, ChangedFile, ExecutionMode, FileStatus, GateError, GateResult, GateSpec,
    GateStatus, Level, Overall, PullRequestContext, PullRequestMeta, RepoSpec, Result, Verdict,
    Violation, DEFAULT_ANNOTATION_BUDGET,
};
pub use gates::{
    ArtifactFindings, ForbiddenPathsGate, Gate, GateEvaluation, GateRegistry, LintArtifactGate,
    PrDescriptionGate, PrSizeGate, PrTitleGate, RequiredLabelsGate, ViolationPolicy,
};
pub use metrics::METRICS;
pub use obs::{
    emit_budget_exhausted, emit_gate_error, emit_gate_finished, emit_gate_started, emit_verdict,
    evaluation_span, EvaluationSpan,
};
pub use orchestrator::GateOrchestrator;
pub use parsers::{
    parse_eslint_json, parse_ruff_json, parse_violations, ArtifactParser, ParserConfig,
};
pub use report::{check_run_output, count_line, format_summary, CheckAnnotation, CheckRunOutput};
pub use runner::GateRunner;
pub use telemetry::init_tracing;

/// prgate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
