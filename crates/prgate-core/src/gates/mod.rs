//! Gate implementations and the registry that resolves them by type name.
//!
//! A gate either decides its status directly from the pull-request context,
//! or hands a raw tool artifact back to the runner together with the policy
//! that judges the parsed violations.

pub mod lint;
pub mod metadata;
pub(crate) mod params;
pub mod paths;
pub mod size;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::context::PullRequestContext;
use crate::domain::error::Result;
use crate::domain::result::GateStatus;
use crate::domain::violation::{count_by_level, Violation};
use crate::parsers::ParserConfig;

pub use lint::LintArtifactGate;
pub use metadata::{PrDescriptionGate, PrTitleGate, RequiredLabelsGate};
pub use paths::ForbiddenPathsGate;
pub use size::PrSizeGate;

/// A single policy check evaluated against a pull request.
pub trait Gate: Send + Sync {
    /// Type name used in `GateSpec.type`.
    fn gate_type(&self) -> &'static str;

    /// Evaluate against `ctx` using this entry's config slice.
    fn evaluate<'ctx>(
        &self,
        ctx: &'ctx PullRequestContext,
        config: &Map<String, Value>,
    ) -> Result<GateEvaluation<'ctx>>;
}

/// What a gate hands back to the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum GateEvaluation<'ctx> {
    /// Status fully decided by the gate.
    Decided { status: GateStatus, detail: String },
    /// A raw artifact the runner must parse and judge.
    Artifact(ArtifactFindings<'ctx>),
}

impl GateEvaluation<'_> {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self::Decided {
            status: GateStatus::Pass,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self::Decided {
            status: GateStatus::Fail,
            detail: detail.into(),
        }
    }

    pub fn neutral(detail: impl Into<String>) -> Self {
        Self::Decided {
            status: GateStatus::Neutral,
            detail: detail.into(),
        }
    }
}

/// Raw artifact plus the rules for judging it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactFindings<'ctx> {
    /// Artifact key in the context.
    pub artifact: String,
    pub raw: &'ctx Value,
    pub parser: ParserConfig,
    pub policy: ViolationPolicy,
}

/// Thresholds on parsed violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViolationPolicy {
    pub max_errors: usize,
    /// `None` means warnings never fail the gate.
    pub max_warnings: Option<usize>,
}

impl Default for ViolationPolicy {
    fn default() -> Self {
        Self {
            max_errors: 0,
            max_warnings: None,
        }
    }
}

impl ViolationPolicy {
    /// Decide the gate status over the full parsed list.
    pub fn judge(&self, violations: &[Violation]) -> (GateStatus, String) {
        let (errors, warnings, infos) = count_by_level(violations);
        let summary = format!("{errors} error(s), {warnings} warning(s), {infos} info");

        let mut reasons = Vec::new();
        if errors > self.max_errors {
            reasons.push(format!("errors {} > max allowed {}", errors, self.max_errors));
        }
        if let Some(max_warnings) = self.max_warnings {
            if warnings > max_warnings {
                reasons.push(format!("warnings {warnings} > max allowed {max_warnings}"));
            }
        }

        if reasons.is_empty() {
            (GateStatus::Pass, summary)
        } else {
            (GateStatus::Fail, format!("{summary}: {}", reasons.join("; ")))
        }
    }
}

/// Gate implementations keyed by type name, built once at startup.
#[derive(Clone, Default)]
pub struct GateRegistry {
    gates: HashMap<&'static str, Arc<dyn Gate>>,
}

impl GateRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in gate.
    pub fn builtin() -> Self {
        Self::new()
            .with_gate(Arc::new(LintArtifactGate))
            .with_gate(Arc::new(PrSizeGate))
            .with_gate(Arc::new(PrTitleGate))
            .with_gate(Arc::new(PrDescriptionGate))
            .with_gate(Arc::new(RequiredLabelsGate))
            .with_gate(Arc::new(ForbiddenPathsGate))
    }

    /// Register a gate, replacing any gate with the same type name.
    pub fn with_gate(mut self, gate: Arc<dyn Gate>) -> Self {
        self.register(gate);
        self
    }

    pub fn register(&mut self, gate: Arc<dyn Gate>) {
        self.gates.insert(gate.gate_type(), gate);
    }

    pub fn get(&self, gate_type: &str) -> Option<Arc<dyn Gate>> {
        self.gates.get(gate_type).cloned()
    }

    /// Registered type names, sorted.
    pub fn gate_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.gates.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

impl std::fmt::Debug for GateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateRegistry")
            .field("gates", &self.gate_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violation::Level;

    fn v(level: Level) -> Violation {
        Violation::new("r".into(), "m".into(), "p".into(), level)
    }

    #[test]
    fn test_builtin_registry_types() {
        let registry = GateRegistry::builtin();
        assert_eq!(
            registry.gate_types(),
            vec![
                "forbidden_paths",
                "lint_artifact",
                "pr_description",
                "pr_size",
                "pr_title",
                "required_labels",
            ]
        );
        assert!(registry.get("pr_size").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_policy_default_fails_on_any_error() {
        let policy = ViolationPolicy::default();
        let (status, detail) = policy.judge(&[v(Level::Warning), v(Level::Error)]);
        assert_eq!(status, GateStatus::Fail);
        assert!(detail.contains("errors 1 > max allowed 0"));
    }

    #[test]
    fn test_policy_warnings_ignored_without_limit() {
        let policy = ViolationPolicy::default();
        let (status, _) = policy.judge(&[v(Level::Warning), v(Level::Warning)]);
        assert_eq!(status, GateStatus::Pass);
    }

    #[test]
    fn test_policy_warning_limit() {
        let policy = ViolationPolicy {
            max_errors: 5,
            max_warnings: Some(1),
        };
        let (status, detail) = policy.judge(&[v(Level::Warning), v(Level::Warning)]);
        assert_eq!(status, GateStatus::Fail);
        assert!(detail.contains("warnings 2 > max allowed 1"));
    }
}
