//! Per-gate evaluation results.

use serde::{Deserialize, Serialize};

use super::violation::Violation;

/// Outcome status of a single gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Pass,
    Fail,
    Neutral,
    /// The gate could not be evaluated (unknown type, bad config, parse failure, panic).
    Error,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Pass => "pass",
            GateStatus::Fail => "fail",
            GateStatus::Neutral => "neutral",
            GateStatus::Error => "error",
        }
    }

    /// Whether this status blocks the pull request.
    pub fn is_blocking(&self) -> bool {
        matches!(self, GateStatus::Fail | GateStatus::Error)
    }
}

/// Result of running one configured gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GateResult {
    /// Gate id from the repository spec.
    pub id: String,

    /// Gate implementation name.
    pub gate_type: String,

    pub status: GateStatus,

    /// Violations surfaced within the annotation budget.
    pub violations: Vec<Violation>,

    /// Violations found but not surfaced because the budget ran out.
    pub overflow: usize,

    pub detail: String,

    pub duration_ms: u64,
}

impl GateResult {
    pub fn new(id: &str, gate_type: &str, status: GateStatus, detail: String) -> Self {
        Self {
            id: id.to_string(),
            gate_type: gate_type.to_string(),
            status,
            violations: Vec::new(),
            overflow: 0,
            detail,
            duration_ms: 0,
        }
    }

    pub fn error(id: &str, gate_type: &str, detail: String) -> Self {
        Self::new(id, gate_type, GateStatus::Error, detail)
    }

    /// Total violations found, surfaced or not.
    pub fn total_violations(&self) -> usize {
        self.violations.len() + self.overflow
    }
}
