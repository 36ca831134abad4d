//! Overall verdict types.

use serde::{Deserialize, Serialize};

use super::result::GateResult;

/// Overall pull-request outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Overall {
    Pass,
    Fail,
    Neutral,
}

impl Overall {
    /// Banner text used in reports.
    pub fn banner(&self) -> &'static str {
        match self {
            Overall::Pass => "PASS",
            Overall::Fail => "FAIL",
            Overall::Neutral => "NEUTRAL",
        }
    }

    /// Check-run conclusion understood by the hosting platform.
    pub fn conclusion(&self) -> &'static str {
        match self {
            Overall::Pass => "success",
            Overall::Fail => "failure",
            Overall::Neutral => "neutral",
        }
    }
}

/// Aggregated outcome of every configured gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub overall: Overall,
    pub passed: usize,
    /// Failed gates, including errored ones.
    pub failed: usize,
    pub neutral: usize,
    pub gate_results: Vec<GateResult>,
}

impl Verdict {
    /// Number of gates that errored (a subset of `failed`).
    pub fn errored(&self) -> usize {
        self.gate_results
            .iter()
            .filter(|r| r.status == super::result::GateStatus::Error)
            .count()
    }

    /// Violations surfaced across all gates.
    pub fn exposed_violations(&self) -> usize {
        self.gate_results.iter().map(|r| r.violations.len()).sum()
    }

    /// Violations hidden by the annotation budget across all gates.
    pub fn overflow(&self) -> usize {
        self.gate_results.iter().map(|r| r.overflow).sum()
    }
}
