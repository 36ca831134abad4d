//! Repository gate specification and identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::error::{GateError, Result};

/// Default cap on surfaced violations for one evaluation.
pub const DEFAULT_ANNOTATION_BUDGET: usize = 50;

/// One configured gate. Listing it is what enables it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GateSpec {
    pub id: String,

    /// Registered gate implementation name (e.g. "lint_artifact").
    #[serde(rename = "type")]
    pub gate_type: String,

    #[serde(default)]
    pub config: Map<String, Value>,
}

impl GateSpec {
    pub fn new(id: impl Into<String>, gate_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            gate_type: gate_type.into(),
            config: Map::new(),
        }
    }

    /// Set one config entry.
    pub fn with_config(mut self, key: &str, value: Value) -> Self {
        self.config.insert(key.to_string(), value);
        self
    }
}

/// How the orchestrator schedules gates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Concurrent,
}

/// Declarative gate configuration of a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoSpec {
    #[serde(default)]
    pub gates: Vec<GateSpec>,

    #[serde(default = "default_annotation_budget")]
    pub annotation_budget: usize,

    #[serde(default)]
    pub execution: ExecutionMode,
}

fn default_annotation_budget() -> usize {
    DEFAULT_ANNOTATION_BUDGET
}

impl Default for RepoSpec {
    fn default() -> Self {
        Self {
            gates: Vec::new(),
            annotation_budget: DEFAULT_ANNOTATION_BUDGET,
            execution: ExecutionMode::Sequential,
        }
    }
}

impl RepoSpec {
    pub fn new(gates: Vec<GateSpec>, annotation_budget: usize) -> Self {
        Self {
            gates,
            annotation_budget,
            execution: ExecutionMode::Sequential,
        }
    }

    /// Reject entries with an empty id or type.
    pub fn validate(&self) -> Result<()> {
        for (index, gate) in self.gates.iter().enumerate() {
            if gate.id.trim().is_empty() {
                return Err(GateError::InvalidConfig(format!(
                    "gate #{} has an empty id",
                    index
                )));
            }
            if gate.gate_type.trim().is_empty() {
                return Err(GateError::InvalidConfig(format!(
                    "gate '{}' has an empty type",
                    gate.id
                )));
            }
        }
        Ok(())
    }

    /// SHA-256 digest of ordered `(id, type)` pairs.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for gate in &self.gates {
            hasher.update(gate.id.as_bytes());
            hasher.update(b"\0");
            hasher.update(gate.gate_type.as_bytes());
            hasher.update(b"\0");
        }
        hex::encode(hasher.finalize())
    }
}
