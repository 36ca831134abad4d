//! Domain-level error taxonomy for prgate.

/// Errors produced while parsing artifacts, validating inputs or running a gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Artifact payload has the wrong shape for its parser.
    #[error("{parser} format error: {reason}")]
    Format { parser: String, reason: String },

    #[error("unsupported parser: {name}")]
    UnsupportedParser { name: String },

    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Failure inside one gate's own logic.
    #[error("gate '{gate}' failed: {reason}")]
    GateExecution { gate: String, reason: String },

    #[error("invalid pull request context: {0}")]
    InvalidContext(String),

    #[error("invalid gate config: {0}")]
    InvalidConfig(String),
}

impl GateError {
    pub(crate) fn format(parser: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            parser: parser.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for prgate domain operations.
pub type Result<T> = std::result::Result<T, GateError>;
