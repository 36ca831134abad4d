//! Artifact parsers turning tool-specific JSON into canonical [`Violation`]s.
//!
//! Parser names resolve once into the closed [`ArtifactParser`] enum; there is
//! no fallback mapping for unknown tools.

pub mod eslint;
pub mod ruff;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{GateError, Result};
use crate::domain::violation::Violation;

pub use eslint::parse_eslint_json;
pub use ruff::parse_ruff_json;

/// Supported artifact formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactParser {
    EslintJson,
    RuffJson,
}

impl ArtifactParser {
    pub const ALL: [ArtifactParser; 2] = [ArtifactParser::EslintJson, ArtifactParser::RuffJson];

    pub fn name(&self) -> &'static str {
        match self {
            ArtifactParser::EslintJson => eslint::NAME,
            ArtifactParser::RuffJson => ruff::NAME,
        }
    }

    pub fn parse(&self, raw: &Value) -> Result<Vec<Violation>> {
        match self {
            ArtifactParser::EslintJson => parse_eslint_json(raw),
            ArtifactParser::RuffJson => parse_ruff_json(raw),
        }
    }
}

impl fmt::Display for ArtifactParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactParser {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| GateError::UnsupportedParser {
                name: s.to_string(),
            })
    }
}

/// Parser selection for one artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParserConfig {
    #[serde(default)]
    pub parser: Option<String>,

    /// Field mapping for tools without a built-in parser. Not supported.
    #[serde(default)]
    pub custom_mapping: Option<Value>,
}

impl ParserConfig {
    pub fn named(parser: &str) -> Self {
        Self {
            parser: Some(parser.to_string()),
            custom_mapping: None,
        }
    }

    /// Read `parser` / `custom_mapping` out of a gate config object.
    pub fn from_config(config: &Map<String, Value>) -> Result<Self> {
        let parser = match config.get("parser") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(GateError::InvalidConfig(format!(
                    "'parser' must be a string, got {}",
                    other
                )))
            }
        };
        Ok(Self {
            parser,
            custom_mapping: config
                .get("custom_mapping")
                .filter(|mapping| !mapping.is_null())
                .cloned(),
        })
    }

    /// Resolve to a built-in parser.
    ///
    /// A known `parser` name wins; a `custom_mapping` in place of one is
    /// rejected as not implemented; anything else is unsupported.
    pub fn resolve(&self) -> Result<ArtifactParser> {
        match (&self.parser, &self.custom_mapping) {
            (Some(name), mapping) => match name.parse::<ArtifactParser>() {
                Ok(parser) => Ok(parser),
                Err(_) if mapping.is_some() => Err(custom_mapping_error()),
                Err(e) => Err(e),
            },
            (None, Some(_)) => Err(custom_mapping_error()),
            (None, None) => Err(GateError::UnsupportedParser {
                name: "<none>".to_string(),
            }),
        }
    }
}

fn custom_mapping_error() -> GateError {
    GateError::NotImplemented("custom_mapping artifact parsing".to_string())
}

/// Parse a raw artifact with the parser selected by `config`.
pub fn parse_violations(raw: &Value, config: &ParserConfig) -> Result<Vec<Violation>> {
    config.resolve()?.parse(raw)
}

/// Read a JSON number as `u32`, treating anything else as absent.
pub(crate) fn opt_u32(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Copy the listed keys from `source` into `violation.meta` verbatim.
pub(crate) fn copy_meta(violation: &mut Violation, source: &Value, keys: &[&str]) {
    for key in keys {
        if let Some(value) = source.get(*key) {
            violation.meta.insert((*key).to_string(), value.clone());
        }
    }
}
