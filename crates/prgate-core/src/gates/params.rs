//! Typed accessors over a gate's JSON config object.

use serde_json::{Map, Value};

use crate::domain::error::{GateError, Result};

pub(crate) fn opt_u64(config: &Map<String, Value>, key: &str) -> Result<Option<u64>> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            GateError::InvalidConfig(format!("'{}' must be a non-negative integer, got {}", key, v))
        }),
    }
}

pub(crate) fn opt_usize(config: &Map<String, Value>, key: &str) -> Result<Option<usize>> {
    opt_u64(config, key)?
        .map(|n| {
            usize::try_from(n)
                .map_err(|_| GateError::InvalidConfig(format!("'{}' is out of range", key)))
        })
        .transpose()
}

pub(crate) fn opt_bool(config: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(v) => Err(GateError::InvalidConfig(format!(
            "'{}' must be a boolean, got {}",
            key, v
        ))),
    }
}

pub(crate) fn opt_str<'a>(config: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(v) => Err(GateError::InvalidConfig(format!(
            "'{}' must be a string, got {}",
            key, v
        ))),
    }
}

pub(crate) fn require_str<'a>(config: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    opt_str(config, key)?
        .ok_or_else(|| GateError::InvalidConfig(format!("missing required key '{}'", key)))
}

/// A list of strings; absent means empty.
pub(crate) fn string_list(config: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    GateError::InvalidConfig(format!("'{}' must only contain strings", key))
                })
            })
            .collect(),
        Some(v) => Err(GateError::InvalidConfig(format!(
            "'{}' must be an array of strings, got {}",
            key, v
        ))),
    }
}
