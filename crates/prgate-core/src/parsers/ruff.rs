//! Ruff `--output-format json` reports.
//!
//! Input is a flat array of
//! `{ code, message, filename, location: { row, column }, fix, noqa, url }`.

use serde_json::Value;

use crate::domain::error::{GateError, Result};
use crate::domain::violation::{Level, Violation};

use super::{copy_meta, opt_u32};

pub(crate) const NAME: &str = "ruff_json";

/// Parse a Ruff JSON report. Every entry is an error; Ruff carries no severity.
pub fn parse_ruff_json(raw: &Value) -> Result<Vec<Violation>> {
    let entries = raw
        .as_array()
        .ok_or_else(|| GateError::format(NAME, "input must be an array of violations"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(GateError::format(
                    NAME,
                    format!("entry #{} is not an object", index),
                ));
            }
            Ok(entry_to_violation(entry))
        })
        .collect()
}

fn entry_to_violation(entry: &Value) -> Violation {
    let code = entry.get("code").and_then(Value::as_str).unwrap_or("RUF");
    let message = entry
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("No message");
    let path = entry
        .get("filename")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let location = entry.get("location");
    let line = opt_u32(location.and_then(|l| l.get("row")));
    let column = opt_u32(location.and_then(|l| l.get("column")));

    let mut violation = Violation::new(
        code.to_string(),
        message.to_string(),
        path.to_string(),
        Level::Error,
    )
    .with_location(line, column);

    copy_meta(&mut violation, entry, &["fix", "noqa", "url"]);
    violation
}
