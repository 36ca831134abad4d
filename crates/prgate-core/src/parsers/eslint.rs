//! ESLint `--format json` reports.
//!
//! Input is an array of file reports:
//! `{ filePath, messages: [{ ruleId, message, line, column, severity, nodeType }],
//! errorCount, warningCount }`.

use serde_json::Value;

use crate::domain::error::{GateError, Result};
use crate::domain::violation::{Level, Violation};

use super::{copy_meta, opt_u32};

pub(crate) const NAME: &str = "eslint_json";

/// Parse an ESLint JSON report into violations, one per message.
pub fn parse_eslint_json(raw: &Value) -> Result<Vec<Violation>> {
    let reports = raw.as_array().ok_or_else(|| {
        GateError::format(NAME, "input must be an array of file reports")
    })?;

    let mut violations = Vec::new();
    for (index, report) in reports.iter().enumerate() {
        let report = report.as_object().ok_or_else(|| {
            GateError::format(NAME, format!("file report #{} is not an object", index))
        })?;

        let path = report
            .get("filePath")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let Some(messages) = report.get("messages").and_then(Value::as_array) else {
            continue;
        };

        for (j, message) in messages.iter().enumerate() {
            if !message.is_object() {
                let reason = format!("file report #{index} message #{j} is not an object");
                return Err(GateError::format(NAME, reason));
            }
            violations.push(message_to_violation(path, message));
        }
    }

    Ok(violations)
}

fn message_to_violation(path: &str, message: &Value) -> Violation {
    let code = message
        .get("ruleId")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let text = message
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("No message");

    let mut violation = Violation::new(
        code.to_string(),
        text.to_string(),
        path.to_string(),
        severity_to_level(message.get("severity")),
    )
    .with_location(opt_u32(message.get("line")), opt_u32(message.get("column")));

    copy_meta(&mut violation, message, &["severity", "nodeType"]);
    violation
}

/// ESLint severities: 2 = error, 1 = warning, anything else = info.
///
/// Whole-number floats (`2.0`) count as their integer value.
fn severity_to_level(severity: Option<&Value>) -> Level {
    let severity = severity.and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
    });
    match severity {
        Some(2) => Level::Error,
        Some(1) => Level::Warning,
        _ => Level::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(severity_to_level(Some(&json!(2))), Level::Error);
        assert_eq!(severity_to_level(Some(&json!(1))), Level::Warning);
        assert_eq!(severity_to_level(Some(&json!(0))), Level::Info);
        assert_eq!(severity_to_level(Some(&json!("2"))), Level::Info);
        assert_eq!(severity_to_level(Some(&json!(2.0))), Level::Error);
        assert_eq!(severity_to_level(Some(&json!(1.0))), Level::Warning);
        assert_eq!(severity_to_level(Some(&json!(1.5))), Level::Info);
        assert_eq!(severity_to_level(None), Level::Info);
    }

    #[test]
    fn test_missing_messages_key_yields_nothing() {
        let raw = json!([{ "filePath": "a.js" }]);
        let violations = parse_eslint_json(&raw).expect("parse");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_non_object_report_is_format_error() {
        let err = parse_eslint_json(&json!([42])).expect_err("number report");
        assert!(matches!(err, GateError::Format { .. }));
    }
}
