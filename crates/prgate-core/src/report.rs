//! Verdict report rendering.
//!
//! Provides two pure projections of a [`Verdict`] for the check publisher:
//! - [`format_summary`]: Markdown summary text (banner, counts, one section per gate)
//! - [`check_run_output`]: check-run payload with per-violation annotations

use serde::{Deserialize, Serialize};

use crate::domain::result::{GateResult, GateStatus};
use crate::domain::verdict::Verdict;
use crate::domain::violation::{Level, Violation};

/// Upper bound on violations listed per gate section.
pub const MAX_LISTED_PER_GATE: usize = 50;

/// One-line gate tally, e.g. `✅ 3 passed | ❌ 0 failed | ⚠️ 0 neutral`.
pub fn count_line(verdict: &Verdict) -> String {
    format!(
        "✅ {} passed | ❌ {} failed | ⚠️ {} neutral",
        verdict.passed, verdict.failed, verdict.neutral
    )
}

fn status_icon(status: GateStatus) -> &'static str {
    match status {
        GateStatus::Pass => "✅",
        GateStatus::Fail => "❌",
        GateStatus::Neutral => "⚠️",
        GateStatus::Error => "❗",
    }
}

/// Render the verdict as Markdown.
pub fn format_summary(verdict: &Verdict) -> String {
    let mut md = format!("## {}\n\n", verdict.overall.banner());
    md.push_str(&count_line(verdict));
    md.push('\n');

    let overflow = verdict.overflow();
    if overflow > 0 {
        md.push_str(&format!(
            "\n_{} violation(s) annotated, {} hidden by the annotation budget._\n",
            verdict.exposed_violations(),
            overflow
        ));
    }

    if verdict.gate_results.is_empty() {
        md.push_str("\nNo gates configured.\n");
        return md;
    }

    for result in &verdict.gate_results {
        md.push_str(&render_gate_section(result));
    }
    md
}

fn render_gate_section(result: &GateResult) -> String {
    let mut md = format!(
        "\n### {} {} (`{}`): {}\n\n",
        status_icon(result.status),
        escape_md(&result.id),
        result.gate_type,
        result.status.as_str()
    );

    if result.detail.is_empty() {
        md.push_str("_No detail._\n");
    } else {
        md.push_str(&escape_md(&result.detail));
        md.push('\n');
    }

    if result.violations.is_empty() && result.overflow == 0 {
        return md;
    }

    md.push('\n');
    for violation in result.violations.iter().take(MAX_LISTED_PER_GATE) {
        md.push_str(&render_violation(violation));
    }
    if result.violations.len() > MAX_LISTED_PER_GATE {
        md.push_str(&format!(
            "- _{} more annotated violation(s) not listed_\n",
            result.violations.len() - MAX_LISTED_PER_GATE
        ));
    }
    if result.overflow > 0 {
        md.push_str(&format!(
            "- _{} more violation(s) not shown (annotation budget exhausted)_\n",
            result.overflow
        ));
    }
    md
}

fn render_violation(v: &Violation) -> String {
    format!(
        "- `{}` **{}** `{}`: {}\n",
        escape_code(&v.location()),
        v.level.as_str(),
        escape_code(&v.code),
        escape_md(&v.message)
    )
}

fn escape_md(s: &str) -> String {
    s.replace('\n', " ")
}

fn escape_code(s: &str) -> String {
    s.replace('`', "'")
}

// check-run payload

/// A single line annotation on the check run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckAnnotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    pub annotation_level: String,
    pub title: String,
    pub message: String,
}

/// Everything the external publisher needs to create a check run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckRunOutput {
    /// `success`, `failure` or `neutral`.
    pub conclusion: String,
    pub title: String,
    pub summary: String,
    pub annotations: Vec<CheckAnnotation>,
}

fn annotation_level(level: Level) -> &'static str {
    match level {
        Level::Error => "failure",
        Level::Warning => "warning",
        Level::Info => "notice",
    }
}

/// Project a verdict into a check-run payload.
pub fn check_run_output(verdict: &Verdict) -> CheckRunOutput {
    let annotations = verdict
        .gate_results
        .iter()
        .flat_map(|result| {
            result.violations.iter().map(move |v| {
                let line = v.line.unwrap_or(1).max(1);
                CheckAnnotation {
                    path: v.path.clone(),
                    start_line: line,
                    end_line: line,
                    start_column: v.column,
                    annotation_level: annotation_level(v.level).to_string(),
                    title: format!("[{}] {}", v.code, result.id),
                    message: v.message.clone(),
                }
            })
        })
        .collect();

    CheckRunOutput {
        conclusion: verdict.overall.conclusion().to_string(),
        title: format!("{}: {}", verdict.overall.banner(), count_line(verdict)),
        summary: format_summary(verdict),
        annotations,
    }
}
