//! prgate - Pull-Request Gate CLI
//!
//! Evaluates a repository's configured gates against a pull-request context
//! and prints the verdict.
//!
//! ## Commands
//!
//! - `evaluate`: Run every configured gate and print the summary or JSON
//! - `parse`: Normalize one ESLint / Ruff artifact into violations
//! - `gates`: List the registered gate types

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, Level};

use prgate_core::{
    check_run_output, format_summary, parse_violations, CheckRunOutput, ExecutionMode,
    GateOrchestrator, Overall, ParserConfig, Verdict, Violation,
};

#[derive(Parser)]
#[command(name = "prgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pull-request gate evaluation and verdict engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a pull request against a repo spec
    Evaluate {
        /// Repo spec file (.toml or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Pull-request context file (JSON)
        #[arg(short, long)]
        context: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Run gates concurrently regardless of the spec's execution mode
        #[arg(long)]
        concurrent: bool,
    },

    /// Parse a tool artifact and print the normalized violations
    Parse {
        /// Parser name (eslint_json, ruff_json)
        #[arg(short, long)]
        parser: String,

        /// Artifact file (JSON)
        file: PathBuf,
    },

    /// List registered gate types
    Gates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

/// JSON envelope printed by `evaluate --format json`.
#[derive(Debug, Serialize)]
struct EvaluationReport {
    generated_at: DateTime<Utc>,
    verdict: Verdict,
    check_run: CheckRunOutput,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    prgate_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Evaluate {
            spec,
            context,
            format,
            concurrent,
        } => cmd_evaluate(&spec, &context, format, concurrent).await,
        Commands::Parse { parser, file } => cmd_parse(&parser, &file).map(|()| ExitCode::SUCCESS),
        Commands::Gates => {
            cmd_gates();
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn cmd_evaluate(
    spec_path: &Path,
    context_path: &Path,
    format: OutputFormat,
    concurrent: bool,
) -> Result<ExitCode> {
    let verdict = evaluate_files(spec_path, context_path, concurrent).await?;
    let overall = verdict.overall;

    match format {
        OutputFormat::Markdown => print!("{}", format_summary(&verdict)),
        OutputFormat::Json => println!("{}", render_json_report(verdict)?),
    }

    Ok(ExitCode::from(exit_status(overall)))
}

/// Load both inputs and run the review.
async fn evaluate_files(
    spec_path: &Path,
    context_path: &Path,
    concurrent: bool,
) -> Result<Verdict> {
    let mut spec = config::load_repo_spec(spec_path)?;
    let ctx = config::load_context(context_path)?;
    if concurrent {
        spec.execution = ExecutionMode::Concurrent;
    }

    info!(
        repository = ctx.repository(),
        number = ctx.number(),
        gates = spec.gates.len(),
        "Evaluating pull request"
    );

    Ok(GateOrchestrator::default()
        .review(&spec, Arc::new(ctx))
        .await)
}

fn render_json_report(verdict: Verdict) -> Result<String> {
    let check_run = check_run_output(&verdict);
    let report = EvaluationReport {
        generated_at: Utc::now(),
        verdict,
        check_run,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize evaluation report")
}

/// Only a failing verdict is a non-zero exit; neutral does not block.
fn exit_status(overall: Overall) -> u8 {
    match overall {
        Overall::Fail => 1,
        Overall::Pass | Overall::Neutral => 0,
    }
}

fn cmd_parse(parser: &str, file: &Path) -> Result<()> {
    let violations = parse_file(parser, file)?;
    println!("{}", serde_json::to_string_pretty(&violations)?);
    Ok(())
}

fn parse_file(parser: &str, file: &Path) -> Result<Vec<Violation>> {
    let raw = config::load_artifact(file)?;
    parse_violations(&raw, &ParserConfig::named(parser))
        .with_context(|| format!("Failed to parse {} as {}", file.display(), parser))
}

fn cmd_gates() {
    let orchestrator = GateOrchestrator::default();
    for gate_type in orchestrator.registry().gate_types() {
        println!("{}", gate_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prgate_core::{GateStatus, Level};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
        let spec = write(
            dir,
            "prgate.toml",
            r#"
annotation_budget = 1

[[gates]]
id = "size"
type = "pr_size"
config = { max_changed_files = 10 }

[[gates]]
id = "eslint"
type = "lint_artifact"
config = { artifact = "eslint", parser = "eslint_json" }
"#,
        );
        let context = write(
            dir,
            "context.json",
            r#"{
                "repository": "acme/web",
                "number": 42,
                "title": "feat: add login form",
                "head_sha": "deadbeef",
                "workspace_root": "/ci/web",
                "files": [{ "path": "src/login.js", "additions": 30, "deletions": 2 }],
                "artifacts": {
                    "eslint": [{
                        "filePath": "/ci/web/src/login.js",
                        "messages": [
                            { "ruleId": "no-undef", "message": "'user' is not defined.", "line": 4, "column": 3, "severity": 2 },
                            { "ruleId": "semi", "message": "Missing semicolon.", "line": 9, "column": 20, "severity": 1 }
                        ]
                    }]
                }
            }"#,
        );
        (spec, context)
    }

    #[tokio::test]
    async fn test_evaluate_files_produces_failing_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let (spec, context) = fixtures(&dir);

        let verdict = evaluate_files(&spec, &context, false).await.unwrap();
        assert_eq!(verdict.overall, Overall::Fail);
        assert_eq!(verdict.gate_results[0].status, GateStatus::Pass);
        assert_eq!(verdict.gate_results[1].status, GateStatus::Fail);
        assert_eq!(verdict.gate_results[1].violations[0].path, "src/login.js");
        assert_eq!(verdict.gate_results[1].overflow, 1);
        assert_eq!(exit_status(verdict.overall), 1);
    }

    #[tokio::test]
    async fn test_evaluate_files_concurrent_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let (spec, context) = fixtures(&dir);

        let verdict = evaluate_files(&spec, &context, true).await.unwrap();
        let ids: Vec<&str> = verdict.gate_results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["size", "eslint"]);
    }

    #[tokio::test]
    async fn test_json_report_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let (spec, context) = fixtures(&dir);

        let verdict = evaluate_files(&spec, &context, false).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json_report(verdict).unwrap()).unwrap();

        assert!(json["generated_at"].is_string());
        assert_eq!(json["verdict"]["overall"], serde_json::json!("fail"));
        assert_eq!(json["check_run"]["conclusion"], serde_json::json!("failure"));
        assert_eq!(json["check_run"]["annotations"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_neutral_does_not_fail_exit() {
        assert_eq!(exit_status(Overall::Neutral), 0);
        assert_eq!(exit_status(Overall::Pass), 0);
    }

    #[test]
    fn test_parse_file_ruff() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(
            &dir,
            "ruff.json",
            r#"[{ "code": "F401", "message": "`os` imported but unused", "filename": "a.py", "location": { "row": 1, "column": 8 } }]"#,
        );

        let violations = parse_file("ruff_json", &file).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, Level::Error);
    }

    #[test]
    fn test_parse_file_unknown_parser() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(&dir, "x.json", "[]");

        let err = parse_file("sarif", &file).unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported parser: sarif"));
    }
}
