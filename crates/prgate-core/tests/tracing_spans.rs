//! Gate events stay inside the `prgate.evaluation` span in both scheduling modes.

use std::fmt;
use std::sync::{Arc, Mutex};

use prgate_core::{
    ExecutionMode, GateOrchestrator, GateSpec, PullRequestContext, PullRequestMeta, RepoSpec,
};
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

type Seen = Arc<Mutex<Vec<(String, bool)>>>;

/// Records each `gate.*` event and whether it fired under the evaluation span.
struct GateEventCapture {
    seen: Seen,
}

struct EventName(Option<String>);

impl Visit for EventName {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

impl<S> Layer<S> for GateEventCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut name = EventName(None);
        event.record(&mut name);
        let Some(name) = name.0.filter(|n| n.starts_with("gate.")) else {
            return;
        };
        let in_evaluation = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().any(|span| span.name() == "prgate.evaluation"))
            .unwrap_or(false);
        self.seen.lock().unwrap().push((name, in_evaluation));
    }
}

fn context() -> Arc<PullRequestContext> {
    let ctx = PullRequestContext::new(PullRequestMeta {
        repository: "acme/widgets".to_string(),
        number: 9,
        title: "fix: off-by-one".to_string(),
        head_sha: "abc123".to_string(),
        ..Default::default()
    })
    .expect("valid context");
    Arc::new(ctx)
}

fn spec(execution: ExecutionMode) -> RepoSpec {
    let mut spec = RepoSpec::new(
        vec![
            GateSpec::new("size", "pr_size"),
            GateSpec::new("title", "pr_title").with_config("pattern", json!("^fix")),
            GateSpec::new("bogus", "not_registered"),
        ],
        10,
    );
    spec.execution = execution;
    spec
}

async fn capture(execution: ExecutionMode) -> Vec<(String, bool)> {
    let seen: Seen = Arc::default();
    let subscriber = tracing_subscriber::registry().with(GateEventCapture {
        seen: Arc::clone(&seen),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    GateOrchestrator::default()
        .review(&spec(execution), context())
        .await;

    let events = seen.lock().unwrap().clone();
    events
}

#[tokio::test]
async fn concurrent_gate_events_carry_evaluation_span() {
    let events = capture(ExecutionMode::Concurrent).await;

    assert_eq!(events.iter().filter(|(name, _)| name == "gate.finished").count(), 3);
    assert!(events.iter().any(|(name, _)| name == "gate.error"));
    assert!(
        events.iter().all(|(_, in_span)| *in_span),
        "events outside evaluation span: {events:?}"
    );
}

#[tokio::test]
async fn sequential_gate_events_carry_evaluation_span() {
    let events = capture(ExecutionMode::Sequential).await;

    assert_eq!(events.iter().filter(|(name, _)| name == "gate.started").count(), 3);
    assert!(events.iter().all(|(_, in_span)| *in_span));
}
