//! Global atomic counters for gate evaluation.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of an evaluation).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, no allocations and no locking.
pub struct Metrics {
    gates_evaluated: AtomicU64,
    gates_errored: AtomicU64,
    violations_exposed: AtomicU64,
    violations_overflowed: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            gates_evaluated: AtomicU64::new(0),
            gates_errored: AtomicU64::new(0),
            violations_exposed: AtomicU64::new(0),
            violations_overflowed: AtomicU64::new(0),
        }
    }

    pub fn inc_gates_evaluated(&self) {
        self.gates_evaluated.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "gates_evaluated", "counter incremented");
    }

    pub fn inc_gates_errored(&self) {
        self.gates_errored.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "gates_errored", "counter incremented");
    }

    /// Record one reservation's exposed/overflow split.
    pub fn add_violations(&self, exposed: usize, overflow: usize) {
        self.violations_exposed
            .fetch_add(exposed as u64, Ordering::Relaxed);
        self.violations_overflowed
            .fetch_add(overflow as u64, Ordering::Relaxed);
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            gates_evaluated = self.gates_evaluated(),
            gates_errored = self.gates_errored(),
            violations_exposed = self.violations_exposed(),
            violations_overflowed = self.violations_overflowed(),
        );
    }

    pub fn gates_evaluated(&self) -> u64 {
        self.gates_evaluated.load(Ordering::Relaxed)
    }

    pub fn gates_errored(&self) -> u64 {
        self.gates_errored.load(Ordering::Relaxed)
    }

    pub fn violations_exposed(&self) -> u64 {
        self.violations_exposed.load(Ordering::Relaxed)
    }

    pub fn violations_overflowed(&self) -> u64 {
        self.violations_overflowed.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.gates_evaluated.store(0, Ordering::Relaxed);
        self.gates_errored.store(0, Ordering::Relaxed);
        self.violations_exposed.store(0, Ordering::Relaxed);
        self.violations_overflowed.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        m.inc_gates_evaluated();
        m.inc_gates_evaluated();
        m.inc_gates_errored();
        m.add_violations(3, 2);
        m.add_violations(1, 0);

        assert_eq!(m.gates_evaluated(), 2);
        assert_eq!(m.gates_errored(), 1);
        assert_eq!(m.violations_exposed(), 4);
        assert_eq!(m.violations_overflowed(), 2);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_gates_evaluated();
        m.inc_gates_errored();
        m.add_violations(5, 5);
        m.reset();
        assert_eq!(m.gates_evaluated(), 0);
        assert_eq!(m.gates_errored(), 0);
        assert_eq!(m.violations_exposed(), 0);
        assert_eq!(m.violations_overflowed(), 0);
    }
}
