//! Annotation budget shared by every gate of one evaluation.
//!
//! The budget caps how many violations are surfaced per review. Reservations
//! are a single compare-and-swap, so one `Arc<AnnotationBudget>` can be
//! handed to gates running on different threads.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::violation::Violation;

/// Violations split by an annotation reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Violations granted a slot, in their original order.
    pub exposed: Vec<Violation>,
    /// Violations counted but not surfaced.
    pub overflow: usize,
}

/// Remaining annotation slots for one evaluation.
#[derive(Debug)]
pub struct AnnotationBudget {
    remaining: AtomicUsize,
}

impl AnnotationBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(limit),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Take up to `wanted` slots, returning how many were granted.
    fn take(&self, wanted: usize) -> usize {
        let mut current = self.remaining.load(Ordering::Acquire);
        loop {
            let granted = current.min(wanted);
            if granted == 0 {
                return 0;
            }
            match self.remaining.compare_exchange_weak(
                current,
                current - granted,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return granted,
                Err(actual) => current = actual,
            }
        }
    }

    /// Expose violations in order until the budget is spent; count the rest.
    ///
    /// Never fails. `remaining` drops by exactly `exposed.len()`.
    pub fn try_reserve(&self, mut violations: Vec<Violation>) -> Reservation {
        let granted = self.take(violations.len());
        let overflow = violations.len() - granted;
        violations.truncate(granted);
        Reservation {
            exposed: violations,
            overflow,
        }
    }
}
