//! Verdict aggregation over gate results.

use crate::domain::result::{GateResult, GateStatus};
use crate::domain::verdict::{Overall, Verdict};

/// Reduce gate results to one verdict.
///
/// Any fail or error fails the verdict; otherwise any neutral makes it
/// neutral; all-pass passes. No gates at all is neutral. Errors are tallied
/// with `failed` but keep their own status on the result.
pub fn aggregate(gate_results: Vec<GateResult>) -> Verdict {
    let mut passed = 0;
    let mut failed = 0;
    let mut neutral = 0;

    for result in &gate_results {
        if result.status.is_blocking() {
            failed += 1;
        } else if result.status == GateStatus::Neutral {
            neutral += 1;
        } else {
            passed += 1;
        }
    }

    let overall = if failed > 0 {
        Overall::Fail
    } else if neutral > 0 || gate_results.is_empty() {
        Overall::Neutral
    } else {
        Overall::Pass
    };

    Verdict {
        overall,
        passed,
        failed,
        neutral,
        gate_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(statuses: &[GateStatus]) -> Vec<GateResult> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| GateResult::new(&format!("g{i}"), "pr_size", *s, String::new()))
            .collect()
    }

    #[test]
    fn test_all_pass() {
        let v = aggregate(results(&[GateStatus::Pass, GateStatus::Pass]));
        assert_eq!(v.overall, Overall::Pass);
        assert_eq!((v.passed, v.failed, v.neutral), (2, 0, 0));
    }

    #[test]
    fn test_fail_dominates() {
        let v = aggregate(results(&[GateStatus::Pass, GateStatus::Fail]));
        assert_eq!(v.overall, Overall::Fail);
    }

    #[test]
    fn test_neutral_without_failures() {
        let v = aggregate(results(&[GateStatus::Pass, GateStatus::Neutral]));
        assert_eq!(v.overall, Overall::Neutral);
    }

    #[test]
    fn test_empty_is_neutral() {
        let v = aggregate(Vec::new());
        assert_eq!(v.overall, Overall::Neutral);
        assert_eq!((v.passed, v.failed, v.neutral), (0, 0, 0));
    }

    #[test]
    fn test_error_counts_as_failed_but_stays_distinct() {
        let v = aggregate(results(&[
            GateStatus::Error,
            GateStatus::Neutral,
            GateStatus::Pass,
        ]));
        assert_eq!(v.overall, Overall::Fail);
        assert_eq!((v.passed, v.failed, v.neutral), (1, 1, 1));
        assert_eq!(v.errored(), 1);
        assert_eq!(v.gate_results[0].status, GateStatus::Error);
    }

    #[test]
    fn test_tallies_cover_every_result() {
        let v = aggregate(results(&[
            GateStatus::Pass,
            GateStatus::Fail,
            GateStatus::Error,
            GateStatus::Neutral,
            GateStatus::Pass,
        ]));
        assert_eq!(v.passed + v.failed + v.neutral, v.gate_results.len());
    }
}
