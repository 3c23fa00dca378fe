//! Health scoring engine
//!
//! A fixed battery of weighted checks evaluated against one snapshot of
//! remote state. The additive penalty model is deliberate: every
//! deduction maps to exactly one human-readable cause, so an operator
//! can reconstruct why a score dropped.

use serde::Serialize;

/// Snapshot of remote state taken at the start of a health run.
///
/// Probe failures are data, not aborts: a field that could not be read
/// is `None` and scores as if the probe had failed.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    /// Memory used/total percentage, when the free output parsed
    pub memory_percent: Option<f64>,

    /// Running container count, when docker answered
    pub running_containers: Option<usize>,

    /// Containers expected on a healthy host
    pub expected_containers: usize,

    /// Primary auth service detected running
    pub auth_running: bool,

    /// Inference service detected running
    pub inference_running: bool,

    /// Relational engine answered the liveness ping
    pub mysql_alive: bool,

    /// Key-value store answered PING with PONG
    pub redis_alive: bool,
}

/// One weighted condition in the check battery.
pub struct HealthCheck {
    pub id: &'static str,
    pub weight: u32,
    /// Operator-facing cause shown when the check triggers
    pub message: &'static str,
    /// Operator-facing line shown when the check passes
    pub ok_message: &'static str,
    pub predicate: fn(&HealthSnapshot) -> bool,
}

/// The fixed check battery, in display order. Predicates never
/// short-circuit each other; each is evaluated against the same
/// snapshot. The two memory checks are mutually exclusive.
pub const CHECKS: &[HealthCheck] = &[
    HealthCheck {
        id: "memory-critical",
        weight: 20,
        message: "memory usage at or above 85%",
        ok_message: "memory below 85%",
        predicate: |s| s.memory_percent.map_or(true, |p| p >= 85.0),
    },
    HealthCheck {
        id: "memory-elevated",
        weight: 10,
        message: "memory usage at or above 70%",
        ok_message: "memory outside the 70-85% band",
        predicate: |s| s.memory_percent.is_some_and(|p| (70.0..85.0).contains(&p)),
    },
    HealthCheck {
        id: "containers-missing",
        weight: 30,
        message: "fewer containers running than expected",
        ok_message: "all expected containers running",
        predicate: |s| s.running_containers.map_or(true, |n| n < s.expected_containers),
    },
    HealthCheck {
        id: "auth-down",
        weight: 15,
        message: "auth service not running",
        ok_message: "auth service running",
        predicate: |s| !s.auth_running,
    },
    HealthCheck {
        id: "inference-down",
        weight: 15,
        message: "inference service not running",
        ok_message: "inference service running",
        predicate: |s| !s.inference_running,
    },
    HealthCheck {
        id: "mysql-down",
        weight: 20,
        message: "relational database failed liveness ping",
        ok_message: "relational database alive",
        predicate: |s| !s.mysql_alive,
    },
    HealthCheck {
        id: "redis-down",
        weight: 10,
        message: "key-value store failed liveness ping",
        ok_message: "key-value store alive",
        predicate: |s| !s.redis_alive,
    },
];

/// Outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub id: &'static str,
    pub weight: u32,
    pub triggered: bool,
    pub message: &'static str,
    pub ok_message: &'static str,
}

/// Verdict tier for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HealthTier {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl HealthTier {
    /// Tier boundaries are inclusive on the upper side: 90/70/50.
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            HealthTier::Excellent
        } else if score >= 70 {
            HealthTier::Good
        } else if score >= 50 {
            HealthTier::Warning
        } else {
            HealthTier::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "excellent",
            HealthTier::Good => "good (optimize)",
            HealthTier::Warning => "warning (needs attention)",
            HealthTier::Critical => "critical (act immediately)",
        }
    }
}

/// Aggregate outcome of one health run.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub results: Vec<CheckResult>,
    /// 100 minus the sum of triggered deductions, before the floor
    pub raw_score: i32,
}

impl HealthReport {
    /// Final score, floored at zero. The deduction table can sum past
    /// 100 when several severe checks trigger together.
    pub fn score(&self) -> u32 {
        self.raw_score.max(0) as u32
    }

    pub fn tier(&self) -> HealthTier {
        HealthTier::from_score(self.score())
    }
}

/// Evaluate the full check battery against one snapshot.
pub fn evaluate(snapshot: &HealthSnapshot) -> HealthReport {
    let results: Vec<CheckResult> = CHECKS
        .iter()
        .map(|check| CheckResult {
            id: check.id,
            weight: check.weight,
            triggered: (check.predicate)(snapshot),
            message: check.message,
            ok_message: check.ok_message,
        })
        .collect();

    let deductions: i32 = results
        .iter()
        .filter(|r| r.triggered)
        .map(|r| r.weight as i32)
        .sum();

    HealthReport {
        results,
        raw_score: 100 - deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_snapshot() -> HealthSnapshot {
        HealthSnapshot {
            memory_percent: Some(60.0),
            running_containers: Some(7),
            expected_containers: 7,
            auth_running: true,
            inference_running: true,
            mysql_alive: true,
            redis_alive: true,
        }
    }

    #[test]
    fn test_all_healthy_scores_100() {
        let report = evaluate(&healthy_snapshot());
        assert_eq!(report.score(), 100);
        assert_eq!(report.tier(), HealthTier::Excellent);
        assert!(report.results.iter().all(|r| !r.triggered));
    }

    #[test]
    fn test_degraded_host_scores_critical() {
        // memory 90%, 5/7 containers, auth down, everything else fine
        let snapshot = HealthSnapshot {
            memory_percent: Some(90.0),
            running_containers: Some(5),
            auth_running: false,
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);
        assert_eq!(report.score(), 35);
        assert_eq!(report.tier(), HealthTier::Critical);
    }

    #[test]
    fn test_elevated_memory_and_redis_down() {
        let snapshot = HealthSnapshot {
            memory_percent: Some(75.0),
            redis_alive: false,
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);
        assert_eq!(report.score(), 80);
        assert_eq!(report.tier(), HealthTier::Good);
    }

    #[test]
    fn test_memory_checks_are_exclusive() {
        let critical = evaluate(&HealthSnapshot {
            memory_percent: Some(85.0),
            ..healthy_snapshot()
        });
        let triggered: Vec<_> = critical
            .results
            .iter()
            .filter(|r| r.triggered)
            .map(|r| r.id)
            .collect();
        assert_eq!(triggered, vec!["memory-critical"]);

        let elevated = evaluate(&HealthSnapshot {
            memory_percent: Some(70.0),
            ..healthy_snapshot()
        });
        let triggered: Vec<_> = elevated
            .results
            .iter()
            .filter(|r| r.triggered)
            .map(|r| r.id)
            .collect();
        assert_eq!(triggered, vec!["memory-elevated"]);
    }

    #[test]
    fn test_everything_down_floors_at_zero() {
        let report = evaluate(&HealthSnapshot {
            expected_containers: 7,
            ..HealthSnapshot::default()
        });
        // 20 + 30 + 15 + 15 + 20 + 10 = 110 in deductions
        assert_eq!(report.raw_score, -10);
        assert_eq!(report.score(), 0);
        assert_eq!(report.tier(), HealthTier::Critical);
    }

    #[test]
    fn test_failed_probes_score_as_failures() {
        let snapshot = HealthSnapshot {
            memory_percent: None,
            running_containers: None,
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);
        // unknown memory counts as critical, unknown containers as missing
        assert_eq!(report.score(), 50);
        assert_eq!(report.tier(), HealthTier::Warning);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(HealthTier::from_score(100), HealthTier::Excellent);
        assert_eq!(HealthTier::from_score(90), HealthTier::Excellent);
        assert_eq!(HealthTier::from_score(89), HealthTier::Good);
        assert_eq!(HealthTier::from_score(70), HealthTier::Good);
        assert_eq!(HealthTier::from_score(69), HealthTier::Warning);
        assert_eq!(HealthTier::from_score(50), HealthTier::Warning);
        assert_eq!(HealthTier::from_score(49), HealthTier::Critical);
        assert_eq!(HealthTier::from_score(0), HealthTier::Critical);
    }

    #[test]
    fn test_tier_monotonic_in_score() {
        let mut last = HealthTier::Critical;
        for score in 0..=100 {
            let tier = HealthTier::from_score(score);
            assert!(tier >= last, "tier regressed at score {}", score);
            last = tier;
        }
    }
}
