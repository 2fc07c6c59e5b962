/*!
 * Run Reports
 * Serializable outcomes of single runs and repeated trials
 */

use super::config::ExecutionMode;
use crate::core::sync::ConsistencyStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Outcome of one driver run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub strategy: ConsistencyStrategy,
    pub mode: ExecutionMode,
    pub workers: usize,
    pub increments_per_worker: u64,
    /// `workers * increments_per_worker`
    pub expected: i64,
    pub final_value: i64,
    /// Increments each worker applied, indexed by worker id
    pub completed: Vec<u64>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Updates that never made it into the final value
    #[inline]
    pub fn lost_updates(&self) -> i64 {
        self.expected - self.final_value
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.final_value == self.expected
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Aggregate of repeated runs with one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub strategy: ConsistencyStrategy,
    pub runs: usize,
    pub expected: i64,
    pub min: i64,
    pub max: i64,
    /// Runs whose final value fell short of `expected`
    pub lossy_runs: usize,
}

impl TrialSummary {
    pub(crate) fn new(strategy: ConsistencyStrategy, expected: i64) -> Self {
        Self {
            strategy,
            runs: 0,
            expected,
            min: i64::MAX,
            max: i64::MIN,
            lossy_runs: 0,
        }
    }

    pub(crate) fn observe(&mut self, final_value: i64) {
        self.runs += 1;
        self.min = self.min.min(final_value);
        self.max = self.max.max(final_value);
        if final_value < self.expected {
            self.lossy_runs += 1;
        }
    }

    /// Every run reached the expected value
    pub fn all_exact(&self) -> bool {
        self.runs > 0 && self.lossy_runs == 0 && self.min == self.expected
    }

    /// Largest loss seen in any run
    pub fn worst_loss(&self) -> i64 {
        self.expected - self.min
    }
}
