/*!
 * Driver Configuration
 *
 * Workload shape and execution mode for a counter run
 */

use crate::core::errors::{CounterError, CounterResult};
use crate::core::limits::{
    CONTENTION_INCREMENTS, CONTENTION_WORKERS, DEFAULT_INCREMENTS, DEFAULT_WORKERS, MAX_POOL_SIZE,
    MAX_WORKERS,
};
use crate::core::sync::ConsistencyStrategy;
use serde::{Deserialize, Serialize};

/// How worker tasks are mapped onto threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One named scoped thread per worker
    Threads,
    /// Fixed-size pool; workers beyond `size` queue until a thread frees up
    Pool { size: usize },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Threads
    }
}

/// Workload configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Concurrent workers, 1..=MAX_WORKERS
    pub workers: usize,
    /// Increments each worker performs
    pub increments_per_worker: u64,
    pub strategy: ConsistencyStrategy,
    pub mode: ExecutionMode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::demo(ConsistencyStrategy::Synchronized)
    }
}

impl DriverConfig {
    pub const fn new(workers: usize, increments_per_worker: u64, strategy: ConsistencyStrategy) -> Self {
        Self {
            workers,
            increments_per_worker,
            strategy,
            mode: ExecutionMode::Threads,
        }
    }

    /// Two workers, ten thousand increments each
    pub const fn demo(strategy: ConsistencyStrategy) -> Self {
        Self::new(DEFAULT_WORKERS, DEFAULT_INCREMENTS, strategy)
    }

    /// Enough contention for unsynchronized runs to lose updates
    pub const fn high_contention(strategy: ConsistencyStrategy) -> Self {
        Self::new(CONTENTION_WORKERS, CONTENTION_INCREMENTS, strategy)
    }

    /// Build from signed inputs, rejecting negative counts
    pub fn from_signed(
        workers: i64,
        increments_per_worker: i64,
        strategy: ConsistencyStrategy,
    ) -> CounterResult<Self> {
        if workers <= 0 {
            return Err(CounterError::invalid(format!(
                "worker count must be positive, got {}",
                workers
            )));
        }
        if increments_per_worker < 0 {
            return Err(CounterError::invalid(format!(
                "increments per worker must not be negative, got {}",
                increments_per_worker
            )));
        }

        let workers = usize::try_from(workers)
            .map_err(|_| CounterError::invalid(format!("worker count {} out of range", workers)))?;
        let config = Self::new(workers, increments_per_worker as u64, strategy);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_strategy(mut self, strategy: ConsistencyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check bounds before anything is spawned
    pub fn validate(&self) -> CounterResult<()> {
        if self.workers == 0 {
            return Err(CounterError::invalid("worker count must be positive, got 0"));
        }
        if self.workers > MAX_WORKERS {
            return Err(CounterError::invalid(format!(
                "worker count {} exceeds maximum of {}",
                self.workers, MAX_WORKERS
            )));
        }
        if let ExecutionMode::Pool { size } = self.mode {
            if size == 0 || size > MAX_POOL_SIZE {
                return Err(CounterError::invalid(format!(
                    "pool size must be between 1 and {}, got {}",
                    MAX_POOL_SIZE, size
                )));
            }
        }
        self.checked_expected().map(|_| ())
    }

    /// `workers * increments_per_worker`, if it fits the counter's range
    pub fn checked_expected(&self) -> CounterResult<i64> {
        i64::try_from(self.increments_per_worker)
            .ok()
            .and_then(|per_worker| per_worker.checked_mul(self.workers as i64))
            .ok_or_else(|| {
                CounterError::invalid(format!(
                    "{} workers x {} increments overflows the counter",
                    self.workers, self.increments_per_worker
                ))
            })
    }
}
