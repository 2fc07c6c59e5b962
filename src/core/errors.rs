/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

/// Identifier of a worker task within one run
pub type WorkerId = usize;

/// Errors surfaced by the counter service
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CounterError {
    #[error("Invalid configuration: {reason}")]
    #[diagnostic(
        code(counter::invalid_configuration),
        help("Worker count must be between 1 and the documented maximum, and counts must not be negative.")
    )]
    InvalidConfiguration { reason: String },

    #[error("Worker {worker} failed{}: {reason}", at_iteration(.iteration))]
    #[diagnostic(
        code(counter::worker_failure),
        help("All other workers were joined before this failure was reported. Check the worker logs.")
    )]
    WorkerFailure {
        worker: WorkerId,
        iteration: Option<u64>,
        reason: String,
    },

    #[error("Failed to spawn worker thread: {reason}")]
    #[diagnostic(
        code(counter::spawn_failed),
        help("The OS refused to create a thread. Lower the worker count or raise process limits.")
    )]
    SpawnFailed { reason: String },

    #[error("Worker pool has been shut down")]
    #[diagnostic(
        code(counter::pool_shutdown),
        help("Submit tasks before calling shutdown, or create a new pool.")
    )]
    PoolShutdown,
}

impl CounterError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    #[inline]
    pub fn is_worker_failure(&self) -> bool {
        matches!(self, Self::WorkerFailure { .. })
    }
}

impl From<std::io::Error> for CounterError {
    fn from(err: std::io::Error) -> Self {
        CounterError::SpawnFailed {
            reason: err.to_string(),
        }
    }
}

fn at_iteration(iteration: &Option<u64>) -> String {
    match iteration {
        Some(i) => format!(" at iteration {}", i),
        None => String::new(),
    }
}

/// Abnormal termination of a single worker task
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("failed at iteration {iteration}: {reason}")]
    Failed { iteration: u64, reason: String },

    #[error("panicked: {reason}")]
    Panicked { reason: String },
}

impl WorkerError {
    pub fn failed(iteration: u64, reason: impl Into<String>) -> Self {
        Self::Failed {
            iteration,
            reason: reason.into(),
        }
    }

    /// Attach the worker id, producing the driver-level error
    pub fn into_counter_error(self, worker: WorkerId) -> CounterError {
        match self {
            WorkerError::Failed { iteration, reason } => CounterError::WorkerFailure {
                worker,
                iteration: Some(iteration),
                reason,
            },
            WorkerError::Panicked { reason } => CounterError::WorkerFailure {
                worker,
                iteration: None,
                reason: format!("panicked: {}", reason),
            },
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Result type for counter service operations
pub type CounterResult<T> = Result<T, CounterError>;
