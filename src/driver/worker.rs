/*!
 * Worker Tasks
 *
 * A worker is a plain task value handed to a thread or a pool; it owns its
 * repetition count and borrows the shared counter only while running.
 */

use crate::core::errors::{panic_message, CounterError, WorkerError, WorkerId};
use crate::core::sync::Counter;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Hook invoked before each increment with `(worker, iteration)`
///
/// Iterations are numbered from 1. Returning an error stops that worker
/// before the increment is applied.
pub type WorkerHook = dyn Fn(WorkerId, u64) -> Result<(), WorkerError> + Send + Sync;

/// First failure observed across a run
///
/// Workers record into it as they fail; later failures are logged and
/// dropped.
#[derive(Default)]
pub struct FailureSlot {
    first: Mutex<Option<CounterError>>,
}

impl FailureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, error: CounterError) {
        let mut slot = self.first.lock();
        if slot.is_none() {
            warn!(error = %error, "worker failure recorded");
            *slot = Some(error);
        } else {
            debug!(error = %error, "additional worker failure ignored");
        }
    }

    pub fn take(&self) -> Option<CounterError> {
        self.first.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.first.lock().is_none()
    }
}

/// One worker's share of the workload
pub struct WorkerTask {
    id: WorkerId,
    repetitions: u64,
    hook: Option<Arc<WorkerHook>>,
}

impl WorkerTask {
    pub fn new(id: WorkerId, repetitions: u64, hook: Option<Arc<WorkerHook>>) -> Self {
        Self {
            id,
            repetitions,
            hook,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Run the loop, returning how many increments were applied
    pub fn run(&self, counter: &Counter) -> Result<u64, WorkerError> {
        let mut applied = 0;
        self.run_counted(counter, &mut applied).map(|_| applied)
    }

    /// Run to completion on the current thread, catching panics
    ///
    /// Any failure goes into `failures`; the return value is the number of
    /// increments that were applied before the worker stopped.
    pub fn execute(self, counter: &Counter, failures: &FailureSlot) -> u64 {
        let mut applied = 0;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_counted(counter, &mut applied)
        }));

        match outcome {
            Ok(Ok(())) => {
                debug!(worker = self.id, completed = applied, "worker finished");
            }
            Ok(Err(e)) => {
                failures.record(e.into_counter_error(self.id));
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                failures.record(WorkerError::Panicked { reason }.into_counter_error(self.id));
            }
        }
        applied
    }

    fn run_counted(&self, counter: &Counter, applied: &mut u64) -> Result<(), WorkerError> {
        for iteration in 1..=self.repetitions {
            if let Some(hook) = &self.hook {
                if let Err(e) = hook(self.id, iteration) {
                    debug!(worker = self.id, iteration, "worker stopped by hook");
                    return Err(e);
                }
            }
            counter.increment();
            *applied = iteration;
        }
        Ok(())
    }
}
