/*!
 * Workload Driver
 *
 * Builds one counter, fans the workload out over worker tasks, joins every
 * task and reports the final value.
 *
 * # Failure handling
 *
 * A failing worker never stops the others. Each failure is recorded by the
 * worker itself into a shared slot that keeps the first one; the driver
 * returns it only after every task has been joined.
 */

use super::config::{DriverConfig, ExecutionMode};
use super::pool::WorkerPool;
use super::report::{RunReport, TrialSummary};
use super::worker::{FailureSlot, WorkerHook, WorkerTask};
use crate::core::errors::{CounterError, CounterResult, WorkerError, WorkerId};
use crate::core::limits::WORKER_THREAD_PREFIX;
use crate::core::sync::{ConsistencyStrategy, Counter};
use crate::monitoring::RunSpan;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// Run `worker_count` workers of `increments_per_worker` increments each and
/// return the counter's final value
///
/// # Examples
///
/// ```
/// use sync_counter::{run, ConsistencyStrategy};
///
/// let total = run(4, 1_000, ConsistencyStrategy::Synchronized).unwrap();
/// assert_eq!(total, 4_000);
/// ```
pub fn run(
    worker_count: usize,
    increments_per_worker: u64,
    strategy: ConsistencyStrategy,
) -> CounterResult<i64> {
    Driver::new(DriverConfig::new(worker_count, increments_per_worker, strategy))
        .execute()
        .map(|report| report.final_value)
}

/// Configured workload runner
#[derive(Debug, Clone)]
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run the workload once
    pub fn execute(&self) -> CounterResult<RunReport> {
        self.execute_inner(None)
    }

    /// Run the workload once, calling `hook` before every increment
    pub fn execute_with<H>(&self, hook: H) -> CounterResult<RunReport>
    where
        H: Fn(WorkerId, u64) -> Result<(), WorkerError> + Send + Sync + 'static,
    {
        self.execute_inner(Some(Arc::new(hook)))
    }

    /// Repeat the workload `runs` times and summarize the final values
    pub fn run_trials(&self, runs: usize) -> CounterResult<TrialSummary> {
        if runs == 0 {
            return Err(CounterError::invalid("trial count must be positive"));
        }
        self.config.validate()?;

        let mut summary = TrialSummary::new(self.config.strategy, self.config.checked_expected()?);
        for _ in 0..runs {
            let report = self.execute()?;
            summary.observe(report.final_value);
        }

        info!(
            strategy = %summary.strategy,
            runs = summary.runs,
            lossy_runs = summary.lossy_runs,
            min = summary.min,
            max = summary.max,
            "trials complete"
        );
        Ok(summary)
    }

    fn execute_inner(&self, hook: Option<Arc<WorkerHook>>) -> CounterResult<RunReport> {
        // Nothing is spawned for an invalid configuration
        self.config.validate()?;
        let expected = self.config.checked_expected()?;
        let DriverConfig {
            workers,
            increments_per_worker,
            strategy,
            mode,
        } = self.config;

        let span = RunSpan::new(strategy, workers, increments_per_worker);
        let _entered = span.span().enter();
        debug!(?mode, "starting counter run");

        let failures = Arc::new(FailureSlot::new());
        let counter = Arc::new(Counter::new(0, strategy));

        let joined = match mode {
            ExecutionMode::Threads => self.run_on_threads(&counter, &failures, hook),
            ExecutionMode::Pool { size } => self.run_on_pool(size, &counter, &failures, hook),
        };

        let completed = match joined {
            Ok(completed) => completed,
            Err(e) => {
                span.record_error(&e.to_string());
                return Err(e);
            }
        };

        if let Some(err) = failures.take() {
            span.record_error(&err.to_string());
            return Err(err);
        }

        let final_value = counter.read();
        span.record_outcome(final_value, expected);
        info!(
            final_value,
            expected,
            lost_updates = expected - final_value,
            "counter run complete"
        );

        Ok(RunReport {
            run_id: span.run_id(),
            strategy,
            mode,
            workers,
            increments_per_worker,
            expected,
            final_value,
            completed,
            elapsed: span.elapsed(),
        })
    }

    /// One named scoped thread per worker, all borrowing the same counter
    fn run_on_threads(
        &self,
        counter: &Counter,
        failures: &FailureSlot,
        hook: Option<Arc<WorkerHook>>,
    ) -> CounterResult<Vec<u64>> {
        let workers = self.config.workers;
        let repetitions = self.config.increments_per_worker;

        thread::scope(|s| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for id in 0..workers {
                let task = WorkerTask::new(id, repetitions, hook.clone());
                let spawned = thread::Builder::new()
                    .name(format!("{}-{}", WORKER_THREAD_PREFIX, id))
                    .spawn_scoped(s, move || task.execute(counter, failures));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        // Stop spawning; the ones already running still get joined
                        spawn_error = Some(CounterError::from(e));
                        break;
                    }
                }
            }

            let completed: Vec<u64> = handles
                .into_iter()
                .enumerate()
                .map(|(id, handle)| match handle.join() {
                    Ok(applied) => applied,
                    Err(_) => {
                        failures.record(CounterError::WorkerFailure {
                            worker: id,
                            iteration: None,
                            reason: "worker thread terminated abnormally".to_string(),
                        });
                        0
                    }
                })
                .collect();

            match spawn_error {
                Some(e) => Err(e),
                None => Ok(completed),
            }
        })
    }

    /// Submit every worker to a fixed-size pool and wait on all handles
    fn run_on_pool(
        &self,
        size: usize,
        counter: &Arc<Counter>,
        failures: &Arc<FailureSlot>,
        hook: Option<Arc<WorkerHook>>,
    ) -> CounterResult<Vec<u64>> {
        let pool = WorkerPool::new(size)?;
        let mut handles = Vec::with_capacity(self.config.workers);
        let mut submit_error = None;

        for id in 0..self.config.workers {
            let task = WorkerTask::new(id, self.config.increments_per_worker, hook.clone());
            let counter = Arc::clone(counter);
            let failures = Arc::clone(failures);

            match pool.submit(move || task.execute(&counter, &failures)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    submit_error = Some(e);
                    break;
                }
            }
        }

        let completed: Vec<u64> = handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| match handle.join() {
                Ok(applied) => applied,
                Err(e) => {
                    failures.record(e.into_counter_error(id));
                    0
                }
            })
            .collect();

        pool.shutdown();

        match submit_error {
            Some(e) => Err(e),
            None => Ok(completed),
        }
    }
}
