/*!
 * Workload Driver
 *
 * Spawns concurrent workers against one shared counter:
 * - Per-worker scoped threads (default)
 * - Fixed-size worker pool
 *
 * Every run joins all workers before returning, and surfaces the first
 * worker failure only after that join.
 */

mod config;
mod pool;
mod report;
mod runner;
mod worker;

pub use config::{DriverConfig, ExecutionMode};
pub use pool::{TaskHandle, WorkerPool};
pub use report::{RunReport, TrialSummary};
pub use runner::{run, Driver};
pub use worker::{FailureSlot, WorkerHook, WorkerTask};
