/*!
 * Sync Counter Library
 * Concurrent counter with a pluggable consistency strategy and a workload
 * driver that makes lost updates observable
 */

pub mod core;
pub mod driver;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{CounterError, CounterResult, WorkerError, WorkerId};
pub use crate::core::sync::{ConsistencyStrategy, Counter};
pub use driver::{run, Driver, DriverConfig, ExecutionMode, RunReport, TrialSummary, WorkerPool};
pub use monitoring::init_tracing;
