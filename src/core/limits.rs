/*!
 * Service Limits and Constants
 *
 * Centralized location for worker bounds, defaults and workload sizes.
 */

// =============================================================================
// WORKER LIMITS
// =============================================================================

/// Maximum workers per run
/// Requests above this are rejected as invalid configuration, never capped
pub const MAX_WORKERS: usize = 1024;

/// Maximum threads in a worker pool
pub const MAX_POOL_SIZE: usize = MAX_WORKERS;

// =============================================================================
// WORKLOAD DEFAULTS
// =============================================================================

/// Default worker count (two threads racing, as in the classic demo)
pub const DEFAULT_WORKERS: usize = 2;

/// Default increments per worker
pub const DEFAULT_INCREMENTS: u64 = 10_000;

/// Worker count used for contention-heavy runs
pub const CONTENTION_WORKERS: usize = 8;

/// Increments per worker for contention-heavy runs
/// Large enough that unsynchronized runs lose updates on multi-core hosts
pub const CONTENTION_INCREMENTS: u64 = 100_000;

// =============================================================================
// THREAD NAMING
// =============================================================================

/// Prefix for per-worker driver threads
pub const WORKER_THREAD_PREFIX: &str = "counter-worker";

/// Prefix for pool threads
pub const POOL_THREAD_PREFIX: &str = "counter-pool";
