/*!
 * Synchronization Primitives
 *
 * Counter storage with a pluggable consistency strategy:
 * - Mutex-guarded (linearizable, no lost updates)
 * - Unsynchronized (separate load and store, loses updates under contention)
 *
 * # Architecture
 *
 * `Counter` selects a `CounterCell` implementation once, from a
 * `ConsistencyStrategy`, and dispatches every operation through it.
 */

mod counter;
mod locked;
mod racy;
mod strategy;
mod traits;

pub use counter::Counter;
pub use strategy::ConsistencyStrategy;
pub use traits::CounterCell;

// Re-export specific cells for advanced users
pub use locked::LockedCell;
pub use racy::RacyCell;
