/*!
 * Counter Cell Traits
 *
 * Core abstraction for the storage behind a counter.
 *
 * # Design: Trait-Based Abstraction for Implementations
 *
 * `Counter` picks one implementation at construction time and dispatches
 * through this trait afterwards, so the strategy cannot change while
 * operations are in flight.
 */

/// Storage and update discipline for a counter value
///
/// Implementations must be:
/// - **Thread-safe to call**: `&self` methods may run on many threads at once
/// - **Non-failing**: no operation returns an error
pub trait CounterCell: Send + Sync {
    /// Apply a signed delta with this cell's read-modify-write discipline
    fn apply(&self, delta: i64);

    /// Current value
    fn load(&self) -> i64;

    /// Get strategy name for debugging
    fn name(&self) -> &'static str;
}
