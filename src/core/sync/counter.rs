/*!
 * Counter
 *
 * Shared integer cell whose consistency strategy is chosen at creation time.
 */

use super::locked::LockedCell;
use super::racy::RacyCell;
use super::strategy::ConsistencyStrategy;
use super::traits::CounterCell;
use std::fmt;

/// Concurrent counter with a fixed consistency strategy
///
/// Share it by reference (scoped threads) or behind an `Arc`; all mutation
/// goes through [`increment`](Counter::increment) and
/// [`decrement`](Counter::decrement).
///
/// # Examples
///
/// ```
/// use sync_counter::{ConsistencyStrategy, Counter};
///
/// let counter = Counter::new(5, ConsistencyStrategy::Synchronized);
/// counter.increment();
/// counter.decrement();
/// assert_eq!(counter.read(), 5);
/// ```
pub struct Counter {
    cell: Box<dyn CounterCell>,
    strategy: ConsistencyStrategy,
}

impl Counter {
    /// Create a counter seeded at `initial`
    pub fn new(initial: i64, strategy: ConsistencyStrategy) -> Self {
        let cell: Box<dyn CounterCell> = match strategy {
            ConsistencyStrategy::Unsynchronized => Box::new(RacyCell::new(initial)),
            ConsistencyStrategy::Synchronized => Box::new(LockedCell::new(initial)),
        };

        Self { cell, strategy }
    }

    pub fn synchronized(initial: i64) -> Self {
        Self::new(initial, ConsistencyStrategy::Synchronized)
    }

    pub fn unsynchronized(initial: i64) -> Self {
        Self::new(initial, ConsistencyStrategy::Unsynchronized)
    }

    /// Add one
    #[inline]
    pub fn increment(&self) {
        self.cell.apply(1);
    }

    /// Subtract one
    #[inline]
    pub fn decrement(&self) {
        self.cell.apply(-1);
    }

    /// Current value
    ///
    /// Under `Synchronized` this is a linearizable snapshot. Under
    /// `Unsynchronized` it may lag behind writes still in flight.
    #[inline]
    pub fn read(&self) -> i64 {
        self.cell.load()
    }

    #[inline]
    pub fn strategy(&self) -> ConsistencyStrategy {
        self.strategy
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("strategy", &self.strategy)
            .field("cell", &self.cell.name())
            .field("value", &self.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_value() {
        for strategy in ConsistencyStrategy::ALL {
            assert_eq!(Counter::new(5, strategy).read(), 5);
        }
    }

    #[test]
    fn test_decrement_then_increment_restores() {
        let counter = Counter::synchronized(0);
        counter.decrement();
        counter.increment();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_strategy_selects_cell() {
        let safe = Counter::synchronized(0);
        let racy = Counter::unsynchronized(0);
        assert_eq!(safe.cell.name(), "locked");
        assert_eq!(racy.cell.name(), "racy");
        assert_eq!(racy.strategy(), ConsistencyStrategy::Unsynchronized);
    }

    #[test]
    fn test_debug_output() {
        let counter = Counter::synchronized(3);
        let dbg = format!("{:?}", counter);
        assert!(dbg.contains("Synchronized"));
        assert!(dbg.contains("value: 3"));
    }

    #[test]
    fn test_shared_via_arc() {
        let counter = Arc::new(Counter::synchronized(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..500 {
                        counter.increment();
                    }
                    for _ in 0..100 {
                        counter.decrement();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.read(), 8 * 400);
    }
}
