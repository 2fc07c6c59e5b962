/*!
 * Unsynchronized Cell
 *
 * Reads, adds and stores as three separate steps. The word itself is an
 * atomic so concurrent access is well-defined, but nothing keeps another
 * thread from storing between our load and our store: that window is where
 * updates get lost.
 */

use super::traits::CounterCell;
use std::sync::atomic::{AtomicI64, Ordering};

/// Counter cell with an unprotected read-modify-write
///
/// Relaxed ordering throughout: no happens-before edge is promised between
/// callers, and `load` may observe a stale value.
pub struct RacyCell {
    value: AtomicI64,
}

impl RacyCell {
    #[inline]
    pub const fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }
}

impl CounterCell for RacyCell {
    #[inline]
    fn apply(&self, delta: i64) {
        let current = self.value.load(Ordering::Relaxed);
        self.value
            .store(current.wrapping_add(delta), Ordering::Relaxed);
    }

    #[inline]
    fn load(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn name(&self) -> &'static str {
        "racy"
    }
}
