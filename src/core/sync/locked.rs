/*!
 * Mutex-Guarded Cell
 *
 * Serializes every read-modify-write through one parking_lot mutex owned by
 * the cell. Contended callers park instead of spinning, and the guard
 * releases the lock on every exit path, unwinding included.
 */

use super::traits::CounterCell;
use parking_lot::Mutex;

/// Linearizable counter cell
///
/// There is exactly one lock and it is never held while acquiring another,
/// so no acquisition order exists that could deadlock.
pub struct LockedCell {
    value: Mutex<i64>,
}

impl LockedCell {
    #[inline]
    pub const fn new(initial: i64) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl CounterCell for LockedCell {
    #[inline]
    fn apply(&self, delta: i64) {
        let mut guard = self.value.lock();
        *guard = guard.wrapping_add(delta);
    }

    #[inline]
    fn load(&self) -> i64 {
        *self.value.lock()
    }

    fn name(&self) -> &'static str {
        "locked"
    }
}
