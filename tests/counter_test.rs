/*!
 * Counter Integration Tests
 *
 * Behaviour of both consistency strategies under direct use
 */

use sync_counter::core::sync::{CounterCell, LockedCell, RacyCell};
use sync_counter::{ConsistencyStrategy, Counter};
use std::sync::Arc;
use std::thread;

#[test]
fn test_initial_value_read() {
    let counter = Counter::new(5, ConsistencyStrategy::Synchronized);
    assert_eq!(counter.read(), 5);

    let counter = Counter::new(5, ConsistencyStrategy::Unsynchronized);
    assert_eq!(counter.read(), 5);
}

#[test]
fn test_decrement_then_increment_is_identity() {
    let counter = Counter::new(42, ConsistencyStrategy::Synchronized);
    counter.decrement();
    counter.increment();
    assert_eq!(counter.read(), 42);
}

#[test]
fn test_negative_values() {
    let counter = Counter::synchronized(0);
    for _ in 0..3 {
        counter.decrement();
    }
    assert_eq!(counter.read(), -3);
}

#[test]
fn test_strategy_is_fixed() {
    let counter = Counter::unsynchronized(0);
    counter.increment();
    assert_eq!(counter.strategy(), ConsistencyStrategy::Unsynchronized);
}

#[test]
fn test_scoped_threads_share_by_reference() {
    let counter = Counter::synchronized(0);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..2_000 {
                    counter.increment();
                }
            });
        }
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..1_000 {
                    counter.decrement();
                }
            });
        }
    });

    assert_eq!(counter.read(), 4 * 2_000 - 2 * 1_000);
}

#[test]
fn test_concurrent_reads_are_monotonic_under_increments() {
    let counter = Arc::new(Counter::synchronized(0));
    let writer = {
        let counter = counter.clone();
        thread::spawn(move || {
            for _ in 0..20_000 {
                counter.increment();
            }
        })
    };

    let mut last = 0;
    while !writer.is_finished() {
        let now = counter.read();
        assert!(now >= last, "snapshot went backwards: {} < {}", now, last);
        last = now;
    }
    writer.join().unwrap();
    assert_eq!(counter.read(), 20_000);
}

#[test]
fn test_cells_usable_as_trait_objects() {
    let cells: Vec<Box<dyn CounterCell>> = vec![Box::new(LockedCell::new(1)), Box::new(RacyCell::new(1))];
    for cell in &cells {
        cell.apply(9);
        assert_eq!(cell.load(), 10);
    }
    assert_eq!(cells[0].name(), "locked");
    assert_eq!(cells[1].name(), "racy");
}
