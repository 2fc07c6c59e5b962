/*!
 * Worker Pool Integration Tests
 */

use sync_counter::{Counter, CounterError, WorkerError, WorkerPool};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_fire_and_forget_then_results() {
    let pool = WorkerPool::new(3).unwrap();
    assert_eq!(pool.size(), 3);

    let ran = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        let ran = ran.clone();
        pool.execute(move || {
            thread::sleep(Duration::from_millis(5));
            ran.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    let handles: Vec<_> = (1..=3)
        .map(|id| pool.submit(move || format!("task {} done", id)).unwrap())
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["task 1 done", "task 2 done", "task 3 done"]);

    pool.shutdown();
    assert_eq!(ran.load(Ordering::SeqCst), 5);
}

#[test]
fn test_jobs_spread_over_pool_threads() {
    let pool = WorkerPool::new(4).unwrap();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            pool.submit(|| {
                thread::sleep(Duration::from_millis(10));
                thread::current().name().map(str::to_string)
            })
            .unwrap()
        })
        .collect();

    let names: HashSet<String> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    assert!(names.len() > 1, "all jobs ran on one thread: {:?}", names);
    assert!(names.iter().all(|n| n.starts_with("counter-pool-")));
}

#[test]
fn test_shared_counter_through_pool() {
    let pool = WorkerPool::new(4).unwrap();
    let counter = Arc::new(Counter::synchronized(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let counter = counter.clone();
            pool.submit(move || {
                for _ in 0..1_000 {
                    counter.increment();
                }
            })
            .unwrap()
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(counter.read(), 8_000);
}

#[test]
fn test_panic_in_submitted_job() {
    let pool = WorkerPool::new(2).unwrap();
    let handle = pool
        .submit(|| -> u8 { panic!("callable failed") })
        .unwrap();

    match handle.join() {
        Err(WorkerError::Panicked { reason }) => assert_eq!(reason, "callable failed"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_try_join_before_and_after_completion() {
    let pool = WorkerPool::new(1).unwrap();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    let handle = pool
        .submit(move || {
            release_rx.recv().ok();
            99u32
        })
        .unwrap();

    assert!(handle.try_join().is_none());
    release_tx.send(()).unwrap();
    assert_eq!(handle.join().unwrap(), 99);
}

#[test]
fn test_drop_shuts_down() {
    let ran = Arc::new(AtomicUsize::new(0));
    {
        let pool = WorkerPool::new(2).unwrap();
        for _ in 0..10 {
            let ran = ran.clone();
            pool.execute(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
    }
    assert_eq!(ran.load(Ordering::SeqCst), 10);
}

#[test]
fn test_execute_after_shutdown() {
    let pool = WorkerPool::new(1).unwrap();
    pool.shutdown();
    assert_eq!(pool.execute(|| {}), Err(CounterError::PoolShutdown));
}
