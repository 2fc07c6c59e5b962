/*!
 * Worker Pool
 *
 * Fixed-size pool of named threads fed from a flume channel.
 *
 * Jobs run in submission order as threads become free. Shutdown stops
 * accepting work, lets queued jobs drain, then joins every thread.
 */

use crate::core::errors::{panic_message, CounterError, CounterResult, WorkerError};
use crate::core::limits::{MAX_POOL_SIZE, POOL_THREAD_PREFIX};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Blocking handle to the result of a submitted job
pub struct TaskHandle<T> {
    receiver: flume::Receiver<Result<T, WorkerError>>,
}

impl<T> TaskHandle<T> {
    /// Block until the job has finished
    pub fn join(self) -> Result<T, WorkerError> {
        match self.receiver.recv() {
            Ok(result) => result,
            Err(_) => Err(WorkerError::Panicked {
                reason: "task dropped before completion".to_string(),
            }),
        }
    }

    /// Non-blocking check; `None` while the job is still running
    pub fn try_join(&self) -> Option<Result<T, WorkerError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(Err(WorkerError::Panicked {
                reason: "task dropped before completion".to_string(),
            })),
        }
    }
}

/// Fixed-size thread pool
pub struct WorkerPool {
    sender: Mutex<Option<flume::Sender<Job>>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl WorkerPool {
    /// Spawn `size` pool threads
    pub fn new(size: usize) -> CounterResult<Self> {
        if size == 0 || size > MAX_POOL_SIZE {
            return Err(CounterError::invalid(format!(
                "pool size must be between 1 and {}, got {}",
                MAX_POOL_SIZE, size
            )));
        }

        let (sender, receiver) = flume::unbounded::<Job>();
        let mut threads = Vec::with_capacity(size);

        for index in 0..size {
            let receiver = receiver.clone();
            let spawned = thread::Builder::new()
                .name(format!("{}-{}", POOL_THREAD_PREFIX, index))
                .spawn(move || {
                    while let Ok(job) = receiver.recv() {
                        job();
                    }
                    debug!(thread = index, "pool thread exiting");
                });

            match spawned {
                Ok(handle) => threads.push(handle),
                Err(e) => {
                    // Disconnect so the threads already started can exit
                    drop(sender);
                    for handle in threads {
                        let _ = handle.join();
                    }
                    return Err(e.into());
                }
            }
        }

        info!(size, "worker pool started");

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            threads: Mutex::new(threads),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_shutdown(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Queue a job with no result
    ///
    /// A panic inside the job is logged and does not take the thread down.
    pub fn execute<F>(&self, f: F) -> CounterResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.dispatch(Box::new(move || {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
                error!(reason = %panic_message(payload.as_ref()), "pool job panicked");
            }
        }))
    }

    /// Queue a job and get a handle to its result
    pub fn submit<F, T>(&self, f: F) -> CounterResult<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        self.dispatch(Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
                WorkerError::Panicked {
                    reason: panic_message(payload.as_ref()),
                }
            });
            // Receiver may have been dropped; nobody is waiting then
            let _ = tx.send(result);
        }))?;
        Ok(TaskHandle { receiver: rx })
    }

    fn dispatch(&self, job: Job) -> CounterResult<()> {
        let sender = self.sender.lock();
        match sender.as_ref() {
            Some(tx) => tx.send(job).map_err(|_| CounterError::PoolShutdown),
            None => Err(CounterError::PoolShutdown),
        }
    }

    /// Stop accepting jobs, drain the queue and join all threads
    ///
    /// Idempotent. Must not be called from a pool thread.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let threads = std::mem::take(&mut *self.threads.lock());
        for handle in threads {
            if handle.join().is_err() {
                error!("pool thread terminated abnormally");
            }
        }
        info!(size = self.size, "worker pool shut down");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
