//! Worker pool implementation

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::core::{ClosureJob, Job, PoolError, Result};
use crate::pool::shared::{PoolShared, SubmitMode};
use crate::pool::worker::{Worker, WorkerStats};

/// Configuration for the worker pool
///
/// # Examples
///
/// ```
/// use strandpool::pool::PoolConfig;
/// use std::time::Duration;
///
/// let config = PoolConfig::new(4)
///     .with_max_queue_size(100)
///     .with_worker_name_prefix("sim-worker")
///     .with_drain_poll_interval(Duration::from_millis(10));
///
/// assert_eq!(config.num_workers, 4);
/// assert_eq!(config.max_queue_size, 100);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads (0 = number of available CPUs)
    pub num_workers: usize,
    /// Maximum number of queued jobs (0 = unbounded)
    pub max_queue_size: usize,
    /// Prefix for worker thread names
    pub worker_name_prefix: String,
    /// Wait slice used when re-checking the outstanding count, both by
    /// [`WorkerPool::wait_drained`] and by a blocked serialized submission.
    /// Shorter slices tighten the reaction to a missed completion signal,
    /// longer slices mean fewer wakeups while waiting.
    pub drain_poll_interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            max_queue_size: 0,
            worker_name_prefix: "strand-worker".to_string(),
            drain_poll_interval: Duration::from_millis(50),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with the specified number of workers
    ///
    /// A count of 0 selects the number of available CPUs.
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: if num_workers == 0 {
                num_cpus::get()
            } else {
                num_workers
            },
            ..Default::default()
        }
    }

    /// Set the maximum number of queued jobs (0 = unbounded)
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_queue_size(mut self, size: usize) -> Self {
        self.max_queue_size = size;
        self
    }

    /// Set the prefix for worker thread names
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_worker_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.worker_name_prefix = prefix.into();
        self
    }

    /// Set the drain wait slice
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_drain_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "drain poll interval must be non-zero");
        self.drain_poll_interval = interval;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if any parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.drain_poll_interval.is_zero() {
            return Err(PoolError::invalid_config(
                "drain_poll_interval",
                "drain poll interval must be non-zero",
            ));
        }
        Ok(())
    }
}

/// A fixed-size worker pool with a switchable submission discipline
///
/// Worker threads are spawned at construction and live until [`shutdown`].
/// Submitted jobs land in a single FIFO queue that every worker pulls from.
/// In the default [`SubmitMode::Concurrent`] discipline jobs run in parallel
/// across workers; switching to [`SubmitMode::Serialized`] makes each
/// subsequent submission wait until the previous job has finished, which
/// pins completion order to submission order.
///
/// # Examples
///
/// ```
/// use strandpool::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// fn main() -> Result<()> {
///     let pool = WorkerPool::with_workers(4)?;
///     let counter = Arc::new(AtomicUsize::new(0));
///
///     for _ in 0..8 {
///         let counter = Arc::clone(&counter);
///         pool.execute(move || {
///             counter.fetch_add(1, Ordering::SeqCst);
///         })?;
///     }
///
///     pool.wait_drained();
///     assert_eq!(counter.load(Ordering::SeqCst), 8);
///
///     pool.shutdown()?;
///     Ok(())
/// }
/// ```
pub struct WorkerPool {
    config: PoolConfig,
    shared: Arc<PoolShared>,
    workers: RwLock<Vec<Worker>>,
    total_jobs_submitted: AtomicU64,
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("submit_mode", &self.shared.mode())
            .field("outstanding", &self.shared.outstanding())
            .field(
                "total_jobs_submitted",
                &self.total_jobs_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl WorkerPool {
    /// Create a worker pool with default configuration (one worker per CPU)
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SpawnError`] if a worker thread cannot be
    /// created.
    pub fn new() -> Result<Self> {
        Self::with_config(PoolConfig::default())
    }

    /// Create a worker pool with the specified number of workers
    ///
    /// A count of 0 selects the number of available CPUs.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SpawnError`] if a worker thread cannot be
    /// created.
    pub fn with_workers(num_workers: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(num_workers))
    }

    /// Create a worker pool with custom configuration
    ///
    /// Workers are spawned here; the pool accepts jobs as soon as this
    /// returns. If any worker fails to spawn, the ones already started are
    /// shut down and joined before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration fails
    /// validation and [`PoolError::SpawnError`] if a worker thread cannot
    /// be created.
    pub fn with_config(mut config: PoolConfig) -> Result<Self> {
        config.validate()?;
        if config.num_workers == 0 {
            config.num_workers = num_cpus::get();
        }

        let shared = Arc::new(PoolShared::new(
            config.max_queue_size,
            config.drain_poll_interval,
        ));

        let mut workers = Vec::with_capacity(config.num_workers);
        for id in 0..config.num_workers {
            match Worker::spawn(id, Arc::clone(&shared), &config.worker_name_prefix) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    log::error!("failed to spawn worker {}: {}", id, e);
                    shared.request_exit();
                    for _ in 0..workers.len() {
                        shared.push_wakeup();
                    }
                    for worker in workers {
                        if let Err(join_err) = worker.join() {
                            log::warn!("worker join after spawn failure: {}", join_err);
                        }
                    }
                    return Err(e);
                }
            }
        }

        log::info!(
            "worker pool started with {} workers (queue capacity: {})",
            config.num_workers,
            if config.max_queue_size == 0 {
                "unbounded".to_string()
            } else {
                config.max_queue_size.to_string()
            }
        );

        Ok(Self {
            config,
            shared,
            workers: RwLock::new(workers),
            total_jobs_submitted: AtomicU64::new(0),
        })
    }

    /// Submit a job to the pool
    ///
    /// The job goes to the tail of the FIFO queue and one idle worker is
    /// woken. Under [`SubmitMode::Concurrent`] this returns as soon as the
    /// job is queued. Under [`SubmitMode::Serialized`] it blocks until the
    /// previously submitted job has finished, so at most one job is ever
    /// queued or running.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::QueueFull`] when a configured `max_queue_size`
    /// is reached. The job is dropped and the outstanding count is left
    /// unchanged; the caller may retry later.
    ///
    /// # Caveats
    ///
    /// A job that submits to its own pool while the pool is in serialized
    /// mode deadlocks: the inner submission waits for the very job that
    /// issued it to finish. Submissions racing [`shutdown`] are accepted,
    /// not rejected, but the job may sit in the queue forever once the
    /// workers are gone. Stop submitting before tearing the pool down.
    ///
    /// [`shutdown`]: WorkerPool::shutdown
    pub fn submit<J: Job + 'static>(&self, job: J) -> Result<()> {
        self.shared.enqueue(Box::new(job))?;
        self.total_jobs_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Submit a closure as a job
    ///
    /// Convenience wrapper around [`submit`](WorkerPool::submit); the same
    /// discipline, errors, and caveats apply.
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(ClosureJob::new(f))
    }

    /// Switch the submission discipline
    ///
    /// Takes effect for subsequent submissions only; jobs already queued
    /// keep the treatment they were submitted under.
    ///
    /// # Examples
    ///
    /// ```
    /// use strandpool::prelude::*;
    ///
    /// fn main() -> Result<()> {
    ///     let pool = WorkerPool::with_workers(2)?;
    ///     assert_eq!(pool.submit_mode(), SubmitMode::Concurrent);
    ///
    ///     pool.set_submit_mode(SubmitMode::Serialized);
    ///     assert_eq!(pool.submit_mode(), SubmitMode::Serialized);
    ///
    ///     pool.shutdown()?;
    ///     Ok(())
    /// }
    /// ```
    pub fn set_submit_mode(&self, mode: SubmitMode) {
        log::debug!("submit mode set to {:?}", mode);
        self.shared.set_mode(mode);
    }

    /// Get the submission discipline currently in force
    pub fn submit_mode(&self) -> SubmitMode {
        self.shared.mode()
    }

    /// Block until every submitted job has finished
    ///
    /// Returns once the outstanding count reaches zero. The pool is only
    /// momentarily drained: another thread may submit more work while this
    /// call is returning. Waits in slices of
    /// [`PoolConfig::drain_poll_interval`], so it returns promptly when
    /// nothing is outstanding and tolerates a missed completion signal.
    ///
    /// A job that panicked never finishes and keeps the count raised, so
    /// this call will not return after such a fault. It will also not
    /// return while jobs sit abandoned in the queue after [`shutdown`].
    ///
    /// [`shutdown`]: WorkerPool::shutdown
    pub fn wait_drained(&self) {
        self.shared.wait_drained();
    }

    /// Shut the pool down and join every worker thread
    ///
    /// Sets the exit flag, pushes one internal wake-up no-op per worker so
    /// each idle worker re-checks the flag, then joins them all. Jobs still
    /// queued beyond the wake-ups are not guaranteed to run: shutdown
    /// promises clean thread termination, not a drain. Call
    /// [`wait_drained`](WorkerPool::wait_drained) first if the queue must
    /// empty.
    ///
    /// Idempotent: the first call does the work, later calls return `Ok`
    /// immediately. Dropping the pool invokes this automatically.
    ///
    /// # Errors
    ///
    /// Returns the first [`PoolError::WorkerPanic`] observed while joining.
    /// The remaining workers are still joined before it is returned.
    pub fn shutdown(&self) -> Result<()> {
        let workers = std::mem::take(&mut *self.workers.write());
        if workers.is_empty() {
            return Ok(());
        }

        log::info!("shutting down worker pool ({} workers)", workers.len());
        // The flag must be visible before any wake-up is queued, or a woken
        // worker could go back to sleep and never be joined.
        self.shared.request_exit();
        for _ in 0..workers.len() {
            self.shared.push_wakeup();
        }

        let mut first_failure = None;
        for worker in workers {
            let id = worker.id();
            if let Err(e) = worker.join() {
                log::warn!("worker {} terminated abnormally: {}", id, e);
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Get the number of worker threads the pool was built with
    ///
    /// A worker lost to a job panic is not replaced, so the number of live
    /// threads can be lower than this.
    pub fn worker_count(&self) -> usize {
        self.config.num_workers
    }

    /// Get the number of jobs submitted but not yet finished
    ///
    /// Counts queued and running jobs alike.
    pub fn outstanding_jobs(&self) -> usize {
        self.shared.outstanding()
    }

    /// Get the number of jobs waiting in the queue
    pub fn queued_jobs(&self) -> usize {
        self.shared.queued()
    }

    /// Get the total number of jobs accepted by [`submit`](WorkerPool::submit)
    pub fn total_jobs_submitted(&self) -> u64 {
        self.total_jobs_submitted.load(Ordering::Relaxed)
    }

    /// Get the total number of jobs run across all workers
    ///
    /// Zero once the workers have been joined. Statistics handles obtained
    /// from [`stats`](WorkerPool::stats) beforehand keep counting past that
    /// point and include the wake-up no-ops run during shutdown.
    pub fn total_jobs_processed(&self) -> u64 {
        self.workers
            .read()
            .iter()
            .map(|w| w.stats().get_jobs_processed())
            .sum()
    }

    /// Get per-worker statistics
    pub fn stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.read().iter().map(|w| w.stats()).collect()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("worker pool shutdown during drop: {}", e);
        }
    }
}
