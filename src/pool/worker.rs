//! Worker thread implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::core::{PoolError, Result};
use crate::pool::shared::PoolShared;

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of jobs processed
    pub jobs_processed: AtomicU64,
    /// Total time spent processing jobs (microseconds)
    pub total_processing_time_us: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment jobs processed counter
    pub fn increment_processed(&self) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Add processing time
    pub fn add_processing_time(&self, microseconds: u64) {
        self.total_processing_time_us
            .fetch_add(microseconds, Ordering::Relaxed);
    }

    /// Get total jobs processed
    pub fn get_jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Get average processing time per job in microseconds
    pub fn get_average_processing_time_us(&self) -> f64 {
        let total = self.total_processing_time_us.load(Ordering::Relaxed);
        let count = self.jobs_processed.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }
}

/// A worker thread that claims and runs jobs from the shared queue
#[derive(Debug)]
pub(crate) struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Create and start a new worker.
    ///
    /// The thread is named `"{name_prefix}-{id}"` and begins claiming jobs
    /// immediately. It terminates after the pool's exit flag is set and it
    /// has made one more claim attempt.
    pub(crate) fn spawn(id: usize, shared: Arc<PoolShared>, name_prefix: &str) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, shared, stats_clone);
            })
            .map_err(|e| PoolError::spawn_with_source(id, "thread creation failed", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub(crate) fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread.
    ///
    /// A worker killed by a panicking job is reported as
    /// [`PoolError::WorkerPanic`] with the panic message.
    pub(crate) fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread.join().map_err(|panic_info| {
                let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                PoolError::worker_panic(self.id, message)
            })?;
        }
        Ok(())
    }

    /// Main worker loop.
    ///
    /// Claims a job together with the shared-side exclusivity guard, runs it
    /// while holding the guard, then releases the guard before decrementing
    /// the outstanding count. Job panics are not caught here: a panicking
    /// job unwinds through this loop and ends the thread, leaving the pool
    /// one worker short.
    fn run(id: usize, shared: Arc<PoolShared>, stats: Arc<WorkerStats>) {
        log::debug!("worker {} started", id);

        while let Some((slot, mut job)) = shared.claim_next() {
            let start = Instant::now();
            job.run();
            drop(slot);
            stats.increment_processed();
            stats.add_processing_time(start.elapsed().as_micros() as u64);
            shared.finish_one();
            if shared.is_exiting() {
                break;
            }
        }

        log::debug!(
            "worker {} exiting after {} jobs",
            id,
            stats.get_jobs_processed()
        );
    }
}
