//! State shared between the pool handle and its worker threads
//!
//! Lock acquire order is the queue lock first, then the exclusivity lock,
//! never the reverse. The drain gate has its own mutex and is never held
//! together with either of the others.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crossbeam_utils::atomic::AtomicCell;
use parking_lot::{Condvar, Mutex, RwLock, RwLockReadGuard};

use crate::core::error::{PoolError, Result};
use crate::core::job::{BoxedJob, ClosureJob};

/// Submission discipline applied by [`WorkerPool::submit`](crate::pool::WorkerPool::submit)
///
/// The mode can be changed at any time and affects only subsequent
/// submissions, never jobs already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Submission blocks until nothing is in flight before queueing and
    /// signaling a worker. At most one job is queued or running at a time
    /// and completion order equals submission order, regardless of how many
    /// workers exist.
    Serialized,
    /// Submission appends and signals without waiting. Jobs overlap freely
    /// across workers and may complete out of submission order.
    #[default]
    Concurrent,
}

/// Everything the pool handle and its workers coordinate through.
///
/// `queue` and `work_ready` carry jobs from submitters to workers. The
/// `running` rwlock is the execution-exclusivity lock: a worker holds the
/// shared side for exactly as long as a job is mid-execution, and a
/// serialized submission takes the exclusive side before it signals.
/// `outstanding` counts submitted-but-unfinished jobs; it is only ever
/// incremented under the queue lock, which is what lets a serialized
/// submission treat "outstanding is zero" as "nothing in flight anywhere".
pub(crate) struct PoolShared {
    queue: Mutex<VecDeque<BoxedJob>>,
    work_ready: Condvar,
    running: RwLock<()>,
    outstanding: AtomicUsize,
    drain_gate: Mutex<()>,
    drained: Condvar,
    exiting: AtomicBool,
    mode: AtomicCell<SubmitMode>,
    capacity: usize,
    drain_poll: Duration,
}

impl PoolShared {
    /// Create shared state with the given queue capacity (0 = unbounded)
    /// and drain-wait slice.
    pub(crate) fn new(capacity: usize, drain_poll: Duration) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            running: RwLock::new(()),
            outstanding: AtomicUsize::new(0),
            drain_gate: Mutex::new(()),
            drained: Condvar::new(),
            exiting: AtomicBool::new(false),
            mode: AtomicCell::new(SubmitMode::default()),
            capacity,
            drain_poll,
        }
    }

    /// Append a job to the queue tail and wake one worker, applying the
    /// submission discipline in force when the call was made.
    ///
    /// In serialized mode this first waits for the previous job to finish
    /// completely, so a submitter can never build up a backlog that two
    /// workers would then claim side by side. The outstanding counter is
    /// only incremented once the job is actually queued, so a rejected
    /// submission leaves it untouched.
    pub(crate) fn enqueue(&self, job: BoxedJob) -> Result<()> {
        let mode = self.mode.load();
        let mut queue = self.queue.lock();

        if mode == SubmitMode::Serialized {
            // Outstanding can only grow under the queue lock held here, so
            // observing zero means nothing is queued or running anywhere.
            while self.outstanding.load(Ordering::Acquire) > 0 {
                drop(queue);
                self.wait_one_slice();
                queue = self.queue.lock();
            }
        }

        if self.capacity != 0 && queue.len() >= self.capacity {
            return Err(PoolError::queue_full(queue.len(), self.capacity));
        }
        queue.push_back(job);
        self.outstanding.fetch_add(1, Ordering::AcqRel);

        match mode {
            SubmitMode::Serialized => {
                // Uncontended by now: every claimed job has released its
                // shared guard before decrementing the counter. Taken all
                // the same, as the ordering point the claim side pairs with.
                let _exclusive = self.running.write();
                self.work_ready.notify_one();
            }
            SubmitMode::Concurrent => {
                self.work_ready.notify_one();
            }
        }
        Ok(())
    }

    /// Push an internal wake-up no-op during shutdown.
    ///
    /// Skips the capacity bound and the serialized discipline so teardown
    /// can neither fail nor stall behind a running job. The counter is still
    /// incremented, keeping it balanced against the decrement the no-op
    /// performs when a worker runs it.
    pub(crate) fn push_wakeup(&self) {
        let mut queue = self.queue.lock();
        queue.push_back(Box::new(ClosureJob::with_name(|| {}, "wakeup")));
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.work_ready.notify_one();
    }

    /// Claim the next job, blocking until one is available.
    ///
    /// Returns the job together with the shared-side exclusivity guard the
    /// worker must hold for the whole run. Returns `None` when the worker
    /// was woken during shutdown and found nothing left to take.
    pub(crate) fn claim_next(&self) -> Option<(RwLockReadGuard<'_, ()>, BoxedJob)> {
        let mut queue = self.queue.lock();
        loop {
            while queue.is_empty() {
                self.work_ready.wait(&mut queue);
                if queue.is_empty() && self.exiting.load(Ordering::Acquire) {
                    return None;
                }
            }
            // The exclusivity guard is taken before the queue is inspected
            // and is handed to the caller with the job.
            let slot = self.running.read();
            if let Some(job) = queue.pop_front() {
                drop(queue);
                return Some((slot, job));
            }
            // Lost the head job to a sibling; back to waiting.
            drop(slot);
        }
    }

    /// Mark one claimed job finished and poke the drain gate.
    ///
    /// The caller must have released the exclusivity guard first. The
    /// notification is sent without the drain mutex held; a waiter that
    /// misses it re-checks within one polling slice.
    pub(crate) fn finish_one(&self) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        self.drained.notify_all();
    }

    /// Block until the outstanding count reaches zero.
    ///
    /// Re-checks in bounded slices so a missed completion signal delays the
    /// return by at most one interval. Returns immediately when nothing is
    /// outstanding.
    pub(crate) fn wait_drained(&self) {
        while self.outstanding.load(Ordering::Acquire) > 0 {
            self.wait_one_slice();
        }
    }

    /// Wait on the drain gate for up to one polling slice, returning early
    /// if a completion is signaled or the count is already zero.
    fn wait_one_slice(&self) {
        let mut gate = self.drain_gate.lock();
        if self.outstanding.load(Ordering::Acquire) > 0 {
            self.drained.wait_for(&mut gate, self.drain_poll);
        }
    }

    /// Flip the exit flag. Monotonic: never reset.
    pub(crate) fn request_exit(&self) {
        self.exiting.store(true, Ordering::Release);
    }

    pub(crate) fn is_exiting(&self) -> bool {
        self.exiting.load(Ordering::Acquire)
    }

    pub(crate) fn set_mode(&self, mode: SubmitMode) {
        self.mode.store(mode);
    }

    pub(crate) fn mode(&self) -> SubmitMode {
        self.mode.load()
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub(crate) fn queued(&self) -> usize {
        self.queue.lock().len()
    }
}
