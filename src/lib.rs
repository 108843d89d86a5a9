//! # Strandpool
//!
//! A fixed-size worker pool with switchable serialized and concurrent job
//! submission.
//!
//! ## Features
//!
//! - **Fixed-Size Pool**: Worker threads spawned up front and joined at shutdown
//! - **FIFO Job Queue**: Single shared queue, optionally bounded
//! - **Submission Disciplines**: Concurrent fan-out or strictly serialized execution
//! - **Drain Waiting**: Block until every submitted job has finished
//! - **Worker Statistics**: Track job counts and processing time per worker
//! - **Thread Safety**: Built on parking_lot and crossbeam for low overhead
//!
//! ## Quick Start
//!
//! ```rust
//! use strandpool::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_workers(4)?;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! for _ in 0..10 {
//!     let counter = Arc::clone(&counter);
//!     pool.execute(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })?;
//! }
//!
//! pool.wait_drained();
//! assert_eq!(counter.load(Ordering::SeqCst), 10);
//!
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Serialized Submission
//!
//! Switching to [`SubmitMode::Serialized`] makes each submission wait for the
//! previous job to finish before its own job is queued and signaled, so jobs
//! complete in exactly the order they were submitted, no matter how many
//! workers the pool has.
//!
//! ```rust
//! use strandpool::prelude::*;
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_workers(4)?;
//! pool.set_submit_mode(SubmitMode::Serialized);
//!
//! let order = Arc::new(Mutex::new(Vec::new()));
//! for i in 0..5 {
//!     let order = Arc::clone(&order);
//!     pool.execute(move || {
//!         order.lock().push(i);
//!     })?;
//! }
//!
//! pool.wait_drained();
//! assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pool Configuration
//!
//! ```rust
//! use strandpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = PoolConfig::new(8)
//!     .with_max_queue_size(1000)
//!     .with_worker_name_prefix("my-worker");
//!
//! let pool = WorkerPool::with_config(config)?;
//! assert_eq!(pool.worker_count(), 8);
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Jobs
//!
//! ```rust
//! use strandpool::prelude::*;
//!
//! struct PrintJob {
//!     data: String,
//! }
//!
//! impl Job for PrintJob {
//!     fn run(&mut self) {
//!         println!("Processing: {}", self.data);
//!     }
//!
//!     fn job_type(&self) -> &str {
//!         "PrintJob"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! # let pool = WorkerPool::with_workers(2)?;
//! pool.submit(PrintJob {
//!     data: "test".to_string(),
//! })?;
//! # pool.wait_drained();
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Worker Statistics
//!
//! ```rust
//! use strandpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! # let pool = WorkerPool::with_workers(2)?;
//! # for _ in 0..10 {
//! #     pool.execute(|| {})?;
//! # }
//! # pool.wait_drained();
//! let stats = pool.stats();
//! for (i, stat) in stats.iter().enumerate() {
//!     println!("Worker {}: {} jobs processed", i, stat.get_jobs_processed());
//! }
//!
//! println!("Total jobs: {}", pool.total_jobs_processed());
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result};
pub use crate::pool::{PoolConfig, SubmitMode, WorkerPool, WorkerStats};
