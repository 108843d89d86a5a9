//! Convenient re-exports for common types and traits

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result};
pub use crate::pool::{PoolConfig, SubmitMode, WorkerPool, WorkerStats};
