//! Worker pool and worker implementations

mod shared;
pub mod worker;
pub mod worker_pool;

pub use shared::SubmitMode;
pub use worker::WorkerStats;
pub use worker_pool::{PoolConfig, WorkerPool};
