//! Core types and traits for the worker pool

pub mod error;
pub mod job;

pub use error::{PoolError, Result};
pub use job::{BoxedJob, ClosureJob, Job};
