//! Job trait and related types

use std::fmt;

/// A trait representing a unit of work to be executed by the worker pool
///
/// Jobs are fire-and-forget: they carry their own state, produce no return
/// value, and report nothing back to the pool. A job that needs to publish a
/// result must do so through state it captures (a channel, an atomic, a
/// shared collection). A panic inside `run` is not caught by the pool and
/// takes the executing worker thread down with it.
pub trait Job: Send {
    /// Run the job to completion on the calling worker thread
    fn run(&mut self);

    /// Get the job's type name for debugging and statistics
    fn job_type(&self) -> &str {
        "Job"
    }
}

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.job_type())
    }
}

/// A boxed job that can be sent across threads
pub type BoxedJob = Box<dyn Job>;

/// Helper to create a job from a closure
pub struct ClosureJob<F>
where
    F: FnOnce() + Send,
{
    closure: Option<F>,
    name: String,
}

impl<F> ClosureJob<F>
where
    F: FnOnce() + Send,
{
    /// Create a new closure job
    pub fn new(closure: F) -> Self {
        Self {
            closure: Some(closure),
            name: "ClosureJob".to_string(),
        }
    }

    /// Create a new closure job with a custom name
    pub fn with_name<S: Into<String>>(closure: F, name: S) -> Self {
        Self {
            closure: Some(closure),
            name: name.into(),
        }
    }
}

impl<F> Job for ClosureJob<F>
where
    F: FnOnce() + Send,
{
    fn run(&mut self) {
        match self.closure.take() {
            Some(closure) => closure(),
            None => log::warn!("job '{}' already ran, ignoring repeat run", self.name),
        }
    }

    fn job_type(&self) -> &str {
        &self.name
    }
}
