use thiserror::Error;

/// Errors raised while constructing a [`PathScheduler`](crate::PathScheduler).
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `max_concurrent_jobs` was zero, so no job could ever run.
    #[error("max_concurrent_jobs must be at least 1")]
    ZeroConcurrency,

    /// The worker pool could not be started.
    #[error("failed to build the path worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
