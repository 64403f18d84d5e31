//! **waypath-jobs**: asynchronous path requests with admission control.
//!
//! A [`PathScheduler`] accepts [`PathRequest`]s, snapshots the world grid
//! for each one, and runs the searches on a rayon worker pool. The host
//! drives it by calling [`PathScheduler::tick`] once per frame (or loop
//! iteration): finished jobs have their callbacks invoked there, on the
//! host's thread, and queued jobs are admitted into free slots up to
//! [`SchedulerConfig::max_concurrent_jobs`].
//!
//! Scheduler construction is the only fallible step ([`SchedulerError`]).
//! Searches that find no path complete normally with an empty waypoint
//! list.

pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;

pub use config::{DEFAULT_MAX_CONCURRENT_JOBS, SchedulerConfig};
pub use error::SchedulerError;
pub use job::{JobId, JobStatus, PathRequest};
pub use scheduler::{PathScheduler, TickReport};
