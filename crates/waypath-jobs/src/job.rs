use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use waypath_core::Coord;
use waypath_search::{Algorithm, DiagonalPolicy, PathResult, SearchGrid, SearchOptions};

/// Handle for a submitted job, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub(crate) u64);

impl JobId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// Where a live job currently is. Completed jobs are forgotten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Queued,
    Running,
}

/// What to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub start: Coord,
    pub target: Coord,
    pub options: SearchOptions,
}

impl PathRequest {
    /// An A* request with default options.
    pub fn new(start: Coord, target: Coord) -> Self {
        Self {
            start,
            target,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_diagonal(mut self, diagonal: DiagonalPolicy) -> Self {
        self.options.diagonal = diagonal;
        self
    }

    /// Switch to jump point search.
    pub fn with_jump_search(mut self, jump: bool) -> Self {
        self.options.algorithm = if jump {
            Algorithm::JumpPoint
        } else {
            Algorithm::AStar
        };
        self
    }
}

pub(crate) type Callback = Box<dyn FnOnce(PathResult)>;

/// A job waiting for a free slot. Its grid snapshot was taken at submission.
pub(crate) struct QueuedJob {
    pub(crate) id: JobId,
    pub(crate) request: PathRequest,
    pub(crate) grid: SearchGrid,
    pub(crate) on_complete: Callback,
}

/// A job whose search was handed to the worker pool.
pub(crate) struct RunningJob {
    pub(crate) id: JobId,
    pub(crate) done: Arc<AtomicBool>,
    pub(crate) rx: Receiver<PathResult>,
    pub(crate) on_complete: Callback,
}

impl RunningJob {
    /// The job's result once its worker has signalled completion.
    ///
    /// A worker that stopped without sending (it panicked) still counts as
    /// done and yields an empty result.
    pub(crate) fn poll(&self) -> Option<PathResult> {
        if !self.done.load(Ordering::Acquire) {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!("{} finished without a result ({err})", self.id);
                Some(PathResult::unreachable())
            }
        }
    }
}

/// Raises a job's done flag when the worker leaves its closure, whether
/// it returned or unwound.
pub(crate) struct DoneGuard(pub(crate) Arc<AtomicBool>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn request_builders() {
        let req = PathRequest::new(Coord::ZERO, Coord::new(3, 0, 3))
            .with_diagonal(DiagonalPolicy::Never)
            .with_jump_search(true);
        assert_eq!(req.options.diagonal, DiagonalPolicy::Never);
        assert_eq!(req.options.algorithm, Algorithm::JumpPoint);
        assert_eq!(req.with_jump_search(false).options.algorithm, Algorithm::AStar);
    }

    #[test]
    fn job_id_display() {
        assert_eq!(JobId(7).to_string(), "job#7");
        assert_eq!(JobId(7).get(), 7);
    }

    #[test]
    fn poll_waits_for_flag() {
        let (tx, rx) = mpsc::channel();
        let done = Arc::new(AtomicBool::new(false));
        let job = RunningJob {
            id: JobId(1),
            done: Arc::clone(&done),
            rx,
            on_complete: Box::new(|_| {}),
        };
        tx.send(PathResult::unreachable()).unwrap();
        assert!(job.poll().is_none());
        drop(DoneGuard(done));
        assert!(job.poll().is_some());
    }

    #[test]
    fn disconnected_worker_yields_empty_result() {
        let (tx, rx) = mpsc::channel::<PathResult>();
        let done = Arc::new(AtomicBool::new(false));
        let job = RunningJob {
            id: JobId(2),
            done: Arc::clone(&done),
            rx,
            on_complete: Box::new(|_| {}),
        };
        drop(tx);
        drop(DoneGuard(done));
        let res = job.poll().unwrap();
        assert!(res.is_empty());
        assert!(!res.is_found());
    }
}
