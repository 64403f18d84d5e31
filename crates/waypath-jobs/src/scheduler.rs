//! The tick-driven job scheduler.

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use waypath_core::WorldGrid;
use waypath_search::{PathResult, SearchGrid, find_path};

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::job::{DoneGuard, JobId, JobStatus, PathRequest, QueuedJob, RunningJob};

/// Pause between ticks while [`PathScheduler::finish`] waits on workers.
const FINISH_POLL: Duration = Duration::from_millis(1);

/// What one [`PathScheduler::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Callbacks invoked.
    pub completed: usize,
    /// Jobs moved from the queue to the worker pool.
    pub admitted: usize,
}

/// Runs path searches in the background and hands results back on the
/// thread that calls [`tick`](Self::tick).
///
/// Each request snapshots the world into a private [`SearchGrid`] when it
/// is submitted, so later world edits do not affect queued or running
/// jobs. At most `max_concurrent_jobs` searches run at once; the rest wait
/// in FIFO order. Every callback fires exactly once, from inside `tick`.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use waypath_core::{Coord, Extent, TileGrid};
/// use waypath_jobs::{PathRequest, PathScheduler, SchedulerConfig};
///
/// let world = TileGrid::new(Extent::new(8, 1, 8));
/// let mut scheduler = PathScheduler::new(SchedulerConfig::default())?;
///
/// let got = Rc::new(RefCell::new(None));
/// let sink = Rc::clone(&got);
/// scheduler.request_path(
///     &world,
///     PathRequest::new(Coord::ZERO, Coord::new(7, 0, 7)),
///     move |res| *sink.borrow_mut() = Some(res),
/// );
/// scheduler.finish();
/// assert_eq!(got.borrow().as_ref().map(|r| r.waypoints.len()), Some(7));
/// # Ok::<(), waypath_jobs::SchedulerError>(())
/// ```
pub struct PathScheduler {
    config: SchedulerConfig,
    pool: rayon::ThreadPool,
    queued: VecDeque<QueuedJob>,
    running: Vec<RunningJob>,
    next_id: u64,
}

impl PathScheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        if config.max_concurrent_jobs == 0 {
            return Err(SchedulerError::ZeroConcurrency);
        }
        let prefix = config.thread_name.clone();
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(move |i| format!("{prefix}-{i}"))
            .panic_handler(|_| log::error!("path worker panicked"));
        if let Some(n) = config.worker_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;
        log::debug!(
            "path scheduler started: {} workers, {} concurrent jobs",
            pool.current_num_threads(),
            config.max_concurrent_jobs
        );
        Ok(Self {
            config,
            pool,
            queued: VecDeque::new(),
            running: Vec::new(),
            next_id: 0,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Queue a search over a snapshot of `world`. Returns immediately.
    ///
    /// `on_complete` runs on the ticking thread once the search is done.
    pub fn request_path<W, F>(&mut self, world: &W, request: PathRequest, on_complete: F) -> JobId
    where
        W: WorldGrid + ?Sized,
        F: FnOnce(PathResult) + 'static,
    {
        let id = JobId(self.next_id);
        self.next_id += 1;
        let grid = SearchGrid::build(world);
        log::debug!(
            "{id} queued: {} -> {} ({:?}, {:?})",
            request.start,
            request.target,
            request.options.algorithm,
            request.options.diagonal
        );
        self.queued.push_back(QueuedJob {
            id,
            request,
            grid,
            on_complete: Box::new(on_complete),
        });
        id
    }

    /// Deliver finished results, then admit queued jobs into free slots.
    pub fn tick(&mut self) -> TickReport {
        let completed = self.collect_finished();
        let admitted = self.admit();
        TickReport { completed, admitted }
    }

    /// Tick until nothing is queued or running, then drop the scheduler.
    /// Returns the number of callbacks fired along the way.
    pub fn finish(mut self) -> usize {
        let mut completed = 0;
        while !self.is_idle() {
            let report = self.tick();
            completed += report.completed;
            if report == TickReport::default() {
                std::thread::sleep(FINISH_POLL);
            }
        }
        completed
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Whether no job is queued or running.
    pub fn is_idle(&self) -> bool {
        self.queued.is_empty() && self.running.is_empty()
    }

    /// Current state of a job, or `None` once its callback has fired.
    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        if self.queued.iter().any(|j| j.id == id) {
            Some(JobStatus::Queued)
        } else if self.running.iter().any(|j| j.id == id) {
            Some(JobStatus::Running)
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Invoke callbacks of finished jobs in running-list order.
    fn collect_finished(&mut self) -> usize {
        let mut completed = 0;
        let mut i = 0;
        while i < self.running.len() {
            let Some(result) = self.running[i].poll() else {
                i += 1;
                continue;
            };
            let job = self.running.remove(i);
            log::debug!(
                "{} completed: {} waypoints, {} expanded",
                job.id,
                result.waypoints.len(),
                result.expanded
            );
            (job.on_complete)(result);
            completed += 1;
        }
        completed
    }

    fn admit(&mut self) -> usize {
        let budget = self.config.admissions_per_tick.unwrap_or(usize::MAX);
        let mut admitted = 0;
        while admitted < budget && self.running.len() < self.config.max_concurrent_jobs {
            let Some(job) = self.queued.pop_front() else {
                break;
            };
            let running = self.spawn(job);
            self.running.push(running);
            admitted += 1;
        }
        if admitted > 0 {
            log::debug!(
                "admitted {admitted} jobs ({} running, {} queued)",
                self.running.len(),
                self.queued.len()
            );
        }
        admitted
    }

    /// Move a job's snapshot onto the pool.
    fn spawn(&self, job: QueuedJob) -> RunningJob {
        let QueuedJob {
            id,
            request,
            grid,
            on_complete,
        } = job;
        let done = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let flag = Arc::clone(&done);
        self.pool.spawn(move || {
            let _done = DoneGuard(flag);
            let result = find_path(grid, request.start, request.target, request.options);
            // The receiver is gone only if the scheduler was dropped.
            let _ = tx.send(result);
        });

        RunningJob {
            id,
            done,
            rx,
            on_complete,
        }
    }
}
