/// Default ceiling on simultaneously running searches.
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 50;

/// Tunables for a [`PathScheduler`](crate::PathScheduler).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Upper bound on jobs in the running state. Must be at least 1.
    pub max_concurrent_jobs: usize,
    /// Worker pool size; `None` lets rayon pick one thread per core.
    pub worker_threads: Option<usize>,
    /// Jobs admitted per [`tick`](crate::PathScheduler::tick); `None`
    /// fills every free slot.
    pub admissions_per_tick: Option<usize>,
    /// Prefix for worker thread names.
    pub thread_name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            worker_threads: None,
            admissions_per_tick: None,
            thread_name: String::from("waypath-worker"),
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_concurrent_jobs(mut self, max: usize) -> Self {
        self.max_concurrent_jobs = max;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_admissions_per_tick(mut self, per_tick: usize) -> Self {
        self.admissions_per_tick = Some(per_tick);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.max_concurrent_jobs, 50);
        assert_eq!(cfg.worker_threads, None);
        assert_eq!(cfg.admissions_per_tick, None);
    }

    #[test]
    fn builders_chain() {
        let cfg = SchedulerConfig::default()
            .with_max_concurrent_jobs(4)
            .with_worker_threads(2)
            .with_admissions_per_tick(1)
            .with_thread_name("pf");
        assert_eq!(cfg.max_concurrent_jobs, 4);
        assert_eq!(cfg.worker_threads, Some(2));
        assert_eq!(cfg.admissions_per_tick, Some(1));
        assert_eq!(cfg.thread_name, "pf");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_defaults() {
        let cfg: SchedulerConfig = serde_json::from_str(r#"{"max_concurrent_jobs": 8}"#).unwrap();
        assert_eq!(cfg.max_concurrent_jobs, 8);
        assert_eq!(cfg.thread_name, "waypath-worker");
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
