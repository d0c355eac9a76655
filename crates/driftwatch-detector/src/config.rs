use std::time::Duration;

/// Polling limits for one detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Status checks allowed per detection request before the run aborts.
    pub max_poll_attempts: u32,
    /// Wait between two status checks of the same request.
    pub poll_interval: Duration,
    /// Stacks with a detection in flight at the same time.
    pub detection_window: usize,
}

impl DetectorConfig {
    pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 100;
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(6);
    pub const DEFAULT_DETECTION_WINDOW: usize = 3;
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_poll_attempts: Self::DEFAULT_MAX_POLL_ATTEMPTS,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            detection_window: Self::DEFAULT_DETECTION_WINDOW,
        }
    }
}
