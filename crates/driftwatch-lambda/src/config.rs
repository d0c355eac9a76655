//! Stage settings, read from the Lambda environment once per cold start.
//!
//! Every loader takes a lookup function so tests can supply variables
//! without touching the process environment.

use std::str::FromStr;
use std::time::Duration;

use driftwatch_core::StackFilter;
use driftwatch_core::filter::MATCH_ALL;
use driftwatch_detector::DetectorConfig;
use driftwatch_notify::NotifyConfig;
use eyre::{eyre, WrapErr};

pub const STACK_REGEX: &str = "STACK_REGEX";
pub const STACK_BATCHES: &str = "STACK_BATCHES";
pub const DRIFT_DETECTION_QUEUE: &str = "DRIFT_DETECTION_QUEUE";
pub const CHECK_STATUS_MAX_ATTEMPTS: &str = "CHECK_STATUS_MAX_ATTEMPTS";
pub const CHECK_STATUS_ATTEMPT_WAIT_TIME: &str = "CHECK_STATUS_ATTEMPT_WAIT_TIME";
pub const DETECTION_WINDOW: &str = "DETECTION_WINDOW";
pub const SLACK_NOTIFICATION_FUNCTION: &str = "SLACK_NOTIFICATION_FUNCTION";
pub const SLACK_WEBHOOK: &str = "SLACK_WEBHOOK";
pub const SHOW_IN_SYNC: &str = "SHOW_IN_SYNC";

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Settings for the discover stage.
#[derive(Debug, Clone)]
pub struct DiscoverSettings {
    pub filter: StackFilter,
    pub batch_size: usize,
    pub queue_url: String,
}

impl DiscoverSettings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let pattern = lookup(STACK_REGEX).unwrap_or_else(|| MATCH_ALL.to_string());
        let filter = StackFilter::new(&pattern)?;

        let batch_size: usize = parse(&lookup, STACK_BATCHES)?
            .ok_or_else(|| eyre!("{STACK_BATCHES} is not set"))?;
        if batch_size == 0 {
            return Err(eyre!("{STACK_BATCHES} must be at least 1"));
        }

        Ok(Self {
            filter,
            batch_size,
            queue_url: required(&lookup, DRIFT_DETECTION_QUEUE)?,
        })
    }
}

/// Settings for the detect stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectSettings {
    pub detector: DetectorConfig,
    pub notification_function: String,
}

impl DetectSettings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let max_poll_attempts = parse(&lookup, CHECK_STATUS_MAX_ATTEMPTS)?
            .unwrap_or(DetectorConfig::DEFAULT_MAX_POLL_ATTEMPTS);
        if max_poll_attempts == 0 {
            return Err(eyre!("{CHECK_STATUS_MAX_ATTEMPTS} must be at least 1"));
        }

        let poll_interval = parse(&lookup, CHECK_STATUS_ATTEMPT_WAIT_TIME)?
            .map(Duration::from_secs)
            .unwrap_or(DetectorConfig::DEFAULT_POLL_INTERVAL);

        let detection_window = parse(&lookup, DETECTION_WINDOW)?
            .unwrap_or(DetectorConfig::DEFAULT_DETECTION_WINDOW);
        if detection_window == 0 {
            return Err(eyre!("{DETECTION_WINDOW} must be at least 1"));
        }

        Ok(Self {
            detector: DetectorConfig {
                max_poll_attempts,
                poll_interval,
                detection_window,
            },
            notification_function: required(&lookup, SLACK_NOTIFICATION_FUNCTION)?,
        })
    }
}

/// Settings for the notify stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
    pub notify: NotifyConfig,
}

impl NotifySettings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let show_in_sync = match lookup(SHOW_IN_SYNC) {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" | "" => false,
                _ => return Err(eyre!("{SHOW_IN_SYNC} must be true or false, got {raw:?}")),
            },
        };

        Ok(Self {
            notify: NotifyConfig {
                webhook_url: required(&lookup, SLACK_WEBHOOK)?,
                show_in_sync,
            },
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> eyre::Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| eyre!("{key} is not set"))
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .wrap_err_with(|| format!("{key} has invalid value {raw:?}"))
        })
        .transpose()
}
