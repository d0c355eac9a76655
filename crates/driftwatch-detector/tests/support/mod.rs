#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use driftwatch_core::models::{
    DetectionPoll, DetectionStatus, Stack, StackResourceDriftStatus, StackStatus,
};
use driftwatch_detector::{
    BoxFuture, DetectorConfig, DetectorError, DriftProvider, RawResourceDrift, StackDiscovery,
};

pub fn stack(name: &str) -> Stack {
    Stack::new(stack_id(name), name, StackStatus::CreateComplete)
}

pub fn stack_id(name: &str) -> String {
    format!("arn:aws:cloudformation:us-east-1:123456789012:stack/{name}/0000")
}

pub fn raw(id: &str, kind: &str, status: &str) -> RawResourceDrift {
    RawResourceDrift {
        physical_resource_id: id.to_string(),
        resource_type: kind.to_string(),
        drift_status: StackResourceDriftStatus::from(status),
    }
}

pub fn fast_config(max_poll_attempts: u32, detection_window: usize) -> DetectorConfig {
    DetectorConfig {
        max_poll_attempts,
        poll_interval: Duration::ZERO,
        detection_window,
    }
}

/// In-memory provider replaying scripted detection statuses.
///
/// Each stack has a queue of statuses; the last one repeats forever.
/// Every call is appended to `calls` as `"<call>:<stack name>"`.
#[derive(Default)]
pub struct ScriptedProvider {
    statuses: Mutex<HashMap<String, VecDeque<DetectionStatus>>>,
    drifts: HashMap<String, Vec<RawResourceDrift>>,
    listing: Vec<Stack>,
    failing_calls: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, name: &str, statuses: Vec<DetectionStatus>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(name.to_string(), statuses.into());
        self
    }

    pub fn with_drifts(mut self, name: &str, drifts: Vec<RawResourceDrift>) -> Self {
        self.drifts.insert(name.to_string(), drifts);
        self
    }

    pub fn with_listing(mut self, stacks: Vec<Stack>) -> Self {
        self.listing = stacks;
        self
    }

    /// Make `<call>:<stack name>` return an AWS error.
    pub fn failing(mut self, call: &str) -> Self {
        self.failing_calls.push(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: String) -> Result<(), DetectorError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing_calls.contains(&call) {
            return Err(DetectorError::Aws(format!("{call}: access denied")));
        }
        Ok(())
    }
}

impl DriftProvider for ScriptedProvider {
    fn detect_stack_drift<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<String, DetectorError>> {
        Box::pin(async move {
            self.record(format!("trigger:{stack_name}"))?;
            Ok(format!("detection-{stack_name}"))
        })
    }

    fn detection_status<'a>(
        &'a self,
        detection_id: &'a str,
    ) -> BoxFuture<'a, Result<DetectionPoll, DetectorError>> {
        Box::pin(async move {
            let name = detection_id.trim_start_matches("detection-").to_string();
            self.record(format!("poll:{name}"))?;

            let mut statuses = self.statuses.lock().unwrap();
            let queue = statuses.entry(name.clone()).or_default();
            let status = if queue.len() > 1 {
                queue.pop_front().unwrap_or(DetectionStatus::Complete)
            } else {
                queue.front().cloned().unwrap_or(DetectionStatus::Complete)
            };

            Ok(DetectionPoll {
                stack_id: stack_id(&name),
                status,
            })
        })
    }

    fn resource_drifts<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawResourceDrift>, DetectorError>> {
        Box::pin(async move {
            self.record(format!("drifts:{stack_name}"))?;
            Ok(self.drifts.get(stack_name).cloned().unwrap_or_default())
        })
    }
}

impl StackDiscovery for ScriptedProvider {
    fn list_stacks(&self) -> BoxFuture<'_, Result<Vec<Stack>, DetectorError>> {
        Box::pin(async {
            self.record("list:*".to_string())?;
            Ok(self.listing.clone())
        })
    }
}
