use serde::{Deserialize, Serialize};

use crate::models::drift::DriftReport;
use crate::models::stack::Stack;

/// Where a drift detection request currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionStatus {
    Pending,
    Complete,
    Failed { reason: String },
}

/// One answer to a detection status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionPoll {
    pub stack_id: String,
    pub status: DetectionStatus,
}

/// A stack whose drift detection completed, paired with its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedStack {
    pub stack: Stack,
    pub report: DriftReport,
}

/// A stack whose drift detection ended in `DETECTION_FAILED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStack {
    pub stack: Stack,
    pub reason: String,
}

/// Result of one detection run, handed to the notification stage.
///
/// A stack appears in exactly one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    pub completed: Vec<CheckedStack>,
    pub failed: Vec<FailedStack>,
}

impl DetectionOutcome {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.failed.is_empty()
    }

    pub fn drifted(&self) -> impl Iterator<Item = &CheckedStack> {
        self.completed.iter().filter(|c| c.report.has_drift())
    }
}
