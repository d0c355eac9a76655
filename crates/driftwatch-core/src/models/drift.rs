use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-resource drift status as CloudFormation reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StackResourceDriftStatus {
    InSync,
    Modified,
    Deleted,
    NotChecked,
    Other(String),
}

impl StackResourceDriftStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InSync => "IN_SYNC",
            Self::Modified => "MODIFIED",
            Self::Deleted => "DELETED",
            Self::NotChecked => "NOT_CHECKED",
            Self::Other(s) => s,
        }
    }

    /// `MODIFIED` and `DELETED` count as drift; everything else does not.
    pub fn is_drifted(&self) -> bool {
        matches!(self, Self::Modified | Self::Deleted)
    }
}

impl From<&str> for StackResourceDriftStatus {
    fn from(s: &str) -> Self {
        match s {
            "IN_SYNC" => Self::InSync,
            "MODIFIED" => Self::Modified,
            "DELETED" => Self::Deleted,
            "NOT_CHECKED" => Self::NotChecked,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StackResourceDriftStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<StackResourceDriftStatus> for String {
    fn from(status: StackResourceDriftStatus) -> Self {
        match status {
            StackResourceDriftStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StackResourceDriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drift of a single stack resource. The id is already normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceDrift {
    pub physical_resource_id: String,
    pub resource_type: String,
    #[serde(rename = "StackResourceDriftStatus")]
    pub drift_status: StackResourceDriftStatus,
}

/// Aggregated drift facts for one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Sorted by `physical_resource_id`, ascending.
    pub drift: Vec<ResourceDrift>,
    pub resource_count: usize,
    pub drifted_count: usize,
}

impl DriftReport {
    /// Build a report from resource drifts in any order.
    ///
    /// The sort is stable, so entries sharing an id keep their provider
    /// order and repeated runs over the same input render identically.
    pub fn from_resources(mut drift: Vec<ResourceDrift>) -> Self {
        drift.sort_by(|a, b| a.physical_resource_id.cmp(&b.physical_resource_id));
        let drifted_count = drift.iter().filter(|d| d.drift_status.is_drifted()).count();

        Self {
            resource_count: drift.len(),
            drifted_count,
            drift,
        }
    }

    pub fn has_drift(&self) -> bool {
        self.drifted_count > 0
    }
}
