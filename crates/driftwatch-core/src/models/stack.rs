use std::fmt;

use serde::{Deserialize, Serialize};

/// A CloudFormation stack as reported by discovery.
///
/// This is also the wire shape of one queue message entry, so field names
/// follow the CloudFormation API (`StackId`, `StackName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stack {
    pub stack_id: String,
    pub stack_name: String,
    pub stack_status: StackStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<jiff::Timestamp>,
}

impl Stack {
    pub fn new(
        stack_id: impl Into<String>,
        stack_name: impl Into<String>,
        stack_status: StackStatus,
    ) -> Self {
        Self {
            stack_id: stack_id.into(),
            stack_name: stack_name.into(),
            stack_status,
            description: None,
            creation_time: None,
            last_updated_time: None,
        }
    }
}

/// Lifecycle status of a stack.
///
/// Only the three settled states drift detection can run against get their
/// own variant; every other CloudFormation status is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StackStatus {
    CreateComplete,
    UpdateComplete,
    UpdateRollbackComplete,
    Other(String),
}

impl StackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreateComplete => "CREATE_COMPLETE",
            Self::UpdateComplete => "UPDATE_COMPLETE",
            Self::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            Self::Other(s) => s,
        }
    }

    /// Whether CloudFormation can compute drift for a stack in this state.
    pub fn is_drift_checkable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for StackStatus {
    fn from(s: &str) -> Self {
        match s {
            "CREATE_COMPLETE" => Self::CreateComplete,
            "UPDATE_COMPLETE" => Self::UpdateComplete,
            "UPDATE_ROLLBACK_COMPLETE" => Self::UpdateRollbackComplete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StackStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<StackStatus> for String {
    fn from(status: StackStatus) -> Self {
        match status {
            StackStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
