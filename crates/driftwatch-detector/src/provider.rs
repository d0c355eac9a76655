use std::future::Future;
use std::pin::Pin;

use driftwatch_core::models::{DetectionPoll, Stack, StackResourceDriftStatus};

use crate::error::DetectorError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One resource drift entry as the provider returns it, before the
/// physical id is normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResourceDrift {
    pub physical_resource_id: String,
    pub resource_type: String,
    pub drift_status: StackResourceDriftStatus,
}

/// The three drift calls the orchestrator and aggregator need.
///
/// Implementations must be safe to call concurrently; status polling for
/// several requests runs interleaved.
pub trait DriftProvider: Send + Sync {
    /// Start drift detection for a stack. Returns the detection id.
    fn detect_stack_drift<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<String, DetectorError>>;

    /// Current status of a detection request.
    fn detection_status<'a>(
        &'a self,
        detection_id: &'a str,
    ) -> BoxFuture<'a, Result<DetectionPoll, DetectorError>>;

    /// Every resource drift recorded by the last detection on a stack.
    fn resource_drifts<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawResourceDrift>, DetectorError>>;
}

/// Source of the stacks discovery filters.
pub trait StackDiscovery: Send + Sync {
    /// All stacks in the account and region, across every page.
    fn list_stacks(&self) -> BoxFuture<'_, Result<Vec<Stack>, DetectorError>>;
}
