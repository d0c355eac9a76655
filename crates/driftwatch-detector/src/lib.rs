//! driftwatch-detector
//!
//! Drift detection against CloudFormation. Library consumed by the Lambda
//! stages.
//!
//! Public API:
//! - `discover()` — list stacks and keep the ones drift can be checked on
//! - `Orchestrator::detect()` — trigger, poll, and partition a batch of stacks
//! - `aggregate()` — fetch and summarise per-resource drift for completed stacks

pub mod aggregate;
pub mod cloudformation;
pub mod config;
pub mod discover;
pub mod error;
pub mod orchestrate;
pub mod provider;

pub use crate::aggregate::aggregate;
pub use crate::cloudformation::CloudFormationProvider;
pub use crate::config::DetectorConfig;
pub use crate::discover::discover;
pub use crate::error::DetectorError;
pub use crate::orchestrate::{DriftDetectionRequest, Orchestrator};
pub use crate::provider::{BoxFuture, DriftProvider, RawResourceDrift, StackDiscovery};
