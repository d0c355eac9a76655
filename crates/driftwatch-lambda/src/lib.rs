//! driftwatch-lambda
//!
//! Lambda hosts for the three pipeline stages. Each binary reads its
//! settings once at cold start and then serves invocations:
//!
//! - `driftwatch-discover` — scheduled; lists stacks and enqueues batches
//! - `driftwatch-detect` — SQS-triggered; detects drift for one batch
//! - `driftwatch-notify` — invoked by detect; posts results to Slack

pub mod config;
pub mod handlers;
pub mod queue;
pub mod telemetry;
