//! driftwatch-notify
//!
//! Renders detection outcomes as Slack Block Kit messages and posts them to
//! an incoming webhook.

pub mod error;
pub mod message;
pub mod slack;

pub use crate::error::NotifyError;
pub use crate::slack::{NotifyConfig, SlackNotifier};
