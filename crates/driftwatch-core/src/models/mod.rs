pub mod detection;
pub mod drift;
pub mod stack;

pub use detection::{CheckedStack, DetectionOutcome, DetectionPoll, DetectionStatus, FailedStack};
pub use drift::{DriftReport, ResourceDrift, StackResourceDriftStatus};
pub use stack::{Stack, StackStatus};
