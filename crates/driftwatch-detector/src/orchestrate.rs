use futures::stream::{self, StreamExt, TryStreamExt};

use driftwatch_core::CoreError;
use driftwatch_core::models::{DetectionOutcome, DetectionStatus, FailedStack, Stack};

use crate::aggregate::aggregate;
use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::provider::DriftProvider;

/// A started drift detection, owned by the stack it was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftDetectionRequest {
    pub detection_id: String,
    pub stack: Stack,
}

/// How a detection request ended.
enum Terminal {
    Complete,
    Failed(String),
}

/// Drives drift detection for a batch of stacks.
pub struct Orchestrator<'p> {
    provider: &'p dyn DriftProvider,
    config: DetectorConfig,
}

impl<'p> Orchestrator<'p> {
    pub fn new(provider: &'p dyn DriftProvider, config: DetectorConfig) -> Self {
        Self { provider, config }
    }

    /// Detect drift on every stack and aggregate the ones that completed.
    ///
    /// At most `detection_window` detections are in flight at once. Each
    /// stack is triggered and then polled until terminal; as soon as one
    /// finishes, the next stack is triggered. Both output lists keep input
    /// order.
    ///
    /// Returns an error, and no partial outcome, when a provider call fails
    /// or a request is still pending after `max_poll_attempts` checks.
    pub async fn detect(&self, stacks: &[Stack]) -> Result<DetectionOutcome, DetectorError> {
        let window = self.config.detection_window;
        if window == 0 {
            return Err(CoreError::InvalidBatchSize(window).into());
        }

        // Unordered so a finished detection frees its slot even while an
        // earlier one is still pending; input order is restored below.
        let mut results: Vec<(usize, DriftDetectionRequest, Terminal)> =
            stream::iter(stacks.iter().cloned().enumerate())
                .map(|(index, stack)| async move {
                    let (request, terminal) = self.trigger_and_poll(stack).await?;
                    Ok::<_, DetectorError>((index, request, terminal))
                })
                .buffer_unordered(window)
                .try_collect()
                .await?;
        results.sort_by_key(|(index, _, _)| *index);

        let mut completed = Vec::new();
        let mut failed = Vec::new();
        for (_, request, result) in results {
            match result {
                Terminal::Complete => completed.push(request.stack),
                Terminal::Failed(reason) => failed.push(FailedStack {
                    stack: request.stack,
                    reason,
                }),
            }
        }

        tracing::info!(
            completed = completed.len(),
            failed = failed.len(),
            "drift detection finished"
        );

        let completed = aggregate(self.provider, completed).await?;
        Ok(DetectionOutcome { completed, failed })
    }

    async fn trigger_and_poll(
        &self,
        stack: Stack,
    ) -> Result<(DriftDetectionRequest, Terminal), DetectorError> {
        let request = self.trigger(stack).await?;
        let terminal = self.poll(&request).await?;
        Ok((request, terminal))
    }

    async fn trigger(&self, stack: Stack) -> Result<DriftDetectionRequest, DetectorError> {
        let detection_id = self.provider.detect_stack_drift(&stack.stack_name).await?;
        tracing::debug!(stack = %stack.stack_name, detection_id = %detection_id, "drift detection started");
        Ok(DriftDetectionRequest {
            detection_id,
            stack,
        })
    }

    /// Poll one request until it is terminal or its attempt budget is spent.
    async fn poll(&self, request: &DriftDetectionRequest) -> Result<Terminal, DetectorError> {
        let max_attempts = self.config.max_poll_attempts;

        for attempt in 1..=max_attempts {
            let poll = self.provider.detection_status(&request.detection_id).await?;
            match poll.status {
                DetectionStatus::Complete => return Ok(Terminal::Complete),
                DetectionStatus::Failed { reason } => {
                    tracing::warn!(
                        stack = %request.stack.stack_name,
                        stack_id = %poll.stack_id,
                        reason = %reason,
                        "drift detection failed"
                    );
                    return Ok(Terminal::Failed(reason));
                }
                DetectionStatus::Pending => {
                    tracing::debug!(
                        stack = %request.stack.stack_name,
                        attempt,
                        max_attempts,
                        "drift detection still pending"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.config.poll_interval).await;
                    }
                }
            }
        }

        tracing::error!(
            stack = %request.stack.stack_name,
            detection_id = %request.detection_id,
            "max status checks exceeded"
        );
        Err(DetectorError::PollBudgetExhausted {
            stack_name: request.stack.stack_name.clone(),
            detection_id: request.detection_id.clone(),
            attempts: max_attempts,
        })
    }
}
