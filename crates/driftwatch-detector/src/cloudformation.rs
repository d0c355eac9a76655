use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::operation::describe_stack_drift_detection_status::DescribeStackDriftDetectionStatusOutput;
use aws_sdk_cloudformation::primitives::DateTime;
use aws_sdk_cloudformation::types::{self as cfn, StackDriftDetectionStatus};

use driftwatch_core::models::{
    DetectionPoll, DetectionStatus, Stack, StackResourceDriftStatus, StackStatus,
};

use crate::error::{format_err_chain, DetectorError};
use crate::provider::{BoxFuture, DriftProvider, RawResourceDrift, StackDiscovery};

/// `DriftProvider` and `StackDiscovery` backed by the CloudFormation API.
#[derive(Debug, Clone)]
pub struct CloudFormationProvider {
    client: Client,
}

impl CloudFormationProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

impl DriftProvider for CloudFormationProvider {
    fn detect_stack_drift<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<String, DetectorError>> {
        Box::pin(async move {
            let resp = self
                .client
                .detect_stack_drift()
                .stack_name(stack_name)
                .send()
                .await
                .map_err(|e| {
                    DetectorError::Aws(format_err_chain(&e)).with_call("DetectStackDrift", stack_name)
                })?;

            resp.stack_drift_detection_id()
                .map(String::from)
                .ok_or_else(|| {
                    DetectorError::Aws("response is missing the detection id".to_string())
                        .with_call("DetectStackDrift", stack_name)
                })
        })
    }

    fn detection_status<'a>(
        &'a self,
        detection_id: &'a str,
    ) -> BoxFuture<'a, Result<DetectionPoll, DetectorError>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_stack_drift_detection_status()
                .stack_drift_detection_id(detection_id)
                .send()
                .await
                .map_err(|e| {
                    DetectorError::Aws(format_err_chain(&e))
                        .with_call("DescribeStackDriftDetectionStatus", detection_id)
                })?;

            detection_poll(&resp, detection_id)
        })
    }

    fn resource_drifts<'a>(
        &'a self,
        stack_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawResourceDrift>, DetectorError>> {
        Box::pin(async move {
            let mut drifts = Vec::new();
            let mut next_token = None;
            loop {
                let mut req = self
                    .client
                    .describe_stack_resource_drifts()
                    .stack_name(stack_name);
                if let Some(token) = &next_token {
                    req = req.next_token(token);
                }
                let resp = req.send().await.map_err(|e| {
                    DetectorError::Aws(format_err_chain(&e))
                        .with_call("DescribeStackResourceDrifts", stack_name)
                })?;

                drifts.extend(resp.stack_resource_drifts().iter().map(raw_drift));

                match resp.next_token() {
                    Some(token) => next_token = Some(token.to_string()),
                    None => break,
                }
            }

            Ok(drifts)
        })
    }
}

impl StackDiscovery for CloudFormationProvider {
    fn list_stacks(&self) -> BoxFuture<'_, Result<Vec<Stack>, DetectorError>> {
        Box::pin(async {
            let mut stacks = Vec::new();
            let mut pages = self.client.describe_stacks().into_paginator().send();
            while let Some(page) = pages.next().await {
                let page = page.map_err(|e| {
                    DetectorError::Aws(format_err_chain(&e)).with_call("DescribeStacks", "*")
                })?;
                for stack in page.stacks() {
                    stacks.push(stack_from_sdk(stack)?);
                }
            }
            Ok(stacks)
        })
    }
}

fn detection_poll(
    resp: &DescribeStackDriftDetectionStatusOutput,
    detection_id: &str,
) -> Result<DetectionPoll, DetectorError> {
    let missing = |field: &str| {
        DetectorError::Aws(format!("response is missing the {field}"))
            .with_call("DescribeStackDriftDetectionStatus", detection_id)
    };

    let status = match resp.detection_status().ok_or_else(|| missing("detection status"))? {
        StackDriftDetectionStatus::DetectionComplete => DetectionStatus::Complete,
        StackDriftDetectionStatus::DetectionFailed => DetectionStatus::Failed {
            reason: resp
                .detection_status_reason()
                .unwrap_or("no reason given")
                .to_string(),
        },
        StackDriftDetectionStatus::DetectionInProgress => DetectionStatus::Pending,
        other => {
            tracing::warn!(
                detection_id,
                status = other.as_str(),
                "unrecognised detection status, treating as pending"
            );
            DetectionStatus::Pending
        }
    };

    Ok(DetectionPoll {
        stack_id: resp.stack_id().unwrap_or_default().to_string(),
        status,
    })
}

fn raw_drift(drift: &cfn::StackResourceDrift) -> RawResourceDrift {
    RawResourceDrift {
        // Resources that were never created have no physical id.
        physical_resource_id: drift
            .physical_resource_id()
            .or(drift.logical_resource_id())
            .unwrap_or_default()
            .to_string(),
        resource_type: drift.resource_type().unwrap_or_default().to_string(),
        drift_status: drift
            .stack_resource_drift_status()
            .map(|s| StackResourceDriftStatus::from(s.as_str()))
            .unwrap_or(StackResourceDriftStatus::Other(String::new())),
    }
}

fn stack_from_sdk(stack: &cfn::Stack) -> Result<Stack, DetectorError> {
    let stack_name = stack.stack_name().ok_or_else(|| {
        DetectorError::Aws("stack is missing its name".to_string())
            .with_call("DescribeStacks", stack.stack_id().unwrap_or("*"))
    })?;

    Ok(Stack {
        stack_id: stack.stack_id().unwrap_or_default().to_string(),
        stack_name: stack_name.to_string(),
        stack_status: stack
            .stack_status()
            .map(|s| StackStatus::from(s.as_str()))
            .unwrap_or(StackStatus::Other(String::new())),
        description: stack.description().map(String::from),
        creation_time: stack.creation_time().and_then(to_timestamp),
        last_updated_time: stack.last_updated_time().and_then(to_timestamp),
    })
}

fn to_timestamp(dt: &DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(dt.secs()).ok()
}

#[cfg(test)]
mod tests {
    use aws_sdk_cloudformation::types::{
        StackResourceDriftStatus as SdkDriftStatus, StackStatus as SdkStackStatus,
    };

    use super::*;

    fn status_output(
        status: Option<StackDriftDetectionStatus>,
        reason: Option<&str>,
    ) -> DescribeStackDriftDetectionStatusOutput {
        DescribeStackDriftDetectionStatusOutput::builder()
            .stack_id("arn:aws:cloudformation:us-east-1:123456789012:stack/app/1")
            .stack_drift_detection_id("det-1")
            .set_detection_status(status)
            .set_detection_status_reason(reason.map(String::from))
            .build()
    }

    #[test]
    fn complete_and_in_progress_statuses() {
        let poll = detection_poll(
            &status_output(Some(StackDriftDetectionStatus::DetectionComplete), None),
            "det-1",
        )
        .unwrap();
        assert_eq!(poll.status, DetectionStatus::Complete);
        assert_eq!(
            poll.stack_id,
            "arn:aws:cloudformation:us-east-1:123456789012:stack/app/1"
        );

        let poll = detection_poll(
            &status_output(Some(StackDriftDetectionStatus::DetectionInProgress), None),
            "det-1",
        )
        .unwrap();
        assert_eq!(poll.status, DetectionStatus::Pending);
    }

    #[test]
    fn failed_status_keeps_reason() {
        let poll = detection_poll(
            &status_output(
                Some(StackDriftDetectionStatus::DetectionFailed),
                Some("Failed to detect drift on resource [Queue]"),
            ),
            "det-1",
        )
        .unwrap();
        assert_eq!(
            poll.status,
            DetectionStatus::Failed {
                reason: "Failed to detect drift on resource [Queue]".to_string()
            }
        );

        let poll = detection_poll(
            &status_output(Some(StackDriftDetectionStatus::DetectionFailed), None),
            "det-1",
        )
        .unwrap();
        assert_eq!(
            poll.status,
            DetectionStatus::Failed {
                reason: "no reason given".to_string()
            }
        );
    }

    #[test]
    fn unrecognised_status_is_pending() {
        let poll = detection_poll(
            &status_output(Some(StackDriftDetectionStatus::from("DETECTION_PAUSED")), None),
            "det-1",
        )
        .unwrap();
        assert_eq!(poll.status, DetectionStatus::Pending);
    }

    #[test]
    fn missing_status_is_an_error() {
        let err = detection_poll(&status_output(None, None), "det-1").unwrap_err();
        assert!(
            matches!(&err, DetectorError::Aws(msg) if msg.contains("det-1") && msg.contains("missing")),
            "{err}"
        );
    }

    #[test]
    fn drift_uses_physical_id() {
        let drift = cfn::StackResourceDrift::builder()
            .logical_resource_id("Bucket")
            .physical_resource_id("arn:aws:s3:::my-bucket")
            .resource_type("AWS::S3::Bucket")
            .stack_resource_drift_status(SdkDriftStatus::Modified)
            .build();

        assert_eq!(
            raw_drift(&drift),
            RawResourceDrift {
                physical_resource_id: "arn:aws:s3:::my-bucket".to_string(),
                resource_type: "AWS::S3::Bucket".to_string(),
                drift_status: StackResourceDriftStatus::Modified,
            }
        );
    }

    #[test]
    fn drift_without_physical_id_falls_back_to_logical_id() {
        let drift = cfn::StackResourceDrift::builder()
            .logical_resource_id("NeverCreatedQueue")
            .resource_type("AWS::SQS::Queue")
            .stack_resource_drift_status(SdkDriftStatus::Deleted)
            .build();

        let raw = raw_drift(&drift);
        assert_eq!(raw.physical_resource_id, "NeverCreatedQueue");
        assert_eq!(raw.drift_status, StackResourceDriftStatus::Deleted);
    }

    #[test]
    fn drift_with_nothing_set_is_empty_and_not_drifted() {
        let raw = raw_drift(&cfn::StackResourceDrift::builder().build());
        assert_eq!(raw.physical_resource_id, "");
        assert_eq!(raw.resource_type, "");
        assert!(!raw.drift_status.is_drifted());
    }

    #[test]
    fn stack_maps_every_field() {
        let stack = cfn::Stack::builder()
            .stack_id("arn:aws:cloudformation:us-east-1:123456789012:stack/app/1")
            .stack_name("app")
            .stack_status(SdkStackStatus::UpdateRollbackComplete)
            .description("web tier")
            .creation_time(DateTime::from_secs(1_700_000_000))
            .build();

        let mapped = stack_from_sdk(&stack).unwrap();
        assert_eq!(mapped.stack_name, "app");
        assert_eq!(mapped.stack_status, StackStatus::UpdateRollbackComplete);
        assert_eq!(mapped.description.as_deref(), Some("web tier"));
        assert_eq!(
            mapped.creation_time,
            Some(jiff::Timestamp::from_second(1_700_000_000).unwrap())
        );
        assert_eq!(mapped.last_updated_time, None);
    }

    #[test]
    fn stack_without_status_is_not_checkable() {
        let stack = cfn::Stack::builder().stack_name("half-known").build();

        let mapped = stack_from_sdk(&stack).unwrap();
        assert_eq!(mapped.stack_status, StackStatus::Other(String::new()));
        assert!(!mapped.stack_status.is_drift_checkable());
        assert_eq!(mapped.stack_id, "");
        assert_eq!(mapped.creation_time, None);
    }

    #[test]
    fn stack_without_name_is_an_error() {
        let stack = cfn::Stack::builder().stack_id("id-9").build();

        let err = stack_from_sdk(&stack).unwrap_err();
        assert!(matches!(&err, DetectorError::Aws(msg) if msg.contains("id-9")), "{err}");
    }
}
