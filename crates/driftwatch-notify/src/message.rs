//! Slack Block Kit rendering.
//!
//! Every message links the stack name to the CloudFormation console's drift
//! page for that stack.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

use driftwatch_core::models::{
    CheckedStack, DetectionOutcome, FailedStack, StackResourceDriftStatus,
};

const CONSOLE_DRIFTS_URL: &str =
    "https://console.aws.amazon.com/cloudformation/home#/stacks/drifts?stackId=";

/// Unreserved characters and `/` stay literal in the stack id.
const STACK_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Console link to the drift page of a stack.
pub fn stack_url(stack_id: &str) -> String {
    format!(
        "{CONSOLE_DRIFTS_URL}{}",
        utf8_percent_encode(stack_id, STACK_ID)
    )
}

pub fn status_emoji(status: &StackResourceDriftStatus) -> &'static str {
    match status {
        StackResourceDriftStatus::Deleted => ":x:",
        StackResourceDriftStatus::Modified => ":warning:",
        StackResourceDriftStatus::InSync => ":heavy_check_mark:",
        _ => "",
    }
}

/// All messages for one outcome: failed detections first, then one message
/// per completed stack.
pub fn outcome_messages(outcome: &DetectionOutcome, show_in_sync: bool) -> Vec<Value> {
    outcome
        .failed
        .iter()
        .map(detection_failed_message)
        .chain(
            outcome
                .completed
                .iter()
                .map(|c| stack_message(c, show_in_sync)),
        )
        .collect()
}

pub fn detection_failed_message(failed: &FailedStack) -> Value {
    let link = stack_link(&failed.stack.stack_id, &failed.stack.stack_name);
    json!({
        "blocks": [section(format!(
            ":question: Detection failed at {link}\n>_{}_",
            failed.reason
        ))]
    })
}

/// Message for a completed stack.
///
/// `IN_SYNC` resources of a drifted stack are listed only when
/// `show_in_sync` is set.
pub fn stack_message(checked: &CheckedStack, show_in_sync: bool) -> Value {
    let link = stack_link(&checked.stack.stack_id, &checked.stack.stack_name);

    if !checked.report.has_drift() {
        return json!({
            "blocks": [section(format!(":heavy_check_mark: No drift detected at {link}"))]
        });
    }

    let mut blocks = vec![
        section(format!(":warning: Drift detected at {link}")),
        divider(),
    ];
    blocks.extend(
        checked
            .report
            .drift
            .iter()
            .filter(|d| show_in_sync || d.drift_status != StackResourceDriftStatus::InSync)
            .map(|d| {
                section(format!(
                    ">{} *{}*\n>:small_orange_diamond: _{}_",
                    status_emoji(&d.drift_status),
                    d.physical_resource_id,
                    d.resource_type
                ))
            }),
    );
    blocks.push(divider());

    json!({ "blocks": blocks })
}

fn stack_link(stack_id: &str, stack_name: &str) -> String {
    format!("*<{}|{}>*", stack_url(stack_id), stack_name)
}

fn section(text: String) -> Value {
    json!({
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": text,
        }
    })
}

fn divider() -> Value {
    json!({ "type": "divider" })
}
