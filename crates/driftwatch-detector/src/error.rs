use thiserror::Error;

/// Errors that abort a detection run.
///
/// A stack whose detection merely fails is not an error; it is reported in
/// `DetectionOutcome::failed`.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error(
        "drift detection {detection_id} for stack {stack_name} still pending after {attempts} status checks"
    )]
    PollBudgetExhausted {
        stack_name: String,
        detection_id: String,
        attempts: u32,
    },

    #[error("AWS error: {0}")]
    Aws(String),

    #[error(transparent)]
    Core(#[from] driftwatch_core::CoreError),
}

impl DetectorError {
    /// Prepend the API call and stack to an AWS error message.
    pub fn with_call(self, call: &str, target: &str) -> Self {
        match self {
            Self::Aws(msg) => Self::Aws(format!("{call} ({target}): {msg}")),
            other => other,
        }
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
