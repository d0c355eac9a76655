use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("invalid stack name pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("not an AWS ARN: {0}")]
    NotAnArn(String),

    #[error("ARN has {parts} colon-delimited parts, expected 6: {raw}")]
    TooFewParts { raw: String, parts: usize },
}
