use regex::Regex;

use crate::error::CoreError;
use crate::models::Stack;

/// Pattern used when no stack name filter is configured.
pub const MATCH_ALL: &str = ".*";

/// Selects the stacks drift detection should run against.
#[derive(Debug, Clone)]
pub struct StackFilter {
    name_pattern: Regex,
}

impl StackFilter {
    /// Compile a stack name pattern.
    ///
    /// The pattern must match from the start of the name but need not
    /// consume all of it, so `prod-` selects every `prod-*` stack.
    pub fn new(pattern: &str) -> Result<Self, CoreError> {
        let name_pattern =
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| CoreError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { name_pattern })
    }

    pub fn accepts(&self, stack: &Stack) -> bool {
        stack.stack_status.is_drift_checkable() && self.name_pattern.is_match(&stack.stack_name)
    }

    /// Keep the eligible stacks, preserving input order.
    pub fn filter(&self, stacks: impl IntoIterator<Item = Stack>) -> Vec<Stack> {
        stacks.into_iter().filter(|s| self.accepts(s)).collect()
    }
}
