//! Step error types

/// Message carried by every missing-step failure
pub const STEP_NOT_FOUND_MESSAGE: &str = "Instructions not found.";

/// Errors that can occur while running a step
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("{}", STEP_NOT_FOUND_MESSAGE)]
    NotFound { index: usize },
}

impl StepError {
    /// Index of the step that failed
    pub fn index(&self) -> usize {
        match self {
            StepError::NotFound { index } => *index,
        }
    }

    /// Human-readable failure reason
    pub fn reason(&self) -> &'static str {
        match self {
            StepError::NotFound { .. } => STEP_NOT_FOUND_MESSAGE,
        }
    }
}
