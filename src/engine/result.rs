//! Execution result types

use super::error::StepError;

/// Outcome of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success(String),
    Failure(StepError),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success(_))
    }

    /// Text of the step, if it succeeded
    pub fn text(&self) -> Option<&str> {
        match self {
            StepOutcome::Success(text) => Some(text),
            StepOutcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<String, StepError> {
        self.into()
    }
}

impl From<Result<String, StepError>> for StepOutcome {
    fn from(result: Result<String, StepError>) -> Self {
        match result {
            Ok(text) => StepOutcome::Success(text),
            Err(err) => StepOutcome::Failure(err),
        }
    }
}

impl From<StepOutcome> for Result<String, StepError> {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Success(text) => Ok(text),
            StepOutcome::Failure(err) => Err(err),
        }
    }
}

/// Result of a chained run
#[derive(Debug, Clone)]
pub struct ChainResult {
    pub run_id: String,
    pub success: bool,
    /// Texts of the steps that succeeded, in the order they ran
    pub completed: Vec<String>,
    /// Whether the arrival signal was produced
    pub arrived: bool,
    pub error: Option<StepError>,
}
