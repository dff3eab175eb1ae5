//! Per-step outcomes and the run report.

use uuid::Uuid;

use super::state::RunState;
use super::steps::Step;
use crate::errors::SendPostError;
use crate::types::StatsWindow;

/// Terminal status of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The API call succeeded.
    Success,
    /// A prerequisite from an earlier step was missing; no call was made.
    Skipped,
    /// The API call failed.
    Failure,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Success => write!(f, "success"),
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Classification of a step failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The key was rejected or lacks permission (401/403).
    Authentication,
    /// The API refused the request (other 4xx).
    RemoteValidation,
    /// The API failed (5xx).
    Server,
    /// No response was received.
    Transport,
    /// A body could not be encoded or decoded.
    Decode,
}

impl From<&SendPostError> for FailureKind {
    fn from(error: &SendPostError) -> Self {
        match error {
            SendPostError::Authentication { .. } | SendPostError::Permission { .. } => {
                FailureKind::Authentication
            }
            SendPostError::BadRequest { .. }
            | SendPostError::NotFound { .. }
            | SendPostError::Conflict { .. }
            | SendPostError::Validation { .. }
            | SendPostError::RateLimit { .. } => FailureKind::RemoteValidation,
            SendPostError::Server { .. } => FailureKind::Server,
            SendPostError::Unknown { status, .. } => match status {
                0 => FailureKind::Transport,
                500..=599 => FailureKind::Server,
                _ => FailureKind::RemoteValidation,
            },
            SendPostError::Timeout { .. }
            | SendPostError::Connection { .. }
            | SendPostError::Configuration { .. } => FailureKind::Transport,
            SendPostError::Serialization { .. } | SendPostError::Deserialization { .. } => {
                FailureKind::Decode
            }
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Authentication => write!(f, "authentication"),
            FailureKind::RemoteValidation => write!(f, "remote validation"),
            FailureKind::Server => write!(f, "server"),
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Decode => write!(f, "decode"),
        }
    }
}

/// Details of a failed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// HTTP status, when a response was received.
    pub status_code: Option<u16>,
    /// The message as reported by the API or transport.
    pub message: String,
}

impl From<&SendPostError> for StepFailure {
    fn from(error: &SendPostError) -> Self {
        Self {
            kind: FailureKind::from(error),
            status_code: error.status_code(),
            message: error.message().to_string(),
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// The step.
    pub step: Step,
    /// Terminal status.
    pub status: StepStatus,
    /// Human-readable summary, or the skip reason.
    pub summary: String,
    /// Set only when `status` is `Failure`.
    pub failure: Option<StepFailure>,
}

impl StepResult {
    pub(crate) fn success(step: Step, summary: String) -> Self {
        Self {
            step,
            status: StepStatus::Success,
            summary,
            failure: None,
        }
    }

    pub(crate) fn skipped(step: Step, reason: String) -> Self {
        Self {
            step,
            status: StepStatus::Skipped,
            summary: reason,
            failure: None,
        }
    }

    pub(crate) fn failure(step: Step, error: &SendPostError) -> Self {
        Self {
            step,
            status: StepStatus::Failure,
            summary: format!("Failed to {}", step.action()),
            failure: Some(StepFailure::from(error)),
        }
    }

    /// Step number, 1-based.
    pub fn number(&self) -> u8 {
        self.step.number()
    }

    /// Step name.
    pub fn name(&self) -> &'static str {
        self.step.name()
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Correlation ID attached to every log line of the run.
    pub run_id: Uuid,
    /// Date window shared by the statistics steps.
    pub window: StatsWindow,
    /// One result per step, in execution order.
    pub results: Vec<StepResult>,
    /// State after the last step.
    pub state: RunState,
}

impl RunReport {
    /// Returns the result of the given step.
    pub fn result(&self, step: Step) -> Option<&StepResult> {
        self.results.iter().find(|result| result.step == step)
    }

    /// Counts results with the given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == status)
            .count()
    }

    /// Returns true when no step failed.
    pub fn is_clean(&self) -> bool {
        self.count(StepStatus::Failure) == 0
    }
}
