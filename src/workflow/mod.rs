//! The ESP workflow.
//!
//! A fixed list of steps that walks a SendPost account through sub-account
//! setup, webhooks, domains, IP pools, sending and statistics. Steps run one
//! at a time; a failing step is reported and the run moves on. Values a step
//! produces (sub-account ID, pool name, message ID, ...) are carried in a
//! [`RunState`] that later steps read.

mod orchestrator;
mod result;
mod settings;
mod state;
mod steps;

pub use orchestrator::{WorkflowOrchestrator, STATS_WINDOW_DAYS};
pub use result::{FailureKind, RunReport, StepFailure, StepResult, StepStatus};
pub use settings::{
    LoadedCredentials, WorkflowSettings, ACCOUNT_API_KEY_ENV, ACCOUNT_API_KEY_PLACEHOLDER,
    SUB_ACCOUNT_API_KEY_ENV, SUB_ACCOUNT_API_KEY_PLACEHOLDER,
};
pub use state::RunState;
pub use steps::{Step, POOL_WARMUP_HOURS};
