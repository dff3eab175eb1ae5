//! SendPost Client Library
//!
//! A typed Rust client for the SendPost email API, and an ESP workflow that
//! drives it end to end: sub-accounts, webhooks, sending domains, IP pools,
//! transactional and marketing sends, statistics and message lookup.
//!
//! # Features
//!
//! - **Scoped Authentication**: Account and sub-account keys, chosen per call
//! - **Typed Models**: Optional-field records for every request and response
//! - **Fault-Tolerant Workflow**: Each step reports success, skip or failure;
//!   a failure never stops the run
//! - **Observability**: Structured `tracing` logs with per-run and per-step spans
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_sendpost::{Credentials, SendPostClient, WorkflowOrchestrator, WorkflowSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SendPostClient::builder().build()?;
//!     let credentials = Credentials::new("account-key", "sub-account-key")?;
//!
//!     let orchestrator = WorkflowOrchestrator::new(client, credentials, WorkflowSettings::default())?;
//!     let report = orchestrator.run().await;
//!
//!     for result in &report.results {
//!         println!("{}: {} - {}", result.step, result.status, result.summary);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;
pub mod workflow;

// Re-exports for convenience
pub use auth::{AuthScope, Credentials, ScopedApiKey};
pub use client::{SendPostApi, SendPostClient, SendPostClientBuilder};
pub use config::SendPostConfig;
pub use errors::{SendPostError, SendPostResult};
pub use workflow::{
    FailureKind, RunReport, RunState, Step, StepResult, StepStatus, WorkflowOrchestrator,
    WorkflowSettings,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod tests;
