//! `esp-workflow`: runs the SendPost ESP workflow and prints a per-step report.
//!
//! Configuration comes from the environment only:
//!
//! - `SENDPOST_ACCOUNT_API_KEY`, `SENDPOST_SUB_ACCOUNT_API_KEY`
//! - `SENDPOST_FROM_EMAIL`, `SENDPOST_TO_EMAIL`, `SENDPOST_DOMAIN`, `SENDPOST_WEBHOOK_URL`
//! - `SENDPOST_BASE_URL`, `SENDPOST_TIMEOUT`
//! - `SENDPOST_LOG_LEVEL`, `SENDPOST_LOG_FORMAT`, `RUST_LOG`

use tracing::warn;

use integrations_sendpost::observability::LoggingConfig;
use integrations_sendpost::workflow::{LoadedCredentials, RunReport, StepStatus};
use integrations_sendpost::{SendPostClient, WorkflowOrchestrator, WorkflowSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init()?;

    println!("SendPost ESP Example Workflow");

    let loaded = LoadedCredentials::from_env()?;
    if !loaded.placeholders.is_empty() {
        warn!(missing = ?loaded.placeholders, "API keys not set; using placeholders");
        println!();
        println!("WARNING: Please set your API keys!");
        println!("   Set environment variables:");
        for name in &loaded.placeholders {
            println!("   - {}", name);
        }
        println!();
    }

    let settings = WorkflowSettings::from_env();
    let client = SendPostClient::from_env()?;
    let orchestrator = WorkflowOrchestrator::new(client, loaded.credentials, settings)?;

    let report = orchestrator.run().await;
    print_report(&report);

    Ok(())
}

fn print_report(report: &RunReport) {
    for result in &report.results {
        println!();
        println!("=== {} ===", result.step);
        match result.status {
            StepStatus::Success => println!("  OK   {}", result.summary),
            StepStatus::Skipped => println!("  SKIP {}", result.summary),
            StepStatus::Failure => {
                println!("  FAIL {}", result.summary);
                if let Some(failure) = &result.failure {
                    println!("       Kind: {}", failure.kind);
                    if let Some(status) = failure.status_code {
                        println!("       Status code: {}", status);
                    }
                    println!("       Error: {}", failure.message);
                }
            }
        }
    }

    println!();
    println!(
        "Workflow complete: {} succeeded, {} skipped, {} failed (run {})",
        report.count(StepStatus::Success),
        report.count(StepStatus::Skipped),
        report.count(StepStatus::Failure),
        report.run_id
    );
}
