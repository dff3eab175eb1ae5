//! Sequential, non-aborting workflow runner.

use chrono::NaiveDate;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::result::{RunReport, StepResult, StepStatus};
use super::settings::WorkflowSettings;
use super::state::RunState;
use super::steps::{Step, StepContext, StepOutcome};
use crate::auth::Credentials;
use crate::client::SendPostApi;
use crate::errors::SendPostResult;
use crate::types::StatsWindow;

/// Days covered by the statistics window, ending today.
pub const STATS_WINDOW_DAYS: u64 = 7;

/// Runs the step catalog against a [`SendPostApi`].
///
/// A run never stops early: every step in [`Step::ALL`] produces exactly one
/// [`StepResult`], whatever happened before it.
pub struct WorkflowOrchestrator<A> {
    api: A,
    credentials: Credentials,
    settings: WorkflowSettings,
    today: Option<NaiveDate>,
}

impl<A: SendPostApi> WorkflowOrchestrator<A> {
    /// Creates an orchestrator.
    ///
    /// Fails with a configuration error, before any request is made, if the
    /// settings are structurally invalid.
    pub fn new(api: A, credentials: Credentials, settings: WorkflowSettings) -> SendPostResult<Self> {
        settings.validate()?;

        Ok(Self {
            api,
            credentials,
            settings,
            today: None,
        })
    }

    /// Pins the date the statistics window ends on.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the API the orchestrator calls.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the settings.
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Runs every step in order and reports each outcome.
    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4();
        let window = self.today.map_or_else(
            || StatsWindow::trailing_from_local_today(STATS_WINDOW_DAYS),
            |today| StatsWindow::trailing(today, STATS_WINDOW_DAYS),
        );

        let span = info_span!("workflow_run", %run_id);
        async move {
            info!(%window, steps = Step::ALL.len(), "Starting workflow");

            let ctx = StepContext {
                credentials: &self.credentials,
                settings: &self.settings,
                window,
            };
            let mut state = RunState::default();
            let mut results = Vec::with_capacity(Step::ALL.len());

            for step in Step::ALL {
                let span = info_span!(
                    "step",
                    number = step.number(),
                    name = step.name(),
                    scope = %step.scope()
                );
                let (result, next) = self.execute(step, &ctx, &state).instrument(span).await;
                if let Some(next) = next {
                    state = next;
                }
                results.push(result);
            }

            let report = RunReport {
                run_id,
                window,
                results,
                state,
            };
            info!(
                succeeded = report.count(StepStatus::Success),
                skipped = report.count(StepStatus::Skipped),
                failed = report.count(StepStatus::Failure),
                "Workflow complete"
            );
            report
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        step: Step,
        ctx: &StepContext<'_>,
        state: &RunState,
    ) -> (StepResult, Option<RunState>) {
        match step.run(&self.api, ctx, state).await {
            Ok(StepOutcome::Completed { summary, state }) => {
                info!(%summary, "Step succeeded");
                (StepResult::success(step, summary), Some(state))
            }
            Ok(StepOutcome::Skipped { reason }) => {
                info!(%reason, "Step skipped");
                (StepResult::skipped(step, reason), None)
            }
            Err(error) => {
                warn!(
                    status = ?error.status_code(),
                    error = %error,
                    "Step failed"
                );
                (StepResult::failure(step, &error), None)
            }
        }
    }
}
