use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::WebConfig;
use crate::domain::ports::{Interaction, NoticeResponse};

const NOTICE_TITLE: &str = "Taxonomic alignment";

/// User-driven timeout escalation for web sources.
///
/// A timed-out attempt is reported through [`Interaction::notify`] with a
/// retry option. Each retry re-runs the whole operation with the budget
/// raised by `step`. Connection failures are reported once and never
/// retried.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutEscalation {
    initial: Duration,
    step: Duration,
    max_attempts: u32,
}

impl TimeoutEscalation {
    pub const fn new(initial: Duration, step: Duration, max_attempts: u32) -> Self {
        Self {
            initial,
            step,
            max_attempts,
        }
    }

    pub const fn from_config(config: &WebConfig) -> Self {
        Self::new(
            Duration::from_secs(config.initial_timeout_secs),
            Duration::from_secs(config.timeout_step_secs),
            config.max_attempts,
        )
    }

    pub const fn initial_budget(&self) -> Duration {
        self.initial
    }

    /// Run `operation` with the current budget until it stops timing out,
    /// the user declines a retry, or `max_attempts` is reached.
    pub async fn run<F, Fut, T>(
        &self,
        service: &str,
        interaction: &dyn Interaction,
        mut operation: F,
    ) -> AlignmentOutcome<T>
    where
        F: FnMut(Duration) -> Fut,
        Fut: Future<Output = AlignmentOutcome<T>>,
    {
        let mut budget = self.initial;
        let mut attempt = 1;

        loop {
            let failure = match operation(budget).await {
                Err(failure) if failure.is_user_visible() => failure,
                other => return other,
            };

            if !matches!(failure, AlignmentFailure::Timeout { .. }) {
                warn!(service, error = %failure, "connection failed");
                interaction
                    .notify(&connection_message(service), NOTICE_TITLE, false)
                    .await;
                return Err(failure);
            }

            let retryable = attempt < self.max_attempts;
            warn!(
                service,
                attempt,
                budget_secs = budget.as_secs(),
                retryable,
                "request timed out"
            );
            let response = interaction
                .notify(&timeout_message(service), NOTICE_TITLE, retryable)
                .await;

            if !retryable {
                return Err(AlignmentFailure::RetriesExhausted { attempts: attempt });
            }
            if response != NoticeResponse::Retry {
                return Err(failure);
            }
            budget += self.step;
            attempt += 1;
            debug!(service, attempt, budget_secs = budget.as_secs(), "retrying");
        }
    }
}

pub fn timeout_message(service: &str) -> String {
    format!(
        "{service} request timed out. This may be an internet connectivity problem, \
         or an issue with the service. No changes have been made."
    )
}

fn connection_message(service: &str) -> String {
    format!(
        "Could not connect to {service}. Check the internet connection, or use a local \
         alignment source. No changes have been made."
    )
}
