//! Web service name sources.
//!
//! All sources share one [`WebClient`]: a `reqwest` client, the user-driven
//! [`TimeoutEscalation`] and the politeness pause taken after every call to
//! a public service.

pub mod catalog_of_life;
pub mod plants_of_the_world;
pub mod retry;
pub mod tnrs;
pub mod unimplemented;

use std::time::Duration;

use chrono::Datelike;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{AlignmentQuery, WebConfig};

pub use catalog_of_life::CatalogOfLifeSource;
pub use plants_of_the_world::PlantsOfTheWorldSource;
pub use retry::TimeoutEscalation;
pub use tnrs::TnrsSource;
pub use unimplemented::UnimplementedSource;

/// HTTP plumbing shared by the web sources.
#[derive(Debug, Clone)]
pub struct WebClient {
    client: Client,
    escalation: TimeoutEscalation,
    politeness_delay: Duration,
}

impl WebClient {
    pub fn new(config: &WebConfig) -> AlignmentOutcome<Self> {
        let client = Client::builder()
            .user_agent(concat!("taxalign/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AlignmentFailure::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            escalation: TimeoutEscalation::from_config(config),
            politeness_delay: Duration::from_millis(config.politeness_delay_ms),
        })
    }

    pub const fn escalation(&self) -> &TimeoutEscalation {
        &self.escalation
    }

    /// GET `url` and decode a JSON body.
    ///
    /// `Ok(None)` means the service answered with a non-success status,
    /// which callers treat as "nothing here". The politeness pause is taken
    /// after every completed request.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        url: &str,
        params: &[(&str, &str)],
        budget: Duration,
    ) -> AlignmentOutcome<Option<T>> {
        debug!(service, url, budget_secs = budget.as_secs(), "sending request");

        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(budget)
            .send()
            .await
            .map_err(|e| transport_failure(service, budget, &e));

        self.pause().await;
        let response = response?;

        if !response.status().is_success() {
            warn!(service, url, status = %response.status(), "service returned an error status");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_failure(service, budget, &e))?;

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| AlignmentFailure::malformed(service, format!("Failed to parse response: {e}")))
    }

    async fn pause(&self) {
        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }
    }
}

fn transport_failure(service: &str, budget: Duration, error: &reqwest::Error) -> AlignmentFailure {
    if error.is_timeout() {
        AlignmentFailure::Timeout {
            service: service.to_string(),
            budget,
        }
    } else if error.is_decode() || error.is_body() {
        AlignmentFailure::malformed(service, error.to_string())
    } else {
        AlignmentFailure::Connection {
            service: service.to_string(),
            message: error.to_string(),
        }
    }
}

/// Fill an endpoint template.
///
/// `{name}` becomes the percent-encoded query name; `{year}` and
/// `{previous_year}` the current and previous calendar year.
pub fn expand_endpoint(template: &str, query: &AlignmentQuery, year: i32) -> String {
    template
        .replace("{name}", &query.url_name())
        .replace("{previous_year}", &(year - 1).to_string())
        .replace("{year}", &year.to_string())
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
