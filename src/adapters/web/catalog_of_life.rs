//! Catalog of Life web service source.
//!
//! The service has historically been unreliable about which release it
//! calls "current", so several endpoint templates are tried in order
//! (latest release, this year's checklist, last year's checklist).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::adapters::non_empty;
use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{
    AlignmentQuery, AlignmentResult, AlignmentSource, CatalogOfLifeConfig, Kingdom,
};
use crate::domain::ports::{Interaction, NameSource};

use super::{current_year, expand_endpoint, WebClient};

const SERVICE: &str = "Catalog of Life";
const ACCEPTED_STATUS: &str = "accepted name";

#[derive(Debug, Default, Deserialize)]
struct ColResponse {
    #[serde(default)]
    results: Vec<ColEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ColEntry {
    name: Option<String>,
    author: Option<String>,
    name_status: Option<String>,
    name_html: Option<String>,
    #[serde(default)]
    classification: Vec<ColTaxon>,
    accepted_name: Option<Box<ColEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ColTaxon {
    name: Option<String>,
    rank: Option<String>,
}

impl ColEntry {
    fn kingdom(&self) -> Option<&str> {
        self.classification.first().and_then(|t| t.name.as_deref())
    }

    /// Kingdom of the entry, or of its accepted name when it is a synonym.
    fn in_kingdom(&self, kingdom: Kingdom) -> bool {
        let wanted = Some(kingdom.as_str());
        self.kingdom() == wanted
            || self.accepted_name.as_ref().and_then(|a| a.kingdom()) == wanted
    }

    fn family(&self) -> Option<String> {
        self.classification
            .iter()
            .find(|t| t.rank.as_deref() == Some("Family"))
            .and_then(|t| t.name.clone())
    }

    /// Authorship follows the italicised name in `name_html`.
    fn html_authorship(&self) -> Option<String> {
        let html = self.name_html.as_deref()?;
        let (_, author) = html.split_once("</i> ")?;
        Some(author.trim().to_string())
    }
}

/// Catalog of Life name source.
pub struct CatalogOfLifeSource {
    web: WebClient,
    endpoints: Vec<String>,
    kingdom: Kingdom,
}

impl CatalogOfLifeSource {
    pub fn new(web: WebClient, config: &CatalogOfLifeConfig, kingdom: Kingdom) -> Self {
        Self {
            web,
            endpoints: config.endpoints.clone(),
            kingdom,
        }
    }

    /// One pass over every endpoint with a fixed timeout budget.
    async fn query_endpoints(
        &self,
        query: &AlignmentQuery,
        budget: Duration,
    ) -> AlignmentOutcome<AlignmentResult> {
        let year = current_year();
        for template in &self.endpoints {
            let url = expand_endpoint(template, query, year);
            let Some(response) = self
                .web
                .get_json::<ColResponse>(SERVICE, &url, &[], budget)
                .await?
            else {
                continue;
            };

            if response.results.is_empty() {
                debug!(url = %url, "no entries at endpoint");
                continue;
            }

            let entry = response
                .results
                .into_iter()
                .find(|entry| entry.in_kingdom(self.kingdom))
                .ok_or_else(|| AlignmentFailure::NoMatchingKingdomEntry {
                    service: SERVICE.to_string(),
                    kingdom: self.kingdom.to_string(),
                })?;

            if query.authority_only {
                return Ok(non_empty(entry.name).map_or_else(AlignmentResult::none, |name| {
                    AlignmentResult::found(name, non_empty(entry.author), None)
                }));
            }

            match accepted_result(entry) {
                Some(result) => return Ok(result),
                None => {
                    warn!(url = %url, "entry lacks an accepted name, trying next endpoint");
                }
            }
        }
        Ok(AlignmentResult::none())
    }
}

/// Dereference a synonym and read the accepted name's fields.
fn accepted_result(entry: ColEntry) -> Option<AlignmentResult> {
    let entry = match entry.accepted_name {
        Some(accepted) => *accepted,
        None => entry,
    };
    if entry.name_status.as_deref() != Some(ACCEPTED_STATUS) {
        return None;
    }
    let authorship = entry.html_authorship()?;
    let family = entry.family();
    let name = non_empty(entry.name)?;
    Some(AlignmentResult::found(name, Some(authorship), family))
}

#[async_trait]
impl NameSource for CatalogOfLifeSource {
    fn name(&self) -> &'static str {
        AlignmentSource::CatalogOfLife.label()
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        self.web
            .escalation()
            .run(SERVICE, interaction, |budget| self.query_endpoints(query, budget))
            .await
    }
}
