//! Plants of the World Online search source.
//!
//! Search hits are paged with an opaque `cursor`; pages are fetched lazily
//! as the hit stream is consumed, so most lookups cost a single request.
//!
//! The service client has no timeout handling of its own. Lookups here go
//! through the same [`TimeoutEscalation`](super::TimeoutEscalation) as the
//! other web sources, so a slow search offers the user a retry with a
//! larger budget instead of failing outright.

use std::pin::pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::Deserialize;
use tracing::debug;

use crate::adapters::non_empty;
use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{
    AlignmentQuery, AlignmentResult, AlignmentSource, Kingdom, PlantsOfTheWorldConfig,
};
use crate::domain::ports::{Interaction, NameSource};

use super::WebClient;

const SERVICE: &str = "Plants of the World";
const FIRST_CURSOR: &str = "*";
const PAGE_SIZE: &str = "100";

#[derive(Debug, Default, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchHit>,
    cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    name: Option<String>,
    author: Option<String>,
    family: Option<String>,
    #[serde(default)]
    accepted: bool,
    synonym_of: Option<Box<SearchHit>>,
}

impl SearchHit {
    fn into_result(self) -> AlignmentResult {
        non_empty(self.name).map_or_else(AlignmentResult::none, |name| {
            AlignmentResult::found(name, non_empty(self.author), non_empty(self.family))
        })
    }
}

/// Plants of the World name source.
pub struct PlantsOfTheWorldSource {
    web: WebClient,
    search_url: String,
    kingdom: Kingdom,
}

impl PlantsOfTheWorldSource {
    pub fn new(web: WebClient, config: &PlantsOfTheWorldConfig, kingdom: Kingdom) -> Self {
        Self {
            web,
            search_url: config.search_url.clone(),
            kingdom,
        }
    }

    /// Lazily page through search hits for `name` within the kingdom.
    fn search<'a>(
        &'a self,
        name: &str,
        budget: Duration,
    ) -> impl Stream<Item = AlignmentOutcome<SearchHit>> + 'a {
        let filter = format!("name:{name},kingdom:{}", self.kingdom);
        stream::try_unfold(Some(FIRST_CURSOR.to_string()), move |cursor| {
            let filter = filter.clone();
            async move {
                let Some(cursor) = cursor else {
                    return Ok(None);
                };
                let params = [
                    ("q", filter.as_str()),
                    ("perPage", PAGE_SIZE),
                    ("cursor", cursor.as_str()),
                ];
                let page = match self
                    .web
                    .get_json::<SearchPage>(SERVICE, &self.search_url, &params, budget)
                    .await
                {
                    Ok(page) => page.unwrap_or_default(),
                    Err(failure) => return Err(failure),
                };

                if page.results.is_empty() {
                    return Ok(None);
                }
                let next = page.cursor.filter(|next| *next != cursor);
                let hits = stream::iter(page.results.into_iter().map(Ok::<_, AlignmentFailure>));
                Ok(Some((hits, next)))
            }
        })
        .try_flatten()
    }

    async fn query_once(
        &self,
        query: &AlignmentQuery,
        budget: Duration,
    ) -> AlignmentOutcome<AlignmentResult> {
        let mut hits = pin!(self.search(&query.name, budget));

        while let Some(hit) = hits.try_next().await? {
            if query.authority_only || hit.accepted {
                return Ok(hit.into_result());
            }

            // Synonym records carry no family, so the accepted name is
            // looked up again to get a complete answer.
            if let Some(synonym) = hit.synonym_of.filter(|s| s.accepted) {
                let Some(accepted_name) = non_empty(synonym.name) else {
                    continue;
                };
                debug!(query = %query.name, accepted = %accepted_name, "following synonym");

                let mut accepted_hits = pin!(self.search(&accepted_name, budget));
                while let Some(candidate) = accepted_hits.try_next().await? {
                    if candidate.accepted {
                        return Ok(candidate.into_result());
                    }
                }
                return Ok(AlignmentResult::none());
            }
        }
        Ok(AlignmentResult::none())
    }
}

#[async_trait]
impl NameSource for PlantsOfTheWorldSource {
    fn name(&self) -> &'static str {
        AlignmentSource::PlantsOfTheWorld.label()
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        self.web
            .escalation()
            .run(SERVICE, interaction, |budget| self.query_once(query, budget))
            .await
    }
}
