//! Taxonomic Name Resolution Service source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::adapters::non_empty;
use crate::domain::errors::AlignmentOutcome;
use crate::domain::models::{AlignmentQuery, AlignmentResult, AlignmentSource, TnrsConfig};
use crate::domain::ports::{Interaction, NameSource};

use super::{current_year, expand_endpoint, WebClient};

const SERVICE: &str = "Taxonomic Name Resolution Service";

#[derive(Debug, Default, Deserialize)]
struct TnrsResponse {
    #[serde(default)]
    items: Vec<TnrsItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TnrsItem {
    name_scientific: Option<String>,
    author_attributed: Option<String>,
    accepted_name: Option<String>,
    accepted_author: Option<String>,
    family: Option<String>,
    #[serde(default)]
    scientific_score: Value,
}

impl TnrsItem {
    /// The service reports scores as strings; accept numbers too.
    fn score(&self) -> f64 {
        match &self.scientific_score {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn into_result(self, authority_only: bool) -> AlignmentResult {
        let score = self.score();
        let (name, authorship, family) = if authority_only {
            (self.name_scientific, self.author_attributed, None)
        } else {
            (self.accepted_name, self.accepted_author, self.family)
        };
        non_empty(name).map_or_else(AlignmentResult::none, |name| {
            AlignmentResult::found(name, non_empty(authorship), non_empty(family))
                .with_confidence(score)
        })
    }
}

/// TNRS name source. Only the best match is requested, and it is used
/// only when its score reaches the configured cutoff.
pub struct TnrsSource {
    web: WebClient,
    url: String,
    cutoff: f64,
}

impl TnrsSource {
    /// `cutoff` is the minimum score in `[0, 1]`.
    pub fn new(web: WebClient, config: &TnrsConfig, cutoff: f64) -> Self {
        Self {
            web,
            url: config.url.clone(),
            cutoff,
        }
    }

    async fn query_once(
        &self,
        query: &AlignmentQuery,
        budget: Duration,
    ) -> AlignmentOutcome<AlignmentResult> {
        let url = expand_endpoint(&self.url, query, current_year());
        let Some(response) = self
            .web
            .get_json::<TnrsResponse>(SERVICE, &url, &[], budget)
            .await?
        else {
            return Ok(AlignmentResult::none());
        };

        let Some(best) = response.items.into_iter().next() else {
            return Ok(AlignmentResult::none());
        };

        let score = best.score();
        if score < self.cutoff {
            debug!(query = %query.name, score, cutoff = self.cutoff, "best match below cutoff");
            return Ok(AlignmentResult::none());
        }
        Ok(best.into_result(query.authority_only))
    }
}

#[async_trait]
impl NameSource for TnrsSource {
    fn name(&self) -> &'static str {
        AlignmentSource::Tnrs.label()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> TnrsItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_score_parsing() {
        assert!((item(r#"{"scientificScore": "0.98"}"#).score() - 0.98).abs() < 1e-9);
        assert!((item(r#"{"scientificScore": 0.5}"#).score() - 0.5).abs() < 1e-9);
        assert!(item(r#"{"scientificScore": "n/a"}"#).score().abs() < f64::EPSILON);
        assert!(item("{}").score().abs() < f64::EPSILON);
    }

    #[test]
    fn test_accepted_vs_authority_fields() {
        let json = r#"{
            "nameScientific": "Acer rubra",
            "authorAttributed": "Nutt.",
            "acceptedName": "Acer rubrum",
            "acceptedAuthor": "L.",
            "family": "Sapindaceae",
            "scientificScore": "0.9"
        }"#;

        let accepted = item(json).into_result(false);
        assert_eq!(accepted.name.as_deref(), Some("Acer rubrum"));
        assert_eq!(accepted.family.as_deref(), Some("Sapindaceae"));
        assert_eq!(accepted.confidence, Some(0.9));

        let authority = item(json).into_result(true);
        assert_eq!(authority.name.as_deref(), Some("Acer rubra"));
        assert_eq!(authority.authorship.as_deref(), Some("Nutt."));
        assert_eq!(authority.family, None);
    }

    #[test]
    fn test_blank_accepted_name_is_no_result() {
        let result = item(r#"{"acceptedName": "", "scientificScore": "1"}"#).into_result(false);
        assert!(result.is_none());
    }
}
