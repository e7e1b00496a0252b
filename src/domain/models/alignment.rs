//! Query and result types exchanged with name sources.

use serde::{Deserialize, Serialize};

/// A lookup against a name source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentQuery {
    /// Normalized name (see [`normalize`](crate::services::normalize)).
    pub name: String,

    /// Ask for the authorship of the name as given, ignoring whether it
    /// is the accepted name.
    pub authority_only: bool,
}

impl AlignmentQuery {
    /// Query for the accepted name, authorship and family.
    pub fn accepted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authority_only: false,
        }
    }

    /// Query for the authorship of the name itself.
    pub fn authority(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authority_only: true,
        }
    }

    /// The name with spaces percent-encoded, as the web services expect.
    pub fn url_name(&self) -> String {
        self.name.replace(' ', "%20")
    }
}

/// What a source suggested for a query.
///
/// A missing `name` is the "no result" marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub name: Option<String>,
    pub authorship: Option<String>,
    pub family: Option<String>,

    /// Match confidence in `[0, 1]`; only TNRS reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AlignmentResult {
    /// The "nothing found" result.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn found(
        name: impl Into<String>,
        authorship: Option<String>,
        family: Option<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            authorship,
            family,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub const fn is_none(&self) -> bool {
        self.name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_constructors() {
        let q = AlignmentQuery::accepted("quercus alba");
        assert!(!q.authority_only);
        assert_eq!(q.url_name(), "quercus%20alba");

        let q = AlignmentQuery::authority("acer");
        assert!(q.authority_only);
        assert_eq!(q.url_name(), "acer");
    }

    #[test]
    fn test_none_marker() {
        assert!(AlignmentResult::none().is_none());
        let found = AlignmentResult::found("Quercus alba", Some("L.".to_string()), None);
        assert!(!found.is_none());
        assert_eq!(found.with_confidence(0.9).confidence, Some(0.9));
    }
}
