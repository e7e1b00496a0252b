//! Domain errors for taxonomic name reconciliation.

use std::time::Duration;

use thiserror::Error;

/// Reasons a name source could not produce an answer.
///
/// A failure is distinct from "no result": a source that was queried
/// successfully and had nothing to offer returns an empty
/// [`AlignmentResult`](crate::domain::models::AlignmentResult) instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlignmentFailure {
    #[error("{service} request timed out after {}s", .budget.as_secs())]
    Timeout { service: String, budget: Duration },

    #[error("Connection to {service} failed: {message}")]
    Connection { service: String, message: String },

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("No {kingdom} entry in {service} results")]
    NoMatchingKingdomEntry { service: String, kingdom: String },

    #[error("{0} is not implemented")]
    NotImplemented(String),

    #[error("Reference data unavailable: {0}")]
    Configuration(String),

    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl AlignmentFailure {
    /// Whether the failure is one the user is told about through the
    /// interaction collaborator. Everything else is logged and absorbed.
    pub const fn is_user_visible(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }

    /// Whether the failure should be treated as "nothing found".
    pub const fn is_absorbed_as_no_result(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    pub(crate) fn malformed(service: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            service: service.to_string(),
            message: message.into(),
        }
    }
}

pub type AlignmentOutcome<T> = Result<T, AlignmentFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_failures() {
        let timeout = AlignmentFailure::Timeout {
            service: "TNRS".to_string(),
            budget: Duration::from_secs(5),
        };
        assert!(timeout.is_user_visible());
        assert_eq!(timeout.to_string(), "TNRS request timed out after 5s");

        let conn = AlignmentFailure::Connection {
            service: "TNRS".to_string(),
            message: "refused".to_string(),
        };
        assert!(conn.is_user_visible());

        assert!(!AlignmentFailure::NotImplemented("ITIS (web API)".to_string()).is_user_visible());
        assert!(!AlignmentFailure::malformed("TNRS", "bad json").is_user_visible());
    }

    #[test]
    fn test_malformed_is_absorbed() {
        assert!(AlignmentFailure::malformed("Catalog of Life", "x").is_absorbed_as_no_result());
        assert!(!AlignmentFailure::RetriesExhausted { attempts: 5 }.is_absorbed_as_no_result());
    }
}
