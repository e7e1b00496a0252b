//! Name source port - interface for taxonomic references.

use async_trait::async_trait;

use crate::domain::errors::AlignmentOutcome;
use crate::domain::models::{AlignmentQuery, AlignmentResult};

use super::Interaction;

/// A taxonomic reference that can resolve a normalized name.
///
/// Implementations return:
/// - `Ok` with a populated result when the source knows the name,
/// - `Ok(AlignmentResult::none())` when it was queried and had nothing,
/// - `Err` when it could not be queried or its answer could not be read.
///
/// Web sources use `interaction` to offer a retry when a request times
/// out; local sources never touch it.
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Human-readable source name, used in prompts and logs.
    fn name(&self) -> &'static str;

    /// Resolve a query against this source.
    async fn resolve(
        &self,
        query: &AlignmentQuery,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult>;
}
