use async_trait::async_trait;
use tracing::warn;

use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{AlignmentQuery, AlignmentResult, AlignmentSource};
use crate::domain::ports::{Interaction, NameSource};

/// Placeholder for sources that can be selected but have no client yet
/// (ITIS and MycoBank web services). Every query fails.
pub struct UnimplementedSource {
    source: AlignmentSource,
}

impl UnimplementedSource {
    pub const fn new(source: AlignmentSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl NameSource for UnimplementedSource {
    fn name(&self) -> &'static str {
        self.source.label()
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        _interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        warn!(source = self.source.as_str(), query = %query.name, "source has no client");
        Err(AlignmentFailure::NotImplemented(self.source.label().to_string()))
    }
}
