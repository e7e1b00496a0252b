//! Mock name source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{AlignmentQuery, AlignmentResult};
use crate::domain::ports::{Interaction, NameSource};

/// Shared record of the queries a [`MockNameSource`] has answered.
#[derive(Debug, Default)]
pub struct CallLog {
    total: AtomicUsize,
    queries: RwLock<Vec<AlignmentQuery>>,
}

impl CallLog {
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub async fn queries(&self) -> Vec<AlignmentQuery> {
        self.queries.read().await.clone()
    }

    /// How many times `name` was asked for, in either mode.
    pub async fn count_for(&self, name: &str) -> usize {
        self.queries
            .read()
            .await
            .iter()
            .filter(|q| q.name == name)
            .count()
    }

    async fn record(&self, query: &AlignmentQuery) {
        self.total.fetch_add(1, Ordering::SeqCst);
        self.queries.write().await.push(query.clone());
    }
}

/// Name source answering from canned entries.
///
/// Unknown names get "no result". Accepted and authority-only lookups
/// are configured separately.
#[derive(Default)]
pub struct MockNameSource {
    accepted: HashMap<String, AlignmentOutcome<AlignmentResult>>,
    authority: HashMap<String, AlignmentOutcome<AlignmentResult>>,
    calls: Arc<CallLog>,
}

impl MockNameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, result: AlignmentResult) -> Self {
        self.accepted.insert(name.into(), Ok(result));
        self
    }

    pub fn with_authority(mut self, name: impl Into<String>, result: AlignmentResult) -> Self {
        self.authority.insert(name.into(), Ok(result));
        self
    }

    /// Make accepted lookups of `name` fail.
    pub fn with_failure(mut self, name: impl Into<String>, failure: AlignmentFailure) -> Self {
        self.accepted.insert(name.into(), Err(failure));
        self
    }

    /// Handle for inspecting calls after the source has been boxed.
    pub fn call_counter(&self) -> Arc<CallLog> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl NameSource for MockNameSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        _interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        self.calls.record(query).await;
        let entries = if query.authority_only {
            &self.authority
        } else {
            &self.accepted
        };
        entries
            .get(&query.name)
            .cloned()
            .unwrap_or_else(|| Ok(AlignmentResult::none()))
    }
}
