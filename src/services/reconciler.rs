//! Record reconciliation against the configured name source.
//!
//! One record is processed start to finish before the next:
//!
//! 1. empty names pass through untouched;
//! 2. the normalized name is looked up in the session cache, and a hit
//!    is applied without querying or prompting;
//! 3. otherwise the source is queried; nothing found offers the user a
//!    chance to re-enter the name (bounded by `max_name_reentries`);
//! 4. name, family and authorship suggestions go through the
//!    [`PolicyEngine`], prompting where the policy asks for it;
//! 5. the final triple is cached under the original normalized query.
//!
//! Failures never escape as errors: the record comes back as it was
//! handed in, with a [`ReconcileStatus::Failed`] carrying the reason.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::errors::{AlignmentFailure, AlignmentOutcome};
use crate::domain::models::{
    AlignedName, AlignmentQuery, AlignmentResult, Config, PolicyConfig, TaxonRecord,
};
use crate::domain::ports::{Interaction, NameSource};

use super::normalizer::normalize;
use super::policy_engine::{
    authorship_message, name_change_message, no_result_message, AuthorshipDecision, NameDecision,
    PolicyEngine, AUTHORITY_TITLE, NAME_TITLE,
};
use super::session_cache::SessionCache;

/// How a record left the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum ReconcileStatus {
    /// No scientific name to work with.
    EmptyName,
    /// A decision from earlier in the session was replayed.
    CacheHit,
    /// The source answered and policies were applied.
    Resolved,
    /// Nothing was found and the user did not supply another name.
    NoResult,
    /// The batch was halted before this record was reached.
    NotProcessed,
    /// The source could not be used; the record is unchanged.
    Failed(#[serde(serialize_with = "serialize_display")] AlignmentFailure),
}

fn serialize_display<S: serde::Serializer>(
    failure: &AlignmentFailure,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(failure)
}

impl ReconcileStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::CacheHit => "cache_hit",
            Self::Resolved => "resolved",
            Self::NoResult => "no_result",
            Self::NotProcessed => "not_processed",
            Self::Failed(_) => "failed",
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A reconciled record and how it got there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileOutcome {
    pub record: TaxonRecord,
    pub status: ReconcileStatus,
}

impl ReconcileOutcome {
    const fn new(record: TaxonRecord, status: ReconcileStatus) -> Self {
        Self { record, status }
    }
}

/// Shared "halt process" flag, checked between records.
#[derive(Debug, Clone, Default)]
pub struct HaltSignal(Arc<AtomicBool>);

impl HaltSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn halt(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_halted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Reconciles specimen records against one name source.
///
/// Owns the session cache; exclusive `&mut self` access makes each
/// check-then-store on the cache atomic with respect to other records.
pub struct Reconciler {
    source: Box<dyn NameSource>,
    policy: PolicyConfig,
    engine: PolicyEngine,
    cache: SessionCache,
    max_name_reentries: u32,
    session_id: Uuid,
}

impl Reconciler {
    pub fn new(source: Box<dyn NameSource>, config: &Config) -> Self {
        let reconciler = Self {
            source,
            policy: config.policy,
            engine: PolicyEngine::from_config(&config.policy),
            cache: SessionCache::new(),
            max_name_reentries: config.reconcile.max_name_reentries,
            session_id: Uuid::new_v4(),
        };
        info!(
            session = %reconciler.session_id,
            source = reconciler.source.name(),
            kingdom = %reconciler.policy.kingdom,
            "reconciliation session started"
        );
        reconciler
    }

    /// Switch to new settings. Cached decisions belong to the old source
    /// and policies, so the session starts over.
    pub fn reload(&mut self, source: Box<dyn NameSource>, config: &Config) {
        self.source = source;
        self.policy = config.policy;
        self.engine = PolicyEngine::from_config(&config.policy);
        self.max_name_reentries = config.reconcile.max_name_reentries;
        self.reset_session();
    }

    /// Forget every cached decision and start a new session.
    pub fn reset_session(&mut self) {
        let previous = self.session_id;
        self.cache.clear();
        self.session_id = Uuid::new_v4();
        info!(
            previous = %previous,
            session = %self.session_id,
            source = self.source.name(),
            "reconciliation session reset"
        );
    }

    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub const fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Query the source for a raw name without applying any policy.
    pub async fn lookup(
        &self,
        raw_name: &str,
        authority_only: bool,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        let name = normalize(raw_name);
        let query = if authority_only {
            AlignmentQuery::authority(name)
        } else {
            AlignmentQuery::accepted(name)
        };
        self.query_source(&query, interaction).await
    }

    /// Reconcile one record's name, authorship and family.
    pub async fn reconcile(
        &mut self,
        record: TaxonRecord,
        interaction: &dyn Interaction,
    ) -> ReconcileOutcome {
        if !record.has_name() {
            return ReconcileOutcome::new(record, ReconcileStatus::EmptyName);
        }

        let mut working = record.clone();
        working.capitalize_name();

        let span = info_span!(
            "reconcile",
            session = %self.session_id,
            record = %working.record_number(),
        );
        match self.run(&mut working, interaction).instrument(span).await {
            Ok(status) => ReconcileOutcome::new(working, status),
            Err(failure) => {
                warn!(
                    session = %self.session_id,
                    record = %record.record_number(),
                    error = %failure,
                    "reconciliation failed, record left unchanged"
                );
                ReconcileOutcome::new(record, ReconcileStatus::Failed(failure))
            }
        }
    }

    /// Reconcile records in order, stopping between records once `halt`
    /// is raised. Records not reached are returned as they were.
    pub async fn reconcile_all<F>(
        &mut self,
        records: Vec<TaxonRecord>,
        interaction: &dyn Interaction,
        halt: &HaltSignal,
        mut on_record: F,
    ) -> Vec<ReconcileOutcome>
    where
        F: FnMut(usize, &ReconcileOutcome),
    {
        let mut outcomes = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let outcome = if halt.is_halted() {
                ReconcileOutcome::new(record, ReconcileStatus::NotProcessed)
            } else {
                self.reconcile(record, interaction).await
            };
            on_record(index, &outcome);
            outcomes.push(outcome);
        }
        if halt.is_halted() {
            info!(session = %self.session_id, "batch halted by user");
        }
        outcomes
    }

    async fn run(
        &mut self,
        record: &mut TaxonRecord,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<ReconcileStatus> {
        let mut misses = 0;
        loop {
            let query = normalize(&record.scientific_name);
            if let Some(cached) = self.cache.get(&query) {
                debug!(query = %query, "session cache hit");
                record.apply(cached);
                return Ok(ReconcileStatus::CacheHit);
            }

            let result = self
                .query_source(&AlignmentQuery::accepted(query.as_str()), interaction)
                .await?;

            let Some(candidate) = result.name.clone() else {
                misses += 1;
                if misses > self.max_name_reentries {
                    return Err(AlignmentFailure::RetriesExhausted { attempts: misses });
                }
                match self.ask_for_new_name(record, interaction).await {
                    Some(reply) => {
                        debug!(query = %query, reply = %reply, "retrying with re-entered name");
                        record.scientific_name = reply;
                        record.capitalize_name();
                        continue;
                    }
                    None => return Ok(ReconcileStatus::NoResult),
                }
            };

            let aligned = self
                .decide(record, &query, &result, &candidate, interaction)
                .await?;
            record.apply(&aligned);
            self.cache.put(query, aligned);
            return Ok(ReconcileStatus::Resolved);
        }
    }

    async fn ask_for_new_name(
        &self,
        record: &TaxonRecord,
        interaction: &dyn Interaction,
    ) -> Option<String> {
        let number = record.record_number();
        let message = no_result_message(
            self.policy.kingdom.as_str(),
            &record.scientific_name,
            &number,
            self.source.name(),
        );
        let title = format!("{number}: {NAME_TITLE}");
        interaction
            .request_text(&message, &title)
            .await
            .map(|reply| reply.trim().to_string())
            .filter(|reply| !reply.is_empty())
    }

    /// Apply the policies to a found candidate and return the triple the
    /// record should end up with.
    async fn decide(
        &self,
        record: &TaxonRecord,
        query: &str,
        result: &AlignmentResult,
        candidate: &str,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignedName> {
        let number = record.record_number();
        let current = record.scientific_name.as_str();
        let mut aligned = record.alignment();

        let (kept, renamed) = match self.engine.name_decision(current, candidate) {
            NameDecision::Matches => (true, false),
            NameDecision::Apply => (true, true),
            NameDecision::Ask => {
                let message = name_change_message(current, candidate, &number);
                let accepted = interaction.ask_yes_no(&message, NAME_TITLE).await;
                (accepted, accepted)
            }
            NameDecision::Discard => (false, false),
        };

        if kept {
            if let Some(family) = &result.family {
                aligned.family.clone_from(family);
            }
        }

        if renamed {
            debug!(from = %current, to = %candidate, "name changed");
            aligned.name = candidate.to_string();
            if let Some(authorship) = &result.authorship {
                aligned.authorship.clone_from(authorship);
            }
            return Ok(aligned);
        }

        // A declined suggestion says nothing about the authorship of the
        // name as entered; ask the source for that name's own author.
        let suggested = if kept {
            result.authorship.clone()
        } else {
            self.query_source(&AlignmentQuery::authority(query), interaction)
                .await?
                .authorship
        };

        let existing = record.scientific_name_authorship.trim();
        match self
            .engine
            .authorship_decision(existing, suggested.as_deref())
        {
            AuthorshipDecision::Keep => {}
            AuthorshipDecision::Apply => {
                if let Some(authorship) = suggested {
                    aligned.authorship = authorship;
                }
            }
            AuthorshipDecision::Ask(prompt) => {
                if let Some(authorship) = suggested {
                    let message =
                        authorship_message(prompt, &aligned.name, existing, &authorship, &number);
                    if interaction.ask_yes_no(&message, AUTHORITY_TITLE).await {
                        aligned.authorship = authorship;
                    }
                }
            }
        }
        Ok(aligned)
    }

    async fn query_source(
        &self,
        query: &AlignmentQuery,
        interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        match self.source.resolve(query, interaction).await {
            Err(failure) if failure.is_absorbed_as_no_result() => {
                warn!(
                    query = %query.name,
                    source = self.source.name(),
                    error = %failure,
                    "unreadable response treated as no result"
                );
                Ok(AlignmentResult::none())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auto_interaction::AutoInteraction;
    use crate::adapters::mock::MockNameSource;
    use crate::domain::models::{AuthChangePolicy, NameChangePolicy};

    fn config(name: NameChangePolicy, auth: AuthChangePolicy) -> Config {
        let mut config = Config::default();
        config.policy.name_change_policy = name;
        config.policy.auth_change_policy = auth;
        config
    }

    fn oak_source() -> MockNameSource {
        MockNameSource::new().with_entry(
            "quercus alba",
            AlignmentResult::found(
                "Quercus alba",
                Some("L.".to_string()),
                Some("Fagaceae".to_string()),
            ),
        )
    }

    #[tokio::test]
    async fn test_empty_name_passes_through() {
        let source = oak_source();
        let calls = source.call_counter();
        let mut reconciler = Reconciler::new(
            Box::new(source),
            &config(NameChangePolicy::AcceptAll, AuthChangePolicy::AcceptAll),
        );

        let record = TaxonRecord::new("1", "#", "  ");
        let outcome = reconciler.reconcile(record.clone(), &AutoInteraction::declining()).await;

        assert_eq!(outcome.status, ReconcileStatus::EmptyName);
        assert_eq!(outcome.record, record);
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn test_accept_all_applies_triple() {
        let mut reconciler = Reconciler::new(
            Box::new(oak_source()),
            &config(NameChangePolicy::AcceptAll, AuthChangePolicy::AcceptAll),
        );
        let outcome = reconciler
            .reconcile(TaxonRecord::new("1", "1", "quercus Alba"), &AutoInteraction::declining())
            .await;

        assert_eq!(outcome.status, ReconcileStatus::Resolved);
        assert_eq!(outcome.record.family, "Fagaceae");
        assert_eq!(outcome.record.scientific_name_authorship, "L.");
        assert_eq!(reconciler.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_session_clears_cache_and_rotates_id() {
        let mut reconciler = Reconciler::new(
            Box::new(oak_source()),
            &config(NameChangePolicy::AcceptAll, AuthChangePolicy::AcceptAll),
        );
        reconciler
            .reconcile(TaxonRecord::new("1", "1", "Quercus alba"), &AutoInteraction::declining())
            .await;
        let before = reconciler.session_id();

        reconciler.reset_session();

        assert!(reconciler.cache().is_empty());
        assert_ne!(reconciler.session_id(), before);
    }

    #[test]
    fn test_halt_signal() {
        let halt = HaltSignal::new();
        let shared = halt.clone();
        assert!(!halt.is_halted());
        shared.halt();
        assert!(halt.is_halted());
        halt.reset();
        assert!(!shared.is_halted());
    }
}
