//! Acceptance policy decisions.
//!
//! Pure functions of the current record values, the candidate from a
//! name source and the configured policies. Nothing here talks to the
//! user; the reconciler turns `Ask` decisions into prompts.

use crate::domain::models::{AuthChangePolicy, NameChangePolicy, PolicyConfig};

pub const NAME_TITLE: &str = "Taxonomic alignment";
pub const AUTHORITY_TITLE: &str = "Authority alignment";

/// Outcome for a suggested scientific name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDecision {
    /// Candidate equals the current name ignoring case; the name is kept
    /// and the candidate's family applies.
    Matches,
    /// Replace name, family and authorship without asking.
    Apply,
    /// Ask the user before replacing.
    Ask,
    /// Leave the name alone.
    Discard,
}

/// Which wording an authorship question uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorshipPrompt {
    FillBlank,
    ChangeExisting,
}

/// Outcome for a suggested authorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorshipDecision {
    Keep,
    Apply,
    Ask(AuthorshipPrompt),
}

/// Policy evaluation for one session's configuration.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEngine {
    name_policy: NameChangePolicy,
    auth_policy: AuthChangePolicy,
}

impl PolicyEngine {
    pub const fn new(name_policy: NameChangePolicy, auth_policy: AuthChangePolicy) -> Self {
        Self {
            name_policy,
            auth_policy,
        }
    }

    pub const fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.name_change_policy, config.auth_change_policy)
    }

    pub fn name_decision(&self, current: &str, candidate: &str) -> NameDecision {
        if same_ignoring_case(current, candidate) {
            return NameDecision::Matches;
        }
        match self.name_policy {
            NameChangePolicy::AcceptAll => NameDecision::Apply,
            NameChangePolicy::AlwaysAsk => NameDecision::Ask,
            NameChangePolicy::KeepAsIs => NameDecision::Discard,
        }
    }

    /// Decide on a suggested authorship. A missing or case-insensitively
    /// equal suggestion never changes the record.
    pub fn authorship_decision(&self, existing: &str, candidate: Option<&str>) -> AuthorshipDecision {
        let Some(candidate) = candidate else {
            return AuthorshipDecision::Keep;
        };
        if same_ignoring_case(existing, candidate) {
            return AuthorshipDecision::Keep;
        }

        let blank = existing.trim().is_empty();
        match self.auth_policy {
            AuthChangePolicy::AcceptAll => AuthorshipDecision::Apply,
            AuthChangePolicy::FillBlanksOnly if blank => AuthorshipDecision::Apply,
            AuthChangePolicy::FillBlanksOnly => {
                AuthorshipDecision::Ask(AuthorshipPrompt::ChangeExisting)
            }
            AuthChangePolicy::AlwaysAsk if blank => {
                AuthorshipDecision::Ask(AuthorshipPrompt::FillBlank)
            }
            AuthChangePolicy::AlwaysAsk => AuthorshipDecision::Ask(AuthorshipPrompt::ChangeExisting),
        }
    }
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn name_change_message(current: &str, candidate: &str, record_number: &str) -> String {
    format!("Change {current} to {candidate} at record {record_number}?")
}

pub fn authorship_message(
    prompt: AuthorshipPrompt,
    name: &str,
    existing: &str,
    candidate: &str,
    record_number: &str,
) -> String {
    match prompt {
        AuthorshipPrompt::FillBlank => {
            format!("Fill in blank author of {name} to {candidate} at record {record_number}?")
        }
        AuthorshipPrompt::ChangeExisting => format!(
            "Update author of {name} from:\n{existing} to {candidate} at record {record_number}?"
        ),
    }
}

pub fn no_result_message(kingdom: &str, name: &str, record_number: &str, source: &str) -> String {
    format!(
        "No {kingdom} results for \"{name}\" (# {record_number}) found using {source}.\n \
         This may be a typo, would you like to reenter the name?"
    )
}
