//! Common test utilities for integration tests
//!
//! Provides a scripted stand-in for the person answering prompts, plus
//! config and record fixtures shared across test files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use taxalign::domain::models::{AuthChangePolicy, Config, NameChangePolicy, TaxonRecord};
use taxalign::domain::ports::{Interaction, NoticeResponse};

/// Which port method produced a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    YesNo,
    Notice,
    Text,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: String,
    pub message: String,
    /// Only meaningful for notices.
    pub retryable: bool,
}

/// Interaction that replays scripted answers and records every prompt.
///
/// Once a script runs out, questions are answered "no", notices are
/// acknowledged and text requests are declined, unless a repeating text
/// reply was set.
#[derive(Default)]
pub struct ScriptedInteraction {
    answers: Mutex<VecDeque<bool>>,
    replies: Mutex<VecDeque<Option<String>>>,
    repeated_reply: Option<String>,
    notices: Mutex<VecDeque<NoticeResponse>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(self, answers: &[bool]) -> Self {
        self.answers.lock().unwrap().extend(answers);
        self
    }

    pub fn with_replies(self, replies: &[Option<&str>]) -> Self {
        self.replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|r| r.map(ToString::to_string)));
        self
    }

    pub fn with_repeated_reply(mut self, reply: &str) -> Self {
        self.repeated_reply = Some(reply.to_string());
        self
    }

    pub fn with_notices(self, notices: &[NoticeResponse]) -> Self {
        self.notices.lock().unwrap().extend(notices);
        self
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn prompts_of(&self, kind: PromptKind) -> Vec<Prompt> {
        self.prompts().into_iter().filter(|p| p.kind == kind).collect()
    }

    fn log(&self, kind: PromptKind, message: &str, title: &str, retryable: bool) {
        self.prompts.lock().unwrap().push(Prompt {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            retryable,
        });
    }
}

#[async_trait]
impl Interaction for ScriptedInteraction {
    async fn ask_yes_no(&self, message: &str, title: &str) -> bool {
        self.log(PromptKind::YesNo, message, title, false);
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }

    async fn notify(&self, message: &str, title: &str, retryable: bool) -> NoticeResponse {
        self.log(PromptKind::Notice, message, title, retryable);
        self.notices
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(NoticeResponse::Ok)
    }

    async fn request_text(&self, message: &str, title: &str) -> Option<String> {
        self.log(PromptKind::Text, message, title, false);
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => self.repeated_reply.clone(),
        }
    }
}

/// Default configuration with the given change policies.
pub fn config_with(name: NameChangePolicy, auth: AuthChangePolicy) -> Config {
    let mut config = Config::default();
    config.policy.name_change_policy = name;
    config.policy.auth_change_policy = auth;
    config
}

pub fn record(specimen: &str, name: &str) -> TaxonRecord {
    TaxonRecord::new("1", specimen, name)
}

/// Setup test logging
///
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
