//! Non-interactive [`Interaction`] for unattended runs.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Interaction, NoticeResponse};

/// Answers every prompt with a fixed reply and never asks for a retry.
///
/// Questions and notices are logged so an unattended batch leaves a
/// trail of what it would have asked.
#[derive(Debug, Clone, Copy)]
pub struct AutoInteraction {
    answer: bool,
}

impl AutoInteraction {
    /// Say yes to every question.
    pub const fn accepting() -> Self {
        Self { answer: true }
    }

    /// Say no to every question.
    pub const fn declining() -> Self {
        Self { answer: false }
    }
}

#[async_trait]
impl Interaction for AutoInteraction {
    async fn ask_yes_no(&self, message: &str, title: &str) -> bool {
        info!(title, message, answer = self.answer, "question answered automatically");
        self.answer
    }

    async fn notify(&self, message: &str, title: &str, retryable: bool) -> NoticeResponse {
        info!(title, message, retryable, "notice acknowledged automatically");
        NoticeResponse::Ok
    }

    async fn request_text(&self, message: &str, title: &str) -> Option<String> {
        info!(title, message, "text request declined automatically");
        None
    }
}
