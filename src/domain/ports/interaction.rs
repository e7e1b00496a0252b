//! Interaction port - the human in the loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How the user dismissed a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeResponse {
    Ok,
    Retry,
}

/// Prompts routed to whoever is operating the engine.
///
/// Calls suspend reconciliation of the current record until answered.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Ask a yes/no question.
    async fn ask_yes_no(&self, message: &str, title: &str) -> bool;

    /// Show a notice. When `retryable` is true the user may ask for the
    /// failed operation to be retried.
    async fn notify(&self, message: &str, title: &str, retryable: bool) -> NoticeResponse;

    /// Ask for a line of text; `None` when the user declines.
    async fn request_text(&self, message: &str, title: &str) -> Option<String>;
}
