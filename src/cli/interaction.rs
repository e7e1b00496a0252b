//! Terminal [`Interaction`] for attended runs.
//!
//! Prompts are written to stderr and answers read from the terminal on
//! the blocking pool. A running progress bar is suspended while a prompt
//! is on screen.

use async_trait::async_trait;
use console::{style, Term};
use indicatif::ProgressBar;
use tracing::warn;

use crate::domain::ports::{Interaction, NoticeResponse};

/// Asks the person at the terminal.
#[derive(Clone)]
pub struct TerminalInteraction {
    term: Term,
    progress: Option<ProgressBar>,
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            progress: None,
        }
    }

    /// Hide `progress` while prompting.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Show `title` and `message`, then read one line.
    ///
    /// `None` when stderr is not a terminal or could not be read.
    async fn prompt(&self, title: &str, message: &str, hint: &str) -> Option<String> {
        if !self.term.is_term() {
            warn!(title, "no terminal attached, prompt skipped");
            return None;
        }
        let term = self.term.clone();
        let progress = self.progress.clone();
        let text = format!(
            "\n{}\n{}\n{} ",
            style(title).bold(),
            message,
            style(hint).dim()
        );

        let read = move || -> std::io::Result<String> {
            term.write_str(&text)?;
            term.read_line()
        };
        let joined = tokio::task::spawn_blocking(move || match progress {
            Some(pb) => pb.suspend(read),
            None => read(),
        })
        .await;

        match joined {
            Ok(Ok(line)) => Some(line),
            Ok(Err(e)) => {
                warn!(error = %e, "failed to read from terminal");
                None
            }
            Err(e) => {
                warn!(error = %e, "terminal prompt task failed");
                None
            }
        }
    }
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interaction for TerminalInteraction {
    async fn ask_yes_no(&self, message: &str, title: &str) -> bool {
        loop {
            let Some(line) = self.prompt(title, message, "[y/n]").await else {
                return false;
            };
            if let Some(answer) = parse_yes_no(&line) {
                return answer;
            }
        }
    }

    async fn notify(&self, message: &str, title: &str, retryable: bool) -> NoticeResponse {
        let hint = if retryable {
            "[r]etry or press Enter to continue"
        } else {
            "press Enter to continue"
        };
        match self.prompt(title, message, hint).await {
            Some(line) if retryable && is_retry(&line) => NoticeResponse::Retry,
            _ => NoticeResponse::Ok,
        }
    }

    async fn request_text(&self, message: &str, title: &str) -> Option<String> {
        self.prompt(title, message, "(leave blank to skip)")
            .await
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }
}

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn is_retry(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "r" | "retry")
}
