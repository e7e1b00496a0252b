//! Command implementations.

pub mod config;
pub mod lookup;
pub mod normalize;
pub mod reconcile;

use indicatif::ProgressBar;

use crate::adapters::AutoInteraction;
use crate::cli::interaction::TerminalInteraction;
use crate::cli::types::SourceArgs;
use crate::domain::models::Config;
use crate::domain::ports::Interaction;

/// Configuration with the command-line source and kingdom applied.
pub(crate) fn with_overrides(config: &Config, overrides: SourceArgs) -> Config {
    let mut config = config.clone();
    if let Some(source) = overrides.source {
        config.policy.source = source;
    }
    if let Some(kingdom) = overrides.kingdom {
        config.policy.kingdom = kingdom;
    }
    config
}

/// The terminal, or a declining stand-in when nobody is there to answer.
pub(crate) fn interaction_for(
    non_interactive: bool,
    progress: Option<ProgressBar>,
) -> Box<dyn Interaction> {
    if non_interactive {
        return Box::new(AutoInteraction::declining());
    }
    let terminal = TerminalInteraction::new();
    match progress {
        Some(pb) => Box::new(terminal.with_progress(pb)),
        None => Box::new(terminal),
    }
}
