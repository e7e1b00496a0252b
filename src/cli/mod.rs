//! Command-line interface.
//!
//! Commands load records, pick the name source from configuration (or
//! the `--source`/`--kingdom` overrides) and report in text or JSON.

pub mod commands;
pub mod interaction;
pub mod output;
pub mod record_file;
pub mod types;

pub use interaction::TerminalInteraction;
pub use types::{Cli, Commands};

/// Report a failed command on stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}
