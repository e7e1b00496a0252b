//! `taxalign lookup`: query the configured source for one name.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::SourceRegistry;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::LookupArgs;
use crate::domain::models::{AlignmentResult, Config};
use crate::services::{normalize, Reconciler};

use super::{interaction_for, with_overrides};

#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub query: String,
    pub source: String,
    pub authority_only: bool,
    pub result: AlignmentResult,
}

impl CommandOutput for LookupOutput {
    fn to_human(&self) -> String {
        if self.result.is_none() {
            return format!("{} has no entry for '{}'.", self.source, self.query);
        }
        format!(
            "{} result for '{}':\n{}",
            self.source,
            self.query,
            TableFormatter::new().format_lookup(&self.result)
        )
    }
}

pub async fn execute(
    args: LookupArgs,
    config: &Config,
    json_mode: bool,
    non_interactive: bool,
) -> Result<()> {
    let config = with_overrides(config, args.source);
    let source = SourceRegistry::new(&config)
        .create()
        .with_context(|| format!("Failed to set up {}", config.policy.source))?;
    let reconciler = Reconciler::new(source, &config);
    let interaction = interaction_for(non_interactive, None);

    let result = reconciler
        .lookup(&args.name, args.authority, interaction.as_ref())
        .await
        .with_context(|| format!("Lookup of '{}' failed", args.name))?;

    let lookup = LookupOutput {
        query: normalize(&args.name),
        source: reconciler.source_name().to_string(),
        authority_only: args.authority,
        result,
    };
    output(&lookup, json_mode);
    Ok(())
}
