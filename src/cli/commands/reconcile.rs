//! `taxalign reconcile`: align every record in a file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::SourceRegistry;
use crate::cli::output::progress::hidden_progress_bar;
use crate::cli::output::{create_progress_bar, output, CommandOutput, TableFormatter};
use crate::cli::record_file::{default_output_path, RecordFile};
use crate::cli::types::ReconcileArgs;
use crate::domain::models::Config;
use crate::services::{HaltSignal, ReconcileOutcome, Reconciler};

use super::{interaction_for, with_overrides};

#[derive(Debug, Serialize)]
pub struct ReconcileSummary {
    pub session_id: String,
    pub source: String,
    pub input: String,
    pub output: String,
    pub total: usize,
    pub halted: bool,
    pub counts: BTreeMap<&'static str, usize>,
    pub records: Vec<ReconcileOutcome>,
}

impl ReconcileSummary {
    fn new(
        reconciler: &Reconciler,
        input: &Path,
        output: &Path,
        halted: bool,
        records: Vec<ReconcileOutcome>,
    ) -> Self {
        let mut counts = BTreeMap::new();
        for outcome in &records {
            *counts.entry(outcome.status.as_str()).or_insert(0) += 1;
        }
        Self {
            session_id: reconciler.session_id().to_string(),
            source: reconciler.source_name().to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            total: records.len(),
            halted,
            counts,
            records,
        }
    }

    fn failures(&self) -> usize {
        self.records.iter().filter(|o| o.status.is_failure()).count()
    }
}

impl CommandOutput for ReconcileSummary {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = Vec::new();

        if self.records.iter().any(|o| o.record.has_name()) {
            lines.push(formatter.format_outcomes(&self.records));
        }
        let counts: Vec<(&str, usize)> = self.counts.iter().map(|(k, v)| (*k, *v)).collect();
        lines.push(formatter.format_counts(&counts));

        if self.halted {
            lines.push(
                "Halted before the end of the file; remaining records were not processed."
                    .to_string(),
            );
        }
        if self.failures() > 0 {
            lines.push(format!(
                "{} record(s) could not be aligned and were left unchanged.",
                self.failures()
            ));
        }
        lines.push(format!(
            "Wrote {} record(s) aligned against {} to {}",
            self.total, self.source, self.output
        ));
        lines.join("\n")
    }
}

pub async fn execute(
    args: ReconcileArgs,
    config: &Config,
    json_mode: bool,
    non_interactive: bool,
) -> Result<()> {
    let config = with_overrides(config, args.source);
    let file = RecordFile::read(&args.input)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let source = SourceRegistry::new(&config)
        .create()
        .with_context(|| format!("Failed to set up {}", config.policy.source))?;
    let mut reconciler = Reconciler::new(source, &config);

    let halt = HaltSignal::new();
    let watcher = {
        let halt = halt.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("halt requested, stopping after the current record");
                halt.halt();
            }
        })
    };

    let total = file.len() as u64;
    let progress = if json_mode {
        hidden_progress_bar(total)
    } else {
        create_progress_bar(total)
    };
    let interaction = interaction_for(non_interactive, Some(progress.clone()));

    let outcomes = reconciler
        .reconcile_all(file.to_records(), interaction.as_ref(), &halt, |_, outcome| {
            progress.set_message(outcome.record.record_number());
            progress.inc(1);
        })
        .await;
    watcher.abort();
    progress.finish_and_clear();

    file.write(&output_path, &outcomes)?;
    info!(
        session = %reconciler.session_id(),
        output = %output_path.display(),
        records = outcomes.len(),
        "record file written"
    );

    let summary = ReconcileSummary::new(
        &reconciler,
        &args.input,
        &output_path,
        halt.is_halted(),
        outcomes,
    );
    output(&summary, json_mode);
    Ok(())
}
