//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::models::{AlignmentSource, Kingdom};

#[derive(Parser)]
#[command(name = "taxalign")]
#[command(about = "Reconcile specimen scientific names against taxonomic references", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .taxalign/config.yaml and .taxalign/local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Never prompt: decline every suggestion and never retry timeouts
    #[arg(long, global = true)]
    pub non_interactive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the normalized lookup key for a name
    Normalize(NormalizeArgs),

    /// Look a single name up in the configured source
    Lookup(LookupArgs),

    /// Reconcile every record in a CSV file
    Reconcile(ReconcileArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Scientific name as typed
    pub name: String,
}

/// Overrides for the configured source and kingdom.
#[derive(Args, Clone, Copy, Default)]
pub struct SourceArgs {
    /// Alignment source (label or identifier, e.g. "tnrs", "ITIS (local)")
    #[arg(short, long, value_parser = parse_source)]
    pub source: Option<AlignmentSource>,

    /// Kingdom (Plantae or Fungi)
    #[arg(short, long, value_parser = parse_kingdom)]
    pub kingdom: Option<Kingdom>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Scientific name to look up
    pub name: String,

    /// Ask for the authorship of the name as given instead of its accepted name
    #[arg(short, long)]
    pub authority: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Record file (CSV with siteNumber, specimenNumber, scientificName,
    /// scientificNameAuthorship and family columns)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write reconciled records (defaults to <input>_aligned.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

fn parse_source(value: &str) -> Result<AlignmentSource, String> {
    AlignmentSource::from_str(value).ok_or_else(|| {
        let known: Vec<&str> = AlignmentSource::ALL.iter().map(AlignmentSource::as_str).collect();
        format!("unknown source '{value}', expected one of: {}", known.join(", "))
    })
}

fn parse_kingdom(value: &str) -> Result<Kingdom, String> {
    Kingdom::from_str(value).ok_or_else(|| format!("unknown kingdom '{value}'"))
}
