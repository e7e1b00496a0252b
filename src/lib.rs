//! Taxalign - Taxonomic Name Reconciliation
//!
//! Taxalign aligns the scientific names on specimen records with a
//! taxonomic reference: a bundled ITIS or MycoBank table, or one of the
//! Catalog of Life, TNRS and Plants of the World web services. Accepted
//! names, authorship and family are filled in according to user policies,
//! and decisions are remembered for the rest of the session.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): records, policies, errors and ports
//! - **Service Layer** (`services`): normalization, policy decisions and
//!   the reconciler
//! - **Adapter Layer** (`adapters`): name sources and non-interactive prompts
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use taxalign::adapters::{AutoInteraction, SourceRegistry};
//! use taxalign::domain::models::{Config, TaxonRecord};
//! use taxalign::services::Reconciler;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let source = SourceRegistry::new(&config).create()?;
//! let mut reconciler = Reconciler::new(source, &config);
//!
//! let record = TaxonRecord::new("1", "1", "quercus alba");
//! let outcome = reconciler
//!     .reconcile(record, &AutoInteraction::accepting())
//!     .await;
//! println!("{} -> {}", outcome.status.as_str(), outcome.record.scientific_name);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{AlignmentFailure, AlignmentOutcome};
pub use domain::models::{AlignmentQuery, AlignmentResult, Config, TaxonRecord};
pub use services::{normalize, ReconcileOutcome, ReconcileStatus, Reconciler};
