//! MycoBank-style local reference table.
//!
//! Rows point at their accepted name by value (`Accepted_name`) rather
//! than by serial number.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::adapters::non_blank;
use crate::domain::errors::AlignmentOutcome;
use crate::domain::models::{AlignmentQuery, AlignmentResult, AlignmentSource};
use crate::domain::ports::{Interaction, NameSource};

use super::{index_first, read_rows};

#[derive(Debug, Clone, Deserialize)]
struct MycobankRow {
    normalized_name: String,
    #[serde(rename = "Accepted_name", default)]
    accepted_name: String,
    #[serde(rename = "Authors", default)]
    authors: String,
    #[serde(default)]
    family: String,
}

impl MycobankRow {
    fn to_result(&self) -> AlignmentResult {
        non_blank(&self.accepted_name).map_or_else(AlignmentResult::none, |name| {
            AlignmentResult::found(
                sentence_case(&name),
                non_blank(&self.authors),
                non_blank(&self.family),
            )
        })
    }
}

/// Upper-case the first letter, lower-case the rest. MycoBank stores
/// accepted names in mixed case.
fn sentence_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[derive(Debug)]
struct MycobankTable {
    rows: Vec<MycobankRow>,
    by_name: HashMap<String, usize>,
    by_accepted: HashMap<String, usize>,
}

impl MycobankTable {
    fn new(rows: Vec<MycobankRow>) -> Self {
        let by_name = index_first(&rows, |row| row.normalized_name.trim().to_string());
        let by_accepted = index_first(&rows, |row| row.accepted_name.trim().to_string());
        Self {
            rows,
            by_name,
            by_accepted,
        }
    }

    fn by_name(&self, name: &str) -> Option<&MycobankRow> {
        self.by_name.get(name).map(|&i| &self.rows[i])
    }

    fn by_accepted(&self, accepted_name: &str) -> Option<&MycobankRow> {
        self.by_accepted.get(accepted_name.trim()).map(|&i| &self.rows[i])
    }
}

/// MycoBank reference table held in memory.
pub struct MycobankLocalSource {
    table: Option<MycobankTable>,
}

impl MycobankLocalSource {
    /// Load the table at `path`; see [`ItisLocalSource::load`](super::ItisLocalSource::load).
    pub fn load(path: &Path) -> Self {
        match read_rows::<MycobankRow>(path) {
            Ok(rows) => {
                info!(path = %path.display(), rows = rows.len(), "loaded MycoBank reference table");
                Self {
                    table: Some(MycobankTable::new(rows)),
                }
            }
            Err(failure) => {
                warn!(error = %failure, "MycoBank reference table unavailable");
                Self { table: None }
            }
        }
    }

    pub const fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    fn lookup(&self, query: &AlignmentQuery) -> AlignmentResult {
        let Some(table) = &self.table else {
            return AlignmentResult::none();
        };
        let Some(row) = table.by_name(&query.name) else {
            return AlignmentResult::none();
        };
        if query.authority_only {
            return row.to_result();
        }
        table
            .by_accepted(&row.accepted_name)
            .map_or_else(AlignmentResult::none, MycobankRow::to_result)
    }
}

#[async_trait]
impl NameSource for MycobankLocalSource {
    fn name(&self) -> &'static str {
        AlignmentSource::MycobankLocal.label()
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        _interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        Ok(self.lookup(query))
    }
}
