//! ITIS-style local reference table.
//!
//! Rows carry both the name's own taxonomic serial number (`tsn`) and the
//! serial number of its accepted name (`tsn_accepted`); accepted lookups
//! follow that pointer.

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
struct ItisRow {
    normalized_name: String,
    #[serde(default)]
    tsn: String,
    #[serde(default)]
    tsn_accepted: String,
    #[serde(default)]
    complete_name: String,
    #[serde(default)]
    taxon_author_id: String,
    #[serde(default)]
    family: String,
}

impl ItisRow {
    fn to_result(&self) -> AlignmentResult {
        non_blank(&self.complete_name).map_or_else(AlignmentResult::none, |name| {
            AlignmentResult::found(
                name,
                non_blank(&self.taxon_author_id),
                non_blank(&self.family),
            )
        })
    }
}

#[derive(Debug)]
struct ItisTable {
    rows: Vec<ItisRow>,
    by_name: HashMap<String, usize>,
    by_tsn: HashMap<String, usize>,
}

impl ItisTable {
    fn new(rows: Vec<ItisRow>) -> Self {
        let by_name = index_first(&rows, |row| row.normalized_name.trim().to_string());
        let by_tsn = index_first(&rows, |row| row.tsn.trim().to_string());
        Self {
            rows,
            by_name,
            by_tsn,
        }
    }

    fn by_name(&self, name: &str) -> Option<&ItisRow> {
        self.by_name.get(name).map(|&i| &self.rows[i])
    }

    fn by_tsn(&self, tsn: &str) -> Option<&ItisRow> {
        self.by_tsn.get(tsn.trim()).map(|&i| &self.rows[i])
    }
}

/// ITIS reference table held in memory.
pub struct ItisLocalSource {
    table: Option<ItisTable>,
}

impl ItisLocalSource {
    /// Load the table at `path`. An unreadable table leaves the source
    /// answering "no result" to everything.
    pub fn load(path: &Path) -> Self {
        match read_rows::<ItisRow>(path) {
            Ok(rows) => {
                info!(path = %path.display(), rows = rows.len(), "loaded ITIS reference table");
                Self {
                    table: Some(ItisTable::new(rows)),
                }
            }
            Err(failure) => {
                warn!(error = %failure, "ITIS reference table unavailable");
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
            .by_tsn(&row.tsn_accepted)
            .map_or_else(AlignmentResult::none, ItisRow::to_result)
    }
}

#[async_trait]
impl NameSource for ItisLocalSource {
    fn name(&self) -> &'static str {
        AlignmentSource::ItisLocal.label()
    }

    async fn resolve(
        &self,
        query: &AlignmentQuery,
        _interaction: &dyn Interaction,
    ) -> AlignmentOutcome<AlignmentResult> {
        Ok(self.lookup(query))
    }
}
