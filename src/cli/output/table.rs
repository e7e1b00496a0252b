//! Table output formatting for CLI commands
//!
//! Renders lookup results and reconciliation summaries with comfy-table.
//! Honours `NO_COLOR` and dumb terminals.

use std::env;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::AlignmentResult;
use crate::services::{ReconcileOutcome, ReconcileStatus};

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// One lookup result as a field/value table.
    pub fn format_lookup(&self, result: &AlignmentResult) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![header("Field"), header("Value")]);

        let show = |value: Option<&str>| value.unwrap_or("-").to_string();
        table.add_row(vec![Cell::new("Name"), Cell::new(show(result.name.as_deref()))]);
        table.add_row(vec![
            Cell::new("Authorship"),
            Cell::new(show(result.authorship.as_deref())),
        ]);
        table.add_row(vec![Cell::new("Family"), Cell::new(show(result.family.as_deref()))]);
        if let Some(confidence) = result.confidence {
            table.add_row(vec![Cell::new("Score"), Cell::new(format!("{confidence:.2}"))]);
        }
        table.to_string()
    }

    /// Per-record outcomes, skipping records that needed no work.
    pub fn format_outcomes(&self, outcomes: &[ReconcileOutcome]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("Record"),
            header("Scientific name"),
            header("Authorship"),
            header("Family"),
            header("Status"),
        ]);

        for outcome in outcomes
            .iter()
            .filter(|o| !matches!(o.status, ReconcileStatus::EmptyName))
        {
            let record = &outcome.record;
            let status = match &outcome.status {
                ReconcileStatus::Failed(failure) => {
                    format!("{}: {}", outcome.status.as_str(), truncate(&failure.to_string(), 40))
                }
                other => other.as_str().to_string(),
            };
            let status_cell = if self.use_colors {
                Cell::new(status).fg(status_color(&outcome.status))
            } else {
                Cell::new(status)
            };

            table.add_row(vec![
                Cell::new(record.record_number()),
                Cell::new(truncate(&record.scientific_name, 40)),
                Cell::new(truncate(&record.scientific_name_authorship, 30)),
                Cell::new(&record.family),
                status_cell,
            ]);
        }
        table.to_string()
    }

    /// Count of records per status.
    pub fn format_counts(&self, counts: &[(&str, usize)]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![header("Status"), header("Records")]);
        for (status, count) in counts {
            table.add_row(vec![Cell::new(status), Cell::new(count)]);
        }
        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

const fn status_color(status: &ReconcileStatus) -> Color {
    match status {
        ReconcileStatus::Resolved => Color::Green,
        ReconcileStatus::CacheHit => Color::Cyan,
        ReconcileStatus::NoResult | ReconcileStatus::NotProcessed => Color::Yellow,
        ReconcileStatus::Failed(_) => Color::Red,
        ReconcileStatus::EmptyName => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AlignmentFailure;
    use crate::domain::models::TaxonRecord;

    fn formatter() -> TableFormatter {
        TableFormatter::with_config(false, Some(120))
    }

    #[test]
    fn test_format_lookup() {
        let result = AlignmentResult::found("Acer rubrum", Some("L.".to_string()), None)
            .with_confidence(0.93);
        let rendered = formatter().format_lookup(&result);

        assert!(rendered.contains("Acer rubrum"));
        assert!(rendered.contains("0.93"));
        assert!(rendered.contains("Family"));
    }

    #[test]
    fn test_format_outcomes_hides_empty_rows() {
        let outcomes = vec![
            ReconcileOutcome {
                record: TaxonRecord::new("1", "#", ""),
                status: ReconcileStatus::EmptyName,
            },
            ReconcileOutcome {
                record: TaxonRecord::new("1", "2", "Quercus alba").with_family("Fagaceae"),
                status: ReconcileStatus::Resolved,
            },
            ReconcileOutcome {
                record: TaxonRecord::new("1", "3", "Acer rubra"),
                status: ReconcileStatus::Failed(AlignmentFailure::NotImplemented(
                    "ITIS (web API)".to_string(),
                )),
            },
        ];

        let rendered = formatter().format_outcomes(&outcomes);
        assert!(!rendered.contains("1-#"));
        assert!(rendered.contains("1-2"));
        assert!(rendered.contains("Fagaceae"));
        assert!(rendered.contains("failed: ITIS (web API) is not implemented"));
    }
}
