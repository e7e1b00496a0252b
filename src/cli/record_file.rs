//! CSV record files.
//!
//! Columns other than the reconciled ones are carried through untouched,
//! in their original order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::domain::models::TaxonRecord;
use crate::services::ReconcileOutcome;

const SITE_NUMBER: &str = "siteNumber";
const SPECIMEN_NUMBER: &str = "specimenNumber";
const SCIENTIFIC_NAME: &str = "scientificName";
const AUTHORSHIP: &str = "scientificNameAuthorship";
const FAMILY: &str = "family";

/// Columns written back after reconciliation.
const RECONCILED_COLUMNS: [&str; 3] = [SCIENTIFIC_NAME, AUTHORSHIP, FAMILY];

/// A record file held in memory.
#[derive(Debug, Clone)]
pub struct RecordFile {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl RecordFile {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open record file {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {}", path.display()))?
            .clone();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read records from {}", path.display()))?;

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows as records; missing columns read as empty strings.
    pub fn to_records(&self) -> Vec<TaxonRecord> {
        let site = self.column(SITE_NUMBER);
        let specimen = self.column(SPECIMEN_NUMBER);
        let name = self.column(SCIENTIFIC_NAME);
        let authorship = self.column(AUTHORSHIP);
        let family = self.column(FAMILY);

        self.rows
            .iter()
            .map(|row| {
                let field = |index: Option<usize>| {
                    index
                        .and_then(|i| row.get(i))
                        .unwrap_or_default()
                        .to_string()
                };
                TaxonRecord::new(field(site), field(specimen), field(name))
                    .with_authorship(field(authorship))
                    .with_family(field(family))
            })
            .collect()
    }

    /// Write the file with name, authorship and family taken from
    /// `outcomes`, which must be in row order.
    pub fn write(&self, path: &Path, outcomes: &[ReconcileOutcome]) -> Result<()> {
        anyhow::ensure!(
            outcomes.len() == self.rows.len(),
            "{} outcomes for {} records",
            outcomes.len(),
            self.rows.len()
        );

        let mut headers: Vec<String> = self.headers.iter().map(ToString::to_string).collect();
        for column in RECONCILED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                headers.push(column.to_string());
            }
        }
        let position = |column: &str| headers.iter().position(|h| h == column).unwrap_or(0);
        let (name_at, authorship_at, family_at) =
            (position(SCIENTIFIC_NAME), position(AUTHORSHIP), position(FAMILY));

        let mut writer = WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(&headers)?;

        for (row, outcome) in self.rows.iter().zip(outcomes) {
            let mut fields: Vec<&str> = row.iter().collect();
            fields.resize(headers.len(), "");
            fields[name_at] = outcome.record.scientific_name.as_str();
            fields[authorship_at] = outcome.record.scientific_name_authorship.as_str();
            fields[family_at] = outcome.record.family.as_str();
            writer.write_record(&fields)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// `records.csv` becomes `records_aligned.csv` next to it.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "records".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_aligned.csv"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::services::ReconcileStatus;

    const SAMPLE: &str = "\
siteNumber,specimenNumber,scientificName,scientificNameAuthorship,locality
1,#,,,Ridge
1,1,quercus alba,,Ridge
1,2,Acer rubrum,L.,Creek
";

    fn sample_file(dir: &Path) -> PathBuf {
        let path = dir.join("records.csv");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_read_records() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::read(&sample_file(dir.path())).unwrap();

        assert_eq!(file.len(), 3);
        let records = file.to_records();
        assert!(records[0].is_unassigned());
        assert_eq!(records[1].scientific_name, "quercus alba");
        assert_eq!(records[2].scientific_name_authorship, "L.");
        assert_eq!(records[2].family, "");
    }

    #[test]
    fn test_write_keeps_other_columns_and_adds_family() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::read(&sample_file(dir.path())).unwrap();

        let outcomes: Vec<ReconcileOutcome> = file
            .to_records()
            .into_iter()
            .map(|mut record| {
                if record.scientific_name == "quercus alba" {
                    record.scientific_name = "Quercus alba".to_string();
                    record.scientific_name_authorship = "L.".to_string();
                    record.family = "Fagaceae".to_string();
                }
                ReconcileOutcome {
                    record,
                    status: ReconcileStatus::Resolved,
                }
            })
            .collect();

        let out = dir.path().join("out.csv");
        file.write(&out, &outcomes).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(
            lines[0],
            "siteNumber,specimenNumber,scientificName,scientificNameAuthorship,locality,family"
        );
        assert_eq!(lines[1], "1,#,,,Ridge,");
        assert_eq!(lines[2], "1,1,Quercus alba,L.,Ridge,Fagaceae");
        assert_eq!(lines[3], "1,2,Acer rubrum,L.,Creek,");
    }

    #[test]
    fn test_write_rejects_mismatched_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::read(&sample_file(dir.path())).unwrap();
        assert!(file.write(&dir.path().join("out.csv"), &[]).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/site_records.csv")),
            PathBuf::from("/data/site_records_aligned.csv")
        );
    }
}
