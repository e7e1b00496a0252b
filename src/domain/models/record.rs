//! Specimen record model.

use serde::{Deserialize, Serialize};

/// Specimen number placeholder meaning "not yet assigned".
pub const UNASSIGNED_SPECIMEN: &str = "#";

/// A specimen record as far as name reconciliation is concerned.
///
/// Field names serialize in the Darwin Core spelling used by the record
/// files (`siteNumber`, `scientificNameAuthorship`, ...). Columns the
/// engine does not know about are ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonRecord {
    #[serde(default)]
    pub site_number: String,

    #[serde(default)]
    pub specimen_number: String,

    #[serde(default)]
    pub scientific_name: String,

    #[serde(default)]
    pub scientific_name_authorship: String,

    #[serde(default)]
    pub family: String,
}

impl TaxonRecord {
    pub fn new(
        site_number: impl Into<String>,
        specimen_number: impl Into<String>,
        scientific_name: impl Into<String>,
    ) -> Self {
        Self {
            site_number: site_number.into(),
            specimen_number: specimen_number.into(),
            scientific_name: scientific_name.into(),
            ..Default::default()
        }
    }

    pub fn with_authorship(mut self, authorship: impl Into<String>) -> Self {
        self.scientific_name_authorship = authorship.into();
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Label used in prompts, e.g. `"12-3"`.
    pub fn record_number(&self) -> String {
        format!("{}-{}", self.site_number, self.specimen_number)
    }

    /// True for site-level rows that have no specimen number yet.
    pub fn is_unassigned(&self) -> bool {
        self.specimen_number == UNASSIGNED_SPECIMEN
    }

    /// True when there is nothing to reconcile.
    pub fn has_name(&self) -> bool {
        !self.scientific_name.trim().is_empty()
    }

    /// Upper-case the first character of the scientific name.
    ///
    /// The rest of the name is left as typed; the genus initial is the
    /// only capitalization rule applied before lookup.
    pub fn capitalize_name(&mut self) {
        self.scientific_name = capitalize_first(self.scientific_name.trim());
    }

    /// Current (name, authorship, family) triple.
    pub fn alignment(&self) -> AlignedName {
        AlignedName {
            name: self.scientific_name.clone(),
            authorship: self.scientific_name_authorship.clone(),
            family: self.family.clone(),
        }
    }

    /// Overwrite name, authorship and family from a resolved triple.
    pub fn apply(&mut self, aligned: &AlignedName) {
        self.scientific_name.clone_from(&aligned.name);
        self.scientific_name_authorship.clone_from(&aligned.authorship);
        self.family.clone_from(&aligned.family);
    }
}

/// The final (name, authorship, family) decided for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedName {
    pub name: String,
    pub authorship: String,
    pub family: String,
}

pub(crate) fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_number() {
        let record = TaxonRecord::new("12", "3", "Quercus alba");
        assert_eq!(record.record_number(), "12-3");
        assert!(!record.is_unassigned());

        let site = TaxonRecord::new("12", UNASSIGNED_SPECIMEN, "");
        assert!(site.is_unassigned());
        assert!(!site.has_name());
    }

    #[test]
    fn test_capitalize_name_keeps_remaining_case() {
        let mut record = TaxonRecord::new("1", "1", "quercus Alba");
        record.capitalize_name();
        assert_eq!(record.scientific_name, "Quercus Alba");

        let mut record = TaxonRecord::new("1", "1", "  acer rubrum ");
        record.capitalize_name();
        assert_eq!(record.scientific_name, "Acer rubrum");
    }

    #[test]
    fn test_apply_aligned_name() {
        let mut record = TaxonRecord::new("1", "2", "Quercus alba");
        record.apply(&AlignedName {
            name: "Quercus alba".to_string(),
            authorship: "L.".to_string(),
            family: "Fagaceae".to_string(),
        });
        assert_eq!(record.scientific_name_authorship, "L.");
        assert_eq!(record.family, "Fagaceae");
        assert_eq!(record.alignment().family, "Fagaceae");
    }

    #[test]
    fn test_deserialize_camel_case_columns() {
        let json = r##"{"siteNumber":"4","specimenNumber":"#","scientificName":"Acer"}"##;
        let record: TaxonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.site_number, "4");
        assert!(record.is_unassigned());
        assert_eq!(record.family, "");
    }
}
