//! Source selection and change policies.
//!
//! Every enum accepts both its snake_case identifier and the label the
//! settings dialog stores (e.g. `"ITIS (local)"`, `"Fill blanks"`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which reference source names are aligned against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentSource {
    CatalogOfLife,
    #[default]
    ItisLocal,
    ItisWeb,
    Tnrs,
    PlantsOfTheWorld,
    MycobankLocal,
    MycobankWeb,
}

impl AlignmentSource {
    pub const ALL: [Self; 7] = [
        Self::CatalogOfLife,
        Self::ItisLocal,
        Self::ItisWeb,
        Self::Tnrs,
        Self::PlantsOfTheWorld,
        Self::MycobankLocal,
        Self::MycobankWeb,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CatalogOfLife => "catalog_of_life",
            Self::ItisLocal => "itis_local",
            Self::ItisWeb => "itis_web",
            Self::Tnrs => "tnrs",
            Self::PlantsOfTheWorld => "plants_of_the_world",
            Self::MycobankLocal => "mycobank_local",
            Self::MycobankWeb => "mycobank_web",
        }
    }

    /// Label shown to users and stored by the settings dialog.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CatalogOfLife => "Catalog of Life (web API)",
            Self::ItisLocal => "ITIS (local)",
            Self::ItisWeb => "ITIS (web API)",
            Self::Tnrs => "Taxonomic Name Resolution Service (web API)",
            Self::PlantsOfTheWorld => "Plants of the World (web API)",
            Self::MycobankLocal => "MycoBank (local)",
            Self::MycobankWeb => "MycoBank (web API)",
        }
    }

    pub const fn is_local(&self) -> bool {
        matches!(self, Self::ItisLocal | Self::MycobankLocal)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|source| source.label().eq_ignore_ascii_case(s) || source.as_str() == s)
    }
}

impl fmt::Display for AlignmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do when a source suggests a different scientific name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameChangePolicy {
    AcceptAll,
    #[default]
    AlwaysAsk,
    KeepAsIs,
}

impl NameChangePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAll => "accept_all",
            Self::AlwaysAsk => "always_ask",
            Self::KeepAsIs => "keep_as_is",
        }
    }

    /// Parse a stored value. Anything that is neither "accept all" nor
    /// "always ask" means the suggestion is kept out of the record.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "accept all suggestions" | "accept_all" => Self::AcceptAll,
            "always ask" | "always_ask" => Self::AlwaysAsk,
            _ => Self::KeepAsIs,
        }
    }
}

/// What to do when a source suggests a different authorship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthChangePolicy {
    AcceptAll,
    #[default]
    FillBlanksOnly,
    AlwaysAsk,
}

impl AuthChangePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAll => "accept_all",
            Self::FillBlanksOnly => "fill_blanks_only",
            Self::AlwaysAsk => "always_ask",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "accept all suggestions" | "accept_all" => Some(Self::AcceptAll),
            "fill blanks" | "fill_blanks" | "fill_blanks_only" => Some(Self::FillBlanksOnly),
            "always ask" | "always_ask" => Some(Self::AlwaysAsk),
            _ => None,
        }
    }
}

/// Top-level classification the engine works within.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kingdom {
    #[default]
    Plantae,
    Fungi,
}

impl Kingdom {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plantae => "Plantae",
            Self::Fungi => "Fungi",
        }
    }

    /// File name of the bundled reference table for this kingdom.
    pub fn reference_file_name(&self) -> String {
        format!("{}_Reference.csv", self.as_str())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "plantae" => Some(Self::Plantae),
            "fungi" => Some(Self::Fungi),
            _ => None,
        }
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
