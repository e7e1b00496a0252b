//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the reconciliation engine talks to:
//! - NameSource: a taxonomic reference (local table or web service)
//! - Interaction: yes/no questions, notices and text input from the user
//! - SettingsReader: keyed access to persisted user settings
//!
//! These traits keep the engine independent of any particular UI or
//! storage.

pub mod interaction;
pub mod name_source;
pub mod settings;

pub use interaction::{Interaction, NoticeResponse};
pub use name_source::NameSource;
pub use settings::{SettingKey, SettingsReader};
