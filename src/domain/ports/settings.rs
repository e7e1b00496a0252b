//! Settings port - keyed access to persisted user settings.

use std::collections::HashMap;

/// Settings the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    AlignmentSource,
    NameChangePolicy,
    AuthChangePolicy,
    TnrsThreshold,
    Kingdom,
}

impl SettingKey {
    /// Key under which the settings dialog stores the value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlignmentSource => "value_TaxAlignSource",
            Self::NameChangePolicy => "value_NameChangePolicy",
            Self::AuthChangePolicy => "value_AuthChangePolicy",
            Self::TnrsThreshold => "value_TNRS_Threshold",
            Self::Kingdom => "value_Kingdom",
        }
    }
}

/// Read-only settings accessor provided by the host application.
///
/// Consumed by [`PolicyConfig::from_settings`](crate::domain::models::PolicyConfig::from_settings).
pub trait SettingsReader {
    /// Raw stored value, or `None` when the key was never saved.
    fn get(&self, key: SettingKey) -> Option<String>;

    /// Stored value or `default`.
    fn get_or(&self, key: SettingKey, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

impl SettingsReader for HashMap<String, String> {
    fn get(&self, key: SettingKey) -> Option<String> {
        HashMap::get(self, key.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_reader() {
        let mut settings = HashMap::new();
        settings.insert("value_Kingdom".to_string(), "Fungi".to_string());

        assert_eq!(SettingsReader::get(&settings, SettingKey::Kingdom).as_deref(), Some("Fungi"));
        assert_eq!(settings.get_or(SettingKey::TnrsThreshold, "85"), "85");
    }
}
