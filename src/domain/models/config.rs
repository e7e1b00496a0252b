use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::policy::{AlignmentSource, AuthChangePolicy, Kingdom, NameChangePolicy};
use crate::domain::ports::{SettingKey, SettingsReader};

/// Main configuration structure for taxalign
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Source selection and change policies
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Local reference table location
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Web service endpoints and timeout handling
    #[serde(default)]
    pub web: WebConfig,

    /// Reconciliation loop limits
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// User-controlled alignment policy.
///
/// Changing any of these invalidates the session cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyConfig {
    /// Which service or table names are aligned against
    #[serde(default)]
    pub source: AlignmentSource,

    /// How suggested name changes are handled
    #[serde(default)]
    pub name_change_policy: NameChangePolicy,

    /// How suggested authorship changes are handled
    #[serde(default)]
    pub auth_change_policy: AuthChangePolicy,

    /// Minimum TNRS score, 0-100
    #[serde(default = "default_tnrs_threshold")]
    pub tnrs_threshold: u8,

    /// Kingdom used to pick reference tables and filter web results
    #[serde(default)]
    pub kingdom: Kingdom,
}

const fn default_tnrs_threshold() -> u8 {
    85
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            source: AlignmentSource::default(),
            name_change_policy: NameChangePolicy::default(),
            auth_change_policy: AuthChangePolicy::default(),
            tnrs_threshold: default_tnrs_threshold(),
            kingdom: Kingdom::default(),
        }
    }
}

impl PolicyConfig {
    /// Threshold as a fraction comparable to TNRS scores.
    pub fn tnrs_cutoff(&self) -> f64 {
        f64::from(self.tnrs_threshold) / 100.0
    }

    /// Build from the host application's stored settings.
    ///
    /// Library entry point for applications that embed the reconciler and
    /// keep their own settings store; the CLI goes through
    /// [`ConfigLoader`](crate::infrastructure::config::ConfigLoader) instead.
    /// Missing or unreadable values fall back to the defaults; a threshold
    /// above 100 is clamped.
    pub fn from_settings(settings: &dyn SettingsReader) -> Self {
        let defaults = Self::default();
        let read = |key: SettingKey| settings.get(key).filter(|v| !v.trim().is_empty());

        Self {
            source: read(SettingKey::AlignmentSource)
                .and_then(|v| AlignmentSource::from_str(&v))
                .unwrap_or(defaults.source),
            name_change_policy: read(SettingKey::NameChangePolicy)
                .map_or(defaults.name_change_policy, |v| NameChangePolicy::from_str(&v)),
            auth_change_policy: read(SettingKey::AuthChangePolicy)
                .and_then(|v| AuthChangePolicy::from_str(&v))
                .unwrap_or(defaults.auth_change_policy),
            tnrs_threshold: read(SettingKey::TnrsThreshold)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map_or(defaults.tnrs_threshold, clamp_threshold),
            kingdom: read(SettingKey::Kingdom)
                .and_then(|v| Kingdom::from_str(&v))
                .unwrap_or(defaults.kingdom),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_threshold(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Local reference table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReferenceConfig {
    /// Directory holding `<Kingdom>_Reference.csv` files
    #[serde(default = "default_reference_dir")]
    pub directory: PathBuf,
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from(".taxalign/reference")
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            directory: default_reference_dir(),
        }
    }
}

impl ReferenceConfig {
    pub fn table_path(&self, kingdom: Kingdom) -> PathBuf {
        self.directory.join(kingdom.reference_file_name())
    }
}

/// Web service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WebConfig {
    /// Timeout for the first attempt, in seconds
    #[serde(default = "default_initial_timeout_secs")]
    pub initial_timeout_secs: u64,

    /// Added to the timeout each time the user chooses to retry
    #[serde(default = "default_timeout_step_secs")]
    pub timeout_step_secs: u64,

    /// Maximum attempts before a timeout is reported as final
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause after each call to a public service, in milliseconds
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    #[serde(default)]
    pub catalog_of_life: CatalogOfLifeConfig,

    #[serde(default)]
    pub tnrs: TnrsConfig,

    #[serde(default)]
    pub plants_of_the_world: PlantsOfTheWorldConfig,
}

const fn default_initial_timeout_secs() -> u64 {
    5
}

const fn default_timeout_step_secs() -> u64 {
    2
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_politeness_delay_ms() -> u64 {
    1000
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            initial_timeout_secs: default_initial_timeout_secs(),
            timeout_step_secs: default_timeout_step_secs(),
            max_attempts: default_max_attempts(),
            politeness_delay_ms: default_politeness_delay_ms(),
            catalog_of_life: CatalogOfLifeConfig::default(),
            tnrs: TnrsConfig::default(),
            plants_of_the_world: PlantsOfTheWorldConfig::default(),
        }
    }
}

/// Catalog of Life endpoints, tried in order.
///
/// Templates may use `{name}`, `{year}` and `{previous_year}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogOfLifeConfig {
    #[serde(default = "default_col_endpoints")]
    pub endpoints: Vec<String>,
}

fn default_col_endpoints() -> Vec<String> {
    vec![
        "http://webservice.catalogueoflife.org/col/webservice?name={name}&format=json&response=full".to_string(),
        "http://webservice.catalogueoflife.org/annual-checklist/{year}/webservice?name={name}&format=json&response=full".to_string(),
        "http://webservice.catalogueoflife.org/annual-checklist/{previous_year}/webservice?name={name}&format=json&response=full".to_string(),
    ]
}

impl Default for CatalogOfLifeConfig {
    fn default() -> Self {
        Self {
            endpoints: default_col_endpoints(),
        }
    }
}

/// TNRS `matchNames` endpoint; `{name}` is substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TnrsConfig {
    #[serde(default = "default_tnrs_url")]
    pub url: String,
}

fn default_tnrs_url() -> String {
    "http://tnrs.iplantc.org/tnrsm-svc/matchNames?retrieve=best&names={name}".to_string()
}

impl Default for TnrsConfig {
    fn default() -> Self {
        Self {
            url: default_tnrs_url(),
        }
    }
}

/// Plants of the World search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlantsOfTheWorldConfig {
    #[serde(default = "default_powo_url")]
    pub search_url: String,
}

fn default_powo_url() -> String {
    "http://www.plantsoftheworldonline.org/api/2/search".to_string()
}

impl Default for PlantsOfTheWorldConfig {
    fn default() -> Self {
        Self {
            search_url: default_powo_url(),
        }
    }
}

/// Reconciliation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReconcileConfig {
    /// How many times a user may re-enter a name that found nothing
    #[serde(default = "default_max_name_reentries")]
    pub max_name_reentries: u32,
}

const fn default_max_name_reentries() -> u32 {
    5
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            max_name_reentries: default_max_name_reentries(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stdout only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_settings_reads_dialog_labels() {
        let stored = settings(&[
            ("value_TaxAlignSource", "Catalog of Life (web API)"),
            ("value_NameChangePolicy", "Accept all suggestions"),
            ("value_AuthChangePolicy", "Fill blanks"),
            ("value_TNRS_Threshold", "70"),
            ("value_Kingdom", "Fungi"),
        ]);

        let policy = PolicyConfig::from_settings(&stored);
        assert_eq!(policy.source, AlignmentSource::CatalogOfLife);
        assert_eq!(policy.name_change_policy, NameChangePolicy::AcceptAll);
        assert_eq!(policy.auth_change_policy, AuthChangePolicy::FillBlanksOnly);
        assert_eq!(policy.tnrs_threshold, 70);
        assert_eq!(policy.kingdom, Kingdom::Fungi);
    }

    #[test]
    fn test_from_settings_defaults_and_clamps() {
        let policy = PolicyConfig::from_settings(&settings(&[("value_TNRS_Threshold", "250")]));
        assert_eq!(policy.source, AlignmentSource::ItisLocal);
        assert_eq!(policy.name_change_policy, NameChangePolicy::AlwaysAsk);
        assert_eq!(policy.tnrs_threshold, 100);

        let policy = PolicyConfig::from_settings(&settings(&[("value_TNRS_Threshold", "high")]));
        assert_eq!(policy.tnrs_threshold, 85);
        assert!((policy.tnrs_cutoff() - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_path() {
        let reference = ReferenceConfig {
            directory: PathBuf::from("/data"),
        };
        assert_eq!(
            reference.table_path(Kingdom::Fungi),
            PathBuf::from("/data/Fungi_Reference.csv")
        );
    }
}
