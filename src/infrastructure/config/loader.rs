use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid tnrs_threshold: {0}. Must be between 0 and 100")]
    InvalidThreshold(u8),

    #[error("Invalid initial_timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_attempts: {0}. Cannot be 0")]
    InvalidMaxAttempts(u32),

    #[error("Catalog of Life endpoint '{0}' must contain a {{name}} placeholder")]
    InvalidEndpoint(String),

    #[error("{0} URL cannot be empty")]
    EmptyUrl(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .taxalign/config.yaml (project config)
    /// 3. .taxalign/local.yaml (local overrides, optional)
    /// 4. Environment variables (TAXALIGN_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".taxalign/config.yaml"))
            .merge(Yaml::file(".taxalign/local.yaml"))
            .merge(Env::prefixed("TAXALIGN_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring
    /// environment overrides.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TAXALIGN_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.policy.tnrs_threshold > 100 {
            return Err(ConfigError::InvalidThreshold(config.policy.tnrs_threshold));
        }

        let web = &config.web;
        if web.initial_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(web.initial_timeout_secs));
        }
        if web.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(web.max_attempts));
        }

        if web.catalog_of_life.endpoints.is_empty() {
            return Err(ConfigError::EmptyUrl("Catalog of Life"));
        }
        if let Some(bad) = web
            .catalog_of_life
            .endpoints
            .iter()
            .find(|endpoint| !endpoint.contains("{name}"))
        {
            return Err(ConfigError::InvalidEndpoint(bad.clone()));
        }
        if web.tnrs.url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("TNRS"));
        }
        if web.plants_of_the_world.search_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("Plants of the World"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::domain::models::{AlignmentSource, AuthChangePolicy, Kingdom, NameChangePolicy};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.policy.source, AlignmentSource::ItisLocal);
        assert_eq!(config.policy.tnrs_threshold, 85);
        assert_eq!(config.web.initial_timeout_secs, 5);
        assert_eq!(config.web.catalog_of_life.endpoints.len(), 3);
        assert_eq!(config.reconcile.max_name_reentries, 5);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
policy:
  source: tnrs
  name_change_policy: accept_all
  auth_change_policy: always_ask
  tnrs_threshold: 70
  kingdom: Fungi
web:
  politeness_delay_ms: 0
logging:
  level: debug
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.policy.source, AlignmentSource::Tnrs);
        assert_eq!(config.policy.name_change_policy, NameChangePolicy::AcceptAll);
        assert_eq!(config.policy.auth_change_policy, AuthChangePolicy::AlwaysAsk);
        assert_eq!(config.policy.tnrs_threshold, 70);
        assert_eq!(config.policy.kingdom, Kingdom::Fungi);
        assert_eq!(config.web.politeness_delay_ms, 0);
        assert_eq!(config.web.timeout_step_secs, 2);
        assert_eq!(config.logging.format, "pretty");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_threshold() {
        let mut config = Config::default();
        config.policy.tnrs_threshold = 101;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidThreshold(101))
        ));
    }

    #[test]
    fn test_validate_zero_timeout_and_attempts() {
        let mut config = Config::default();
        config.web.initial_timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));

        let mut config = Config::default();
        config.web.max_attempts = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxAttempts(0))
        ));
    }

    #[test]
    fn test_validate_endpoint_needs_name_placeholder() {
        let mut config = Config::default();
        config.web.catalog_of_life.endpoints = vec!["http://col.example/ws?format=json".to_string()];

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidEndpoint(endpoint)) => {
                assert_eq!(endpoint, "http://col.example/ws?format=json");
            }
            other => panic!("Expected InvalidEndpoint error, got {other:?}"),
        }

        config.web.catalog_of_life.endpoints.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyUrl("Catalog of Life"))
        ));
    }

    #[test]
    fn test_validate_empty_urls() {
        let mut config = Config::default();
        config.web.tnrs.url = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyUrl("TNRS"))
        ));
    }

    #[test]
    fn test_validate_invalid_log_settings() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "policy:\n  source: catalog_of_life\n  tnrs_threshold: 60\nlogging:\n  format: json"
        )
        .unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("TAXALIGN_POLICY__TNRS_THRESHOLD", Some("75")),
                ("TAXALIGN_RECONCILE__MAX_NAME_REENTRIES", Some("2")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.policy.source, AlignmentSource::CatalogOfLife);
                assert_eq!(config.policy.tnrs_threshold, 75, "Environment should win");
                assert_eq!(config.reconcile.max_name_reentries, 2);
                assert_eq!(config.logging.format, "json");
            },
        );
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "web:\n  max_attempts: 0").unwrap();
        file.flush().unwrap();

        let error = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(error.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "policy:\n  kingdom: Fungi\n  tnrs_threshold: 80\nlogging:\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "policy:\n  tnrs_threshold: 90").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.policy.tnrs_threshold, 90, "Override should win");
        assert_eq!(
            config.policy.kingdom,
            Kingdom::Fungi,
            "Base value should persist when not overridden"
        );
        assert_eq!(config.logging.format, "json");
    }
}
