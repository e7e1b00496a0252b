//! `taxalign config`: show the configuration after all layers are merged.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigOutput {
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config)
            .unwrap_or_else(|e| format!("Failed to render configuration: {e}"))
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let result = ConfigOutput {
        config: config.clone(),
    };
    output(&result, json_mode);
    Ok(())
}
