//! `taxalign normalize`: show the lookup key for a name.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::NormalizeArgs;
use crate::services::normalize;

#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    pub input: String,
    pub normalized: String,
}

impl CommandOutput for NormalizeOutput {
    fn to_human(&self) -> String {
        if self.normalized.is_empty() {
            format!("'{}' has no letters to look up", self.input)
        } else {
            self.normalized.clone()
        }
    }
}

pub fn execute(args: NormalizeArgs, json_mode: bool) -> Result<()> {
    let result = NormalizeOutput {
        normalized: normalize(&args.name),
        input: args.name,
    };
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_output() {
        let out = NormalizeOutput {
            input: "Quercus alba var. alba".to_string(),
            normalized: normalize("Quercus alba var. alba"),
        };
        assert_eq!(out.to_human(), "quercus alba alba");
        assert_eq!(out.to_json()["input"], "Quercus alba var. alba");

        let empty = NormalizeOutput {
            input: "123".to_string(),
            normalized: normalize("123"),
        };
        assert!(empty.to_human().contains("no letters"));
    }
}
