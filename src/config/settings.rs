use crate::config::CliConfig;
use crate::utils::error::{ExtractError, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional oracle settings file. Values present in the file override the
/// CLI; `${VAR}` references are expanded from the environment before
/// parsing, so the API key can stay out of the file itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    pub api_endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub request_delay_ms: Option<u64>,
}

impl OracleSettings {
    /// `Ok(None)` when the file does not exist; a present but malformed file
    /// is a configuration error.
    pub fn load(path: &str) -> Result<Option<Self>> {
        if !Path::new(path).exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let content = substitute_env_vars(&content);
        let settings = toml::from_str(&content).map_err(|e| ExtractError::ConfigError {
            message: format!("failed to parse {}: {}", path, e),
        })?;
        Ok(Some(settings))
    }

    pub fn apply(self, config: &mut CliConfig) {
        if let Some(endpoint) = self.api_endpoint {
            config.api_endpoint = endpoint;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }
        if let Some(delay) = self.request_delay_ms {
            config.request_delay_ms = delay;
        }
    }
}

/// Expands `${VAR}` from the environment; unknown variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}
