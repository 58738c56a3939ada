//! Configuration file management for the generation service.
//!
//! Supports reading secrets from `~/.config/triage-assistant/secret.json`,
//! with environment-variable overrides for containerized deployments.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use triage_core::error::TriageError;
use triage_core::Result;

/// Environment variable overriding the API key from secret.json.
pub const API_KEY_ENV: &str = "TRIAGE_GENERATION_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "TRIAGE_GENERATION_MODEL";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub generation: Option<GenerationConfig>,
}

/// Generation API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the generation configuration.
///
/// The environment variables win over the file so a deployment can
/// inject credentials without writing them to disk.
pub fn load_generation_config() -> Result<GenerationConfig> {
    if let Ok(api_key) = std::env::var(API_KEY_ENV) {
        return Ok(GenerationConfig {
            api_key,
            model_name: std::env::var(MODEL_ENV).ok(),
        });
    }

    let config_path = get_config_path()?;
    if !config_path.exists() {
        return Err(TriageError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        TriageError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let config: SecretConfig = serde_json::from_str(&content).map_err(|e| {
        TriageError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    config.generation.ok_or_else(|| {
        TriageError::config("Generation configuration not found in secret.json")
    })
}

/// Returns the path to the configuration file:
/// `~/.config/triage-assistant/secret.json`
fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TriageError::config("Could not determine home directory"))?;
    Ok(home
        .join(".config")
        .join("triage-assistant")
        .join("secret.json"))
}
