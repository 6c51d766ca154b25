//! Tool configuration.
//!
//! A small JSON file, loaded and validated before any command runs. A missing
//! file at the default location means defaults; an explicit `--config` path
//! must exist.
use crate::backend::DEFAULT_API_BASE;
use crate::rules::{is_valid_sid, EngineOptions};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Current schema version for `config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Environment variable consulted for the backend base URL.
pub const API_BASE_ENV: &str = "SAP_LANDSCAPE_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// SIDs from outside the snapshot that count as part of the inventory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_sids: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            api_base: None,
            known_sids: Vec::new(),
        }
    }
}

impl ToolConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            extra_known_sids: self.known_sids.clone(),
        }
    }
}

/// `<config dir>/sap-landscape/config.json`, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sap-landscape").join("config.json"))
}

/// Load the config from an explicit path or the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => path,
            None => {
                tracing::debug!("no config file, using defaults");
                return Ok(ToolConfig::default());
            }
        },
    };
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: ToolConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn validate_config(config: &ToolConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if let Some(api_base) = config.api_base.as_deref() {
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(anyhow!(
                "api_base must be an http(s) URL (got {api_base:?})"
            ));
        }
    }
    if let Some(sid) = config.known_sids.iter().find(|sid| !is_valid_sid(sid)) {
        return Err(anyhow!(
            "known_sids entries must be 3 uppercase letters or numbers (got {sid:?})"
        ));
    }
    Ok(())
}

/// Resolve the backend base URL.
///
/// Priority: `--api-base` flag, `api_base` in config, `SAP_LANDSCAPE_API_BASE`,
/// then the built-in default.
pub fn resolve_api_base(flag: Option<&str>, config: &ToolConfig) -> String {
    resolve_api_base_from(flag, config, env::var(API_BASE_ENV).ok())
}

fn resolve_api_base_from(
    flag: Option<&str>,
    config: &ToolConfig,
    env_value: Option<String>,
) -> String {
    let non_empty = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };
    flag.and_then(non_empty)
        .or_else(|| config.api_base.as_deref().and_then(non_empty))
        .or_else(|| env_value.as_deref().and_then(non_empty))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
