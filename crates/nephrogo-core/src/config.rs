use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One host pattern: requests whose host starts with `regex` use URL config `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPatternConfig {
    pub name: String,
    pub regex: String,
}

/// Host-based routing (`[hosts]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsConfig {
    /// Domain the portal hosts live under, used when reversing URLs.
    pub parent_host: String,
    /// Host name used when no pattern matches the request host.
    pub default_host: String,
    /// Tried in order; first match wins.
    pub patterns: Vec<HostPatternConfig>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            parent_host: "nephrogo.com".to_string(),
            default_host: "api".to_string(),
            patterns: vec![
                HostPatternConfig {
                    name: "doctor".to_string(),
                    regex: "doctor".to_string(),
                },
                HostPatternConfig {
                    name: "api".to_string(),
                    regex: "api".to_string(),
                },
            ],
        }
    }
}

fn default_api_host() -> String {
    "https://api.datadoghq.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Datadog credentials (optional `[datadog]` section). Without it, gauges are only logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatadogSettings {
    pub api_key: String,
    #[serde(default)]
    pub app_key: Option<String>,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Whole-request timeout for a series submission.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Global configuration loaded from `~/.config/nephrogo/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NephrogoConfig {
    /// Rows per page on the doctor portal list pages.
    pub paginate_by: usize,
    #[serde(default)]
    pub hosts: HostsConfig,
    #[serde(default)]
    pub datadog: Option<DatadogSettings>,
}

impl Default for NephrogoConfig {
    fn default() -> Self {
        Self {
            paginate_by: 30,
            hosts: HostsConfig::default(),
            datadog: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nephrogo")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NephrogoConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NephrogoConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<NephrogoConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: NephrogoConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
