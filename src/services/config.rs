use crate::services::storage::config_dir;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8000/api";

/// `~/.config/cybershield/config.toml`
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub gateway_url: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub gateway_url: String,
    pub timeout: Option<Duration>,
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    load_config_from(&config_dir()?.join("config.toml"))
}

pub fn load_config_from(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// The `--gateway` flag (or its env var) wins over the file, which wins
/// over the built-in default.
pub fn resolve_settings(flag: Option<&str>, file: ConfigFile) -> Settings {
    let gateway_url = flag
        .map(str::to_string)
        .or(file.gateway_url)
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
    Settings {
        gateway_url,
        timeout: file.timeout_ms.map(Duration::from_millis),
    }
}
