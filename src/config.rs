use crate::error::ConfigError;
use log::{debug, info};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const BASE_URL: &str = "https://monitoringapi.solaredge.com";
pub const CONFIG_FILE_NAME: &str = "solar_config.json";

/// Settings read from `solar_config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_site_id")]
    pub site_id: String,
    pub api_key: String,
    /// Days-back offset of the first queried day.
    #[serde(deserialize_with = "deserialize_offset")]
    pub start: i64,
    /// Days-back offset of the last queried day.
    #[serde(deserialize_with = "deserialize_offset")]
    pub end: i64,
    /// Provider time unit, passed through as-is (`DAY`, `QUARTER_OF_AN_HOUR`, ...).
    pub unit: String,
    /// Energy endpoint of the site, derived from `site_id`.
    #[serde(skip)]
    pub address: String,
}

impl Config {
    /// Read and parse the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config for site {}", config.site_id);
        Ok(config)
    }

    /// Parse config JSON and derive the endpoint address.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(data)?;
        config.address = energy_address(BASE_URL, &config.site_id);
        Ok(config)
    }

    /// Point the config at another API host (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.address = energy_address(base_url, &self.site_id);
        debug!("Updated energy endpoint to {}", self.address);
        self
    }
}

/// `solar_config.json` in the directory of the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::Locate)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(CONFIG_FILE_NAME))
}

fn energy_address(base_url: &str, site_id: &str) -> String {
    format!("{}/site/{}/energy", base_url.trim_end_matches('/'), site_id)
}

fn deserialize_site_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("site_id must be a non-empty string or a number")),
    }
}

fn deserialize_offset<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom("day offset must be an integer")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid day offset {s:?}"))),
        _ => Err(D::Error::custom("day offset must be an integer or a numeric string")),
    }
}
