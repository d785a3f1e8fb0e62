use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "ido.toml";
const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

#[derive(Debug, Deserialize, PartialEq)]
pub struct IdoConfig {
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ContractsConfig {
    /// NaijaLoyal token address.
    pub token: String,
    /// NaijaLoyalIDO sale contract address.
    pub sale: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse toml at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn load_config(path: impl AsRef<Path>) -> Result<IdoConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: IdoConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

/// Signer key for write commands, taken from the environment only so it
/// never ends up in a config file.
pub fn signer_key() -> Option<String> {
    env::var(PRIVATE_KEY_ENV).ok().filter(|key| !key.is_empty())
}
