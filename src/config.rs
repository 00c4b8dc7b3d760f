use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const ENV_WALLET_ADDRESS: &str = "CARDANO_WALLET_ADDRESS";
pub const ENV_BASE_URL: &str = "BLOCKFROST_BASE_URL";
pub const ENV_API_KEY: &str = "BLOCKFROST_API_KEY";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub api: APIConfig,
    #[serde(default)]
    pub blockfrost: BlockfrostConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct APIConfig {
    pub listen_address: String,
    pub port: i32,
    pub cors_domain: String,
}

impl Default for APIConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1".to_owned(),
            port: 8080,
            cors_domain: "*".to_owned(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BlockfrostConfig {
    pub base_url: String,
    pub api_key: String,
    pub wallet_address: String,
    pub timeout_secs: u64,
    /// upper bound on `/utxos` pages fetched per overview
    pub max_utxo_pages: u32,
}

impl Default for BlockfrostConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            wallet_address: String::new(),
            timeout_secs: 10,
            max_utxo_pages: 10,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String, std::io::Error),
    Parse(String, toml::de::Error),
    Missing(&'static str, &'static str),
    Invalid(&'static str, String),
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "can't read config file {}: {}", path, err),
            ConfigError::Parse(path, err) => write!(f, "malformed config file {}: {}", path, err),
            ConfigError::Missing(field, env) => write!(
                f,
                "missing required setting {} (set it in the config file or via {})",
                field, env
            ),
            ConfigError::Invalid(field, reason) => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl Config {
    pub fn from_toml(path: &str, contents: &str) -> Result<Config, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(path.to_owned(), e))
    }

    /// Overrides the blockfrost section with the given lookup,
    /// normally `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (ENV_WALLET_ADDRESS, &mut self.blockfrost.wallet_address),
            (ENV_BASE_URL, &mut self.blockfrost.base_url),
            (ENV_API_KEY, &mut self.blockfrost.api_key),
        ];

        for (key, field) in overrides {
            if let Some(val) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = val.trim().to_owned();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bf = &self.blockfrost;
        if bf.wallet_address.is_empty() {
            return Err(ConfigError::Missing(
                "blockfrost.wallet_address",
                ENV_WALLET_ADDRESS,
            ));
        }
        if bf.base_url.is_empty() {
            return Err(ConfigError::Missing("blockfrost.base_url", ENV_BASE_URL));
        }
        if bf.api_key.is_empty() {
            return Err(ConfigError::Missing("blockfrost.api_key", ENV_API_KEY));
        }
        if !bf.base_url.starts_with("http://") && !bf.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "blockfrost.base_url",
                format!("expected an http(s) url, got {}", bf.base_url),
            ));
        }
        if bf.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "blockfrost.timeout_secs",
                "must be at least 1".to_owned(),
            ));
        }
        if bf.max_utxo_pages == 0 {
            return Err(ConfigError::Invalid(
                "blockfrost.max_utxo_pages",
                "must be at least 1".to_owned(),
            ));
        }
        if !(1..=65535).contains(&self.api.port) {
            return Err(ConfigError::Invalid(
                "api.port",
                format!("{} is out of range", self.api.port),
            ));
        }
        Ok(())
    }
}

/// Reads the config file (optional when the environment carries the
/// required values), applies environment overrides and validates.
pub async fn read_config(path: &str) -> Result<Config, ConfigError> {
    let mut config = if Path::new(path).exists() {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Io(path.to_owned(), e))?;
        Config::from_toml(path, &contents)?
    } else {
        debug!("config file {} not found, using defaults", path);
        Config::default()
    };

    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
