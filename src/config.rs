use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    #[serde(default = "default_cors_max_age")]
    pub cors_max_age_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default)]
    pub json_format: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| Error::NotFound(path.as_ref().display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults. Environment
    /// overrides apply either way.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_file()?,
        };

        if path.exists() {
            return Self::load_with_env(&path);
        }

        tracing::debug!("No config at {}, using defaults", path.display());
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(Error::Config("Bind address cannot be empty".to_string()));
        }

        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", self.server.bind, e)))?;

        let base_url = url::Url::parse(&self.client.base_url)
            .map_err(|_| Error::InvalidUrl(self.client.base_url.clone()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "Unsupported scheme: {}",
                base_url.scheme()
            )));
        }

        if self.client.timeout_secs == 0 {
            return Err(Error::Config("Client timeout must be greater than 0".to_string()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var("DSA_SHEETS_BIND") {
            self.server.bind = bind;
        }

        if let Ok(root) = std::env::var("DSA_SHEETS_DATA_ROOT") {
            self.server.data_root = PathBuf::from(root);
        }

        if let Ok(level) = std::env::var("DSA_SHEETS_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("DSA_SHEETS_BASE_URL") {
            self.client.base_url = base_url;
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("dsa-sheets"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_root: default_data_root(),
            cors_max_age_secs: default_cors_max_age(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: false,
            log_file: default_log_file(),
            json_format: false,
        }
    }
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_data_root() -> PathBuf { PathBuf::from("data") }
fn default_cors_max_age() -> u64 { 60 * 60 }
fn default_base_url() -> String { "http://127.0.0.1:3000".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String {
    format!("DSA-Sheets/{}", env!("CARGO_PKG_VERSION"))
}
fn default_log_level() -> String { "info".to_string() }
fn default_log_file() -> String { "logs/dsa-sheets.log".to_string() }
