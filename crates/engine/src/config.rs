use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find home directory")]
    NoHomeDir,
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Ollama server.
    pub endpoint: String,
    pub model: String,
    pub stop: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Offer the Bangkok weather tool to the model.
    pub weather: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            stop: Some("<|eot_id|>".to_string()),
            temperature: 0.0,
            timeout_secs: 120,
            weather: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Reads `path`, writing the defaults there first if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            info!(path = %path.display(), "Wrote default config");
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Applies `COURIER_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(endpoint) = lookup("COURIER_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = lookup("COURIER_MODEL") {
            self.model = model;
        }
        if let Some(stop) = lookup("COURIER_STOP") {
            // An empty value switches the stop sequence off.
            self.stop = Some(stop).filter(|stop| !stop.is_empty());
        }
        if let Some(value) = lookup("COURIER_TEMPERATURE") {
            self.temperature = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "COURIER_TEMPERATURE",
                value,
            })?;
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".config").join("courier").join("config.json"))
    }
}
