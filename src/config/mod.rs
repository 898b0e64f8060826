use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use crate::core::providers;
use crate::error::{ConfigError, Result};

fn default_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("lyrfetch/{}", env!("CARGO_PKG_VERSION"))
}

fn default_providers() -> Vec<String> {
    providers::default_order()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_transliterate() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Provider names in lookup priority order
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,

    /// Fold accented and non-Latin characters to ASCII before comparing
    #[serde(default = "default_transliterate")]
    pub transliterate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            providers: default_providers(),
            transliterate: default_transliterate(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up a .env file when present (development convenience)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        };

        if let Some(config_file) = config_file {
            if config_file.exists() {
                let content = fs::read_to_string(&config_file).map_err(ConfigError::Io)?;
                config = toml::from_str(&content).map_err(ConfigError::InvalidFormat)?;
            } else if config_path.is_some() {
                // An explicitly requested file that does not exist is an error;
                // the platform default path is optional.
                return Err(ConfigError::InvalidValue {
                    field: "config".to_string(),
                    value: config_file.display().to_string(),
                }
                .into());
            }
        }

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Environment variables take priority over file values.
    fn load_from_env(&mut self) {
        if let Ok(user_agent) = env::var("LYRFETCH_USER_AGENT") {
            let trimmed = user_agent.trim();
            if !trimmed.is_empty() {
                self.user_agent = trimmed.to_string();
            }
        }

        if let Ok(timeout) = env::var("LYRFETCH_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(value) if value > 0 => self.timeout_seconds = value,
                _ => warn!("Ignoring invalid LYRFETCH_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(list) = env::var("LYRFETCH_PROVIDERS") {
            let names: Vec<String> = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !names.is_empty() {
                self.providers = names;
            }
        }

        if let Ok(value) = env::var("LYRFETCH_TRANSLITERATE") {
            match value.parse::<bool>() {
                Ok(value) => self.transliterate = value,
                Err(_) => warn!("Ignoring invalid LYRFETCH_TRANSLITERATE: {}", value),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for name in &self.providers {
            if !providers::is_known(name) {
                return Err(ConfigError::InvalidValue {
                    field: "providers".to_string(),
                    value: name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("net", "lyrfetch", "lyrfetch")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_builtin_providers() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.transliterate);
        assert_eq!(config.providers, providers::default_order());
    }

    #[test]
    fn unknown_provider_name_is_rejected() {
        let config = Config {
            providers: vec!["azlyrics".to_string(), "nosuchsite".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_transliterate_env_value_is_ignored() {
        let mut config = Config::default();
        env::set_var("LYRFETCH_TRANSLITERATE", "1");
        config.load_from_env();
        env::remove_var("LYRFETCH_TRANSLITERATE");
        assert!(config.transliterate, "non-boolean value must not flip the flag");

        let mut config = Config::default();
        env::set_var("LYRFETCH_TRANSLITERATE", "false");
        config.load_from_env();
        env::remove_var("LYRFETCH_TRANSLITERATE");
        assert!(!config.transliterate);
    }

    #[test]
    fn toml_round_trip_keeps_fields() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.user_agent, config.user_agent);
        assert_eq!(parsed.providers, config.providers);
    }
}
