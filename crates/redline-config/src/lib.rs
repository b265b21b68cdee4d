//! # redline-config
//!
//! Layered configuration loading for redline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REDLINE_*` prefix, `__` as separator)
//! 2. Project-level `.redline/config.toml`
//! 3. User-level `~/.config/redline/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REDLINE_AUTHOR__NAME` -> `author.name`,
//! `REDLINE_DISPLAY__EXCERPT_CHARS` -> `display.excerpt_chars`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use redline_config::RedlineConfig;
//!
//! let config = RedlineConfig::load_with_dotenv().expect("config");
//! println!("marks will be signed by {}", config.author.name);
//! ```

mod author;
mod display;
mod error;

pub use author::AuthorConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedlineConfig {
    #[serde(default)]
    pub author: AuthorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl RedlineConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".redline/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REDLINE_").split("__"))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.author.validate()?;
        self.display.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("redline").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RedlineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.author.name, "AIM");
        assert_eq!(config.display.excerpt_chars, 100);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = RedlineConfig::load().expect("should extract defaults");
            assert_eq!(config.display.preview_chars, 100);
            assert!(config.author.initials.is_empty());
            Ok(())
        });
    }
}
