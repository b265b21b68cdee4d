//! Identity stamped onto new revision marks and comments.

use redline_core::entities::derive_initials;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_name() -> String {
    String::from("AIM")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorConfig {
    /// Author written on inserted marks and comments when `--author` is absent.
    #[serde(default = "default_name")]
    pub name: String,

    /// Comment initials; empty means derive them from `name`.
    #[serde(default)]
    pub initials: String,
}

impl AuthorConfig {
    /// Initials to use for `author`, honouring a configured override.
    #[must_use]
    pub fn initials_for(&self, author: &str) -> String {
        if self.initials.is_empty() || author != self.name {
            derive_initials(author)
        } else {
            self.initials.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "author.name".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            initials: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_initials_when_unset() {
        let config = AuthorConfig {
            name: "Grace Brewster Hopper".into(),
            initials: String::new(),
        };
        assert_eq!(config.initials_for("Grace Brewster Hopper"), "GBH");
    }

    #[test]
    fn configured_initials_only_apply_to_configured_author() {
        let config = AuthorConfig {
            name: "Grace Hopper".into(),
            initials: "GMH".into(),
        };
        assert_eq!(config.initials_for("Grace Hopper"), "GMH");
        assert_eq!(config.initials_for("Alan Turing"), "AT");
    }

    #[test]
    fn blank_name_is_invalid() {
        let config = AuthorConfig {
            name: "  ".into(),
            initials: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
