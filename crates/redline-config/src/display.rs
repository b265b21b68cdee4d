//! Text bounds for listings and proposals.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_chars() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Maximum characters of anchored paragraph text shown for a comment.
    #[serde(default = "default_chars")]
    pub excerpt_chars: usize,

    /// Maximum characters of change text shown in confirmation summaries.
    #[serde(default = "default_chars")]
    pub preview_chars: usize,
}

impl DisplayConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("display.excerpt_chars", self.excerpt_chars),
            ("display.preview_chars", self.preview_chars),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: default_chars(),
            preview_chars: default_chars(),
        }
    }
}
