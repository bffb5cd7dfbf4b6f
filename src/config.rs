//! Widget configuration. `Default` carries the values the page ships with;
//! a JSON override can be passed to `start_app_with_config` when the
//! `serde_json` feature is enabled.

use thiserror::Error;

use crate::timing::{REVEAL_DELAY_MS, TRANSITION_MS};

pub const DEFAULT_SLOT_COUNT: usize = 16;
pub const DEFAULT_BASE_PATH: &str = "/photo";
/// Fallback order tried for every slot. Order matters: case variants of the
/// same extension are distinct files on most static hosts.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "JPG", "jpeg", "JPEG", "PNG", "png", "webp"];
pub const DEFAULT_SECRET: &str = "gualala";
pub const DEFAULT_QUESTION: &[&str] = &["What town did we stay in", "when we saw Mazi the Giraffe?"];

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    pub slot_count: usize,
    /// Path prefix joined with the 1-based slot number, e.g. `/photo` -> `/photo7.jpg`.
    pub base_path: String,
    pub extensions: Vec<String>,
    pub secret: String,
    pub question: Vec<String>,
    pub placeholder: String,
    pub transition_ms: u32,
    pub reveal_delay_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            secret: DEFAULT_SECRET.to_string(),
            question: DEFAULT_QUESTION.iter().map(|l| l.to_string()).collect(),
            placeholder: "Type your answer".to_string(),
            transition_ms: TRANSITION_MS,
            reveal_delay_ms: REVEAL_DELAY_MS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slot_count must be at least 1")]
    NoSlots,
    #[error("extension list is empty")]
    NoExtensions,
    #[error("extension #{index} is blank")]
    BlankExtension { index: usize },
    #[error("secret answer is blank")]
    BlankSecret,
    #[error("invalid config json: {0}")]
    Json(String),
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if let Some(index) = self.extensions.iter().position(|e| e.trim().is_empty()) {
            return Err(ConfigError::BlankExtension { index });
        }
        if self.secret.trim().is_empty() {
            return Err(ConfigError::BlankSecret);
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CarouselConfig =
            serde_json::from_str(json).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
