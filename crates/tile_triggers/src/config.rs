//! Trigger system configuration
//!
//! # Example Config File
//!
//! ```toml
//! [triggers]
//! player_name_pattern = "Hero"
//! default_locked_message = "It won't budge."
//! ```

use crate::error::{Result, TriggerError};
use crate::filter::PlayerFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the trigger system and its handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Substring (case-insensitive) that marks an entity name as the player
    pub player_name_pattern: String,
    /// Shown by doors that are locked and have no message of their own
    pub default_locked_message: String,
}

impl TriggerConfig {
    pub const DEFAULT_LOCKED_MESSAGE: &'static str = "The door is locked.";

    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML. Accepts a bare table or one nested under `[triggers]`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Wrapped {
            triggers: TriggerConfig,
        }

        let table: toml::Table = toml::from_str(text).map_err(|e| TriggerError::Config(e.to_string()))?;
        let nested = table.contains_key("triggers");
        let value = toml::Value::Table(table);
        let config = if nested {
            value.try_into::<Wrapped>().map(|w| w.triggers)
        } else {
            value.try_into::<TriggerConfig>()
        }
        .map_err(|e| TriggerError::Config(e.to_string()))?;

        config.validated()
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded trigger config from {:?}", path);
        Ok(config)
    }

    /// Player filter built from `player_name_pattern`
    pub fn player_filter(&self) -> PlayerFilter {
        PlayerFilter::name_contains(self.player_name_pattern.clone())
    }

    fn validated(self) -> Result<Self> {
        if self.player_name_pattern.trim().is_empty() {
            return Err(TriggerError::Config(
                "player_name_pattern cannot be blank (it would match every entity)".to_string(),
            ));
        }
        Ok(self)
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            player_name_pattern: PlayerFilter::DEFAULT_NAME_PATTERN.to_string(),
            default_locked_message: Self::DEFAULT_LOCKED_MESSAGE.to_string(),
        }
    }
}
