//! Game settings
//!
//! Defaults reproduce the reference feel exactly. Overrides come from
//! LocalStorage on the web or an environment variable natively; there is no
//! save path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FORMATION_INTERVAL_MS, INVADER_FIRE_CHANCE};

/// Configuration errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wall-clock time between formation-move ticks
    pub formation_interval_ms: f64,
    /// Chance per formation-move tick that one invader fires (0.0 - 1.0)
    pub invader_fire_chance: f64,
    /// Drop auto-repeated fire key events (hold-to-fire disabled)
    pub ignore_fire_repeat: bool,
    /// Log filter level ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            formation_interval_ms: FORMATION_INTERVAL_MS,
            invader_fire_chance: INVADER_FIRE_CHANCE,
            ignore_fire_repeat: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dom_invaders_settings";

    /// Environment variable holding a JSON override
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "DOM_INVADERS_SETTINGS";

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.formation_interval_ms > 0.0) {
            return Err(SettingsError::Invalid {
                field: "formation_interval_ms",
                reason: format!("must be positive, got {}", self.formation_interval_ms),
            });
        }
        if !(0.0..=1.0).contains(&self.invader_fire_chance) {
            return Err(SettingsError::Invalid {
                field: "invader_fire_chance",
                reason: format!("must be within 0..=1, got {}", self.invader_fire_chance),
            });
        }
        if self.log_level().is_none() {
            return Err(SettingsError::Invalid {
                field: "log_level",
                reason: format!("unknown level {:?}", self.log_level),
            });
        }
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> Option<log::Level> {
        self.log_level.parse().ok()
    }

    /// Fire chance usable as a probability: non-finite values disable
    /// invader fire, everything else is clamped to `0.0..=1.0`
    pub fn effective_fire_chance(&self) -> f64 {
        if self.invader_fire_chance.is_finite() {
            self.invader_fire_chance.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Defaults when no override is stored, otherwise the parsed override
    pub fn from_stored(json: Option<&str>) -> Result<Self, SettingsError> {
        match json {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from LocalStorage (WASM only)
    ///
    /// Runs before the logger exists, so a bad override is returned rather
    /// than logged.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, SettingsError> {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        Self::from_stored(stored.as_deref())
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, SettingsError> {
        let stored = std::env::var(Self::ENV_VAR).ok();
        Self::from_stored(stored.as_deref())
    }
}
