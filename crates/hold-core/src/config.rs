//! Press configuration surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hold_threshold_ms must be positive")]
    ZeroHoldThreshold,
    #[error("interval_ms must be positive")]
    ZeroInterval,
    #[error("cannot reconfigure while a press is active")]
    SessionActive,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recognized press detection options.
///
/// `touch_only` selects the input modality and has no default: the caller
/// decides explicitly whether the detector reacts to touch or to mouse
/// input. The remaining options default to 500 ms hold, 1000 ms interval,
/// single-shot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressConfig {
    /// Delay before the first firing (ms). Must be positive.
    #[serde(default = "default_hold_threshold_ms")]
    pub hold_threshold_ms: u64,
    /// Spacing between continuous ticks (ms). Must be positive.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// `false`: fire one long press. `true`: tick repeatedly while held.
    #[serde(default)]
    pub continuous: bool,
    /// `true`: react to touch input only. `false`: mouse input only.
    pub touch_only: bool,
}

fn default_hold_threshold_ms() -> u64 {
    500
}

fn default_interval_ms() -> u64 {
    1000
}

impl PressConfig {
    /// Defaults with mouse input selected.
    pub fn for_mouse() -> Self {
        Self {
            hold_threshold_ms: default_hold_threshold_ms(),
            interval_ms: default_interval_ms(),
            continuous: false,
            touch_only: false,
        }
    }

    /// Defaults with touch input selected.
    pub fn for_touch() -> Self {
        Self {
            touch_only: true,
            ..Self::for_mouse()
        }
    }

    /// Check the positivity requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_threshold_ms == 0 {
            return Err(ConfigError::ZeroHoldThreshold);
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Parse a JSON option object. Unspecified options take their
    /// defaults; `touch_only` must be present.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON option object.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
