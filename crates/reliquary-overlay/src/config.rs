//! Configuration for the tooltip overlay
//!
//! Defines the pointer offset and the fade timings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the tooltip overlay
///
/// # Examples
///
/// ```
/// use reliquary_overlay::OverlayConfig;
///
/// let config = OverlayConfig::default();
/// assert_eq!(config.offset, 10.0);
/// assert_eq!(config.fade_in_delay_ms, 50);
///
/// // No fades at all, e.g. for terminals
/// let config = OverlayConfig::instant();
/// assert_eq!(config.fade_out_ms, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Gap between the pointer and the tooltip box (pixels)
    /// Default: 10
    #[serde(default = "default_offset")]
    pub offset: f64,

    /// Delay between placement and full opacity (milliseconds)
    /// Default: 50
    #[serde(default = "default_fade_in_delay")]
    pub fade_in_delay_ms: u64,

    /// Time from leave until the tooltip is cleared (milliseconds)
    /// Default: 200
    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u64,

    /// Opacity transition length renderers should animate (milliseconds)
    /// Default: 200
    #[serde(default = "default_transition")]
    pub transition_ms: u64,
}

fn default_offset() -> f64 {
    10.0
}

fn default_fade_in_delay() -> u64 {
    50
}

fn default_fade_out() -> u64 {
    200
}

fn default_transition() -> u64 {
    200
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            fade_in_delay_ms: default_fade_in_delay(),
            fade_out_ms: default_fade_out(),
            transition_ms: default_transition(),
        }
    }
}

impl OverlayConfig {
    /// Configuration without fades
    pub fn instant() -> Self {
        Self {
            fade_in_delay_ms: 0,
            fade_out_ms: 0,
            transition_ms: 0,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err("offset must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// Get the fade-in delay as Duration
    pub fn fade_in_delay(&self) -> Duration {
        Duration::from_millis(self.fade_in_delay_ms)
    }

    /// Get the fade-out time as Duration
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    /// Get the opacity transition as Duration
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert_eq!(config.offset, 10.0);
        assert_eq!(config.fade_in_delay(), Duration::from_millis(50));
        assert_eq!(config.fade_out(), Duration::from_millis(200));
        assert_eq!(config.transition(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_offset_is_invalid() {
        let config = OverlayConfig {
            offset: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: OverlayConfig = serde_json::from_str(r#"{"offset": 4}"#).unwrap();
        assert_eq!(config.offset, 4.0);
        assert_eq!(config.fade_out_ms, 200);
    }
}
