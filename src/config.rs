use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::direction::HideDirection;
use crate::interpolate::Extrapolation;

/// Translation endpoints for direction-based bindings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateRange {
    /// Offset when fully visible
    pub from: f32,
    /// Offset when fully hidden
    pub to: f32,
}

impl Default for TranslateRange {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 160.0,
        }
    }
}

/// Configuration for a motionify provider scope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Minimum cumulative reverse movement in pixels required to flip the
    /// classification to "up"
    pub threshold: f32,
    /// Whether the idle classification is enabled
    pub support_idle: bool,
    /// Quiet period in milliseconds after the last sample before an active
    /// gesture goes idle
    pub idle_timeout_ms: u64,
    /// Duration of direction-based show/hide transitions
    pub animation_duration_ms: u32,
    /// Direction that hides direction-bound components
    pub hide_on: HideDirection,
    /// Translation endpoints for direction-based bindings
    pub translate_range: TranslateRange,
    /// Default out-of-range behavior for interpolation specs
    pub extrapolate: Extrapolation,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            threshold: 8.0,
            support_idle: false,
            idle_timeout_ms: 200,
            animation_duration_ms: 300,
            hide_on: HideDirection::Down,
            translate_range: TranslateRange::default(),
            extrapolate: Extrapolation::Clamp,
        }
    }
}

impl MotionConfig {
    /// Parse a configuration from TOML, falling back to defaults when the
    /// document does not parse
    pub fn from_toml_str(config_str: &str) -> Self {
        match toml::from_str::<MotionConfig>(config_str) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("Failed to parse motionify config: {e}. Using default configuration.");
                MotionConfig::default()
            }
        }
    }

    /// Idle quiet period as a `Duration`
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    fn sanitized(mut self) -> Self {
        if self.threshold < 0.0 {
            // A zero threshold means any upward movement flips the direction
            log::warn!(
                "Configured threshold {} is negative, flooring to 0",
                self.threshold
            );
            self.threshold = 0.0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::default();
        assert_eq!(config.threshold, 8.0);
        assert!(!config.support_idle);
        assert_eq!(config.idle_timeout_ms, 200);
        assert_eq!(config.animation_duration_ms, 300);
        assert_eq!(config.hide_on, HideDirection::Down);
        assert_eq!(config.translate_range.from, 0.0);
        assert_eq!(config.translate_range.to, 160.0);
        assert_eq!(config.extrapolate, Extrapolation::Clamp);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = MotionConfig::from_toml_str(
            r#"
            threshold = 12.0
            hide_on = "up"
            "#,
        );
        assert_eq!(config.threshold, 12.0);
        assert_eq!(config.hide_on, HideDirection::Up);
        // Unspecified keys keep their defaults
        assert_eq!(config.idle_timeout_ms, 200);
        assert_eq!(config.translate_range.to, 160.0);
    }

    #[test]
    fn test_nested_translate_range() {
        let config = MotionConfig::from_toml_str(
            r#"
            [translate_range]
            from = -20.0
            to = 64.0
            "#,
        );
        assert_eq!(config.translate_range.from, -20.0);
        assert_eq!(config.translate_range.to, 64.0);
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let config = MotionConfig::from_toml_str("threshold = \"not a number\"");
        assert_eq!(config.threshold, 8.0);
    }

    #[test]
    fn test_negative_threshold_floored() {
        let config = MotionConfig::from_toml_str("threshold = -5.0");
        assert_eq!(config.threshold, 0.0);
    }

    #[test]
    fn test_extrapolate_parses() {
        let config = MotionConfig::from_toml_str("extrapolate = \"extend\"");
        assert_eq!(config.extrapolate, Extrapolation::Extend);
    }
}
