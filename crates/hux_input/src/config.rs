//! Input configuration

use hux_core::{HuxError, Result};
use serde::{Deserialize, Serialize};

use crate::pointer::Targeting;

/// Device normalization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pinch strength at which a hand becomes pressed
    pub pinch_press_threshold: f32,
    /// Pinch strength below which a pressed hand releases
    pub pinch_release_threshold: f32,
    /// Seconds a hand must be tracked before it produces samples
    pub hand_min_visible_time: f32,
    /// Trigger value at which a controller becomes pressed
    pub trigger_threshold: f32,
    /// How hand samples pick handles
    pub hand_targeting: Targeting,
    /// How controller samples pick handles
    pub controller_targeting: Targeting,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pinch_press_threshold: 0.8,
            pinch_release_threshold: 0.6,
            hand_min_visible_time: 0.5,
            trigger_threshold: 0.5,
            hand_targeting: Targeting::Proximity,
            controller_targeting: Targeting::Ray,
        }
    }
}

impl InputConfig {
    /// Set pinch press / release thresholds
    pub fn with_pinch_thresholds(mut self, press: f32, release: f32) -> Self {
        self.pinch_press_threshold = press;
        self.pinch_release_threshold = release;
        self
    }

    /// Set the minimum visible time for hands
    pub fn with_hand_min_visible_time(mut self, seconds: f32) -> Self {
        self.hand_min_visible_time = seconds;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        for (name, value) in [
            ("pinch_press_threshold", self.pinch_press_threshold),
            ("pinch_release_threshold", self.pinch_release_threshold),
            ("trigger_threshold", self.trigger_threshold),
        ] {
            if !unit.contains(&value) {
                return Err(HuxError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.pinch_release_threshold > self.pinch_press_threshold {
            return Err(HuxError::InvalidConfig(
                "pinch_release_threshold must not exceed pinch_press_threshold".to_string(),
            ));
        }
        if self.hand_min_visible_time < 0.0 {
            return Err(HuxError::InvalidConfig(
                "hand_min_visible_time must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(InputConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_hysteresis_rejected() {
        let config = InputConfig::default().with_pinch_thresholds(0.5, 0.7);
        assert!(config.validate().is_err());
    }
}
