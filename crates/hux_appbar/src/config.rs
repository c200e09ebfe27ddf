//! App bar configuration

use hux_core::{HuxError, Result};
use serde::{Deserialize, Serialize};

use crate::button::BuiltInButtons;

/// How the bar behaves without a bound target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayType {
    /// Attached to a bounding box; hidden when there is none
    #[default]
    Manipulation,
    /// Free-standing; stays visible without a target
    Standalone,
}

/// App bar tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppBarConfig {
    /// Whether the bar times out to invisible
    pub timeout: bool,
    /// Seconds without focus before timing out
    pub timeout_interval: f32,
    /// Vertical offset below the box, as a fraction of its height. Negative moves it up.
    pub hover_offset_y_scale: f32,
    /// Push away from the box face
    pub hover_offset_z: f32,
    pub display_type: DisplayType,
    pub buttons: BuiltInButtons,
    /// Horizontal distance between button slots
    pub button_spacing: f32,
    /// Seconds after an accepted tap during which taps are ignored
    pub tap_cooldown: f32,
    /// Fraction of the remaining distance covered per reference tick
    pub smoothing: f32,
    /// Tick rate at which `smoothing` applies unscaled
    pub reference_tick_rate: f32,
}

impl Default for AppBarConfig {
    fn default() -> Self {
        Self {
            timeout: false,
            timeout_interval: 10.0,
            hover_offset_y_scale: 0.25,
            hover_offset_z: 0.0,
            display_type: DisplayType::Manipulation,
            buttons: BuiltInButtons::default(),
            button_spacing: 0.08,
            tap_cooldown: 0.5,
            smoothing: 0.5,
            reference_tick_rate: 60.0,
        }
    }
}

impl AppBarConfig {
    /// Enable the focus timeout
    pub fn with_timeout(mut self, interval: f32) -> Self {
        self.timeout = true;
        self.timeout_interval = interval;
        self
    }

    /// Set hover offsets
    pub fn with_hover_offsets(mut self, y_scale: f32, z: f32) -> Self {
        self.hover_offset_y_scale = y_scale;
        self.hover_offset_z = z;
        self
    }

    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }

    pub fn with_buttons(mut self, buttons: BuiltInButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Interpolation factor for a tick of `dt` seconds.
    ///
    /// Equals `smoothing` when `dt` is one reference tick and compounds for longer or
    /// shorter ticks.
    pub fn smoothing_factor(&self, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }
        1.0 - (1.0 - self.smoothing).powf(dt * self.reference_tick_rate)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.timeout_interval < 0.0 {
            return Err(HuxError::InvalidConfig(format!(
                "timeout_interval must not be negative, got {}",
                self.timeout_interval
            )));
        }
        if self.tap_cooldown < 0.0 {
            return Err(HuxError::InvalidConfig(format!(
                "tap_cooldown must not be negative, got {}",
                self.tap_cooldown
            )));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(HuxError::InvalidConfig(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        if self.reference_tick_rate <= 0.0 {
            return Err(HuxError::InvalidConfig(format!(
                "reference_tick_rate must be positive, got {}",
                self.reference_tick_rate
            )));
        }
        if self.button_spacing <= 0.0 {
            return Err(HuxError::InvalidConfig(format!(
                "button_spacing must be positive, got {}",
                self.button_spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        assert!(AppBarConfig::default().validate().is_ok());
    }

    #[test]
    fn test_smoothing_matches_reference_tick() {
        let config = AppBarConfig::default();
        assert_relative_eq!(config.smoothing_factor(1.0 / 60.0), 0.5, epsilon = 1e-5);
        assert_relative_eq!(config.smoothing_factor(2.0 / 60.0), 0.75, epsilon = 1e-5);
        assert_eq!(config.smoothing_factor(0.0), 0.0);
    }

    #[test]
    fn test_invalid_values() {
        let config = AppBarConfig {
            smoothing: 0.0,
            ..AppBarConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(AppBarConfig::default().with_timeout(-1.0).validate().is_err());
    }
}
