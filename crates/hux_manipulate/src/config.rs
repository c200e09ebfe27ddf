//! Manipulation configuration

use hux_core::{HuxError, Result};
use serde::{Deserialize, Serialize};

use crate::operation::Operations;

/// Manipulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Pointer movement to target movement ratio
    pub drag_multiplier: f32,
    /// Pointer sweep angle to target rotation ratio
    pub rotate_multiplier: f32,
    /// Relative pointer distance change to relative scale change ratio
    pub scale_multiplier: f32,
    /// Lowest scale reachable in one tick, and in one gesture, as a fraction
    pub min_scale_percentage: f32,
    /// Handles farther than this from the pointer cannot be selected
    pub selection_radius: f32,
    /// Operations allowed when no target profile overrides them
    pub permitted_operations: Operations,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            drag_multiplier: 1.0,
            rotate_multiplier: 1.0,
            scale_multiplier: 1.0,
            min_scale_percentage: 0.05,
            selection_radius: 0.1,
            permitted_operations: Operations::default(),
        }
    }
}

impl ManipulationConfig {
    /// Set the three input multipliers
    pub fn with_multipliers(mut self, drag: f32, rotate: f32, scale: f32) -> Self {
        self.drag_multiplier = drag;
        self.rotate_multiplier = rotate;
        self.scale_multiplier = scale;
        self
    }

    /// Set the minimum scale fraction
    pub fn with_min_scale_percentage(mut self, fraction: f32) -> Self {
        self.min_scale_percentage = fraction;
        self
    }

    /// Set the handle selection radius
    pub fn with_selection_radius(mut self, radius: f32) -> Self {
        self.selection_radius = radius;
        self
    }

    /// Set the default permitted operations
    pub fn with_permitted_operations(mut self, operations: Operations) -> Self {
        self.permitted_operations = operations;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("drag_multiplier", self.drag_multiplier),
            ("rotate_multiplier", self.rotate_multiplier),
            ("scale_multiplier", self.scale_multiplier),
        ] {
            if !(0.01..=20.0).contains(&value) {
                return Err(HuxError::InvalidConfig(format!(
                    "{} must be in [0.01, 20], got {}",
                    name, value
                )));
            }
        }
        if !(self.min_scale_percentage > 0.0 && self.min_scale_percentage <= 1.0) {
            return Err(HuxError::InvalidConfig(format!(
                "min_scale_percentage must be in (0, 1], got {}",
                self.min_scale_percentage
            )));
        }
        if self.selection_radius <= 0.0 {
            return Err(HuxError::InvalidConfig(format!(
                "selection_radius must be positive, got {}",
                self.selection_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ManipulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ranges() {
        assert!(ManipulationConfig::default()
            .with_multipliers(0.0, 1.0, 1.0)
            .validate()
            .is_err());
        assert!(ManipulationConfig::default()
            .with_min_scale_percentage(0.0)
            .validate()
            .is_err());
        assert!(ManipulationConfig::default()
            .with_selection_radius(-1.0)
            .validate()
            .is_err());
    }
}
