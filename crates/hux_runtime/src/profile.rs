//! Per-target manipulation profiles

use hux_bounds::FlattenMode;
use hux_manipulate::{BoundingBoxManipulator, Operations};
use log::debug;
use serde::{Deserialize, Serialize};

/// How a particular target may be manipulated, applied when it is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetProfile {
    pub permitted_operations: Operations,
    pub flatten_preference: FlattenMode,
    /// Whether the app bar accompanies this target. Without it the box takes input
    /// directly.
    pub show_app_bar: bool,
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self {
            permitted_operations: Operations::default(),
            flatten_preference: FlattenMode::FlattenAuto,
            show_app_bar: true,
        }
    }
}

impl TargetProfile {
    pub fn with_permitted_operations(mut self, operations: Operations) -> Self {
        self.permitted_operations = operations;
        self
    }

    pub fn with_flatten_preference(mut self, preference: FlattenMode) -> Self {
        self.flatten_preference = preference;
        self
    }

    pub fn with_app_bar(mut self, show: bool) -> Self {
        self.show_app_bar = show;
        self
    }

    /// Push the profile's settings onto a manipulator
    pub fn apply(&self, manipulator: &mut BoundingBoxManipulator) {
        debug!(
            "Applying profile: {:?}, {:?}, app bar {}",
            self.permitted_operations, self.flatten_preference, self.show_app_bar
        );
        manipulator.set_permitted_operations(self.permitted_operations);
        manipulator.set_flatten_preference(self.flatten_preference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hux_bounds::{BoundsSettings, GizmoConfig};
    use hux_manipulate::ManipulationConfig;

    #[test]
    fn test_apply_updates_manipulator() {
        let mut manipulator = BoundingBoxManipulator::new(
            ManipulationConfig::default(),
            BoundsSettings::default(),
            GizmoConfig::default(),
        )
        .unwrap();
        TargetProfile::default()
            .with_permitted_operations(Operations::DRAG)
            .with_flatten_preference(FlattenMode::FlattenX)
            .apply(&mut manipulator);
        assert_eq!(manipulator.state().permitted_operations, Operations::DRAG);
        assert_eq!(
            manipulator.bounds_settings().flatten_preference,
            FlattenMode::FlattenX
        );
    }
}
