//! Bounds aggregation settings

use hux_core::{Axis, HuxError, Result};
use serde::{Deserialize, Serialize};

/// Where bounds come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoundsMethod {
    /// Mesh filter bounds plus the corners of UI rects. Best for flat objects
    #[default]
    MeshFilterBounds,
    /// Renderer bounds. Handles non-mesh renderers but is looser
    RendererBounds,
    /// Collider shapes, for precise manual control
    Colliders,
    /// Whatever the default source is (renderer bounds)
    Default,
}

impl BoundsMethod {
    /// The concrete method used for aggregation
    pub fn resolve(self) -> BoundsMethod {
        match self {
            BoundsMethod::Default => BoundsMethod::RendererBounds,
            other => other,
        }
    }
}

/// Flattening preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlattenMode {
    /// Never flatten
    DoNotFlatten,
    /// Always flatten X
    FlattenX,
    /// Always flatten Y
    FlattenY,
    /// Always flatten Z
    FlattenZ,
    /// Flatten the first of Z, Y, X that is thin relative to the largest axis
    #[default]
    FlattenAuto,
}

impl FlattenMode {
    /// The axis an explicit mode flattens
    pub fn explicit_axis(self) -> Option<Axis> {
        match self {
            FlattenMode::FlattenX => Some(Axis::X),
            FlattenMode::FlattenY => Some(Axis::Y),
            FlattenMode::FlattenZ => Some(Axis::Z),
            FlattenMode::DoNotFlatten | FlattenMode::FlattenAuto => None,
        }
    }
}

/// Non-fatal operator advisory about a settings combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsAdvisory {
    /// Flattening renderer bounds may distort the box; mesh filter bounds are better
    FlattenWithRendererBounds,
}

impl std::fmt::Display for BoundsAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsAdvisory::FlattenWithRendererBounds => write!(
                f,
                "renderer bounds may result in distortion for flattened objects; \
                 mesh filter bounds are recommended"
            ),
        }
    }
}

/// Bounds aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsSettings {
    /// Mesh filters and renderers on this layer are skipped
    pub ignore_layer: u32,
    /// Flattening behavior
    pub flatten_preference: FlattenMode,
    /// Geometry source
    pub method: BoundsMethod,
    /// Relative size an axis must fall below to be auto-flattened
    pub flatten_threshold: f32,
    /// Relative size of a flattened axis
    pub flatten_thickness: f32,
}

impl Default for BoundsSettings {
    fn default() -> Self {
        Self {
            ignore_layer: 2,
            flatten_preference: FlattenMode::FlattenAuto,
            method: BoundsMethod::MeshFilterBounds,
            flatten_threshold: 0.025,
            flatten_thickness: 0.01,
        }
    }
}

impl BoundsSettings {
    /// Set the geometry source
    pub fn with_method(mut self, method: BoundsMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the flattening behavior
    pub fn with_flatten_preference(mut self, preference: FlattenMode) -> Self {
        self.flatten_preference = preference;
        self
    }

    /// Set the ignored layer
    pub fn with_ignore_layer(mut self, layer: u32) -> Self {
        self.ignore_layer = layer;
        self
    }

    /// Set threshold and thickness
    pub fn with_flatten_limits(mut self, threshold: f32, thickness: f32) -> Self {
        self.flatten_threshold = threshold;
        self.flatten_thickness = thickness;
        self
    }

    /// Advisories for this combination of settings
    pub fn advisories(&self) -> Vec<BoundsAdvisory> {
        let mut out = Vec::new();
        if self.flatten_preference != FlattenMode::DoNotFlatten
            && self.method.resolve() == BoundsMethod::RendererBounds
        {
            out.push(BoundsAdvisory::FlattenWithRendererBounds);
        }
        out
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.flatten_threshold > 0.0 && self.flatten_threshold <= 1.0) {
            return Err(HuxError::InvalidConfig(format!(
                "flatten_threshold must be in (0, 1], got {}",
                self.flatten_threshold
            )));
        }
        if !(self.flatten_thickness > 0.0 && self.flatten_thickness <= 1.0) {
            return Err(HuxError::InvalidConfig(format!(
                "flatten_thickness must be in (0, 1], got {}",
                self.flatten_thickness
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(BoundsSettings::default().validate().is_ok());
        assert!(BoundsSettings::default().advisories().is_empty());
    }

    #[test]
    fn test_renderer_flatten_advisory() {
        let settings = BoundsSettings::default().with_method(BoundsMethod::RendererBounds);
        assert_eq!(
            settings.advisories(),
            vec![BoundsAdvisory::FlattenWithRendererBounds]
        );

        let explicit = settings.clone().with_flatten_preference(FlattenMode::FlattenY);
        assert_eq!(explicit.advisories().len(), 1);

        let never = settings.with_flatten_preference(FlattenMode::DoNotFlatten);
        assert!(never.advisories().is_empty());

        // Default resolves to renderer bounds
        let default_method = BoundsSettings::default().with_method(BoundsMethod::Default);
        assert_eq!(default_method.advisories().len(), 1);
    }

    #[test]
    fn test_out_of_range_limits_rejected() {
        assert!(BoundsSettings::default()
            .with_flatten_limits(0.0, 0.01)
            .validate()
            .is_err());
        assert!(BoundsSettings::default()
            .with_flatten_limits(0.025, 1.5)
            .validate()
            .is_err());
    }
}
