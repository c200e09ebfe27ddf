//! Gizmo frame layout

use glam::{Quat, Vec3};
use hux_core::{Axis, HuxError, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::BoundsSnapshot;

/// Box with a world-space center, rotation and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub rotation: Quat,
    pub size: Vec3,
}

impl OrientedBox {
    /// Create a new oriented box
    pub fn new(center: Vec3, rotation: Quat, size: Vec3) -> Self {
        Self { center, rotation, size }
    }

    /// Half of the full size
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size.abs() * 0.5
    }

    /// Box-space offset to world space
    #[inline]
    pub fn to_world(&self, offset: Vec3) -> Vec3 {
        self.center + self.rotation * offset
    }

    /// World point to box-space offset
    #[inline]
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.center)
    }

    /// World-space direction of a box axis
    #[inline]
    pub fn axis_direction(&self, axis: Axis) -> Vec3 {
        self.rotation * axis.unit()
    }

    /// Whether a world point lies inside the box
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.to_local(point).abs();
        let half = self.half_extents();
        local.cmple(half + Vec3::splat(1e-5)).all()
    }

    /// Distance along a ray to the box, using the slab test in box space.
    ///
    /// Returns `Some(0.0)` when the origin is already inside.
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return self.contains(origin).then_some(0.0);
        }
        let o = self.to_local(origin);
        let d = self.rotation.inverse() * direction;
        let half = self.half_extents();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in Axis::ALL {
            let (o, d, h) = (axis.get(o), axis.get(d), axis.get(half));
            if d.abs() < 1e-8 {
                if o.abs() > h {
                    return None;
                }
                continue;
            }
            let t1 = (-h - o) / d;
            let t2 = (h - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        if t_max < t_min || t_max < 0.0 {
            None
        } else {
            Some(t_min.max(0.0))
        }
    }
}

/// Gizmo layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Padding added to each axis, as a fraction of the largest dimension
    pub scale_padding: f32,
    /// Padding added to a flattened axis, as a fraction of the largest dimension
    pub flattened_scale_padding: f32,
    /// Clamp handle size to `[handle_scale_min, handle_scale_max]`
    pub clamp_handle_scale: bool,
    pub handle_scale_min: f32,
    pub handle_scale_max: f32,
    /// Draw box edges while the manipulator is not accepting input
    pub display_edges_when_selected: bool,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            scale_padding: 0.05,
            flattened_scale_padding: 0.0,
            clamp_handle_scale: false,
            handle_scale_min: 0.1,
            handle_scale_max: 2.0,
            display_edges_when_selected: true,
        }
    }
}

impl GizmoConfig {
    /// Set both paddings
    pub fn with_padding(mut self, padding: f32, flattened_padding: f32) -> Self {
        self.scale_padding = padding;
        self.flattened_scale_padding = flattened_padding;
        self
    }

    /// Enable handle size clamping
    pub fn with_handle_clamp(mut self, min: f32, max: f32) -> Self {
        self.clamp_handle_scale = true;
        self.handle_scale_min = min;
        self.handle_scale_max = max;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.scale_padding < 0.0 || self.flattened_scale_padding < 0.0 {
            return Err(HuxError::InvalidConfig(
                "gizmo padding must not be negative".to_string(),
            ));
        }
        if self.clamp_handle_scale && self.handle_scale_min > self.handle_scale_max {
            return Err(HuxError::InvalidConfig(format!(
                "handle_scale_min {} exceeds handle_scale_max {}",
                self.handle_scale_min, self.handle_scale_max
            )));
        }
        Ok(())
    }

    /// Lay out the frame drawn around a snapshot
    pub fn frame(&self, snapshot: &BoundsSnapshot) -> GizmoFrame {
        let largest = snapshot.largest_dimension();
        let mut size = snapshot.scale;
        for axis in Axis::ALL {
            let padding = if snapshot.flattened_axis == Some(axis) {
                self.flattened_scale_padding
            } else {
                self.scale_padding
            };
            let current = axis.get(size);
            axis.set(&mut size, current + largest * padding);
        }

        let mut handle_size = size.min_element();
        if self.clamp_handle_scale {
            handle_size = handle_size.clamp(self.handle_scale_min, self.handle_scale_max);
        }

        GizmoFrame {
            bounds: OrientedBox::new(snapshot.world_center, snapshot.rotation, size),
            handle_size,
            flattened_axis: snapshot.flattened_axis,
        }
    }
}

/// The padded box the gizmo draws and hit-tests against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoFrame {
    pub bounds: OrientedBox,
    /// Uniform size of every handle
    pub handle_size: f32,
    pub flattened_axis: Option<Axis>,
}
