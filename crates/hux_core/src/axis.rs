//! Local axes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three local axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along this axis
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component index (0, 1, 2)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Read this axis' component of a vector
    #[inline]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Write this axis' component of a vector
    #[inline]
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }

    /// The two axes spanning the plane perpendicular to this one, as (horizontal, vertical)
    pub fn plane_axes(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_component_access() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Y.get(v), 2.0);
        Axis::Z.set(&mut v, 9.0);
        assert_eq!(v.z, 9.0);
    }

    #[test]
    fn test_plane_axes_exclude_normal() {
        for axis in Axis::ALL {
            let (u, v) = axis.plane_axes();
            assert_ne!(u, axis);
            assert_ne!(v, axis);
            assert_ne!(u, v);
        }
    }
}
