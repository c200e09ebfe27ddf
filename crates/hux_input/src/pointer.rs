//! Pointer samples

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Which hand a device belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

/// Pose (position + orientation)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Pose at a position with no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Forward direction (-Z)
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

/// How a pointer picks handles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Targeting {
    /// Along a ray from the pointer position in its forward direction
    #[default]
    Ray,
    /// By distance from the pointer position
    Proximity,
}

/// One frame of normalized pointer state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pressed: bool,
    pub pose: Pose,
    pub targeting: Targeting,
}

impl PointerSample {
    /// Ray-targeting sample
    pub fn ray(pressed: bool, position: Vec3, rotation: Quat) -> Self {
        Self {
            pressed,
            pose: Pose::new(position, rotation),
            targeting: Targeting::Ray,
        }
    }

    /// Proximity-targeting sample
    pub fn proximity(pressed: bool, position: Vec3) -> Self {
        Self {
            pressed,
            pose: Pose::from_position(position),
            targeting: Targeting::Proximity,
        }
    }

    /// World position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// World rotation
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.pose.orientation
    }

    /// Ray direction (forward of the pose)
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.pose.forward()
    }

    /// Distance used to rank a point for selection.
    ///
    /// Ray targeting measures the perpendicular distance from the point to the ray
    /// (points behind the origin measure to the origin); proximity targeting
    /// measures straight-line distance.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        match self.targeting {
            Targeting::Proximity => self.position().distance(point),
            Targeting::Ray => {
                let dir = self.direction().normalize_or_zero();
                let to_point = point - self.position();
                let t = to_point.dot(dir).max(0.0);
                (to_point - dir * t).length()
            }
        }
    }
}
