//! Axis-aligned bounds used for mesh, renderer and collider extents

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Zero-size box at the origin
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create from min and max points
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Zero-size box at a point, the seed for successive encapsulation
    #[inline]
    pub const fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Create from center and full size
    #[inline]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::from_point(*first);
        for &point in rest {
            aabb.encapsulate(point);
        }
        Some(aabb)
    }

    /// Get the center point
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (full extents)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the half-extents
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow to include a point
    #[inline]
    pub fn encapsulate(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// The 8 corners
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// The centers of the 6 faces
    pub fn face_centers(&self) -> [Vec3; 6] {
        let c = self.center();
        [
            Vec3::new(self.min.x, c.y, c.z),
            Vec3::new(self.max.x, c.y, c.z),
            Vec3::new(c.x, self.min.y, c.z),
            Vec3::new(c.x, self.max.y, c.z),
            Vec3::new(c.x, c.y, self.min.z),
            Vec3::new(c.x, c.y, self.max.z),
        ]
    }

    /// Transform by a matrix (result is still axis-aligned in the new space)
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = self.corners();
        let mut result = Self::from_point(matrix.transform_point3(corners[0]));
        for corner in &corners[1..] {
            result.encapsulate(matrix.transform_point3(*corner));
        }
        result
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::ZERO
    }
}
