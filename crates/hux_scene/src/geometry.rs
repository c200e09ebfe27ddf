//! Geometry components attached to scene nodes.
//!
//! Each component describes its extents in the local space of the node that carries
//! it. Bounds aggregation samples points from these and converts them into the
//! space of the object being measured.

use glam::{Affine3A, Vec2, Vec3};
use hux_core::{Aabb, Axis};
use serde::{Deserialize, Serialize};

/// Shape of a collider component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with local center and full size
    Box { center: Vec3, size: Vec3 },
    /// Sphere with local center and radius
    Sphere { center: Vec3, radius: f32 },
    /// Capsule whose height runs along `direction`
    Capsule {
        center: Vec3,
        radius: f32,
        height: f32,
        direction: Axis,
    },
    /// Mesh collider using its shared mesh bounds
    Mesh { mesh_bounds: Aabb },
    /// Any shape bounds aggregation does not understand (terrain, wheels, ...)
    Unsupported,
}

impl ColliderShape {
    /// Sample points in node-local space.
    ///
    /// Boxes and mesh colliders yield their 8 corners. Spheres yield the 6 face
    /// centers of the cube of their diameter. Capsules yield the 6 face centers of
    /// the box that is `height` long along the capsule direction and a diameter
    /// wide elsewhere. Unsupported shapes yield nothing.
    pub fn sample_points(&self) -> Vec<Vec3> {
        match *self {
            ColliderShape::Box { center, size } => {
                Aabb::from_center_size(center, size).corners().to_vec()
            }
            ColliderShape::Sphere { center, radius } => {
                Aabb::from_center_size(center, Vec3::splat(radius * 2.0))
                    .face_centers()
                    .to_vec()
            }
            ColliderShape::Capsule {
                center,
                radius,
                height,
                direction,
            } => {
                let mut size = Vec3::splat(radius * 2.0);
                direction.set(&mut size, height);
                Aabb::from_center_size(center, size).face_centers().to_vec()
            }
            ColliderShape::Mesh { mesh_bounds } => mesh_bounds.corners().to_vec(),
            ColliderShape::Unsupported => Vec::new(),
        }
    }
}

/// A geometry component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Mesh filter with the local bounds of its mesh
    MeshFilter { mesh_bounds: Aabb },
    /// Flat UI rectangle in the node's XY plane
    Rect { min: Vec2, max: Vec2 },
    /// Renderer with the local bounds of what it draws
    Renderer { local_bounds: Aabb },
    /// Physics collider
    Collider(ColliderShape),
}

impl Geometry {
    /// Mesh filter holding a unit cube centered on the node
    pub fn unit_cube_mesh() -> Self {
        Geometry::MeshFilter {
            mesh_bounds: Aabb::from_center_size(Vec3::ZERO, Vec3::ONE),
        }
    }

    /// Corners of a rect component in node-local space, or `None` for other kinds
    pub fn rect_corners(&self) -> Option<[Vec3; 4]> {
        match *self {
            Geometry::Rect { min, max } => Some([
                Vec3::new(min.x, min.y, 0.0),
                Vec3::new(min.x, max.y, 0.0),
                Vec3::new(max.x, max.y, 0.0),
                Vec3::new(max.x, min.y, 0.0),
            ]),
            _ => None,
        }
    }

    /// World-space axis-aligned bounds of a renderer given its node's world matrix
    pub fn renderer_world_bounds(&self, world: &Affine3A) -> Option<Aabb> {
        match self {
            Geometry::Renderer { local_bounds } => Some(local_bounds.transform(world)),
            _ => None,
        }
    }
}
