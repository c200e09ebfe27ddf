//! # hux_scene - Scene Graph Contract
//!
//! The manipulation toolkit never owns the objects it measures or moves. This crate
//! defines what it needs from the host:
//!
//! - [`SceneGraph`]: local transforms, the parent/child hierarchy, layers and the
//!   geometry attached to each node, plus point conversion built on top of those
//! - [`Geometry`]: mesh filters, UI rects, renderers and collider shapes
//! - [`Scene`]: an in-memory implementation used by the runtime and by tests
//!
//! ## Example
//!
//! ```ignore
//! use hux_scene::prelude::*;
//!
//! let mut scene = Scene::new();
//! let cube = scene.spawn("cube", Transform::IDENTITY);
//! scene.add_geometry(cube, Geometry::unit_cube_mesh())?;
//! let world = scene.transform_point(cube, Vec3::ONE * 0.5);
//! ```

pub mod geometry;
pub mod graph;
pub mod scene;

pub use geometry::*;
pub use graph::*;
pub use scene::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::geometry::{ColliderShape, Geometry};
    pub use crate::graph::SceneGraph;
    pub use crate::scene::Scene;
    pub use hux_core::prelude::*;
}
