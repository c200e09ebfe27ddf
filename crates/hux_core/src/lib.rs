//! # hux_core - HUX Core
//!
//! Shared primitives for the manipulation toolkit:
//! - **Ids**: generational node identifiers, safe across target destruction
//! - **Transforms**: position / rotation / non-uniform scale with point conversion
//! - **Axes**: the three local axes used by flattening and rotation handles
//! - **Bounds**: axis-aligned boxes grown by successive encapsulation
//! - **Errors**: the common error type
//!
//! Everything here is plain data. The per-frame systems live in the crates that
//! build on top of it.

pub mod axis;
pub mod bounds;
pub mod error;
pub mod id;
pub mod transform;

pub use axis::*;
pub use bounds::*;
pub use error::*;
pub use id::*;
pub use transform::*;

/// Re-export of the math types used across the toolkit
pub use glam::{Affine3A, Quat, Vec3};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::bounds::Aabb;
    pub use crate::error::{HuxError, Result};
    pub use crate::id::NodeId;
    pub use crate::transform::Transform;
    pub use glam::{Quat, Vec3};
}
