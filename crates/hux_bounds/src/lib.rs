//! # hux_bounds - Bounds and Handles
//!
//! Measures a target and lays out the affordances drawn around it.
//!
//! - [`compute_bounds`] gathers geometry under a target, merges it in the target's
//!   local space and applies the flatten policy, producing a [`BoundsSnapshot`]
//! - [`GizmoConfig::frame`] pads the snapshot into the oriented box the gizmo draws
//! - [`HandleSet::compute`] places the scale and rotate handles on that box, as
//!   8 corners + 12 edge midpoints, or 4 + 4 in the plane of a flattened box
//!
//! Everything here is a pure function of scene state and settings, safe to call
//! every frame.

pub mod aggregate;
pub mod frame;
pub mod handles;
pub mod settings;

pub use aggregate::*;
pub use frame::*;
pub use handles::{HandleRole, HandleSet};
pub use settings::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{compute_bounds, BoundsSnapshot};
    pub use crate::frame::{GizmoConfig, GizmoFrame, OrientedBox};
    pub use crate::handles::{HandleRole, HandleSet};
    pub use crate::settings::{BoundsAdvisory, BoundsMethod, BoundsSettings, FlattenMode};
}
