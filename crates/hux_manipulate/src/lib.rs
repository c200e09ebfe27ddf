//! # hux_manipulate - Bounding Box Manipulation
//!
//! The gesture state machine that turns pointer motion into target transforms.
//!
//! ## Features
//!
//! - **Operations**: drag, uniform scale, rotation about each local axis, gated by
//!   an [`Operations`] bitset
//! - **Hit testing**: nearest permitted handle within a selection radius, falling
//!   back to a drag on the box volume
//! - **Scale floor**: uniform scale never drops below a fraction of the previous
//!   tick or of the gesture start
//! - **Visuals**: which handles to draw and how, for the current state
//! - **Observers**: [`TargetObserver`] hears about selection changes
//!
//! ## Example
//!
//! ```ignore
//! use hux_manipulate::prelude::*;
//!
//! let mut manipulator = BoundingBoxManipulator::new(
//!     ManipulationConfig::default(),
//!     BoundsSettings::default(),
//!     GizmoConfig::default(),
//! )?;
//! manipulator.set_target(Some(cube));
//! manipulator.set_accept_input(true);
//!
//! // Every frame
//! manipulator.step(&mut scene, pointer.as_ref());
//! let visuals = manipulator.visuals();
//! ```

pub mod config;
pub mod handlers;
pub mod manipulator;
pub mod operation;
pub mod state;
pub mod visuals;

pub use config::*;
pub use handlers::*;
pub use manipulator::*;
pub use operation::*;
pub use state::*;
pub use visuals::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::ManipulationConfig;
    pub use crate::manipulator::{BoundingBoxManipulator, Hit, TargetObserver};
    pub use crate::operation::{Operation, Operations};
    pub use crate::state::ManipulationState;
    pub use crate::visuals::{GizmoVisuals, HandleColor, HandleShape, HandleVisual};
    pub use hux_bounds::{BoundsSettings, FlattenMode, GizmoConfig};
}
