//! # hux_runtime - Session Runtime
//!
//! Wires the toolkit together for a host application.
//!
//! - [`HuxConfig`]: every section's settings, loaded from TOML
//! - [`TargetProfile`]: per-target permissions, flattening and app bar choice
//! - [`ManipulationSession`]: one manipulator plus its app bar, stepped in a fixed
//!   order from a [`FrameInput`] to a [`FrameOutput`]
//!
//! The `hux_sim` binary runs a scripted session against an in-memory scene.
//!
//! ## Example
//!
//! ```ignore
//! use hux_runtime::prelude::*;
//!
//! let config = HuxConfig::from_env()?;
//! let mut session = ManipulationSession::new(config)?;
//! session.start(&mut factory);
//! session.select(&scene, Some(cube), Some("poster"));
//!
//! loop {
//!     let output = session.step(&mut scene, &frame_input);
//!     render(&output.visuals, &output.buttons);
//! }
//! ```

pub mod config;
pub mod error;
pub mod profile;
pub mod session;

pub use config::*;
pub use error::*;
pub use profile::*;
pub use session::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{HuxConfig, CONFIG_ENV};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::profile::TargetProfile;
    pub use crate::session::{
        FocusEvent, FocusTarget, FrameInput, FrameOutput, ManipulationSession, PointerDevice,
    };
}
