//! # hux_input - Pointer Input
//!
//! Turns raw device state into the one stream the manipulation code consumes:
//! a [`PointerSample`] of `pressed / position / rotation` plus a targeting rule.
//!
//! - **Hands**: pressed on a pinch over a threshold, with hysteresis, and only once
//!   the hand has been visible for a minimum time
//! - **Controllers**: pressed when the trigger crosses a threshold
//! - **Focus**: enter/exit bookkeeping with the time focus was last lost
//!
//! ## Example
//!
//! ```ignore
//! use hux_input::prelude::*;
//!
//! let mut hands = HandNormalizer::new(InputConfig::default());
//! if let Some(sample) = hands.update(dt, Some(&hand_frame)) {
//!     manipulator.handle_input(&mut scene, Some(&sample));
//! }
//! ```

pub mod config;
pub mod focus;
pub mod normalize;
pub mod pointer;

pub use config::*;
pub use focus::*;
pub use normalize::*;
pub use pointer::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::InputConfig;
    pub use crate::focus::FocusTracker;
    pub use crate::normalize::{ControllerFrame, ControllerNormalizer, HandFrame, HandNormalizer};
    pub use crate::pointer::{Hand, PointerSample, Pose, Targeting};
}
