//! # hux_appbar - App Bar
//!
//! The button bar that floats beside a bounding box and drives its mode.
//!
//! ## Features
//!
//! - **States**: Default, Manipulation, Hidden and Invisible, with the bounding box
//!   only accepting input while in Manipulation
//! - **Buttons**: built-in Remove / Adjust / Done / Hide / Show plus up to five
//!   custom buttons, keyed by [`ButtonType`]
//! - **Follow**: sits below the box face nearest the viewer, turning to face the box
//! - **Timeout**: goes invisible once neither bar nor box has had focus for a while
//!
//! ## Example
//!
//! ```ignore
//! use hux_appbar::prelude::*;
//!
//! let mut bar = AppBar::new(AppBarConfig::default().with_timeout(10.0))?;
//! bar.start(&mut factory);
//!
//! // Every frame, after the manipulator has stepped
//! bar.tick(dt, now, head_position, &mut manipulator);
//! ```

pub mod appbar;
pub mod button;
pub mod config;
pub mod layout;
pub mod state;

pub use appbar::*;
pub use button::*;
pub use config::*;
pub use layout::*;
pub use state::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::appbar::AppBar;
    pub use crate::button::{
        BuiltInButtons, ButtonFactory, ButtonHandle, ButtonTemplate, ButtonType, CountingFactory,
    };
    pub use crate::config::{AppBarConfig, DisplayType};
    pub use crate::layout::ButtonLayout;
    pub use crate::state::AppBarState;
}
