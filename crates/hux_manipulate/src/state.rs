//! Observable manipulation state

use crate::operation::{Operation, Operations};

/// What the gizmo and the app bar read from a manipulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulationState {
    pub current_operation: Operation,
    /// Handle grabbed by the current gesture
    pub active_handle: Option<usize>,
    /// Handle the pointer would grab if pressed now
    pub hovered_handle: Option<usize>,
    pub permitted_operations: Operations,
    pub accept_input: bool,
    /// True strictly between selection and release
    pub manipulating_now: bool,
}

impl ManipulationState {
    /// Idle state with the given permissions
    pub fn new(permitted_operations: Operations) -> Self {
        Self {
            current_operation: Operation::None,
            active_handle: None,
            hovered_handle: None,
            permitted_operations,
            accept_input: false,
            manipulating_now: false,
        }
    }

    /// Drop any gesture, keeping permissions and input gating
    pub fn clear_gesture(&mut self) {
        self.current_operation = Operation::None;
        self.active_handle = None;
        self.hovered_handle = None;
        self.manipulating_now = false;
    }
}

impl Default for ManipulationState {
    fn default() -> Self {
        Self::new(Operations::default())
    }
}
