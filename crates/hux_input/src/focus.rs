//! Focus bookkeeping

use log::trace;

/// Tracks whether something has focus and when it last lost it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FocusTracker {
    has_focus: bool,
    last_focus_exit: f32,
}

impl FocusTracker {
    /// New tracker without focus, last exit at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus entered at `now`
    pub fn enter(&mut self, now: f32) {
        if !self.has_focus {
            trace!("Focus enter at {:.3}", now);
        }
        self.has_focus = true;
    }

    /// Focus exited at `now`. Ignored when focus was not held.
    pub fn exit(&mut self, now: f32) {
        if self.has_focus {
            trace!("Focus exit at {:.3}", now);
            self.has_focus = false;
            self.last_focus_exit = now;
        }
    }

    /// Move the last exit time to `now` without changing focus
    pub fn restart_exit_clock(&mut self, now: f32) {
        self.last_focus_exit = now;
    }

    /// Apply a focus state, producing enter/exit edges
    pub fn set(&mut self, focused: bool, now: f32) {
        if focused {
            self.enter(now);
        } else {
            self.exit(now);
        }
    }

    /// Whether focus is held
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// When focus was last lost
    pub fn last_focus_exit(&self) -> f32 {
        self.last_focus_exit
    }

    /// Forget focus state, treating `now` as the last exit
    pub fn reset(&mut self, now: f32) {
        self.has_focus = false;
        self.last_focus_exit = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_records_time_once() {
        let mut focus = FocusTracker::new();
        focus.enter(1.0);
        assert!(focus.has_focus());
        focus.exit(2.0);
        focus.exit(3.0);
        assert!(!focus.has_focus());
        assert_eq!(focus.last_focus_exit(), 2.0);
    }

    #[test]
    fn test_set_produces_edges() {
        let mut focus = FocusTracker::new();
        focus.set(true, 0.5);
        focus.set(true, 0.6);
        focus.set(false, 0.7);
        assert_eq!(focus.last_focus_exit(), 0.7);
    }
}
