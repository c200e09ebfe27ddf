//! Hand and controller normalization

use log::debug;

use crate::config::InputConfig;
use crate::pointer::{Hand, PointerSample, Pose};

/// Raw hand tracking state for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub tracked: bool,
    /// Pose of the pinch point
    pub pose: Pose,
    /// Pinch gesture (thumb + index), 0.0 - 1.0
    pub pinch_strength: f32,
}

/// Raw controller state for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerFrame {
    pub tracked: bool,
    /// Aim pose (where controller points)
    pub aim_pose: Pose,
    /// Trigger value (0.0 - 1.0)
    pub trigger: f32,
}

/// Turns hand frames into pointer samples
#[derive(Debug, Clone)]
pub struct HandNormalizer {
    config: InputConfig,
    hand: Option<Hand>,
    visible_time: f32,
    pressed: bool,
}

impl HandNormalizer {
    /// Create a normalizer
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            hand: None,
            visible_time: 0.0,
            pressed: false,
        }
    }

    /// Tag the normalizer with the hand it reads, for logging
    pub fn for_hand(mut self, hand: Hand) -> Self {
        self.hand = Some(hand);
        self
    }

    /// Whether the hand has been tracked long enough to count as visible
    pub fn is_visible(&self) -> bool {
        self.visible_time >= self.config.hand_min_visible_time
    }

    /// Whether the hand is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `None` while the hand is untracked or not yet visible. Losing tracking
    /// resets the visible time and releases the press.
    pub fn update(&mut self, dt: f32, frame: Option<&HandFrame>) -> Option<PointerSample> {
        let frame = match frame.filter(|f| f.tracked) {
            Some(frame) => frame,
            None => {
                if self.pressed {
                    debug!("Hand {:?} lost while pressed", self.hand);
                }
                self.visible_time = 0.0;
                self.pressed = false;
                return None;
            }
        };

        self.visible_time += dt;
        if !self.is_visible() {
            return None;
        }

        let threshold = if self.pressed {
            self.config.pinch_release_threshold
        } else {
            self.config.pinch_press_threshold
        };
        let pressed = frame.pinch_strength >= threshold;
        if pressed != self.pressed {
            debug!(
                "Hand {:?} {} (pinch {:.2})",
                self.hand,
                if pressed { "pressed" } else { "released" },
                frame.pinch_strength
            );
        }
        self.pressed = pressed;

        Some(PointerSample {
            pressed,
            pose: frame.pose,
            targeting: self.config.hand_targeting,
        })
    }
}

/// Turns controller frames into pointer samples
#[derive(Debug, Clone)]
pub struct ControllerNormalizer {
    config: InputConfig,
    pressed: bool,
}

impl ControllerNormalizer {
    /// Create a normalizer
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            pressed: false,
        }
    }

    /// Advance one frame. Untracked controllers produce nothing.
    pub fn update(&mut self, frame: Option<&ControllerFrame>) -> Option<PointerSample> {
        let Some(frame) = frame.filter(|f| f.tracked) else {
            self.pressed = false;
            return None;
        };

        let pressed = frame.trigger >= self.config.trigger_threshold;
        if pressed != self.pressed {
            debug!("Controller trigger {}", if pressed { "pressed" } else { "released" });
        }
        self.pressed = pressed;

        Some(PointerSample {
            pressed,
            pose: frame.aim_pose,
            targeting: self.config.controller_targeting,
        })
    }
}
