//! Manipulation session
//!
//! Composes one manipulator, one app bar and the input normalizers, and runs them
//! in a fixed order each frame:
//!
//! 1. focus events
//! 2. input normalization
//! 3. bounds, handles and the gesture state machine
//! 4. app bar taps and tick, which gate input for the next frame

use glam::Vec3;
use hux_appbar::{AppBar, AppBarState, ButtonFactory, ButtonLayout, ButtonType};
use hux_bounds::BoundsSnapshot;
use hux_core::NodeId;
use hux_input::{
    ControllerFrame, ControllerNormalizer, Hand, HandFrame, HandNormalizer, PointerSample,
};
use hux_manipulate::{BoundingBoxManipulator, GizmoVisuals, ManipulationState};
use hux_scene::SceneGraph;
use log::{debug, info, trace};

use crate::config::HuxConfig;
use crate::error::ConfigResult;
use crate::profile::TargetProfile;

/// What received or lost focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    BoundingBox,
    AppBar,
}

/// Focus change reported by the host's focus system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Enter(FocusTarget),
    Exit(FocusTarget),
}

/// Device a pointer sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerDevice {
    Controller,
    Hand(Hand),
}

/// Everything the host feeds in for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Viewer head position
    pub head: Vec3,
    pub left_hand: Option<HandFrame>,
    pub right_hand: Option<HandFrame>,
    pub controller: Option<ControllerFrame>,
    pub focus: Vec<FocusEvent>,
    /// App bar buttons tapped this frame
    pub taps: Vec<ButtonType>,
}

impl FrameInput {
    /// Empty frame of `dt` seconds
    pub fn idle(dt: f32, head: Vec3) -> Self {
        Self {
            dt,
            head,
            ..Self::default()
        }
    }

    pub fn with_controller(mut self, frame: ControllerFrame) -> Self {
        self.controller = Some(frame);
        self
    }

    pub fn with_hand(mut self, hand: Hand, frame: HandFrame) -> Self {
        match hand {
            Hand::Left => self.left_hand = Some(frame),
            Hand::Right => self.right_hand = Some(frame),
        }
        self
    }

    pub fn with_focus(mut self, event: FocusEvent) -> Self {
        self.focus.push(event);
        self
    }

    pub fn with_tap(mut self, button: ButtonType) -> Self {
        self.taps.push(button);
        self
    }
}

/// What the host reads back after a frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub time: f32,
    pub target: Option<NodeId>,
    pub snapshot: BoundsSnapshot,
    pub manipulation: ManipulationState,
    pub visuals: GizmoVisuals,
    pub app_bar: AppBarState,
    pub app_bar_visible: bool,
    pub buttons: Vec<ButtonLayout>,
    /// Taps the app bar accepted this frame
    pub accepted_taps: Vec<ButtonType>,
}

/// One manipulator and its app bar, stepped together
pub struct ManipulationSession {
    config: HuxConfig,
    manipulator: BoundingBoxManipulator,
    app_bar: AppBar,
    left_hand: HandNormalizer,
    right_hand: HandNormalizer,
    controller: ControllerNormalizer,
    profile: TargetProfile,
    /// Device that drove the latest frame; owns the gesture while one is running
    pointer_device: Option<PointerDevice>,
    /// Head position from the latest frame
    head: Vec3,
    time: f32,
}

impl ManipulationSession {
    /// Build a session from validated configuration
    pub fn new(config: HuxConfig) -> ConfigResult<Self> {
        config.validate()?;
        let manipulator = BoundingBoxManipulator::new(
            config.manipulation.clone(),
            config.bounds.clone(),
            config.gizmo.clone(),
        )?;
        let app_bar = AppBar::new(config.app_bar.clone())?;
        Ok(Self {
            left_hand: HandNormalizer::new(config.input.clone()).for_hand(Hand::Left),
            right_hand: HandNormalizer::new(config.input.clone()).for_hand(Hand::Right),
            controller: ControllerNormalizer::new(config.input.clone()),
            manipulator,
            app_bar,
            profile: TargetProfile::default(),
            pointer_device: None,
            head: Vec3::ZERO,
            time: 0.0,
            config,
        })
    }

    /// Build the app bar's buttons
    pub fn start(&mut self, factory: &mut dyn ButtonFactory) {
        self.app_bar.start(factory);
    }

    /// Select a target with a named profile, or clear the selection.
    ///
    /// The app bar snaps back to its default state next to the new target.
    pub fn select<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &S,
        target: Option<NodeId>,
        profile: Option<&str>,
    ) {
        self.profile = self.config.profile(profile);
        self.manipulator.set_target(target);
        self.profile.apply(&mut self.manipulator);
        self.manipulator.refresh_bounds(scene);
        self.manipulator.refresh_handles();
        if self.profile.show_app_bar {
            self.app_bar.reset(self.time, self.head, &mut self.manipulator);
        } else {
            self.manipulator.set_accept_input(target.is_some());
        }
        info!("Session selected {:?} (profile {:?})", target, profile);
    }

    /// Run one frame
    pub fn step(&mut self, scene: &mut dyn SceneGraph, input: &FrameInput) -> FrameOutput {
        self.time += input.dt;
        self.head = input.head;
        let now = self.time;

        for event in &input.focus {
            match *event {
                FocusEvent::Enter(FocusTarget::BoundingBox) => self.manipulator.focus_enter(now),
                FocusEvent::Exit(FocusTarget::BoundingBox) => self.manipulator.focus_exit(now),
                FocusEvent::Enter(FocusTarget::AppBar) => self.app_bar.focus_enter(now),
                FocusEvent::Exit(FocusTarget::AppBar) => self.app_bar.focus_exit(now),
            }
        }

        let pointer = self.pointer(input);
        trace!("Frame {:.3}: pointer {:?}", now, pointer);
        self.manipulator.step(scene, pointer.as_ref());

        let mut accepted_taps = Vec::new();
        if self.profile.show_app_bar {
            for &button in &input.taps {
                if self.app_bar.tap(button, now, scene, &mut self.manipulator) {
                    accepted_taps.push(button);
                }
            }
            self.app_bar.tick(input.dt, now, input.head, &mut self.manipulator);
        } else if !input.taps.is_empty() {
            debug!("Dropping {} taps, app bar disabled", input.taps.len());
        }

        FrameOutput {
            time: now,
            target: self.manipulator.target(),
            snapshot: *self.manipulator.snapshot(),
            manipulation: *self.manipulator.state(),
            visuals: self.manipulator.visuals(),
            app_bar: self.app_bar.state(),
            app_bar_visible: self.profile.show_app_bar && self.app_bar.is_visible(),
            buttons: self.app_bar.button_layout(),
            accepted_taps,
        }
    }

    /// Drop the selection and all transient state
    pub fn reset(&mut self) {
        self.manipulator.reset();
        self.profile = TargetProfile::default();
        self.left_hand = HandNormalizer::new(self.config.input.clone()).for_hand(Hand::Left);
        self.right_hand = HandNormalizer::new(self.config.input.clone()).for_hand(Hand::Right);
        self.controller = ControllerNormalizer::new(self.config.input.clone());
        self.pointer_device = None;
        self.time = 0.0;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn manipulator(&self) -> &BoundingBoxManipulator {
        &self.manipulator
    }

    pub fn manipulator_mut(&mut self) -> &mut BoundingBoxManipulator {
        &mut self.manipulator
    }

    pub fn app_bar(&self) -> &AppBar {
        &self.app_bar
    }

    pub fn config(&self) -> &HuxConfig {
        &self.config
    }

    /// Device currently driving the manipulator
    pub fn pointer_device(&self) -> Option<PointerDevice> {
        self.pointer_device
    }

    /// Normalize every device, then pick one sample.
    ///
    /// While a gesture runs only the device that started it is read, so it ends when
    /// that device releases or loses tracking. Otherwise the controller wins, then the
    /// right hand, then the left hand.
    fn pointer(&mut self, input: &FrameInput) -> Option<PointerSample> {
        let controller = self.controller.update(input.controller.as_ref());
        let right = self.right_hand.update(input.dt, input.right_hand.as_ref());
        let left = self.left_hand.update(input.dt, input.left_hand.as_ref());
        let sample_of = |device| match device {
            PointerDevice::Controller => controller,
            PointerDevice::Hand(Hand::Right) => right,
            PointerDevice::Hand(Hand::Left) => left,
        };

        if self.manipulator.state().manipulating_now {
            if let Some(owner) = self.pointer_device {
                return sample_of(owner);
            }
        }

        let device = [
            PointerDevice::Controller,
            PointerDevice::Hand(Hand::Right),
            PointerDevice::Hand(Hand::Left),
        ]
        .into_iter()
        .find(|&device| sample_of(device).is_some());
        if device != self.pointer_device {
            debug!("Pointer device {:?} -> {:?}", self.pointer_device, device);
        }
        self.pointer_device = device;
        device.and_then(sample_of)
    }
}
