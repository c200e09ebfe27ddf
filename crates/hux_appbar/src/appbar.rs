//! App bar controller
//!
//! ```text
//!            Adjust              Hide
//!   Default ───────▶ Manipulation    Default ─────▶ Hidden
//!      ▲      Done       │              ▲   Show      │
//!      └─────────────────┘              └─────────────┘
//!
//!   Default | Manipulation | Hidden ──timeout──▶ Invisible ──show()──▶ Default
//! ```

use glam::{Quat, Vec3};
use hux_core::{HuxError, Result};
use hux_input::FocusTracker;
use hux_manipulate::BoundingBoxManipulator;
use hux_scene::SceneGraph;
use log::{debug, info, trace, warn};

use crate::button::{ButtonFactory, ButtonHandle, ButtonTemplate, ButtonType, MAX_CUSTOM_BUTTONS};
use crate::config::{AppBarConfig, DisplayType};
use crate::layout::{anchor, slot_offset, ButtonLayout};
use crate::state::AppBarState;

/// App bar attached to a bounding box manipulator
pub struct AppBar {
    config: AppBarConfig,
    custom: Vec<ButtonTemplate>,
    buttons: Vec<(ButtonTemplate, ButtonHandle)>,
    state: AppBarState,
    focus: FocusTracker,
    last_tap: Option<f32>,
    bar_width: f32,
    position: Vec3,
    rotation: Quat,
    visible: bool,
}

impl AppBar {
    /// Create a bar. Buttons are built by [`AppBar::start`].
    pub fn new(config: AppBarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            custom: Vec::new(),
            buttons: Vec::new(),
            state: AppBarState::Default,
            focus: FocusTracker::new(),
            last_tap: None,
            bar_width: 1.0,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            visible: false,
        })
    }

    /// Add a custom button, shown in the default state.
    ///
    /// Must be called before [`AppBar::start`]; at most five are allowed.
    pub fn add_custom_button(&mut self, template: ButtonTemplate) -> Result<()> {
        if self.custom.len() >= MAX_CUSTOM_BUTTONS {
            return Err(HuxError::TooManyCustomButtons {
                count: self.custom.len() + 1,
                max: MAX_CUSTOM_BUTTONS,
            });
        }
        self.custom.push(ButtonTemplate {
            button_type: ButtonType::Custom,
            ..template
        });
        Ok(())
    }

    /// Build the buttons and enter the default state. Buttons are only built once.
    pub fn start(&mut self, factory: &mut dyn ButtonFactory) {
        self.state = AppBarState::Default;
        if !self.buttons.is_empty() {
            return;
        }

        let custom: Vec<ButtonTemplate> =
            self.custom.iter().filter(|t| !t.is_empty()).cloned().collect();
        let first_custom_slot = usize::from(self.config.buttons.use_hide);
        let mut templates = self.config.buttons.templates(custom.len());
        templates.extend(custom.into_iter().enumerate().map(|(i, template)| ButtonTemplate {
            default_position: first_custom_slot + i,
            ..template
        }));

        for template in templates {
            let handle = factory.instantiate(&template);
            debug!("Created {:?} button {:?}", template.button_type, handle);
            self.buttons.push((template, handle));
        }
        info!("App bar started with {} buttons", self.buttons.len());
    }

    /// Return to the default state, snapping to the box.
    ///
    /// Taps are held off for one cooldown and the bar counts as focused. A manipulator
    /// switched off by a timeout is switched back on.
    pub fn reset(&mut self, now: f32, head: Vec3, manipulator: &mut BoundingBoxManipulator) {
        self.state = AppBarState::Default;
        manipulator.set_active(true);
        manipulator.set_accept_input(false);
        self.follow(manipulator, head, None);
        self.last_tap = Some(now);
        self.focus.enter(now);
    }

    pub fn state(&self) -> AppBarState {
        self.state
    }

    pub fn config(&self) -> &AppBarConfig {
        &self.config
    }

    /// Whether the bar is drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Smoothed background bar width, in button slots
    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    /// Focus state of the bar
    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn focus_enter(&mut self, now: f32) {
        self.focus.enter(now);
    }

    pub fn focus_exit(&mut self, now: f32) {
        self.focus.exit(now);
    }

    /// Number of buttons shown in a state
    pub fn button_count(&self, state: AppBarState) -> usize {
        self.buttons
            .iter()
            .filter(|(t, _)| state.shows(t.button_type))
            .count()
    }

    /// Visible buttons and their offsets for the current state
    pub fn button_layout(&self) -> Vec<ButtonLayout> {
        let count = self.button_count(self.state);
        let mut layout: Vec<ButtonLayout> = self
            .buttons
            .iter()
            .filter(|(t, _)| self.state.shows(t.button_type))
            .map(|(template, handle)| {
                let slot = match self.state {
                    AppBarState::Manipulation => template.manipulation_position,
                    _ => template.default_position,
                };
                ButtonLayout {
                    button_type: template.button_type,
                    handle: *handle,
                    slot,
                    offset: slot_offset(slot, count, self.config.button_spacing),
                }
            })
            .collect();
        layout.sort_by_key(|b| b.slot);
        layout
    }

    /// Handle a tap on a button.
    ///
    /// Returns whether the tap was accepted. Taps inside the cooldown, or on buttons
    /// not shown in the current state, are ignored.
    pub fn tap(
        &mut self,
        button: ButtonType,
        now: f32,
        scene: &mut dyn SceneGraph,
        manipulator: &mut BoundingBoxManipulator,
    ) -> bool {
        if let Some(last) = self.last_tap {
            if now < last + self.config.tap_cooldown {
                warn!("Ignoring {:?} tap during cooldown", button);
                return false;
            }
        }
        let present = self.buttons.iter().any(|(t, _)| t.button_type == button);
        if !present || !self.state.shows(button) {
            warn!("Ignoring {:?} tap in state {:?}", button, self.state);
            return false;
        }

        self.last_tap = Some(now);
        self.focus.restart_exit_clock(now);
        info!("App bar {:?}", button);

        match button {
            ButtonType::Remove => {
                if let Some(target) = manipulator.target() {
                    if let Err(err) = scene.destroy(target) {
                        warn!("Remove failed: {}", err);
                    }
                }
                manipulator.set_target(None);
            }
            ButtonType::Adjust => self.transition(AppBarState::Manipulation),
            ButtonType::Hide => self.transition(AppBarState::Hidden),
            ButtonType::Show | ButtonType::Done => self.transition(AppBarState::Default),
            ButtonType::Custom => {}
        }
        self.apply_state(manipulator);
        true
    }

    /// Leave `Invisible` and return to the default state.
    ///
    /// Reactivates the manipulator and restarts the timeout clock.
    pub fn show(&mut self, now: f32, manipulator: &mut BoundingBoxManipulator) {
        if self.state == AppBarState::Invisible {
            manipulator.set_active(true);
        }
        self.transition(AppBarState::Default);
        self.focus.restart_exit_clock(now);
        self.apply_state(manipulator);
    }

    /// Advance one frame: follow the box, apply the state, check the timeout and
    /// animate the background bar.
    pub fn tick(
        &mut self,
        dt: f32,
        now: f32,
        head: Vec3,
        manipulator: &mut BoundingBoxManipulator,
    ) {
        self.follow(manipulator, head, Some(dt));
        self.apply_state(manipulator);

        if self.timed_out(now, manipulator) {
            info!("App bar timed out at {:.2}", now);
            self.transition(AppBarState::Invisible);
            self.apply_state(manipulator);
        }

        let target_width = match self.state {
            AppBarState::Invisible => self.button_count(AppBarState::Hidden),
            state => self.button_count(state),
        } as f32;
        let t = self.config.smoothing_factor(dt);
        self.bar_width += (target_width - self.bar_width) * t;
        trace!("Bar width {:.3} -> {}", self.bar_width, target_width);
    }

    fn timed_out(&self, now: f32, manipulator: &BoundingBoxManipulator) -> bool {
        if !self.config.timeout
            || self.state == AppBarState::Invisible
            || self.focus.has_focus()
            || manipulator.target().is_none()
            || manipulator.focus().has_focus()
        {
            return false;
        }
        let latest = self
            .focus
            .last_focus_exit()
            .max(manipulator.focus().last_focus_exit());
        now >= latest + self.config.timeout_interval
    }

    fn transition(&mut self, next: AppBarState) {
        if self.state != next {
            debug!("App bar {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn apply_state(&mut self, manipulator: &mut BoundingBoxManipulator) {
        match self.state {
            AppBarState::Invisible => {
                manipulator.set_accept_input(false);
                manipulator.set_active(false);
                self.visible = false;
            }
            state => manipulator.set_accept_input(state.accepts_input()),
        }
    }

    fn follow(&mut self, manipulator: &BoundingBoxManipulator, head: Vec3, dt: Option<f32>) {
        if self.state == AppBarState::Invisible {
            self.visible = false;
            return;
        }
        if manipulator.target().is_none() {
            self.visible = self.config.display_type == DisplayType::Standalone;
            return;
        }
        self.visible = true;

        let goal = anchor(manipulator.snapshot(), head, &self.config);
        match dt {
            Some(dt) => {
                let t = self.config.smoothing_factor(dt);
                self.position = self.position.lerp(goal.position, t);
                self.rotation = self.rotation.slerp(goal.rotation, t);
            }
            None => {
                self.position = goal.position;
                self.rotation = goal.rotation;
            }
        }
    }
}
