//! Bounding box manipulator
//!
//! Owns the target selection and the gesture state machine:
//!
//! ```text
//! None ──press on handle / box──▶ Drag | ScaleUniform | RotateX | RotateY | RotateZ
//!   ▲                                              │
//!   └──────────── release / target gone ───────────┘
//! ```
//!
//! Per frame call [`BoundingBoxManipulator::step`], which measures the target, lays
//! out the handles and then feeds the pointer sample through the state machine.

use glam::Vec3;
use hux_bounds::{
    compute_bounds, BoundsSettings, BoundsSnapshot, FlattenMode, GizmoConfig, GizmoFrame,
    HandleSet,
};
use hux_core::{NodeId, Result};
use hux_input::{FocusTracker, PointerSample, Targeting};
use hux_scene::SceneGraph;
use log::{debug, info, trace, warn};

use crate::config::ManipulationConfig;
use crate::handlers::{GestureStart, GestureUpdate, HandlerTable};
use crate::operation::{Operation, Operations};
use crate::state::ManipulationState;
use crate::visuals::{handle_visuals, GizmoVisuals};

/// Notified when the manipulator's target changes
pub trait TargetObserver {
    /// A target was bound
    fn on_target_selected(&mut self, _target: NodeId) {}

    /// A target was unbound, either replaced, cleared or gone from the scene
    fn on_target_deselected(&mut self, _target: NodeId) {}
}

/// Result of hit testing a pointer against the gizmo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub operation: Operation,
    /// Handle under the pointer; `None` for a hit on the box volume
    pub handle: Option<usize>,
    /// Distance along the pointer ray to the hit, zero for proximity
    pub distance: f32,
}

/// Gesture bookkeeping that only exists between press and release
#[derive(Debug, Clone, Copy)]
struct Gesture {
    grab_distance: f32,
    last_point: Vec3,
}

/// Bounding box manipulator
pub struct BoundingBoxManipulator {
    config: ManipulationConfig,
    bounds_settings: BoundsSettings,
    gizmo: GizmoConfig,
    handlers: HandlerTable,
    target: Option<NodeId>,
    state: ManipulationState,
    snapshot: BoundsSnapshot,
    frame: GizmoFrame,
    handles: HandleSet,
    gesture: Option<Gesture>,
    was_pressed: bool,
    locked: bool,
    active: bool,
    focus: FocusTracker,
    observers: Vec<Box<dyn TargetObserver>>,
}

impl BoundingBoxManipulator {
    /// Create a manipulator with no target.
    ///
    /// Configuration is validated here and never again per frame.
    pub fn new(
        config: ManipulationConfig,
        bounds_settings: BoundsSettings,
        gizmo: GizmoConfig,
    ) -> Result<Self> {
        config.validate()?;
        bounds_settings.validate()?;
        gizmo.validate()?;
        for advisory in bounds_settings.advisories() {
            warn!("{}", advisory);
        }

        let frame = gizmo.frame(&BoundsSnapshot::EMPTY);
        Ok(Self {
            handlers: HandlerTable::new(&config),
            state: ManipulationState::new(config.permitted_operations),
            config,
            bounds_settings,
            gizmo,
            target: None,
            snapshot: BoundsSnapshot::EMPTY,
            frame,
            handles: HandleSet::empty(),
            gesture: None,
            was_pressed: false,
            locked: false,
            active: true,
            focus: FocusTracker::new(),
            observers: Vec::new(),
        })
    }

    /// Register a selection observer
    pub fn add_observer(&mut self, observer: Box<dyn TargetObserver>) {
        self.observers.push(observer);
    }

    // ========== Target ==========

    /// Bind a new target, or clear it with `None`.
    ///
    /// Any gesture in progress ends. Observers see the old target deselected before
    /// the new one is selected. Rebinding the current target does nothing.
    pub fn set_target(&mut self, target: Option<NodeId>) {
        if target == self.target {
            return;
        }

        self.end_gesture();
        self.state.clear_gesture();
        self.snapshot = BoundsSnapshot::EMPTY;
        self.frame = self.gizmo.frame(&self.snapshot);
        self.handles = HandleSet::empty();

        let previous = std::mem::replace(&mut self.target, target);
        if let Some(old) = previous {
            info!("Deselected target {}", old);
            for observer in &mut self.observers {
                observer.on_target_deselected(old);
            }
        }
        if let Some(new) = target {
            info!("Selected target {}", new);
            for observer in &mut self.observers {
                observer.on_target_selected(new);
            }
        }
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Current observable state
    pub fn state(&self) -> &ManipulationState {
        &self.state
    }

    /// Bounds measured on the last refresh
    pub fn snapshot(&self) -> &BoundsSnapshot {
        &self.snapshot
    }

    /// Padded gizmo frame from the last refresh
    pub fn frame(&self) -> &GizmoFrame {
        &self.frame
    }

    /// Handles from the last refresh
    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    pub fn bounds_settings(&self) -> &BoundsSettings {
        &self.bounds_settings
    }

    // ========== Settings ==========

    /// Replace the permitted operation set.
    ///
    /// A gesture whose operation is no longer permitted ends immediately.
    pub fn set_permitted_operations(&mut self, operations: Operations) {
        self.state.permitted_operations = operations;
        if !self.state.current_operation.permitted_by(operations) {
            debug!(
                "{:?} no longer permitted, ending gesture",
                self.state.current_operation
            );
            self.end_gesture();
        }
    }

    /// Gate input. Turning input off ends any gesture.
    pub fn set_accept_input(&mut self, accept: bool) {
        if self.state.accept_input == accept {
            return;
        }
        debug!("Accept input: {}", accept);
        self.state.accept_input = accept;
        if !accept {
            self.end_gesture();
            self.state.hovered_handle = None;
        }
    }

    /// Change how the target is flattened
    pub fn set_flatten_preference(&mut self, preference: FlattenMode) {
        self.bounds_settings.flatten_preference = preference;
        for advisory in self.bounds_settings.advisories() {
            warn!("{}", advisory);
        }
    }

    // ========== Lock ==========

    /// Stop hit testing; any gesture ends
    pub fn lock(&mut self) {
        if !self.locked {
            debug!("Manipulator locked");
            self.locked = true;
            self.end_gesture();
            self.state.hovered_handle = None;
        }
    }

    pub fn unlock(&mut self) {
        if self.locked {
            debug!("Manipulator unlocked");
            self.locked = false;
        }
    }

    /// Flip the lock, returning the new state
    pub fn toggle_lock(&mut self) -> bool {
        if self.locked {
            self.unlock();
        } else {
            self.lock();
        }
        self.locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // ========== Activity & focus ==========

    /// Activate or deactivate the whole manipulator. Inactive manipulators ignore input.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            debug!("Manipulator {}", if active { "activated" } else { "deactivated" });
            self.active = active;
            if !active {
                self.end_gesture();
                self.state.hovered_handle = None;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pointer focus entered the box
    pub fn focus_enter(&mut self, now: f32) {
        self.focus.enter(now);
    }

    /// Pointer focus left the box
    pub fn focus_exit(&mut self, now: f32) {
        self.focus.exit(now);
    }

    /// Focus state of the box
    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    // ========== Per frame ==========

    /// Measure the target. A target gone from the scene is cleared.
    pub fn refresh_bounds<S: SceneGraph + ?Sized>(&mut self, scene: &S) {
        if let Some(target) = self.target {
            if !scene.contains(target) {
                debug!("Target {} vanished", target);
                self.set_target(None);
            }
        }
        self.snapshot = compute_bounds(scene, self.target, &self.bounds_settings);
        self.frame = self.gizmo.frame(&self.snapshot);
    }

    /// Lay out handles around the last measured frame
    pub fn refresh_handles(&mut self) {
        self.handles = match self.target {
            Some(_) => HandleSet::compute(&self.frame.bounds, self.frame.flattened_axis),
            None => HandleSet::empty(),
        };
    }

    /// What a press with this sample would grab.
    ///
    /// The nearest permitted handle within the selection radius wins, ties going to
    /// the lower index. Failing that, a pointer on the box volume starts a drag.
    pub fn hit_test(&self, sample: &PointerSample) -> Option<Hit> {
        if self.target.is_none() || !self.state.accept_input || self.locked || !self.active {
            return None;
        }

        let permitted = self.state.permitted_operations;
        let mut best: Option<(usize, Operation, f32)> = None;
        for (index, role, position) in self.handles.iter() {
            let operation = Operation::for_role(role);
            if !operation.permitted_by(permitted) {
                continue;
            }
            let distance = sample.distance_to(position);
            if distance >= self.config.selection_radius {
                continue;
            }
            if best.map_or(true, |(_, _, d)| distance < d) {
                best = Some((index, operation, distance));
            }
        }

        if let Some((index, operation, _)) = best {
            let position = self.handles.get(index)?;
            return Some(Hit {
                operation,
                handle: Some(index),
                distance: along_ray(sample, position),
            });
        }

        if !Operation::Drag.permitted_by(permitted) {
            return None;
        }
        let bounds = &self.frame.bounds;
        match sample.targeting {
            Targeting::Ray => bounds
                .ray_distance(sample.position(), sample.direction())
                .map(|distance| Hit {
                    operation: Operation::Drag,
                    handle: None,
                    distance,
                }),
            Targeting::Proximity => bounds.contains(sample.position()).then_some(Hit {
                operation: Operation::Drag,
                handle: None,
                distance: 0.0,
            }),
        }
    }

    /// Feed one pointer sample through the state machine.
    ///
    /// A press edge over a hit starts a gesture; release, a missing sample or losing
    /// the target ends it. Never fails: a target that disappears mid-gesture forces
    /// the state back to `None`.
    pub fn handle_input(&mut self, scene: &mut dyn SceneGraph, sample: Option<&PointerSample>) {
        if let Some(target) = self.target {
            if !scene.contains(target) {
                debug!("Target {} vanished during input", target);
                self.set_target(None);
            }
        }

        let pressed = sample.map_or(false, |s| s.pressed);
        let press_edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        if self.state.manipulating_now {
            match sample.filter(|s| s.pressed) {
                Some(sample) => self.continue_gesture(scene, sample),
                None => self.end_gesture(),
            }
            return;
        }

        let hit = sample.and_then(|s| self.hit_test(s));
        self.state.hovered_handle = hit.and_then(|h| h.handle);

        if let (true, Some(hit), Some(sample)) = (press_edge, hit, sample) {
            self.begin_gesture(&*scene, sample, hit);
        }
    }

    /// Run one frame: bounds, handles, then input
    pub fn step(&mut self, scene: &mut dyn SceneGraph, sample: Option<&PointerSample>) {
        self.refresh_bounds(&*scene);
        self.refresh_handles();
        self.handle_input(scene, sample);
    }

    /// Appearance of the gizmo for the current state
    pub fn visuals(&self) -> GizmoVisuals {
        handle_visuals(
            &self.state,
            &self.handles,
            &self.frame,
            self.target.is_some(),
            &self.gizmo,
        )
    }

    /// Drop the target and every transient state, keeping configuration
    pub fn reset(&mut self) {
        self.set_target(None);
        self.state = ManipulationState::new(self.state.permitted_operations);
        self.was_pressed = false;
        self.locked = false;
        self.active = true;
        self.focus = FocusTracker::new();
    }

    // ========== Gesture ==========

    fn begin_gesture(&mut self, scene: &dyn SceneGraph, sample: &PointerSample, hit: Hit) {
        let Some(target) = self.target else {
            return;
        };
        let point = grab_point(sample, hit.distance);
        let start = GestureStart {
            point,
            center: self.snapshot.world_center,
        };
        let Some(handler) = self.handlers.get_mut(hit.operation) else {
            return;
        };
        handler.begin(scene, target, &start);

        debug!(
            "Begin {:?} on {} (handle {:?})",
            hit.operation, target, hit.handle
        );
        self.state.current_operation = hit.operation;
        self.state.active_handle = hit.handle;
        self.state.hovered_handle = hit.handle;
        self.state.manipulating_now = true;
        self.gesture = Some(Gesture {
            grab_distance: hit.distance,
            last_point: point,
        });
    }

    fn continue_gesture(&mut self, scene: &mut dyn SceneGraph, sample: &PointerSample) {
        let (Some(target), Some(gesture)) = (self.target, self.gesture) else {
            self.end_gesture();
            return;
        };

        let current = grab_point(sample, gesture.grab_distance);
        let update = GestureUpdate {
            previous: gesture.last_point,
            current,
            center: self.snapshot.world_center,
        };
        let operation = self.state.current_operation;
        let result = match self.handlers.get_mut(operation) {
            Some(handler) => handler.update(scene, target, &update),
            None => Ok(()),
        };

        match result {
            Ok(()) => {
                trace!("{:?} {:?} -> {:?}", operation, update.previous, update.current);
                self.gesture = Some(Gesture {
                    last_point: current,
                    ..gesture
                });
            }
            Err(err) => {
                debug!("Forcing {:?} to end: {}", operation, err);
                self.end_gesture();
                if !scene.contains(target) {
                    self.set_target(None);
                }
            }
        }
    }

    fn end_gesture(&mut self) {
        if let Some(handler) = self.handlers.get_mut(self.state.current_operation) {
            handler.end();
        }
        if self.state.manipulating_now {
            debug!("End {:?}", self.state.current_operation);
        }
        self.gesture = None;
        self.state.current_operation = Operation::None;
        self.state.active_handle = None;
        self.state.manipulating_now = false;
    }
}

/// Where the pointer holds the target: the ray point at the grab distance, or the
/// pointer position itself for proximity
fn grab_point(sample: &PointerSample, distance: f32) -> Vec3 {
    match sample.targeting {
        Targeting::Ray => sample.position() + sample.direction() * distance,
        Targeting::Proximity => sample.position(),
    }
}

/// Distance along the ray to the point closest to `position`
fn along_ray(sample: &PointerSample, position: Vec3) -> f32 {
    match sample.targeting {
        Targeting::Ray => (position - sample.position()).dot(sample.direction()).max(0.0),
        Targeting::Proximity => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use hux_bounds::handles::{LBF, RTB};
    use hux_core::{Axis, Transform};
    use hux_scene::{Geometry, Scene};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cube_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let target = scene.spawn("cube", Transform::IDENTITY);
        scene
            .add_geometry(target, Geometry::unit_cube_mesh())
            .unwrap();
        (scene, target)
    }

    fn manipulator() -> BoundingBoxManipulator {
        BoundingBoxManipulator::new(
            ManipulationConfig::default().with_permitted_operations(Operations::all()),
            BoundsSettings::default(),
            GizmoConfig::default().with_padding(0.0, 0.0),
        )
        .unwrap()
    }

    fn bound(scene: &mut Scene, target: NodeId) -> BoundingBoxManipulator {
        let mut m = manipulator();
        m.set_target(Some(target));
        m.set_accept_input(true);
        m.step(scene, None);
        m
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = BoundingBoxManipulator::new(
            ManipulationConfig::default().with_min_scale_percentage(2.0),
            BoundsSettings::default(),
            GizmoConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_hit_requires_accept_input() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);
        let corner = m.handles().get(RTB).unwrap();
        let sample = PointerSample::proximity(false, corner);
        assert!(m.hit_test(&sample).is_some());

        m.set_accept_input(false);
        assert!(m.hit_test(&sample).is_none());
    }

    #[test]
    fn test_nearest_handle_wins() {
        let (mut scene, target) = cube_scene();
        let m = bound(&mut scene, target);
        let corner = m.handles().get(LBF).unwrap();
        let hit = m
            .hit_test(&PointerSample::proximity(false, corner + Vec3::splat(-0.01)))
            .unwrap();
        assert_eq!(hit.operation, Operation::ScaleUniform);
        assert_eq!(hit.handle, Some(LBF));
    }

    #[test]
    fn test_box_volume_starts_drag() {
        let (mut scene, target) = cube_scene();
        let m = bound(&mut scene, target);
        let ray = PointerSample::ray(false, Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY);
        let hit = m.hit_test(&ray).unwrap();
        assert_eq!(hit.operation, Operation::Drag);
        assert_eq!(hit.handle, None);
        assert!((hit.distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_drag_gesture_lifecycle() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);

        let origin = Vec3::new(0.0, 0.0, 5.0);
        m.step(&mut scene, Some(&PointerSample::ray(true, origin, Quat::IDENTITY)));
        assert_eq!(m.state().current_operation, Operation::Drag);
        assert!(m.state().manipulating_now);
        assert_eq!(m.state().active_handle, None);

        let moved = origin + Vec3::new(0.5, 0.0, 0.0);
        m.step(&mut scene, Some(&PointerSample::ray(true, moved, Quat::IDENTITY)));
        let position = scene.world_position(target).unwrap();
        assert!(position.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-5));

        m.step(&mut scene, Some(&PointerSample::ray(false, moved, Quat::IDENTITY)));
        assert_eq!(m.state().current_operation, Operation::None);
        assert!(!m.state().manipulating_now);
    }

    #[test]
    fn test_held_press_does_not_start_gesture() {
        let (mut scene, target) = cube_scene();
        let mut m = manipulator();
        m.set_target(Some(target));
        let sample = PointerSample::ray(true, Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY);
        // Pressed before input was accepted
        m.step(&mut scene, Some(&sample));
        m.set_accept_input(true);
        m.step(&mut scene, Some(&sample));
        assert_eq!(m.state().current_operation, Operation::None);
    }

    #[test]
    fn test_unpermitted_handles_are_skipped() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);
        m.set_permitted_operations(Operations::DRAG);
        let corner = m.handles().get(RTB).unwrap();
        // Corner sits on the box surface, so it falls back to a drag
        let hit = m.hit_test(&PointerSample::proximity(false, corner)).unwrap();
        assert_eq!(hit.operation, Operation::Drag);
    }

    #[test]
    fn test_lock_blocks_hits() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);
        let sample = PointerSample::proximity(true, Vec3::ZERO);
        assert!(m.toggle_lock());
        assert!(m.hit_test(&sample).is_none());
        assert!(!m.toggle_lock());
        assert!(m.hit_test(&sample).is_some());
    }

    #[test]
    fn test_vanished_target_forces_exit() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);
        m.step(&mut scene, Some(&PointerSample::proximity(true, Vec3::ZERO)));
        assert!(m.state().manipulating_now);

        scene.destroy(target).unwrap();
        m.handle_input(&mut scene, Some(&PointerSample::proximity(true, Vec3::X)));
        assert_eq!(m.state().current_operation, Operation::None);
        assert_eq!(m.state().active_handle, None);
        assert!(!m.state().manipulating_now);
        assert_eq!(m.target(), None);
    }

    #[test]
    fn test_observers_see_deselect_before_select() {
        #[derive(Default)]
        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl TargetObserver for Recorder {
            fn on_target_selected(&mut self, target: NodeId) {
                self.0.borrow_mut().push(format!("select {}", target));
            }
            fn on_target_deselected(&mut self, target: NodeId) {
                self.0.borrow_mut().push(format!("deselect {}", target));
            }
        }

        let mut scene = Scene::new();
        let a = scene.spawn("a", Transform::IDENTITY);
        let b = scene.spawn("b", Transform::IDENTITY);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut m = manipulator();
        m.add_observer(Box::new(Recorder(log.clone())));

        m.set_target(Some(a));
        m.set_target(Some(a));
        m.set_target(Some(b));
        m.set_target(None);
        assert_eq!(
            *log.borrow(),
            vec![
                format!("select {}", a),
                format!("deselect {}", a),
                format!("select {}", b),
                format!("deselect {}", b),
            ]
        );
    }

    #[test]
    fn test_flattened_target_uses_2d_handles() {
        let mut scene = Scene::new();
        let target = scene.spawn(
            "panel",
            Transform::IDENTITY.with_scale(Vec3::new(1.0, 1.0, 0.005)),
        );
        scene
            .add_geometry(target, Geometry::unit_cube_mesh())
            .unwrap();
        let m = bound(&mut scene, target);
        assert_eq!(m.handles().len(), 8);
        assert_eq!(m.handles().flattened_axis(), Some(Axis::Z));
    }

    #[test]
    fn test_deactivated_manipulator_ignores_input() {
        let (mut scene, target) = cube_scene();
        let mut m = bound(&mut scene, target);
        m.set_active(false);
        m.step(&mut scene, Some(&PointerSample::proximity(true, Vec3::ZERO)));
        assert_eq!(m.state().current_operation, Operation::None);
    }
}
