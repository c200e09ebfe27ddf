//! Operation handlers.
//!
//! One handler per operation, looked up through [`HandlerTable`]. A gesture calls
//! `begin` once, `update` every tick while the pointer stays pressed, then `end`.
//! Updates are incremental: each one applies the change since the previous tick to
//! the target's current transform, so a release simply leaves the last applied state.

use glam::{Quat, Vec3};
use hux_core::{Axis, HuxError, NodeId, Result};
use hux_scene::SceneGraph;

use crate::config::ManipulationConfig;
use crate::operation::Operation;

const EPSILON: f32 = 1e-6;

/// Where a gesture started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStart {
    /// Grab point on the pointer
    pub point: Vec3,
    /// World center of the target bounds
    pub center: Vec3,
}

/// One tick of pointer motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    /// Grab point on the previous tick
    pub previous: Vec3,
    /// Grab point on this tick
    pub current: Vec3,
    /// World center of the target bounds this tick
    pub center: Vec3,
}

/// Applies pointer motion to a target for one operation
pub trait OperationHandler {
    /// The operation this handler implements
    fn operation(&self) -> Operation;

    /// Capture gesture start state
    fn begin(&mut self, scene: &dyn SceneGraph, target: NodeId, start: &GestureStart);

    /// Apply one tick of motion to the target
    fn update(
        &mut self,
        scene: &mut dyn SceneGraph,
        target: NodeId,
        update: &GestureUpdate,
    ) -> Result<()>;

    /// Gesture released
    fn end(&mut self) {}
}

/// Moves the target by the pointer delta
#[derive(Debug, Clone)]
pub struct DragHandler {
    multiplier: f32,
}

impl DragHandler {
    pub fn new(multiplier: f32) -> Self {
        Self { multiplier }
    }
}

impl OperationHandler for DragHandler {
    fn operation(&self) -> Operation {
        Operation::Drag
    }

    fn begin(&mut self, _scene: &dyn SceneGraph, _target: NodeId, _start: &GestureStart) {}

    fn update(
        &mut self,
        scene: &mut dyn SceneGraph,
        target: NodeId,
        update: &GestureUpdate,
    ) -> Result<()> {
        let delta = (update.current - update.previous) * self.multiplier;
        let position = scene
            .world_position(target)
            .ok_or(HuxError::NodeNotFound(target))?;
        scene.set_world_position(target, position + delta)
    }
}

/// Scales the target uniformly by the change in pointer-to-center distance.
///
/// The scale is tracked as a factor of the gesture's starting scale and never drops
/// below `min_percentage` of either the previous tick or the gesture start.
#[derive(Debug, Clone)]
pub struct ScaleHandler {
    multiplier: f32,
    min_percentage: f32,
    start_distance: f32,
    start_scale: Vec3,
    factor: f32,
}

impl ScaleHandler {
    pub fn new(multiplier: f32, min_percentage: f32) -> Self {
        Self {
            multiplier,
            min_percentage,
            start_distance: 0.0,
            start_scale: Vec3::ONE,
            factor: 1.0,
        }
    }

    /// Current factor relative to the gesture start
    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl OperationHandler for ScaleHandler {
    fn operation(&self) -> Operation {
        Operation::ScaleUniform
    }

    fn begin(&mut self, scene: &dyn SceneGraph, target: NodeId, start: &GestureStart) {
        self.start_distance = start.point.distance(start.center);
        self.start_scale = scene.local_scale(target).unwrap_or(Vec3::ONE);
        self.factor = 1.0;
    }

    fn update(
        &mut self,
        scene: &mut dyn SceneGraph,
        target: NodeId,
        update: &GestureUpdate,
    ) -> Result<()> {
        if self.start_distance < EPSILON {
            return Ok(());
        }
        let distance = update.current.distance(update.center);
        let candidate =
            1.0 + (distance - self.start_distance) / self.start_distance * self.multiplier;
        let floor = (self.factor * self.min_percentage).max(self.min_percentage);
        self.factor = candidate.max(floor);
        scene.set_local_scale(target, self.start_scale * self.factor)
    }

    fn end(&mut self) {
        self.start_distance = 0.0;
        self.factor = 1.0;
    }
}

/// Rotates the target about one of its local axes
#[derive(Debug, Clone)]
pub struct RotateHandler {
    axis: Axis,
    multiplier: f32,
}

impl RotateHandler {
    pub fn new(axis: Axis, multiplier: f32) -> Self {
        Self { axis, multiplier }
    }
}

impl OperationHandler for RotateHandler {
    fn operation(&self) -> Operation {
        Operation::rotate(self.axis)
    }

    fn begin(&mut self, _scene: &dyn SceneGraph, _target: NodeId, _start: &GestureStart) {}

    fn update(
        &mut self,
        scene: &mut dyn SceneGraph,
        target: NodeId,
        update: &GestureUpdate,
    ) -> Result<()> {
        let rotation = scene
            .world_rotation(target)
            .ok_or(HuxError::NodeNotFound(target))?;
        let world_axis = rotation * self.axis.unit();

        let from = reject(update.previous - update.center, world_axis);
        let to = reject(update.current - update.center, world_axis);
        if from.length_squared() < EPSILON || to.length_squared() < EPSILON {
            return Ok(());
        }

        let angle = world_axis.dot(from.cross(to)).atan2(from.dot(to)) * self.multiplier;
        let incremental = Quat::from_axis_angle(self.axis.unit(), angle);
        scene.set_world_rotation(target, (rotation * incremental).normalize())
    }
}

/// Component of `v` perpendicular to the unit vector `axis`
fn reject(v: Vec3, axis: Vec3) -> Vec3 {
    v - axis * v.dot(axis)
}

/// Operation to handler dispatch, built once from configuration
#[derive(Debug, Clone)]
pub struct HandlerTable {
    drag: DragHandler,
    scale: ScaleHandler,
    rotate_x: RotateHandler,
    rotate_y: RotateHandler,
    rotate_z: RotateHandler,
}

impl HandlerTable {
    /// Build handlers from validated configuration
    pub fn new(config: &ManipulationConfig) -> Self {
        Self {
            drag: DragHandler::new(config.drag_multiplier),
            scale: ScaleHandler::new(config.scale_multiplier, config.min_scale_percentage),
            rotate_x: RotateHandler::new(Axis::X, config.rotate_multiplier),
            rotate_y: RotateHandler::new(Axis::Y, config.rotate_multiplier),
            rotate_z: RotateHandler::new(Axis::Z, config.rotate_multiplier),
        }
    }

    /// Handler for an operation. `None` has no handler.
    pub fn get_mut(&mut self, operation: Operation) -> Option<&mut dyn OperationHandler> {
        match operation {
            Operation::None => None,
            Operation::Drag => Some(&mut self.drag),
            Operation::ScaleUniform => Some(&mut self.scale),
            Operation::RotateX => Some(&mut self.rotate_x),
            Operation::RotateY => Some(&mut self.rotate_y),
            Operation::RotateZ => Some(&mut self.rotate_z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hux_core::Transform;
    use hux_scene::Scene;

    fn scene_with_target() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        (scene, target)
    }

    #[test]
    fn test_drag_applies_scaled_delta() {
        let (mut scene, target) = scene_with_target();
        let mut drag = DragHandler::new(2.0);
        drag.update(
            &mut scene,
            target,
            &GestureUpdate {
                previous: Vec3::ZERO,
                current: Vec3::new(0.1, 0.0, 0.0),
                center: Vec3::ZERO,
            },
        )
        .unwrap();
        assert!(scene
            .world_position(target)
            .unwrap()
            .abs_diff_eq(Vec3::new(0.2, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_scale_follows_distance_ratio() {
        let (mut scene, target) = scene_with_target();
        let mut scale = ScaleHandler::new(1.0, 0.05);
        scale.begin(
            &scene,
            target,
            &GestureStart {
                point: Vec3::X,
                center: Vec3::ZERO,
            },
        );
        scale
            .update(
                &mut scene,
                target,
                &GestureUpdate {
                    previous: Vec3::X,
                    current: Vec3::new(2.0, 0.0, 0.0),
                    center: Vec3::ZERO,
                },
            )
            .unwrap();
        assert!(scene.local_scale(target).unwrap().abs_diff_eq(Vec3::splat(2.0), 1e-6));
    }

    #[test]
    fn test_scale_floor_holds_for_collapsing_pointer() {
        let (mut scene, target) = scene_with_target();
        let mut scale = ScaleHandler::new(20.0, 0.25);
        scale.begin(
            &scene,
            target,
            &GestureStart {
                point: Vec3::X,
                center: Vec3::ZERO,
            },
        );
        let mut previous = Vec3::X;
        let mut last_scale = 1.0f32;
        for step in 1..=10 {
            let current = Vec3::new(1.0 - step as f32 * 0.1, 0.0, 0.0);
            scale
                .update(
                    &mut scene,
                    target,
                    &GestureUpdate {
                        previous,
                        current,
                        center: Vec3::ZERO,
                    },
                )
                .unwrap();
            let now = scene.local_scale(target).unwrap().x;
            assert!(now >= 0.25 - 1e-6, "fell below gesture floor: {}", now);
            assert!(now >= last_scale * 0.25 - 1e-6, "fell below tick floor: {}", now);
            last_scale = now;
            previous = current;
        }
        assert_relative_eq!(last_scale, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_about_local_y() {
        let (mut scene, target) = scene_with_target();
        let mut rotate = RotateHandler::new(Axis::Y, 1.0);
        // Sweep from +X to -Z: a quarter turn counter-clockwise seen from above
        rotate
            .update(
                &mut scene,
                target,
                &GestureUpdate {
                    previous: Vec3::X,
                    current: Vec3::NEG_Z,
                    center: Vec3::ZERO,
                },
            )
            .unwrap();
        let rotation = scene.world_rotation(target).unwrap();
        assert!((rotation * Vec3::X).abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_rotate_composes_onto_existing_rotation() {
        let mut scene = Scene::new();
        let tilted = Quat::from_rotation_x(core::f32::consts::FRAC_PI_2);
        let target = scene.spawn("target", Transform::IDENTITY.with_rotation(tilted));
        let mut rotate = RotateHandler::new(Axis::Y, 1.0);
        // Local Y now points along world +Z
        let world_axis = tilted * Vec3::Y;
        assert!(world_axis.abs_diff_eq(Vec3::Z, 1e-5));
        rotate
            .update(
                &mut scene,
                target,
                &GestureUpdate {
                    previous: Vec3::X,
                    current: Vec3::Y,
                    center: Vec3::ZERO,
                },
            )
            .unwrap();
        let rotation = scene.world_rotation(target).unwrap();
        // Local Y is the rotation axis and must not move
        assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::Z, 1e-5));
        assert!((rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_vanished_target_is_an_error() {
        let (mut scene, target) = scene_with_target();
        scene.destroy(target).unwrap();
        let mut drag = DragHandler::new(1.0);
        let result = drag.update(
            &mut scene,
            target,
            &GestureUpdate {
                previous: Vec3::ZERO,
                current: Vec3::X,
                center: Vec3::ZERO,
            },
        );
        assert_eq!(result, Err(HuxError::NodeNotFound(target)));
    }

    #[test]
    fn test_table_dispatch() {
        let mut table = HandlerTable::new(&ManipulationConfig::default());
        assert!(table.get_mut(Operation::None).is_none());
        for op in [
            Operation::Drag,
            Operation::ScaleUniform,
            Operation::RotateX,
            Operation::RotateY,
            Operation::RotateZ,
        ] {
            assert_eq!(table.get_mut(op).map(|h| h.operation()), Some(op));
        }
    }
}
