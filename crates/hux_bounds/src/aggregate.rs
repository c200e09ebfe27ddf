//! Bounds aggregation and the flatten policy

use glam::{Quat, Vec3};
use hux_core::{Aabb, Axis, NodeId};
use hux_scene::{Geometry, SceneGraph};
use log::trace;

use crate::frame::OrientedBox;
use crate::settings::{BoundsMethod, BoundsSettings, FlattenMode};

/// Measured bounds of a target for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsSnapshot {
    /// Center of the merged bounds in the target's local space
    pub local_center: Vec3,
    /// The same center in world space
    pub world_center: Vec3,
    /// World rotation of the target
    pub rotation: Quat,
    /// Bounds size scaled by the target's local scale, before flattening
    pub raw_scale: Vec3,
    /// Bounds size scaled by the target's local scale, after flattening
    pub scale: Vec3,
    /// The flattened axis, if any
    pub flattened_axis: Option<Axis>,
}

impl BoundsSnapshot {
    /// Snapshot reported when there is no target
    pub const EMPTY: Self = Self {
        local_center: Vec3::ZERO,
        world_center: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        raw_scale: Vec3::ONE,
        scale: Vec3::ONE,
        flattened_axis: None,
    };

    /// Whether one axis has been flattened
    pub fn is_flattened(&self) -> bool {
        self.flattened_axis.is_some()
    }

    /// Largest post-flatten dimension
    pub fn largest_dimension(&self) -> f32 {
        self.scale.max_element()
    }

    /// Oriented box around the target, unpadded
    pub fn oriented_box(&self) -> OrientedBox {
        OrientedBox::new(self.world_center, self.rotation, self.scale)
    }
}

impl Default for BoundsSnapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Measure a target.
///
/// Geometry of the target and its active descendants is sampled according to
/// `settings.method`, converted into the target's local space and merged. A target
/// without any usable geometry yields zero-size bounds at its local origin; a
/// missing target yields [`BoundsSnapshot::EMPTY`].
pub fn compute_bounds<S: SceneGraph + ?Sized>(
    scene: &S,
    target: Option<NodeId>,
    settings: &BoundsSettings,
) -> BoundsSnapshot {
    let Some(target) = target.filter(|&t| scene.contains(t)) else {
        return BoundsSnapshot::EMPTY;
    };

    let world_points = gather_world_points(scene, target, settings);
    let local_points: Vec<Vec3> = world_points
        .iter()
        .filter_map(|&p| scene.inverse_transform_point(target, p))
        .collect();

    let local_bounds = Aabb::from_points(&local_points).unwrap_or(Aabb::ZERO);
    let local_scale = scene.local_scale(target).unwrap_or(Vec3::ONE);
    let raw_scale = local_bounds.size() * local_scale;
    let (scale, flattened_axis) = apply_flatten(
        raw_scale,
        settings.flatten_preference,
        settings.flatten_threshold,
        settings.flatten_thickness,
    );

    let snapshot = BoundsSnapshot {
        local_center: local_bounds.center(),
        world_center: scene
            .transform_point(target, local_bounds.center())
            .unwrap_or(Vec3::ZERO),
        rotation: scene.world_rotation(target).unwrap_or(Quat::IDENTITY),
        raw_scale,
        scale,
        flattened_axis,
    };
    trace!(
        "Bounds of {}: {} points, scale {:?}, flattened {:?}",
        target,
        local_points.len(),
        snapshot.scale,
        snapshot.flattened_axis
    );
    snapshot
}

/// Apply a flatten preference to a bounds scale.
///
/// Auto mode tests Z, then Y, then X and flattens the first axis whose size relative
/// to the largest axis is below `threshold`. Explicit modes always flatten their
/// axis. A flattened axis becomes `thickness * largest`.
pub fn apply_flatten(
    scale: Vec3,
    preference: FlattenMode,
    threshold: f32,
    thickness: f32,
) -> (Vec3, Option<Axis>) {
    let largest = scale.max_element();
    let axis = match preference {
        FlattenMode::DoNotFlatten => None,
        FlattenMode::FlattenAuto => {
            if largest > 0.0 {
                [Axis::Z, Axis::Y, Axis::X]
                    .into_iter()
                    .find(|&axis| (axis.get(scale) / largest).abs() < threshold)
            } else {
                None
            }
        }
        explicit => explicit.explicit_axis(),
    };

    let mut flattened = scale;
    if let Some(axis) = axis {
        axis.set(&mut flattened, thickness * largest);
    }
    (flattened, axis)
}

fn gather_world_points<S: SceneGraph + ?Sized>(
    scene: &S,
    target: NodeId,
    settings: &BoundsSettings,
) -> Vec<Vec3> {
    let method = settings.method.resolve();
    let mut points = Vec::new();

    for node in scene.active_subtree(target) {
        let on_ignored_layer = scene.layer(node) == Some(settings.ignore_layer);

        for geometry in scene.geometry(node) {
            match (method, geometry) {
                (BoundsMethod::MeshFilterBounds, Geometry::MeshFilter { mesh_bounds }) => {
                    if !on_ignored_layer {
                        push_local(scene, node, &mesh_bounds.corners(), &mut points);
                    }
                }
                (BoundsMethod::MeshFilterBounds, Geometry::Rect { .. }) => {
                    if let Some(corners) = geometry.rect_corners() {
                        push_local(scene, node, &corners, &mut points);
                    }
                }
                (BoundsMethod::RendererBounds, Geometry::Renderer { .. }) => {
                    if on_ignored_layer {
                        continue;
                    }
                    let world = scene
                        .world_matrix(node)
                        .and_then(|m| geometry.renderer_world_bounds(&m));
                    if let Some(world) = world {
                        points.extend_from_slice(&world.corners());
                    }
                }
                (BoundsMethod::Colliders, Geometry::Collider(shape)) => {
                    push_local(scene, node, &shape.sample_points(), &mut points);
                }
                _ => {}
            }
        }
    }

    points
}

fn push_local<S: SceneGraph + ?Sized>(
    scene: &S,
    node: NodeId,
    local: &[Vec3],
    out: &mut Vec<Vec3>,
) {
    out.extend(local.iter().filter_map(|&p| scene.transform_point(node, p)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hux_core::Transform;
    use hux_scene::{ColliderShape, Scene};

    fn settings() -> BoundsSettings {
        BoundsSettings::default()
    }

    #[test]
    fn test_missing_target_is_empty_snapshot() {
        let scene = Scene::new();
        let snapshot = compute_bounds(&scene, None, &settings());
        assert_eq!(snapshot, BoundsSnapshot::EMPTY);
        assert_eq!(snapshot.scale, Vec3::ONE);
    }

    #[test]
    fn test_no_geometry_is_zero_size_at_origin() {
        let mut scene = Scene::new();
        let target = scene.spawn("empty", Transform::from_position(Vec3::new(2.0, 0.0, 0.0)));
        for method in [
            BoundsMethod::MeshFilterBounds,
            BoundsMethod::RendererBounds,
            BoundsMethod::Colliders,
            BoundsMethod::Default,
        ] {
            let snapshot = compute_bounds(&scene, Some(target), &settings().with_method(method));
            assert_eq!(snapshot.local_center, Vec3::ZERO);
            assert_eq!(snapshot.scale, Vec3::ZERO);
            assert_eq!(snapshot.flattened_axis, None);
            assert!(snapshot.world_center.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
        }
    }

    #[test]
    fn test_points_are_merged_in_target_space() {
        let mut scene = Scene::new();
        let target = scene.spawn(
            "target",
            Transform::new(Vec3::new(5.0, 0.0, 0.0), Quat::from_rotation_y(0.8), Vec3::ONE),
        );
        let child = scene
            .spawn_child(target, "child", Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        scene.add_geometry(target, Geometry::unit_cube_mesh()).unwrap();
        scene.add_geometry(child, Geometry::unit_cube_mesh()).unwrap();

        let snapshot = compute_bounds(&scene, Some(target), &settings());
        // Rotation does not inflate local bounds
        assert!(snapshot.raw_scale.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-5));
        assert!(snapshot.local_center.abs_diff_eq(Vec3::new(0.0, 0.5, 0.0), 1e-5));
        assert!(snapshot
            .world_center
            .abs_diff_eq(Vec3::new(5.0, 0.5, 0.0), 1e-5));
    }

    #[test]
    fn test_ignore_layer_skips_meshes_but_not_colliders() {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        let ignored = scene
            .spawn_child(target, "ignored", Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))
            .unwrap();
        scene.set_layer(ignored, 2).unwrap();
        scene.add_geometry(target, Geometry::unit_cube_mesh()).unwrap();
        scene.add_geometry(ignored, Geometry::unit_cube_mesh()).unwrap();
        scene
            .add_geometry(
                ignored,
                Geometry::Collider(ColliderShape::Box {
                    center: Vec3::ZERO,
                    size: Vec3::ONE,
                }),
            )
            .unwrap();

        let mesh = compute_bounds(&scene, Some(target), &settings());
        assert!(mesh.raw_scale.abs_diff_eq(Vec3::ONE, 1e-5));

        let colliders = compute_bounds(
            &scene,
            Some(target),
            &settings().with_method(BoundsMethod::Colliders),
        );
        assert!(colliders.world_center.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_renderer_bounds_are_world_aligned() {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        let rotated = scene
            .spawn_child(
                target,
                "rotated",
                Transform::IDENTITY
                    .with_rotation(Quat::from_rotation_y(core::f32::consts::FRAC_PI_4)),
            )
            .unwrap();
        scene
            .add_geometry(
                rotated,
                Geometry::Renderer {
                    local_bounds: Aabb::from_center_size(Vec3::ZERO, Vec3::ONE),
                },
            )
            .unwrap();

        let snapshot = compute_bounds(
            &scene,
            Some(target),
            &settings()
                .with_method(BoundsMethod::RendererBounds)
                .with_flatten_preference(FlattenMode::DoNotFlatten),
        );
        assert_relative_eq!(snapshot.scale.x, 2.0f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(snapshot.scale.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unsupported_colliders_are_skipped() {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        scene
            .add_geometry(target, Geometry::Collider(ColliderShape::Unsupported))
            .unwrap();
        scene
            .add_geometry(
                target,
                Geometry::Collider(ColliderShape::Sphere {
                    center: Vec3::ZERO,
                    radius: 1.0,
                }),
            )
            .unwrap();
        let snapshot = compute_bounds(
            &scene,
            Some(target),
            &settings().with_method(BoundsMethod::Colliders),
        );
        assert!(snapshot.scale.abs_diff_eq(Vec3::splat(2.0), 1e-5));
    }

    #[test]
    fn test_inactive_children_are_skipped() {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        let hidden = scene
            .spawn_child(target, "hidden", Transform::from_position(Vec3::splat(4.0)))
            .unwrap();
        scene.add_geometry(target, Geometry::unit_cube_mesh()).unwrap();
        scene.add_geometry(hidden, Geometry::unit_cube_mesh()).unwrap();
        scene.set_active(hidden, false).unwrap();

        let snapshot = compute_bounds(&scene, Some(target), &settings());
        assert!(snapshot.scale.abs_diff_eq(Vec3::ONE, 1e-5));
    }

    #[test]
    fn test_descendants_of_inactive_children_are_skipped() {
        let mut scene = Scene::new();
        let target = scene.spawn("target", Transform::IDENTITY);
        let hidden = scene.spawn_child(target, "hidden", Transform::IDENTITY).unwrap();
        let grandchild = scene
            .spawn_child(hidden, "grandchild", Transform::from_position(Vec3::splat(4.0)))
            .unwrap();
        scene.add_geometry(target, Geometry::unit_cube_mesh()).unwrap();
        scene.add_geometry(grandchild, Geometry::unit_cube_mesh()).unwrap();
        scene.set_active(hidden, false).unwrap();

        let snapshot = compute_bounds(&scene, Some(target), &settings());
        assert!(snapshot.scale.abs_diff_eq(Vec3::ONE, 1e-5));
    }

    #[test]
    fn test_auto_flatten_priority_is_z_then_y_then_x() {
        let auto = |scale: Vec3| apply_flatten(scale, FlattenMode::FlattenAuto, 0.025, 0.01);

        let (_, axis) = auto(Vec3::new(1.0, 1.0, 0.5));
        assert_eq!(axis, None);

        let (_, axis) = auto(Vec3::new(0.01, 0.01, 1.0));
        assert_eq!(axis, Some(Axis::Y));

        let (scale, axis) = auto(Vec3::new(0.01, 1.0, 0.01));
        assert_eq!(axis, Some(Axis::Z));
        // Only one axis is ever flattened
        assert_relative_eq!(scale.x, 0.01);
        assert_relative_eq!(scale.z, 0.01);
    }

    #[test]
    fn test_explicit_flatten_ignores_threshold() {
        let (scale, axis) =
            apply_flatten(Vec3::new(2.0, 1.0, 1.0), FlattenMode::FlattenX, 0.025, 0.01);
        assert_eq!(axis, Some(Axis::X));
        assert_relative_eq!(scale.x, 0.02);

        let (scale, axis) =
            apply_flatten(Vec3::new(2.0, 1.0, 0.001), FlattenMode::DoNotFlatten, 0.025, 0.01);
        assert_eq!(axis, None);
        assert_relative_eq!(scale.z, 0.001);
    }

    #[test]
    fn test_repeated_computation_is_identical() {
        let mut scene = Scene::new();
        let target = scene.spawn(
            "target",
            Transform::new(
                Vec3::new(0.3, 1.7, -2.0),
                Quat::from_rotation_x(0.3),
                Vec3::new(1.0, 2.0, 0.5),
            ),
        );
        scene.add_geometry(target, Geometry::unit_cube_mesh()).unwrap();
        let a = compute_bounds(&scene, Some(target), &settings());
        let b = compute_bounds(&scene, Some(target), &settings());
        assert_eq!(a, b);
    }
}
