//! End-to-end bounds scenarios on a unit cube target

use approx::assert_relative_eq;
use glam::Vec3;
use hux_bounds::prelude::*;
use hux_bounds::handles;
use hux_core::{Axis, NodeId, Transform};
use hux_scene::{Geometry, Scene, SceneGraph};

fn cube_scene(scale: Vec3) -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let cube = scene.spawn("cube", Transform::IDENTITY.with_scale(scale));
    scene
        .add_geometry(cube, Geometry::unit_cube_mesh())
        .expect("cube exists");
    (scene, cube)
}

fn settings() -> BoundsSettings {
    BoundsSettings::default()
        .with_method(BoundsMethod::MeshFilterBounds)
        .with_flatten_preference(FlattenMode::FlattenAuto)
        .with_flatten_limits(0.025, 0.01)
}

#[test]
fn unit_cube_is_not_flattened() {
    let (scene, cube) = cube_scene(Vec3::ONE);
    let snapshot = compute_bounds(&scene, Some(cube), &settings());

    assert!(snapshot.scale.abs_diff_eq(Vec3::ONE, 1e-6));
    assert_eq!(snapshot.flattened_axis, None);

    let frame = GizmoConfig::default().frame(&snapshot);
    let set = HandleSet::compute(&frame.bounds, frame.flattened_axis);
    assert_eq!(set.len(), handles::HANDLE_COUNT_3D);
}

#[test]
fn thin_cube_flattens_z() {
    let (scene, cube) = cube_scene(Vec3::new(1.0, 1.0, 0.005));
    let snapshot = compute_bounds(&scene, Some(cube), &settings());

    assert_eq!(snapshot.flattened_axis, Some(Axis::Z));
    assert_relative_eq!(snapshot.scale.z, 0.01, epsilon = 1e-6);
    assert_relative_eq!(snapshot.raw_scale.z, 0.005, epsilon = 1e-6);
    assert_relative_eq!(snapshot.scale.x, 1.0, epsilon = 1e-6);

    let frame = GizmoConfig::default().frame(&snapshot);
    let set = HandleSet::compute(&frame.bounds, frame.flattened_axis);
    assert_eq!(set.len(), handles::flat::HANDLE_COUNT_2D);
}

#[test]
fn snapshot_tracks_target_changes() {
    let (mut scene, cube) = cube_scene(Vec3::ONE);
    let before = compute_bounds(&scene, Some(cube), &settings());

    scene
        .set_world_position(cube, Vec3::new(0.0, 2.0, 0.0))
        .expect("cube exists");
    let after = compute_bounds(&scene, Some(cube), &settings());

    assert_ne!(before.world_center, after.world_center);
    assert!(after.world_center.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
    assert_eq!(before.scale, after.scale);
}

#[test]
fn destroyed_target_reads_as_empty() {
    let (mut scene, cube) = cube_scene(Vec3::ONE);
    scene.destroy(cube).expect("cube exists");
    assert_eq!(
        compute_bounds(&scene, Some(cube), &settings()),
        BoundsSnapshot::EMPTY
    );
}
