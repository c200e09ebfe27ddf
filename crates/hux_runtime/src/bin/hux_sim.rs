//! HUX simulation
//!
//! Runs a scripted manipulation session against an in-memory scene and logs every
//! step: select a cube, enter manipulation, drag it with a controller, scale it and
//! rotate it with a hand, finish, then remove it.
//!
//! Run with: cargo run -p hux_runtime --bin hux_sim
//! Configuration: set `HUX_CONFIG` to a TOML file, otherwise defaults are used.

use std::error::Error;

use glam::{Quat, Vec3};
use hux_appbar::{ButtonType, CountingFactory};
use hux_bounds::handles::{LTF_LBF, RTB};
use hux_core::{NodeId, Transform};
use hux_input::{ControllerFrame, Hand, HandFrame, Pose};
use hux_runtime::prelude::*;
use hux_scene::{Geometry, Scene, SceneGraph};
use log::info;

const DT: f32 = 1.0 / 60.0;
const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("Simulation failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = HuxConfig::from_env()?;
    let mut session = ManipulationSession::new(config)?;
    let mut factory = CountingFactory::new();
    session.start(&mut factory);

    let (mut scene, cube) = build_scene()?;
    session.select(&scene, Some(cube), None);
    idle(&mut session, &mut scene, 1.0);
    report(&scene, cube, "selected");

    session.step(&mut scene, &FrameInput::idle(DT, HEAD).with_tap(ButtonType::Adjust));
    idle(&mut session, &mut scene, 0.1);
    info!("App bar: {:?}", session.app_bar().state());

    drag(&mut session, &mut scene);
    report(&scene, cube, "dragged");

    scale(&mut session, &mut scene);
    report(&scene, cube, "scaled");

    rotate(&mut session, &mut scene);
    report(&scene, cube, "rotated");

    session.step(&mut scene, &FrameInput::idle(DT, HEAD).with_tap(ButtonType::Done));
    idle(&mut session, &mut scene, 0.6);
    info!("App bar: {:?}", session.app_bar().state());

    let out = session.step(&mut scene, &FrameInput::idle(DT, HEAD).with_tap(ButtonType::Remove));
    info!(
        "Removed: cube in scene = {}, target = {:?}, bar visible = {}",
        scene.contains(cube),
        out.target,
        out.app_bar_visible
    );
    Ok(())
}

fn build_scene() -> Result<(Scene, NodeId), Box<dyn Error>> {
    let mut scene = Scene::new();
    let table = scene.spawn("table", Transform::from_position(Vec3::new(0.0, 0.8, -1.5)));
    let cube = scene.spawn_child(
        table,
        "cube",
        Transform::from_position(Vec3::new(0.0, 0.2, 0.0)).with_scale(Vec3::splat(0.3)),
    )?;
    scene.add_geometry(cube, Geometry::unit_cube_mesh())?;
    Ok((scene, cube))
}

fn idle(session: &mut ManipulationSession, scene: &mut Scene, seconds: f32) {
    let frames = (seconds / DT).round() as usize;
    for _ in 0..frames {
        session.step(scene, &FrameInput::idle(DT, HEAD));
    }
}

fn report(scene: &Scene, cube: NodeId, label: &str) {
    info!(
        "{:>8}: position {:?}, rotation {:?}, scale {:?}",
        label,
        scene.world_position(cube).unwrap_or_default(),
        scene.world_rotation(cube).unwrap_or_default(),
        scene.local_scale(cube).unwrap_or_default()
    );
}

/// Point the controller at the cube, pull the trigger and sweep sideways
fn drag(session: &mut ManipulationSession, scene: &mut Scene) {
    let center = session.manipulator().snapshot().world_center;
    let aim = |offset: Vec3, trigger: f32| ControllerFrame {
        tracked: true,
        aim_pose: Pose::new(HEAD + offset, look_at(HEAD + offset, center + offset)),
        trigger,
    };

    for i in 0..=30 {
        let offset = Vec3::new(0.01 * i as f32, 0.0, 0.0);
        let input = FrameInput::idle(DT, HEAD).with_controller(aim(offset, 1.0));
        let out = session.step(scene, &input);
        if i == 0 {
            info!("Controller grabbed: {:?}", out.manipulation.current_operation);
        }
    }
    let release = aim(Vec3::new(0.3, 0.0, 0.0), 0.0);
    session.step(scene, &FrameInput::idle(DT, HEAD).with_controller(release));
}

/// Pinch a corner and pull it away from the center
fn scale(session: &mut ManipulationSession, scene: &mut Scene) {
    let Some(corner) = session.manipulator().handles().get(RTB) else {
        return;
    };
    let center = session.manipulator().snapshot().world_center;
    pinch_along(session, scene, |t| center + (corner - center) * (1.0 + 0.5 * t));
}

/// Pinch a vertical edge and sweep it a quarter turn around the center
fn rotate(session: &mut ManipulationSession, scene: &mut Scene) {
    let Some(edge) = session.manipulator().handles().get(LTF_LBF) else {
        return;
    };
    let center = session.manipulator().snapshot().world_center;
    pinch_along(session, scene, |t| {
        center + Quat::from_rotation_y(std::f32::consts::FRAC_PI_2 * t) * (edge - center)
    });
}

/// Track the right hand long enough to become visible, then pinch and follow a path
fn pinch_along(
    session: &mut ManipulationSession,
    scene: &mut Scene,
    path: impl Fn(f32) -> Vec3,
) {
    let hand = |position: Vec3, pinch: f32| HandFrame {
        tracked: true,
        pose: Pose::from_position(position),
        pinch_strength: pinch,
    };
    let start = path(0.0);
    let min_visible = session.config().input.hand_min_visible_time;
    let warmup = (min_visible / DT).ceil() as usize + 1;
    for _ in 0..warmup {
        session.step(
            scene,
            &FrameInput::idle(DT, HEAD).with_hand(Hand::Right, hand(start, 0.0)),
        );
    }

    let steps = 30;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let out = session.step(
            scene,
            &FrameInput::idle(DT, HEAD).with_hand(Hand::Right, hand(path(t), 1.0)),
        );
        if i == 0 {
            info!("Hand grabbed: {:?}", out.manipulation.current_operation);
        }
    }
    session.step(
        scene,
        &FrameInput::idle(DT, HEAD).with_hand(Hand::Right, hand(path(1.0), 0.0)),
    );
    // Hand leaves tracking
    session.step(scene, &FrameInput::idle(DT, HEAD));
}

/// Rotation whose forward (-Z) points from `from` to `to`
fn look_at(from: Vec3, to: Vec3) -> Quat {
    let direction = (to - from).normalize_or_zero();
    if direction == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::NEG_Z, direction)
}
