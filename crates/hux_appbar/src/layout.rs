//! Bar placement and button slots

use glam::{Quat, Vec3};
use hux_bounds::BoundsSnapshot;

use crate::button::{ButtonHandle, ButtonType};
use crate::config::AppBarConfig;

/// Where the bar wants to be this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
    /// Yaw-only rotation facing the box
    pub rotation: Quat,
}

/// Pick the box face nearest the viewer and place the bar below it.
///
/// Candidates sit at the centers of the four lateral faces (front, right, back, left),
/// lowered by `height * hover_offset_y_scale`. The winner is pushed out along its
/// face normal by `hover_offset_z`.
pub fn anchor(snapshot: &BoundsSnapshot, head: Vec3, config: &AppBarConfig) -> Anchor {
    let center = snapshot.world_center;
    let scale = snapshot.scale;
    let forward = snapshot.rotation * Vec3::NEG_Z;
    let right = snapshot.rotation * Vec3::X;

    let faces = [
        forward * scale.z * 0.5,
        right * scale.x * 0.5,
        -forward * scale.z * 0.5,
        -right * scale.x * 0.5,
    ];
    let drop = Vec3::Y * (-scale.y * config.hover_offset_y_scale);

    let mut best = (f32::INFINITY, center + drop, Vec3::ZERO);
    for face in faces {
        let candidate = center + face + drop;
        let distance = candidate.distance(head);
        if distance < best.0 {
            best = (distance, candidate, face);
        }
    }

    let (_, position, face) = best;
    let position = position + face.normalize_or_zero() * config.hover_offset_z;
    Anchor {
        position,
        rotation: yaw_towards(position, center),
    }
}

/// Rotation about +Y turning forward (-Z) towards `to`, ignoring height difference
pub fn yaw_towards(from: Vec3, to: Vec3) -> Quat {
    let d = to - from;
    if d.x.abs() < f32::EPSILON && d.z.abs() < f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y((-d.x).atan2(-d.z))
}

/// A visible button and its offset from the bar origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    pub button_type: ButtonType,
    pub handle: ButtonHandle,
    pub slot: usize,
    /// Offset in bar space, centered on the bar
    pub offset: Vec3,
}

/// Spread `slots` across a bar centered on its origin
pub fn slot_offset(slot: usize, count: usize, spacing: f32) -> Vec3 {
    let middle = (count.max(1) as f32 - 1.0) * 0.5;
    Vec3::new((slot as f32 - middle) * spacing, 0.0, 0.0)
}
