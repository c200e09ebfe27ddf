//! Handle positions around an oriented box.
//!
//! Letters name the side of the box a handle sits on: `L`/`R` for -X/+X, `B`/`T`
//! for -Y/+Y and `F`/`B` for -Z/+Z (front faces -Z). Corner handles scale; edge
//! midpoint handles rotate about the axis their edge runs along.
//!
//! A flattened box uses a 4 + 4 layout in the plane spanned by the two remaining
//! axes ([`Axis::plane_axes`]), where `L`/`R` follow the horizontal plane axis and
//! `B`/`T` the vertical one. Rotation about the flattened axis has no handle in
//! that layout.

use glam::Vec3;
use hux_core::{Axis, HuxError, Result};

use crate::frame::OrientedBox;

pub const LBF: usize = 0;
pub const LBB: usize = 1;
pub const LTF: usize = 2;
pub const LTB: usize = 3;
pub const RBF: usize = 4;
pub const RBB: usize = 5;
pub const RTF: usize = 6;
pub const RTB: usize = 7;

// Edges along X
pub const LTF_RTF: usize = 8;
pub const LBF_RBF: usize = 9;
pub const RTB_LTB: usize = 10;
pub const RBB_LBB: usize = 11;

// Edges along Y
pub const LTF_LBF: usize = 12;
pub const RTB_RBB: usize = 13;
pub const LTB_LBB: usize = 14;
pub const RTF_RBF: usize = 15;

// Edges along Z
pub const RBF_RBB: usize = 16;
pub const RTF_RTB: usize = 17;
pub const LBF_LBB: usize = 18;
pub const LTF_LTB: usize = 19;

/// Number of handles around an unflattened box
pub const HANDLE_COUNT_3D: usize = 20;

/// Handle indices of the flattened layout
pub mod flat {
    pub const LT: usize = 0;
    pub const LB: usize = 1;
    pub const RT: usize = 2;
    pub const RB: usize = 3;
    pub const LT_RT: usize = 4;
    pub const RT_RB: usize = 5;
    pub const RB_LB: usize = 6;
    pub const LB_LT: usize = 7;

    /// Number of handles around a flattened box
    pub const HANDLE_COUNT_2D: usize = 8;
}

/// Endpoints of each 3D edge handle, in index order from `LTF_RTF`
const EDGES_3D: [(usize, usize); 12] = [
    (LTF, RTF),
    (LBF, RBF),
    (RTB, LTB),
    (RBB, LBB),
    (LTF, LBF),
    (RTB, RBB),
    (LTB, LBB),
    (RTF, RBF),
    (RBF, RBB),
    (RTF, RTB),
    (LBF, LBB),
    (LTF, LTB),
];

/// Endpoints of each 2D edge handle, in index order from `LT_RT`
const EDGES_2D: [(usize, usize); 4] = [
    (flat::LT, flat::RT),
    (flat::RT, flat::RB),
    (flat::RB, flat::LB),
    (flat::LB, flat::LT),
];

/// What a handle does when grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Corner: uniform scale
    Scale,
    /// Edge midpoint: rotation about a box axis
    Rotate(Axis),
}

/// Ordered handle positions with stable semantic indices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandleSet {
    positions: Vec<Vec3>,
    flattened_axis: Option<Axis>,
}

impl HandleSet {
    /// A set with no handles, used when there is no target
    pub fn empty() -> Self {
        Self::default()
    }

    /// Handles for a box, in the 3D layout or the flattened 2D one
    pub fn compute(bounds: &OrientedBox, flattened_axis: Option<Axis>) -> Self {
        match flattened_axis {
            None => Self::compute_3d(bounds),
            Some(axis) => Self::compute_2d(bounds, axis),
        }
    }

    /// 8 corners followed by 12 edge midpoints
    pub fn compute_3d(bounds: &OrientedBox) -> Self {
        let h = bounds.half_extents();
        let mut local = Vec::with_capacity(HANDLE_COUNT_3D);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    local.push(Vec3::new(sx * h.x, sy * h.y, sz * h.z));
                }
            }
        }
        for (a, b) in EDGES_3D {
            local.push((local[a] + local[b]) * 0.5);
        }

        Self {
            positions: local.into_iter().map(|p| bounds.to_world(p)).collect(),
            flattened_axis: None,
        }
    }

    /// 4 corners followed by 4 edge midpoints in the plane perpendicular to `flattened`
    pub fn compute_2d(bounds: &OrientedBox, flattened: Axis) -> Self {
        let (u, v) = flattened.plane_axes();
        let h = bounds.half_extents();
        let corner = |su: f32, sv: f32| {
            let mut p = Vec3::ZERO;
            u.set(&mut p, su * u.get(h));
            v.set(&mut p, sv * v.get(h));
            p
        };

        let mut local = Vec::with_capacity(flat::HANDLE_COUNT_2D);
        local.push(corner(-1.0, 1.0));
        local.push(corner(-1.0, -1.0));
        local.push(corner(1.0, 1.0));
        local.push(corner(1.0, -1.0));
        for (a, b) in EDGES_2D {
            local.push((local[a] + local[b]) * 0.5);
        }

        Self {
            positions: local.into_iter().map(|p| bounds.to_world(p)).collect(),
            flattened_axis: Some(flattened),
        }
    }

    /// Number of handles
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no handles
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The flattened axis this layout was built for
    pub fn flattened_axis(&self) -> Option<Axis> {
        self.flattened_axis
    }

    /// Handle position, if the index is in range
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Handle position, failing on an out-of-range index
    pub fn try_get(&self, index: usize) -> Result<Vec3> {
        self.get(index).ok_or(HuxError::HandleIndexOutOfRange {
            index,
            len: self.positions.len(),
        })
    }

    /// All positions in index order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Role of the handle at `index`
    pub fn role(&self, index: usize) -> Option<HandleRole> {
        if index >= self.positions.len() {
            return None;
        }
        match self.flattened_axis {
            None => role_3d(index),
            Some(axis) => role_2d(index, axis),
        }
    }

    /// Indices paired with their roles
    pub fn iter(&self) -> impl Iterator<Item = (usize, HandleRole, Vec3)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| self.role(i).map(|role| (i, role, p)))
    }
}

fn role_3d(index: usize) -> Option<HandleRole> {
    match index {
        LBF..=RTB => Some(HandleRole::Scale),
        LTF_RTF..=RBB_LBB => Some(HandleRole::Rotate(Axis::X)),
        LTF_LBF..=RTF_RBF => Some(HandleRole::Rotate(Axis::Y)),
        RBF_RBB..=LTF_LTB => Some(HandleRole::Rotate(Axis::Z)),
        _ => None,
    }
}

fn role_2d(index: usize, flattened: Axis) -> Option<HandleRole> {
    let (u, v) = flattened.plane_axes();
    match index {
        flat::LT..=flat::RB => Some(HandleRole::Scale),
        flat::LT_RT | flat::RB_LB => Some(HandleRole::Rotate(u)),
        flat::RT_RB | flat::LB_LT => Some(HandleRole::Rotate(v)),
        _ => None,
    }
}
