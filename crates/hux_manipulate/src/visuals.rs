//! Handle presentation
//!
//! Which handles a renderer should draw, with what shape and color, for the current
//! manipulation state. Nothing here touches the scene.

use glam::{Quat, Vec3};
use hux_bounds::{GizmoConfig, GizmoFrame, HandleRole, HandleSet};
use serde::{Deserialize, Serialize};

use crate::operation::Operation;
use crate::state::ManipulationState;

/// Mesh used for a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleShape {
    /// Scale corner
    Cube,
    /// Rotation edge
    Sphere,
}

/// Color role, resolved to an actual color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleColor {
    Inactive,
    Active,
    /// The handle being manipulated
    Target,
}

/// One handle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleVisual {
    pub index: usize,
    pub shape: HandleShape,
    pub color: HandleColor,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: f32,
}

/// Everything the gizmo draws this frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GizmoVisuals {
    /// Whether the box edges are drawn
    pub show_edges: bool,
    pub edge_color: Option<HandleColor>,
    pub handles: Vec<HandleVisual>,
}

impl GizmoVisuals {
    /// Nothing drawn
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visual for a handle index, if drawn
    pub fn handle(&self, index: usize) -> Option<&HandleVisual> {
        self.handles.iter().find(|h| h.index == index)
    }
}

/// Resolve the gizmo's appearance.
///
/// Without a target nothing is drawn. When input is not accepted only the edges are
/// drawn, if configured. Otherwise the edges and the permitted handles are drawn with
/// colors following the current operation; the idle state looks like a drag.
pub fn handle_visuals(
    state: &ManipulationState,
    handles: &HandleSet,
    frame: &GizmoFrame,
    has_target: bool,
    config: &GizmoConfig,
) -> GizmoVisuals {
    if !has_target {
        return GizmoVisuals::hidden();
    }

    if !state.accept_input {
        return GizmoVisuals {
            show_edges: config.display_edges_when_selected,
            edge_color: config
                .display_edges_when_selected
                .then_some(HandleColor::Inactive),
            handles: Vec::new(),
        };
    }

    let engaged = if state.manipulating_now {
        HandleColor::Target
    } else {
        HandleColor::Active
    };

    let (edge_color, cube_color, sphere_color) = match state.current_operation {
        Operation::None => (HandleColor::Active, HandleColor::Inactive, HandleColor::Inactive),
        Operation::Drag => (engaged, HandleColor::Inactive, HandleColor::Inactive),
        Operation::ScaleUniform => {
            (HandleColor::Inactive, HandleColor::Active, HandleColor::Inactive)
        }
        Operation::RotateX | Operation::RotateY | Operation::RotateZ => {
            (HandleColor::Inactive, HandleColor::Inactive, HandleColor::Active)
        }
    };
    let highlighted = state.active_handle.or(state.hovered_handle);
    let visuals = handles
        .iter()
        .filter(|&(_, role, _)| Operation::for_role(role).permitted_by(state.permitted_operations))
        .map(|(index, role, position)| {
            let shape = match role {
                HandleRole::Scale => HandleShape::Cube,
                HandleRole::Rotate(_) => HandleShape::Sphere,
            };
            let color = if Some(index) == highlighted {
                engaged
            } else {
                match shape {
                    HandleShape::Cube => cube_color,
                    HandleShape::Sphere => sphere_color,
                }
            };
            HandleVisual {
                index,
                shape,
                color,
                position,
                rotation: frame.bounds.rotation,
                size: frame.handle_size,
            }
        })
        .collect();

    GizmoVisuals {
        show_edges: true,
        edge_color: Some(edge_color),
        handles: visuals,
    }
}
