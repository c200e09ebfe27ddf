//! Manipulation operations

use bitflags::bitflags;
use hux_bounds::HandleRole;
use hux_core::Axis;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of operations a manipulator allows.
    ///
    /// Serializes as a `|`-separated list of flag names, e.g. `"DRAG | ROTATE_Y"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Operations: u32 {
        /// Move the target
        const DRAG = 1 << 0;
        /// Scale the target on all axes at once
        const SCALE_UNIFORM = 1 << 1;
        /// Rotate about the target's local X axis
        const ROTATE_X = 1 << 2;
        /// Rotate about the target's local Y axis
        const ROTATE_Y = 1 << 3;
        /// Rotate about the target's local Z axis
        const ROTATE_Z = 1 << 4;
    }
}

impl Default for Operations {
    fn default() -> Self {
        Operations::SCALE_UNIFORM | Operations::ROTATE_Y | Operations::DRAG
    }
}

/// The operation in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    None,
    Drag,
    ScaleUniform,
    RotateX,
    RotateY,
    RotateZ,
}

impl Operation {
    /// Flag for this operation (`None` maps to the empty set)
    pub fn flag(self) -> Operations {
        match self {
            Operation::None => Operations::empty(),
            Operation::Drag => Operations::DRAG,
            Operation::ScaleUniform => Operations::SCALE_UNIFORM,
            Operation::RotateX => Operations::ROTATE_X,
            Operation::RotateY => Operations::ROTATE_Y,
            Operation::RotateZ => Operations::ROTATE_Z,
        }
    }

    /// Rotation operation about an axis
    pub fn rotate(axis: Axis) -> Self {
        match axis {
            Axis::X => Operation::RotateX,
            Axis::Y => Operation::RotateY,
            Axis::Z => Operation::RotateZ,
        }
    }

    /// Axis of a rotation operation
    pub fn rotation_axis(self) -> Option<Axis> {
        match self {
            Operation::RotateX => Some(Axis::X),
            Operation::RotateY => Some(Axis::Y),
            Operation::RotateZ => Some(Axis::Z),
            _ => None,
        }
    }

    /// Operation started by grabbing a handle with this role
    pub fn for_role(role: HandleRole) -> Self {
        match role {
            HandleRole::Scale => Operation::ScaleUniform,
            HandleRole::Rotate(axis) => Operation::rotate(axis),
        }
    }

    /// Whether a set permits this operation. `None` is always permitted.
    pub fn permitted_by(self, permitted: Operations) -> bool {
        permitted.contains(self.flag())
    }

    pub fn is_rotation(self) -> bool {
        self.rotation_axis().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_permitted_operations() {
        let ops = Operations::default();
        assert!(Operation::Drag.permitted_by(ops));
        assert!(Operation::ScaleUniform.permitted_by(ops));
        assert!(Operation::RotateY.permitted_by(ops));
        assert!(!Operation::RotateX.permitted_by(ops));
        assert!(Operation::None.permitted_by(Operations::empty()));
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(Operation::for_role(HandleRole::Scale), Operation::ScaleUniform);
        assert_eq!(
            Operation::for_role(HandleRole::Rotate(Axis::Z)),
            Operation::RotateZ
        );
        assert_eq!(Operation::RotateZ.rotation_axis(), Some(Axis::Z));
    }
}
