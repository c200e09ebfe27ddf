//! The scene graph contract

use glam::{Affine3A, Quat, Vec3};
use hux_core::{HuxError, NodeId, Result, Transform};

use crate::geometry::Geometry;

/// What the toolkit needs from the host scene.
///
/// Implementors provide storage access; point conversion and world-space accessors
/// are derived from the parent chain. Queries on a node that no longer exists return
/// `None` (or an empty list) so callers can treat a destroyed target as an empty
/// state instead of an error.
pub trait SceneGraph {
    /// Whether the node is alive
    fn contains(&self, node: NodeId) -> bool;

    /// Transform relative to the parent
    fn local_transform(&self, node: NodeId) -> Option<Transform>;

    /// Replace the transform relative to the parent
    fn set_local_transform(&mut self, node: NodeId, transform: Transform) -> Result<()>;

    /// Parent node, if any
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children in insertion order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Layer tag used to exclude nodes from bounds aggregation
    fn layer(&self, node: NodeId) -> Option<u32>;

    /// Whether the node takes part in the scene
    fn is_active(&self, node: NodeId) -> bool;

    /// Geometry components on the node
    fn geometry(&self, node: NodeId) -> &[Geometry];

    /// Destroy the node and its whole subtree
    fn destroy(&mut self, node: NodeId) -> Result<()>;

    /// The node followed by all of its descendants, depth first
    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(node) {
            return out;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            let children = self.children(current);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Like [`subtree`](Self::subtree), but stops at inactive nodes: an inactive node
    /// hides everything below it
    fn active_subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !self.contains(current) || !self.is_active(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    /// Local-to-world matrix through the parent chain
    fn world_matrix(&self, node: NodeId) -> Option<Affine3A> {
        let mut matrix = self.local_transform(node)?.to_affine();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            matrix = self.local_transform(parent)?.to_affine() * matrix;
            current = self.parent(parent);
        }
        Some(matrix)
    }

    /// Convert a point from the node's local space to world space
    fn transform_point(&self, node: NodeId, point: Vec3) -> Option<Vec3> {
        let mut result = self.local_transform(node)?.transform_point(point);
        let mut current = self.parent(node);
        while let Some(parent) = current {
            result = self.local_transform(parent)?.transform_point(result);
            current = self.parent(parent);
        }
        Some(result)
    }

    /// Convert a world-space point into the node's local space.
    ///
    /// Walks root to node applying each inverse, so a zero scale anywhere in the
    /// chain collapses the coordinate instead of producing NaN.
    fn inverse_transform_point(&self, node: NodeId, point: Vec3) -> Option<Vec3> {
        let mut chain = vec![self.local_transform(node)?];
        let mut current = self.parent(node);
        while let Some(parent) = current {
            chain.push(self.local_transform(parent)?);
            current = self.parent(parent);
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(point, |p, transform| transform.inverse_transform_point(p)),
        )
    }

    /// World-space position
    fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.transform_point(node, Vec3::ZERO)
    }

    /// World-space rotation
    fn world_rotation(&self, node: NodeId) -> Option<Quat> {
        let mut rotation = self.local_transform(node)?.rotation;
        let mut current = self.parent(node);
        while let Some(parent) = current {
            rotation = self.local_transform(parent)?.rotation * rotation;
            current = self.parent(parent);
        }
        Some(rotation)
    }

    /// Scale relative to the parent
    fn local_scale(&self, node: NodeId) -> Option<Vec3> {
        self.local_transform(node).map(|t| t.scale)
    }

    /// Move the node so its origin lands on a world-space point
    fn set_world_position(&mut self, node: NodeId, position: Vec3) -> Result<()> {
        let mut transform = self
            .local_transform(node)
            .ok_or(HuxError::NodeNotFound(node))?;
        transform.position = match self.parent(node) {
            Some(parent) => self
                .inverse_transform_point(parent, position)
                .ok_or(HuxError::NodeNotFound(parent))?,
            None => position,
        };
        self.set_local_transform(node, transform)
    }

    /// Orient the node to a world-space rotation
    fn set_world_rotation(&mut self, node: NodeId, rotation: Quat) -> Result<()> {
        let mut transform = self
            .local_transform(node)
            .ok_or(HuxError::NodeNotFound(node))?;
        transform.rotation = match self.parent(node) {
            Some(parent) => {
                let parent_rotation = self
                    .world_rotation(parent)
                    .ok_or(HuxError::NodeNotFound(parent))?;
                (parent_rotation.inverse() * rotation).normalize()
            }
            None => rotation.normalize(),
        };
        self.set_local_transform(node, transform)
    }

    /// Replace the scale relative to the parent
    fn set_local_scale(&mut self, node: NodeId, scale: Vec3) -> Result<()> {
        let mut transform = self
            .local_transform(node)
            .ok_or(HuxError::NodeNotFound(node))?;
        transform.scale = scale;
        self.set_local_transform(node, transform)
    }
}
