//! In-memory scene graph

use hux_core::{HuxError, NodeId, Result, Transform};
use log::debug;

use crate::geometry::Geometry;
use crate::graph::SceneGraph;

/// Layer assigned to new nodes
pub const DEFAULT_LAYER: u32 = 0;

#[derive(Debug, Clone)]
struct Node {
    name: String,
    transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layer: u32,
    active: bool,
    geometry: Vec<Geometry>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Generational arena of scene nodes
#[derive(Debug, Clone, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the scene has no live nodes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Spawn a root node
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        let node = Node {
            name: name.into(),
            transform,
            parent: None,
            children: Vec::new(),
            layer: DEFAULT_LAYER,
            active: true,
            geometry: Vec::new(),
        };
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        }
    }

    /// Spawn a node under `parent`
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(HuxError::NodeNotFound(parent));
        }
        let child = self.spawn(name, transform);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        Ok(child)
    }

    /// Attach a geometry component
    pub fn add_geometry(&mut self, node: NodeId, geometry: Geometry) -> Result<()> {
        self.node_mut(node)
            .ok_or(HuxError::NodeNotFound(node))?
            .geometry
            .push(geometry);
        Ok(())
    }

    /// Set the layer tag
    pub fn set_layer(&mut self, node: NodeId, layer: u32) -> Result<()> {
        self.node_mut(node).ok_or(HuxError::NodeNotFound(node))?.layer = layer;
        Ok(())
    }

    /// Activate or deactivate a node
    pub fn set_active(&mut self, node: NodeId, active: bool) -> Result<()> {
        self.node_mut(node).ok_or(HuxError::NodeNotFound(node))?.active = active;
        Ok(())
    }

    /// Node name
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    /// First live node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.node
                .as_ref()
                .filter(|n| n.name == name)
                .map(|_| NodeId::new(index as u32, slot.generation))
        })
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index() as usize) {
            if slot.generation == id.generation() && slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index());
                self.len -= 1;
            }
        }
    }
}

impl SceneGraph for Scene {
    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn local_transform(&self, node: NodeId) -> Option<Transform> {
        self.node(node).map(|n| n.transform)
    }

    fn set_local_transform(&mut self, node: NodeId, transform: Transform) -> Result<()> {
        self.node_mut(node).ok_or(HuxError::NodeNotFound(node))?.transform = transform;
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn layer(&self, node: NodeId) -> Option<u32> {
        self.node(node).map(|n| n.layer)
    }

    fn is_active(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.active).unwrap_or(false)
    }

    fn geometry(&self, node: NodeId) -> &[Geometry] {
        self.node(node).map(|n| n.geometry.as_slice()).unwrap_or(&[])
    }

    fn destroy(&mut self, node: NodeId) -> Result<()> {
        if !self.contains(node) {
            return Err(HuxError::NodeNotFound(node));
        }
        if let Some(parent) = self.parent(node) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|&c| c != node);
            }
        }
        let doomed = self.subtree(node);
        debug!("Destroying node {} ({} nodes in subtree)", node, doomed.len());
        for id in doomed {
            self.release(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_spawn_and_lookup() {
        let mut scene = Scene::new();
        let a = scene.spawn("a", Transform::IDENTITY);
        assert!(scene.contains(a));
        assert_eq!(scene.name(a), Some("a"));
        assert_eq!(scene.find_by_name("a"), Some(a));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_destroy_is_recursive_and_ids_go_stale() {
        let mut scene = Scene::new();
        let root = scene.spawn("root", Transform::IDENTITY);
        let child = scene
            .spawn_child(root, "child", Transform::IDENTITY)
            .unwrap();
        let grandchild = scene
            .spawn_child(child, "grandchild", Transform::IDENTITY)
            .unwrap();

        scene.destroy(child).unwrap();
        assert!(!scene.contains(child));
        assert!(!scene.contains(grandchild));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.len(), 1);

        // Reused slot must not resurrect the old id
        let reused = scene.spawn("new", Transform::IDENTITY);
        assert_ne!(reused, child);
        assert_ne!(reused, grandchild);
        assert!(!scene.contains(child));
        assert!(scene.destroy(child).is_err());
    }

    #[test]
    fn test_world_space_through_parent_chain() {
        let mut scene = Scene::new();
        let parent = scene.spawn(
            "parent",
            Transform::new(
                Vec3::new(1.0, 0.0, 0.0),
                Quat::from_rotation_y(core::f32::consts::FRAC_PI_2),
                Vec3::splat(2.0),
            ),
        );
        let child = scene
            .spawn_child(parent, "child", Transform::from_position(Vec3::X))
            .unwrap();

        let world = scene.world_position(child).unwrap();
        // Rotating +X by 90 degrees about Y points it at -Z
        assert!(world.abs_diff_eq(Vec3::new(1.0, 0.0, -2.0), 1e-5));

        let matrix = scene.world_matrix(child).unwrap();
        assert!(matrix.transform_point3(Vec3::ZERO).abs_diff_eq(world, 1e-5));

        let p = Vec3::new(0.3, 0.2, 0.1);
        let back = scene
            .inverse_transform_point(child, scene.transform_point(child, p).unwrap())
            .unwrap();
        assert!(back.abs_diff_eq(p, 1e-5));
    }

    #[test]
    fn test_set_world_position_and_rotation_under_parent() {
        let mut scene = Scene::new();
        let parent = scene.spawn(
            "parent",
            Transform::new(Vec3::Y, Quat::from_rotation_z(0.4), Vec3::splat(0.5)),
        );
        let child = scene
            .spawn_child(parent, "child", Transform::IDENTITY)
            .unwrap();

        let target = Vec3::new(3.0, -1.0, 2.0);
        scene.set_world_position(child, target).unwrap();
        assert!(scene.world_position(child).unwrap().abs_diff_eq(target, 1e-4));

        let rotation = Quat::from_rotation_x(1.0);
        scene.set_world_rotation(child, rotation).unwrap();
        assert!(scene.world_rotation(child).unwrap().abs_diff_eq(rotation, 1e-5));
    }

    #[test]
    fn test_missing_node_queries_are_empty() {
        let mut scene = Scene::new();
        let gone = scene.spawn("gone", Transform::IDENTITY);
        scene.destroy(gone).unwrap();
        assert!(scene.world_position(gone).is_none());
        assert!(scene.geometry(gone).is_empty());
        assert!(scene.subtree(gone).is_empty());
        assert!(!scene.is_active(gone));
        assert!(scene.set_local_scale(gone, Vec3::ONE).is_err());
        assert!(scene.active_subtree(gone).is_empty());
    }

    #[test]
    fn test_active_subtree_stops_at_inactive_nodes() {
        let mut scene = Scene::new();
        let root = scene.spawn("root", Transform::IDENTITY);
        let shown = scene.spawn_child(root, "shown", Transform::IDENTITY).unwrap();
        let hidden = scene.spawn_child(root, "hidden", Transform::IDENTITY).unwrap();
        let below = scene.spawn_child(hidden, "below", Transform::IDENTITY).unwrap();
        scene.set_active(hidden, false).unwrap();

        assert_eq!(scene.active_subtree(root), vec![root, shown]);
        assert_eq!(scene.subtree(root), vec![root, shown, hidden, below]);

        scene.set_active(root, false).unwrap();
        assert!(scene.active_subtree(root).is_empty());
    }
}
