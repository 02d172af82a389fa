// scene/graph.rs
//
// Scene graph arena. Nodes are indexed by NodeId, each with a local transform
// and a cached world matrix.
//
// Usage:
//   let mut graph = SceneGraph::new();
//   let group = graph.add(NodeKind::Group, None, Transform::IDENTITY);
//   let core = graph.add(NodeKind::Core, Some(group), Transform::IDENTITY);
//   graph.local_mut(group).rotation.y += 0.1;
//   graph.propagate();  // Updates world matrices from local transforms

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Index of a node in its [`SceneGraph`]. Only minted by [`SceneGraph::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// What a node renders as. The bridge uses the numeric code to rebuild the
/// same tree on the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeKind {
    Group = 0,
    Core = 1,
    Bloom = 2,
    Corona = 3,
    Ribbon = 4,
    Ring = 5,
    Belt = 6,
    Shards = 7,
    Stars = 8,
}

impl NodeKind {
    pub fn code(self) -> f32 {
        self as u8 as f32
    }
}

/// Position, XYZ Euler rotation and scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Transform,
    world: Mat4,
}

/// Tree of renderable nodes. Parents are always inserted before their
/// children, so insertion order is a valid top-down traversal.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    /// Set when a local transform may have changed, cleared after propagate.
    dirty: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a root).
    pub fn add(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        local: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
            local,
            world: local.matrix(),
        });
        match parent {
            Some(p) => self.node_mut(p).children.push(id),
            None => self.roots.push(id),
        }
        self.dirty = true;
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn local(&self, id: NodeId) -> &Transform {
        &self.node(id).local
    }

    pub fn local_mut(&mut self, id: NodeId) -> &mut Transform {
        self.dirty = true;
        &mut self.node_mut(id).local
    }

    /// World matrix as of the last [`propagate`](Self::propagate).
    pub fn world(&self, id: NodeId) -> Mat4 {
        self.node(id).world
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// All node ids in insertion (top-down) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Propagate local transforms from roots down through the hierarchy.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        let roots = self.roots.clone();
        for root in roots {
            self.propagate_recursive(root, Mat4::IDENTITY);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&mut self, id: NodeId, parent_world: Mat4) {
        let world = parent_world * self.node(id).local.matrix();
        self.node_mut(id).world = world;
        let children = self.node(id).children.clone();
        for child in children {
            self.propagate_recursive(child, world);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_child_relationship() {
        let mut graph = SceneGraph::new();
        let parent = graph.add(NodeKind::Group, None, Transform::IDENTITY);
        let child = graph.add(NodeKind::Core, Some(parent), Transform::IDENTITY);

        assert_eq!(graph.parent(child), Some(parent));
        assert_eq!(graph.children(parent), [child].as_slice());
    }

    #[test]
    fn propagate_composes_parent_scale_and_offset() {
        let mut graph = SceneGraph::new();
        let parent = graph.add(
            NodeKind::Group,
            None,
            Transform {
                position: Vec3::new(1.0, 0.0, 0.0),
                ..Transform::IDENTITY.with_scale(Vec3::splat(2.0))
            },
        );
        let child = graph.add(
            NodeKind::Ring,
            Some(parent),
            Transform {
                position: Vec3::new(0.5, 0.0, 0.0),
                ..Transform::IDENTITY
            },
        );
        graph.propagate();

        let p = graph.world(child).transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5, "got {p}");
    }

    #[test]
    fn local_mut_marks_dirty() {
        let mut graph = SceneGraph::new();
        let id = graph.add(NodeKind::Stars, None, Transform::IDENTITY);
        graph.propagate();
        assert!(!graph.dirty);

        graph.local_mut(id).rotation.y = std::f32::consts::FRAC_PI_2;
        assert!(graph.dirty);
        graph.propagate();

        let p = graph.world(id).transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5, "got {p}");
    }
}
