//! Arena-backed scene graph.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use tracing::{debug, trace};

use crate::light::Light;
use crate::material::{Material, PointsMaterial};
use crate::mesh::Geometry;
use crate::transform::Transform;

/// Generation-checked handle to a node.
///
/// A handle whose node was removed never resolves again, even if the slot is
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// What a node draws or emits.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only grouping node.
    Group,
    Mesh {
        geometry: Geometry,
        material: Material,
    },
    /// Point cloud with static positions.
    Points {
        positions: Arc<[Vec3]>,
        material: PointsMaterial,
    },
    Light(Light),
}

/// A scene graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh { geometry, material })
    }

    pub fn points(name: impl Into<String>, positions: Arc<[Vec3]>, material: PointsMaterial) -> Self {
        Self::new(name, NodeKind::Points { positions, material })
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The material of a mesh node.
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match &mut self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            _ => None,
        }
    }

    /// The light of a light node.
    pub fn light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// The material of a point cloud node.
    pub fn points_material_mut(&mut self) -> Option<&mut PointsMaterial> {
        match &mut self.kind {
            NodeKind::Points { material, .. } => Some(material),
            _ => None,
        }
    }
}

/// Errors from structural graph edits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// The parent handle does not resolve to a live node.
    #[error("parent node {0:?} does not exist")]
    MissingParent(NodeId),
    /// The root cannot be removed.
    #[error("the root node cannot be removed")]
    RemoveRoot,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Retained node tree with a permanent root group.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    len: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::group("root")),
            }],
            free: Vec::new(),
            root,
            len: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; the root is permanent.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Insert `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, GraphError> {
        if !self.contains(parent) {
            return Err(GraphError::MissingParent(parent));
        }
        node.parent = Some(parent);
        node.children.clear();

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };

        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.len += 1;
        trace!("Added node {:?} under {:?}", id, parent);
        Ok(id)
    }

    /// Remove a node and its whole subtree. Returns the number of nodes
    /// removed, 0 if `id` was already gone.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, GraphError> {
        if id == self.root {
            return Err(GraphError::RemoveRoot);
        }
        let Some(parent) = self.get(id).map(|node| node.parent) else {
            return Ok(0);
        };
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                removed += 1;
            }
        }
        self.len -= removed;
        debug!("Removed subtree {:?} ({} nodes)", id, removed);
        Ok(removed)
    }

    /// World matrix of a node, composing every ancestor's local transform.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.get(id)?;
        let mut matrix = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            matrix = node.transform.matrix() * matrix;
        }
        Some(matrix)
    }

    /// Depth-first pre-order walk from the root.
    pub fn walk(&self) -> Vec<(NodeId, &Node)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                out.push((id, node));
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// First node with the given name, in walk order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }
}
