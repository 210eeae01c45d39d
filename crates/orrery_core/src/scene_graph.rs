//! Scene graph of pivots and meshes
//!
//! Nodes live in a [`SlotMap`] and reference their parent by key. World
//! matrices are composed on demand by walking the parent chain; the graph is
//! a handful of nodes deep so no caching is done.

use bitflags::bitflags;
use orrery_math::{mat4, Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};

use crate::material::{Material, MeshShape};
use crate::transform::Transform;

new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeKey;
}

bitflags! {
    /// Flags indicating which parts of a node changed since the last frame
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position, rotation or scale changed
        const TRANSFORM = 1 << 0;
        /// Material (emissive highlight) changed
        const MATERIAL = 1 << 1;
        /// Freshly created
        const ALL = Self::TRANSFORM.bits() | Self::MATERIAL.bits();
    }
}

/// What a node contributes to the frame
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Invisible grouping node; rotating it carries its children around
    Pivot,
    /// Drawable geometry
    Mesh { mesh: MeshShape, material: Material },
}

/// A single node in the graph
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeKey>,
    pub transform: Transform,
    pub kind: NodeKind,
    pub dirty: DirtyFlags,
}

impl Node {
    /// Material of a mesh node
    pub fn material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Pivot => None,
        }
    }

    /// Shape of a mesh node
    pub fn mesh(&self) -> Option<&MeshShape> {
        match &self.kind {
            NodeKind::Mesh { mesh, .. } => Some(mesh),
            NodeKind::Pivot => None,
        }
    }
}

/// Container for every transient visual object in the scene
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    /// Insertion order, so iteration is deterministic
    order: Vec<NodeKey>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, name: String, parent: Option<NodeKey>, transform: Transform, kind: NodeKind) -> NodeKey {
        let key = self.nodes.insert(Node {
            name,
            parent,
            transform,
            kind,
            dirty: DirtyFlags::ALL,
        });
        self.order.push(key);
        key
    }

    /// Add a node with no parent
    pub fn add_root(&mut self, name: impl Into<String>, transform: Transform, kind: NodeKind) -> NodeKey {
        self.insert(name.into(), None, transform, kind)
    }

    /// Add a node under `parent`
    ///
    /// Returns `None` if the parent key is stale.
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
        transform: Transform,
        kind: NodeKind,
    ) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        Some(self.insert(name.into(), Some(parent), transform, kind))
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// First node with the given name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.order
            .iter()
            .copied()
            .find(|key| self.nodes.get(*key).is_some_and(|n| n.name == name))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Local-to-world matrix of a node
    pub fn world_matrix(&self, key: NodeKey) -> Mat4 {
        let mut matrix = mat4::IDENTITY;
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(node) => {
                    matrix = mat4::mul(node.transform.to_matrix(), matrix);
                    current = node.parent;
                }
                None => break,
            }
        }
        matrix
    }

    /// World-space origin of a node
    pub fn world_position(&self, key: NodeKey) -> Vec3 {
        mat4::get_translation(self.world_matrix(key))
    }

    /// Iterate over mesh nodes in insertion order
    pub fn meshes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.order.iter().filter_map(move |key| {
            let node = self.nodes.get(*key)?;
            matches!(node.kind, NodeKind::Mesh { .. }).then_some((*key, node))
        })
    }

    /// Spin a node about its local Y axis
    pub fn rotate_y(&mut self, key: NodeKey, delta: f32) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.transform.rotate_y(delta);
            node.dirty |= DirtyFlags::TRANSFORM;
        }
    }

    /// Set a mesh node's emissive color and intensity
    ///
    /// Returns false if the key is stale or the node is a pivot.
    pub fn set_emissive(&mut self, key: NodeKey, color: [f32; 3], intensity: f32) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        match &mut node.kind {
            NodeKind::Mesh { material, .. } => {
                material.emissive = color;
                material.emissive_intensity = intensity;
                node.dirty |= DirtyFlags::MATERIAL;
                true
            }
            NodeKind::Pivot => false,
        }
    }

    /// Whether any node changed since the last `clear_dirty`
    pub fn any_dirty(&self) -> bool {
        self.nodes.values().any(|n| !n.dirty.is_empty())
    }

    /// Reset dirty flags after the renderer has consumed them
    pub fn clear_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.dirty = DirtyFlags::NONE;
        }
    }
}
