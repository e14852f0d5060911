//! Scene graph: an arena-owned tree of transformable nodes.
//!
//! The [`Scene`] owns every node; [`NodeId`] handles index into it. A node is
//! a local transform, parent/children links and a tagged payload -- plain
//! group, camera, mesh or light. Traversal and transform composition work
//! uniformly over all payloads.

pub mod camera;
pub mod light;
pub mod mesh;

use cgmath::{Matrix4, SquareMatrix, Vector3};

pub use camera::Camera;
pub use light::{Light, LightKind, LightState};
pub use mesh::Mesh;

use crate::math;

/// Handle to a node inside a [`Scene`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

/// Frame of reference for a transform mutation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransformSpace {
    /// Post-multiply: the new transformation happens in the node's own local
    /// frame, before the existing local transform.
    Local,
    /// Pre-multiply: the new transformation happens in the parent's frame.
    Global,
}

/// The payload carried by a node.
pub enum NodeKind {
    Group,
    Camera(Camera),
    Mesh(Mesh),
    Light(Light),
}

pub struct Node {
    transform: Matrix4<f32>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// The scene tree. The root is a plain group node owning everything else
/// transitively.
///
/// The tree discipline is enforced by construction: a node is in at most one
/// parent's child list and cycles are never created by `add`/`remove`.
/// Detached nodes stay in the arena (their handles remain valid) but are
/// unreachable from traversal.
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                transform: Matrix4::identity(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Group,
            }],
        }
    }

    /// The root group node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached node carrying `kind`; attach it with [`Scene::add`].
    pub fn spawn(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            transform: Matrix4::identity(),
            parent: None,
            children: Vec::new(),
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Makes `child` the last child of `parent`. A child already attached
    /// elsewhere is unlinked from its old parent first.
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlinks `child` from its parent, if any. The node and its own subtree
    /// stay intact, just detached from the tree.
    pub fn remove(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn kind_mut(&mut self, node: NodeId) -> &mut NodeKind {
        &mut self.nodes[node.0].kind
    }

    /// The camera payload of `node`, when it carries one.
    pub fn camera(&self, node: NodeId) -> Option<&Camera> {
        match &self.nodes[node.0].kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// The mesh payload of `node`, when it carries one.
    pub fn mesh(&self, node: NodeId) -> Option<&Mesh> {
        match &self.nodes[node.0].kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, node: NodeId) -> Option<&mut Mesh> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn transform(&self, node: NodeId) -> Matrix4<f32> {
        self.nodes[node.0].transform
    }

    pub fn set_transform(&mut self, node: NodeId, transform: Matrix4<f32>) {
        self.nodes[node.0].transform = transform;
    }

    /// The transform mapping the node's local frame to the root frame:
    /// the product of every ancestor transform down to the node's own.
    pub fn world_matrix(&self, node: NodeId) -> Matrix4<f32> {
        let mut matrix = self.nodes[node.0].transform;
        let mut current = self.nodes[node.0].parent;
        while let Some(parent) = current {
            matrix = self.nodes[parent.0].transform * matrix;
            current = self.nodes[parent.0].parent;
        }
        matrix
    }

    /// Flattens the subtree under `node` into a list, pre-order: the node
    /// itself first, then each child's subtree depth-first. The order is
    /// deterministic.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            // reversed so the first child is processed next
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Composes `matrix` onto the node's transform, post-multiplying for
    /// [`TransformSpace::Local`] and pre-multiplying for
    /// [`TransformSpace::Global`].
    pub fn apply_matrix(&mut self, node: NodeId, matrix: Matrix4<f32>, space: TransformSpace) {
        let transform = &mut self.nodes[node.0].transform;
        *transform = match space {
            TransformSpace::Local => *transform * matrix,
            TransformSpace::Global => matrix * *transform,
        };
    }

    pub fn translate(&mut self, node: NodeId, x: f32, y: f32, z: f32, space: TransformSpace) {
        self.apply_matrix(node, math::translation(x, y, z), space);
    }

    /// Rotation about the x-axis, angle in radians.
    pub fn rotate_x(&mut self, node: NodeId, angle: f32, space: TransformSpace) {
        self.apply_matrix(node, math::rotation_x(angle), space);
    }

    /// Rotation about the y-axis, angle in radians.
    pub fn rotate_y(&mut self, node: NodeId, angle: f32, space: TransformSpace) {
        self.apply_matrix(node, math::rotation_y(angle), space);
    }

    /// Rotation about the z-axis, angle in radians.
    pub fn rotate_z(&mut self, node: NodeId, angle: f32, space: TransformSpace) {
        self.apply_matrix(node, math::rotation_z(angle), space);
    }

    pub fn scale(&mut self, node: NodeId, factor: f32, space: TransformSpace) {
        self.apply_matrix(node, math::scale(factor), space);
    }

    /// The node's position in its parent's frame.
    pub fn position(&self, node: NodeId) -> Vector3<f32> {
        self.nodes[node.0].transform.w.truncate()
    }

    /// The node's position in the root frame.
    pub fn world_position(&self, node: NodeId) -> Vector3<f32> {
        self.world_matrix(node).w.truncate()
    }

    /// Overwrites the translation column, leaving rotation and scale alone.
    pub fn set_position(&mut self, node: NodeId, position: Vector3<f32>) {
        let transform = &mut self.nodes[node.0].transform;
        transform.w.x = position.x;
        transform.w.y = position.y;
        transform.w.z = position.z;
    }

    /// Points the node at `target`.
    ///
    /// This *replaces* the whole transform with a fresh look-at matrix built
    /// from the node's current world position -- any accumulated rotation,
    /// scale or skew is discarded. Callers needing scale must reapply it.
    pub fn look_at(&mut self, node: NodeId, target: Vector3<f32>) {
        let position = self.world_position(node);
        self.nodes[node.0].transform = math::look_at(position, target);
    }

    /// The node's facing direction: its local rotation applied to the local
    /// negative z-axis.
    pub fn direction(&self, node: NodeId) -> Vector3<f32> {
        let rotation = math::rotation_part(&self.nodes[node.0].transform);
        rotation * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Turns the node to face along `direction` from its current position.
    /// Shares [`Scene::look_at`]'s transform-overwrite behavior.
    pub fn set_direction(&mut self, node: NodeId, direction: Vector3<f32>) {
        let target = self.position(node) + direction;
        self.look_at(node, target);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
