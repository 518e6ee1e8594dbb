//! Scene-graph seam between the rig and whatever engine holds the model.
//!
//! The rig only needs to walk node names once and then write local rotation
//! and scale per joint per frame, so that is all [`SceneGraph`] asks for.
//! [`Model`] is the in-crate implementation used by both front ends.

use crate::error::{Result, RigError};
use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub trait SceneGraph {
    /// Visit every node depth-first, parents before children, siblings in
    /// insertion order.
    fn visit_depth_first(&self, visit: &mut dyn FnMut(NodeId, &str));

    fn local_rotation(&self, node: NodeId) -> Option<Quat>;

    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat);

    fn set_uniform_scale(&mut self, node: NodeId, scale: f32);
}

#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl ModelNode {
    fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: SmallVec::new(),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Arena-backed node hierarchy with local rotation/scale per node.
#[derive(Debug, Clone)]
pub struct Model {
    nodes: Vec<ModelNode>,
}

impl Model {
    /// A model with a single root node.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![ModelNode::new(root_name, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ModelNode::new(name, Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent.index()) {
            p.children.push(id);
        }
        id
    }

    /// Build from a flat description: `parents[i]` is the index of node `i`'s
    /// parent, or negative for a root. Parents must precede their children.
    /// Extra roots are attached under the first one.
    pub fn from_parents<S: AsRef<str>>(names: &[S], parents: &[i32]) -> Result<Self> {
        if names.is_empty() {
            return Err(RigError::EmptyModel);
        }
        if names.len() != parents.len() {
            return Err(RigError::ModelShape {
                names: names.len(),
                parents: parents.len(),
            });
        }
        let mut model = Model::new(names[0].as_ref());
        for (i, (name, &parent)) in names.iter().zip(parents).enumerate().skip(1) {
            let parent_id = if parent < 0 {
                model.root()
            } else if (parent as usize) < i {
                NodeId(parent as u32)
            } else {
                return Err(RigError::InvalidParent { node: i, parent });
            };
            model.add_child(parent_id, name.as_ref());
        }
        Ok(model)
    }

    /// A small humanoid using common rig naming, for the native harness and
    /// tests.
    pub fn humanoid() -> Self {
        let mut m = Model::new("Robot");
        let hips = m.add_child(m.root(), "Hips");
        let spine = m.add_child(hips, "Spine");
        let chest = m.add_child(spine, "Spine2");
        let neck = m.add_child(chest, "Neck");
        let head = m.add_child(neck, "Head");
        m.add_child(head, "Eye_L");
        m.add_child(head, "Eye_R");
        let l_shoulder = m.add_child(chest, "LeftShoulder");
        m.add_child(l_shoulder, "LeftArm");
        let r_shoulder = m.add_child(chest, "RightShoulder");
        m.add_child(r_shoulder, "RightArm");
        m
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&ModelNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    /// Per node `[qx, qy, qz, qw, scale]`, in node order.
    pub fn pose_buffer(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.nodes.len() * 5);
        for n in &self.nodes {
            out.extend_from_slice(&n.rotation.to_array());
            out.push(n.scale.x);
        }
        out
    }
}

impl SceneGraph for Model {
    fn visit_depth_first(&self, visit: &mut dyn FnMut(NodeId, &str)) {
        if self.nodes.is_empty() {
            return;
        }
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(self.root());
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id.index()) else {
                continue;
            };
            visit(id, &node.name);
            // reversed so the first child is visited first
            stack.extend(node.children.iter().rev().copied());
        }
    }

    fn local_rotation(&self, node: NodeId) -> Option<Quat> {
        self.nodes.get(node.index()).map(|n| n.rotation)
    }

    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.rotation = rotation;
        }
    }

    fn set_uniform_scale(&mut self, node: NodeId, scale: f32) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.scale = Vec3::splat(scale);
        }
    }
}
