//! Binding semantic joint roles to concrete model nodes by name.

use crate::skeleton::{NodeId, SceneGraph};
use fnv::FnvHashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointRole {
    Head,
    Neck,
    Chest,
    Spine,
    LeftShoulder,
    RightShoulder,
    LeftEye,
    RightEye,
}

impl JointRole {
    pub const ALL: [JointRole; 8] = [
        JointRole::Head,
        JointRole::Neck,
        JointRole::Chest,
        JointRole::Spine,
        JointRole::LeftShoulder,
        JointRole::RightShoulder,
        JointRole::LeftEye,
        JointRole::RightEye,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JointRole::Head => "head",
            JointRole::Neck => "neck",
            JointRole::Chest => "chest",
            JointRole::Spine => "spine",
            JointRole::LeftShoulder => "left_shoulder",
            JointRole::RightShoulder => "right_shoulder",
            JointRole::LeftEye => "left_eye",
            JointRole::RightEye => "right_eye",
        }
    }
}

impl fmt::Display for JointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Classify a node name into a joint role, or `None`.
///
/// Case-insensitive substring rules, checked in order: head (not neck), neck,
/// chest / spine2 / upperspine, spine (not "2", not "upper"), shoulder or
/// clavicle with a side, eye with a side.
pub fn classify_joint_name(name: &str) -> Option<JointRole> {
    let name = name.to_lowercase();
    let has = |s: &str| name.contains(s);

    if has("head") && !has("neck") {
        return Some(JointRole::Head);
    }
    if has("neck") {
        return Some(JointRole::Neck);
    }
    if has("chest") || has("spine2") || has("upperspine") {
        return Some(JointRole::Chest);
    }
    if has("spine") && !has("2") && !has("upper") {
        return Some(JointRole::Spine);
    }
    if let Some(keyword) = ["shoulder", "clavicle"].into_iter().find(|k| has(*k)) {
        match side_of(&name, keyword) {
            Some(Side::Left) => return Some(JointRole::LeftShoulder),
            Some(Side::Right) => return Some(JointRole::RightShoulder),
            None => {}
        }
    }
    if has("eye") {
        return match side_of(&name, "eye") {
            Some(Side::Left) => Some(JointRole::LeftEye),
            Some(Side::Right) => Some(JointRole::RightEye),
            None => None,
        };
    }
    None
}

// "left"/"right" anywhere, otherwise a standalone "l"/"r" token once the
// keyword is cut out ("shoulder" itself contains an 'l').
fn side_of(lower_name: &str, keyword: &str) -> Option<Side> {
    if lower_name.contains("left") {
        return Some(Side::Left);
    }
    if lower_name.contains("right") {
        return Some(Side::Right);
    }
    let rest = lower_name.replacen(keyword, " ", 1);
    let mut side = None;
    for t in rest.split(|c: char| !c.is_ascii_alphanumeric()) {
        match t {
            "l" => return Some(Side::Left),
            "r" if side.is_none() => side = Some(Side::Right),
            _ => {}
        }
    }
    side
}

/// Role → node handles for one model. Roles with no matching node are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointMap {
    joints: FnvHashMap<JointRole, NodeId>,
}

impl JointMap {
    /// Walk the model depth-first; the first node matching a role wins it.
    pub fn discover<G: SceneGraph + ?Sized>(model: &G) -> Self {
        let mut joints = FnvHashMap::default();
        model.visit_depth_first(&mut |id: NodeId, name: &str| {
            if let Some(role) = classify_joint_name(name) {
                joints.entry(role).or_insert(id);
            }
        });
        Self { joints }
    }

    pub fn get(&self, role: JointRole) -> Option<NodeId> {
        self.joints.get(&role).copied()
    }

    pub fn contains(&self, role: JointRole) -> bool {
        self.joints.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Populated roles in [`JointRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (JointRole, NodeId)> + '_ {
        JointRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|id| (role, id)))
    }
}
