// Host-side tests for joint name classification and discovery.

use rig_core::*;

#[test]
fn classifies_common_rig_names() {
    let cases = [
        ("mixamorig:Head", Some(JointRole::Head)),
        ("Neck", Some(JointRole::Neck)),
        ("HeadNeckJoint", Some(JointRole::Neck)),
        ("Spine2", Some(JointRole::Chest)),
        ("UpperChest", Some(JointRole::Chest)),
        ("upperSpine", Some(JointRole::Chest)),
        ("Spine", Some(JointRole::Spine)),
        ("Spine1", Some(JointRole::Spine)),
        ("LeftShoulder", Some(JointRole::LeftShoulder)),
        ("RightShoulder", Some(JointRole::RightShoulder)),
        ("shoulder.L", Some(JointRole::LeftShoulder)),
        ("clavicle_r", Some(JointRole::RightShoulder)),
        ("Eye_L", Some(JointRole::LeftEye)),
        ("RightEye", Some(JointRole::RightEye)),
        ("Hips", None),
        ("LeftArm", None),
        ("Eye", None),
    ];
    for (name, expected) in cases {
        assert_eq!(classify_joint_name(name), expected, "{}", name);
    }
}

#[test]
fn shoulder_without_side_is_not_bound() {
    assert_eq!(classify_joint_name("Shoulder"), None);
    assert_eq!(classify_joint_name("clavicle"), None);
}

#[test]
fn humanoid_binds_every_role() {
    let model = Model::humanoid();
    let joints = JointMap::discover(&model);
    assert_eq!(joints.len(), JointRole::ALL.len());
    assert_eq!(joints.get(JointRole::Head), model.find("Head"));
    assert_eq!(joints.get(JointRole::Chest), model.find("Spine2"));
    assert_eq!(joints.get(JointRole::Spine), model.find("Spine"));
    assert_eq!(joints.get(JointRole::LeftEye), model.find("Eye_L"));
}

#[test]
fn discovery_is_idempotent() {
    let model = Model::humanoid();
    assert_eq!(JointMap::discover(&model), JointMap::discover(&model));
}

#[test]
fn first_match_in_depth_first_order_wins() {
    let mut m = Model::new("Root");
    let a = m.add_child(m.root(), "Armature");
    let neck = m.add_child(a, "Neck");
    let first_head = m.add_child(neck, "Head");
    m.add_child(first_head, "HeadTop_End");
    m.add_child(m.root(), "Head");
    let joints = JointMap::discover(&m);
    assert_eq!(joints.get(JointRole::Head), Some(first_head));
}

#[test]
fn model_without_matches_has_empty_map() {
    let model = Model::from_parents(&["Root", "Bone", "Bone.001"], &[-1, 0, 1]).unwrap();
    let joints = JointMap::discover(&model);
    assert!(joints.is_empty());
    assert_eq!(joints.iter().count(), 0);
}

#[test]
fn from_parents_rejects_bad_descriptions() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        Model::from_parents(&empty, &[]),
        Err(RigError::EmptyModel)
    ));
    assert!(matches!(
        Model::from_parents(&["a", "b"], &[-1]),
        Err(RigError::ModelShape { names: 2, parents: 1 })
    ));
    assert!(matches!(
        Model::from_parents(&["a", "b", "c"], &[-1, 2, 0]),
        Err(RigError::InvalidParent { node: 1, parent: 2 })
    ));
}

#[test]
fn depth_first_visits_children_in_insertion_order() {
    let model = Model::humanoid();
    let mut names = Vec::new();
    model.visit_depth_first(&mut |_, name: &str| names.push(name.to_owned()));
    let expected = [
        "Robot",
        "Hips",
        "Spine",
        "Spine2",
        "Neck",
        "Head",
        "Eye_L",
        "Eye_R",
        "LeftShoulder",
        "LeftArm",
        "RightShoulder",
        "RightArm",
    ];
    assert_eq!(names, expected);
}
