// Host-side tests for the rig controller driving a model.

use glam::Quat;
use rig_core::*;

const DT: f32 = 1.0 / 60.0;

fn yaw_of(model: &Model, name: &str) -> f32 {
    let id = model.find(name).unwrap();
    Angles::from_quat(model.node(id).unwrap().rotation).yaw
}

fn attached() -> RigController {
    let mut rig = RigController::default();
    rig.attach_model(Model::humanoid());
    rig
}

#[test]
fn held_pointer_right_converges_per_joint() {
    let mut rig = attached();
    for _ in 0..600 {
        rig.update(RigInput::new(1.0, 0.0, DT));
    }
    let model = rig.model().unwrap();
    let head = yaw_of(model, "Head");
    let neck = yaw_of(model, "Neck");
    let chest = yaw_of(model, "Spine2");

    // head carries jitter on top of the full yaw
    assert!((head - 30.0).abs() < 1.5, "head yaw {}", head);
    assert!((neck - 0.6 * 18.0).abs() < 0.05, "neck yaw {}", neck);
    let chest_target = 0.4 * 10.0 + rig.idle().weight_shift;
    assert!((chest - chest_target).abs() < 0.5, "chest yaw {} vs {}", chest, chest_target);
}

#[test]
fn chest_breathing_stays_within_amplitude() {
    let mut rig = attached();
    let amp = rig.config().idle.breathing_amplitude;
    let chest = rig.model().unwrap().find("Spine2").unwrap();
    let mut seen_above = false;
    let mut seen_below = false;
    for _ in 0..22 {
        rig.update(RigInput::new(0.0, 0.0, 0.1));
        let s = rig.model().unwrap().node(chest).unwrap().scale.x;
        assert!(s >= 1.0 - amp - 1e-6 && s <= 1.0 + amp + 1e-6, "scale {}", s);
        seen_above |= s > 1.0;
        seen_below |= s < 1.0;
    }
    assert!(seen_above && seen_below);
}

/// Scene graph that only counts writes.
#[derive(Default)]
struct Recording {
    names: Vec<&'static str>,
    rotation_writes: usize,
    scale_writes: usize,
}

impl SceneGraph for Recording {
    fn visit_depth_first(&self, visit: &mut dyn FnMut(NodeId, &str)) {
        for (i, n) in self.names.iter().enumerate() {
            visit(NodeId(i as u32), *n);
        }
    }

    fn local_rotation(&self, _node: NodeId) -> Option<Quat> {
        Some(Quat::IDENTITY)
    }

    fn set_local_rotation(&mut self, _node: NodeId, _rotation: Quat) {
        self.rotation_writes += 1;
    }

    fn set_uniform_scale(&mut self, _node: NodeId, _scale: f32) {
        self.scale_writes += 1;
    }
}

#[test]
fn model_without_joints_gets_no_writes() {
    let mut rig: RigController<Recording> = RigController::default();
    rig.attach_model(Recording {
        names: vec!["Root", "Bone", "Bone.001"],
        ..Default::default()
    });
    for _ in 0..30 {
        assert_eq!(rig.update(RigInput::new(0.7, -0.3, DT)), 0);
    }
    let model = rig.model().unwrap();
    assert_eq!(model.rotation_writes, 0);
    assert_eq!(model.scale_writes, 0);
}

#[test]
fn update_without_model_is_a_no_op() {
    let mut rig: RigController = RigController::default();
    assert_eq!(rig.update(RigInput::new(1.0, 1.0, DT)), 0);
    assert!(rig.clocks().idle > 0.0);
}

#[test]
fn only_present_roles_are_driven() {
    let mut rig: RigController<Recording> = RigController::default();
    rig.attach_model(Recording {
        names: vec!["Root", "Spine2", "Head"],
        ..Default::default()
    });
    assert_eq!(rig.update(RigInput::new(0.2, 0.2, DT)), 2);
    let model = rig.model().unwrap();
    assert_eq!(model.rotation_writes, 2);
    // chest breathes, head does not
    assert_eq!(model.scale_writes, 1);
}

#[test]
fn every_joint_stays_within_its_limit() {
    // Single-axis inputs keep each joint on one rotation axis, so the
    // decomposed angles are exact. Inputs past 1 force the clamp.
    let mut rig: RigController = RigController::new(RigConfig {
        micro_motion: false,
        ..RigConfig::default()
    });
    rig.attach_model(Model::humanoid());
    let inputs = [(2.0, 0.0), (-2.0, 0.0), (0.0, 0.0), (0.0, 2.0), (0.0, -2.0)];
    for frame in 0..1200 {
        let (nx, ny) = inputs[(frame / 240) % inputs.len()];
        rig.update(RigInput::new(nx, ny, DT));
        let model = rig.model().unwrap();
        for (role, node) in rig.joints().iter() {
            let limit = rig.config().limit_for(role);
            let a = Angles::from_quat(model.node(node).unwrap().rotation);
            assert!(a.yaw.abs() <= limit.yaw + 1e-2, "{} yaw {}", role, a.yaw);
            assert!(a.pitch.abs() <= limit.pitch + 1e-2, "{} pitch {}", role, a.pitch);
            assert!(a.roll.abs() <= limit.roll + 1e-2, "{} roll {}", role, a.roll);
        }
    }
}

#[test]
fn targets_are_clamped_for_any_input_and_idle_state() {
    let config = RigConfig::default();
    let mut clocks = IdleClocks::default();
    for step in 0..400 {
        let idle = clocks.advance(0.05, &config.idle);
        let nx = (step as f32 * 0.37).sin() * 3.0;
        let ny = (step as f32 * 0.23).cos() * 3.0;
        for role in JointRole::ALL {
            let limit = config.limit_for(role);
            let t = joint_target(role, nx, ny, &idle, &config);
            assert!(t.yaw.abs() <= limit.yaw && t.pitch.abs() <= limit.pitch);
            assert!(t.roll.abs() <= limit.roll);
        }
    }
}

#[test]
fn idle_clocks_keep_running_after_days_of_uptime() {
    let params = IdleParams::default();
    let start = 262_144.0; // ~3 days
    let mut clocks = IdleClocks {
        idle: start,
        jitter: start,
        weight_shift: start,
    };
    let first = clocks.sample(&params);
    let mut changed = 0;
    let mut prev = first;
    for _ in 0..600 {
        let s = clocks.advance(1.0 / 120.0, &params);
        if s.breathing_phase != prev.breathing_phase {
            changed += 1;
        }
        prev = s;
    }
    assert!((clocks.idle - start - 5.0).abs() < 1e-6, "idle={}", clocks.idle);
    assert!((clocks.jitter - start - 5.0).abs() < 1e-6);
    assert!((clocks.weight_shift - start - 5.0).abs() < 1e-6);
    assert!(changed > 590, "breathing only changed on {} frames", changed);
}

#[test]
fn jitter_is_non_negative_and_within_amplitude() {
    let params = IdleParams::default();
    let mut clocks = IdleClocks::default();
    for _ in 0..6000 {
        let s = clocks.advance(DT, &params);
        assert!(s.jitter.x >= 0.0 && s.jitter.x <= params.jitter_amplitude);
        assert!(s.jitter.y >= 0.0 && s.jitter.y <= params.jitter_amplitude * 0.5);
    }
}

#[test]
fn raw_targets_follow_documented_fractions() {
    let config = RigConfig::default();
    let idle = IdleSample::NEUTRAL;
    let neck = raw_joint_target(JointRole::Neck, 1.0, 1.0, &idle, &config);
    assert!((neck.yaw - 10.8).abs() < 1e-4);
    assert!((neck.pitch + 7.2).abs() < 1e-4);
    let spine = raw_joint_target(JointRole::Spine, -1.0, 0.0, &idle, &config);
    assert!((spine.yaw + 2.0).abs() < 1e-4);
    let left = raw_joint_target(JointRole::LeftShoulder, 1.0, 0.0, &idle, &config);
    let right = raw_joint_target(JointRole::RightShoulder, 1.0, 0.0, &idle, &config);
    assert!((left.roll + 3.0).abs() < 1e-4 && (right.roll - 3.0).abs() < 1e-4);
    let eye = raw_joint_target(JointRole::LeftEye, 0.5, -0.5, &idle, &config);
    assert!((eye.yaw - 4.0).abs() < 1e-4 && (eye.pitch - 4.0).abs() < 1e-4);
}

#[test]
fn headroom_lets_idle_terms_pass_nominal_limits() {
    let config = RigConfig::default();
    let mut idle = IdleSample::NEUTRAL;
    idle.jitter.x = 0.8;
    let head = joint_target(JointRole::Head, 1.0, 0.0, &idle, &config);
    assert!((head.yaw - 30.8).abs() < 1e-4);

    let strict = RigConfig {
        headroom: ClampHeadroom::NONE,
        ..RigConfig::default()
    };
    let head = joint_target(JointRole::Head, 1.0, 0.0, &idle, &strict);
    assert!((head.yaw - 30.0).abs() < 1e-4);
}

#[test]
fn micro_motion_off_keeps_chest_at_rest_scale() {
    let mut rig: RigController = RigController::new(RigConfig {
        micro_motion: false,
        ..RigConfig::default()
    });
    rig.attach_model(Model::humanoid());
    for _ in 0..100 {
        rig.update(RigInput::new(0.0, 0.0, DT));
    }
    let model = rig.model().unwrap();
    let chest = model.find("Spine2").unwrap();
    assert_eq!(model.node(chest).unwrap().scale.x, 1.0);
    assert_eq!(rig.idle(), IdleSample::NEUTRAL);
}

#[test]
fn detach_clears_joints() {
    let mut rig = attached();
    assert!(!rig.joints().is_empty());
    let model = rig.detach_model();
    assert!(model.is_some());
    assert!(rig.joints().is_empty());
    assert_eq!(rig.update(RigInput::new(1.0, 0.0, DT)), 0);
}

#[test]
fn default_config_validates_and_bad_rates_are_rejected() {
    assert!(RigConfig::default().validate().is_ok());
    let mut bad = RigConfig::default();
    bad.smoothing.head = 1.5;
    assert!(matches!(
        bad.validate(),
        Err(RigError::InvalidConfig { field: "smoothing.head", .. })
    ));
    assert!(TrackerConfig::default().validate().is_ok());
    assert!(IntroConfig::default().validate().is_ok());
}
