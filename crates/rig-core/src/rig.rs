//! Procedural rig controller.
//!
//! Each frame the controller turns the smoothed cursor signal and its idle
//! clocks into a clamped target rotation per discovered joint, then slerps
//! the joint's local rotation toward it. Chest and spine also get a uniform
//! breathing scale. Without a model, or for roles the model lacks, nothing is
//! written.

use crate::config::RigConfig;
use crate::constants::{CHEST_FOLLOW, NECK_FOLLOW, SHOULDER_ROLL, SPINE_FOLLOW};
use crate::idle::{IdleClocks, IdleSample};
use crate::joints::{JointMap, JointRole};
use crate::math::{slerp_toward, Angles};
use crate::skeleton::{Model, SceneGraph};
use glam::Quat;

/// Per-frame input: smoothed cursor and delta time in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigInput {
    pub nx: f32,
    pub ny: f32,
    pub dt: f32,
}

impl RigInput {
    pub fn new(nx: f32, ny: f32, dt: f32) -> Self {
        Self { nx, ny, dt }
    }
}

/// Unclamped target angles for a role. Cursor-follow plus idle terms; the idle
/// terms may push past the nominal limits.
pub fn raw_joint_target(
    role: JointRole,
    nx: f32,
    ny: f32,
    idle: &IdleSample,
    config: &RigConfig,
) -> Angles {
    let l = &config.limits;
    match role {
        JointRole::Head => Angles::new(
            nx * l.head_yaw + idle.jitter.x,
            -ny * l.head_pitch + idle.jitter.y,
            0.0,
        ),
        JointRole::Neck => Angles::new(
            nx * l.neck_yaw * NECK_FOLLOW,
            -ny * l.neck_pitch * NECK_FOLLOW,
            0.0,
        ),
        JointRole::Chest => Angles::new(
            nx * l.chest_yaw * CHEST_FOLLOW + idle.weight_shift,
            -ny * l.chest_pitch * CHEST_FOLLOW,
            0.0,
        ),
        JointRole::Spine => Angles::new(
            nx * l.chest_yaw * SPINE_FOLLOW + idle.weight_shift * 0.5,
            -ny * l.chest_pitch * SPINE_FOLLOW,
            0.0,
        ),
        JointRole::LeftShoulder => Angles::new(0.0, 0.0, -nx * SHOULDER_ROLL),
        JointRole::RightShoulder => Angles::new(0.0, 0.0, nx * SHOULDER_ROLL),
        JointRole::LeftEye | JointRole::RightEye => {
            Angles::new(nx * l.eye_offset, -ny * l.eye_offset, 0.0)
        }
    }
}

/// Target angles for a role after clamping to `config.limit_for(role)`.
pub fn joint_target(
    role: JointRole,
    nx: f32,
    ny: f32,
    idle: &IdleSample,
    config: &RigConfig,
) -> Angles {
    raw_joint_target(role, nx, ny, idle, config).clamped(config.limit_for(role))
}

/// Uniform scale for roles that breathe.
pub fn breathing_scale(role: JointRole, idle: &IdleSample, config: &RigConfig) -> Option<f32> {
    match role {
        JointRole::Chest => Some(idle.breathing_scale),
        JointRole::Spine => {
            Some(1.0 + idle.breathing_phase * config.idle.breathing_amplitude * 0.5)
        }
        _ => None,
    }
}

pub struct RigController<G: SceneGraph = Model> {
    config: RigConfig,
    model: Option<G>,
    joints: JointMap,
    clocks: IdleClocks,
    idle: IdleSample,
}

impl<G: SceneGraph> RigController<G> {
    pub fn new(config: RigConfig) -> Self {
        Self {
            config,
            model: None,
            joints: JointMap::default(),
            clocks: IdleClocks::default(),
            idle: IdleSample::NEUTRAL,
        }
    }

    /// Take ownership of a freshly loaded model and bind its joints.
    /// Replaces (and drops) any previous model.
    pub fn attach_model(&mut self, model: G) -> &JointMap {
        self.joints = JointMap::discover(&model);
        self.model = Some(model);
        let found: Vec<&str> = self.joints.iter().map(|(r, _)| r.name()).collect();
        log::info!("[rig] joints found ({}): {}", found.len(), found.join(", "));
        for role in JointRole::ALL {
            if !self.joints.contains(role) {
                log::debug!("[rig] no node for {}", role);
            }
        }
        &self.joints
    }

    /// Release the model; joints must be rediscovered on the next attach.
    pub fn detach_model(&mut self) -> Option<G> {
        self.joints = JointMap::default();
        self.model.take()
    }

    pub fn model(&self) -> Option<&G> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut G> {
        self.model.as_mut()
    }

    pub fn joints(&self) -> &JointMap {
        &self.joints
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn clocks(&self) -> &IdleClocks {
        &self.clocks
    }

    /// Idle terms used by the most recent update.
    pub fn idle(&self) -> IdleSample {
        self.idle
    }

    /// Advance idle clocks and drive every discovered joint one frame.
    /// Returns how many joints were written.
    pub fn update(&mut self, input: RigInput) -> usize {
        let dt = input.dt.max(0.0);
        let sample = self.clocks.advance(dt, &self.config.idle);
        self.idle = if self.config.micro_motion {
            sample
        } else {
            IdleSample::NEUTRAL
        };

        let Some(model) = self.model.as_mut() else {
            return 0;
        };
        let mut driven = 0;
        for (role, node) in self.joints.iter() {
            let target = joint_target(role, input.nx, input.ny, &self.idle, &self.config).to_quat();
            let current = model.local_rotation(node).unwrap_or(Quat::IDENTITY);
            let next = slerp_toward(current, target, self.config.rate_for(role), dt);
            model.set_local_rotation(node, next);
            if let Some(scale) = breathing_scale(role, &self.idle, &self.config) {
                model.set_uniform_scale(node, scale);
            }
            driven += 1;
        }
        driven
    }
}

impl<G: SceneGraph> Default for RigController<G> {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}
