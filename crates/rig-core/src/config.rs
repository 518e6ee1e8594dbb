//! Typed configuration for the tracker, rig and camera intro.
//!
//! Defaults come from `constants.rs`; front ends may override individual
//! fields and call `validate()` before handing a config to a controller.

use crate::constants::*;
use crate::error::{Result, RigError};
use crate::joints::JointRole;
use crate::math::Angles;
use glam::Vec3;

/// Nominal per-role rotation limits in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationLimits {
    pub head_yaw: f32,
    pub head_pitch: f32,
    pub neck_yaw: f32,
    pub neck_pitch: f32,
    pub chest_yaw: f32,
    pub chest_pitch: f32,
    pub eye_offset: f32,
    pub shoulder_roll: f32,
}

impl Default for RotationLimits {
    fn default() -> Self {
        Self {
            head_yaw: HEAD_YAW,
            head_pitch: HEAD_PITCH,
            neck_yaw: NECK_YAW,
            neck_pitch: NECK_PITCH,
            chest_yaw: CHEST_YAW,
            chest_pitch: CHEST_PITCH,
            eye_offset: EYE_OFFSET,
            shoulder_roll: SHOULDER_ROLL_MAX,
        }
    }
}

/// Extra degrees added on top of the nominal limits when clamping.
///
/// Idle layers (jitter on the head, weight shift on the chest) are added after
/// the cursor term, so the clamp leaves them a little room.
#[derive(Clone, Debug, PartialEq)]
pub struct ClampHeadroom {
    pub head_yaw: f32,
    pub head_pitch: f32,
    pub chest_yaw: f32,
}

impl Default for ClampHeadroom {
    fn default() -> Self {
        Self {
            head_yaw: HEAD_YAW_HEADROOM,
            head_pitch: HEAD_PITCH_HEADROOM,
            chest_yaw: CHEST_YAW_HEADROOM,
        }
    }
}

impl ClampHeadroom {
    /// Hard clamps at the nominal limits.
    pub const NONE: Self = Self {
        head_yaw: 0.0,
        head_pitch: 0.0,
        chest_yaw: 0.0,
    };
}

/// Per-frame smoothing rates at 60 FPS.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingRates {
    pub cursor: f32,
    pub head: f32,
    pub neck: f32,
    pub chest: f32,
    pub eyes: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            cursor: SMOOTHING_CURSOR,
            head: SMOOTHING_HEAD,
            neck: SMOOTHING_NECK,
            chest: SMOOTHING_CHEST,
            eyes: SMOOTHING_EYES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdleParams {
    pub breathing_speed: f32,
    pub breathing_amplitude: f32,
    pub jitter_frequency: f32,
    pub jitter_amplitude: f32,
    pub weight_shift_speed: f32,
    pub weight_shift_amplitude: f32,
}

impl Default for IdleParams {
    fn default() -> Self {
        Self {
            breathing_speed: BREATHING_SPEED_HZ,
            breathing_amplitude: BREATHING_AMPLITUDE,
            jitter_frequency: JITTER_FREQUENCY_HZ,
            jitter_amplitude: JITTER_AMPLITUDE_DEG,
            weight_shift_speed: WEIGHT_SHIFT_SPEED_HZ,
            weight_shift_amplitude: WEIGHT_SHIFT_AMPLITUDE_DEG,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigConfig {
    pub limits: RotationLimits,
    pub headroom: ClampHeadroom,
    pub smoothing: SmoothingRates,
    pub idle: IdleParams,
    /// Breathing, jitter and weight shift; off on low-tier devices.
    pub micro_motion: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            limits: RotationLimits::default(),
            headroom: ClampHeadroom::default(),
            smoothing: SmoothingRates::default(),
            idle: IdleParams::default(),
            micro_motion: true,
        }
    }
}

impl RigConfig {
    /// Clamp bound for a role: nominal limit plus headroom, per axis.
    pub fn limit_for(&self, role: JointRole) -> Angles {
        let l = &self.limits;
        let h = &self.headroom;
        match role {
            JointRole::Head => Angles::new(l.head_yaw + h.head_yaw, l.head_pitch + h.head_pitch, 0.0),
            JointRole::Neck => Angles::new(l.neck_yaw, l.neck_pitch, 0.0),
            JointRole::Chest => Angles::new(l.chest_yaw + h.chest_yaw, l.chest_pitch, 0.0),
            JointRole::Spine => Angles::new(l.chest_yaw, l.chest_pitch, 0.0),
            JointRole::LeftShoulder | JointRole::RightShoulder => {
                Angles::new(0.0, 0.0, l.shoulder_roll)
            }
            JointRole::LeftEye | JointRole::RightEye => {
                Angles::new(l.eye_offset, l.eye_offset, 0.0)
            }
        }
    }

    /// Slerp rate for a role. Eyes are fastest, then head; chest is slowest of
    /// the cursor-driven joints, with spine and shoulders derived from it.
    pub fn rate_for(&self, role: JointRole) -> f32 {
        let s = &self.smoothing;
        match role {
            JointRole::Head => s.head,
            JointRole::Neck => s.neck,
            JointRole::Chest => s.chest,
            JointRole::Spine => s.chest * SPINE_SMOOTHING_SCALE,
            JointRole::LeftShoulder | JointRole::RightShoulder => {
                s.chest * SHOULDER_SMOOTHING_SCALE
            }
            JointRole::LeftEye | JointRole::RightEye => s.eyes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let l = &self.limits;
        let h = &self.headroom;
        let s = &self.smoothing;
        let i = &self.idle;
        for (field, value) in [
            ("limits.head_yaw", l.head_yaw),
            ("limits.head_pitch", l.head_pitch),
            ("limits.neck_yaw", l.neck_yaw),
            ("limits.neck_pitch", l.neck_pitch),
            ("limits.chest_yaw", l.chest_yaw),
            ("limits.chest_pitch", l.chest_pitch),
            ("limits.eye_offset", l.eye_offset),
            ("limits.shoulder_roll", l.shoulder_roll),
            ("headroom.head_yaw", h.head_yaw),
            ("headroom.head_pitch", h.head_pitch),
            ("headroom.chest_yaw", h.chest_yaw),
            ("idle.breathing_speed", i.breathing_speed),
            ("idle.breathing_amplitude", i.breathing_amplitude),
            ("idle.jitter_frequency", i.jitter_frequency),
            ("idle.jitter_amplitude", i.jitter_amplitude),
            ("idle.weight_shift_speed", i.weight_shift_speed),
            ("idle.weight_shift_amplitude", i.weight_shift_amplitude),
        ] {
            non_negative(field, value)?;
        }
        for (field, value) in [
            ("smoothing.cursor", s.cursor),
            ("smoothing.head", s.head),
            ("smoothing.neck", s.neck),
            ("smoothing.chest", s.chest),
            ("smoothing.eyes", s.eyes),
        ] {
            rate(field, value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    pub smoothing_rate: f32,
    pub max_frame_dt: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_rate: SMOOTHING_CURSOR,
            max_frame_dt: MAX_FRAME_DT_SEC,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        rate("tracker.smoothing_rate", self.smoothing_rate)?;
        positive("tracker.max_frame_dt", self.max_frame_dt)
    }
}

/// One-shot camera move played when the scene mounts.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroConfig {
    pub duration: f32,
    pub start_position: Vec3,
    pub end_position: Vec3,
    pub start_fov_deg: f32,
    pub end_fov_deg: f32,
    pub max_roll_deg: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            duration: INTRO_DURATION_SEC,
            start_position: Vec3::from(INTRO_START_POS),
            end_position: Vec3::from(INTRO_END_POS),
            start_fov_deg: INTRO_START_FOV_DEG,
            end_fov_deg: INTRO_END_FOV_DEG,
            max_roll_deg: INTRO_MAX_ROLL_DEG,
        }
    }
}

impl IntroConfig {
    pub fn validate(&self) -> Result<()> {
        positive("intro.duration", self.duration)?;
        positive("intro.start_fov_deg", self.start_fov_deg)?;
        positive("intro.end_fov_deg", self.end_fov_deg)?;
        non_negative("intro.max_roll_deg", self.max_roll_deg)
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RigError::InvalidConfig { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RigError::InvalidConfig { field, value })
    }
}

// Smoothing rates are per-frame fractions: (0, 1].
fn rate(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(RigError::InvalidConfig { field, value })
    }
}
