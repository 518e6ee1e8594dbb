//! Frame-rate independent smoothing, easing and rotation helpers.
//!
//! Everything here is a pure function over value types (`f32`, `Quat`), so the
//! per-frame code never shares mutable temporaries.

use crate::constants::REFERENCE_FPS;
use glam::{EulerRot, Quat};

/// Blend factor for one frame of exponential smoothing.
///
/// `rate` is the fraction covered per frame at [`REFERENCE_FPS`]; the result
/// keeps the same time constant at any other frame rate. Always in `[0, 1]`.
#[inline]
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    (1.0 - (-rate * dt * REFERENCE_FPS).exp()).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by one frame of exponential smoothing.
#[inline]
pub fn exp_smooth(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_alpha(rate, dt)
}

/// Rotate `current` toward `target` with the same alpha as [`exp_smooth`].
#[inline]
pub fn slerp_toward(current: Quat, target: Quat, rate: f32, dt: f32) -> Quat {
    let alpha = smoothing_alpha(rate, dt);
    if alpha <= 0.0 {
        return current;
    }
    current.slerp(target, alpha).normalize()
}

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// A degenerate input range maps everything to the middle of the output range.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() < f32::EPSILON {
        return (out_min + out_max) * 0.5;
    }
    (value - in_min) * (out_max - out_min) / span + out_min
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Exponential ease-out; exactly 1 at `t == 1`.
#[inline]
pub fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

/// Smooth value noise in `[0, 1)`.
///
/// Hashes the integer lattice points around `time * frequency` and blends
/// them with a smoothstep, so the output is continuous in time. `time` is in
/// seconds and may be large.
pub fn smooth_noise(time: f64, frequency: f32) -> f32 {
    let t = time * f64::from(frequency);
    let i = t.floor();
    let f = (t - i) as f32;
    let u = f * f * (3.0 - 2.0 * f);
    let a = lattice_hash(i);
    let b = lattice_hash(i + 1.0);
    a * (1.0 - u) + b * u
}

#[inline]
fn lattice_hash(i: f64) -> f32 {
    let v = (i * 12.9898 + 78.233).sin() * 43_758.545_3;
    (v - v.floor()) as f32
}

/// Yaw/pitch/roll triple in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Angles {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Clamp each axis independently to `[-max, max]`.
    pub fn clamped(self, max: Angles) -> Self {
        Self {
            yaw: clamp_symmetric(self.yaw, max.yaw),
            pitch: clamp_symmetric(self.pitch, max.pitch),
            roll: clamp_symmetric(self.roll, max.roll),
        }
    }

    /// Convert to a rotation: yaw about Y, then pitch about X, then roll about Z.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Inverse of [`Angles::to_quat`].
    pub fn from_quat(q: Quat) -> Self {
        let (y, x, z) = q.to_euler(EulerRot::YXZ);
        Self::new(y.to_degrees(), x.to_degrees(), z.to_degrees())
    }
}

#[inline]
fn clamp_symmetric(value: f32, max: f32) -> f32 {
    let max = max.abs();
    value.clamp(-max, max)
}
