//! Procedural idle layers: breathing, micro jitter and weight shift.

use crate::config::IdleParams;
use crate::constants::JITTER_AXIS_OFFSET;
use crate::math::smooth_noise;
use glam::Vec2;
use std::f32::consts::TAU;

/// Idle terms for one frame. Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleSample {
    /// `sin` of the breathing cycle, in `[-1, 1]`.
    pub breathing_phase: f32,
    /// Uniform scale for the chest, `1 ± amplitude`.
    pub breathing_scale: f32,
    pub jitter: Vec2,
    pub weight_shift: f32,
}

impl IdleSample {
    /// No idle motion at all.
    pub const NEUTRAL: Self = Self {
        breathing_phase: 0.0,
        breathing_scale: 1.0,
        jitter: Vec2::ZERO,
        weight_shift: 0.0,
    };
}

impl Default for IdleSample {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Three independent time accumulators, one per idle layer, in seconds.
///
/// Kept in `f64`: an `f32` clock stops absorbing a 120 Hz frame step after a
/// few days of uptime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdleClocks {
    pub idle: f64,
    pub jitter: f64,
    pub weight_shift: f64,
}

impl IdleClocks {
    pub fn advance(&mut self, dt: f32, params: &IdleParams) -> IdleSample {
        let dt = f64::from(dt.max(0.0));
        self.idle += dt;
        self.jitter += dt;
        self.weight_shift += dt;
        self.sample(params)
    }

    /// Evaluate the layers at the current clock values.
    pub fn sample(&self, params: &IdleParams) -> IdleSample {
        let breathing_phase = (cycle(self.idle, params.breathing_speed) * TAU).sin();
        let breathing_scale = 1.0 + breathing_phase * params.breathing_amplitude;

        let jitter_x = smooth_noise(self.jitter, params.jitter_frequency) * params.jitter_amplitude;
        let jitter_y = smooth_noise(
            self.jitter + f64::from(JITTER_AXIS_OFFSET),
            params.jitter_frequency,
        ) * params.jitter_amplitude
            * 0.5;

        let weight_shift = (cycle(self.weight_shift, params.weight_shift_speed) * TAU).sin()
            * params.weight_shift_amplitude;

        IdleSample {
            breathing_phase,
            breathing_scale,
            jitter: Vec2::new(jitter_x, jitter_y),
            weight_shift,
        }
    }
}

/// Fraction of the current period for a clock running at `hz`.
#[inline]
fn cycle(clock: f64, hz: f32) -> f32 {
    (clock * f64::from(hz)).fract() as f32
}
