//! Pointer / device-tilt tracking.
//!
//! Input listeners write raw samples into a [`TargetSlot`]; the frame callback
//! calls [`Tracker::tick`], which is the only reader. Listeners never trigger
//! recomputation themselves, so event frequency and frame rate stay decoupled.

use crate::config::TrackerConfig;
use crate::constants::{
    MAX_FRAME_DT_SEC, MOBILE_MAX_VIEWPORT_PX, MOBILE_UA_MARKERS, TILT_BETA_NEUTRAL_DEG,
    TILT_RANGE_DEG,
};
use crate::math::{exp_smooth, map_range};
use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Normalized input in `[-1, 1]` on both axes; `ny` is positive up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub nx: f32,
    pub ny: f32,
}

impl PointerSample {
    pub const ORIGIN: Self = Self { nx: 0.0, ny: 0.0 };

    pub fn new(nx: f32, ny: f32) -> Self {
        Self { nx, ny }
    }
}

/// Smoothed output of the tracker for one frame.
pub type SmoothedTarget = PointerSample;

/// Map a pointer position in viewport pixels to a sample.
///
/// A zero-sized viewport yields the origin.
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> PointerSample {
    if width <= 0.0 || height <= 0.0 {
        return PointerSample::ORIGIN;
    }
    PointerSample {
        nx: map_range(x, 0.0, width, -1.0, 1.0),
        ny: map_range(y, 0.0, height, 1.0, -1.0),
    }
}

/// Map device orientation angles (degrees) to a sample.
///
/// `gamma` is left/right tilt, `beta` front/back tilt; upright is beta = 90.
pub fn normalize_tilt(gamma: f32, beta: f32) -> PointerSample {
    PointerSample {
        nx: (gamma / TILT_RANGE_DEG).clamp(-1.0, 1.0),
        ny: ((beta - TILT_BETA_NEUTRAL_DEG) / TILT_RANGE_DEG).clamp(-1.0, 1.0),
    }
}

/// Which input source drives the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Pointer,
    Tilt,
}

impl DeviceClass {
    /// Phones and tablets (by user agent) or narrow viewports use tilt.
    pub fn detect(user_agent: &str, viewport_width_px: Option<u32>) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let mobile_ua = MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m));
        let narrow = viewport_width_px.is_some_and(|w| w <= MOBILE_MAX_VIEWPORT_PX);
        if mobile_ua || narrow {
            DeviceClass::Tilt
        } else {
            DeviceClass::Pointer
        }
    }
}

/// Write side of the tracker, handed to input listeners.
#[derive(Clone, Debug, Default)]
pub struct TargetSlot(Rc<Cell<PointerSample>>);

impl TargetSlot {
    #[inline]
    pub fn set(&self, sample: PointerSample) {
        self.0.set(sample);
    }

    #[inline]
    pub fn get(&self) -> PointerSample {
        self.0.get()
    }
}

pub struct Tracker {
    config: TrackerConfig,
    target: TargetSlot,
    current: PointerSample,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            target: TargetSlot::default(),
            current: PointerSample::ORIGIN,
        }
    }

    pub fn target_slot(&self) -> TargetSlot {
        self.target.clone()
    }

    /// Last smoothed value, without advancing.
    pub fn current(&self) -> SmoothedTarget {
        self.current
    }

    /// Advance smoothing by one frame and return the new value.
    pub fn tick(&mut self, dt: f32) -> SmoothedTarget {
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        let target = self.target.get();
        let rate = self.config.smoothing_rate;
        self.current.nx = exp_smooth(self.current.nx, target.nx, rate, dt);
        self.current.ny = exp_smooth(self.current.ny, target.ny, rate, dt);
        self.current
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

/// Turns wall-clock frame timestamps into capped delta times.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous tick, 0 on the first, capped at `max_dt`.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) if now > last => (now - last).as_secs_f32(),
            _ => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT_SEC)
    }
}
