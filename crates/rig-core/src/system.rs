//! Shared dashboard state.
//!
//! One [`SystemState`] is built when a front end mounts and handed, as a
//! [`SharedSystem`], to every part that needs it. It is dropped with the front
//! end; nothing here is global.

use crate::constants::{FPS_WINDOW, REFERENCE_FPS};
use crate::gate::GuiGate;
use crate::widgets::AlarmTime;
use instant::Instant;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

pub type SharedSystem = Rc<RefCell<SystemState>>;

pub struct SystemState {
    pub gui: GuiGate,
    pub fps: FpsCounter,
    pub frames: u64,
    pub capability: DeviceCapability,
    /// Wall clock at second resolution, as last reported by the front end.
    pub clock: Option<ClockTick>,
}

impl SystemState {
    pub fn new(mounted_at: Instant, capability: DeviceCapability) -> Self {
        Self {
            gui: GuiGate::with_default_timeout(mounted_at),
            fps: FpsCounter::default(),
            frames: 0,
            capability,
            clock: None,
        }
    }

    pub fn shared(mounted_at: Instant, capability: DeviceCapability) -> SharedSystem {
        Rc::new(RefCell::new(Self::new(mounted_at, capability)))
    }

    /// Per-frame bookkeeping.
    pub fn on_frame(&mut self, now: Instant) {
        self.frames += 1;
        self.fps.update(now);
    }

    /// Store the current wall-clock reading. Returns true when the second
    /// changed, which is when clock displays and alarms need a look.
    pub fn set_clock(&mut self, tick: ClockTick) -> bool {
        if self.clock == Some(tick) {
            return false;
        }
        self.clock = Some(tick);
        true
    }
}

/// Hours, minutes and seconds of the local day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTick {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTick {
    /// Out-of-range fields wrap into the day.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::from_seconds_of_day(u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds))
    }

    /// Seconds since midnight, or since the Unix epoch for a UTC clock.
    pub fn from_seconds_of_day(secs: u64) -> Self {
        let secs = secs % 86_400;
        Self {
            hours: (secs / 3600) as u8,
            minutes: (secs / 60 % 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }

    /// First second of a minute; alarms ring on this tick only.
    pub fn is_minute_start(&self) -> bool {
        self.seconds == 0
    }

    pub fn alarm_time(&self) -> AlarmTime {
        AlarmTime {
            hour: self.hours,
            minute: self.minutes,
        }
    }

    /// Zero-padded `HH`, `MM` and `SS`.
    pub fn parts(&self) -> (String, String, String) {
        (
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        )
    }
}

impl fmt::Display for ClockTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Rolling average of the instantaneous frame rate over the last
/// [`FPS_WINDOW`] frames.
#[derive(Clone, Debug, Default)]
pub struct FpsCounter {
    samples: VecDeque<f32>,
    last: Option<Instant>,
}

impl FpsCounter {
    pub fn update(&mut self, now: Instant) -> f32 {
        if let Some(last) = self.last {
            if now > last {
                let dt = (now - last).as_secs_f32();
                if dt > 0.0 {
                    self.samples.push_back(1.0 / dt);
                    if self.samples.len() > FPS_WINDOW {
                        self.samples.pop_front();
                    }
                }
            }
        }
        self.last = Some(now);
        self.average()
    }

    /// 60 until there is data.
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return REFERENCE_FPS;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub fn current(&self) -> f32 {
        self.samples.back().copied().unwrap_or(REFERENCE_FPS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceCapability {
    pub tier: DeviceTier,
    pub target_fps: u32,
    pub post_processing: bool,
    pub micro_motion: bool,
}

impl DeviceCapability {
    /// Tier from CPU cores, device memory (GB, `None` where the browser hides
    /// it) and whether it is a phone or tablet.
    pub fn detect(cores: u32, memory_gb: Option<f32>, is_mobile: bool) -> Self {
        let memory_high = memory_gb.map_or(true, |m| m >= 8.0);
        let memory_low = memory_gb.is_some_and(|m| m <= 4.0);
        let tier = if cores >= 8 && memory_high && !is_mobile {
            DeviceTier::High
        } else if cores <= 4 || memory_low || is_mobile {
            DeviceTier::Low
        } else {
            DeviceTier::Medium
        };
        Self::for_tier(tier)
    }

    pub fn for_tier(tier: DeviceTier) -> Self {
        Self {
            tier,
            target_fps: match tier {
                DeviceTier::High => 120,
                DeviceTier::Medium => 60,
                DeviceTier::Low => 30,
            },
            post_processing: tier == DeviceTier::High,
            micro_motion: tier != DeviceTier::Low,
        }
    }
}

impl Default for DeviceCapability {
    fn default() -> Self {
        Self::for_tier(DeviceTier::Medium)
    }
}
