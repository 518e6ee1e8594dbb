//! One-shot camera intro: optionally `Waiting` for the scene to load, then
//! `Running` until the configured duration has elapsed, then `Complete` for
//! good.

use crate::config::IntroConfig;
use crate::math::{ease_out_expo, lerp};
use glam::Vec3;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    /// Held at the start pose until [`CameraIntro::start`].
    Waiting,
    Running,
    Complete,
}

/// Camera values produced by one intro step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub fov_deg: f32,
    pub roll_rad: f32,
}

pub struct CameraIntro {
    config: IntroConfig,
    elapsed: f32,
    phase: IntroPhase,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl CameraIntro {
    /// An intro that starts running immediately.
    pub fn new(config: IntroConfig) -> Self {
        Self::with_phase(config, IntroPhase::Running)
    }

    /// An intro that holds until [`CameraIntro::start`] is called, for scenes
    /// whose model arrives later.
    pub fn waiting(config: IntroConfig) -> Self {
        Self::with_phase(config, IntroPhase::Waiting)
    }

    fn with_phase(config: IntroConfig, phase: IntroPhase) -> Self {
        Self {
            config,
            elapsed: 0.0,
            phase,
            on_complete: None,
        }
    }

    /// Leave `Waiting`. Returns true if this call started the intro.
    pub fn start(&mut self) -> bool {
        if self.phase != IntroPhase::Waiting {
            return false;
        }
        self.phase = IntroPhase::Running;
        log::info!("[intro] camera intro started");
        true
    }

    /// Register the completion callback. It runs once, on the step that
    /// reaches the end (or on [`CameraIntro::skip`]).
    pub fn on_complete(&mut self, callback: impl FnOnce() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.config.duration).min(1.0)
    }

    /// The pose at the start, for placing the camera before the first frame.
    pub fn start_pose(&self) -> CameraPose {
        self.pose_at(0.0)
    }

    /// The pose the intro settles on.
    pub fn end_pose(&self) -> CameraPose {
        CameraPose {
            position: self.config.end_position,
            fov_deg: self.config.end_fov_deg,
            roll_rad: 0.0,
        }
    }

    /// Step the intro. Returns the pose to apply, or `None` while waiting and
    /// once complete.
    pub fn advance(&mut self, dt: f32) -> Option<CameraPose> {
        if self.phase != IntroPhase::Running {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let progress = self.progress();
        if progress >= 1.0 {
            self.finish();
            return Some(self.end_pose());
        }
        Some(self.pose_at(progress))
    }

    /// Jump straight to `Complete`, e.g. when the model failed to load.
    /// Returns the end pose if this call did the transition.
    pub fn skip(&mut self) -> Option<CameraPose> {
        if self.is_complete() {
            return None;
        }
        self.elapsed = self.elapsed.max(self.config.duration);
        self.finish();
        Some(self.end_pose())
    }

    fn pose_at(&self, progress: f32) -> CameraPose {
        let c = &self.config;
        let eased = ease_out_expo(progress);
        CameraPose {
            position: c.start_position.lerp(c.end_position, eased),
            fov_deg: lerp(c.start_fov_deg, c.end_fov_deg, eased),
            roll_rad: ((progress * PI).sin() * c.max_roll_deg).to_radians(),
        }
    }

    fn finish(&mut self) {
        self.phase = IntroPhase::Complete;
        log::info!("[intro] camera intro complete after {:.2}s", self.elapsed);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}

impl Default for CameraIntro {
    fn default() -> Self {
        Self::new(IntroConfig::default())
    }
}
