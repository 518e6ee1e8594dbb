//! GUI visibility gate.
//!
//! The dashboard widgets stay hidden until the camera intro reports
//! completion. If that signal never arrives, a wall-clock fallback reveals
//! them anyway. Once visible, the gate never hides again.

use crate::constants::GUI_FALLBACK_TIMEOUT_SEC;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCause {
    IntroComplete,
    LoadFailed,
    Timeout,
}

#[derive(Clone, Debug)]
pub struct GuiGate {
    mounted_at: Instant,
    timeout: Duration,
    revealed: Option<RevealCause>,
}

impl GuiGate {
    pub fn new(mounted_at: Instant, timeout: Duration) -> Self {
        Self {
            mounted_at,
            timeout,
            revealed: None,
        }
    }

    pub fn with_default_timeout(mounted_at: Instant) -> Self {
        Self::new(mounted_at, Duration::from_secs_f32(GUI_FALLBACK_TIMEOUT_SEC))
    }

    pub fn is_visible(&self) -> bool {
        self.revealed.is_some()
    }

    pub fn revealed_by(&self) -> Option<RevealCause> {
        self.revealed
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reveal for `cause`. True only for the call that made the gate visible.
    pub fn signal(&mut self, cause: RevealCause) -> bool {
        if self.revealed.is_some() {
            return false;
        }
        match cause {
            RevealCause::Timeout => log::warn!("[gui] intro signal timed out, forcing GUI"),
            other => log::info!("[gui] revealed ({:?})", other),
        }
        self.revealed = Some(cause);
        true
    }

    /// Check the fallback deadline. Returns `Some(Timeout)` only on the call
    /// that reveals.
    pub fn poll(&mut self, now: Instant) -> Option<RevealCause> {
        if self.revealed.is_some() || now < self.mounted_at + self.timeout {
            return None;
        }
        self.signal(RevealCause::Timeout).then_some(RevealCause::Timeout)
    }
}
