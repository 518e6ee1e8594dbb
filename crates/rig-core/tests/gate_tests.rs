// Host-side tests for the GUI visibility gate and shared system state.

use instant::Instant;
use rig_core::*;
use std::time::Duration;

#[test]
fn gate_starts_hidden() {
    let gate = GuiGate::with_default_timeout(Instant::now());
    assert!(!gate.is_visible());
    assert_eq!(gate.revealed_by(), None);
    assert_eq!(gate.timeout(), Duration::from_millis(3500));
}

#[test]
fn timeout_reveals_exactly_once() {
    let t0 = Instant::now();
    let mut gate = GuiGate::with_default_timeout(t0);
    assert_eq!(gate.poll(t0 + Duration::from_millis(3400)), None);
    assert!(!gate.is_visible());
    assert_eq!(gate.poll(t0 + Duration::from_millis(3500)), Some(RevealCause::Timeout));
    assert!(gate.is_visible());
    assert_eq!(gate.poll(t0 + Duration::from_secs(10)), None);
    assert!(gate.is_visible());
}

#[test]
fn intro_signal_wins_over_later_timeout() {
    let t0 = Instant::now();
    let mut gate = GuiGate::with_default_timeout(t0);
    assert!(gate.signal(RevealCause::IntroComplete));
    assert!(!gate.signal(RevealCause::LoadFailed));
    assert_eq!(gate.poll(t0 + Duration::from_secs(5)), None);
    assert_eq!(gate.revealed_by(), Some(RevealCause::IntroComplete));
}

#[test]
fn intro_callback_reveals_shared_gate() {
    let t0 = Instant::now();
    let system = SystemState::shared(t0, DeviceCapability::default());
    let mut intro = CameraIntro::default();
    let sys = system.clone();
    intro.on_complete(move || {
        sys.borrow_mut().gui.signal(RevealCause::IntroComplete);
    });
    for _ in 0..30 {
        intro.advance(0.1);
        let visible = system.borrow().gui.is_visible();
        assert_eq!(visible, intro.is_complete());
    }
    assert!(system.borrow().gui.is_visible());
}

#[test]
fn fps_counter_averages_recent_frames() {
    let mut fps = FpsCounter::default();
    assert_eq!(fps.average(), 60.0);
    let t0 = Instant::now();
    for i in 0..=120u64 {
        fps.update(t0 + Duration::from_micros(i * 33_333));
    }
    assert!((fps.average() - 30.0).abs() < 0.1, "{}", fps.average());
    assert!((fps.current() - 30.0).abs() < 0.1);
}

#[test]
fn system_counts_frames() {
    let t0 = Instant::now();
    let mut state = SystemState::new(t0, DeviceCapability::default());
    for i in 1..=5u64 {
        state.on_frame(t0 + Duration::from_millis(i * 16));
    }
    assert_eq!(state.frames, 5);
}

#[test]
fn device_tier_detection() {
    assert_eq!(DeviceCapability::detect(8, Some(16.0), false).tier, DeviceTier::High);
    assert_eq!(DeviceCapability::detect(12, None, false).tier, DeviceTier::High);
    assert_eq!(DeviceCapability::detect(6, Some(8.0), false).tier, DeviceTier::Medium);
    assert_eq!(DeviceCapability::detect(4, Some(16.0), false).tier, DeviceTier::Low);
    assert_eq!(DeviceCapability::detect(8, Some(4.0), false).tier, DeviceTier::Low);
    assert_eq!(DeviceCapability::detect(8, Some(8.0), true).tier, DeviceTier::Low);
}

#[test]
fn low_tier_disables_extras() {
    let low = DeviceCapability::for_tier(DeviceTier::Low);
    assert_eq!(low.target_fps, 30);
    assert!(!low.micro_motion && !low.post_processing);
    let high = DeviceCapability::for_tier(DeviceTier::High);
    assert_eq!(high.target_fps, 120);
    assert!(high.micro_motion && high.post_processing);
}

#[test]
fn clock_reports_each_new_second_once() {
    let mut state = SystemState::new(Instant::now(), DeviceCapability::default());
    assert!(state.clock.is_none());
    let midnight = ClockTick::new(0, 0, 0);
    assert!(state.set_clock(midnight));
    assert!(!state.set_clock(midnight));
    assert!(state.set_clock(ClockTick::new(0, 0, 1)));
    assert_eq!(state.clock, Some(ClockTick::new(0, 0, 1)));
}

#[test]
fn clock_tick_formats_and_wraps() {
    let t = ClockTick::new(7, 5, 9);
    assert_eq!(t.to_string(), "07:05:09");
    assert_eq!(t.parts(), ("07".to_owned(), "05".to_owned(), "09".to_owned()));
    assert_eq!(t.alarm_time(), AlarmTime::new(7, 5).unwrap());
    assert!(!t.is_minute_start());
    assert!(ClockTick::new(7, 6, 0).is_minute_start());

    // a Unix timestamp lands on its UTC time of day
    assert_eq!(ClockTick::from_seconds_of_day(1_700_000_000), ClockTick::new(22, 13, 20));
    assert_eq!(ClockTick::new(24, 0, 61), ClockTick::new(0, 1, 1));
}
