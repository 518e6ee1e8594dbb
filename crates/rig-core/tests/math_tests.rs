// Host-side tests for smoothing, easing and noise helpers.

use glam::Quat;
use rig_core::math::*;

#[test]
fn smoothing_alpha_is_zero_for_no_time_and_bounded() {
    assert_eq!(smoothing_alpha(0.1, 0.0), 0.0);
    assert_eq!(smoothing_alpha(0.1, -1.0), 0.0);
    assert_eq!(smoothing_alpha(0.0, 0.016), 0.0);
    let a = smoothing_alpha(1.0, 10.0);
    assert!(a > 0.99 && a <= 1.0);
}

#[test]
fn exp_smooth_is_frame_rate_independent() {
    let mut at_60 = 0.0;
    for _ in 0..60 {
        at_60 = exp_smooth(at_60, 1.0, 0.08, 1.0 / 60.0);
    }
    let mut at_30 = 0.0;
    for _ in 0..30 {
        at_30 = exp_smooth(at_30, 1.0, 0.08, 1.0 / 30.0);
    }
    assert!((at_60 - at_30).abs() < 1e-4, "{} vs {}", at_60, at_30);
}

#[test]
fn exp_smooth_never_overshoots() {
    let mut v = 0.0;
    for _ in 0..1000 {
        v = exp_smooth(v, 5.0, 0.9, 0.1);
        assert!(v <= 5.0);
    }
    assert!((v - 5.0).abs() < 1e-4);
}

#[test]
fn slerp_toward_with_zero_dt_keeps_rotation() {
    let q = Quat::from_rotation_y(0.3);
    assert_eq!(slerp_toward(q, Quat::IDENTITY, 0.1, 0.0), q);
}

#[test]
fn map_range_maps_ends_and_handles_degenerate_input() {
    assert!((map_range(0.0, 0.0, 100.0, -1.0, 1.0) + 1.0).abs() < 1e-6);
    assert!((map_range(100.0, 0.0, 100.0, -1.0, 1.0) - 1.0).abs() < 1e-6);
    assert!((map_range(25.0, 0.0, 100.0, 1.0, -1.0) - 0.5).abs() < 1e-6);
    assert_eq!(map_range(3.0, 5.0, 5.0, -1.0, 1.0), 0.0);
}

#[test]
fn easing_hits_endpoints() {
    assert!(ease_out_expo(0.0).abs() < 1e-6);
    assert_eq!(ease_out_expo(1.0), 1.0);
    assert_eq!(ease_out_expo(1.5), 1.0);
}

#[test]
fn noise_stays_in_range_and_is_continuous() {
    let mut prev = smooth_noise(0.0, 0.25);
    for i in 1..2000 {
        let t = i as f64 * 0.01;
        let n = smooth_noise(t, 0.25);
        assert!((0.0..=1.0).contains(&n));
        assert!((n - prev).abs() < 0.025, "jump at t={}", t);
        prev = n;
    }
}

#[test]
fn noise_keeps_moving_at_large_times() {
    let base = 400_000.0;
    let a = smooth_noise(base, 0.5);
    let b = smooth_noise(base + 0.25, 0.5);
    assert!((0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b));
    assert_ne!(a, b);
}

#[test]
fn angles_clamp_each_axis_symmetrically() {
    let a = Angles::new(40.0, -25.0, 1.0).clamped(Angles::new(35.0, 21.0, 0.0));
    assert_eq!(a, Angles::new(35.0, -21.0, 0.0));
}

#[test]
fn angles_survive_quaternion_conversion() {
    let a = Angles::new(25.0, -12.0, 3.0);
    let back = Angles::from_quat(a.to_quat());
    assert!((back.yaw - a.yaw).abs() < 1e-3);
    assert!((back.pitch - a.pitch).abs() < 1e-3);
    assert!((back.roll - a.roll).abs() < 1e-3);
}

#[test]
fn exp_smooth_stays_between_current_and_target() {
    for &(current, target) in &[(0.0, 1.0), (1.0, -1.0), (-0.4, -0.9), (0.3, 0.3)] {
        for &rate in &[0.01, 0.08, 0.5, 1.0] {
            for &dt in &[0.0, 0.001, 1.0 / 60.0, 0.1, 10.0] {
                let v = exp_smooth(current, target, rate, dt);
                let (lo, hi) = if current < target {
                    (current, target)
                } else {
                    (target, current)
                };
                assert!(v >= lo - 1e-6 && v <= hi + 1e-6);
                if dt == 0.0 {
                    assert_eq!(v, current);
                }
            }
        }
    }
}
