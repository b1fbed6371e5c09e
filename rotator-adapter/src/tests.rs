use crate::*;

use alloc::vec::Vec;
use rotator::{RotatorOptions, StepOutcome};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn measured_driver(heights: &[f32], interval_ms: u64, now_ms: u64) -> Driver {
    let mut d = Driver::new(
        RotatorOptions::new(heights.len(), heights.len(), interval_ms)
            .with_placeholder_height(800.0),
        now_ms,
    )
    .with_easing(Easing::Linear);
    for (i, &h) in heights.iter().enumerate() {
        d.on_measure(i, h, now_ms);
    }
    assert!(d.rotator().is_ready());
    d
}

#[test]
fn scheduler_fires_once_per_interval() {
    let mut s = Scheduler::new(100);
    assert!(!s.poll(1_000));

    s.arm(0);
    assert!(!s.poll(50));
    assert!(!s.poll(99));
    assert!(s.poll(100));
    assert!(!s.poll(101));
    assert!(!s.poll(199));
    assert!(s.poll(200));
    assert!(!s.poll(200));
}

#[test]
fn scheduler_rearms_on_deadline_not_poll_time() {
    let mut s = Scheduler::new(100);
    s.arm(0);
    // Fired late at 105; the next deadline is still 200, so polling jitter
    // does not accumulate.
    assert!(s.poll(105));
    assert!(!s.poll(199));
    assert!(s.poll(200));
}

#[test]
fn scheduler_stall_does_not_burst() {
    let mut s = Scheduler::new(100);
    s.arm(0);
    // The host stalls for several intervals: exactly one tick fires, and the
    // next deadline re-anchors relative to now.
    assert!(s.poll(550));
    assert!(!s.poll(551));
    assert!(!s.poll(649));
    assert!(s.poll(650));
}

#[test]
fn scheduler_disarm_stops_ticks() {
    let mut s = Scheduler::new(100);
    s.arm(0);
    s.disarm();
    assert!(!s.is_armed());
    assert!(!s.poll(10_000));
}

#[test]
fn driver_runs_two_item_rotation_end_to_end() {
    // Two 25-point messages on a 2500ms interval, simulated at ~60fps.
    let mut d = measured_driver(&[25.0, 25.0], 2500, 0);
    let mut outcomes = Vec::new();

    let mut now = 0u64;
    while now <= 6_000 {
        if let Some(outcome) = d.advance(now) {
            outcomes.push((now, outcome));
        }
        now += 16;
    }

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].1, StepOutcome::Advanced);
    assert_eq!(outcomes[1].1, StepOutcome::CycleCompleted);
    // Each step finishes within its step duration of the tick that began it.
    assert!(outcomes[0].0 < 2_500 + DEFAULT_STEP_DURATION_MS + 32);
    assert!(outcomes[1].0 < 5_000 + DEFAULT_STEP_DURATION_MS + 32);

    let r = d.rotator();
    assert!(approx_eq(r.scroll_offset(), 0.0));
    assert_eq!(r.current_index(), 0);
    assert_eq!(r.messages_seen(), 0);
    assert_eq!(r.generation(), 1);
    assert_eq!(r.buffer_len(), 4);
}

#[test]
fn offset_decreases_monotonically_within_a_step() {
    let mut d = measured_driver(&[40.0, 40.0, 40.0], 1000, 0);

    let mut last = d.rotator().scroll_offset();
    let mut now = 0u64;
    while now <= 1_600 {
        d.advance(now);
        let offset = d.rotator().scroll_offset();
        assert!(offset <= last + 1e-3, "offset went up mid-cycle");
        last = offset;
        now += 16;
    }
    assert!(approx_eq(d.rotator().scroll_offset(), -40.0));
}

#[test]
fn fade_plays_exactly_once() {
    let mut d = Driver::new(RotatorOptions::new(2, 2, 2500), 0).with_easing(Easing::Linear);
    assert_eq!(d.container_opacity(0), 0.0);

    d.on_measure(0, 25.0, 900);
    assert_eq!(d.container_opacity(950), 0.0);

    // Readiness at t=1000 starts the 200ms fade.
    d.on_measure(1, 25.0, 1_000);
    assert_eq!(d.container_opacity(1_000), 0.0);
    assert!(approx_eq(d.container_opacity(1_100), 0.5));
    assert_eq!(d.container_opacity(1_200), 1.0);

    // Duplicate measurements never retrigger it.
    d.on_measure(0, 25.0, 5_000);
    d.on_measure(1, 25.0, 5_000);
    assert_eq!(d.container_opacity(5_000), 1.0);
}

#[test]
fn zero_fade_duration_snaps_to_opaque() {
    let mut d = Driver::new(RotatorOptions::new(1, 1, 1000), 0).with_fade_duration_ms(0);
    d.on_measure(0, 10.0, 0);
    assert_eq!(d.container_opacity(0), 1.0);
}

#[test]
fn shutdown_makes_late_callbacks_noops() {
    let mut d = measured_driver(&[30.0, 30.0], 1000, 0);

    // Get a step in flight.
    d.advance(1_000);
    assert!(d.is_animating());
    let offset = d.rotator().scroll_offset();

    d.shutdown();
    assert!(!d.is_live());
    assert!(!d.is_animating());

    // A late frame, tick, or pump does nothing.
    assert_eq!(d.advance(1_250), None);
    assert_eq!(d.on_frame(1_250), None);
    assert_eq!(d.pump(), None);
    assert!(approx_eq(d.rotator().scroll_offset(), offset));
    assert_eq!(d.rotator().messages_seen(), 0);
}

#[test]
fn measurements_after_shutdown_are_dropped() {
    let mut d = Driver::new(RotatorOptions::new(2, 2, 1000), 0);
    d.on_measure(0, 10.0, 0);
    d.shutdown();
    d.on_measure(1, 10.0, 50);
    assert_eq!(d.rotator().measured_len(), 1);
    assert!(!d.rotator().is_ready());
}

#[test]
fn slow_step_is_settled_when_next_tick_fires() {
    // Step duration >= interval is a misconfiguration the driver survives:
    // the stale step snaps to its target and completes before the next one
    // begins.
    let mut d = measured_driver(&[10.0, 10.0, 10.0], 500, 0).with_step_duration_ms(600);

    d.advance(500);
    assert!(d.is_animating());
    assert_eq!(d.rotator().current_index(), 1);

    d.advance(1_000);
    assert_eq!(d.rotator().messages_seen(), 1);
    assert_eq!(d.rotator().current_index(), 2);
    assert!(approx_eq(d.rotator().scroll_offset(), -10.0));
}

#[test]
fn set_options_restarts_the_scheduler() {
    let mut d = measured_driver(&[10.0, 10.0, 10.0], 1000, 0);
    d.advance(1_000);
    assert!(d.is_animating());

    // Reconfigure mid-flight: the begun step settles, the old timer dies,
    // and the engine restarts from the top on the new interval.
    d.set_options(RotatorOptions::new(3, 3, 300), 1_000);
    assert!(!d.is_animating());
    assert_eq!(d.rotator().messages_seen(), 0);
    assert!(approx_eq(d.rotator().scroll_offset(), 0.0));

    assert_eq!(d.advance(1_299), None);
    d.advance(1_300);
    assert!(d.is_animating());
    assert_eq!(d.rotator().current_index(), 2);
}

#[cfg(feature = "serde")]
#[test]
fn tween_serde_round_trip() {
    let t = Tween::new(0.0, -50.0, 100, 200, Easing::SmoothStep);
    let json = serde_json::to_string(&t).unwrap();
    let back: Tween = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
    assert_eq!(back.sample(150), t.sample(150));
}

#[test]
fn tween_endpoints_and_easing() {
    let t = Tween::new(0.0, -50.0, 100, 200, Easing::Linear);
    assert_eq!(t.sample(100), 0.0);
    assert!(approx_eq(t.sample(200), -25.0));
    assert_eq!(t.sample(300), -50.0);
    // Clamped past the end.
    assert_eq!(t.sample(1_000), -50.0);
    assert!(!t.is_done(299));
    assert!(t.is_done(300));

    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert!(approx_eq(easing.sample(0.0), 0.0));
        assert!(approx_eq(easing.sample(1.0), 1.0));
    }
}
