//! Integration tests for the complete shake pipeline.
//!
//! Drives realistic sample timelines end-to-end through the pipeline
//! with a scripted sensor and a recording audio backend, validating the
//! debounce, auto-reset, single-timer, replay, and teardown guarantees.

use crate::audio::test_support::{AudioLog, RecordingBackend};
use crate::audio::SoundResource;
use crate::clock::{Clock, ManualClock};
use crate::pipeline::ShakePipeline;
use crate::sensor::ScriptedSensor;
use crate::types::{MotionSample, ShakeConfig};
use crate::view::{IDLE_BACKGROUND, SHAKEN_BACKGROUND, SHAKEN_LABEL};

use std::cell::RefCell;
use std::rc::Rc;

/// Helper: a sample well over the trigger threshold on one axis.
fn shake(timestamp_ms: u64) -> MotionSample {
    MotionSample::new(timestamp_ms, [1.5, 0.0, 0.0])
}

/// Helper: a still sample.
fn still(timestamp_ms: u64) -> MotionSample {
    MotionSample::new(timestamp_ms, [0.0, 0.0, 0.0])
}

/// Helper: build a pipeline over a scripted timeline.
fn pipeline_over(
    samples: Vec<MotionSample>,
) -> (
    ShakePipeline<ScriptedSensor, RecordingBackend>,
    Rc<RefCell<AudioLog>>,
) {
    let (backend, log) = RecordingBackend::new();
    let pipeline = ShakePipeline::new(
        ScriptedSensor::new(samples),
        backend,
        SoundResource::new("assets/sound/percussion.wav"),
        ShakeConfig::default(),
    );
    (pipeline, log)
}

/// Helper: pump the pipeline through a timeline at the nominal 100ms
/// sensor rate, as a host event loop would.
fn run_until(
    pipeline: &mut ShakePipeline<ScriptedSensor, RecordingBackend>,
    clock: &mut ManualClock,
    end_ms: u64,
) {
    while clock.now_ms() < end_ms {
        clock.advance(100);
        pipeline.pump(clock.now_ms());
    }
}

#[test]
fn test_full_shake_timeline() {
    // Still at 0, shake at 100 (accepted), shake at 800 (inside the
    // cooldown), still at 1300 (reset fires first), shake at 1700
    // (1600ms since the trigger, accepted again).
    let (mut pipeline, log) = pipeline_over(vec![
        still(0),
        shake(100),
        shake(800),
        still(1300),
        MotionSample::new(1700, [1.6, 0.0, 0.0]),
    ]);

    pipeline.pump(0);
    assert!(!pipeline.is_shaken());

    pipeline.pump(100);
    assert!(pipeline.is_shaken());
    assert_eq!(log.borrow().loads, 1);
    assert_eq!(log.borrow().plays, 1);

    pipeline.pump(800);
    assert!(pipeline.is_shaken());
    assert_eq!(pipeline.accepted_triggers(), 1);

    // At 1300 the reset (100 + 1200) fires just before the still sample.
    pipeline.pump(1300);
    assert!(!pipeline.is_shaken());

    pipeline.pump(1700);
    assert!(pipeline.is_shaken());
    assert_eq!(pipeline.accepted_triggers(), 2);
    assert_eq!(log.borrow().loads, 1);
    assert_eq!(log.borrow().replays, 1);
}

#[test]
fn test_still_timeline_never_triggers() {
    let samples: Vec<_> = (0..50).map(|i| still(i * 100)).collect();
    let (mut pipeline, log) = pipeline_over(samples);
    let mut clock = ManualClock::new();

    run_until(&mut pipeline, &mut clock, 5000);

    assert!(!pipeline.is_shaken());
    assert_eq!(pipeline.accepted_triggers(), 0);
    assert_eq!(log.borrow().loads, 0);
}

#[test]
fn test_sustained_shaking_respects_cooldown() {
    // Shaking hard for five seconds at 10Hz: triggers land only when the
    // cooldown has elapsed and the display reset has already fired.
    let samples: Vec<_> = (1..=50).map(|i| shake(i * 100)).collect();
    let (mut pipeline, log) = pipeline_over(samples);
    let mut clock = ManualClock::new();

    run_until(&mut pipeline, &mut clock, 5000);

    // Accepted at 100, 1700, 3300, 4900: every 1600ms (first over-threshold
    // sample strictly past the 1500ms cooldown).
    assert_eq!(pipeline.accepted_triggers(), 4);
    assert_eq!(log.borrow().loads, 1);
    assert_eq!(log.borrow().plays, 1);
    assert_eq!(log.borrow().replays, 3);
}

#[test]
fn test_auto_reset_at_exact_deadline() {
    let (mut pipeline, _log) = pipeline_over(vec![shake(100)]);

    pipeline.pump(100);
    assert_eq!(pipeline.pending_reset_deadline(), Some(1300));

    pipeline.pump(1299);
    assert!(pipeline.is_shaken());
    pipeline.pump(1300);
    assert!(!pipeline.is_shaken());
}

#[test]
fn test_view_follows_phase() {
    let (mut pipeline, _log) = pipeline_over(vec![shake(100)]);

    assert_eq!(pipeline.view().background, IDLE_BACKGROUND);

    pipeline.pump(100);
    let view = pipeline.view();
    assert_eq!(view.background, SHAKEN_BACKGROUND);
    assert_eq!(view.label, Some(SHAKEN_LABEL));

    pipeline.pump(1300);
    assert_eq!(pipeline.view().background, IDLE_BACKGROUND);
    assert!(pipeline.view().label.is_none());
}

#[test]
fn test_single_pending_reset_across_triggers() {
    let (mut pipeline, _log) = pipeline_over(vec![shake(100), shake(1700)]);

    pipeline.pump(100);
    let first_deadline = pipeline.pending_reset_deadline().unwrap();
    assert_eq!(first_deadline, 1300);

    // The first reset fires at 1300; the second trigger schedules the
    // only pending reset.
    pipeline.pump(1700);
    assert_eq!(pipeline.pending_reset_deadline(), Some(2900));

    pipeline.pump(2900);
    assert!(!pipeline.is_shaken());
    assert!(pipeline.pending_reset_deadline().is_none());
}

#[test]
fn test_teardown_with_pending_reset() {
    let (mut pipeline, log) = pipeline_over(vec![shake(100)]);

    pipeline.pump(100);
    assert!(pipeline.pending_reset_deadline().is_some());

    pipeline.shutdown();

    // The timer is gone and firing time passing changes nothing.
    assert!(pipeline.pending_reset_deadline().is_none());
    pipeline.pump(10_000);
    assert_eq!(pipeline.accepted_triggers(), 1);
    assert_eq!(log.borrow().unloads, 1);
}

#[test]
fn test_audio_failures_do_not_stop_detection() {
    let (mut backend, log) = RecordingBackend::new();
    backend.fail_load = true;
    let mut pipeline = ShakePipeline::new(
        ScriptedSensor::new(vec![shake(100), shake(1700)]),
        backend,
        SoundResource::new("assets/sound/percussion.wav"),
        ShakeConfig::default(),
    );

    pipeline.pump(100);
    assert!(pipeline.is_shaken());

    pipeline.pump(1700);
    assert_eq!(pipeline.accepted_triggers(), 2);
    assert_eq!(log.borrow().loads, 0);
}

#[test]
fn test_clock_driven_loop_matches_timeline() {
    // Sanity check that a wall-clock style pump loop (the demo binary's
    // shape) produces the same transitions as direct pumping.
    let (mut pipeline, _log) = pipeline_over(vec![shake(100), shake(1700)]);
    let mut clock = ManualClock::new();

    let mut shaken_spans = Vec::new();
    let mut was_shaken = false;
    while clock.now_ms() < 4000 {
        clock.advance(50);
        pipeline.pump(clock.now_ms());
        if pipeline.is_shaken() != was_shaken {
            was_shaken = pipeline.is_shaken();
            shaken_spans.push((clock.now_ms(), was_shaken));
        }
    }

    assert_eq!(
        shaken_spans,
        vec![(100, true), (1300, false), (1700, true), (2900, false)]
    );
}
