//! Core data types for the shake sensing kernel.
//!
//! This module defines the fundamental types used throughout the shake
//! detection pipeline: the raw sample contract, the detector's state
//! machine alphabet (events in, effects out), and the tunable
//! configuration.
//!
//! Design principle: Types should make intent obvious. If a concept exists,
//! it gets a type. Never pass raw tuples or untyped collections across
//! boundaries.

/// A single raw 3-axis motion sample.
///
/// This represents the minimal input contract: three axes and a monotonic
/// timestamp stamped by the producer. This is never interpreted, only
/// preserved.
///
/// Design note: We use f32 for on-device execution to save memory and
/// battery. Precision is not needed for threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Monotonic timestamp in milliseconds. Required for temporal ordering.
    pub timestamp_ms: u64,

    /// Sensor reading [x, y, z] in whatever units the device reports.
    pub axes: [f32; 3],
}

impl MotionSample {
    /// Creates a new sample.
    ///
    /// Assumption: timestamp_ms must be monotonically increasing within a
    /// sequence.
    pub fn new(timestamp_ms: u64, axes: [f32; 3]) -> Self {
        Self { timestamp_ms, axes }
    }

    /// The largest absolute reading across the three axes.
    ///
    /// This is the detector's trigger feature: a shake is a sample whose
    /// reading on any single axis exceeds the threshold.
    pub fn max_axis_abs(&self) -> f32 {
        self.axes[0]
            .abs()
            .max(self.axes[1].abs())
            .max(self.axes[2].abs())
    }

    /// Euclidean magnitude across the three axes.
    pub fn magnitude(&self) -> f32 {
        let x2 = self.axes[0] * self.axes[0];
        let y2 = self.axes[1] * self.axes[1];
        let z2 = self.axes[2] * self.axes[2];
        (x2 + y2 + z2).sqrt()
    }
}

/// The detector's two-state machine.
///
/// `Idle -> Shaken` on an accepted trigger; `Shaken -> Idle` only when the
/// reset timer elapses, never because shaking stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakePhase {
    /// No shake currently displayed.
    Idle,
    /// A shake was accepted; the display/audio state is active until the
    /// reset timer fires.
    Shaken,
}

/// Identifies one scheduled reset.
///
/// A fresh token is issued for every scheduled reset; a firing whose token
/// does not match the currently pending one is stale and must be ignored.
/// This is what enforces the single-outstanding-timer invariant: a new
/// schedule supersedes the old one by invalidating its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Input alphabet of the shake state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeEvent {
    /// A motion sample arrived from the sensor stream.
    Sample(MotionSample),
    /// The scheduled reset timer elapsed.
    ResetElapsed(TimerToken),
    /// The owning component is being torn down.
    Teardown,
}

/// Output alphabet of the shake state machine.
///
/// The detector never performs side effects itself; it emits these and an
/// outer driver executes them. This keeps the machine pure and
/// independently testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeEffect {
    /// Play the shake sound (load on first use, replay afterwards).
    TriggerSound,
    /// Schedule a one-shot reset after `delay_ms`, superseding any
    /// previously pending one.
    ScheduleReset { token: TimerToken, delay_ms: u64 },
    /// Cancel the currently pending reset, if any.
    CancelReset,
    /// Unload the sound resource.
    ReleaseSound,
    /// Stop listening to the sample stream.
    StopSampling,
}

/// Tunable parameters of the shake detector.
///
/// The defaults reproduce the observed behavior; the cooldown and display
/// windows are independent knobs with no enforced relationship between
/// them.
#[derive(Debug, Clone, Copy)]
pub struct ShakeConfig {
    /// A sample is a shake when any axis exceeds this (strictly).
    pub shake_threshold: f32,

    /// Minimum time between two accepted triggers (milliseconds, strict).
    pub cooldown_ms: u64,

    /// How long the shaken state persists before the reset fires
    /// (milliseconds).
    pub display_ms: u64,

    /// Requested sensor delivery interval (milliseconds). Best-effort;
    /// the producer fixes the actual rate.
    pub update_interval_ms: u64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            shake_threshold: 1.0,
            cooldown_ms: 1500,
            display_ms: 1200,
            update_interval_ms: 100,
        }
    }
}
