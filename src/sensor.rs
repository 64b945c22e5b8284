//! Motion sensor capability.
//!
//! The kernel consumes the sensor, it does not implement it. A platform
//! binding provides [`MotionSensor`]; the pipeline asks it for a
//! subscription, drains samples best-effort, and removes the subscription
//! on teardown. There are no delivery-order or reliability guarantees:
//! slow consumers simply miss intermediate samples.
//!
//! [`ScriptedSensor`] replays a recorded timeline and backs the demo
//! binary and the integration tests.

use crate::error::SensorError;
use crate::types::MotionSample;

/// A source of 3-axis motion samples.
pub trait MotionSensor {
    type Subscription: MotionSubscription;

    /// Request a delivery interval in milliseconds. Best-effort; the
    /// producer fixes the actual rate.
    fn set_update_interval(&mut self, interval_ms: u64);

    /// Start sample delivery. Fails when no usable sensor exists; the
    /// caller treats that as non-fatal (samples simply never arrive).
    fn subscribe(&mut self) -> Result<Self::Subscription, SensorError>;
}

/// An active sample subscription.
pub trait MotionSubscription {
    /// The next sample due at or before `now_ms`, if any. Fire-and-forget:
    /// returning None means nothing is ready, not an error.
    fn try_sample(&mut self, now_ms: u64) -> Option<MotionSample>;

    /// Stop delivery. Consumes the subscription; dropping it has the
    /// same effect.
    fn remove(self);
}

/// A sensor that replays a fixed, pre-stamped sample timeline.
///
/// `try_sample` releases samples in order once the caller's clock has
/// passed their timestamp, mimicking a real interval-driven sensor.
pub struct ScriptedSensor {
    samples: Vec<MotionSample>,
    interval_ms: u64,
}

impl ScriptedSensor {
    pub fn new(mut samples: Vec<MotionSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp_ms);
        Self {
            samples,
            interval_ms: 0,
        }
    }

    /// The interval last requested through `set_update_interval`.
    pub fn requested_interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

impl MotionSensor for ScriptedSensor {
    type Subscription = ScriptedSubscription;

    fn set_update_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    fn subscribe(&mut self) -> Result<Self::Subscription, SensorError> {
        Ok(ScriptedSubscription {
            samples: std::mem::take(&mut self.samples),
            cursor: 0,
        })
    }
}

/// Subscription over a scripted timeline.
pub struct ScriptedSubscription {
    samples: Vec<MotionSample>,
    cursor: usize,
}

impl MotionSubscription for ScriptedSubscription {
    fn try_sample(&mut self, now_ms: u64) -> Option<MotionSample> {
        let sample = *self.samples.get(self.cursor)?;
        if sample.timestamp_ms <= now_ms {
            self.cursor += 1;
            Some(sample)
        } else {
            None
        }
    }

    fn remove(self) {}
}

/// A sensor that is never available. Exercises the non-fatal failure
/// path: subscription fails, the pipeline keeps running with no samples.
pub struct UnavailableSensor;

impl MotionSensor for UnavailableSensor {
    type Subscription = ScriptedSubscription;

    fn set_update_interval(&mut self, _interval_ms: u64) {}

    fn subscribe(&mut self) -> Result<Self::Subscription, SensorError> {
        Err(SensorError::Unavailable("no motion hardware".into()))
    }
}
