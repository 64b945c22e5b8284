//! Shake pipeline: the driver that owns the state machine and executes
//! its effects.
//!
//! This module wires the three capabilities together: it drains the
//! sensor subscription, feeds samples to the detector, and executes the
//! effects the detector emits (play/replay the sound, schedule or cancel
//! the display reset). Sample delivery, timer firing, and state mutation
//! are all serialized through this one object, so no locking is needed.
//!
//! The reset timer is a single owned deadline, not a detached callback:
//! scheduling replaces it, teardown clears it, and a deadline can only
//! fire while the pipeline is alive. `shutdown` runs on every exit path
//! (it is also invoked from `Drop`), so no reset can fire after teardown.

use log::warn;

use crate::audio::{AudioBackend, SoundPlayer, SoundResource};
use crate::detector::ShakeDetector;
use crate::sensor::{MotionSensor, MotionSubscription};
use crate::types::{MotionSample, ShakeConfig, ShakeEffect, ShakeEvent, TimerToken};
use crate::view::ViewState;

/// The complete shake-to-sound pipeline.
///
/// Drive it by calling [`ShakePipeline::pump`] from the host's event loop
/// with the current time; read the display through
/// [`ShakePipeline::view`].
pub struct ShakePipeline<S: MotionSensor, B: AudioBackend> {
    detector: ShakeDetector,
    player: SoundPlayer<B>,
    subscription: Option<S::Subscription>,
    /// The single owned reset deadline: (token, absolute fire time in ms).
    pending_reset: Option<(TimerToken, u64)>,
    shut_down: bool,
}

impl<S: MotionSensor, B: AudioBackend> ShakePipeline<S, B> {
    /// Build the pipeline and start sample delivery.
    ///
    /// Sensor unavailability is non-fatal: the pipeline comes up with no
    /// subscription and the display simply never updates.
    pub fn new(mut sensor: S, backend: B, resource: SoundResource, config: ShakeConfig) -> Self {
        sensor.set_update_interval(config.update_interval_ms);
        let subscription = match sensor.subscribe() {
            Ok(sub) => Some(sub),
            Err(err) => {
                warn!("sample delivery disabled: {err}");
                None
            }
        };

        Self {
            detector: ShakeDetector::new(config),
            player: SoundPlayer::new(backend, resource),
            subscription,
            pending_reset: None,
            shut_down: false,
        }
    }

    /// Advance the pipeline to `now_ms`: drain due samples and fire the
    /// reset deadline once it has passed.
    ///
    /// Ordering guarantee: a reset due at or before a sample's timestamp
    /// fires before that sample is evaluated, so a sample arriving exactly
    /// at the deadline sees the idle state.
    pub fn pump(&mut self, now_ms: u64) {
        if self.shut_down {
            return;
        }

        while let Some(sample) = self
            .subscription
            .as_mut()
            .and_then(|sub| sub.try_sample(now_ms))
        {
            self.fire_due_reset(sample.timestamp_ms);
            self.dispatch(ShakeEvent::Sample(sample), sample.timestamp_ms);
        }
        self.fire_due_reset(now_ms);
    }

    /// Feed a single externally delivered sample (callback-style hosts).
    pub fn on_sample(&mut self, sample: MotionSample) {
        if self.shut_down {
            return;
        }
        self.fire_due_reset(sample.timestamp_ms);
        self.dispatch(ShakeEvent::Sample(sample), sample.timestamp_ms);
    }

    /// Fire the pending reset if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due_reset(now_ms);
    }

    /// Tear the pipeline down: cancel the pending reset, release the
    /// sound, remove the sensor subscription. Idempotent, and also run
    /// from `Drop` so every exit path cleans up.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        let effects = self.detector.update(ShakeEvent::Teardown);
        self.execute(effects, 0);
    }

    /// Whether the shaken visual/audio state is active.
    pub fn is_shaken(&self) -> bool {
        self.detector.is_shaken()
    }

    /// What the view layer should render right now.
    pub fn view(&self) -> ViewState {
        ViewState::from_phase(self.detector.phase())
    }

    /// Absolute fire time of the pending reset, if one is scheduled.
    pub fn pending_reset_deadline(&self) -> Option<u64> {
        self.pending_reset.map(|(_, deadline)| deadline)
    }

    /// Total accepted triggers since creation.
    pub fn accepted_triggers(&self) -> u64 {
        self.detector.accepted_triggers()
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn dispatch(&mut self, event: ShakeEvent, base_ms: u64) {
        let effects = self.detector.update(event);
        self.execute(effects, base_ms);
    }

    fn execute(&mut self, effects: Vec<ShakeEffect>, base_ms: u64) {
        for effect in effects {
            match effect {
                ShakeEffect::TriggerSound => self.player.trigger(),
                ShakeEffect::ScheduleReset { token, delay_ms } => {
                    // Replacing the option is what makes superseding
                    // atomic with respect to this event loop.
                    self.pending_reset = Some((token, base_ms + delay_ms));
                }
                ShakeEffect::CancelReset => {
                    self.pending_reset = None;
                }
                ShakeEffect::ReleaseSound => self.player.release(),
                ShakeEffect::StopSampling => {
                    if let Some(sub) = self.subscription.take() {
                        sub.remove();
                    }
                }
            }
        }
    }

    fn fire_due_reset(&mut self, now_ms: u64) {
        if let Some((token, deadline)) = self.pending_reset {
            if deadline <= now_ms {
                self.pending_reset = None;
                self.dispatch(ShakeEvent::ResetElapsed(token), now_ms);
            }
        }
    }
}

impl<S: MotionSensor, B: AudioBackend> Drop for ShakePipeline<S, B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
