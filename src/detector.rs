//! Shake detection and debounce state machine.
//!
//! Converts a raw sample stream into discrete shake-begins / shake-ends
//! transitions with a refractory (cooldown) period, emitting effects for
//! an outer driver to execute: play the sound, schedule the display reset.
//!
//! The machine is pure with respect to time: it reads timestamps only from
//! the events it is handed and never touches the wall clock, so the
//! cooldown and reset timing are deterministically testable.
//!
//! # State machine
//!
//! States `{Idle, Shaken}`, initial `Idle`. `Idle -> Shaken` on an
//! accepted trigger; `Shaken -> Idle` only when the reset timer elapses.
//! A non-shake sample never ends the shaken state; the view returns to
//! idle purely on the timer.

use log::debug;

use crate::types::{
    MotionSample, ShakeConfig, ShakeEffect, ShakeEvent, ShakePhase, TimerToken,
};

/// The shake detector / debouncer.
///
/// Feed it events through [`ShakeDetector::update`] and execute the
/// effects it returns. At most one reset timer is pending at any time:
/// a new `ScheduleReset` always supersedes the previous one, and a firing
/// with a stale token is ignored.
pub struct ShakeDetector {
    config: ShakeConfig,

    phase: ShakePhase,
    /// Timestamp of the most recent accepted trigger. None = never.
    last_shake_ms: Option<u64>,
    /// Token of the currently pending reset, if any.
    pending_reset: Option<TimerToken>,
    /// Generation counter for issued tokens.
    next_token: u64,
    /// Set once Teardown has been processed; every later event is a no-op.
    torn_down: bool,

    // Statistics
    accepted_triggers: u64,
    rejected_samples: u64,
}

impl ShakeDetector {
    /// Create a new detector in the idle state.
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            phase: ShakePhase::Idle,
            last_shake_ms: None,
            pending_reset: None,
            next_token: 0,
            torn_down: false,
            accepted_triggers: 0,
            rejected_samples: 0,
        }
    }

    /// Create with default configuration.
    pub fn default_detector() -> Self {
        Self::new(ShakeConfig::default())
    }

    /// Advance the state machine by one event.
    ///
    /// Returns the effects the driver must execute, in order. Rejected
    /// samples (under threshold, inside cooldown, or while already shaken)
    /// return no effects and change no state.
    pub fn update(&mut self, event: ShakeEvent) -> Vec<ShakeEffect> {
        if self.torn_down {
            return Vec::new();
        }

        match event {
            ShakeEvent::Sample(sample) => self.on_sample(sample),
            ShakeEvent::ResetElapsed(token) => self.on_reset_elapsed(token),
            ShakeEvent::Teardown => self.on_teardown(),
        }
    }

    /// Current phase of the machine.
    pub fn phase(&self) -> ShakePhase {
        self.phase
    }

    /// Whether the shaken visual/audio state is currently active.
    pub fn is_shaken(&self) -> bool {
        self.phase == ShakePhase::Shaken
    }

    /// Token of the pending reset, if one is scheduled.
    pub fn pending_reset(&self) -> Option<TimerToken> {
        self.pending_reset
    }

    /// Total accepted triggers since creation.
    pub fn accepted_triggers(&self) -> u64 {
        self.accepted_triggers
    }

    /// Total over-threshold samples rejected by the debounce guard.
    pub fn rejected_samples(&self) -> u64 {
        self.rejected_samples
    }

    /// Whether teardown has been processed.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn on_sample(&mut self, sample: MotionSample) -> Vec<ShakeEffect> {
        if sample.max_axis_abs() <= self.config.shake_threshold {
            return Vec::new();
        }

        // Debounce guard: reject while already shaken or inside the
        // cooldown window. Strict comparison: exactly cooldown_ms apart
        // is still too soon.
        if self.phase == ShakePhase::Shaken || !self.cooldown_elapsed(sample.timestamp_ms) {
            self.rejected_samples += 1;
            debug!(
                "shake rejected at {}ms (phase={:?}, last={:?})",
                sample.timestamp_ms, self.phase, self.last_shake_ms
            );
            return Vec::new();
        }

        self.phase = ShakePhase::Shaken;
        self.last_shake_ms = Some(sample.timestamp_ms);
        self.accepted_triggers += 1;
        debug!("shake accepted at {}ms", sample.timestamp_ms);

        let mut effects = Vec::with_capacity(3);
        effects.push(ShakeEffect::TriggerSound);
        if self.pending_reset.take().is_some() {
            effects.push(ShakeEffect::CancelReset);
        }
        let token = self.issue_token();
        self.pending_reset = Some(token);
        effects.push(ShakeEffect::ScheduleReset {
            token,
            delay_ms: self.config.display_ms,
        });
        effects
    }

    fn on_reset_elapsed(&mut self, token: TimerToken) -> Vec<ShakeEffect> {
        // A stale or unexpected token means this firing was superseded;
        // it must not mutate anything.
        if self.pending_reset != Some(token) {
            debug!("stale reset token {:?} ignored", token);
            return Vec::new();
        }

        self.pending_reset = None;
        self.phase = ShakePhase::Idle;
        // The cooldown timestamp is deliberately untouched here.
        Vec::new()
    }

    fn on_teardown(&mut self) -> Vec<ShakeEffect> {
        self.torn_down = true;

        let mut effects = Vec::with_capacity(3);
        if self.pending_reset.take().is_some() {
            effects.push(ShakeEffect::CancelReset);
        }
        effects.push(ShakeEffect::ReleaseSound);
        effects.push(ShakeEffect::StopSampling);
        effects
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_shake_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.config.cooldown_ms,
        }
    }

    fn issue_token(&mut self) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        token
    }
}

// ============================================================================
// TESTS
// ============================================================================
