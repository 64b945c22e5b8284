//! C FFI bindings for mobile host integration.
//!
//! This module exposes the shake kernel to mobile platforms via C ABI.
//! React Native apps can call these functions through native bridges.
//!
//! The kernel decides, the host executes: each call returns a snapshot
//! telling the host whether the shaken state is active and whether to
//! play or replay the sound. Audio and rendering stay on the host side,
//! where the platform facilities live.
//!
//! Memory Safety:
//! - The engine instance must be freed with `shake_engine_destroy()`.
//! - NULL checks are performed on all inputs.
//!
//! Thread Safety:
//! - The engine is NOT thread-safe. Use a single thread or mutex.

use std::ptr;

use crate::detector::ShakeDetector;
use crate::types::{MotionSample, ShakeConfig, ShakeEffect, ShakeEvent, TimerToken};

// ============================================================================
// OPAQUE HANDLE TYPES
// ============================================================================

/// Opaque handle to the shake engine.
pub struct ShakeEngine {
    detector: ShakeDetector,
    pending_reset: Option<(TimerToken, u64)>,
    sound_loaded: bool,
}

/// Result status codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer provided.
    NullPointer = 1,
    /// Invalid parameter value.
    InvalidParameter = 2,
}

/// Sound action the host should perform after a call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeSoundCommand {
    /// Nothing to do.
    None = 0,
    /// Load the sound resource and play it (first trigger).
    Play = 1,
    /// Stop and replay the already loaded sound.
    Replay = 2,
}

/// Snapshot returned from every processing call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ShakeOutput {
    /// 1 while the shaken visual state is active, 0 otherwise.
    pub is_shaken: i32,
    /// Sound action for the host to perform.
    pub sound_command: ShakeSoundCommand,
    /// 1 if this call accepted a trigger.
    pub trigger_accepted: i32,
}

/// Engine configuration. Zero or negative fields fall back to defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ShakeEngineConfig {
    /// Per-axis trigger threshold (sensor units).
    pub shake_threshold: f32,
    /// Minimum milliseconds between accepted triggers.
    pub cooldown_ms: i64,
    /// Milliseconds the shaken state persists.
    pub display_ms: i64,
}

impl ShakeEngineConfig {
    fn to_config(self) -> Option<ShakeConfig> {
        let defaults = ShakeConfig::default();
        if !self.shake_threshold.is_finite() {
            return None;
        }
        Some(ShakeConfig {
            shake_threshold: if self.shake_threshold > 0.0 {
                self.shake_threshold
            } else {
                defaults.shake_threshold
            },
            cooldown_ms: if self.cooldown_ms > 0 {
                self.cooldown_ms as u64
            } else {
                defaults.cooldown_ms
            },
            display_ms: if self.display_ms > 0 {
                self.display_ms as u64
            } else {
                defaults.display_ms
            },
            update_interval_ms: defaults.update_interval_ms,
        })
    }
}

// ============================================================================
// ENGINE LIFECYCLE
// ============================================================================

/// Create a new shake engine instance with default configuration.
///
/// # Safety
/// - The returned pointer must be freed with `shake_engine_destroy()`.
#[no_mangle]
pub extern "C" fn shake_engine_create() -> *mut ShakeEngine {
    Box::into_raw(Box::new(ShakeEngine {
        detector: ShakeDetector::default_detector(),
        pending_reset: None,
        sound_loaded: false,
    }))
}

/// Create a new shake engine instance with explicit configuration.
///
/// # Safety
/// - `config` must be a valid pointer to ShakeEngineConfig.
/// - The returned pointer must be freed with `shake_engine_destroy()`.
///
/// # Returns
/// - Pointer to ShakeEngine on success.
/// - NULL on invalid input.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_create_with_config(
    config: *const ShakeEngineConfig,
) -> *mut ShakeEngine {
    if config.is_null() {
        return ptr::null_mut();
    }
    let Some(config) = (*config).to_config() else {
        return ptr::null_mut();
    };
    Box::into_raw(Box::new(ShakeEngine {
        detector: ShakeDetector::new(config),
        pending_reset: None,
        sound_loaded: false,
    }))
}

/// Destroy an engine instance. Performs full teardown: the pending reset
/// is cancelled and can never fire afterwards.
///
/// # Safety
/// - `engine` must be a pointer returned by a create function, or NULL.
/// - The pointer must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_destroy(engine: *mut ShakeEngine) {
    if engine.is_null() {
        return;
    }
    let mut engine = Box::from_raw(engine);
    engine.pending_reset = None;
    let _ = engine.detector.update(ShakeEvent::Teardown);
}

// ============================================================================
// SAMPLE PROCESSING
// ============================================================================

/// Process one motion sample.
///
/// Fires the pending display reset first if its deadline is at or before
/// the sample timestamp, then evaluates the sample.
///
/// # Safety
/// - `engine` and `out` must be valid pointers.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_process_sample(
    engine: *mut ShakeEngine,
    timestamp_ms: u64,
    x: f32,
    y: f32,
    z: f32,
    out: *mut ShakeOutput,
) -> ShakeStatus {
    if engine.is_null() || out.is_null() {
        return ShakeStatus::NullPointer;
    }
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return ShakeStatus::InvalidParameter;
    }

    let engine = &mut *engine;
    engine.fire_due_reset(timestamp_ms);

    let sample = MotionSample::new(timestamp_ms, [x, y, z]);
    let effects = engine.detector.update(ShakeEvent::Sample(sample));
    *out = engine.apply_effects(&effects, timestamp_ms);
    ShakeStatus::Ok
}

/// Advance engine time without a sample, firing the display reset if its
/// deadline has passed. Call this from the host's timer or frame loop.
///
/// # Safety
/// - `engine` and `out` must be valid pointers.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_advance(
    engine: *mut ShakeEngine,
    now_ms: u64,
    out: *mut ShakeOutput,
) -> ShakeStatus {
    if engine.is_null() || out.is_null() {
        return ShakeStatus::NullPointer;
    }

    let engine = &mut *engine;
    engine.fire_due_reset(now_ms);
    *out = engine.snapshot(ShakeSoundCommand::None, false);
    ShakeStatus::Ok
}

/// Milliseconds until the pending display reset fires, or -1 when none is
/// pending. Lets the host schedule its next `shake_engine_advance` call.
///
/// # Safety
/// - `engine` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn shake_engine_next_deadline(engine: *const ShakeEngine, now_ms: u64) -> i64 {
    if engine.is_null() {
        return -1;
    }
    match (*engine).pending_reset {
        Some((_, deadline)) => deadline.saturating_sub(now_ms) as i64,
        None => -1,
    }
}

impl ShakeEngine {
    fn fire_due_reset(&mut self, now_ms: u64) {
        if let Some((token, deadline)) = self.pending_reset {
            if deadline <= now_ms {
                self.pending_reset = None;
                let _ = self.detector.update(ShakeEvent::ResetElapsed(token));
            }
        }
    }

    fn apply_effects(&mut self, effects: &[ShakeEffect], base_ms: u64) -> ShakeOutput {
        let mut sound = ShakeSoundCommand::None;
        let mut accepted = false;
        for effect in effects {
            match effect {
                ShakeEffect::TriggerSound => {
                    accepted = true;
                    sound = if self.sound_loaded {
                        ShakeSoundCommand::Replay
                    } else {
                        self.sound_loaded = true;
                        ShakeSoundCommand::Play
                    };
                }
                ShakeEffect::ScheduleReset { token, delay_ms } => {
                    self.pending_reset = Some((*token, base_ms + delay_ms));
                }
                ShakeEffect::CancelReset => {
                    self.pending_reset = None;
                }
                ShakeEffect::ReleaseSound => {
                    self.sound_loaded = false;
                }
                ShakeEffect::StopSampling => {}
            }
        }
        self.snapshot(sound, accepted)
    }

    fn snapshot(&self, sound: ShakeSoundCommand, accepted: bool) -> ShakeOutput {
        ShakeOutput {
            is_shaken: self.detector.is_shaken() as i32,
            sound_command: sound,
            trigger_accepted: accepted as i32,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
