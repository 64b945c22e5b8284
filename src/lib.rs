//! Shake Sensing Kernel
//!
//! A small motion kernel that converts a raw 3-axis sample stream into a
//! debounced shake gesture, driving two side effects: a sound (played on
//! the first trigger, replayed on later ones) and a temporary "shaken"
//! display state that resets on a timer.
//!
//! # Design Philosophy
//!
//! - **Pure state machine, effectful driver**: the detector is an update
//!   function from events to effects; the pipeline executes the effects.
//! - **Explicit time**: the detector reads timestamps from its events,
//!   never the wall clock, so debounce timing is deterministically
//!   testable.
//! - **One owned timer**: at most one display reset is ever pending;
//!   scheduling supersedes, teardown cancels on every exit path.
//! - **Collaborator failures are non-fatal**: a missing sensor or a
//!   failing sound is logged and absorbed, never surfaced to the view.
//!
//! # Example
//!
//! ```
//! use shake_sensing::audio::{AudioBackend, Sound, SoundResource};
//! use shake_sensing::error::AudioError;
//! use shake_sensing::pipeline::ShakePipeline;
//! use shake_sensing::sensor::ScriptedSensor;
//! use shake_sensing::types::{MotionSample, ShakeConfig};
//!
//! struct SilentBackend;
//! impl AudioBackend for SilentBackend {
//!     fn load(&mut self, _: &SoundResource) -> Result<Box<dyn Sound>, AudioError> {
//!         Err(AudioError::LoadFailed("no audio device".into()))
//!     }
//! }
//!
//! let sensor = ScriptedSensor::new(vec![MotionSample::new(100, [1.5, 0.0, 0.0])]);
//! let mut pipeline = ShakePipeline::new(
//!     sensor,
//!     SilentBackend,
//!     SoundResource::new("assets/sound/percussion.wav"),
//!     ShakeConfig::default(),
//! );
//!
//! pipeline.pump(100);
//! assert!(pipeline.is_shaken());
//! pipeline.pump(1300);
//! assert!(!pipeline.is_shaken());
//! ```

pub mod audio;
pub mod clock;
pub mod detector;
pub mod error;
pub mod ffi;
pub mod pipeline;
pub mod sensor;
pub mod types;
pub mod view;

#[cfg(test)]
mod integration_tests;

// Re-export commonly used types
pub use detector::ShakeDetector;
pub use pipeline::ShakePipeline;
pub use types::{
    MotionSample, ShakeConfig, ShakeEffect, ShakeEvent, ShakePhase, TimerToken,
};
pub use view::ViewState;
