//! Audio playback capability and the idempotent sound player.
//!
//! The platform provides an [`AudioBackend`] that can load a resource into
//! a [`Sound`] handle. [`SoundPlayer`] layers the replay policy on top:
//! the resource is loaded exactly once, on the first accepted trigger;
//! every later trigger stops and replays the same handle from the start,
//! so rapid re-triggers restart the clip instead of overlapping instances.
//!
//! Every audio failure is non-fatal: logged and swallowed, never allowed
//! to reach the detector or the view.

use log::{debug, warn};

use crate::error::AudioError;

/// Reference to a sound asset the backend can resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundResource(pub String);

impl SoundResource {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// A loaded, playable sound.
pub trait Sound {
    fn play(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self) -> Result<(), AudioError>;
    /// Restart playback from the beginning.
    fn replay(&mut self) -> Result<(), AudioError>;
    /// Release the underlying resource.
    fn unload(&mut self) -> Result<(), AudioError>;
}

/// Platform audio facility that loads resources into sounds.
pub trait AudioBackend {
    fn load(&mut self, resource: &SoundResource) -> Result<Box<dyn Sound>, AudioError>;
}

/// Owns at most one loaded sound and the load-once / replay policy.
pub struct SoundPlayer<B: AudioBackend> {
    backend: B,
    resource: SoundResource,
    sound: Option<Box<dyn Sound>>,
}

impl<B: AudioBackend> SoundPlayer<B> {
    pub fn new(backend: B, resource: SoundResource) -> Self {
        Self {
            backend,
            resource,
            sound: None,
        }
    }

    /// Play the shake sound for one accepted trigger.
    ///
    /// First call loads the resource and plays it; later calls stop the
    /// running playback and replay the same handle. Failures are logged
    /// and swallowed: a trigger without sound is still a valid trigger.
    pub fn trigger(&mut self) {
        match self.sound.as_mut() {
            Some(sound) => {
                if let Err(err) = sound.stop().and_then(|()| sound.replay()) {
                    warn!("shake sound replay failed: {err}");
                }
            }
            None => match self.backend.load(&self.resource) {
                Ok(mut sound) => {
                    if let Err(err) = sound.play() {
                        warn!("shake sound playback failed: {err}");
                    }
                    // Keep the handle even if playback failed; the next
                    // trigger replays instead of re-loading.
                    self.sound = Some(sound);
                }
                Err(err) => {
                    warn!("shake sound load failed: {err}");
                }
            },
        }
    }

    /// Unload the sound. Safe to call repeatedly; called on teardown.
    pub fn release(&mut self) {
        if let Some(mut sound) = self.sound.take() {
            debug!("unloading shake sound");
            if let Err(err) = sound.unload() {
                warn!("shake sound unload failed: {err}");
            }
        }
    }

    /// Whether a sound handle is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.sound.is_some()
    }
}

impl<B: AudioBackend> Drop for SoundPlayer<B> {
    fn drop(&mut self) {
        self.release();
    }
}
