//! Error taxonomy for external collaborators.
//!
//! The detection logic itself has no error conditions. Everything that can
//! fail lives at the capability boundaries (sensor, audio), and all of it
//! is non-fatal: failures are logged and absorbed, never propagated to the
//! view layer.

use thiserror::Error;

/// Motion sensor failures.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The device has no usable motion sensor, or access was denied.
    /// Sample delivery simply never starts.
    #[error("motion sensor unavailable: {0}")]
    Unavailable(String),
}

/// Audio playback facility failures.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The sound resource could not be loaded (missing asset, codec
    /// failure). The trigger proceeds without sound.
    #[error("failed to load sound resource: {0}")]
    LoadFailed(String),

    /// Playback, stop, or replay failed (device audio unavailable).
    #[error("sound playback failed: {0}")]
    PlaybackFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SensorError::Unavailable("no accelerometer".into());
        assert_eq!(
            err.to_string(),
            "motion sensor unavailable: no accelerometer"
        );

        let err = AudioError::LoadFailed("asset missing".into());
        assert_eq!(err.to_string(), "failed to load sound resource: asset missing");
    }
}
