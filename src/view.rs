//! Display projection.
//!
//! The view layer receives nothing but the current phase and renders one
//! of two visual states. This module is a pure projection; it holds no
//! state and has no other coupling to the detector.

use crate::types::ShakePhase;

/// Alert background shown while shaken.
pub const SHAKEN_BACKGROUND: &str = "#f47d2f";
/// Idle background.
pub const IDLE_BACKGROUND: &str = "#ffffff";
/// Label shown while shaken.
pub const SHAKEN_LABEL: &str = "SHAKE!";

/// What the view layer should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Background color as a hex string.
    pub background: &'static str,
    /// Centered label, if any.
    pub label: Option<&'static str>,
}

impl ViewState {
    /// Project a detector phase into a renderable state.
    pub fn from_phase(phase: ShakePhase) -> Self {
        match phase {
            ShakePhase::Idle => Self {
                background: IDLE_BACKGROUND,
                label: None,
            },
            ShakePhase::Shaken => Self {
                background: SHAKEN_BACKGROUND,
                label: Some(SHAKEN_LABEL),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_projection() {
        let view = ViewState::from_phase(ShakePhase::Idle);
        assert_eq!(view.background, IDLE_BACKGROUND);
        assert!(view.label.is_none());
    }

    #[test]
    fn test_shaken_projection() {
        let view = ViewState::from_phase(ShakePhase::Shaken);
        assert_eq!(view.background, SHAKEN_BACKGROUND);
        assert_eq!(view.label, Some(SHAKEN_LABEL));
    }
}
