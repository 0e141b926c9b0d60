#![forbid(unsafe_code)]

//! Gesture recognition settings.

use panesplit_core::event::PointerButton;
use panesplit_layout::{ConfigError, DEFAULT_CORNER_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(remote = "PointerButton", rename_all = "snake_case")]
enum PointerButtonDef {
    Left,
    Right,
    Middle,
}

/// Gesture controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Corner region size in surface units.
    pub corner_size: u16,
    /// Button that starts a corner gesture.
    #[serde(with = "PointerButtonDef")]
    pub activation_button: PointerButton,
    /// If true, the view collapses the pane's parent when a press ends with
    /// the unsplit hint showing. Otherwise the intent is only reported.
    pub confirm_unsplit_on_release: bool,
    /// If true, the press that split a pane keeps going as a drag of the new
    /// separator.
    pub handoff_to_separator: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            corner_size: DEFAULT_CORNER_SIZE,
            activation_button: PointerButton::Left,
            confirm_unsplit_on_release: false,
            handoff_to_separator: true,
        }
    }
}

impl GestureConfig {
    /// Default configuration with a different corner size.
    pub fn with_corner_size(corner_size: u16) -> Result<Self, ConfigError> {
        let config = Self {
            corner_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corner_size == 0 {
            return Err(ConfigError::ZeroCornerSize);
        }
        Ok(())
    }
}
