#![forbid(unsafe_code)]

//! Split sizing policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Share of the parent extent given to a freshly created pane.
pub const DEFAULT_NEW_PANE_FRACTION: f64 = 0.02;

/// Smallest share either side of a separator may be dragged down to.
pub const DEFAULT_MIN_PANE_FRACTION: f64 = 0.01;

/// Sizing policy applied when nodes split and separators move.
///
/// Fractions are relative to the extent left after the separator's own
/// thickness is removed. A `separator_thickness` of zero means children
/// share the parent extent exactly and the separator exists only as a grab
/// region `grab_margin` cells wide on each side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Initial share of the newly inserted pane. Must lie in
    /// `[min_pane_fraction, 0.5]`.
    pub new_pane_fraction: f64,
    /// Lower clamp for either side's share. Must lie in `(0, 0.5)`.
    pub min_pane_fraction: f64,
    /// Cells occupied by the separator between siblings.
    pub separator_thickness: u16,
    /// Extra cells on each side of the boundary that still grab the separator.
    pub grab_margin: u16,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            new_pane_fraction: DEFAULT_NEW_PANE_FRACTION,
            min_pane_fraction: DEFAULT_MIN_PANE_FRACTION,
            separator_thickness: 0,
            grab_margin: 1,
        }
    }
}

impl SplitConfig {
    /// Build a validated configuration.
    pub fn new(
        new_pane_fraction: f64,
        min_pane_fraction: f64,
        separator_thickness: u16,
        grab_margin: u16,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            new_pane_fraction,
            min_pane_fraction,
            separator_thickness,
            grab_margin,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the fraction bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_pane_fraction.is_finite()
            || self.min_pane_fraction <= 0.0
            || self.min_pane_fraction >= 0.5
        {
            return Err(ConfigError::FractionOutOfRange {
                field: "min_pane_fraction",
                value: self.min_pane_fraction,
            });
        }
        if !self.new_pane_fraction.is_finite()
            || self.new_pane_fraction <= 0.0
            || self.new_pane_fraction > 0.5
        {
            return Err(ConfigError::FractionOutOfRange {
                field: "new_pane_fraction",
                value: self.new_pane_fraction,
            });
        }
        if self.new_pane_fraction < self.min_pane_fraction {
            return Err(ConfigError::NewPaneBelowMinimum {
                new_pane_fraction: self.new_pane_fraction,
                min_pane_fraction: self.min_pane_fraction,
            });
        }
        Ok(())
    }

    /// Clamp a first-child share into `[min, 1 - min]`.
    #[must_use]
    pub fn clamp_ratio(&self, ratio: f64) -> f64 {
        clamp_ratio(ratio, self.min_pane_fraction)
    }
}

pub(crate) fn clamp_ratio(ratio: f64, min_fraction: f64) -> f64 {
    if ratio.is_nan() {
        return 0.5;
    }
    ratio.clamp(min_fraction, 1.0 - min_fraction)
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A fraction is not finite or lies outside its permitted range.
    FractionOutOfRange { field: &'static str, value: f64 },
    /// The initial share would already violate the minimum share.
    NewPaneBelowMinimum {
        new_pane_fraction: f64,
        min_pane_fraction: f64,
    },
    /// Gesture corner size must be at least one cell.
    ZeroCornerSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FractionOutOfRange { field, value } => {
                write!(f, "{field} = {value} is outside its permitted range")
            }
            Self::NewPaneBelowMinimum {
                new_pane_fraction,
                min_pane_fraction,
            } => write!(
                f,
                "new_pane_fraction {new_pane_fraction} is below min_pane_fraction {min_pane_fraction}"
            ),
            Self::ZeroCornerSize => write!(f, "corner_size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
