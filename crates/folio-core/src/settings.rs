//! Motion settings
//!
//! Timings default to the values the landing page was tuned with; every field
//! can be overridden from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::Ease;
use crate::gesture::GestureThresholds;

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Page-level motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Input noise thresholds
    pub gestures: GestureThresholds,

    /// Seconds for a page-to-page slide transition
    pub slide_duration: f32,

    /// Easing for slide transitions
    pub slide_ease: Ease,

    /// Seconds the lock stays held after a slide settles, swallowing
    /// trailing wheel events
    pub release_buffer: f32,

    /// Carousel step timings
    pub carousel: CarouselTiming,
}

/// Carousel timings and card styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselTiming {
    /// Seconds for the strip to recenter
    pub track_duration: f32,
    pub track_ease: Ease,

    /// Seconds for card scale/opacity changes
    pub card_duration: f32,
    pub card_ease: Ease,

    /// Seconds before another in-bounds step is accepted
    pub step_guard: f32,

    /// Seconds before another step is accepted after handing off to the page
    pub boundary_guard: f32,

    pub active_scale: f32,
    pub idle_scale: f32,
    pub idle_opacity: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            gestures: GestureThresholds::default(),
            slide_duration: 1.0,
            slide_ease: Ease::Power3InOut,
            release_buffer: 0.05,
            carousel: CarouselTiming::default(),
        }
    }
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            track_duration: 0.8,
            track_ease: Ease::Power3InOut,
            card_duration: 0.6,
            card_ease: Ease::Power2Out,
            step_guard: 0.4,
            boundary_guard: 0.8,
            active_scale: 1.1,
            idle_scale: 0.9,
            idle_opacity: 0.5,
        }
    }
}

impl MotionSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        tracing::info!("Loaded motion settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Reject negative or non-finite timings
    pub fn validate(&self) -> Result<(), SettingsError> {
        let seconds = [
            ("slide_duration", self.slide_duration),
            ("release_buffer", self.release_buffer),
            ("carousel.track_duration", self.carousel.track_duration),
            ("carousel.card_duration", self.carousel.card_duration),
            ("carousel.step_guard", self.carousel.step_guard),
            ("carousel.boundary_guard", self.carousel.boundary_guard),
            ("gestures.wheel_tolerance", self.gestures.wheel_tolerance),
            ("gestures.swipe_min_distance", self.gestures.swipe_min_distance),
            ("gestures.vertical_swipe_tolerance", self.gestures.vertical_swipe_tolerance),
        ];

        for (field, value) in seconds {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("expected a non-negative number, got {}", value),
                });
            }
        }
        Ok(())
    }
}
