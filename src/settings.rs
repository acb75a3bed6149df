//! Game tuning
//!
//! Optional JSON file; every field falls back to the stock arcade values.
//! The color calibration lives separately in [`crate::calibration`] and has no
//! fallback.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // === Play field ===
    /// Play field width (camera frame width)
    pub field_width: u32,
    /// Play field height (camera frame height)
    pub field_height: u32,

    // === Boxes ===
    /// Live boxes kept on the field at once
    pub max_boxes: usize,
    /// Homing divisor: each tick a box covers 1/box_speed of the remaining distance
    pub box_speed: f32,
    /// Point every box homes toward
    pub target: Vec2,
    /// Spawn margin allowed past the field edges
    pub spawn_padding: f32,
    /// Sprite edge length of a box
    pub box_size: f32,
    /// Transparent sprite margin excluded from the collision circle
    pub box_padding: f32,

    // === Home base ===
    pub home_padding: f32,
    pub home_size: f32,
    /// Base collision point sits this far below the bottom edge
    pub base_offset: f32,
    pub base_radius: f32,

    // === Tracking ===
    /// Enclosing-circle radius at or below which a detection is noise
    pub min_detection_radius: f32,
    /// Multiplier applied to the stored vertical position after each comparison
    pub vertical_drift: f32,
    /// Erosion passes followed by the same number of dilation passes
    pub morph_iterations: u8,
    /// Centroids remembered for the ball trail
    pub trail_capacity: usize,

    // === Session ===
    pub starting_lives: u32,
    /// Light group flashed on hits and misses
    pub light_group: u8,
    /// RNG seed for box spawning
    pub seed: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            max_boxes: MAX_BOXES,
            box_speed: BOX_SPEED,
            target: Vec2::new(TARGET_X, TARGET_Y),
            spawn_padding: SPAWN_PADDING,
            box_size: BOX_SIZE,
            box_padding: BOX_PADDING,

            home_padding: HOME_PADDING,
            home_size: HOME_SIZE,
            base_offset: BASE_OFFSET,
            base_radius: BASE_RADIUS,

            min_detection_radius: MIN_DETECTION_RADIUS,
            vertical_drift: VERTICAL_DRIFT,
            morph_iterations: MORPH_ITERATIONS,
            trail_capacity: TRAIL_CAPACITY,

            starting_lives: STARTING_LIVES,
            light_group: 1,
            seed: 0x5eed,
        }
    }
}

impl GameSettings {
    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load tuning if the file exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::info!("Using default tuning");
            Ok(Self::default())
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("box_speed", self.box_speed),
            ("box_size", self.box_size),
            ("vertical_drift", self.vertical_drift),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("{value} must be a positive number"),
                });
            }
        }
        if !(0.0..self.box_size).contains(&self.box_padding) {
            return Err(SettingsError::Invalid {
                field: "box_padding",
                reason: format!("{} must lie in 0..{}", self.box_padding, self.box_size),
            });
        }
        Ok(())
    }

    /// Field dimensions as floats
    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width as f32, self.field_height as f32)
    }

    /// Center of the home base collision circle below a field of this size
    pub fn base_point_in(&self, field_size: Vec2) -> Vec2 {
        Vec2::new(field_size.x / 2.0, field_size.y + self.base_offset)
    }
}
