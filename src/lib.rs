//! Protect the Base - a motion-tracking arcade game
//!
//! A ball of a calibrated color is followed through the camera feed and thrown
//! at boxes falling toward the player's base.
//!
//! Core modules:
//! - `calibration`: Persisted HSV color range
//! - `vision`: Color segmentation and ball tracking
//! - `sim`: Deterministic simulation (boxes, collisions, game state)
//! - `effects`: Fire-and-forget lighting side channel
//! - `platform`: Frame sources and the driver loop
//! - `settings`: Data-driven game tuning

pub mod calibration;
pub mod effects;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod vision;

pub use calibration::ColorRangeConfig;
pub use error::{ConfigError, FrameSourceError, GameError, SettingsError};
pub use settings::GameSettings;

/// Game configuration constants
pub mod consts {
    /// Reference camera resolution
    pub const FIELD_WIDTH: u32 = 640;
    pub const FIELD_HEIGHT: u32 = 480;

    /// Box defaults
    pub const MAX_BOXES: usize = 1;
    pub const BOX_SPEED: f32 = 60.0;
    pub const TARGET_X: f32 = 250.0;
    pub const TARGET_Y: f32 = 420.0;
    pub const BOX_SIZE: f32 = 60.0;
    pub const BOX_PADDING: f32 = 20.0;

    /// Spawn area: columns are chosen so a random 10-50 px width still fits,
    /// rows fall within the top band
    pub const SPAWN_PADDING: f32 = 10.0;
    pub const SPAWN_WIDTH_MIN: i32 = 10;
    pub const SPAWN_WIDTH_MAX: i32 = 50;
    pub const SPAWN_BAND: i32 = 50;

    /// Home base defaults
    pub const HOME_PADDING: f32 = 15.0;
    pub const HOME_SIZE: f32 = 150.0;
    pub const BASE_OFFSET: f32 = 25.0;
    pub const BASE_RADIUS: f32 = 100.0;

    /// Tracking defaults
    pub const MIN_DETECTION_RADIUS: f32 = 10.0;
    pub const VERTICAL_DRIFT: f32 = 1.01;
    pub const MORPH_ITERATIONS: u8 = 2;
    pub const TRAIL_CAPACITY: usize = 64;

    pub const STARTING_LIVES: u32 = 10;
}
