//! Per-frame ball tracking
//!
//! Segments the calibrated color, keeps the biggest blob, and judges whether
//! the ball is falling toward the boxes or travelling away from them.

use glam::Vec2;
use image::RgbImage;

use super::contour::{find_contours, largest};
use super::mask;
use crate::calibration::ColorRangeConfig;
use crate::settings::GameSettings;

/// What the tracker saw this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    pub detected: bool,
    /// Moments centroid (canonical position)
    pub centroid: Vec2,
    /// Minimal enclosing circle radius
    pub radius: f32,
    /// Ball judged to be moving away from the target; collisions are skipped
    pub suppressed: bool,
}

impl TrackedObject {
    pub fn not_detected() -> Self {
        Self {
            detected: false,
            centroid: Vec2::ZERO,
            radius: 0.0,
            suppressed: false,
        }
    }

    /// A detection at a known position (scripted input and tests)
    pub fn at(centroid: Vec2, radius: f32) -> Self {
        Self {
            detected: true,
            centroid,
            radius,
            suppressed: false,
        }
    }
}

/// State carried between ticks for the direction heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackerState {
    /// Drifted vertical position from the last accepted detection
    pub last_vertical: Option<f32>,
}

/// Tracking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerParams {
    pub min_radius: f32,
    pub vertical_drift: f32,
    pub morph_iterations: u8,
}

impl From<&GameSettings> for TrackerParams {
    fn from(settings: &GameSettings) -> Self {
        Self {
            min_radius: settings.min_detection_radius,
            vertical_drift: settings.vertical_drift,
            morph_iterations: settings.morph_iterations,
        }
    }
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self::from(&GameSettings::default())
    }
}

/// Track the calibrated object in one frame
///
/// A frame without the object is a normal outcome: the result reports
/// `detected = false` and the prior state is returned untouched.
pub fn track(
    frame: &RgbImage,
    range: &ColorRangeConfig,
    prior: TrackerState,
    params: &TrackerParams,
) -> (TrackedObject, TrackerState) {
    let foreground = mask::open(&mask::threshold(frame, range), params.morph_iterations);
    let contours = find_contours(&foreground);

    let Some(contour) = largest(&contours) else {
        return (TrackedObject::not_detected(), prior);
    };

    let circle = contour.enclosing_circle();
    if circle.radius <= params.min_radius {
        return (TrackedObject::not_detected(), prior);
    }

    let centroid = contour.centroid();
    let (suppressed, state) = judge_direction(centroid.y, prior, params.vertical_drift);

    (
        TrackedObject {
            detected: true,
            centroid,
            radius: circle.radius,
            suppressed,
        },
        state,
    )
}

/// Larger vertical values are further from the target. The first detection
/// only seeds the state; afterwards the stored value is drifted by
/// `vertical_drift` so a slowly falling ball is not flagged every tick.
pub fn judge_direction(vertical: f32, prior: TrackerState, drift: f32) -> (bool, TrackerState) {
    match prior.last_vertical {
        None => (
            false,
            TrackerState {
                last_vertical: Some(vertical),
            },
        ),
        Some(last) => (
            vertical > last,
            TrackerState {
                last_vertical: Some(vertical * drift),
            },
        ),
    }
}
