//! Color-based ball tracking
//!
//! Frame → HSV → threshold mask → erode/dilate → contours → biggest blob.
//! Everything here is a pure function of the frame plus a tiny carried state.

pub mod contour;
pub mod hsv;
pub mod mask;
pub mod tracker;

pub use contour::{Circle, Contour, find_contours, largest, min_enclosing_circle};
pub use tracker::{TrackedObject, TrackerParams, TrackerState, judge_direction, track};
