//! Recent ball centroids for drawing a fading trail

use std::collections::VecDeque;

use glam::Vec2;

/// Base thickness of the newest trail segment
pub const TRAIL_THICKNESS: f32 = 2.5;

/// Newest-first history of centroids; `None` marks a tick without a ball
#[derive(Debug, Clone)]
pub struct CentroidTrail {
    points: VecDeque<Option<Vec2>>,
    capacity: usize,
}

impl CentroidTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, centroid: Option<Vec2>) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_front(centroid);
        self.points.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Thickness of segment `i` (0 = newest); thins out with age
    pub fn thickness(&self, i: usize) -> f32 {
        (self.capacity as f32 / (i + 1) as f32).sqrt() * TRAIL_THICKNESS
    }

    /// Drawable segments as (newer, older, thickness), skipping gaps
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2, f32)> + '_ {
        (1..self.points.len()).filter_map(move |i| match (self.points[i - 1], self.points[i]) {
            (Some(a), Some(b)) => Some((a, b, self.thickness(i))),
            _ => None,
        })
    }
}
