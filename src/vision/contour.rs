//! External contours, polygon moments and minimal enclosing circles
//!
//! Border following is done by `imageproc`. Only top-level outer borders are
//! kept, in the raster order they were found, which makes "first encountered"
//! well defined.

use glam::{DVec2, Vec2};
use image::GrayImage;
use imageproc::contours::{self, BorderType};
use imageproc::geometry::convex_hull;
use imageproc::point::Point;

const EPSILON: f64 = 1e-7;

/// One external border of the mask
#[derive(Debug, Clone)]
pub struct Contour {
    /// Border pixels in traversal order
    pub points: Vec<Point<i32>>,
    /// Enclosed polygon area
    pub area: f64,
    m00: f64,
    m10: f64,
    m01: f64,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        let (m00, m10, m01) = polygon_moments(&points);
        Self {
            points,
            area: m00.abs(),
            m00,
            m10,
            m01,
        }
    }

    /// Moments centroid (m10/m00, m01/m00)
    ///
    /// Outlines with no enclosed area (a dot, a one-pixel line) fall back to
    /// the mean border point.
    pub fn centroid(&self) -> Vec2 {
        if self.m00.abs() > EPSILON {
            return Vec2::new((self.m10 / self.m00) as f32, (self.m01 / self.m00) as f32);
        }
        let n = self.points.len().max(1) as f64;
        let sum = self
            .points
            .iter()
            .fold(DVec2::ZERO, |acc, p| acc + DVec2::new(p.x as f64, p.y as f64));
        (sum / n).as_vec2()
    }

    /// Smallest circle containing every border pixel
    pub fn enclosing_circle(&self) -> Circle {
        min_enclosing_circle(&self.points).unwrap_or(Circle {
            center: self.centroid(),
            radius: 0.0,
        })
    }
}

/// A circle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// External contours of every 8-connected foreground region
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour::new(c.points))
        .collect()
}

/// Largest contour by area; ties keep the first one found
pub fn largest(contours: &[Contour]) -> Option<&Contour> {
    contours.iter().fold(None, |best: Option<&Contour>, c| match best {
        Some(b) if b.area >= c.area => Some(b),
        _ => Some(c),
    })
}

/// Signed m00, m10, m01 of the closed polygon (Green's theorem)
fn polygon_moments(points: &[Point<i32>]) -> (f64, f64, f64) {
    if points.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let (mut a00, mut a10, mut a01) = (0.0, 0.0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let (xi, yi) = (p.x as f64, p.y as f64);
        let (xj, yj) = (q.x as f64, q.y as f64);
        let cross = xi * yj - xj * yi;
        a00 += cross;
        a10 += (xi + xj) * cross;
        a01 += (yi + yj) * cross;
    }
    (a00 / 2.0, a10 / 6.0, a01 / 6.0)
}

/// Minimal enclosing circle of a point set
///
/// Reduces to the convex hull first, then runs the incremental Welzl
/// construction. Deterministic for a given input order.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Option<Circle> {
    let hull = if points.len() < 3 {
        points.to_vec()
    } else {
        convex_hull(points)
    };
    let hull: Vec<DVec2> = hull
        .into_iter()
        .map(|p| DVec2::new(p.x as f64, p.y as f64))
        .collect();
    let first = *hull.first()?;

    let mut c = Disc::point(first);
    for i in 1..hull.len() {
        if c.contains(hull[i]) {
            continue;
        }
        c = Disc::point(hull[i]);
        for j in 0..i {
            if c.contains(hull[j]) {
                continue;
            }
            c = Disc::diameter(hull[i], hull[j]);
            for k in 0..j {
                if !c.contains(hull[k]) {
                    c = Disc::circumscribe(hull[i], hull[j], hull[k]);
                }
            }
        }
    }

    Some(Circle {
        center: c.center.as_vec2(),
        radius: c.radius as f32,
    })
}

#[derive(Debug, Clone, Copy)]
struct Disc {
    center: DVec2,
    radius: f64,
}

impl Disc {
    fn point(p: DVec2) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    fn diameter(a: DVec2, b: DVec2) -> Self {
        Self {
            center: (a + b) / 2.0,
            radius: a.distance(b) / 2.0,
        }
    }

    fn circumscribe(a: DVec2, b: DVec2, c: DVec2) -> Self {
        let ab = b - a;
        let ac = c - a;
        let d = 2.0 * ab.perp_dot(ac);
        if d.abs() < EPSILON {
            // Collinear: the widest pair spans the other point
            return [Self::diameter(a, b), Self::diameter(a, c), Self::diameter(b, c)]
                .into_iter()
                .fold(Self::point(a), |best, disc| {
                    if disc.radius > best.radius { disc } else { best }
                });
        }
        let offset = DVec2::new(
            ac.y * ab.length_squared() - ab.y * ac.length_squared(),
            ab.x * ac.length_squared() - ac.x * ab.length_squared(),
        ) / d;
        Self {
            center: a + offset,
            radius: offset.length(),
        }
    }

    #[inline]
    fn contains(&self, p: DVec2) -> bool {
        self.center.distance(p) <= self.radius + 1e-6
    }
}
