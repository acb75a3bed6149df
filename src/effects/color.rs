//! RGB → CIE 1931 xy for color bulbs
//!
//! Colors a lamp cannot reproduce are pulled onto the nearest edge of its
//! gamut triangle.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// CIE 1931 chromaticity coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// D65 white
    pub const WHITE: XyPoint = XyPoint::new(0.3127, 0.3290);

    fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    fn from_dvec2(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Triangle of colors a lamp can produce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamut {
    pub red: XyPoint,
    pub lime: XyPoint,
    pub blue: XyPoint,
}

/// LivingColors Iris, Bloom, Aura, LightStrips
pub const GAMUT_A: Gamut = Gamut {
    red: XyPoint::new(0.704, 0.296),
    lime: XyPoint::new(0.2151, 0.7106),
    blue: XyPoint::new(0.138, 0.08),
};

/// First-generation A19 bulbs
pub const GAMUT_B: Gamut = Gamut {
    red: XyPoint::new(0.675, 0.322),
    lime: XyPoint::new(0.4091, 0.518),
    blue: XyPoint::new(0.167, 0.04),
};

/// BR30, A19 gen 3, Go, LightStrips plus
pub const GAMUT_C: Gamut = Gamut {
    red: XyPoint::new(0.692, 0.308),
    lime: XyPoint::new(0.17, 0.7),
    blue: XyPoint::new(0.153, 0.048),
};

impl Gamut {
    /// True if the lamp can render `p`
    pub fn contains(&self, p: XyPoint) -> bool {
        let (r, g, b) = (self.red.to_dvec2(), self.lime.to_dvec2(), self.blue.to_dvec2());
        let v1 = g - r;
        let v2 = b - r;
        let q = p.to_dvec2() - r;
        let denom = v1.perp_dot(v2);
        let s = q.perp_dot(v2) / denom;
        let t = v1.perp_dot(q) / denom;
        s >= 0.0 && t >= 0.0 && s + t <= 1.0
    }

    /// Closest reproducible point
    pub fn clamp(&self, p: XyPoint) -> XyPoint {
        if self.contains(p) {
            return p;
        }
        let (r, g, b) = (self.red.to_dvec2(), self.lime.to_dvec2(), self.blue.to_dvec2());
        let q = p.to_dvec2();
        [(r, g), (b, r), (g, b)]
            .into_iter()
            .map(|(a, b)| closest_on_segment(a, b, q))
            .min_by(|a, b| a.distance(q).total_cmp(&b.distance(q)))
            .map(XyPoint::from_dvec2)
            .unwrap_or(p)
    }
}

fn closest_on_segment(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
    a + ab * t
}

/// Convert an 8-bit sRGB color to xy within the lamp's gamut
pub fn rgb_to_xy(rgb: [u8; 3], gamut: &Gamut) -> XyPoint {
    let [r, g, b] = rgb.map(|c| expand_gamma(c as f64 / 255.0));

    // Wide gamut D65
    let x = r * 0.664511 + g * 0.154324 + b * 0.162028;
    let y = r * 0.283881 + g * 0.668433 + b * 0.047685;
    let z = r * 0.000088 + g * 0.072310 + b * 0.986039;

    let sum = x + y + z;
    if sum <= 0.0 {
        return XyPoint::WHITE;
    }
    gamut.clamp(XyPoint::new(x / sum, y / sum))
}

fn expand_gamma(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}
