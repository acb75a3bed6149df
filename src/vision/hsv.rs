//! 8-bit RGB → HSV conversion
//!
//! Uses the compact 8-bit convention calibration tools expect: hue is degrees / 2
//! (0..180), saturation and value are scaled to 0..=255.

use image::Rgb;

/// Convert one RGB pixel to 8-bit HSV
pub fn rgb_to_hsv(Rgb([r, g, b]): Rgb<u8>) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    // 359.x degrees rounds to 180, which wraps back to red
    let h = ((h / 2.0).round() as u16 % 180) as u8;
    [h, s.round() as u8, v as u8]
}
