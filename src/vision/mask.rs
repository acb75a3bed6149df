//! Binary segmentation mask and morphological opening
//!
//! Masks are plain `GrayImage`s: 255 for foreground, 0 for background.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::map::map_colors;
use imageproc::morphology;

use super::hsv::rgb_to_hsv;
use crate::calibration::ColorRangeConfig;

pub const FOREGROUND: u8 = 255;

/// Foreground wherever the pixel's HSV value lies inside the calibrated band
pub fn threshold(frame: &RgbImage, range: &ColorRangeConfig) -> GrayImage {
    map_colors(frame, |px| {
        Luma([if range.contains(rgb_to_hsv(px)) { FOREGROUND } else { 0 }])
    })
}

/// `iterations` 3×3 erosions followed by as many 3×3 dilations
///
/// An L∞ radius of `k` is the same as `k` passes with a 3×3 square.
pub fn open(mask: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return mask.clone();
    }
    morphology::open(mask, Norm::LInf, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use imageproc::morphology::{dilate, erode};

    fn count(mask: &GrayImage) -> usize {
        mask.pixels().filter(|px| px[0] > 0).count()
    }

    fn square(size: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
            Luma([if inside { FOREGROUND } else { 0 }])
        })
    }

    #[test]
    fn test_threshold_selects_in_range_pixels() {
        let mut frame = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        frame.put_pixel(1, 2, Rgb([255, 0, 0]));
        let range = ColorRangeConfig::new([0, 200, 200], [5, 255, 255]).unwrap();

        let mask = threshold(&frame, &range);
        assert_eq!(count(&mask), 1);
        assert_eq!(mask.get_pixel(1, 2)[0], FOREGROUND);
    }

    #[test]
    fn test_open_removes_speckle() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(5, 5, Luma([FOREGROUND]));
        assert_eq!(count(&open(&mask, 2)), 0);
    }

    #[test]
    fn test_square_element_shrinks_and_grows() {
        let mask = square(20, 5, 5, 6);
        assert_eq!(count(&erode(&mask, Norm::LInf, 1)), 16);
        assert_eq!(count(&dilate(&mask, Norm::LInf, 1)), 64);
    }

    #[test]
    fn test_open_preserves_large_square() {
        let mask = square(30, 5, 5, 12);
        assert_eq!(open(&mask, 2), mask);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let mask = square(10, 4, 4, 1);
        assert_eq!(open(&mask, 0), mask);
    }
}
