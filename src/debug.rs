//! Intermediate images for inspecting a detection run

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detection::EdgeMap;
use crate::image_loader::RawImage;
use crate::layout::LabeledBooth;

/// Outline color used for detected booths
pub const OVERLAY_COLOR: Rgb<u8> = Rgb([220, 38, 38]);

/// Stage outputs captured by [`BoothDetector::detect_debug`](crate::BoothDetector::detect_debug)
#[derive(Debug, Clone)]
pub struct DebugOutput {
    /// Grayscale grid after smoothing
    pub smoothed: GrayImage,
    /// Binary edge map fed to the contour finder
    pub edges: EdgeMap,
    /// Source image with every detected booth outlined
    pub overlay: RgbImage,
}

/// Draw booth outlines onto a copy of the source image
///
/// Percentages are mapped back onto the source resolution, the same way a
/// UI scales them onto its rendering of the plan.
pub fn render_overlay(image: &RawImage, booths: &[LabeledBooth]) -> RgbImage {
    let mut canvas = image.pixels().to_rgb8();
    let (width, height) = canvas.dimensions();

    for booth in booths {
        let b = &booth.bounds;
        let x = (b.x / 100.0 * width as f64).round() as i32;
        let y = (b.y / 100.0 * height as f64).round() as i32;
        let w = ((b.width / 100.0 * width as f64).round() as u32).max(1);
        let h = ((b.height / 100.0 * height as f64).round() as u32).max(1);
        draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(w, h), OVERLAY_COLOR);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NormalizedBooth;
    use image::DynamicImage;

    #[test]
    fn test_overlay_outlines_booth() {
        let raw = RawImage::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            200,
            100,
            Rgb([255, 255, 255]),
        )))
        .unwrap();
        let booth = LabeledBooth {
            id: "A1".to_string(),
            bounds: NormalizedBooth { x: 10.0, y: 20.0, width: 25.0, height: 30.0 },
        };

        let overlay = render_overlay(&raw, &[booth]);
        assert_eq!(overlay.dimensions(), (200, 100));
        assert_eq!(*overlay.get_pixel(20, 20), OVERLAY_COLOR);
        assert_eq!(*overlay.get_pixel(69, 49), OVERLAY_COLOR);
        assert_eq!(*overlay.get_pixel(40, 35), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_overlay_without_booths_is_unchanged() {
        let source = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
        let raw = RawImage::new(DynamicImage::ImageRgb8(source.clone())).unwrap();
        assert_eq!(render_overlay(&raw, &[]), source);
    }
}
