//! End-to-end booth detection
//!
//! Composes the stages strictly forward:
//! decode -> grayscale + smoothing -> edges -> outer contours -> shape filter
//! -> percentage normalization -> row labeling.
//!
//! A [`BoothDetector`] only holds its configuration, so one instance can
//! serve concurrent calls from several threads.

use image::GrayImage;

use crate::config::DetectionConfig;
use crate::debug::{render_overlay, DebugOutput};
use crate::detection::{preprocess, Contour, EdgeMap, ShapeFilter};
use crate::error::Result;
use crate::image_loader::{decode_image, RawImage};
use crate::layout::{normalize_all, RowLabeler};
use crate::DetectionResult;

/// Stage outputs kept for debugging
struct Trace {
    result: DetectionResult,
    smoothed: GrayImage,
    edges: EdgeMap,
}

/// Booth detector with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct BoothDetector {
    config: DetectionConfig,
}

impl BoothDetector {
    /// Create a detector with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom thresholds
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Config` if the configuration is inconsistent.
    pub fn with_config(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect and label booths in an encoded image
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Decode` if the bytes are not a usable image.
    /// An image without booths is a successful, empty result.
    pub fn detect(&self, bytes: &[u8]) -> Result<DetectionResult> {
        let image = decode_image(bytes, &self.config.limits)?;
        self.detect_image(&image)
    }

    /// Detect and label booths in an already decoded image
    pub fn detect_image(&self, image: &RawImage) -> Result<DetectionResult> {
        Ok(self.run(image)?.result)
    }

    /// Detect booths and keep the intermediate images
    pub fn detect_debug(&self, bytes: &[u8]) -> Result<(DetectionResult, DebugOutput)> {
        let image = decode_image(bytes, &self.config.limits)?;
        let trace = self.run(&image)?;
        let overlay = render_overlay(&image, &trace.result.booths);

        Ok((
            trace.result,
            DebugOutput {
                smoothed: trace.smoothed,
                edges: trace.edges,
                overlay,
            },
        ))
    }

    fn run(&self, image: &RawImage) -> Result<Trace> {
        let (width, height) = (image.width(), image.height());
        tracing::debug!(width, height, channels = image.channels(), "decoded floor plan");

        let smoothed = preprocess::preprocess(image, &self.config.preprocessing);

        let (edges, contours) = self.trace_contours(&smoothed)?;
        tracing::debug!(
            edge_pixels = edges.edge_count(),
            contours = contours.len(),
            "traced outer contours"
        );

        let candidates = ShapeFilter::new(&self.config.shape_filter).apply(&contours, width, height);
        tracing::debug!(accepted = candidates.len(), "shape filter applied");

        let normalized = normalize_all(&candidates, width, height);
        let booths = RowLabeler::new(&self.config.labeling).label(normalized);

        Ok(Trace {
            result: DetectionResult::new(booths),
            smoothed,
            edges,
        })
    }

    #[cfg(not(feature = "opencv"))]
    fn trace_contours(&self, smoothed: &GrayImage) -> Result<(EdgeMap, Vec<Contour>)> {
        use crate::detection::{contours, edges};

        let edge_map = edges::extract_edges(smoothed, &self.config.edges);
        let found = contours::find_outer_contours(&edge_map);
        Ok((edge_map, found))
    }

    #[cfg(feature = "opencv")]
    fn trace_contours(&self, smoothed: &GrayImage) -> Result<(EdgeMap, Vec<Contour>)> {
        use crate::detection::opencv_backend;

        let edge_map = opencv_backend::extract_edges(smoothed, &self.config.edges)?;
        let found = opencv_backend::find_outer_contours(&edge_map)?;
        Ok((edge_map, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
    use imageproc::rect::Rect;

    fn plan(rects: &[(i32, i32, u32, u32)]) -> RawImage {
        let mut canvas = RgbImage::from_pixel(1000, 1000, Rgb([255, 255, 255]));
        for &(x, y, w, h) in rects {
            draw_filled_rect_mut(&mut canvas, Rect::at(x, y).of_size(w, h), Rgb([0, 0, 0]));
        }
        RawImage::new(DynamicImage::ImageRgb8(canvas)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = DetectionConfig::default();
        config.preprocessing.blur_kernel_size = 2;
        assert!(BoothDetector::with_config(config).is_err());
    }

    #[test]
    fn test_single_booth_detected() {
        let result = BoothDetector::new()
            .detect_image(&plan(&[(300, 400, 122, 82)]))
            .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.booths[0].id, "A1");

        let b = &result.booths[0].bounds;
        assert!((b.x - 30.0).abs() < 0.5, "x = {}", b.x);
        assert!((b.y - 40.0).abs() < 0.5, "y = {}", b.y);
        assert!((b.width - 12.2).abs() < 0.6, "width = {}", b.width);
        assert!((b.height - 8.2).abs() < 0.6, "height = {}", b.height);
    }

    #[test]
    fn test_hairline_outline_detected() {
        let mut canvas = RgbImage::from_pixel(1000, 1000, Rgb([255, 255, 255]));
        draw_hollow_rect_mut(&mut canvas, Rect::at(300, 400).of_size(122, 82), Rgb([0, 0, 0]));
        let raw = RawImage::new(DynamicImage::ImageRgb8(canvas)).unwrap();

        let result = BoothDetector::new().detect_image(&raw).unwrap();
        assert_eq!(result.count, 1);
        assert!((result.booths[0].bounds.x - 30.0).abs() < 0.5);
    }

    #[test]
    fn test_blank_plan_is_empty_success() {
        let result = BoothDetector::new().detect_image(&plan(&[])).unwrap();
        assert_eq!(result.count, 0);
        assert!(result.booths.is_empty());
    }

    #[test]
    fn test_debug_output_matches_image() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([255, 255, 255])))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let (result, debug) = BoothDetector::new().detect_debug(&bytes).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(debug.smoothed.dimensions(), (64, 48));
        assert_eq!((debug.edges.width(), debug.edges.height()), (64, 48));
        assert_eq!(debug.overlay.dimensions(), (64, 48));
    }

    #[test]
    fn test_detector_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BoothDetector>();
    }
}
