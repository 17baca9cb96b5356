//! Geometric plausibility filter for booth candidates
//!
//! A booth is assumed to be roughly rectangular, neither a noise speck nor
//! a region spanning most of the plan, and neither very wide nor very tall.
//! Contours failing any bound are dropped without error.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::contours::Contour;
use crate::config::ShapeFilterConfig;

/// Accepted booth candidate in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateBox {
    pub x: u32,
    pub y: u32,
    /// Always > 0
    pub width: u32,
    /// Always > 0
    pub height: u32,
    /// Enclosed contour area in pixels
    pub area: f64,
}

impl CandidateBox {
    /// Bounding box width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Why a contour was not accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// No bounding box could be formed
    Degenerate,
    /// Area below the noise floor
    TooSmall { area: f64 },
    /// Area above the allowed fraction of the image
    TooLarge { area: f64 },
    /// Bounding box too wide or too tall
    AspectRatio { ratio: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Degenerate => write!(f, "degenerate contour"),
            Rejection::TooSmall { area } => write!(f, "area {:.1} below minimum", area),
            Rejection::TooLarge { area } => write!(f, "area {:.1} above maximum", area),
            Rejection::AspectRatio { ratio } => write!(f, "aspect ratio {:.2} out of range", ratio),
        }
    }
}

/// Area and aspect-ratio filter
#[derive(Debug, Clone)]
pub struct ShapeFilter {
    min_area: f64,
    max_area_ratio: f64,
    min_aspect_ratio: f64,
    max_aspect_ratio: f64,
}

impl Default for ShapeFilter {
    fn default() -> Self {
        Self::new(&ShapeFilterConfig::default())
    }
}

impl ShapeFilter {
    /// Create a filter from configuration
    pub fn new(config: &ShapeFilterConfig) -> Self {
        Self {
            min_area: config.min_area,
            max_area_ratio: config.max_area_ratio,
            min_aspect_ratio: config.min_aspect_ratio,
            max_aspect_ratio: config.max_aspect_ratio,
        }
    }

    /// Accept or reject a single contour traced on an image of the given size
    pub fn evaluate(
        &self,
        contour: &Contour,
        image_width: u32,
        image_height: u32,
    ) -> Result<CandidateBox, Rejection> {
        let area = contour.area();
        if area < self.min_area {
            return Err(Rejection::TooSmall { area });
        }

        let max_area = self.max_area_ratio * image_width as f64 * image_height as f64;
        if area > max_area {
            return Err(Rejection::TooLarge { area });
        }

        let rect = contour.bounding_rect().ok_or(Rejection::Degenerate)?;
        if rect.width <= 0 || rect.height <= 0 || rect.x < 0 || rect.y < 0 {
            return Err(Rejection::Degenerate);
        }

        let candidate = CandidateBox {
            x: rect.x as u32,
            y: rect.y as u32,
            width: rect.width as u32,
            height: rect.height as u32,
            area,
        };

        let ratio = candidate.aspect_ratio();
        if ratio < self.min_aspect_ratio || ratio > self.max_aspect_ratio {
            return Err(Rejection::AspectRatio { ratio });
        }

        Ok(candidate)
    }

    /// Keep the contours that pass every bound
    pub fn apply(&self, contours: &[Contour], image_width: u32, image_height: u32) -> Vec<CandidateBox> {
        contours
            .iter()
            .filter_map(|contour| match self.evaluate(contour, image_width, image_height) {
                Ok(candidate) => Some(candidate),
                Err(reason) => {
                    tracing::trace!(points = contour.len(), %reason, "contour rejected");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    /// Corner contour whose inclusive bounding box is `w` x `h`
    fn rect(x: i32, y: i32, w: i32, h: i32) -> Contour {
        Contour::from_points(vec![
            Point::new(x, y),
            Point::new(x + w - 1, y),
            Point::new(x + w - 1, y + h - 1),
            Point::new(x, y + h - 1),
        ])
    }

    #[test]
    fn test_accepts_plausible_booth() {
        let filter = ShapeFilter::default();
        let candidate = filter.evaluate(&rect(100, 200, 123, 83), 1000, 1000).unwrap();
        assert_eq!((candidate.x, candidate.y), (100, 200));
        assert_eq!((candidate.width, candidate.height), (123, 83));
        assert_eq!(candidate.area, 122.0 * 82.0);
        assert!((candidate.aspect_ratio() - 123.0 / 83.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_noise_speck() {
        let filter = ShapeFilter::default();
        let result = filter.evaluate(&rect(10, 10, 21, 21), 1000, 1000);
        assert_eq!(result, Err(Rejection::TooSmall { area: 400.0 }));
    }

    #[test]
    fn test_min_area_is_inclusive() {
        let filter = ShapeFilter::default();
        // 25 x 20 enclosed area exactly 500
        assert!(filter.evaluate(&rect(0, 0, 26, 21), 1000, 1000).is_ok());
    }

    #[test]
    fn test_rejects_dominant_region() {
        let filter = ShapeFilter::default();
        let result = filter.evaluate(&rect(0, 0, 401, 401), 1000, 1000);
        assert!(matches!(result, Err(Rejection::TooLarge { .. })));
    }

    #[test]
    fn test_max_area_scales_with_image() {
        let filter = ShapeFilter::default();
        let contour = rect(0, 0, 101, 101);
        assert!(filter.evaluate(&contour, 1000, 1000).is_ok());
        assert!(filter.evaluate(&contour, 300, 300).is_err());
    }

    #[test]
    fn test_rejects_slivers() {
        let filter = ShapeFilter::default();
        let wide = filter.evaluate(&rect(0, 0, 310, 100), 2000, 2000);
        assert!(matches!(wide, Err(Rejection::AspectRatio { .. })));

        let tall = filter.evaluate(&rect(0, 0, 29, 100), 2000, 2000);
        assert!(matches!(tall, Err(Rejection::AspectRatio { .. })));

        // Exactly 3.0 and 0.3 are allowed
        assert!(filter.evaluate(&rect(0, 0, 300, 100), 2000, 2000).is_ok());
        assert!(filter.evaluate(&rect(0, 0, 30, 100), 2000, 2000).is_ok());
    }

    #[test]
    fn test_apply_keeps_only_accepted() {
        let filter = ShapeFilter::default();
        let contours = vec![
            rect(10, 10, 5, 5),
            rect(100, 100, 60, 40),
            rect(300, 300, 500, 20),
        ];
        let accepted = filter.apply(&contours, 1000, 1000);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].x, 100);
    }

    #[test]
    fn test_custom_bounds() {
        let config = ShapeFilterConfig {
            min_area: 10.0,
            ..ShapeFilterConfig::default()
        };
        let filter = ShapeFilter::new(&config);
        assert!(filter.evaluate(&rect(0, 0, 6, 6), 100, 100).is_ok());
    }
}
