//! Configuration structures for the booth detection pipeline.
//!
//! Every tunable threshold lives here, grouped by the stage that reads it.
//! The defaults come from [`crate::constants`].
//!
//! # Configuration Loading
//!
//! ```no_run
//! use booth_scan::DetectionConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = DetectionConfig::from_json_file(Path::new("detect.json"))?;
//!
//! // Or use defaults
//! let config = DetectionConfig::default();
//! # Ok::<(), booth_scan::DetectionError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{labeling, limits, processing, shape};
use crate::error::{DetectionError, Result};

/// Complete pipeline configuration for booth detection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Decoder resource ceiling
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Grayscale smoothing
    #[serde(default)]
    pub preprocessing: PreprocessingConfig,

    /// Edge detector thresholds
    #[serde(default)]
    pub edges: EdgeConfig,

    /// Booth shape acceptance bounds
    #[serde(default)]
    pub shape_filter: ShapeFilterConfig,

    /// Row grouping
    #[serde(default)]
    pub labeling: LabelingConfig,
}

/// Bounds applied while decoding untrusted bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum width or height in pixels
    pub max_dimension: u32,

    /// Maximum total pixel count
    pub max_pixels: u64,

    /// Maximum decoder allocation in bytes
    pub max_alloc_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_dimension: limits::MAX_IMAGE_DIMENSION,
            max_pixels: limits::MAX_IMAGE_PIXELS,
            max_alloc_bytes: limits::MAX_DECODE_ALLOC,
        }
    }
}

/// Smoothing applied before edge detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Gaussian kernel size (must be odd)
    pub blur_kernel_size: u32,

    /// Gaussian sigma; `<= 0` derives it from the kernel size
    pub blur_sigma: f32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: processing::BLUR_KERNEL_SIZE,
            blur_sigma: processing::BLUR_SIGMA,
        }
    }
}

/// Two-threshold edge detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Canny low (weak edge) threshold
    pub canny_low_threshold: f32,

    /// Canny high (strong edge) threshold
    pub canny_high_threshold: f32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            canny_low_threshold: processing::CANNY_LOW_THRESHOLD,
            canny_high_threshold: processing::CANNY_HIGH_THRESHOLD,
        }
    }
}

/// Geometric bounds a contour must satisfy to count as a booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFilterConfig {
    /// Minimum enclosed area in pixels
    pub min_area: f64,

    /// Maximum enclosed area as fraction of the image (0.0-1.0)
    pub max_area_ratio: f64,

    /// Minimum bounding box width / height
    pub min_aspect_ratio: f64,

    /// Maximum bounding box width / height
    pub max_aspect_ratio: f64,
}

impl Default for ShapeFilterConfig {
    fn default() -> Self {
        Self {
            min_area: shape::MIN_BOOTH_AREA,
            max_area_ratio: shape::MAX_BOOTH_AREA_RATIO,
            min_aspect_ratio: shape::MIN_ASPECT_RATIO,
            max_aspect_ratio: shape::MAX_ASPECT_RATIO,
        }
    }
}

/// Row clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Distance in percentage points from the row anchor that opens a new row
    pub row_gap_threshold: f64,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            row_gap_threshold: labeling::ROW_GAP_THRESHOLD,
        }
    }
}

impl DetectionConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectionError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DetectionError::config(format!("Invalid JSON in {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DetectionError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| DetectionError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check that parameter values are mutually consistent
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.max_dimension == 0 || limits.max_pixels == 0 || limits.max_alloc_bytes == 0 {
            return Err(DetectionError::invalid_config("resource limits must be non-zero"));
        }

        let kernel = self.preprocessing.blur_kernel_size;
        if kernel == 0 || kernel % 2 == 0 {
            return Err(DetectionError::invalid_config(format!(
                "blur_kernel_size must be odd, got {}",
                kernel
            )));
        }
        if kernel > processing::MAX_BLUR_KERNEL_SIZE {
            return Err(DetectionError::invalid_config(format!(
                "blur_kernel_size must be at most {}, got {}",
                processing::MAX_BLUR_KERNEL_SIZE,
                kernel
            )));
        }

        let edges = &self.edges;
        if edges.canny_low_threshold < 0.0 || edges.canny_low_threshold > edges.canny_high_threshold {
            return Err(DetectionError::invalid_config(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                edges.canny_low_threshold, edges.canny_high_threshold
            )));
        }

        let filter = &self.shape_filter;
        if filter.min_area < 0.0 || !(0.0..=1.0).contains(&filter.max_area_ratio) {
            return Err(DetectionError::invalid_config(
                "min_area must be >= 0 and max_area_ratio within 0.0-1.0",
            ));
        }
        if filter.min_aspect_ratio <= 0.0 || filter.min_aspect_ratio > filter.max_aspect_ratio {
            return Err(DetectionError::invalid_config(format!(
                "aspect ratio bounds must satisfy 0 < min <= max, got {} / {}",
                filter.min_aspect_ratio, filter.max_aspect_ratio
            )));
        }

        if self.labeling.row_gap_threshold < 0.0 {
            return Err(DetectionError::invalid_config("row_gap_threshold must be >= 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DetectionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shape_filter.min_area, 500.0);
        assert_eq!(config.labeling.row_gap_threshold, 5.0);
        assert_eq!(config.preprocessing.blur_kernel_size, 5);
    }

    #[test]
    fn test_even_kernel_rejected() {
        let mut config = DetectionConfig::default();
        config.preprocessing.blur_kernel_size = 4;
        assert!(matches!(config.validate(), Err(DetectionError::Config { .. })));
    }

    #[test]
    fn test_oversized_kernel_rejected() {
        let mut config = DetectionConfig::default();
        config.preprocessing.blur_kernel_size = 31;
        assert!(config.validate().is_ok());

        config.preprocessing.blur_kernel_size = 33;
        assert!(config.validate().is_err());

        let json = r#"{ "preprocessing": { "blur_kernel_size": 2147483647, "blur_sigma": 0.0 } }"#;
        let config: DetectionConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(DetectionError::Config { .. })));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = DetectionConfig::default();
        config.edges.canny_low_threshold = 200.0;
        assert!(config.validate().is_err());

        let mut config = DetectionConfig::default();
        config.shape_filter.min_aspect_ratio = 4.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_section_defaults() {
        let json = r#"{ "labeling": { "row_gap_threshold": 8.0 } }"#;
        let config: DetectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.labeling.row_gap_threshold, 8.0);
        assert_eq!(config.edges, EdgeConfig::default());
        assert_eq!(config.shape_filter, ShapeFilterConfig::default());
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("booth_scan_config_{}.json", std::process::id()));
        let mut config = DetectionConfig::default();
        config.shape_filter.min_area = 750.0;

        config.to_json_file(&path).unwrap();
        let loaded = DetectionConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = DetectionConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(DetectionError::Io { .. })));
    }
}
