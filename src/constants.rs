//! Detection thresholds and processing parameters
//!
//! These are empirically tuned for floor-plan line art: thin dark booth
//! borders on a light background. They seed [`DetectionConfig::default`]
//! and can be overridden there without touching pipeline code.
//!
//! [`DetectionConfig::default`]: crate::config::DetectionConfig

/// Grayscale conversion weights (ITU-R BT.601 luma)
pub mod luma {
    /// Red channel weight
    pub const RED_WEIGHT: f32 = 0.299;
    /// Green channel weight
    pub const GREEN_WEIGHT: f32 = 0.587;
    /// Blue channel weight
    pub const BLUE_WEIGHT: f32 = 0.114;
}

/// Image preprocessing parameters
pub mod processing {
    /// Gaussian smoothing kernel size (odd)
    pub const BLUR_KERNEL_SIZE: u32 = 5;

    /// Largest smoothing kernel a config may request
    pub const MAX_BLUR_KERNEL_SIZE: u32 = 31;

    /// Gaussian smoothing sigma; zero or negative derives it from the kernel size
    pub const BLUR_SIGMA: f32 = 0.0;

    /// Edge detection thresholds on gradient magnitude
    pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
    pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;
}

/// Booth shape acceptance bounds
pub mod shape {
    /// Minimum enclosed contour area in pixels (rejects noise specks)
    pub const MIN_BOOTH_AREA: f64 = 500.0;

    /// Maximum contour area as fraction of the image (rejects borders and background)
    pub const MAX_BOOTH_AREA_RATIO: f64 = 0.10;

    /// Bounding box width / height bounds
    pub const MIN_ASPECT_RATIO: f64 = 0.30;
    pub const MAX_ASPECT_RATIO: f64 = 3.00;
}

/// Row grouping and label synthesis
pub mod labeling {
    /// Vertical distance (percentage points) from the row anchor that starts a new row
    pub const ROW_GAP_THRESHOLD: f64 = 5.0;

    /// Decimal places kept on normalized coordinates
    pub const PERCENT_DECIMALS: i32 = 2;
}

/// Resource ceiling applied while decoding untrusted input
pub mod limits {
    /// Maximum accepted width or height in pixels
    pub const MAX_IMAGE_DIMENSION: u32 = 16_384;

    /// Maximum accepted pixel count
    pub const MAX_IMAGE_PIXELS: u64 = 40_000_000; // 40MP

    /// Maximum decoder allocation in bytes
    pub const MAX_DECODE_ALLOC: u64 = 512 * 1024 * 1024;
}
