//! # Booth Scan
//!
//! A Rust crate for finding exhibition booths on rasterized floor plans.
//!
//! Given an encoded floor-plan image, the library:
//! - Smooths a grayscale copy and extracts a binary edge map
//! - Traces the outer boundary of every edge component
//! - Keeps boundaries whose area and aspect ratio look like a booth
//! - Converts them to percentage coordinates independent of resolution
//! - Groups them into rows and names them `A1`, `A2`, `B1`, ...
//!
//! ## Example
//!
//! ```rust,no_run
//! use booth_scan::detect_booths;
//!
//! let bytes = std::fs::read("hall.png")?;
//! let result = detect_booths(&bytes)?;
//! for booth in &result.booths {
//!     println!("{} at ({}%, {}%)", booth.id, booth.bounds.x, booth.bounds.y);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod config;
pub mod constants;
pub mod debug;
pub mod detection;
pub mod error;
pub mod image_loader;
pub mod layout;
pub mod pipeline;

pub use config::DetectionConfig;
pub use debug::DebugOutput;
pub use error::{DetectionError, Result};
pub use layout::{LabeledBooth, NormalizedBooth};
pub use pipeline::BoothDetector;

/// Labeled booths in reading order
///
/// Serializes as `{"booths": [{"id", "x", "y", "width", "height"}, ...], "count": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Booths sorted top-to-bottom, then left-to-right
    pub booths: Vec<LabeledBooth>,
    /// Number of booths
    pub count: usize,
}

impl DetectionResult {
    pub fn new(booths: Vec<LabeledBooth>) -> Self {
        let count = booths.len();
        Self { booths, count }
    }

    pub fn is_empty(&self) -> bool {
        self.booths.is_empty()
    }
}

/// Detect and label booths in an encoded floor-plan image
///
/// Uses the default thresholds. See [`BoothDetector`] to tune them.
///
/// # Errors
///
/// Returns `DetectionError::Decode` if the bytes are empty, truncated, not an
/// image, or exceed the decoding limits. Finding no booths is not an error.
pub fn detect_booths(bytes: &[u8]) -> Result<DetectionResult> {
    BoothDetector::new().detect(bytes)
}
