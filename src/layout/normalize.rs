//! Pixel to percentage coordinate conversion

use serde::{Deserialize, Serialize};

use crate::constants::labeling::PERCENT_DECIMALS;
use crate::detection::CandidateBox;

/// Booth bounds as percentages of the image size, two-decimal precision
///
/// `x + width` and `y + height` are not clamped to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBooth {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Round to `decimals` places, exact ties going to the even digit
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

fn percent(value: u32, total: u32) -> f64 {
    round_to(value as f64 / total as f64 * 100.0, PERCENT_DECIMALS)
}

/// Express a candidate relative to the image it was found in
pub fn normalize(candidate: &CandidateBox, image_width: u32, image_height: u32) -> NormalizedBooth {
    NormalizedBooth {
        x: percent(candidate.x, image_width),
        y: percent(candidate.y, image_height),
        width: percent(candidate.width, image_width),
        height: percent(candidate.height, image_height),
    }
}

/// Normalize every candidate, preserving order
pub fn normalize_all(
    candidates: &[CandidateBox],
    image_width: u32,
    image_height: u32,
) -> Vec<NormalizedBooth> {
    candidates
        .iter()
        .map(|c| normalize(c, image_width, image_height))
        .collect()
}
