//! Booth outline detection module
//!
//! This module handles the pixel-level stages of the pipeline: grayscale
//! preprocessing, edge extraction, contour tracing and shape filtering.

pub mod contours;
pub mod edges;
#[cfg(feature = "opencv")]
pub mod opencv_backend;
pub mod preprocess;
pub mod shape_filter;

pub use contours::{Contour, PixelRect};
pub use edges::EdgeMap;
pub use shape_filter::{CandidateBox, Rejection, ShapeFilter};
