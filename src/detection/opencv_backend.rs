//! OpenCV implementations of edge extraction and contour tracing
//!
//! Enabled with the `opencv` feature. Produces the same [`EdgeMap`] and
//! [`Contour`] types as the pure-Rust path so the rest of the pipeline is
//! unchanged.

use image::GrayImage;
use opencv::{
    core::{Mat, Point, Scalar, Vector, CV_8UC1},
    imgproc::{canny, find_contours, CHAIN_APPROX_SIMPLE, RETR_EXTERNAL},
    prelude::*,
};

use super::contours::Contour;
use super::edges::EdgeMap;
use crate::config::EdgeConfig;
use crate::error::{DetectionError, Result};

type VectorOfPoint = Vector<Point>;

/// Copy a grayscale buffer into a single-channel Mat
fn gray_to_mat(gray: &GrayImage) -> Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        gray.height() as i32,
        gray.width() as i32,
        CV_8UC1,
        Scalar::all(0.0),
    )
    .map_err(|e| DetectionError::opencv("Mat allocation", e))?;

    mat.data_bytes_mut()
        .map_err(|e| DetectionError::opencv("Mat data access", e))?
        .copy_from_slice(gray.as_raw());

    Ok(mat)
}

/// Copy a single-channel Mat back into a grayscale buffer
fn mat_to_gray(mat: &Mat) -> Result<GrayImage> {
    let bytes = mat
        .data_bytes()
        .map_err(|e| DetectionError::opencv("Mat data access", e))?;
    GrayImage::from_raw(mat.cols() as u32, mat.rows() as u32, bytes.to_vec())
        .ok_or_else(|| DetectionError::decode_msg("edge mask size does not match its buffer"))
}

/// Canny edge detection via OpenCV (3x3 Sobel aperture, L1 gradient)
pub fn extract_edges(smoothed: &GrayImage, config: &EdgeConfig) -> Result<EdgeMap> {
    let src = gray_to_mat(smoothed)?;
    let mut edges = Mat::default();
    canny(
        &src,
        &mut edges,
        config.canny_low_threshold as f64,
        config.canny_high_threshold as f64,
        3,
        false,
    )
    .map_err(|e| DetectionError::opencv("Canny edge detection", e))?;

    Ok(EdgeMap::from_mask(mat_to_gray(&edges)?))
}

/// External contours with simple chain approximation via OpenCV
pub fn find_outer_contours(edges: &EdgeMap) -> Result<Vec<Contour>> {
    let mask = gray_to_mat(edges.as_image())?;
    let mut contours = Vector::<VectorOfPoint>::new();
    find_contours(
        &mask,
        &mut contours,
        RETR_EXTERNAL,
        CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )
    .map_err(|e| DetectionError::opencv("Contour detection", e))?;

    Ok(contours
        .iter()
        .map(|contour| {
            Contour::from_points(
                contour
                    .iter()
                    .map(|p| imageproc::point::Point::new(p.x, p.y))
                    .collect(),
            )
        })
        .collect())
}
