//! Grayscale conversion and noise suppression
//!
//! Produces the single-channel intensity grid the edge extractor works on.
//! Both steps are deterministic: identical input always yields identical output.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;

use crate::config::PreprocessingConfig;
use crate::constants::luma;
use crate::constants::processing::MAX_BLUR_KERNEL_SIZE;
use crate::image_loader::RawImage;

/// Convert to luminance using BT.601 channel weights
///
/// Alpha is ignored; images with fewer channels are expanded to RGB first.
pub fn to_grayscale(image: &RawImage) -> GrayImage {
    let rgb = image.pixels().to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let value = luma::RED_WEIGHT * r as f32
            + luma::GREEN_WEIGHT * g as f32
            + luma::BLUE_WEIGHT * b as f32;
        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}

/// Apply a separable Gaussian blur with a fixed odd-sized kernel
///
/// Filtering runs in `f32` and is rounded once at the end, so flat regions
/// keep their exact intensity.
pub fn smooth(gray: &GrayImage, config: &PreprocessingConfig) -> GrayImage {
    let kernel = gaussian_kernel(config.blur_kernel_size, config.blur_sigma);

    let intensity: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
            Luma([gray.get_pixel(x, y)[0] as f32])
        });
    let blurred = separable_filter_equal(&intensity, kernel.as_slice());

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([blurred.get_pixel(x, y)[0].round().clamp(0.0, 255.0) as u8])
    })
}

/// Grayscale then smooth
pub fn preprocess(image: &RawImage, config: &PreprocessingConfig) -> GrayImage {
    smooth(&to_grayscale(image), config)
}

/// Normalized 1D Gaussian weights
///
/// A non-positive `sigma` is derived from the kernel size with the usual
/// `0.3 * ((size - 1) / 2 - 1) + 0.8` rule (1.1 for a 5-tap kernel). Sizes
/// are made odd and capped at [`MAX_BLUR_KERNEL_SIZE`].
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let size = size.clamp(1, MAX_BLUR_KERNEL_SIZE) | 1;
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };

    let half = (size / 2) as i32;
    let weights: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}
