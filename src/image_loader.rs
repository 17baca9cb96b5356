//! Floor-plan image decoding with a resource ceiling
//!
//! This module turns an opaque byte buffer into a [`RawImage`]. The format is
//! sniffed from the content, never from a file name, so the same path serves
//! uploaded payloads and files on disk.
//!
//! ## Supported Formats
//!
//! Everything the `image` crate decodes with its default features:
//! JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, PNM, QOI, HDR, EXR.
//!
//! ## Limits
//!
//! Decoding runs under [`image::Limits`] built from [`LimitsConfig`], and the
//! decoded grid is checked against a total pixel budget. Oversized input is
//! reported as a decode failure rather than exhausting memory.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader, Limits};

use crate::config::LimitsConfig;
use crate::error::{DetectionError, Result};

/// Decoded pixel grid owned by a single detection run
#[derive(Debug, Clone)]
pub struct RawImage {
    pixels: DynamicImage,
}

impl RawImage {
    /// Wrap an already decoded image
    ///
    /// Returns a decode error for zero-sized images, which no codec should
    /// produce but a caller-built buffer can.
    pub fn new(pixels: DynamicImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(DetectionError::decode_msg(format!(
                "image has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Number of channels in the decoded color type
    pub fn channels(&self) -> u8 {
        self.pixels.color().channel_count()
    }

    /// Borrow the decoded pixels
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

/// File formats recognised by extension when scanning directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }
}

/// Decode an encoded raster image under the given resource ceiling
///
/// # Errors
///
/// Returns `DetectionError::Decode` if:
/// - The buffer is empty
/// - The format cannot be recognised or is not compiled in
/// - The data is corrupt or truncated
/// - The image exceeds `limits`
pub fn decode_image(bytes: &[u8], limits: &LimitsConfig) -> Result<RawImage> {
    if bytes.is_empty() {
        return Err(DetectionError::decode_msg("empty input"));
    }

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DetectionError::decode("Failed to sniff image format", e))?;

    if reader.format().is_none() {
        return Err(DetectionError::decode_msg("unrecognised image format"));
    }

    reader.limits(decoder_limits(limits));

    let pixels = reader
        .decode()
        .map_err(|e| DetectionError::decode("Corrupt or unsupported image data", e))?;

    let pixel_count = pixels.width() as u64 * pixels.height() as u64;
    if pixel_count > limits.max_pixels {
        return Err(DetectionError::decode_msg(format!(
            "image is {}x{} ({} pixels), above the {} pixel limit",
            pixels.width(),
            pixels.height(),
            pixel_count,
            limits.max_pixels
        )));
    }

    RawImage::new(pixels)
}

/// Read an image file from disk and decode it
///
/// # Example
///
/// ```rust,no_run
/// use booth_scan::config::LimitsConfig;
/// use booth_scan::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("hall.png"), &LimitsConfig::default())?;
/// println!("Loaded plan: {}x{}", image.width(), image.height());
/// # Ok::<(), booth_scan::DetectionError>(())
/// ```
pub fn load_image(path: &Path, limits: &LimitsConfig) -> Result<RawImage> {
    let bytes = std::fs::read(path).map_err(|e| DetectionError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_image(&bytes, limits)
}

fn decoder_limits(config: &LimitsConfig) -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(config.max_dimension);
    limits.max_image_height = Some(config.max_dimension);
    limits.max_alloc = Some(config.max_alloc_bytes);
    limits
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "pbm", "pgm", "ppm", "pnm",
        "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
