//! Binary edge map extraction
//!
//! Two-threshold (Canny) gradient edge detection with fixed thresholds. The
//! input is already smoothed, so no further blur is applied here. Low
//! contrast plans simply produce fewer edges; there is no failure path.

use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::config::EdgeConfig;

/// Intensity written for edge pixels
pub const EDGE: u8 = 255;

const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_6;

/// Binary edge mask (`EDGE` = edge, 0 = background)
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMap {
    mask: GrayImage,
}

impl EdgeMap {
    /// Wrap a mask, binarizing any non-zero value to `EDGE`
    pub fn from_mask(mut mask: GrayImage) -> Self {
        for pixel in mask.pixels_mut() {
            if pixel[0] != 0 {
                *pixel = Luma([EDGE]);
            }
        }
        Self { mask }
    }

    /// Whether the pixel at `(x, y)` is on an edge
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.mask.get_pixel(x, y)[0] != 0
    }

    /// Number of edge pixels
    pub fn edge_count(&self) -> usize {
        self.mask.pixels().filter(|p| p[0] != 0).count()
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Borrow the underlying mask
    pub fn as_image(&self) -> &GrayImage {
        &self.mask
    }
}

/// Sobel response with L1 magnitude, row-major
struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    magnitude: Vec<f32>,
}

impl Gradients {
    fn sobel(gray: &GrayImage) -> Self {
        let gx: Vec<i32> = horizontal_sobel(gray).pixels().map(|p| p[0] as i32).collect();
        let gy: Vec<i32> = vertical_sobel(gray).pixels().map(|p| p[0] as i32).collect();
        let magnitude = gx
            .iter()
            .zip(&gy)
            .map(|(dx, dy)| (dx.abs() + dy.abs()) as f32)
            .collect();

        Self {
            width: gray.width() as usize,
            height: gray.height() as usize,
            gx,
            gy,
            magnitude,
        }
    }

    /// Magnitude at `(x, y)`, zero outside the grid
    fn at(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0.0;
        }
        self.magnitude[y as usize * self.width + x as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strength {
    None,
    Weak,
    Strong,
}

/// Thin the gradient to its ridge and grade each surviving pixel
///
/// A pixel survives when its magnitude exceeds `low` and is a local maximum
/// across the gradient direction, quantized to 0°, 45°, 90° or 135°.
fn suppress_non_maxima(gradients: &Gradients, low: f32, high: f32) -> Vec<Strength> {
    let mut grades = vec![Strength::None; gradients.magnitude.len()];

    for y in 0..gradients.height {
        for x in 0..gradients.width {
            let i = y * gradients.width + x;
            let m = gradients.magnitude[i];
            if m <= low {
                continue;
            }

            let (dx, dy) = (gradients.gx[i], gradients.gy[i]);
            let (ax, ay) = (dx.abs() as f32, dy.abs() as f32);
            let (xi, yi) = (x as isize, y as isize);

            let is_ridge = if ay < ax * TAN_22_5 {
                m > gradients.at(xi - 1, yi) && m >= gradients.at(xi + 1, yi)
            } else if ay > ax * TAN_67_5 {
                m > gradients.at(xi, yi - 1) && m >= gradients.at(xi, yi + 1)
            } else {
                let s: isize = if (dx ^ dy) < 0 { -1 } else { 1 };
                m > gradients.at(xi - s, yi - 1) && m > gradients.at(xi + s, yi + 1)
            };

            if is_ridge {
                grades[i] = if m > high { Strength::Strong } else { Strength::Weak };
            }
        }
    }

    grades
}

/// Keep strong pixels and every weak pixel 8-connected to one
fn hysteresis(grades: &[Strength], width: usize, height: usize) -> GrayImage {
    let mut mask = GrayImage::new(width as u32, height as u32);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (i, grade) in grades.iter().enumerate() {
        if *grade == Strength::Strong {
            let (x, y) = (i % width, i / width);
            mask.put_pixel(x as u32, y as u32, Luma([EDGE]));
            stack.push((x, y));
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if grades[ny * width + nx] == Strength::Weak
                    && mask.get_pixel(nx as u32, ny as u32)[0] == 0
                {
                    mask.put_pixel(nx as u32, ny as u32, Luma([EDGE]));
                    stack.push((nx, ny));
                }
            }
        }
    }

    mask
}

/// Run the Canny detector on a smoothed intensity grid
///
/// 3×3 Sobel gradients with L1 magnitude, non-maximum suppression and
/// two-threshold hysteresis. Thresholds given in the wrong order are swapped.
pub fn extract_edges(smoothed: &GrayImage, config: &EdgeConfig) -> EdgeMap {
    let (mut low, mut high) = (config.canny_low_threshold, config.canny_high_threshold);
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }

    let (width, height) = (smoothed.width() as usize, smoothed.height() as usize);
    if width == 0 || height == 0 {
        return EdgeMap::from_mask(smoothed.clone());
    }

    let gradients = Gradients::sobel(smoothed);
    let grades = suppress_non_maxima(&gradients, low, high);
    EdgeMap::from_mask(hysteresis(&grades, width, height))
}
