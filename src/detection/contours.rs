//! Closed boundary tracing over the edge map
//!
//! Only top-level outer borders are kept: an outline nested inside another
//! edge component (a booth's inner stroke, text inside a booth) is dropped.
//! Each kept border is compressed to its corner vertices by removing the
//! interior points of straight horizontal, vertical and diagonal runs.
//! The returned order carries no meaning.

use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use super::edges::EdgeMap;

/// Closed polygonal boundary in pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

/// Inclusive axis-aligned pixel extent of a contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Contour {
    pub fn from_points(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area of the closed polygon (shoelace formula)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice_area: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice_area.abs() as f64 / 2.0
    }

    /// Smallest axis-aligned rectangle covering every point
    ///
    /// Extents are inclusive, so a single point has width and height 1.
    pub fn bounding_rect(&self) -> Option<PixelRect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(PixelRect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}

/// Trace outer boundaries of edge components
pub fn find_outer_contours(edges: &EdgeMap) -> Vec<Contour> {
    find_contours::<i32>(edges.as_image())
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour::from_points(approximate_chain(&c.points)))
        .collect()
}

/// Drop points lying inside straight runs of a closed chain
pub fn approximate_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            step(prev, curr) != step(curr, next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}
