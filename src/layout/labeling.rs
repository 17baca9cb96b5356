//! Reading-order row grouping and booth id synthesis
//!
//! Booths are sorted top-to-bottom, then left-to-right, and swept once. A
//! new row starts whenever a booth sits more than the row gap away from the
//! current row anchor; the anchor is the `y` of the booth that opened the
//! row and does not drift. This is deliberately a single sticky pass rather
//! than 2D clustering: one misplaced box near a row boundary shifts the rows
//! of every box after it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::normalize::NormalizedBooth;
use crate::config::LabelingConfig;

/// Final output entity: normalized bounds plus a `{Row}{Number}` id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBooth {
    /// Row letters followed by the position in the row, e.g. `B3`
    pub id: String,
    #[serde(flatten)]
    pub bounds: NormalizedBooth,
}

/// Spreadsheet-style row name for a zero-based row index
///
/// `0 -> A`, `25 -> Z`, `26 -> AA`, `701 -> ZZ`, `702 -> AAA`.
pub fn row_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Reading order: `y`, then `x`, with exact ties broken by size
pub fn reading_order(a: &NormalizedBooth, b: &NormalizedBooth) -> Ordering {
    a.y.total_cmp(&b.y)
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| a.width.total_cmp(&b.width))
        .then_with(|| a.height.total_cmp(&b.height))
}

/// Sticky single-pass row labeler
#[derive(Debug, Clone)]
pub struct RowLabeler {
    row_gap_threshold: f64,
}

impl Default for RowLabeler {
    fn default() -> Self {
        Self::new(&LabelingConfig::default())
    }
}

impl RowLabeler {
    pub fn new(config: &LabelingConfig) -> Self {
        Self {
            row_gap_threshold: config.row_gap_threshold,
        }
    }

    /// Sort into reading order and assign ids
    pub fn label(&self, mut booths: Vec<NormalizedBooth>) -> Vec<LabeledBooth> {
        booths.sort_by(reading_order);

        let mut labeled = Vec::with_capacity(booths.len());
        let mut anchor: Option<f64> = None;
        let mut row = 0usize;
        let mut seq = 1usize;

        for bounds in booths {
            match anchor {
                None => anchor = Some(bounds.y),
                Some(anchor_y) if (bounds.y - anchor_y).abs() > self.row_gap_threshold => {
                    row += 1;
                    seq = 1;
                    anchor = Some(bounds.y);
                }
                Some(_) => {}
            }

            labeled.push(LabeledBooth {
                id: format!("{}{}", row_letters(row), seq),
                bounds,
            });
            seq += 1;
        }

        labeled
    }
}
