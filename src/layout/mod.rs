//! Resolution-independent booth layout
//!
//! Converts accepted pixel boxes into percentage coordinates and assigns
//! row/number identifiers in reading order.

pub mod labeling;
pub mod normalize;

pub use labeling::{row_letters, LabeledBooth, RowLabeler};
pub use normalize::{normalize, normalize_all, NormalizedBooth};
