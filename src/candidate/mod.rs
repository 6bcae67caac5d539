//! Detection records and suppression of overlapping candidates.

pub(crate) mod nms;

use crate::bbox::BBox;
use std::cmp::Ordering;

/// A scored, classified box in model input pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Index of the winning class. Not checked against any label table.
    pub class_index: usize,
    /// Objectness times the best class score.
    pub score: f32,
    /// Clamped box corners.
    pub bbox: BBox,
}

/// A decoded detection that has not been through suppression yet.
pub type Candidate = Detection;

impl Detection {
    pub fn new(class_index: usize, score: f32, bbox: BBox) -> Self {
        Self {
            class_index,
            score,
            bbox,
        }
    }
}

fn score_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Sorts by descending score; equal scores keep their input order.
pub(crate) fn sort_by_score_desc(items: &mut [Detection]) {
    // `sort_by` is stable, which is what keeps ties in input order.
    items.sort_by(score_cmp_desc);
}
