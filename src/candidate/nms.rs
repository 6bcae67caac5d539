//! Greedy non-maximum suppression by IoU.

use crate::bbox::iou;
use crate::candidate::{sort_by_score_desc, Candidate, Detection};
use crate::trace;

/// Greedy class-agnostic non-maximum suppression.
///
/// Candidates are stable-sorted by descending score. Walking that order, each
/// candidate still alive is kept and every later alive candidate whose IoU
/// with it exceeds `iou_threshold` is marked dead, regardless of class.
///
/// The result is ordered by descending score and contains no pair with IoU
/// above the threshold. Running it again on its own output is a no-op.
pub fn suppress(candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Detection> {
    suppress_with(candidates, iou_threshold, |_, _| true)
}

/// Greedy non-maximum suppression restricted to same-class pairs.
///
/// Overlapping boxes of different classes both survive.
pub fn suppress_per_class(candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Detection> {
    suppress_with(candidates, iou_threshold, |best, other| {
        best.class_index == other.class_index
    })
}

fn suppress_with<F>(mut candidates: Vec<Candidate>, iou_threshold: f32, competes: F) -> Vec<Detection>
where
    F: Fn(&Detection, &Detection) -> bool,
{
    let _stage = trace::suppress_span(candidates.len());
    let total = candidates.len();

    sort_by_score_desc(&mut candidates);
    let mut alive = vec![true; candidates.len()];
    let mut kept = Vec::new();

    for idx in 0..candidates.len() {
        if !alive[idx] {
            continue;
        }
        let best = candidates[idx];
        kept.push(best);

        for (other, flag) in candidates[idx + 1..]
            .iter()
            .zip(alive[idx + 1..].iter_mut())
        {
            if *flag && competes(&best, other) && iou(&best.bbox, &other.bbox) > iou_threshold {
                *flag = false;
            }
        }
    }

    trace::suppress_done(kept.len(), total - kept.len());
    kept
}
